//! 流程层
//!
//! - `SessionCtx` - 上下文封装（exam_id + student_id）
//! - `ExamSession` - 一次作答的状态机（加载 → 开始 → 作答 → 交卷 → 成绩）

pub mod session;
pub mod session_ctx;
pub mod session_state;

pub use session::{ExamSession, SessionSettings};
pub use session_ctx::SessionCtx;
pub use session_state::{
    AnswerOutcome, AnswerView, SessionSnapshot, SessionState, SubmitOutcome, SubmitTrigger,
};
