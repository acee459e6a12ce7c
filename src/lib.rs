//! # Exam Session
//!
//! 学生端考试作答客户端：加载/恢复考试、作答、计时、交卷、查看成绩
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 客户端、时钟、令牌文件），只暴露能力
//! - `HttpExecutor` - 唯一的 HTTP client owner，统一处理鉴权和 401 强制登出
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心会话状态
//! - `AnswerStore` - 乐观写入、确认、回滚
//! - `Deadline` - 截止时间与剩余时间
//! - `Countdown` - 可取消的倒计时任务
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次作答"的完整流程
//! - `SessionCtx` - 上下文封装（exam_id + student_id）
//! - `ExamSession` - 状态机（加载 → 开始 → 作答 → 交卷 → 成绩）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 命令行驱动，组装依赖并按顺序调用会话
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod presentation;
pub mod services;
pub mod state;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpGateway, SubmissionGateway};
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, SessionError};
pub use infrastructure::{Clock, HttpExecutor, ManualClock, SystemClock, TokenStore};
pub use models::{AnswerRecord, AnswerValue, ExamResult, Question};
pub use orchestrator::App;
pub use state::AuthState;
pub use workflow::{ExamSession, SessionCtx, SessionSettings, SessionSnapshot, SessionState};
