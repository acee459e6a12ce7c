//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是命令行驱动的"指挥中心"：组装依赖、按顺序调用会话方法、输出结果。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (组装 + 驱动)
//!     ↓
//! workflow::ExamSession (一次作答的状态机)
//!     ↓
//! services (能力层：answer_store / deadline / countdown)
//!     ↓
//! clients::SubmissionGateway → infrastructure::HttpExecutor
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 HTTP 客户端和登录状态
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：考试状态只由会话决定，这里只做调度和展示

pub mod app;

pub use app::App;
