//! 展示层
//!
//! 只读取会话快照和成绩，不持有任何状态。

pub mod render;

pub use render::{format_remaining, render_question, render_result_summary, render_status_line};
