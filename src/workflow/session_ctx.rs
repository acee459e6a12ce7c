//! 考试会话上下文
//!
//! 封装"哪位学生在考哪场考试"这一信息

use std::fmt::Display;

/// 考试会话上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCtx {
    /// 考试ID
    pub exam_id: String,

    /// 学生ID
    pub student_id: String,
}

impl SessionCtx {
    /// 创建新的会话上下文
    pub fn new(exam_id: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            exam_id: exam_id.into(),
            student_id: student_id.into(),
        }
    }
}

impl Display for SessionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[考试 #{} 学生 #{}]", self.exam_id, self.student_id)
    }
}
