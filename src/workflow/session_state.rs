//! 会话状态与对外快照

use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::time::Duration;

use crate::error::SessionError;
use crate::models::{AllowedActions, AnswerValue, Question};
use crate::services::SyncStatus;
use crate::workflow::session_ctx::SessionCtx;

/// 会话状态机
///
/// `Loading → NotStarted → InProgress → Submitting → Completed`，
/// 任意状态遇到不可恢复的错误都会进入 `Error`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Loading,
    NotStarted,
    InProgress,
    Submitting,
    Completed,
    Error(SessionError),
}

impl SessionState {
    /// 终态：计时器不再需要
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Error(_))
    }
}

impl Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Loading => write!(f, "加载中"),
            SessionState::NotStarted => write!(f, "未开始"),
            SessionState::InProgress => write!(f, "作答中"),
            SessionState::Submitting => write!(f, "交卷中"),
            SessionState::Completed => write!(f, "已交卷"),
            SessionState::Error(e) => write!(f, "出错: {}", e),
        }
    }
}

/// 交卷触发方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    /// 用户主动交卷
    Manual,
    /// 到达截止时间自动交卷
    Deadline,
}

/// 交卷结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 本次调用完成了交卷
    Submitted,
    /// 已有交卷请求在进行中，本次被忽略
    Suppressed,
    /// 之前已经交过卷
    AlreadySubmitted,
    /// 自动交卷失败，但本地已按交卷处理，需要事后核对
    ForcedCompletion,
}

/// 单题保存结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// 服务端已确认
    Saved,
    /// 在发送前被同一题更新的编辑取代，未发送
    Superseded,
}

/// 单题的作答视图
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerView {
    pub question_id: String,
    pub answer: Option<AnswerValue>,
    pub status: Option<SyncStatus>,
}

/// 展示层读取的只读快照
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub ctx: SessionCtx,
    pub state: SessionState,
    pub title: Option<String>,
    pub attempt_number: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub remaining: Option<Duration>,
    /// 题目顺序与服务端下发一致
    pub questions: Vec<Question>,
    /// 与 `questions` 一一对应
    pub answers: Vec<AnswerView>,
    pub allowed: AllowedActions,
    /// 被业务规则拒绝后的原因，存在时不允许开始/交卷
    pub blocked: Option<String>,
    /// 自动交卷失败后本地强制结束，需通过成绩接口核对
    pub reconcile_required: bool,
    pub last_error: Option<SessionError>,
}

impl SessionSnapshot {
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.answer.is_some()).count()
    }

    /// 显示"保存失败"提示的题目
    pub fn failed_questions(&self) -> Vec<&str> {
        self.answers
            .iter()
            .filter(|a| matches!(a.status, Some(SyncStatus::Failed { .. })))
            .map(|a| a.question_id.as_str())
            .collect()
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerView> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}
