use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::answer::AnswerRecord;
use crate::models::question::Question;

/// 考试定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDefinition {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// 考试时长（分钟），为空表示不限时
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// 排考结束时间（机房/监考场次），存在时为权威截止时间
    #[serde(default)]
    pub schedule_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

/// 考试实例状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// 服务端为学生生成的考试实例
///
/// 开始接口可能只返回 `{status, startTime}`，其余字段都允许缺省。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamInstance {
    #[serde(default)]
    pub exam_id: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default = "first_attempt")]
    pub attempt_number: u32,
    pub status: InstanceStatus,
    /// 进入 in_progress 时由服务端设置，之后不再变化
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
}

fn first_attempt() -> u32 {
    1
}

/// 学生在某场考试上的实例概况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStatusSummary {
    #[serde(default)]
    pub has_completed: bool,
    #[serde(default)]
    pub in_progress: bool,
    #[serde(default)]
    pub completed_attempts: u32,
}

/// 界面允许的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AllowedActions {
    pub can_start: bool,
    pub can_resume: bool,
    pub can_view_result: bool,
}

impl AllowedActions {
    /// 根据实例概况和考试次数上限推算
    pub fn derive(summary: &InstanceStatusSummary, max_attempts: Option<u32>) -> Self {
        let attempts_left = max_attempts
            .map(|max| summary.completed_attempts < max)
            .unwrap_or(true);
        Self {
            can_start: !summary.in_progress && attempts_left,
            can_resume: summary.in_progress,
            can_view_result: summary.has_completed,
        }
    }

    /// 已无可进行的作答
    pub fn is_exhausted(&self) -> bool {
        !self.can_start && !self.can_resume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_actions_respect_attempt_limit() {
        let summary = InstanceStatusSummary {
            has_completed: true,
            in_progress: false,
            completed_attempts: 2,
        };

        let limited = AllowedActions::derive(&summary, Some(2));
        assert!(!limited.can_start);
        assert!(limited.can_view_result);
        assert!(limited.is_exhausted());

        let unlimited = AllowedActions::derive(&summary, None);
        assert!(unlimited.can_start);
        assert!(!unlimited.is_exhausted());
    }

    #[test]
    fn test_in_progress_allows_resume_only() {
        let summary = InstanceStatusSummary {
            has_completed: false,
            in_progress: true,
            completed_attempts: 0,
        };
        let actions = AllowedActions::derive(&summary, Some(1));
        assert!(actions.can_resume);
        assert!(!actions.can_start);
    }

    #[test]
    fn test_instance_defaults() {
        let instance: ExamInstance = serde_json::from_str(
            r#"{"examId": "e1", "studentId": "s1", "status": "not_started"}"#,
        )
        .unwrap();
        assert_eq!(instance.attempt_number, 1);
        assert_eq!(instance.status, InstanceStatus::NotStarted);
        assert!(instance.start_time.is_none());
        assert!(instance.questions.is_empty());
    }

    #[test]
    fn test_start_ack_without_identity_or_questions() {
        let ack: ExamInstance = serde_json::from_str(
            r#"{"status": "in_progress", "startTime": "2026-06-01T09:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(ack.status, InstanceStatus::InProgress);
        assert!(ack.start_time.is_some());
        assert!(ack.exam_id.is_empty());
        assert!(ack.questions.is_empty());
    }
}
