use serde::{Deserialize, Serialize};

use crate::models::answer::AnswerValue;

/// 题目（对客户端只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub points: f64,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// 题型
///
/// 按 `questionType` 标签区分，渲染时只分派一次。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "questionType", rename_all = "snake_case")]
pub enum QuestionKind {
    /// 单选题
    MultipleChoice { options: Vec<ChoiceOption> },
    /// 填空题，标准答案只在服务端
    FillInBlank,
}

/// 选项
///
/// 服务端可能附带的正确性标记不会被反序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub text: String,
}

impl Question {
    /// 检查答案是否符合题型（选择题下标需在范围内）
    pub fn accepts(&self, answer: &AnswerValue) -> bool {
        match (&self.kind, answer) {
            (QuestionKind::MultipleChoice { options }, AnswerValue::Choice(index)) => {
                *index < options.len()
            }
            (QuestionKind::FillInBlank, AnswerValue::Text(_)) => true,
            _ => false,
        }
    }
}
