use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 答案取值：选择题为选项下标，填空题为自由文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(usize),
    Text(String),
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // 选项按 A/B/C 显示
            AnswerValue::Choice(index) => match u8::try_from(*index).ok().filter(|i| *i < 26) {
                Some(i) => write!(f, "{}", (b'A' + i) as char),
                None => write!(f, "#{}", index),
            },
            AnswerValue::Text(text) => write!(f, "{}", text),
        }
    }
}

/// 单题作答记录，每次作答每题至多一条，后写覆盖
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub answer: AnswerValue,
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
}

impl AnswerRecord {
    pub fn new(question_id: impl Into<String>, answer: AnswerValue, answered_at: DateTime<Utc>) -> Self {
        Self {
            question_id: question_id.into(),
            answer,
            answered_at: Some(answered_at),
        }
    }
}
