use crate::models::answer::AnswerValue;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 答题卡：命令行驱动按此文件逐题作答
///
/// ```toml
/// exam_id = "midterm-2026"
///
/// [[answers]]
/// question_id = "q1"
/// choice = 1
///
/// [[answers]]
/// question_id = "q2"
/// text = "光合作用"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerSheet {
    /// 可选，用于核对答题卡是否对应当前考试
    #[serde(default)]
    pub exam_id: Option<String>,
    #[serde(default)]
    pub answers: Vec<SheetEntry>,
}

/// 答题卡中的一行
#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
    pub question_id: String,
    #[serde(default)]
    pub choice: Option<usize>,
    #[serde(default)]
    pub text: Option<String>,
}

impl SheetEntry {
    /// 转换为答案；`choice` 与 `text` 必须恰好给出一个
    pub fn value(&self) -> Option<AnswerValue> {
        match (self.choice, &self.text) {
            (Some(index), None) => Some(AnswerValue::Choice(index)),
            (None, Some(text)) => Some(AnswerValue::Text(text.clone())),
            _ => None,
        }
    }
}

impl AnswerSheet {
    pub fn parse(content: &str) -> Result<Self> {
        let sheet: AnswerSheet = toml::from_str(content).context("无法解析答题卡")?;
        Ok(sheet)
    }

    /// 有效答案列表，格式不对的行会被跳过并告警
    pub fn entries(&self) -> Vec<(String, AnswerValue)> {
        self.answers
            .iter()
            .filter_map(|entry| match entry.value() {
                Some(value) => Some((entry.question_id.clone(), value)),
                None => {
                    tracing::warn!(
                        "答题卡第 {} 题需要且只能填写 choice 或 text 其中之一，已跳过",
                        entry.question_id
                    );
                    None
                }
            })
            .collect()
    }
}

/// 从 TOML 文件加载答题卡
pub async fn load_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取答题卡: {}", path.display()))?;

    let sheet = AnswerSheet::parse(&content)
        .with_context(|| format!("无法解析答题卡: {}", path.display()))?;

    tracing::info!("成功加载答题卡，共 {} 行", sheet.answers.len());

    Ok(sheet)
}
