use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::answer::AnswerRecord;
use crate::models::exam::InstanceStatus;
use crate::models::question::Question;

/// 单题评分明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingDetail {
    pub question_id: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub points_earned: f64,
    #[serde(default)]
    pub max_points: f64,
    /// 填空题的相似度评分（服务端 AI 判分时附带）
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// 交卷后的成绩包，只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub score: f64,
    #[serde(default)]
    pub correct_answers: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub grading_details: Vec<GradingDetail>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    pub status: InstanceStatus,
    #[serde(default)]
    pub submit_time: Option<DateTime<Utc>>,
}

const SCORE_EPSILON: f64 = 1e-6;

impl ExamResult {
    /// 评分明细之和
    pub fn earned_points(&self) -> f64 {
        self.grading_details.iter().map(|d| d.points_earned).sum()
    }

    pub fn max_points(&self) -> f64 {
        self.grading_details.iter().map(|d| d.max_points).sum()
    }

    /// 明细条数与题目总数一致，且总分等于明细得分之和
    pub fn is_consistent(&self) -> bool {
        self.grading_details.len() == self.total_questions as usize
            && (self.earned_points() - self.score).abs() < SCORE_EPSILON
    }

    pub fn detail_for(&self, question_id: &str) -> Option<&GradingDetail> {
        self.grading_details
            .iter()
            .find(|d| d.question_id == question_id)
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerRecord> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(question_id: &str, earned: f64) -> GradingDetail {
        GradingDetail {
            question_id: question_id.to_string(),
            is_correct: earned > 0.0,
            points_earned: earned,
            max_points: 2.0,
            similarity: None,
            explanation: None,
            feedback: None,
        }
    }

    #[test]
    fn test_consistency_check() {
        let mut result = ExamResult {
            score: 3.5,
            correct_answers: 2,
            total_questions: 3,
            questions: Vec::new(),
            grading_details: vec![detail("q1", 2.0), detail("q2", 0.0), detail("q3", 1.5)],
            answers: Vec::new(),
            status: InstanceStatus::Completed,
            submit_time: None,
        };
        assert!(result.is_consistent());
        assert_eq!(result.max_points(), 6.0);

        result.score = 4.0;
        assert!(!result.is_consistent());

        result.score = 3.5;
        result.total_questions = 4;
        assert!(!result.is_consistent());
    }

    #[test]
    fn test_free_text_grading_fields() {
        let detail: GradingDetail = serde_json::from_str(
            r#"{"questionId": "q7", "isCorrect": true, "pointsEarned": 1.5, "maxPoints": 2,
                "similarity": 0.87, "explanation": "意思接近", "feedback": "注意关键词"}"#,
        )
        .unwrap();
        assert_eq!(detail.similarity, Some(0.87));
        assert_eq!(detail.feedback.as_deref(), Some("注意关键词"));
    }
}
