/// 考试服务 API 客户端
///
/// 封装所有与考试服务 REST API 相关的调用逻辑
use crate::clients::gateway::SubmissionGateway;
use crate::error::ApiError;
use crate::infrastructure::HttpExecutor;
use crate::models::{
    AnswerValue, ExamDefinition, ExamInstance, ExamResult, InstanceStatusSummary,
};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

/// 考试服务客户端
pub struct HttpGateway {
    executor: HttpExecutor,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitAnswerBody<'a> {
    question_id: &'a str,
    answer: &'a AnswerValue,
}

impl HttpGateway {
    /// 创建新的考试服务客户端
    pub fn new(executor: HttpExecutor) -> Self {
        Self { executor }
    }

    fn student_path(exam_id: &str, student_id: &str, action: &str) -> String {
        format!("exams/{}/students/{}/{}", exam_id, student_id, action)
    }
}

#[async_trait]
impl SubmissionGateway for HttpGateway {
    async fn get_exam(&self, exam_id: &str) -> Result<ExamDefinition, ApiError> {
        self.executor.get_json(&format!("exams/{}", exam_id)).await
    }

    async fn generate_questions(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<ExamInstance, ApiError> {
        let endpoint = Self::student_path(exam_id, student_id, "generate");
        let instance: ExamInstance = self.executor.post_json::<(), _>(&endpoint, None).await?;
        debug!(
            "生成题目: 第 {} 次作答, {} 道题, 已有 {} 条答案",
            instance.attempt_number,
            instance.questions.len(),
            instance.answers.len()
        );
        Ok(instance)
    }

    async fn start_exam(&self, exam_id: &str, student_id: &str) -> Result<ExamInstance, ApiError> {
        let endpoint = Self::student_path(exam_id, student_id, "start");
        self.executor.post_json::<(), _>(&endpoint, None).await
    }

    async fn submit_answer(
        &self,
        exam_id: &str,
        student_id: &str,
        question_id: &str,
        answer: &AnswerValue,
    ) -> Result<(), ApiError> {
        let endpoint = Self::student_path(exam_id, student_id, "answers");
        let body = SubmitAnswerBody {
            question_id,
            answer,
        };
        self.executor.post_ack(&endpoint, Some(&body)).await
    }

    async fn submit_exam(&self, exam_id: &str, student_id: &str) -> Result<(), ApiError> {
        let endpoint = Self::student_path(exam_id, student_id, "submit");
        info!("📋 提交试卷...");
        self.executor.post_ack::<()>(&endpoint, None).await
    }

    async fn get_exam_result(
        &self,
        exam_id: &str,
        student_id: &str,
        attempt: u32,
    ) -> Result<ExamResult, ApiError> {
        let endpoint = Self::student_path(exam_id, student_id, &format!("results/{}", attempt));
        self.executor.get_json(&endpoint).await
    }

    async fn get_instance_status(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<InstanceStatusSummary, ApiError> {
        let endpoint = Self::student_path(exam_id, student_id, "status");
        self.executor.get_json(&endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_paths() {
        assert_eq!(
            HttpGateway::student_path("e1", "s9", "generate"),
            "exams/e1/students/s9/generate"
        );
        assert_eq!(
            HttpGateway::student_path("e1", "s9", "results/2"),
            "exams/e1/students/s9/results/2"
        );
    }

    #[test]
    fn test_submit_answer_body_shape() {
        let answer = AnswerValue::Choice(1);
        let body = SubmitAnswerBody {
            question_id: "q3",
            answer: &answer,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"questionId": "q3", "answer": 1})
        );
    }
}
