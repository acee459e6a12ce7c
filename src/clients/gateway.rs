//! 提交网关
//!
//! 服务端是考试状态、计时和评分的唯一权威，客户端只通过这里与之交互。

use crate::error::ApiError;
use crate::models::{
    AnswerValue, ExamDefinition, ExamInstance, ExamResult, InstanceStatusSummary,
};
use async_trait::async_trait;

#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// 考试定义（时长、排考结束时间、次数上限）
    async fn get_exam(&self, exam_id: &str) -> Result<ExamDefinition, ApiError>;

    /// 生成或恢复学生的考试实例，已开始后重复调用返回同一实例
    async fn generate_questions(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<ExamInstance, ApiError>;

    /// 开始考试，服务端写入权威开始时间
    async fn start_exam(&self, exam_id: &str, student_id: &str) -> Result<ExamInstance, ApiError>;

    /// 保存单题答案（upsert）
    async fn submit_answer(
        &self,
        exam_id: &str,
        student_id: &str,
        question_id: &str,
        answer: &AnswerValue,
    ) -> Result<(), ApiError>;

    /// 交卷
    async fn submit_exam(&self, exam_id: &str, student_id: &str) -> Result<(), ApiError>;

    async fn get_exam_result(
        &self,
        exam_id: &str,
        student_id: &str,
        attempt: u32,
    ) -> Result<ExamResult, ApiError>;

    async fn get_instance_status(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<InstanceStatusSummary, ApiError>;
}
