//! 集成测试共用的内存网关
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use exam_session::error::ApiError;
use exam_session::infrastructure::ManualClock;
use exam_session::models::{
    AnswerRecord, AnswerValue, ChoiceOption, ExamDefinition, ExamInstance, ExamResult,
    GradingDetail, InstanceStatus, InstanceStatusSummary, Question, QuestionKind,
};
use exam_session::workflow::{ExamSession, SessionCtx, SessionSettings};
use exam_session::{Clock, SubmissionGateway};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const EXAM_ID: &str = "exam-1";
pub const STUDENT_ID: &str = "stu-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetExam,
    Generate,
    Start,
    SubmitAnswer,
    SubmitExam,
    GetResult,
    Status,
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
}

pub fn questions() -> Vec<Question> {
    vec![
        Question {
            id: "q1".to_string(),
            content: "2 + 2 = ?".to_string(),
            points: 2.0,
            kind: QuestionKind::MultipleChoice {
                options: ["3", "4", "5"]
                    .iter()
                    .map(|t| ChoiceOption {
                        text: t.to_string(),
                    })
                    .collect(),
            },
        },
        Question {
            id: "q2".to_string(),
            content: "中国的首都是____".to_string(),
            points: 3.0,
            kind: QuestionKind::FillInBlank,
        },
        Question {
            id: "q3".to_string(),
            content: "水的化学式是____".to_string(),
            points: 5.0,
            kind: QuestionKind::FillInBlank,
        },
    ]
}

pub fn exam(duration_minutes: Option<u32>) -> ExamDefinition {
    ExamDefinition {
        id: EXAM_ID.to_string(),
        title: "期中测验".to_string(),
        duration_minutes,
        schedule_end_time: None,
        max_attempts: Some(1),
    }
}

pub fn fresh_instance() -> ExamInstance {
    ExamInstance {
        exam_id: EXAM_ID.to_string(),
        student_id: STUDENT_ID.to_string(),
        attempt_number: 1,
        status: InstanceStatus::NotStarted,
        start_time: None,
        questions: questions(),
        answers: vec![],
    }
}

pub fn network_error() -> ApiError {
    ApiError::RequestFailed {
        endpoint: "test".to_string(),
        source: "connection reset".into(),
    }
}

pub fn rejected(message: &str) -> ApiError {
    ApiError::BadResponse {
        endpoint: "test".to_string(),
        status: 403,
        message: Some(message.to_string()),
    }
}

pub fn unauthorized() -> ApiError {
    ApiError::Unauthorized {
        endpoint: "test".to_string(),
    }
}

pub fn settings() -> SessionSettings {
    SessionSettings {
        tick_interval: Duration::from_secs(1),
        submit_flush_timeout: Duration::from_secs(5),
        deadline_mismatch_warn: ChronoDuration::minutes(10),
    }
}

/// 内存版服务端
///
/// 只在 `not_started` 时写入开始时间，已开始后 `start_exam` 原样返回实例。
pub struct FakeGateway {
    pub clock: Arc<ManualClock>,
    pub exam: Mutex<ExamDefinition>,
    pub instance: Mutex<ExamInstance>,
    pub summary: Mutex<InstanceStatusSummary>,
    pub result_status: Mutex<Option<InstanceStatus>>,
    pub answer_delay: Mutex<Duration>,
    pub submit_delay: Mutex<Duration>,
    /// 开始接口只返回 `{status, startTime}`
    pub start_ack_only: Mutex<bool>,
    /// 服务端收到的答案，按到达顺序
    pub sent_answers: Mutex<Vec<(String, AnswerValue)>>,
    /// 调用顺序，用于校验交卷前是否已刷完答案
    pub events: Mutex<Vec<String>>,
    failures: Mutex<HashMap<Op, VecDeque<ApiError>>>,
    calls: Mutex<HashMap<Op, AtomicUsize>>,
}

impl FakeGateway {
    pub fn new(clock: Arc<ManualClock>, exam: ExamDefinition, instance: ExamInstance) -> Self {
        let summary = InstanceStatusSummary {
            has_completed: instance.status == InstanceStatus::Completed,
            in_progress: instance.status == InstanceStatus::InProgress,
            completed_attempts: 0,
        };
        Self {
            clock,
            exam: Mutex::new(exam),
            instance: Mutex::new(instance),
            summary: Mutex::new(summary),
            result_status: Mutex::new(None),
            answer_delay: Mutex::new(Duration::ZERO),
            submit_delay: Mutex::new(Duration::ZERO),
            start_ack_only: Mutex::new(false),
            sent_answers: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// 下一次该操作返回指定错误
    pub fn fail_next(&self, op: Op, err: ApiError) {
        self.failures
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(err);
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&op)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn set_answer_delay(&self, delay: Duration) {
        *self.answer_delay.lock().unwrap() = delay;
    }

    pub fn set_submit_delay(&self, delay: Duration) {
        *self.submit_delay.lock().unwrap() = delay;
    }

    pub fn status(&self) -> InstanceStatus {
        self.instance.lock().unwrap().status
    }

    fn enter(&self, op: Op) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .fetch_add(1, Ordering::SeqCst);
        match self.failures.lock().unwrap().get_mut(&op).and_then(|q| q.pop_front()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn event(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl SubmissionGateway for FakeGateway {
    async fn get_exam(&self, _exam_id: &str) -> Result<ExamDefinition, ApiError> {
        self.enter(Op::GetExam)?;
        Ok(self.exam.lock().unwrap().clone())
    }

    async fn generate_questions(
        &self,
        _exam_id: &str,
        _student_id: &str,
    ) -> Result<ExamInstance, ApiError> {
        self.enter(Op::Generate)?;
        Ok(self.instance.lock().unwrap().clone())
    }

    async fn start_exam(&self, _exam_id: &str, _student_id: &str) -> Result<ExamInstance, ApiError> {
        self.enter(Op::Start)?;
        let mut instance = self.instance.lock().unwrap();
        if instance.status == InstanceStatus::NotStarted {
            instance.status = InstanceStatus::InProgress;
            instance.start_time = Some(self.clock.now());
            self.summary.lock().unwrap().in_progress = true;
        }
        if *self.start_ack_only.lock().unwrap() {
            return Ok(ExamInstance {
                exam_id: String::new(),
                student_id: String::new(),
                attempt_number: 1,
                status: instance.status,
                start_time: instance.start_time,
                questions: vec![],
                answers: vec![],
            });
        }
        Ok(instance.clone())
    }

    async fn submit_answer(
        &self,
        _exam_id: &str,
        _student_id: &str,
        question_id: &str,
        answer: &AnswerValue,
    ) -> Result<(), ApiError> {
        let delay = *self.answer_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.enter(Op::SubmitAnswer)?;
        self.event(format!("answer:{}", question_id));
        self.sent_answers
            .lock()
            .unwrap()
            .push((question_id.to_string(), answer.clone()));

        let record = AnswerRecord::new(question_id, answer.clone(), self.clock.now());
        let mut instance = self.instance.lock().unwrap();
        instance.answers.retain(|a| a.question_id != question_id);
        instance.answers.push(record);
        Ok(())
    }

    async fn submit_exam(&self, _exam_id: &str, _student_id: &str) -> Result<(), ApiError> {
        self.event("submit".to_string());
        let delay = *self.submit_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.enter(Op::SubmitExam)?;
        self.instance.lock().unwrap().status = InstanceStatus::Completed;
        let mut summary = self.summary.lock().unwrap();
        summary.in_progress = false;
        summary.has_completed = true;
        summary.completed_attempts += 1;
        Ok(())
    }

    async fn get_exam_result(
        &self,
        _exam_id: &str,
        _student_id: &str,
        _attempt: u32,
    ) -> Result<ExamResult, ApiError> {
        self.enter(Op::GetResult)?;
        let instance = self.instance.lock().unwrap().clone();
        let status = self.result_status.lock().unwrap().unwrap_or(instance.status);

        let grading_details: Vec<GradingDetail> = instance
            .questions
            .iter()
            .map(|q| {
                let answered = instance.answers.iter().any(|a| a.question_id == q.id);
                GradingDetail {
                    question_id: q.id.clone(),
                    is_correct: answered,
                    points_earned: if answered { q.points } else { 0.0 },
                    max_points: q.points,
                    similarity: None,
                    explanation: None,
                    feedback: None,
                }
            })
            .collect();

        Ok(ExamResult {
            score: grading_details.iter().map(|d| d.points_earned).sum(),
            correct_answers: grading_details.iter().filter(|d| d.is_correct).count() as u32,
            total_questions: instance.questions.len() as u32,
            questions: instance.questions.clone(),
            grading_details,
            answers: instance.answers.clone(),
            status,
            submit_time: None,
        })
    }

    async fn get_instance_status(
        &self,
        _exam_id: &str,
        _student_id: &str,
    ) -> Result<InstanceStatusSummary, ApiError> {
        self.enter(Op::Status)?;
        Ok(*self.summary.lock().unwrap())
    }
}

/// 组装会话：同一个手动时钟同时驱动服务端和客户端
pub fn session_with(
    exam: ExamDefinition,
    instance: ExamInstance,
) -> (ExamSession, Arc<FakeGateway>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let fake = Arc::new(FakeGateway::new(clock.clone(), exam, instance));
    let session = session_on(&fake, &clock);
    (session, fake, clock)
}

/// 在同一个服务端上再开一个会话（模拟刷新页面或换设备）
pub fn session_on(fake: &Arc<FakeGateway>, clock: &Arc<ManualClock>) -> ExamSession {
    ExamSession::new(
        SessionCtx::new(EXAM_ID, STUDENT_ID),
        fake.clone(),
        clock.clone(),
        settings(),
    )
}
