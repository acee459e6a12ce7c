//! 考试会话 - 流程层
//!
//! 核心职责：驱动一次作答的完整生命周期
//!
//! 1. 加载/恢复：从服务端重建实例，本地计时器永远不覆盖服务端状态
//! 2. 开始：服务端写入开始时间后计算截止时间，启动倒计时
//! 3. 作答：乐观写入 + 异步保存，同题串行、后写覆盖
//! 4. 交卷：手动或到时自动，单飞保护，`submitExam` 每次作答至多调用一次
//! 5. 成绩：交卷后只读获取

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, warn};

use crate::clients::SubmissionGateway;
use crate::config::Config;
use crate::error::SessionError;
use crate::infrastructure::Clock;
use crate::models::{
    AllowedActions, AnswerRecord, AnswerValue, ExamDefinition, ExamInstance, ExamResult,
    InstanceStatus, Question,
};
use crate::services::{AnswerStore, Countdown, Deadline, RemainingTracker};
use crate::workflow::session_ctx::SessionCtx;
use crate::workflow::session_state::{
    AnswerOutcome, AnswerView, SessionSnapshot, SessionState, SubmitOutcome, SubmitTrigger,
};

/// 会话参数
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// 倒计时刷新间隔
    pub tick_interval: Duration,
    /// 交卷前等待未完成保存的上限
    pub submit_flush_timeout: Duration,
    /// 截止时间两种算法差距的告警阈值
    pub deadline_mismatch_warn: chrono::Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            submit_flush_timeout: Duration::from_secs(5),
            deadline_mismatch_warn: chrono::Duration::minutes(10),
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
            submit_flush_timeout: Duration::from_secs(config.submit_flush_timeout_secs),
            deadline_mismatch_warn: chrono::Duration::minutes(config.deadline_mismatch_warn_minutes),
        }
    }
}

/// 考试会话
///
/// 可廉价克隆，所有克隆共享同一份状态。答案存储只归会话所有，
/// 展示层通过 [`ExamSession::snapshot`] 读取，通过方法提交意图。
#[derive(Clone)]
pub struct ExamSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    ctx: SessionCtx,
    gateway: Arc<dyn SubmissionGateway>,
    clock: Arc<dyn Clock>,
    settings: SessionSettings,
    core: Mutex<SessionCore>,
    submit_in_flight: AtomicBool,
    save_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    countdown: Mutex<Option<Countdown>>,
}

#[derive(Default)]
struct SessionCore {
    state: SessionState,
    exam: Option<ExamDefinition>,
    attempt_number: Option<u32>,
    start_time: Option<DateTime<Utc>>,
    questions: Vec<Question>,
    answers: AnswerStore,
    deadline: Option<Deadline>,
    remaining: RemainingTracker,
    allowed: AllowedActions,
    blocked: Option<String>,
    reconcile_required: bool,
    last_error: Option<SessionError>,
    result: Option<ExamResult>,
}

/// 一次加载拿到的数据
struct Loaded {
    exam: ExamDefinition,
    allowed: AllowedActions,
    completed_attempts: u32,
    instance: Option<ExamInstance>,
}

impl ExamSession {
    /// 创建新的考试会话（处于加载中状态，需调用 [`ExamSession::load`]）
    pub fn new(
        ctx: SessionCtx,
        gateway: Arc<dyn SubmissionGateway>,
        clock: Arc<dyn Clock>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                ctx,
                gateway,
                clock,
                settings,
                core: Mutex::new(SessionCore::default()),
                submit_in_flight: AtomicBool::new(false),
                save_locks: Mutex::new(HashMap::new()),
                countdown: Mutex::new(None),
            }),
        }
    }

    pub fn ctx(&self) -> &SessionCtx {
        &self.inner.ctx
    }

    pub fn state(&self) -> SessionState {
        self.core().state.clone()
    }

    // ========== 加载 / 恢复 ==========

    /// 加载考试；失败后再次调用即为手动重试
    pub async fn load(&self) -> Result<(), SessionError> {
        {
            let mut core = self.core();
            match core.state {
                SessionState::Loading | SessionState::Error(_) => {
                    core.state = SessionState::Loading;
                    self.inner.submit_in_flight.store(false, Ordering::Release);
                }
                _ => return Err(invalid_state(&core.state)),
            }
        }

        info!("{} 📥 正在加载考试...", self.inner.ctx);

        let loaded = match self.fetch_instance().await {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!("{} 加载考试失败: {:?}", self.inner.ctx, err);
                self.fail(err.clone());
                return Err(err);
            }
        };

        let timed = {
            let mut core = self.core();
            core.allowed = loaded.allowed;
            core.exam = Some(loaded.exam.clone());
            match loaded.instance {
                None => {
                    core.attempt_number =
                        (loaded.completed_attempts > 0).then_some(loaded.completed_attempts);
                    core.blocked = Some("考试次数已用完".to_string());
                    core.state = SessionState::Completed;
                    Ok(false)
                }
                Some(instance) => {
                    adopt_instance(&mut core, instance, &loaded.exam, &self.inner.settings)
                }
            }
        };

        match timed {
            Ok(needs_countdown) => {
                self.log_loaded();
                if needs_countdown {
                    self.spawn_countdown();
                }
                Ok(())
            }
            Err(err) => {
                error!("{} 考试实例数据不完整: {}", self.inner.ctx, err);
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    async fn fetch_instance(&self) -> Result<Loaded, SessionError> {
        let ctx = &self.inner.ctx;
        let gateway = &self.inner.gateway;

        let (exam, summary) = tokio::try_join!(
            gateway.get_exam(&ctx.exam_id),
            gateway.get_instance_status(&ctx.exam_id, &ctx.student_id),
        )
        .map_err(|e| SessionError::from(&e))?;

        let allowed = AllowedActions::derive(&summary, exam.max_attempts);
        debug!("{} 实例概况: {:?}, 允许操作: {:?}", ctx, summary, allowed);

        if allowed.is_exhausted() {
            return Ok(Loaded {
                exam,
                allowed,
                completed_attempts: summary.completed_attempts,
                instance: None,
            });
        }

        let instance = gateway
            .generate_questions(&ctx.exam_id, &ctx.student_id)
            .await
            .map_err(|e| SessionError::from(&e))?;

        Ok(Loaded {
            exam,
            allowed,
            completed_attempts: summary.completed_attempts,
            instance: Some(instance),
        })
    }

    fn log_loaded(&self) {
        let core = self.core();
        match core.state {
            SessionState::InProgress => {
                let remaining = core
                    .deadline
                    .map(|d| d.remaining_at(self.inner.clock.now()));
                info!(
                    "{} 🔄 恢复进行中的作答: 第 {} 次, 已答 {}/{} 题, 剩余 {:?}",
                    self.inner.ctx,
                    core.attempt_number.unwrap_or(1),
                    core.answers.answered_count(),
                    core.questions.len(),
                    remaining
                );
            }
            _ => info!(
                "{} ✓ 考试已加载，状态: {}，共 {} 题",
                self.inner.ctx,
                core.state,
                core.questions.len()
            ),
        }
    }

    // ========== 开始 ==========

    /// 开始考试
    pub async fn start(&self) -> Result<(), SessionError> {
        {
            let core = self.core();
            if let Some(reason) = &core.blocked {
                return Err(SessionError::Rejected {
                    message: reason.clone(),
                });
            }
            match core.state {
                SessionState::NotStarted => {}
                SessionState::InProgress => return Ok(()),
                _ => return Err(invalid_state(&core.state)),
            }
        }

        let ctx = &self.inner.ctx;
        info!("{} ▶️ 开始考试", ctx);

        match self
            .inner
            .gateway
            .start_exam(&ctx.exam_id, &ctx.student_id)
            .await
        {
            Ok(instance) => {
                let timed = {
                    let mut core = self.core();
                    if core.state != SessionState::NotStarted {
                        debug!("{} 开始请求返回时状态已变为 {}，忽略", ctx, core.state);
                        return Ok(());
                    }
                    let exam = core.exam.clone().unwrap_or_else(|| ExamDefinition {
                        id: ctx.exam_id.clone(),
                        title: String::new(),
                        duration_minutes: None,
                        schedule_end_time: None,
                        max_attempts: None,
                    });
                    let started = merge_started(&core, ctx, instance);
                    let timed = adopt_instance(&mut core, started, &exam, &self.inner.settings);
                    if timed.is_ok() {
                        core.allowed.can_start = false;
                        core.allowed.can_resume = true;
                        core.last_error = None;
                    }
                    timed
                };

                match timed {
                    Ok(needs_countdown) => {
                        let deadline = self.core().deadline;
                        if let Some(deadline) = deadline {
                            info!(
                                "{} ⏱️ 截止时间 {} ({:?})",
                                ctx,
                                deadline.at(),
                                deadline.source()
                            );
                        }
                        if needs_countdown {
                            self.spawn_countdown();
                        }
                        Ok(())
                    }
                    Err(err) => {
                        error!("{} 开始考试返回的数据不完整: {}", ctx, err);
                        self.fail(err.clone());
                        Err(err)
                    }
                }
            }
            Err(api_err) => {
                let err = SessionError::from(&api_err);
                warn!("{} 开始考试失败: {}", ctx, api_err);
                match &err {
                    SessionError::Unauthorized => self.fail(err.clone()),
                    SessionError::Rejected { message } => {
                        let mut core = self.core();
                        core.blocked = Some(message.clone());
                        core.allowed.can_start = false;
                        core.last_error = Some(err.clone());
                    }
                    _ => self.core().last_error = Some(err.clone()),
                }
                Err(err)
            }
        }
    }

    // ========== 作答 ==========

    /// 作答一道题
    ///
    /// 本地立即生效；保存失败时回滚到上次服务端确认的答案并返回错误，不自动重试。
    /// 同一道题的保存串行执行，发送前已被更新编辑取代的旧值不会发送。
    pub async fn answer(
        &self,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<AnswerOutcome, SessionError> {
        let now = self.inner.clock.now();
        let (record, version) = {
            let mut core = self.core();
            if core.state != SessionState::InProgress {
                return Err(invalid_state(&core.state));
            }
            if core.deadline.map(|d| d.is_expired_at(now)).unwrap_or(false) {
                return Err(SessionError::Rejected {
                    message: "考试时间已到，不再接受作答".to_string(),
                });
            }
            let question = core
                .questions
                .iter()
                .find(|q| q.id == question_id)
                .ok_or_else(|| SessionError::UnknownQuestion {
                    question_id: question_id.to_string(),
                })?;
            if !question.accepts(&value) {
                return Err(SessionError::InvalidAnswer {
                    question_id: question_id.to_string(),
                });
            }
            let record = AnswerRecord::new(question_id, value, now);
            let version = core.answers.apply_local(record.clone());
            (record, version)
        };

        let lock = self.save_lock(question_id);
        let _guard = lock.lock().await;

        if !self.core().answers.is_latest(question_id, version) {
            debug!("{} 第 {} 题已有更新的编辑，跳过旧值", self.inner.ctx, question_id);
            return Ok(AnswerOutcome::Superseded);
        }

        let ctx = &self.inner.ctx;
        let result = self
            .inner
            .gateway
            .submit_answer(&ctx.exam_id, &ctx.student_id, question_id, &record.answer)
            .await;

        match result {
            Ok(()) => {
                self.core().answers.confirm(&record, version);
                debug!("{} ✓ 第 {} 题已保存: {}", ctx, question_id, record.answer);
                Ok(AnswerOutcome::Saved)
            }
            Err(api_err) => {
                let err = SessionError::from(&api_err);
                warn!("{} ⚠️ 第 {} 题保存失败: {}", ctx, question_id, api_err);
                let rolled_back = self
                    .core()
                    .answers
                    .reject(question_id, version, err.to_string());
                if rolled_back {
                    info!("{} ↩️ 第 {} 题已回滚到上次保存的答案", ctx, question_id);
                }
                if err == SessionError::Unauthorized {
                    self.fail(err.clone());
                }
                Err(err)
            }
        }
    }

    fn save_lock(&self, question_id: &str) -> Arc<AsyncMutex<()>> {
        self.inner
            .save_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(question_id.to_string())
            .or_default()
            .clone()
    }

    /// 等待已受理的保存完成，避免交卷时服务端缺少答案
    async fn flush_pending_saves(&self) {
        let locks: Vec<Arc<AsyncMutex<()>>> = self
            .inner
            .save_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        if locks.is_empty() {
            return;
        }

        let flush = join_all(locks.iter().map(|lock| async move {
            drop(lock.lock().await);
        }));

        if tokio::time::timeout(self.inner.settings.submit_flush_timeout, flush)
            .await
            .is_err()
        {
            warn!(
                "{} ⚠️ 等待答案保存超过 {:?}，继续交卷",
                self.inner.ctx, self.inner.settings.submit_flush_timeout
            );
        }
    }

    // ========== 交卷 ==========

    /// 手动交卷
    pub async fn submit(&self) -> Result<SubmitOutcome, SessionError> {
        self.submit_with(SubmitTrigger::Manual).await
    }

    async fn submit_with(&self, trigger: SubmitTrigger) -> Result<SubmitOutcome, SessionError> {
        {
            let mut core = self.core();
            match &core.state {
                SessionState::InProgress => {}
                SessionState::Submitting => return Ok(SubmitOutcome::Suppressed),
                SessionState::Completed => return Ok(SubmitOutcome::AlreadySubmitted),
                SessionState::Error(err) => return Err(err.clone()),
                other => return Err(invalid_state(other)),
            }
            if let Some(reason) = &core.blocked {
                return Err(SessionError::Rejected {
                    message: reason.clone(),
                });
            }
            if self
                .inner
                .submit_in_flight
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                debug!("{} 交卷已在进行中，忽略重复请求", self.inner.ctx);
                return Ok(SubmitOutcome::Suppressed);
            }
            core.state = SessionState::Submitting;
        }

        let ctx = &self.inner.ctx;
        info!("{} 📋 交卷中 ({:?})...", ctx, trigger);

        self.flush_pending_saves().await;

        let result = self
            .inner
            .gateway
            .submit_exam(&ctx.exam_id, &ctx.student_id)
            .await;

        match result {
            Ok(()) => {
                {
                    let mut core = self.core();
                    core.state = SessionState::Completed;
                    core.allowed.can_resume = false;
                    core.allowed.can_view_result = true;
                    core.last_error = None;
                }
                self.stop_countdown();
                info!("{} ✅ 交卷成功", ctx);
                Ok(SubmitOutcome::Submitted)
            }
            Err(api_err) => {
                let err = SessionError::from(&api_err);
                match trigger {
                    SubmitTrigger::Deadline => {
                        error!(
                            exam_id = %ctx.exam_id,
                            student_id = %ctx.student_id,
                            error = %api_err,
                            "❌ 自动交卷失败，本地已按交卷处理，需要通过成绩接口核对"
                        );
                        {
                            let mut core = self.core();
                            core.state = SessionState::Completed;
                            core.reconcile_required = true;
                            core.allowed.can_resume = false;
                            core.allowed.can_view_result = true;
                            core.last_error = Some(err);
                        }
                        self.stop_countdown();
                        Ok(SubmitOutcome::ForcedCompletion)
                    }
                    SubmitTrigger::Manual => {
                        warn!("{} 交卷失败: {}", ctx, api_err);
                        match &err {
                            SessionError::Network { .. } => {
                                let mut core = self.core();
                                core.state = SessionState::InProgress;
                                core.last_error = Some(err.clone());
                                self.inner.submit_in_flight.store(false, Ordering::Release);
                            }
                            SessionError::Rejected { message } => {
                                self.core().blocked = Some(message.clone());
                                self.fail(err.clone());
                            }
                            _ => self.fail(err.clone()),
                        }
                        Err(err)
                    }
                }
            }
        }
    }

    // ========== 倒计时 ==========

    /// 刷新一次剩余时间，到时触发自动交卷
    ///
    /// 由倒计时任务每拍调用；返回 `Break` 表示计时已无必要。
    pub async fn tick(&self) -> ControlFlow<()> {
        let expired = {
            let mut core = self.core();
            match core.state {
                SessionState::InProgress => {}
                SessionState::Submitting => return ControlFlow::Continue(()),
                _ => return ControlFlow::Break(()),
            }
            let Some(deadline) = core.deadline else {
                return ControlFlow::Break(());
            };
            let fresh = deadline.remaining_at(self.inner.clock.now());
            core.remaining.observe(fresh).is_zero()
        };

        if expired {
            info!("{} ⏰ 考试时间到，自动交卷", self.inner.ctx);
            match self.submit_with(SubmitTrigger::Deadline).await {
                Ok(outcome) => debug!("{} 自动交卷结果: {:?}", self.inner.ctx, outcome),
                Err(err) => warn!("{} 自动交卷未执行: {}", self.inner.ctx, err),
            }
        }

        if self.core().state.is_terminal() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// 当前剩余时间，不限时或未开始时为 `None`
    pub fn remaining(&self) -> Option<Duration> {
        let mut core = self.core();
        let deadline = core.deadline?;
        match core.state {
            SessionState::InProgress | SessionState::Submitting => {
                let fresh = deadline.remaining_at(self.inner.clock.now());
                Some(core.remaining.observe(fresh))
            }
            _ => core.remaining.last(),
        }
    }

    fn spawn_countdown(&self) {
        let weak = Arc::downgrade(&self.inner);
        let countdown = Countdown::spawn(self.inner.settings.tick_interval, move || {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(inner) => ExamSession { inner }.tick().await,
                    None => ControlFlow::Break(()),
                }
            }
        });

        if let Some(previous) = self.countdown_slot().replace(countdown) {
            previous.stop();
        }
        debug!("{} ⏱️ 倒计时已启动", self.inner.ctx);
    }

    fn stop_countdown(&self) {
        if let Some(countdown) = self.countdown_slot().take() {
            countdown.stop();
        }
    }

    /// 释放本地计时器；不会影响服务端的考试状态
    ///
    /// 自动交卷正在进行时只发出停止信号，让这一拍的交卷完成后任务再退出。
    pub fn teardown(&self) {
        let Some(countdown) = self.countdown_slot().take() else {
            return;
        };
        if self.inner.submit_in_flight.load(Ordering::Acquire) {
            countdown.stop();
            info!("{} 🧹 交卷进行中，完成后释放本地计时器", self.inner.ctx);
        } else {
            countdown.abort();
            info!("{} 🧹 已释放本地计时器", self.inner.ctx);
        }
    }

    /// 倒计时任务是否仍在运行
    pub fn has_active_countdown(&self) -> bool {
        self.countdown_slot()
            .as_ref()
            .map(|c| !c.is_finished())
            .unwrap_or(false)
    }

    // ========== 成绩 ==========

    /// 获取成绩，只能在交卷后调用
    pub async fn fetch_result(&self) -> Result<ExamResult, SessionError> {
        let attempt = {
            let core = self.core();
            if core.state != SessionState::Completed {
                return Err(invalid_state(&core.state));
            }
            core.attempt_number.unwrap_or(1)
        };

        let ctx = &self.inner.ctx;
        let result = self
            .inner
            .gateway
            .get_exam_result(&ctx.exam_id, &ctx.student_id, attempt)
            .await
            .map_err(|e| {
                warn!("{} 获取成绩失败: {}", ctx, e);
                SessionError::from(&e)
            })?;

        if !result.is_consistent() {
            warn!(
                "{} ⚠️ 成绩数据不一致: 总分 {}, 明细合计 {}, 题目数 {}, 明细条数 {}",
                ctx,
                result.score,
                result.earned_points(),
                result.total_questions,
                result.grading_details.len()
            );
        }

        {
            let mut core = self.core();
            if core.reconcile_required && result.status == InstanceStatus::Completed {
                info!("{} ✓ 服务端已确认交卷，核对完成", ctx);
                core.reconcile_required = false;
            }
            core.result = Some(result.clone());
        }

        Ok(result)
    }

    // ========== 快照 ==========

    pub fn snapshot(&self) -> SessionSnapshot {
        let remaining = self.remaining();
        let core = self.core();
        let answers = core
            .questions
            .iter()
            .map(|q| AnswerView {
                question_id: q.id.clone(),
                answer: core.answers.answer(&q.id).cloned(),
                status: core.answers.status(&q.id).cloned(),
            })
            .collect();

        SessionSnapshot {
            ctx: self.inner.ctx.clone(),
            state: core.state.clone(),
            title: core.exam.as_ref().map(|e| e.title.clone()),
            attempt_number: core.attempt_number,
            start_time: core.start_time,
            deadline: core.deadline.map(|d| d.at()),
            remaining,
            questions: core.questions.clone(),
            answers,
            allowed: core.allowed,
            blocked: core.blocked.clone(),
            reconcile_required: core.reconcile_required,
            last_error: core.last_error.clone(),
        }
    }

    // ========== 内部工具 ==========

    /// 进入错误状态并停止计时
    fn fail(&self, err: SessionError) {
        {
            let mut core = self.core();
            core.last_error = Some(err.clone());
            core.state = SessionState::Error(err);
        }
        self.stop_countdown();
    }

    fn core(&self) -> MutexGuard<'_, SessionCore> {
        self.inner.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn countdown_slot(&self) -> MutexGuard<'_, Option<Countdown>> {
        self.inner
            .countdown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// 用服务端实例覆盖本地状态
///
/// # 返回
/// 是否需要启动倒计时
fn adopt_instance(
    core: &mut SessionCore,
    instance: ExamInstance,
    exam: &ExamDefinition,
    settings: &SessionSettings,
) -> Result<bool, SessionError> {
    core.attempt_number = Some(instance.attempt_number);
    core.questions = instance.questions;
    core.answers = AnswerStore::restore(instance.answers);
    core.start_time = instance.start_time;

    match instance.status {
        InstanceStatus::NotStarted => {
            core.state = SessionState::NotStarted;
            Ok(false)
        }
        InstanceStatus::InProgress => {
            let start_time = instance
                .start_time
                .ok_or_else(|| SessionError::Inconsistent {
                    detail: "进行中的实例缺少开始时间".to_string(),
                })?;
            core.deadline = Deadline::resolve(
                start_time,
                exam.duration_minutes,
                exam.schedule_end_time,
                settings.deadline_mismatch_warn,
            );
            core.remaining = RemainingTracker::default();
            core.state = SessionState::InProgress;
            Ok(core.deadline.is_some())
        }
        InstanceStatus::Completed => {
            core.state = SessionState::Completed;
            core.allowed.can_view_result = true;
            Ok(false)
        }
    }
}

/// 开始接口只保证返回状态和开始时间，题目与已有答案沿用生成接口的结果
fn merge_started(core: &SessionCore, ctx: &SessionCtx, started: ExamInstance) -> ExamInstance {
    if !started.questions.is_empty() {
        return started;
    }
    ExamInstance {
        exam_id: ctx.exam_id.clone(),
        student_id: ctx.student_id.clone(),
        attempt_number: core.attempt_number.unwrap_or(started.attempt_number),
        status: started.status,
        start_time: started.start_time,
        questions: core.questions.clone(),
        answers: core.answers.records(),
    }
}

fn invalid_state(state: &SessionState) -> SessionError {
    SessionError::InvalidState {
        state: state.to_string(),
    }
}
