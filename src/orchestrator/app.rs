//! 命令行驱动 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：日志文件、恢复登录状态、创建 HTTP 网关和考试会话
//! 2. **加载/恢复**：进行中的作答会被恢复，而不是重新开始
//! 3. **批量作答**：读取答题卡，并发提交各题答案
//! 4. **交卷**：立即交卷，或等待到时自动交卷
//! 5. **成绩**：交卷后获取并打印成绩

use crate::clients::HttpGateway;
use crate::config::Config;
use crate::infrastructure::{HttpExecutor, SystemClock, TokenStore};
use crate::models::{load_answer_sheet, AnswerValue};
use crate::presentation::{render_question, render_status_line};
use crate::state::AuthState;
use crate::utils::logging::{init_log_file, log_startup, print_result_summary};
use crate::workflow::{
    AnswerOutcome, ExamSession, SessionCtx, SessionSettings, SessionState, SubmitOutcome,
};
use anyhow::{anyhow, Result};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    auth: Arc<AuthState>,
    session: ExamSession,
}

/// 答题卡提交统计
#[derive(Debug, Default)]
struct SheetStats {
    saved: usize,
    superseded: usize,
    failed: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let ctx = SessionCtx::new(&config.exam_id, &config.student_id);

        // 初始化日志文件
        init_log_file(&config.output_log_file, &ctx)?;

        log_startup(&config);

        let auth = Arc::new(AuthState::restore(TokenStore::new(&config.token_file)).await?);
        match &config.access_token {
            Some(token) => auth.sign_in(token.clone(), config.student_id.clone()).await?,
            None => auth.set_current_user(config.student_id.clone()),
        }
        if !auth.is_authenticated() {
            warn!("⚠️ 未找到访问令牌，请求将以匿名身份发送");
        }

        let executor =
            HttpExecutor::new(&config.api_base_url, config.request_timeout(), auth.clone())?;
        let gateway = Arc::new(HttpGateway::new(executor));

        let session = ExamSession::new(
            ctx,
            gateway,
            Arc::new(SystemClock),
            SessionSettings::from(&config),
        );

        Ok(Self {
            config,
            auth,
            session,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let outcome = self.drive().await;
        self.session.teardown();

        if let Some(reason) = self.auth.logout_reason() {
            error!("🔒 已强制登出: {}", reason);
        }
        outcome
    }

    async fn drive(&self) -> Result<()> {
        self.session.load().await?;

        if self.session.state() == SessionState::NotStarted {
            let snapshot = self.session.snapshot();
            if !snapshot.allowed.can_start {
                warn!("⚠️ 当前不允许开始考试");
                return Ok(());
            }
            self.session.start().await?;
        }

        if self.session.state() == SessionState::InProgress {
            self.print_questions();
            let stats = self.apply_answer_sheet().await?;
            info!(
                "📝 答题卡提交完成: 保存 {} 题, 被覆盖 {} 题, 失败 {} 题",
                stats.saved, stats.superseded, stats.failed
            );
            self.print_questions();
            self.finish_attempt().await?;
        }

        self.show_result().await
    }

    fn print_questions(&self) {
        let snapshot = self.session.snapshot();
        info!("{}", render_status_line(&snapshot));
        for (index, question) in snapshot.questions.iter().enumerate() {
            let rendered = render_question(index, question, snapshot.answers.get(index));
            for line in rendered.lines() {
                info!("{}", line);
            }
        }
    }

    /// 读取答题卡并并发提交
    async fn apply_answer_sheet(&self) -> Result<SheetStats> {
        let path = Path::new(&self.config.answer_sheet);
        if !path.exists() {
            warn!("⚠️ 答题卡 {} 不存在，跳过作答", path.display());
            return Ok(SheetStats::default());
        }

        let sheet = load_answer_sheet(path).await?;
        if let Some(exam_id) = sheet.exam_id.as_deref() {
            if exam_id != self.config.exam_id {
                return Err(anyhow!(
                    "答题卡属于考试 {}，当前考试为 {}",
                    exam_id,
                    self.config.exam_id
                ));
            }
        }

        let entries = sheet.entries();
        info!("📄 答题卡共 {} 条作答", entries.len());

        let results = join_all(
            entries
                .into_iter()
                .map(|(question_id, value)| self.answer_one(question_id, value)),
        )
        .await;

        let mut stats = SheetStats::default();
        for outcome in results {
            match outcome {
                Some(AnswerOutcome::Saved) => stats.saved += 1,
                Some(AnswerOutcome::Superseded) => stats.superseded += 1,
                None => stats.failed += 1,
            }
        }
        Ok(stats)
    }

    async fn answer_one(&self, question_id: String, value: AnswerValue) -> Option<AnswerOutcome> {
        match self.session.answer(&question_id, value).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("⚠️ 第 {} 题作答失败: {}", question_id, e);
                None
            }
        }
    }

    /// 立即交卷，或等待倒计时到点自动交卷
    async fn finish_attempt(&self) -> Result<()> {
        let timed = self.session.snapshot().deadline.is_some();

        if self.config.submit_after_answering || !timed {
            if !timed && !self.config.submit_after_answering {
                info!("💡 考试不限时，答题卡提交后直接交卷");
            }
            match self.session.submit().await? {
                SubmitOutcome::Submitted | SubmitOutcome::AlreadySubmitted => {}
                other => info!("交卷结果: {:?}", other),
            }
            return Ok(());
        }

        info!("⏳ 等待到时自动交卷（Ctrl+C 退出，不影响服务端考试状态）");
        let mut ticker = tokio::time::interval(Duration::from_secs(30));
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    warn!("🛑 收到退出信号，本地停止计时，考试仍在服务端进行");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    let snapshot = self.session.snapshot();
                    info!("{}", render_status_line(&snapshot));
                    if snapshot.state.is_terminal() {
                        break;
                    }
                }
            }
        }

        if let SessionState::Error(err) = self.session.state() {
            return Err(err.into());
        }
        Ok(())
    }

    async fn show_result(&self) -> Result<()> {
        let snapshot = self.session.snapshot();
        if snapshot.state != SessionState::Completed {
            return Ok(());
        }
        if let Some(reason) = &snapshot.blocked {
            info!("ℹ️ {}", reason);
        }
        if !snapshot.allowed.can_view_result && snapshot.attempt_number.is_none() {
            return Ok(());
        }

        match self.session.fetch_result().await {
            Ok(result) => {
                print_result_summary(&result, &self.config.output_log_file);
                if self.session.snapshot().reconcile_required {
                    warn!("⚠️ 服务端尚未确认交卷，请联系监考老师核对");
                }
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ 暂时无法获取成绩: {}", e);
                Ok(())
            }
        }
    }
}
