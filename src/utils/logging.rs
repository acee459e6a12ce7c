use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::models::ExamResult;
use crate::presentation::render_result_summary;
use crate::workflow::SessionCtx;

/// 初始化 tracing
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug 或 info。
/// 重复初始化（例如测试中）会被忽略。
pub fn init(verbose: bool) {
    let default_level = if verbose {
        "exam_session=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `ctx`: 本次作答的会话上下文
pub fn init_log_file(log_file_path: &str, ctx: &SessionCtx) -> Result<()> {
    let log_header = format!(
        "{}\n考试作答日志 {} - {}\n{}\n\n",
        "=".repeat(60),
        ctx,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 考试作答客户端");
    info!("🌐 服务地址: {}", config.api_base_url);
    info!("📝 考试: {}  学生: {}", config.exam_id, config.student_id);
    info!("📄 答题卡: {}", config.answer_sheet);
    info!("{}", "=".repeat(60));
}

/// 追加写入日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `text`: 要追加的内容
pub fn append_log(log_file_path: &str, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

/// 打印成绩统计，并追加到日志文件
///
/// # 参数
/// - `result`: 服务端返回的成绩
/// - `log_file_path`: 日志文件路径
pub fn print_result_summary(result: &ExamResult, log_file_path: &str) {
    let finished_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let summary = render_result_summary(result);

    info!("\n{}", "=".repeat(60));
    info!("📊 考试成绩");
    info!("完成时间: {}", finished_at);
    info!("{}", "=".repeat(60));
    for line in summary.lines() {
        info!("{}", line);
    }
    info!("{}", "=".repeat(60));

    let entry = format!("考试成绩 - {}\n{}\n", finished_at, summary);
    match append_log(log_file_path, &entry) {
        Ok(()) => info!("\n成绩已保存至: {}", log_file_path),
        Err(e) => warn!("⚠️ 写入日志文件 {} 失败: {}", log_file_path, e),
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
