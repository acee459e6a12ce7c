//! 终端渲染
//!
//! 题型只在 [`render_question`] 里分派一次，任何渲染都不会输出正确性信息。

use std::fmt::Write;
use std::time::Duration;

use crate::models::{AnswerValue, ExamResult, Question, QuestionKind};
use crate::services::SyncStatus;
use crate::workflow::{AnswerView, SessionSnapshot};

/// 渲染一道题
///
/// # 参数
/// - `index`: 题号（从 0 开始）
/// - `question`: 题目
/// - `view`: 当前作答情况，未作答时为 `None`
pub fn render_question(index: usize, question: &Question, view: Option<&AnswerView>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}. {} ({}分)",
        index + 1,
        question.content.trim(),
        format_points(question.points)
    );

    let answer = view.and_then(|v| v.answer.as_ref());
    match &question.kind {
        QuestionKind::MultipleChoice { options } => {
            for (i, option) in options.iter().enumerate() {
                let selected = matches!(answer, Some(AnswerValue::Choice(c)) if *c == i);
                let _ = writeln!(
                    out,
                    "   {} {}. {}",
                    if selected { "●" } else { "○" },
                    AnswerValue::Choice(i),
                    option.text
                );
            }
        }
        QuestionKind::FillInBlank => {
            let text = match answer {
                Some(AnswerValue::Text(text)) if !text.is_empty() => text.as_str(),
                _ => "________",
            };
            let _ = writeln!(out, "   答: {}", text);
        }
    }

    match view.and_then(|v| v.status.as_ref()) {
        Some(SyncStatus::Saving) => out.push_str("   (保存中...)\n"),
        Some(SyncStatus::Failed { reason }) => {
            let _ = writeln!(out, "   ⚠️ 保存失败: {}，请重新作答", reason);
        }
        _ => {}
    }

    out
}

/// 剩余时间格式化为 `MM:SS`，超过一小时时分钟数继续累加
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// 会话状态栏：状态、进度、剩余时间
pub fn render_status_line(snapshot: &SessionSnapshot) -> String {
    let mut line = format!(
        "{} {} | 已答 {}/{}",
        snapshot.ctx,
        snapshot.state,
        snapshot.answered_count(),
        snapshot.questions.len()
    );
    match snapshot.remaining {
        Some(remaining) => {
            let _ = write!(line, " | 剩余 {}", format_remaining(remaining));
        }
        None if snapshot.deadline.is_none() && snapshot.start_time.is_some() => {
            line.push_str(" | 不限时");
        }
        None => {}
    }
    if let Some(reason) = &snapshot.blocked {
        let _ = write!(line, " | {}", reason);
    }
    if snapshot.reconcile_required {
        line.push_str(" | 交卷待核对");
    }
    line
}

/// 成绩摘要
pub fn render_result_summary(result: &ExamResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "总分: {} / {}",
        format_points(result.score),
        format_points(result.max_points())
    );
    let _ = writeln!(
        out,
        "答对: {}/{}",
        result.correct_answers, result.total_questions
    );

    for (i, detail) in result.grading_details.iter().enumerate() {
        let answer = result
            .answer_for(&detail.question_id)
            .map(|a| a.answer.to_string())
            .unwrap_or_else(|| "未作答".to_string());
        let _ = write!(
            out,
            "{}. {} {} 得分 {}/{} 作答: {}",
            i + 1,
            if detail.is_correct { "✓" } else { "✗" },
            detail.question_id,
            format_points(detail.points_earned),
            format_points(detail.max_points),
            answer
        );
        if let Some(similarity) = detail.similarity {
            let _ = write!(out, " 相似度 {:.0}%", similarity * 100.0);
        }
        out.push('\n');
        if let Some(feedback) = detail.feedback.as_deref().filter(|f| !f.is_empty()) {
            let _ = writeln!(out, "   反馈: {}", feedback);
        }
    }

    if !result.is_consistent() {
        out.push_str("⚠️ 成绩数据不一致，请联系老师核对\n");
    }
    out
}

fn format_points(points: f64) -> String {
    if points.fract().abs() < 1e-9 {
        format!("{}", points as i64)
    } else {
        format!("{:.1}", points)
    }
}
