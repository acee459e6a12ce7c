//! 截止时间 - 业务能力层
//!
//! 进入作答时计算一次，本次作答内不再变化。
//! 排考结束时间优先于"开始时间 + 时长"。

use chrono::{DateTime, Duration, Utc};
use std::time::Duration as StdDuration;
use tracing::warn;

/// 截止时间来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineSource {
    /// 排考结束时间
    Schedule,
    /// 开始时间 + 考试时长
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: DateTime<Utc>,
    source: DeadlineSource,
}

impl Deadline {
    /// 计算截止时间
    ///
    /// # 参数
    /// - `start_time`: 服务端记录的开始时间
    /// - `duration_minutes`: 考试时长，0 或空视为不限时
    /// - `schedule_end`: 排考结束时间
    /// - `mismatch_warn`: 两种算法差距超过该值时输出配置告警
    ///
    /// # 返回
    /// 两者都没有时返回 `None`（不限时考试）
    pub fn resolve(
        start_time: DateTime<Utc>,
        duration_minutes: Option<u32>,
        schedule_end: Option<DateTime<Utc>>,
        mismatch_warn: Duration,
    ) -> Option<Self> {
        let duration_bound = duration_minutes
            .filter(|minutes| *minutes > 0)
            .map(|minutes| start_time + Duration::minutes(i64::from(minutes)));

        match (schedule_end, duration_bound) {
            (Some(end), Some(bound)) => {
                let gap = if end > bound { end - bound } else { bound - end };
                if gap > mismatch_warn {
                    warn!(
                        "⚠️ 排考结束时间 {} 与按时长推算的 {} 相差 {} 分钟，以排考时间为准，请检查考试配置",
                        end,
                        bound,
                        gap.num_minutes()
                    );
                }
                Some(Self {
                    at: end,
                    source: DeadlineSource::Schedule,
                })
            }
            (Some(end), None) => Some(Self {
                at: end,
                source: DeadlineSource::Schedule,
            }),
            (None, Some(bound)) => Some(Self {
                at: bound,
                source: DeadlineSource::Duration,
            }),
            (None, None) => None,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn source(&self) -> DeadlineSource {
        self.source
    }

    /// `max(0, deadline - now)`
    pub fn remaining_at(&self, now: DateTime<Utc>) -> StdDuration {
        (self.at - now).to_std().unwrap_or(StdDuration::ZERO)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.at
    }
}

/// 对外展示的剩余时间在一次作答内只减不增，时钟回拨也不会让它变大
#[derive(Debug, Clone, Copy, Default)]
pub struct RemainingTracker {
    last: Option<StdDuration>,
}

impl RemainingTracker {
    pub fn observe(&mut self, fresh: StdDuration) -> StdDuration {
        let value = match self.last {
            Some(previous) if fresh > previous => previous,
            _ => fresh,
        };
        self.last = Some(value);
        value
    }

    pub fn last(&self) -> Option<StdDuration> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_duration_fallback() {
        let deadline = Deadline::resolve(t0(), Some(10), None, Duration::minutes(10)).unwrap();
        assert_eq!(deadline.at(), t0() + Duration::minutes(10));
        assert_eq!(deadline.source(), DeadlineSource::Duration);
    }

    #[test]
    fn test_schedule_end_wins_even_when_later() {
        let end = t0() + Duration::minutes(90);
        let deadline = Deadline::resolve(t0(), Some(60), Some(end), Duration::minutes(10)).unwrap();
        assert_eq!(deadline.at(), end);
        assert_eq!(deadline.source(), DeadlineSource::Schedule);
    }

    #[test]
    fn test_untimed_exam_has_no_deadline() {
        assert!(Deadline::resolve(t0(), None, None, Duration::minutes(10)).is_none());
        assert!(Deadline::resolve(t0(), Some(0), None, Duration::minutes(10)).is_none());
    }

    #[test]
    fn test_remaining_never_negative() {
        let deadline = Deadline::resolve(t0(), Some(10), None, Duration::minutes(10)).unwrap();
        assert_eq!(
            deadline.remaining_at(t0() + Duration::minutes(4)),
            StdDuration::from_secs(360)
        );
        assert_eq!(
            deadline.remaining_at(t0() + Duration::minutes(11)),
            StdDuration::ZERO
        );
        assert!(deadline.is_expired_at(t0() + Duration::minutes(10)));
        assert!(!deadline.is_expired_at(t0() + Duration::seconds(599)));
    }

    #[test]
    fn test_tracker_ignores_clock_going_backwards() {
        let mut tracker = RemainingTracker::default();
        assert_eq!(tracker.observe(StdDuration::from_secs(300)), StdDuration::from_secs(300));
        assert_eq!(tracker.observe(StdDuration::from_secs(290)), StdDuration::from_secs(290));
        // 时钟回拨 30 秒
        assert_eq!(tracker.observe(StdDuration::from_secs(320)), StdDuration::from_secs(290));
        assert_eq!(tracker.observe(StdDuration::from_secs(280)), StdDuration::from_secs(280));
    }
}
