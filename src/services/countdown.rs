//! 倒计时任务
//!
//! 显式的、可取消的定时任务，由会话持有，不绑定任何界面生命周期。

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// 倒计时任务句柄
///
/// - `stop()` 发出停止信号，当前这一拍执行完后退出
/// - `abort()` 立即终止任务
/// - 句柄被丢弃时信号通道关闭，任务同样退出
#[derive(Debug)]
pub struct Countdown {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// 启动倒计时，第一拍立即触发
    ///
    /// `on_tick` 返回 `ControlFlow::Break` 时任务结束。
    pub fn spawn<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                if *shutdown_rx.borrow() {
                    break;
                }

                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if on_tick().await.is_break() {
                            break;
                        }
                    }
                }
            }

            debug!("⏹️ 倒计时任务结束");
        });

        Self { shutdown, handle }
    }

    pub fn stop(&self) {
        // 任务已退出时接收端已关闭，忽略即可
        let _ = self.shutdown.send(true);
    }

    pub fn abort(self) {
        self.stop();
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(period: Duration, limit: usize) -> (Countdown, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let countdown = Countdown::spawn(period, move || {
            let counter = counter.clone();
            async move {
                let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if seen >= limit {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        });
        (countdown, ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn test_break_ends_task() {
        let (countdown, ticks) = counting(Duration::from_secs(1), 3);

        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(countdown.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_prevents_further_ticks() {
        let (countdown, ticks) = counting(Duration::from_secs(1), usize::MAX);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let before = ticks.load(Ordering::SeqCst);
        assert_eq!(before, 3);

        countdown.stop();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), before);
        assert!(countdown.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_ends_task() {
        let (countdown, ticks) = counting(Duration::from_secs(1), usize::MAX);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(countdown);

        let before = ticks.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), before);
    }
}
