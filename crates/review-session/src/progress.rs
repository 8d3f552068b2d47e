//! Elapsed-time ticker shown while an analysis is outstanding.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const TICK: Duration = Duration::from_secs(1);

const MIB: f64 = 1024.0 * 1024.0;

/// Counts whole seconds on a background task until stopped or dropped.
#[derive(Debug)]
pub struct ProgressTicker {
    elapsed: watch::Receiver<u64>,
    estimate_secs: u64,
    task: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    /// Spawn the ticker on the current Tokio runtime. Outside a runtime the
    /// counter stays at zero.
    pub fn start(estimate_secs: u64) -> Self {
        let (tx, elapsed) = watch::channel(0_u64);
        let task = match tokio::runtime::Handle::try_current() {
            Ok(handle) => Some(handle.spawn(async move {
                let mut interval = tokio::time::interval(TICK);
                // The first tick completes immediately.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    tx.send_modify(|secs| *secs += 1);
                }
            })),
            Err(_) => {
                tracing::warn!("no runtime available, progress will not tick");
                None
            }
        };

        Self {
            elapsed,
            estimate_secs,
            task,
        }
    }

    pub fn elapsed(&self) -> u64 {
        *self.elapsed.borrow()
    }

    pub fn estimate(&self) -> u64 {
        self.estimate_secs
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.elapsed.clone()
    }

    /// Progress towards the estimate, capped at 100.
    pub fn percent(&self) -> f64 {
        if self.estimate_secs == 0 {
            return 100.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.elapsed() as f64 / self.estimate_secs as f64;
        (ratio * 100.0).min(100.0)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop ticking and return the final elapsed seconds.
    pub fn stop(&mut self) -> u64 {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.elapsed()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Expected seconds to analyse an uploaded file of `size_bytes`.
pub fn estimate_for_file(size_bytes: u64) -> u64 {
    #[allow(clippy::cast_precision_loss)]
    let secs = (size_bytes as f64 / MIB * 10.0).ceil();
    clamp_secs(secs, 15, 120)
}

/// Expected seconds to analyse pasted text of `chars` characters.
pub fn estimate_for_text(chars: usize) -> u64 {
    #[allow(clippy::cast_precision_loss)]
    let secs = (chars as f64 / 1000.0 * 5.0).ceil();
    clamp_secs(secs, 10, 90)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_secs(secs: f64, min: u64, max: u64) -> u64 {
    (secs.max(0.0) as u64).clamp(min, max)
}

/// `m:ss`
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_second() {
        let ticker = ProgressTicker::start(30);
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(ticker.elapsed(), 3);
        assert!(ticker.is_running());
        assert!((ticker.percent() - 10.0).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_counter() {
        let mut ticker = ProgressTicker::start(30);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(ticker.stop(), 2);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticker.elapsed(), 2);
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_tears_down_task() {
        let ticker = ProgressTicker::start(30);
        let mut rx = ticker.subscribe();
        drop(ticker);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(*rx.borrow_and_update(), 0);
        // The sender lives in the aborted task, so the channel is closed.
        assert!(rx.changed().await.is_err());
    }

    #[test]
    fn test_start_without_runtime_does_not_tick() {
        let mut ticker = ProgressTicker::start(30);
        assert!(!ticker.is_running());
        assert_eq!(ticker.stop(), 0);
    }

    #[test]
    fn test_file_estimate_is_clamped() {
        assert_eq!(estimate_for_file(0), 15);
        assert_eq!(estimate_for_file(3 * 1024 * 1024), 30);
        assert_eq!(estimate_for_file(50 * 1024 * 1024), 120);
    }

    #[test]
    fn test_text_estimate_is_clamped() {
        assert_eq!(estimate_for_text(100), 10);
        assert_eq!(estimate_for_text(4_100), 21);
        assert_eq!(estimate_for_text(1_000_000), 90);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(600), "10:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_percent_is_capped() {
        let ticker = ProgressTicker::start(1);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(ticker.percent(), 100.0);
    }
}
