//! At most one outstanding analysis per session.

use crate::error::SessionError;
use crate::progress::ProgressTicker;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The session's "analyzing" flag.
#[derive(Debug, Clone, Default)]
pub struct AnalysisGate {
    in_flight: Arc<AtomicBool>,
}

impl AnalysisGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Raise the flag and start the progress ticker.
    ///
    /// Fails with [`SessionError::AnalysisInFlight`] if a run is outstanding.
    pub fn begin(&self, estimate_secs: u64) -> Result<AnalysisRun, SessionError> {
        // Ticker first, so a raised flag always belongs to a run.
        let ticker = ProgressTicker::start(estimate_secs);
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("analysis requested while another is in flight");
            return Err(SessionError::AnalysisInFlight);
        }
        tracing::info!(estimate_secs, "analysis started");
        Ok(AnalysisRun {
            in_flight: Arc::clone(&self.in_flight),
            ticker,
        })
    }

    /// Run `request` as the session's analysis, settling the run whatever the outcome.
    pub async fn track<F, T>(&self, estimate_secs: u64, request: F) -> Result<T, SessionError>
    where
        F: Future<Output = T>,
    {
        let run = self.begin(estimate_secs)?;
        let output = request.await;
        run.finish();
        Ok(output)
    }
}

/// An outstanding analysis. Dropping it (or calling [`finish`](Self::finish))
/// lowers the flag and tears down the ticker.
#[derive(Debug)]
pub struct AnalysisRun {
    in_flight: Arc<AtomicBool>,
    ticker: ProgressTicker,
}

impl AnalysisRun {
    pub fn ticker(&self) -> &ProgressTicker {
        &self.ticker
    }

    /// Settle the run, returning the elapsed seconds.
    pub fn finish(mut self) -> u64 {
        let elapsed = self.ticker.stop();
        tracing::info!(elapsed_secs = elapsed, "analysis settled");
        elapsed
    }
}

impl Drop for AnalysisRun {
    fn drop(&mut self) {
        self.ticker.stop();
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_begin_is_rejected() {
        let gate = AnalysisGate::new();
        let run = gate.begin(10).unwrap();
        assert!(gate.is_analyzing());
        assert_eq!(gate.begin(10).unwrap_err(), SessionError::AnalysisInFlight);

        run.finish();
        assert!(!gate.is_analyzing());
        assert!(gate.begin(10).is_ok());
    }

    #[tokio::test]
    async fn test_dropping_run_lowers_flag() {
        let gate = AnalysisGate::new();
        {
            let _run = gate.begin(10).unwrap();
            assert!(gate.is_analyzing());
        }
        assert!(!gate.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_track_settles_after_request() {
        let gate = AnalysisGate::new();
        let probe = gate.clone();
        let output = gate
            .track(15, async move {
                tokio::time::sleep(Duration::from_secs(2)).await;
                probe.is_analyzing()
            })
            .await
            .unwrap();
        assert!(output);
        assert!(!gate.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_request_still_settles() {
        let gate = AnalysisGate::new();
        let result: Result<Result<(), &str>, _> = gate.track(15, async { Err("boom") }).await;
        assert_eq!(result.unwrap(), Err("boom"));
        assert!(!gate.is_analyzing());
    }

    #[test]
    fn test_begin_without_runtime_settles() {
        let gate = AnalysisGate::new();
        let run = gate.begin(10).unwrap();
        assert!(gate.is_analyzing());
        assert!(!run.ticker().is_running());
        assert_eq!(run.finish(), 0);
        assert!(!gate.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_exposes_ticker() {
        let gate = AnalysisGate::new();
        let run = gate.begin(20).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(run.ticker().elapsed(), 1);
        assert_eq!(run.finish(), 1);
    }
}
