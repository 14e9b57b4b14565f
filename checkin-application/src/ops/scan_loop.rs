use std::sync::Arc;
use std::time::Duration;

use checkin_domain::ports::FrameSource;
use checkin_domain::{Capture, RuntimeConfig, ScanResult};
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::commands::check_in_commands;
use crate::{AppError, AppState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextCode {
    Found(String),
    Cancelled,
    TimedOut,
    SourceClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSessionEnd {
    Cancelled,
    TimedOut,
    SourceClosed,
}

/// Periodic capture over a frame source, one capture in flight at a time.
pub struct ScanLoop {
    source: Arc<dyn FrameSource>,
    interval: Duration,
    decode_timeout: Option<Duration>,
}

impl ScanLoop {
    pub fn new(source: Arc<dyn FrameSource>, interval: Duration) -> Self {
        Self {
            source,
            interval: interval.max(Duration::from_millis(1)),
            decode_timeout: None,
        }
    }

    pub fn from_config(source: Arc<dyn FrameSource>, config: &RuntimeConfig) -> Self {
        let scan_loop = Self::new(source, Duration::from_millis(config.scan_interval_ms));
        match config.scan_timeout_seconds {
            Some(seconds) => scan_loop.with_decode_timeout(Duration::from_secs(seconds)),
            None => scan_loop,
        }
    }

    pub fn with_decode_timeout(mut self, timeout: Duration) -> Self {
        self.decode_timeout = Some(timeout);
        self
    }

    /// Polls until a code is decoded, `stop` turns true, the decode timeout
    /// elapses or the source closes.
    pub async fn next_code(&self, stop: &mut watch::Receiver<bool>) -> NextCode {
        let deadline = self.decode_timeout.map(|timeout| Instant::now() + timeout);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let capture = tokio::select! {
                biased;
                _ = stopped(stop) => return NextCode::Cancelled,
                _ = expired(deadline) => return NextCode::TimedOut,
                capture = self.capture_on_tick(&mut ticker) => capture,
            };
            match capture {
                Ok(Capture::Decoded(code)) => {
                    let code = code.trim();
                    if !code.is_empty() {
                        return NextCode::Found(code.to_string());
                    }
                }
                Ok(Capture::Empty) => {}
                Ok(Capture::Closed) => return NextCode::SourceClosed,
                Err(err) => warn!("frame capture failed: {}", err),
            }
        }
    }

    async fn capture_on_tick(&self, ticker: &mut Interval) -> anyhow::Result<Capture> {
        ticker.tick().await;
        self.source.capture().await
    }
}

/// Runs scans until the loop is cancelled, times out or runs dry. Polling is
/// suspended while each decoded code goes through the decision engine.
pub async fn run_scan_session<F>(
    state: &AppState,
    scan_loop: &ScanLoop,
    mut stop: watch::Receiver<bool>,
    mut on_result: F,
) -> ScanSessionEnd
where
    F: FnMut(Result<ScanResult, AppError>),
{
    loop {
        match scan_loop.next_code(&mut stop).await {
            NextCode::Found(code) => {
                on_result(check_in_commands::scan(state, &code).await);
            }
            NextCode::Cancelled => {
                info!("scan session cancelled");
                return ScanSessionEnd::Cancelled;
            }
            NextCode::TimedOut => {
                debug!("no badge decoded before timeout");
                return ScanSessionEnd::TimedOut;
            }
            NextCode::SourceClosed => {
                info!("frame source closed");
                return ScanSessionEnd::SourceClosed;
            }
        }
    }
}

async fn stopped(stop: &mut watch::Receiver<bool>) {
    loop {
        if *stop.borrow_and_update() {
            return;
        }
        if stop.changed().await.is_err() {
            // Sender gone: no stop can arrive any more.
            std::future::pending::<()>().await;
        }
    }
}

async fn expired(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use checkin_domain::ScanOutcome;
    use tokio::sync::Mutex;

    use super::*;
    use crate::test_support::{self, MemoryStore};

    struct ScriptedSource {
        frames: Mutex<VecDeque<anyhow::Result<Capture>>>,
    }

    impl ScriptedSource {
        fn new(frames: Vec<anyhow::Result<Capture>>) -> Arc<Self> {
            Arc::new(Self {
                frames: Mutex::new(frames.into()),
            })
        }
    }

    #[async_trait]
    impl FrameSource for ScriptedSource {
        async fn capture(&self) -> anyhow::Result<Capture> {
            self.frames
                .lock()
                .await
                .pop_front()
                .unwrap_or(Ok(Capture::Empty))
        }
    }

    fn fast_loop(source: Arc<dyn FrameSource>) -> ScanLoop {
        ScanLoop::new(source, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn returns_first_decoded_code_after_empty_frames() {
        let source = ScriptedSource::new(vec![
            Ok(Capture::Empty),
            Err(anyhow::anyhow!("camera hiccup")),
            Ok(Capture::Decoded("  badge-1 \n".to_string())),
            Ok(Capture::Decoded("badge-2".to_string())),
        ]);
        let (_tx, mut stop) = watch::channel(false);
        let scan_loop = fast_loop(source);

        assert_eq!(
            scan_loop.next_code(&mut stop).await,
            NextCode::Found("badge-1".to_string())
        );
        assert_eq!(
            scan_loop.next_code(&mut stop).await,
            NextCode::Found("badge-2".to_string())
        );
    }

    #[tokio::test]
    async fn stop_signal_cancels_polling() {
        let (tx, mut stop) = watch::channel(false);
        let scan_loop = fast_loop(ScriptedSource::new(Vec::new()));
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });

        assert_eq!(scan_loop.next_code(&mut stop).await, NextCode::Cancelled);
        stopper.await.expect("stopper");
    }

    #[tokio::test]
    async fn already_stopped_returns_immediately() {
        let (_tx, mut stop) = watch::channel(true);
        let source = ScriptedSource::new(vec![Ok(Capture::Decoded("badge".to_string()))]);
        assert_eq!(fast_loop(source).next_code(&mut stop).await, NextCode::Cancelled);
    }

    #[tokio::test]
    async fn decode_timeout_ends_polling() {
        let (_tx, mut stop) = watch::channel(false);
        let scan_loop = fast_loop(ScriptedSource::new(Vec::new()))
            .with_decode_timeout(Duration::from_millis(20));
        assert_eq!(scan_loop.next_code(&mut stop).await, NextCode::TimedOut);
    }

    #[tokio::test]
    async fn closed_source_is_reported() {
        let (tx, mut stop) = watch::channel(false);
        drop(tx);
        let source = ScriptedSource::new(vec![Ok(Capture::Empty), Ok(Capture::Closed)]);
        assert_eq!(fast_loop(source).next_code(&mut stop).await, NextCode::SourceClosed);
    }

    /// Counts captures taken while a check-in is still being written.
    struct WatchedSource {
        inner: Arc<ScriptedSource>,
        store: Arc<MemoryStore>,
        overlapping: AtomicUsize,
    }

    #[async_trait]
    impl FrameSource for WatchedSource {
        async fn capture(&self) -> anyhow::Result<Capture> {
            if self.store.is_writing() {
                self.overlapping.fetch_add(1, Ordering::SeqCst);
            }
            self.inner.capture().await
        }
    }

    async fn scanning_state() -> (AppState, Arc<MemoryStore>, String) {
        let store = MemoryStore::new();
        let event = test_support::event("evt-1");
        let ana = test_support::badge_holder(&event, "Ana", "Lee", "ana@x.com");
        store.add_event(&event);
        store.add_participant(&ana);
        let state = test_support::state(store.clone());
        test_support::select(&state, &event).await;
        (state, store, ana.qr_code_data)
    }

    #[tokio::test]
    async fn session_forwards_every_decoded_badge_until_source_closes() {
        let (state, store, badge) = scanning_state().await;
        let source = Arc::new(WatchedSource {
            inner: ScriptedSource::new(vec![
                Ok(Capture::Decoded(badge.clone())),
                Ok(Capture::Empty),
                Ok(Capture::Decoded(badge)),
                Ok(Capture::Decoded("not a badge".to_string())),
                Ok(Capture::Closed),
            ]),
            store: store.clone(),
            overlapping: AtomicUsize::new(0),
        });
        let (_tx, stop) = watch::channel(false);
        let mut outcomes = Vec::new();

        let end = run_scan_session(&state, &fast_loop(source.clone()), stop, |result| {
            outcomes.push(result.expect("scan").status)
        })
        .await;

        assert_eq!(end, ScanSessionEnd::SourceClosed);
        assert_eq!(
            outcomes,
            [
                ScanOutcome::FirstEntry,
                ScanOutcome::RepeatEntry,
                ScanOutcome::Invalid
            ]
        );
        assert_eq!(store.check_in_count(), 2);
        assert_eq!(source.overlapping.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn session_without_selected_event_reports_each_scan_error() {
        let store = MemoryStore::new();
        let state = test_support::state(store);
        let source = ScriptedSource::new(vec![
            Ok(Capture::Decoded("badge".to_string())),
            Ok(Capture::Closed),
        ]);
        let (_tx, stop) = watch::channel(false);
        let mut errors = 0;

        let end = run_scan_session(&state, &fast_loop(source), stop, |result| {
            assert!(matches!(result, Err(AppError::BadRequest(_))));
            errors += 1;
        })
        .await;

        assert_eq!(end, ScanSessionEnd::SourceClosed);
        assert_eq!(errors, 1);
    }

    #[tokio::test]
    async fn session_ends_on_stop_and_on_decode_timeout() {
        let (state, _store, _badge) = scanning_state().await;

        let (tx, stop) = watch::channel(false);
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        });
        let end = run_scan_session(
            &state,
            &fast_loop(ScriptedSource::new(Vec::new())),
            stop,
            |_| panic!("nothing was decoded"),
        )
        .await;
        assert_eq!(end, ScanSessionEnd::Cancelled);
        stopper.await.expect("stopper");

        let (_tx, stop) = watch::channel(false);
        let scan_loop = fast_loop(ScriptedSource::new(Vec::new()))
            .with_decode_timeout(Duration::from_millis(20));
        let end = run_scan_session(&state, &scan_loop, stop, |_| panic!("nothing was decoded")).await;
        assert_eq!(end, ScanSessionEnd::TimedOut);
    }
}
