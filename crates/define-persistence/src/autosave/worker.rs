//! Background auto-save worker.
//!
//! The editor publishes a fresh [`SessionSnapshot`] after each dispatch.
//! The worker keeps only the latest one (a `watch` channel), checks on
//! every interval tick whether the debounce has elapsed and hands the
//! snapshot to the sink on a blocking thread. Dispatch never waits for a
//! save, and a save in flight is not cancelled by later dispatches.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{AutoSaveConfig, DirtyTracker};
use crate::error::{PersistenceError, Result};
use crate::gateway::SnapshotSink;
use crate::snapshot::SessionSnapshot;

/// Counters reported when the worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutosaveStats {
    pub saved: usize,
    /// Snapshots identical to the last saved one.
    pub skipped: usize,
    pub failed: usize,
}

/// Owner side of a running auto-save worker.
#[derive(Debug)]
pub struct AutosaveHandle {
    snapshots: watch::Sender<Option<SessionSnapshot>>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<Result<AutosaveStats>>,
}

impl AutosaveHandle {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(sink: impl SnapshotSink, config: AutoSaveConfig) -> Self {
        let (snapshots, snapshot_rx) = watch::channel(None);
        let (shutdown, shutdown_rx) = watch::channel(false);
        let worker = Worker {
            sink: Arc::new(sink),
            config,
            snapshots: snapshot_rx,
            shutdown: shutdown_rx,
            tracker: DirtyTracker::new(),
            last_saved: None,
            stats: AutosaveStats::default(),
        };
        Self {
            snapshots,
            shutdown,
            task: tokio::spawn(worker.run()),
        }
    }

    /// Replace the pending snapshot.
    pub fn publish(&self, snapshot: SessionSnapshot) {
        self.snapshots.send_replace(Some(snapshot));
    }

    /// Stop the worker after a final save of the latest snapshot.
    pub async fn shutdown(self) -> Result<AutosaveStats> {
        self.shutdown.send_replace(true);
        self.task
            .await
            .map_err(|e| PersistenceError::TaskFailed {
                operation: "autosave",
                source: e,
            })?
    }
}

struct Worker {
    sink: Arc<dyn SnapshotSink>,
    config: AutoSaveConfig,
    snapshots: watch::Receiver<Option<SessionSnapshot>>,
    shutdown: watch::Receiver<bool>,
    tracker: DirtyTracker,
    last_saved: Option<SessionSnapshot>,
    stats: AutosaveStats,
}

impl Worker {
    async fn run(mut self) -> Result<AutosaveStats> {
        let mut ticker = tokio::time::interval(self.config.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = self.snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.tracker.mark_dirty(Instant::now());
                }
                _ = ticker.tick() => {
                    if !self.tracker.should_auto_save(&self.config, Instant::now()) {
                        continue;
                    }
                    if let Err(err) = self.save_latest().await {
                        warn!(error = %err, "auto-save failed");
                    }
                }
                _ = self.shutdown.changed() => break,
            }
        }

        debug!("auto-save worker stopping");
        self.save_latest().await?;
        info!(
            saved = self.stats.saved,
            skipped = self.stats.skipped,
            failed = self.stats.failed,
            "auto-save worker stopped"
        );
        Ok(self.stats)
    }

    /// Save the latest published snapshot unless it matches the last one
    /// saved.
    async fn save_latest(&mut self) -> Result<()> {
        let started = Instant::now();
        let Some(snapshot) = self.snapshots.borrow_and_update().clone() else {
            return Ok(());
        };
        if self
            .last_saved
            .as_ref()
            .is_some_and(|saved| saved.same_state(&snapshot))
        {
            self.stats.skipped += 1;
            self.tracker.save_complete(started);
            return Ok(());
        }

        self.tracker.start_save();
        let sink = Arc::clone(&self.sink);
        let pending = snapshot.clone();
        let result = tokio::task::spawn_blocking(move || sink.save(&pending))
            .await
            .map_err(|e| PersistenceError::TaskFailed {
                operation: "save",
                source: e,
            })
            .and_then(|saved| saved);

        match result {
            Ok(()) => {
                self.stats.saved += 1;
                self.tracker.save_complete(started);
                self.last_saved = Some(snapshot);
                Ok(())
            }
            Err(err) => {
                self.stats.failed += 1;
                self.tracker.save_failed();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use define_model::{Document, Oid};
    use define_store::{Action, EditorContext, StoreConfig, Tab, ViewAction};

    #[derive(Default)]
    struct MemorySink {
        saved: Mutex<Vec<SessionSnapshot>>,
    }

    impl SnapshotSink for Arc<MemorySink> {
        fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
            self.saved.lock().unwrap().push(snapshot.clone());
            Ok(())
        }
    }

    fn context() -> EditorContext {
        let document = Document::new(
            Oid::new("ST.TEST").unwrap(),
            Oid::new("MDV.TEST").unwrap(),
            "TEST",
        );
        EditorContext::open(document, StoreConfig::default()).unwrap()
    }

    fn quick() -> AutoSaveConfig {
        AutoSaveConfig {
            interval_secs: 1,
            debounce_ms: 0,
            ..AutoSaveConfig::default()
        }
    }

    #[tokio::test]
    async fn shutdown_saves_latest_snapshot() {
        let sink = Arc::new(MemorySink::default());
        let handle = AutosaveHandle::spawn(Arc::clone(&sink), AutoSaveConfig::default());

        let mut ctx = context();
        handle.publish(SessionSnapshot::project(&ctx).unwrap());
        ctx.dispatch(Action::View(ViewAction::SelectTab { tab: Tab::Comments }))
            .unwrap();
        handle.publish(SessionSnapshot::project(&ctx).unwrap());

        let stats = handle.shutdown().await.unwrap();
        assert_eq!(stats.saved, 1);
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].view.tab, Tab::Comments);
    }

    #[tokio::test]
    async fn nothing_published_saves_nothing() {
        let sink = Arc::new(MemorySink::default());
        let handle = AutosaveHandle::spawn(Arc::clone(&sink), quick());
        let stats = handle.shutdown().await.unwrap();
        assert_eq!(stats, AutosaveStats::default());
        assert!(sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn interval_save_then_unchanged_snapshot_is_skipped() {
        let sink = Arc::new(MemorySink::default());
        let handle = AutosaveHandle::spawn(Arc::clone(&sink), quick());

        let ctx = context();
        handle.publish(SessionSnapshot::project(&ctx).unwrap());
        tokio::time::sleep(Duration::from_millis(1300)).await;
        assert_eq!(sink.saved.lock().unwrap().len(), 1);

        // Same state, new timestamp.
        handle.publish(SessionSnapshot::project(&ctx).unwrap());
        let stats = handle.shutdown().await.unwrap();
        assert_eq!(stats.saved, 1);
        assert_eq!(stats.skipped, 1);
    }
}
