//! Dirty state tracking for auto-save.

use std::time::Instant;

use super::AutoSaveConfig;

/// Tracks unsaved changes in a session.
///
/// Times are passed in by the caller so the worker can use one clock for
/// every decision in a tick.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    /// When the most recent change was made.
    last_change: Option<Instant>,

    /// When the first unsaved change was made. Reset when saved.
    first_unsaved_change: Option<Instant>,

    saving: bool,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.first_unsaved_change.is_some()
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn mark_dirty(&mut self, now: Instant) {
        self.last_change = Some(now);
        self.first_unsaved_change.get_or_insert(now);
    }

    pub fn start_save(&mut self) {
        self.saving = true;
    }

    /// Changes made after `started` remain unsaved.
    pub fn save_complete(&mut self, started: Instant) {
        self.saving = false;
        if self.last_change.is_none_or(|t| t <= started) {
            self.first_unsaved_change = None;
        }
    }

    /// A failed save leaves the session dirty.
    pub fn save_failed(&mut self) {
        self.saving = false;
    }

    fn ms_between(earlier: Option<Instant>, now: Instant) -> Option<u64> {
        earlier.map(|t| {
            u64::try_from(now.saturating_duration_since(t).as_millis()).unwrap_or(u64::MAX)
        })
    }

    pub fn should_auto_save(&self, config: &AutoSaveConfig, now: Instant) -> bool {
        if !self.is_dirty() || self.saving {
            return false;
        }
        match (
            Self::ms_between(self.last_change, now),
            Self::ms_between(self.first_unsaved_change, now),
        ) {
            (Some(since_last), Some(since_first)) => config.should_save(since_last, since_first),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> AutoSaveConfig {
        AutoSaveConfig {
            debounce_ms: 50,
            max_delay_ms: 500,
            ..AutoSaveConfig::default()
        }
    }

    #[test]
    fn new_tracker_is_clean() {
        let tracker = DirtyTracker::new();
        assert!(!tracker.is_dirty());
        assert!(!tracker.should_auto_save(&config(), Instant::now()));
    }

    #[test]
    fn waits_for_debounce() {
        let t0 = Instant::now();
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty(t0);

        assert!(!tracker.should_auto_save(&config(), t0 + Duration::from_millis(10)));
        assert!(tracker.should_auto_save(&config(), t0 + Duration::from_millis(60)));

        tracker.start_save();
        assert!(!tracker.should_auto_save(&config(), t0 + Duration::from_millis(60)));
    }

    #[test]
    fn continuous_changes_force_a_save() {
        let t0 = Instant::now();
        let mut tracker = DirtyTracker::new();
        for step in 0..=12 {
            tracker.mark_dirty(t0 + Duration::from_millis(step * 40));
        }
        let now = t0 + Duration::from_millis(490);
        assert!(!tracker.should_auto_save(&config(), now));
        assert!(tracker.should_auto_save(&config(), now + Duration::from_millis(20)));
    }

    #[test]
    fn change_during_save_stays_dirty() {
        let t0 = Instant::now();
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty(t0);
        let started = t0 + Duration::from_millis(100);
        tracker.start_save();
        tracker.mark_dirty(started + Duration::from_millis(5));
        tracker.save_complete(started);
        assert!(tracker.is_dirty());
        assert!(!tracker.is_saving());

        tracker.save_complete(started + Duration::from_millis(10));
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn failed_save_stays_dirty() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty(Instant::now());
        tracker.start_save();
        tracker.save_failed();
        assert!(tracker.is_dirty());
        assert!(!tracker.is_saving());
    }
}
