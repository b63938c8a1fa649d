//! Syncer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// When a bound document is written back to its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutoSave {
    /// Only explicit [`save`](super::FileSyncer::save) calls write the file.
    Disabled,
    /// Save after every [`update`](super::FileSyncer::update) that changed the
    /// document.
    #[default]
    OnChange,
    /// Save from the background timer at a fixed interval.
    Every(Duration),
}

/// Behavior of a [`FileSyncer`](super::FileSyncer).
///
/// ```
/// use std::time::Duration;
/// use arbor::sync::{AutoSave, SyncConfig};
///
/// let config = SyncConfig::default()
///     .with_hard_load(true)
///     .with_auto_save(AutoSave::Every(Duration::from_secs(30)));
/// assert!(!config.saves_on_change());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Replace the bound document on load instead of merging the file into it
    pub hard_load: bool,
    pub auto_save: AutoSave,
    /// Reload from the file on a timer. While set, all auto-saving is off.
    pub auto_load: Option<Duration>,
}

/// What the background timer does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerAction {
    Load(Duration),
    Save(Duration),
    Idle(Duration),
}

/// Poll interval of an idle timer.
pub(crate) const IDLE_POLL: Duration = Duration::from_secs(1);

impl SyncConfig {
    pub fn with_hard_load(mut self, hard_load: bool) -> Self {
        self.hard_load = hard_load;
        self
    }

    pub fn with_auto_save(mut self, auto_save: AutoSave) -> Self {
        self.auto_save = auto_save;
        self
    }

    pub fn with_auto_load(mut self, every: Duration) -> Self {
        self.auto_load = Some(every);
        self
    }

    fn auto_load_interval(&self) -> Option<Duration> {
        self.auto_load.filter(|d| !d.is_zero())
    }

    /// True if changes made through the syncer are saved right away.
    pub fn saves_on_change(&self) -> bool {
        self.auto_save == AutoSave::OnChange && self.auto_load_interval().is_none()
    }

    pub(crate) fn timer_action(&self) -> TimerAction {
        if let Some(every) = self.auto_load_interval() {
            return TimerAction::Load(every);
        }
        match self.auto_save {
            AutoSave::Every(every) if !every.is_zero() => TimerAction::Save(every),
            _ => TimerAction::Idle(IDLE_POLL),
        }
    }
}
