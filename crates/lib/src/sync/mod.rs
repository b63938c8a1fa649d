//! Keeping documents in sync with files.
//!
//! A [`FileSyncer`] owns one Group-rooted [`Document`](crate::tree::Document)
//! and a [`Formatter`](crate::format::Formatter). It saves the document to a
//! file and loads it back, either on request, automatically after changes, or
//! periodically from a background timer.

mod config;
mod error;
mod file;
mod timer;

pub use config::{AutoSave, SyncConfig};
pub use error::SyncError;
pub use file::FileSyncer;
pub use timer::TimerHandle;
