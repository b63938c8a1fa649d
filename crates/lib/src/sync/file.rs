//! The file syncer.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::{debug, warn};

use super::{SyncConfig, SyncError};
use crate::{
    Error, Result,
    format::Formatter,
    tree::{ChangeHook, Document},
};

/// Hook installed on bound documents. Only marks the syncer dirty; the save
/// itself happens once the document lock is released.
struct DirtyFlag(Arc<AtomicBool>);

impl ChangeHook for DirtyFlag {
    fn on_change(&self) -> Result<()> {
        self.0.store(true, Ordering::SeqCst);
        Ok(())
    }
}

struct FileState {
    path: PathBuf,
    formatter: Arc<dyn Formatter>,
    config: SyncConfig,
}

/// Keeps a Group-rooted [`Document`] in sync with a file.
///
/// The syncer owns the bound document; access it through [`read`](Self::read)
/// and [`update`](Self::update). File state (path, formatter and config) and
/// the document are guarded by two separate locks, so a slow save never
/// blocks reconfiguration and the other way around.
///
/// ```no_run
/// use arbor::{group, sync::FileSyncer, format::JsonFormatter, tree::Document};
///
/// let syncer = FileSyncer::new("settings.json", JsonFormatter::pretty());
/// syncer.bind(Document::new(group! { "volume" => 7 }));
/// // Saved to settings.json right after the closure returns
/// syncer.update(|doc| doc.set("volume", 8)).unwrap().unwrap();
/// ```
pub struct FileSyncer {
    file: Mutex<FileState>,
    document: Mutex<Option<Document>>,
    dirty: Arc<AtomicBool>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FileSyncer {
    /// Creates a syncer for `path` with the default [`SyncConfig`].
    pub fn new(path: impl Into<PathBuf>, formatter: impl Formatter + 'static) -> Self {
        Self::with_config(path, formatter, SyncConfig::default())
    }

    pub fn with_config(
        path: impl Into<PathBuf>,
        formatter: impl Formatter + 'static,
        config: SyncConfig,
    ) -> Self {
        FileSyncer {
            file: Mutex::new(FileState {
                path: path.into(),
                formatter: Arc::new(formatter),
                config,
            }),
            document: Mutex::new(None),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Binds `doc` to this syncer and returns the previously bound document,
    /// with its change hook removed.
    ///
    /// # Panics
    ///
    /// Panics if the root of `doc` is not a Group.
    pub fn bind(&self, mut doc: Document) -> Option<Document> {
        assert!(
            doc.root().is_group(),
            "only documents with a group root can be bound, found {}",
            doc.kind()
        );
        doc.root_mut()
            .set_on_change(DirtyFlag(Arc::clone(&self.dirty)));
        self.dirty.store(false, Ordering::SeqCst);

        let previous = lock(&self.document).replace(doc);
        debug!(path = ?self.path(), "Bound document");
        previous.map(Self::release)
    }

    /// Detaches and returns the bound document.
    pub fn unbind(&self) -> Option<Document> {
        lock(&self.document).take().map(Self::release)
    }

    fn release(mut doc: Document) -> Document {
        doc.root_mut().clear_on_change();
        doc
    }

    pub fn is_bound(&self) -> bool {
        lock(&self.document).is_some()
    }

    /// True if the bound document changed since it was last bound or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Runs `f` with shared access to the bound document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> Result<R> {
        let guard = lock(&self.document);
        let doc = guard.as_ref().ok_or(SyncError::NotBound)?;
        Ok(f(doc))
    }

    /// Runs `f` with exclusive access to the bound document.
    ///
    /// With [`AutoSave::OnChange`](super::AutoSave::OnChange) a changed
    /// document is saved after `f` returns. A failed save is logged, not
    /// returned.
    pub fn update<R>(&self, f: impl FnOnce(&mut Document) -> R) -> Result<R> {
        let result = {
            let mut guard = lock(&self.document);
            let doc = guard.as_mut().ok_or(SyncError::NotBound)?;
            f(doc)
        };

        if self.config().saves_on_change() && self.dirty.swap(false, Ordering::SeqCst) {
            if let Err(e) = self.save() {
                warn!(error = %e, "Failed to save document after change");
            }
        }
        Ok(result)
    }

    /// Encodes the bound document and writes it to the file.
    pub fn save(&self) -> Result<()> {
        let formatter = self.formatter();
        let data = {
            let guard = lock(&self.document);
            let doc = guard.as_ref().ok_or(SyncError::NotBound)?;
            self.dirty.store(false, Ordering::SeqCst);
            formatter.encode(doc)?
        };

        let file = lock(&self.file);
        fs::write(&file.path, &data).map_err(|e| -> Error {
            SyncError::FileIo {
                path: file.path.clone(),
                source: e,
            }
            .into()
        })?;
        debug!(path = ?file.path, bytes = data.len(), "Saved document");
        Ok(())
    }

    /// Reads the file and applies it to the bound document.
    ///
    /// With `hard_load` the document is replaced by the file content;
    /// otherwise the file is merged into it with `forced` set, so values from
    /// the file win and keys only present in memory are kept. Loading never
    /// triggers an automatic save.
    pub fn load(&self) -> Result<()> {
        if !self.is_bound() {
            return Err(SyncError::NotBound.into());
        }

        let (path, formatter, hard_load) = {
            let file = lock(&self.file);
            (
                file.path.clone(),
                Arc::clone(&file.formatter),
                file.config.hard_load,
            )
        };
        let data = fs::read(&path).map_err(|e| -> Error {
            SyncError::FileIo {
                path: path.clone(),
                source: e,
            }
            .into()
        })?;
        let loaded = formatter.decode(&data)?.to_value();

        let mut guard = lock(&self.document);
        let doc = guard.as_mut().ok_or(SyncError::NotBound)?;
        if hard_load {
            doc.root_mut().replace_quiet(loaded);
        } else {
            doc.root_mut().group_merge_quiet(loaded, true)?;
        }
        debug!(path = ?path, hard_load, "Loaded document");
        Ok(())
    }

    pub fn path(&self) -> PathBuf {
        lock(&self.file).path.clone()
    }

    pub fn set_path(&self, path: impl AsRef<Path>) {
        lock(&self.file).path = path.as_ref().to_path_buf();
    }

    pub fn formatter(&self) -> Arc<dyn Formatter> {
        Arc::clone(&lock(&self.file).formatter)
    }

    pub fn set_formatter(&self, formatter: impl Formatter + 'static) {
        lock(&self.file).formatter = Arc::new(formatter);
    }

    pub fn config(&self) -> SyncConfig {
        lock(&self.file).config.clone()
    }

    pub fn set_config(&self, config: SyncConfig) {
        lock(&self.file).config = config;
    }
}

impl std::fmt::Debug for FileSyncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSyncer")
            .field("path", &self.path())
            .field("config", &self.config())
            .field("bound", &self.is_bound())
            .finish()
    }
}
