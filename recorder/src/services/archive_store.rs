//! Network archive store
//!
//! The network-capture plugin stages one HAR file per test attempt in the
//! staging directory. Each archive is handed out at most once: a successful
//! [`ArchiveStore::take`] deletes the staged file, and concurrent takes are
//! serialized so two callers never both read the same file.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use shared::{process_debug, process_warn, NetworkArchive, ProcessId};

use crate::error::RecorderResult;
use crate::traits::FileSystem;

pub struct ArchiveStore<F: FileSystem> {
    file_system: Arc<F>,
    staging_dir: PathBuf,
    take_lock: Mutex<()>,
}

impl<F: FileSystem> ArchiveStore<F> {
    pub fn new(file_system: Arc<F>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            file_system,
            staging_dir: staging_dir.into(),
            take_lock: Mutex::new(()),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Staged path for an archive id; ids must name a file directly inside
    /// the staging directory (`./` prefixes are allowed)
    fn archive_path(&self, id: &str) -> Option<PathBuf> {
        let mut components = Path::new(id)
            .components()
            .filter(|component| !matches!(component, Component::CurDir));
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.staging_dir.join(name)),
            _ => None,
        }
    }

    /// Parse and consume the archive staged under `id`
    ///
    /// Missing, unreadable or malformed archives yield `None`; the caller
    /// carries on without network data.
    pub async fn take(&self, id: &str) -> Option<NetworkArchive> {
        let Some(path) = self.archive_path(id) else {
            process_warn!(ProcessId::current(), "⚠️ Rejected network archive id {:?}", id);
            return None;
        };

        let _guard = self.take_lock.lock().await;

        let bytes = match self.file_system.read_file(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => {
                process_debug!(ProcessId::current(), "No network archive staged at {}", path.display());
                return None;
            }
            Err(e) => {
                process_warn!(ProcessId::current(), "⚠️ Could not read network archive {}: {}", path.display(), e);
                return None;
            }
        };

        let archive = match serde_json::from_slice::<NetworkArchive>(&bytes) {
            Ok(archive) => archive,
            Err(e) => {
                process_warn!(ProcessId::current(), "⚠️ Malformed network archive {}: {}", path.display(), e);
                return None;
            }
        };

        // An archive that cannot be removed would be handed out again
        if let Err(e) = self.file_system.remove_file(&path).await {
            process_warn!(ProcessId::current(), "⚠️ Could not consume network archive {}: {}", path.display(), e);
            return None;
        }

        process_debug!(
            ProcessId::current(),
            "🌐 Consumed network archive {} ({} entries)",
            path.display(),
            archive.entry_count()
        );
        Some(archive)
    }

    /// Remove the staging directory and anything still staged in it
    pub async fn remove_staging(&self) -> RecorderResult<()> {
        let _guard = self.take_lock.lock().await;
        self.file_system.remove_dir_all(&self.staging_dir).await
    }
}
