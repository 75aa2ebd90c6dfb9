//! Loading persisted execution records

use std::path::{Path, PathBuf};
use tokio::fs;

use shared::{process_debug, process_warn, ExecutionRecord, ProcessId};

use crate::error::{ViewerError, ViewerResult};

const RECORD_EXTENSION: &str = "json";

pub async fn load_record(path: &Path) -> ViewerResult<ExecutionRecord> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ViewerError::read(path, e))?;
    ExecutionRecord::from_json(&content).map_err(|e| ViewerError::invalid_record(path, e))
}

/// Every record below `dir`, sorted by path
///
/// Files that are not execution records are skipped with a warning.
pub async fn load_directory(dir: &Path) -> ViewerResult<Vec<(PathBuf, ExecutionRecord)>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries = fs::read_dir(&current)
            .await
            .map_err(|e| ViewerError::read(&current, e))?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == RECORD_EXTENSION) {
                files.push(path);
            }
        }
    }
    files.sort();

    let mut records = Vec::with_capacity(files.len());
    for path in files {
        match load_record(&path).await {
            Ok(record) => records.push((path, record)),
            Err(e) => process_warn!(ProcessId::current(), "⚠️ Skipping {}: {}", path.display(), e),
        }
    }

    process_debug!(ProcessId::current(), "Loaded {} records from {}", records.len(), dir.display());
    Ok(records)
}
