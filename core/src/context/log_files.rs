use std::io::Result;
use std::path::Path;

use tokio::fs;

/// Delete every regular file under `dir`, descending into subdirectories the
/// same way the watcher does. The directories themselves are kept.
///
/// A missing directory counts as already empty. Returns how many files were removed.
pub async fn clear_directory(dir: &Path) -> Result<usize> {
    if !fs::try_exists(dir).await.unwrap_or(false) {
        return Ok(0);
    }

    let mut removed = 0;
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let mut entries = fs::read_dir(&current).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(entry.path());
            } else if file_type.is_file() {
                fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }
    }

    tracing::info!(dir = %dir.display(), removed, "Cleared directory");
    Ok(removed)
}
