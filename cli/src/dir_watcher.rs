use crate::CliContext;
use crate::commands;
use squadlog_core::directory_watcher::{DirectoryEvent, DirectoryWatcher};
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Start watching the configured log directory.
///
/// Logs already present are left alone; only files created from now on are
/// run through the pipeline.
pub async fn init_watcher(ctx: &CliContext) -> Option<JoinHandle<()>> {
    let dir = {
        let config = ctx.config.read().await;
        PathBuf::from(&config.log_directory)
    };

    let mut watcher = match DirectoryWatcher::new(&dir) {
        Ok(w) => w,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to start directory watcher");
            println!("Warning: {e}");
            return None;
        }
    };

    tracing::info!(dir = %dir.display(), "Watching directory");

    let watcher_ctx = ctx.clone();
    let handle = tokio::spawn(async move {
        while let Some(event) = watcher.next_event().await {
            handle_watcher_event(event, &watcher_ctx).await;
        }
    });

    Some(handle)
}

async fn handle_watcher_event(event: DirectoryEvent, ctx: &CliContext) {
    match event {
        DirectoryEvent::NewFile(path) => {
            tracing::info!(path = %path.display(), "New combat log detected");
            commands::process_log(&path, ctx).await;
        }
        DirectoryEvent::Message(msg) => tracing::info!("{msg}"),
        DirectoryEvent::Error(err) => tracing::error!("{err}"),
    }
}
