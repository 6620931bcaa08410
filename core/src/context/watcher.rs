use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver};
use tokio::time::{Instant, sleep};

use super::WatcherError;

pub enum DirectoryEvent {
    /// A combat log finished writing
    NewFile(PathBuf),
    Message(String),
    Error(String),
}

const WRITE_FINISH_TIMEOUT: Duration = Duration::from_secs(60);
const WRITE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Watches the log directory for combat logs written or moved in after startup.
pub struct DirectoryWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    poll_interval: Duration,
    write_timeout: Duration,
    /// Backends report one rename as several events
    last_reported: Option<PathBuf>,
}

impl DirectoryWatcher {
    pub fn new(path: &Path) -> Result<Self, WatcherError> {
        if !path.is_dir() {
            return Err(WatcherError::MissingDirectory {
                path: path.to_path_buf(),
            });
        }

        let (tx, rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.blocking_send(res);
            },
            Config::default(),
        )
        .map_err(WatcherError::InitWatcher)?;

        watcher
            .watch(path, RecursiveMode::Recursive)
            .map_err(|source| WatcherError::WatchPath {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            _watcher: watcher,
            rx,
            poll_interval: WRITE_POLL_INTERVAL,
            write_timeout: WRITE_FINISH_TIMEOUT,
            last_reported: None,
        })
    }

    /// Override how often and how long a new file is polled for write-finish.
    pub fn with_write_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.write_timeout = timeout;
        self
    }

    pub async fn next_event(&mut self) -> Option<DirectoryEvent> {
        while let Some(event_result) = self.rx.recv().await {
            match event_result {
                Ok(event) => {
                    if let Some(watcher_event) = self.process_event(event).await {
                        return Some(watcher_event);
                    }
                }
                Err(e) => {
                    return Some(DirectoryEvent::Error(format!(
                        "Directory watcher error: {}",
                        e
                    )));
                }
            }
        }
        None
    }

    async fn process_event(&mut self, event: Event) -> Option<DirectoryEvent> {
        let path = match event.kind {
            EventKind::Create(_) => event.paths.into_iter().find(|p| is_combat_log(p)),
            // Destination of a rename is the last path
            EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Both)) => {
                event.paths.into_iter().last().filter(|p| is_combat_log(p))
            }
            // Some backends cannot tell the two ends of a rename apart
            EventKind::Modify(ModifyKind::Name(RenameMode::Any)) => event
                .paths
                .into_iter()
                .find(|p| is_combat_log(p) && p.is_file()),
            _ => None,
        }?;

        if self.last_reported.as_ref() == Some(&path) {
            return None;
        }

        let event = self.handle_new_file(path.clone()).await;
        if matches!(event, DirectoryEvent::NewFile(_)) {
            self.last_reported = Some(path);
        }
        Some(event)
    }

    /// Wait until the writer is done: non-empty and the same size on two polls.
    async fn handle_new_file(&self, path: PathBuf) -> DirectoryEvent {
        let start = Instant::now();
        let mut last_size = 0;

        while start.elapsed() < self.write_timeout {
            let size = path.metadata().map(|m| m.len()).unwrap_or(0);
            if size > 0 && size == last_size {
                tracing::debug!(path = %path.display(), size, "Combat log finished writing");
                return DirectoryEvent::NewFile(path);
            }
            last_size = size;
            sleep(self.poll_interval).await;
        }

        DirectoryEvent::Message(format!(
            "Warning: Timed out waiting for {} to finish writing",
            path.display()
        ))
    }
}

/// arcdps writes `.evtc`, or `.zevtc` / `.evtc.zip` when compression is on.
pub fn is_combat_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| {
            let n = n.to_ascii_lowercase();
            n.ends_with(".evtc") || n.ends_with(".zevtc") || n.ends_with(".evtc.zip")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::tempdir;
    use tokio::time::timeout;

    #[test]
    fn recognizes_arcdps_logs() {
        assert!(is_combat_log(Path::new("logs/20240101-203011.evtc")));
        assert!(is_combat_log(Path::new("logs/20240101-203011.zevtc")));
        assert!(is_combat_log(Path::new("20240101-203011.EVTC.zip")));
    }

    #[test]
    fn ignores_other_files() {
        assert!(!is_combat_log(Path::new("logs/20240101-203011.json")));
        assert!(!is_combat_log(Path::new("logs/notes.txt")));
        assert!(!is_combat_log(Path::new("logs/")));
    }

    const WAIT: Duration = Duration::from_secs(10);

    fn watcher(dir: &Path) -> DirectoryWatcher {
        DirectoryWatcher::new(dir)
            .unwrap()
            .with_write_polling(Duration::from_millis(200), Duration::from_secs(8))
    }

    async fn next_new_file(watcher: &mut DirectoryWatcher) -> PathBuf {
        match timeout(WAIT, watcher.next_event()).await {
            Ok(Some(DirectoryEvent::NewFile(path))) => path,
            Ok(Some(DirectoryEvent::Message(msg))) => panic!("unexpected message: {msg}"),
            Ok(Some(DirectoryEvent::Error(err))) => panic!("watcher error: {err}"),
            Ok(None) => panic!("watcher channel closed"),
            Err(_) => panic!("no event within {WAIT:?}"),
        }
    }

    fn file_name(path: &Path) -> &str {
        path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
    }

    #[tokio::test]
    async fn log_renamed_into_place_is_reported() {
        let dir = tempdir().unwrap();
        let mut watcher = watcher(dir.path());

        let staging = dir.path().join("20240101-203011.tmp");
        std::fs::write(&staging, b"EVTC20240101").unwrap();
        std::fs::rename(&staging, dir.path().join("20240101-203011.zevtc")).unwrap();

        let path = next_new_file(&mut watcher).await;
        assert_eq!(file_name(&path), "20240101-203011.zevtc");
    }

    #[tokio::test]
    async fn growing_log_is_reported_after_writes_stop() {
        let dir = tempdir().unwrap();
        let mut watcher = watcher(dir.path());

        let path = dir.path().join("20240101-210000.zevtc");
        let done = Arc::new(AtomicBool::new(false));
        let writer = {
            let path = path.clone();
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                let mut file = std::fs::File::create(&path).unwrap();
                for _ in 0..40 {
                    file.write_all(&[0u8; 64]).unwrap();
                    file.flush().unwrap();
                    std::thread::sleep(Duration::from_millis(20));
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let reported = next_new_file(&mut watcher).await;
        assert!(done.load(Ordering::SeqCst), "reported while still growing");
        assert_eq!(file_name(&reported), "20240101-210000.zevtc");
        assert_eq!(std::fs::metadata(&reported).unwrap().len(), 40 * 64);
        writer.join().unwrap();
    }

    #[tokio::test]
    async fn logs_present_before_start_are_ignored() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("20240101-190000.zevtc"), b"old").unwrap();

        let mut watcher = watcher(dir.path());
        std::fs::write(dir.path().join("20240101-220000.zevtc"), b"new").unwrap();

        let path = next_new_file(&mut watcher).await;
        assert_eq!(file_name(&path), "20240101-220000.zevtc");
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let result = DirectoryWatcher::new(&dir.path().join("absent"));
        assert!(matches!(result, Err(WatcherError::MissingDirectory { .. })));
    }
}
