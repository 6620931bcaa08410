use tokio::task::JoinHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub watcher: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.watcher.take() {
            handle.abort();
        }
    }
}
