use tokio::sync::broadcast;

/// One subscriber's view of the shutdown signal
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
}

impl ShutdownGuard {
    pub(crate) fn new(shutdown_rx: broadcast::Receiver<()>) -> Self {
        Self { shutdown_rx }
    }

    /// Resolves once shutdown is triggered or the coordinator is gone
    pub async fn wait(&mut self) {
        let _ = self.shutdown_rx.recv().await;
    }
}
