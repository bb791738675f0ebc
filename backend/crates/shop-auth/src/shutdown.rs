use tokio::sync::broadcast;

/// Scope-owned cancellation signal for background auth tasks
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self { shutdown_tx }
    }

    /// Get a receiver for shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal every guard created so far
    pub fn shutdown(&self) {
        log::debug!("Shutdown signalled to {} task(s)", self.shutdown_tx.receiver_count());
        let _ = self.shutdown_tx.send(());
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Task-side half of the shutdown signal
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
    fired: bool,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
            fired: false,
        }
    }

    /// Wait for shutdown. Returns immediately once it has fired; a dropped
    /// coordinator counts as shutdown.
    pub async fn wait(&mut self) {
        if !self.fired {
            let _ = self.shutdown_rx.recv().await;
            self.fired = true;
        }
    }
}
