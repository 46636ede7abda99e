// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

/// Shutdown coordination handle
///
/// The accept loop waits on `notify`; in-flight connections finish
/// under their existing timeouts.
#[derive(Clone)]
pub struct ShutdownSignal {
    pub notify: Arc<Notify>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn trigger(&self) {
        self.notify.notify_waiters();
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the signal listener task (Unix).
#[cfg(unix)]
pub fn spawn_listener(shutdown: &ShutdownSignal) {
    use tokio::signal::unix::{signal, SignalKind};

    let shutdown = shutdown.clone();

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                crate::logger::log_warning("SIGTERM received, initiating graceful shutdown");
            }
            _ = sigint.recv() => {
                crate::logger::log_warning("SIGINT received, initiating graceful shutdown");
            }
        }

        shutdown.trigger();
    });
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn spawn_listener(shutdown: &ShutdownSignal) {
    let shutdown = shutdown.clone();

    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            crate::logger::log_warning("Ctrl+C received, initiating graceful shutdown");
            shutdown.trigger();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_wakes_waiters() {
        let shutdown = ShutdownSignal::new();
        let notify = Arc::clone(&shutdown.notify);

        let waiter = tokio::spawn(async move { notify.notified().await });
        tokio::task::yield_now().await;
        shutdown.trigger();

        waiter.await.unwrap();
    }
}
