// Task Shutdown Signal

use tokio::sync::watch;

/// Shutdown signal observed by long-running tasks.
///
/// Backed by a watch channel holding the "shutdown requested" flag.
/// `wait` is level-triggered, not edge-triggered: it checks the flag
/// before parking, so a token cloned or first polled after the signal
/// fired resolves immediately instead of waiting for a change that
/// already happened. A dropped sender also resolves every waiter; a
/// task must never outlive its controller.
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the shutdown signal, resolving immediately when it
    /// already fired
    pub async fn wait(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // Sender gone: treat as shutdown rather than park forever
                return;
            }
        }
    }
}

/// Shutdown sender
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Signal shutdown to all tasks
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_wait_blocks_until_signal() {
        let (tx, mut token) = shutdown_channel();
        assert!(!token.is_shutdown());
        assert!(timeout(Duration::from_millis(50), token.wait())
            .await
            .is_err());

        tx.shutdown();
        timeout(Duration::from_secs(1), token.wait())
            .await
            .expect("wait must resolve after shutdown");
        assert!(token.is_shutdown());
    }

    #[tokio::test]
    async fn test_wait_resolves_for_token_cloned_after_signal() {
        let (tx, token) = shutdown_channel();
        tx.shutdown();

        // The signal fired before this token ever waited; it must not
        // park for a change that already happened
        let mut late = token.clone();
        timeout(Duration::from_millis(100), late.wait())
            .await
            .expect("late token must resolve immediately");
    }

    #[tokio::test]
    async fn test_wait_resolves_when_sender_dropped() {
        let (tx, mut token) = shutdown_channel();
        drop(tx);
        timeout(Duration::from_millis(100), token.wait())
            .await
            .expect("orphaned token must not park forever");
    }

    #[tokio::test]
    async fn test_wait_is_repeatable_after_signal() {
        let (tx, mut token) = shutdown_channel();
        tx.shutdown();
        for _ in 0..3 {
            timeout(Duration::from_millis(100), token.wait())
                .await
                .expect("wait must keep resolving once shut down");
        }
    }
}
