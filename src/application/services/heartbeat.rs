//! Heartbeat worker
//!
//! Logs a liveness line at a fixed interval until shutdown, so a silent
//! process can be told apart from a hung one in the logs.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::info;
use tokio::task::JoinHandle;

use crate::shared::ShutdownSignal;

#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    pub interval_secs: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self { interval_secs: 10 }
    }
}

#[derive(Default)]
pub struct HeartbeatWorker {
    config: HeartbeatConfig,
    running: Arc<AtomicBool>,
    beats: Arc<AtomicU64>,
}

impl HeartbeatWorker {
    pub fn new(config: HeartbeatConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            beats: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Spawn the loop. It exits once `shutdown` fires.
    pub fn start(&self, shutdown: ShutdownSignal) -> JoinHandle<()> {
        let period = Duration::from_secs(self.config.interval_secs.max(1));
        let running = self.running.clone();
        let beats = self.beats.clone();

        tokio::spawn(async move {
            running.store(true, Ordering::SeqCst);
            info!("Heartbeat worker started (interval: {}s)", period.as_secs());

            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let n = beats.fetch_add(1, Ordering::SeqCst) + 1;
                        info!("Worker running at: {} (beat {})", Utc::now().to_rfc3339(), n);
                    }
                    _ = shutdown.wait() => {
                        info!("Heartbeat worker shutting down");
                        break;
                    }
                }
            }

            running.store(false, Ordering::SeqCst);
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn beats(&self) -> u64 {
        self.beats.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn beats_until_shutdown() {
        let worker = HeartbeatWorker::new(HeartbeatConfig { interval_secs: 5 });
        let shutdown = ShutdownSignal::new();
        let handle = worker.start(shutdown.clone());

        tokio::time::sleep(Duration::from_secs(16)).await;
        assert!(worker.is_running());
        assert_eq!(worker.beats(), 3);

        shutdown.trigger();
        handle.await.unwrap();
        assert!(!worker.is_running());
    }
}
