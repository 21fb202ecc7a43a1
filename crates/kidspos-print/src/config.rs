//! # Print Configuration
//!
//! Socket timeouts and spooler sizing. The defaults suit a small store
//! network where the printer is one hop away; the timeouts are the only
//! safety valve against a hung socket, since in-flight prints are never
//! cancelled.

use std::time::Duration;

/// Configuration for the printer client and spooler.
#[derive(Debug, Clone)]
pub struct PrintConfig {
    /// TCP connect timeout.
    pub connect_timeout: Duration,

    /// Timeout covering write + flush of the whole payload.
    pub write_timeout: Duration,

    /// Concurrent print workers.
    pub workers: usize,

    /// Queued jobs before enqueue starts dropping (best-effort).
    pub queue_depth: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        PrintConfig {
            connect_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),
            workers: 2,
            queue_depth: 32,
        }
    }
}

impl PrintConfig {
    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the write timeout.
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Sets the worker count (minimum 1).
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Sets the queue depth (minimum 1).
    pub fn queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = depth.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PrintConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_builder_clamps_workers() {
        let config = PrintConfig::default().workers(0);
        assert_eq!(config.workers, 1);
    }
}
