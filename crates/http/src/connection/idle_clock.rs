use std::time::Duration;

use tokio::time::Instant;

/// Time since the last read or write activity on a connection.
#[derive(Debug, Clone, Copy)]
pub struct IdleClock {
    last_activity: Instant,
}

impl IdleClock {
    pub fn start() -> Self {
        Self { last_activity: Instant::now() }
    }

    pub fn restart(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Returns true if strictly more than `timeout` passed since the last activity.
    pub fn has_expired(&self, timeout: Duration) -> bool {
        self.elapsed() > timeout
    }
}

impl Default for IdleClock {
    fn default() -> Self {
        Self::start()
    }
}
