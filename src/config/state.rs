// Application state module
// Shared, read-only state handed to every request by reference.

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use super::types::Config;

/// Application state
///
/// The only cross-request state is the process start instant (read by the
/// status endpoint) and the configuration itself; both are safe under any
/// number of concurrent readers.
pub struct AppState {
    pub config: Config,
    started: Instant,

    // Checked on every request; cached here so the hot path stays lock-free
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Self {
            config,
            started: Instant::now(),
            cached_access_log,
        }
    }

    /// Seconds since process start, fractional. Monotonic by construction.
    pub fn uptime_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_non_negative_and_non_decreasing() {
        let state = AppState::new(Config::load_from("does-not-exist").unwrap());
        let first = state.uptime_secs();
        let second = state.uptime_secs();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
