// Application state module
// Immutable per-process state handed to every request

use super::types::Config;

/// Application state
///
/// Built once at startup and shared by `Arc`; nothing in it changes while serving.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub const fn debug(&self) -> bool {
        self.config.debug
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }

    pub const fn max_body_size(&self) -> u64 {
        self.config.http.max_body_size
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
