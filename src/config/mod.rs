// Configuration module entry point
// Loads layered configuration and exposes the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

use types::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_HEADER_READ_TIMEOUT, DEFAULT_HOST, DEFAULT_MAX_BODY_SIZE,
    DEFAULT_PORT, DEFAULT_SERVER_NAME,
};

/// Environment variable prefix, e.g. `REFLECTOR__SERVER__PORT=8080`
const ENV_PREFIX: &str = "REFLECTOR";

/// Debug switch inherited from the Flask deployment this fixture replaces
const LEGACY_DEBUG_VAR: &str = "FLASK_DEBUG";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Missing files are fine: defaults and environment still apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let legacy_debug = legacy_debug_flag(std::env::var(LEGACY_DEBUG_VAR).ok());

        let settings = config::Config::builder()
            .set_default("debug", false)?
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "werkzeug")?
            .set_default("performance.keep_alive", true)?
            .set_default(
                "performance.header_read_timeout",
                i64::from(DEFAULT_HEADER_READ_TIMEOUT),
            )?
            .set_default(
                "performance.connection_timeout",
                i64::from(DEFAULT_CONNECTION_TIMEOUT),
            )?
            .set_default("http.server_name", DEFAULT_SERVER_NAME)?
            .set_default("http.max_body_size", i64::from(DEFAULT_MAX_BODY_SIZE))?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("debug", legacy_debug)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// `FLASK_DEBUG` semantics: only `true` (any case) turns debug on, unset leaves it alone
fn legacy_debug_flag(value: Option<String>) -> Option<bool> {
    value.map(|value| value.eq_ignore_ascii_case("true"))
}
