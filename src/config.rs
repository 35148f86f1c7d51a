//! Relay configuration loaded from environment variables.
//!
//! Settings come from the process environment (or a `.env` file via
//! `dotenvy`). The binaries let `--addr` override the listen address.

/// Default `host:port` the relay binds to.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Default number of events queued per subscriber before eviction.
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 64;

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// `host:port` to bind (or dial, for the listener), e.g. `0.0.0.0:8080`.
    /// Host names are resolved at bind time.
    pub listen_addr: String,

    /// Capacity of each subscriber's event queue. Always at least 1.
    pub subscriber_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            subscriber_buffer: DEFAULT_SUBSCRIBER_BUFFER,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from `LISTEN_ADDR` and `SUBSCRIBER_BUFFER`.
    ///
    /// Falls back to defaults when a variable is unset or invalid.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr = std::env::var("LISTEN_ADDR")
            .ok()
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let subscriber_buffer =
            parse_env("SUBSCRIBER_BUFFER", DEFAULT_SUBSCRIBER_BUFFER).max(1);

        Self {
            listen_addr,
            subscriber_buffer,
        }
    }

    /// Replaces the listen address when `addr` is given.
    #[must_use]
    pub fn with_listen_addr(mut self, addr: Option<String>) -> Self {
        if let Some(addr) = addr {
            self.listen_addr = addr;
        }
        self
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
