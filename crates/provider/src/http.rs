use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Transport timeouts shared by every provider.
///
/// There is no overall request timeout: a large upload may legitimately take
/// longer than any fixed bound, so a hung provider is only cut off by the
/// connect and read timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Seconds allowed to establish a connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Seconds allowed between reads once connected.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_read_timeout_secs() -> u64 {
    DEFAULT_READ_TIMEOUT_SECS
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

impl HttpSettings {
    /// Connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Read timeout as a [`Duration`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Build an HTTP client with these timeouts.
    pub fn build_client(&self) -> Client {
        Client::builder()
            .connect_timeout(self.connect_timeout())
            .read_timeout(self.read_timeout())
            .build()
            .expect("failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = HttpSettings::default();
        assert_eq!(settings.connect_timeout(), Duration::from_secs(15));
        assert_eq!(settings.read_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let settings: HttpSettings = serde_json::from_str(r#"{"read_timeout_secs": 90}"#).unwrap();
        assert_eq!(settings.connect_timeout_secs, 15);
        assert_eq!(settings.read_timeout_secs, 90);
    }
}
