// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the lighting bridge.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{ConfigError, DecodeError, Result, TransportError};
use crate::protocol::LightSource;
use crate::state::{Light, LightSummary};
use crate::types::LightId;

// ============================================================================
// BridgeConfig - Connection parameters
// ============================================================================

/// Where and how to reach a lighting bridge.
///
/// The host may be a bare hostname or address, optionally with a port, or a
/// full `http://` / `https://` URL. In the latter case port and scheme
/// settings are ignored.
///
/// # Examples
///
/// ```
/// use light_monitor::protocol::BridgeConfig;
/// use std::time::Duration;
///
/// let config = BridgeConfig::new("localhost")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.base_url(), "http://localhost:8080");
///
/// let config = BridgeConfig::new("https://bridge.local/api/");
/// assert_eq!(config.base_url(), "https://bridge.local/api");
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    host: String,
    port: u16,
    use_https: bool,
    timeout: Duration,
}

impl BridgeConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Targets the bridge at `host` on port 80 with a 10 s timeout.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the bridge's port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Talks to the bridge over HTTPS.
    ///
    /// A bridge still on the default HTTP port is moved to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Bounds how long each index or detail request may take.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns `true` if the bridge is reached over HTTPS.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            return host.to_string();
        }

        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{host}{port_suffix}")
    }

    /// Validates the address and builds a [`BridgeClient`] for it.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty, the resulting base URL does not
    /// parse, or the HTTP client cannot be built.
    pub fn into_client(self) -> std::result::Result<BridgeClient, ConfigError> {
        let host = self.host.trim();
        if host.is_empty() || host.ends_with("://") {
            return Err(ConfigError::InvalidAddress(self.host));
        }

        let base_url = self.base_url();
        if let Err(e) = reqwest::Url::parse(&base_url) {
            tracing::debug!(url = %base_url, error = %e, "Rejecting bridge address");
            return Err(ConfigError::InvalidAddress(self.host));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ConfigError::Client)?;

        Ok(BridgeClient {
            base_url,
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// BridgeClient - reqwest-backed light source
// ============================================================================

/// HTTP client for a lighting bridge.
///
/// Uses `GET /lights` for the index and `GET /lights/{id}` for details.
///
/// # Examples
///
/// ```no_run
/// use light_monitor::protocol::{BridgeConfig, LightSource};
///
/// # async fn example() -> light_monitor::Result<()> {
/// let client = BridgeConfig::new("localhost").with_port(8080).into_client()?;
/// for summary in client.list_lights().await? {
///     let light = client.get_light(&summary.id).await?;
///     println!("{} is {}", light.name, if light.on { "on" } else { "off" });
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BridgeClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl BridgeClient {
    /// Path of the light index.
    pub const LIGHTS_PATH: &'static str = "/lights";

    /// Returns the base URL of the bridge.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the detail path for a light, percent-encoding the id.
    fn light_path(id: &LightId) -> String {
        format!(
            "{}/{}",
            Self::LIGHTS_PATH,
            urlencoding::encode(id.as_str())
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);

        tracing::debug!(url = %url, "Sending bridge request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(path, e))?;

        tracing::debug!(body = %body, "Received bridge response");

        serde_json::from_str(&body).map_err(|source| {
            DecodeError::Json {
                path: path.to_string(),
                source,
            }
            .into()
        })
    }

    fn transport_error(&self, path: &str, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                path: path.to_string(),
                millis: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            TransportError::Http(err)
        }
    }
}

impl LightSource for BridgeClient {
    async fn list_lights(&self) -> Result<Vec<LightSummary>> {
        self.get_json(Self::LIGHTS_PATH).await
    }

    async fn get_light(&self, id: &LightId) -> Result<Light> {
        self.get_json(&Self::light_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = BridgeConfig::new("192.168.1.100");
        assert_eq!(config.host(), "192.168.1.100");
        assert_eq!(config.port(), 80);
        assert!(!config.use_https());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_with_https() {
        let config = BridgeConfig::new("192.168.1.100").with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_url(), "https://192.168.1.100");
    }

    #[test]
    fn config_with_https_custom_port() {
        let config = BridgeConfig::new("192.168.1.100")
            .with_port(8443)
            .with_https();
        assert_eq!(config.port(), 8443);
        assert_eq!(config.base_url(), "https://192.168.1.100:8443");
    }

    #[test]
    fn config_base_url_custom_port() {
        let config = BridgeConfig::new("localhost").with_port(8080);
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn config_base_url_full_url() {
        let config = BridgeConfig::new("http://localhost:8080/").with_port(9000);
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn into_client_keeps_base_url() {
        let client = BridgeConfig::new("localhost")
            .with_port(8080)
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn into_client_rejects_empty_host() {
        assert!(matches!(
            BridgeConfig::new("  ").into_client(),
            Err(ConfigError::InvalidAddress(_))
        ));
        assert!(matches!(
            BridgeConfig::new("http://").into_client(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }

    #[test]
    fn into_client_rejects_malformed_url() {
        assert!(matches!(
            BridgeConfig::new("http://bad host:99999").into_client(),
            Err(ConfigError::InvalidAddress(host)) if host == "http://bad host:99999"
        ));
        assert!(matches!(
            BridgeConfig::new("bad host").with_port(8080).into_client(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }

    #[test]
    fn light_path_encodes_id() {
        assert_eq!(BridgeClient::light_path(&LightId::new("1")), "/lights/1");
        assert_eq!(
            BridgeClient::light_path(&LightId::new("hall/2 a")),
            "/lights/hall%2F2%20a"
        );
    }
}
