// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the light monitor.
//!
//! Poll failures come in two kinds: [`TransportError`] when the bridge could
//! not be reached or answered with a failure status, and [`DecodeError`] when
//! a response body does not have the expected shape. Both abort only the poll
//! in progress. [`ConfigError`] covers mistakes made while building a client.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The bridge could not be reached or rejected a request.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response body could not be interpreted.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The client configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` if a later poll may succeed where this one failed.
    ///
    /// Transport and decode failures are transient from the monitor's point
    /// of view; configuration errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

/// Errors raised while talking to the bridge.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The bridge answered with a non-success status code.
    #[error("GET {path} returned HTTP {status} - {reason}")]
    Status {
        /// Request path, relative to the bridge base URL.
        path: String,
        /// The numeric status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// The request did not complete in time.
    #[error("GET {path} timed out after {millis} ms")]
    Timeout {
        /// Request path, relative to the bridge base URL.
        path: String,
        /// The configured timeout.
        millis: u64,
    },
}

/// Errors raised when a response body does not match the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON for the expected type.
    #[error("malformed response from {path}: {source}")]
    Json {
        /// Request path, relative to the bridge base URL.
        path: String,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while building a bridge client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bridge address cannot be used.
    #[error("invalid bridge address: {0}")]
    InvalidAddress(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = TransportError::Status {
            path: "/lights".to_string(),
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GET /lights returned HTTP 503 - Service Unavailable"
        );
    }

    #[test]
    fn timeout_error_display() {
        let err = TransportError::Timeout {
            path: "/lights/1".to_string(),
            millis: 2500,
        };
        assert_eq!(err.to_string(), "GET /lights/1 timed out after 2500 ms");
    }

    #[test]
    fn decode_error_keeps_path() {
        let source = serde_json::from_str::<u8>("{").unwrap_err();
        let err = DecodeError::Json {
            path: "/lights/7".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("malformed response from /lights/7"));
    }

    #[test]
    fn retryable_kinds() {
        let transport: Error = TransportError::Timeout {
            path: "/lights".to_string(),
            millis: 10,
        }
        .into();
        assert!(transport.is_retryable());

        let decode: Error = DecodeError::Json {
            path: "/lights".to_string(),
            source: serde_json::from_str::<u8>("x").unwrap_err(),
        }
        .into();
        assert!(decode.is_retryable());

        let config: Error = ConfigError::InvalidAddress(String::new()).into();
        assert!(!config.is_retryable());
    }
}
