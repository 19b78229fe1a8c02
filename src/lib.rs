// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light Monitor - watch a lighting bridge and report what changed.
//!
//! The monitor polls a lighting bridge's HTTP API, compares the full light
//! set against the previous poll and reports each difference as a discrete
//! event: a light was added, a light was removed, or one attribute of a
//! light changed.
//!
//! # Components
//!
//! - [`state`]: light records, snapshots and the [`diff()`](state::diff()) engine
//! - [`protocol`]: the [`LightSource`] interface and its HTTP client
//! - [`monitor`]: the poll loop, retry strategies and output sinks
//!
//! # Quick Start
//!
//! ## Comparing snapshots
//!
//! ```
//! use light_monitor::state::{diff, Light, Snapshot};
//!
//! let before = Snapshot::new();
//! let after: Snapshot = [Light::new("1", "Light1", "kitchen", 255, true)]
//!     .into_iter()
//!     .collect();
//!
//! let changes = diff(&after, &before);
//! assert_eq!(changes.len(), 1);
//!
//! let changes = diff(&before, &after);
//! assert_eq!(changes[0].to_string(), "Light1 (1) has been removed");
//! ```
//!
//! ## Monitoring a bridge
//!
//! ```no_run
//! use light_monitor::monitor::{Backoff, ConsoleSink, Monitor};
//! use light_monitor::protocol::BridgeConfig;
//!
//! #[tokio::main]
//! async fn main() -> light_monitor::Result<()> {
//!     let client = BridgeConfig::new("http://localhost:8080").into_client()?;
//!     let mut monitor = Monitor::new(client, Backoff::default(), ConsoleSink::stdout());
//!     monitor.run().await
//! }
//! ```

pub mod error;
pub mod monitor;
pub mod protocol;
pub mod state;
pub mod types;

pub use error::{ConfigError, DecodeError, Error, Result, TransportError};
pub use monitor::{Backoff, ChangeSink, ConsoleSink, Monitor, PressEnter, RetryStrategy};
pub use protocol::{BridgeClient, BridgeConfig, LightSource};
pub use state::{FieldChange, Light, LightChange, Snapshot, SnapshotStore, diff};
pub use types::{Brightness, DisplayBrightness, LightId};
