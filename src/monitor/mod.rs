// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The poll loop.
//!
//! A [`Monitor`] repeatedly fetches every light from a [`LightSource`],
//! compares the result against the previous snapshot and hands the changes
//! to a [`ChangeSink`]. A poll is all-or-nothing: if the index or any detail
//! request fails, no snapshot is built, the stored snapshot stays as it was
//! and nothing is emitted. The [`RetryStrategy`] then decides when the next
//! attempt starts.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use light_monitor::monitor::{Backoff, ConsoleSink, Monitor};
//! use light_monitor::protocol::BridgeConfig;
//!
//! #[tokio::main]
//! async fn main() -> light_monitor::Result<()> {
//!     let client = BridgeConfig::new("localhost").with_port(8080).into_client()?;
//!
//!     let mut monitor = Monitor::new(client, Backoff::default(), ConsoleSink::stdout())
//!         .with_poll_interval(Duration::from_secs(1));
//!
//!     monitor.run_until(async { tokio::signal::ctrl_c().await.ok(); }).await
//! }
//! ```

mod retry;
mod sink;

pub use retry::{Backoff, PressEnter, RetryStrategy};
pub use sink::{ChangeSink, ConsoleSink, render};

use std::future::Future;
use std::time::Duration;

use crate::error::Result;
use crate::protocol::LightSource;
use crate::state::{LightChange, Snapshot, SnapshotStore};

/// Default delay between successful polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Fetches the complete light set.
///
/// Requests the index, then each light's details one after another. The
/// first failure aborts the fetch; no partial snapshot is returned.
///
/// # Errors
///
/// Returns the first transport or decode error encountered.
pub async fn fetch_snapshot<S: LightSource>(source: &S) -> Result<Snapshot> {
    tracing::debug!("Fetching light index");
    let index = source.list_lights().await?;

    tracing::debug!(count = index.len(), "Fetching light details");
    let mut snapshot = Snapshot::new();
    for summary in index {
        let light = source.get_light(&summary.id).await?;
        if light.id != summary.id {
            tracing::debug!(requested = %summary.id, returned = %light.id, "Light id differs from index");
        }
        snapshot.insert(light);
    }

    Ok(snapshot)
}

/// Polls a light source and reports changes.
///
/// The monitor owns the [`SnapshotStore`]; it is replaced only after a poll
/// fully succeeded.
#[derive(Debug)]
pub struct Monitor<S, R, K> {
    source: S,
    retry: R,
    sink: K,
    store: SnapshotStore,
    poll_interval: Duration,
}

impl<S, R, K> Monitor<S, R, K>
where
    S: LightSource,
    R: RetryStrategy,
    K: ChangeSink,
{
    /// Creates a monitor with an empty snapshot.
    #[must_use]
    pub fn new(source: S, retry: R, sink: K) -> Self {
        Self {
            source,
            retry,
            sink,
            store: SnapshotStore::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the delay between successful polls.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Returns the delay between successful polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the snapshot store.
    #[must_use]
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Returns the sink.
    #[must_use]
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Returns the light source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs one poll without retrying or emitting.
    ///
    /// On success the store holds the new snapshot and the changes relative
    /// to the previous one are returned.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the store is left untouched.
    pub async fn poll_once(&mut self) -> Result<Vec<LightChange>> {
        let updated = fetch_snapshot(&self.source).await?;
        tracing::debug!(lights = updated.len(), "Comparing snapshots");
        Ok(self.store.apply(updated))
    }

    /// Polls until one attempt succeeds, then emits its changes.
    ///
    /// Returns the number of changes emitted.
    ///
    /// # Errors
    ///
    /// Returns the last poll error if the retry strategy gives up, or the
    /// first error that is not [retryable](crate::Error::is_retryable).
    pub async fn poll_until_success(&mut self) -> Result<usize> {
        let mut attempt = 0;
        loop {
            match self.poll_once().await {
                Ok(changes) => {
                    if !changes.is_empty() {
                        tracing::info!(count = changes.len(), "Detected light changes");
                    }
                    self.sink.emit(&changes);
                    return Ok(changes.len());
                }
                Err(e) if !e.is_retryable() => {
                    tracing::error!(error = %e, "Poll failed permanently");
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Poll failed");
                    if !self.retry.wait(attempt, &e).await {
                        return Err(e);
                    }
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    }

    /// Polls forever, sleeping the poll interval after each success.
    ///
    /// # Errors
    ///
    /// Returns the last poll error if the retry strategy gives up.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(interval = ?self.poll_interval, "Starting light monitor");
        loop {
            self.poll_until_success().await?;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Like [`run`](Self::run), but returns `Ok(())` once `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns the last poll error if the retry strategy gives up.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.run() => result,
            () = shutdown => {
                tracing::info!("Shutting down light monitor");
                Ok(())
            }
        }
    }
}
