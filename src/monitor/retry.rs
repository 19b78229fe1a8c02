// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Retry strategies for failed polls.
//!
//! After a poll fails, the monitor calls [`RetryStrategy::wait`] and starts
//! a fresh poll once it returns `true`. Two strategies are provided:
//!
//! - [`Backoff`] sleeps with exponential backoff (headless operation)
//! - [`PressEnter`] asks the operator to acknowledge the failure

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::error::Error;

/// Decides when a failed poll is retried.
#[allow(async_fn_in_trait)]
pub trait RetryStrategy {
    /// Waits until the next poll may start.
    ///
    /// `attempt` counts consecutive failures, starting at 0 for the first
    /// failure after a success. Returns `false` to stop monitoring.
    async fn wait(&mut self, attempt: u32, error: &Error) -> bool;
}

/// Exponential backoff between retries.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use light_monitor::monitor::Backoff;
///
/// // Default: 1s, doubling, capped at 60s, retrying forever
/// let backoff = Backoff::default();
/// assert_eq!(backoff.delay_for_attempt(3), Duration::from_secs(8));
///
/// // Custom policy
/// let backoff = Backoff::new()
///     .with_max_retries(5)
///     .with_initial_delay(Duration::from_millis(500))
///     .with_max_delay(Duration::from_secs(30));
/// assert!(!backoff.should_retry(5));
/// ```
#[derive(Debug, Clone)]
pub struct Backoff {
    /// Consecutive failed polls tolerated before giving up (`None`: never give up).
    pub max_retries: Option<u32>,
    /// Wait after the first failed poll.
    pub initial_delay: Duration,
    /// Longest wait between polls.
    pub max_delay: Duration,
    /// Factor the wait grows by per consecutive failure.
    pub multiplier: f32,
}

impl Backoff {
    /// Backs off from 1 s, doubling up to 60 s, and never gives up.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives up after `max_retries` failed polls in a row.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Keeps retrying failed polls for as long as the bridge stays down.
    #[must_use]
    pub fn with_infinite_retries(mut self) -> Self {
        self.max_retries = None;
        self
    }

    /// Sets how long to wait after the first failed poll.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Caps the wait between polls while the bridge is failing.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets how much the wait grows after each further failure.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Returns the wait after the failure numbered `attempt` (0-based).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return self.initial_delay.min(self.max_delay);
        }

        let factor = self
            .multiplier
            .powi(i32::try_from(attempt).unwrap_or(i32::MAX));

        #[allow(clippy::cast_precision_loss)]
        let delay_ms = self.initial_delay.as_millis() as f32 * factor;

        // Saturating float-to-int cast; an overflowing product becomes u64::MAX
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delay = Duration::from_millis(delay_ms as u64);

        delay.min(self.max_delay)
    }

    /// Returns `true` if the poll should be retried after failure `attempt`.
    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> bool {
        self.max_retries.is_none_or(|max| attempt < max)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_retries: None,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
        }
    }
}

impl RetryStrategy for Backoff {
    async fn wait(&mut self, attempt: u32, error: &Error) -> bool {
        if !self.should_retry(attempt) {
            tracing::error!(attempt, error = %error, "Giving up after repeated poll failures");
            return false;
        }

        let delay = self.delay_for_attempt(attempt);
        tracing::info!(attempt, delay = ?delay, "Retrying poll after delay");
        tokio::time::sleep(delay).await;
        true
    }
}

/// Waits for the operator to press Enter before retrying.
///
/// End of input stops monitoring.
#[derive(Debug)]
pub struct PressEnter<R> {
    input: R,
}

impl PressEnter<BufReader<Stdin>> {
    /// Reads acknowledgements from standard input.
    ///
    /// Tokio serves stdin from a blocking thread that cannot be cancelled:
    /// while a prompt is pending, runtime shutdown waits for the next line.
    /// Callers that stop on a signal should exit the process instead of
    /// dropping the runtime.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> PressEnter<R> {
    /// Reads acknowledgements from `input`, one line each.
    #[must_use]
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: AsyncBufRead + Unpin> RetryStrategy for PressEnter<R> {
    async fn wait(&mut self, _attempt: u32, error: &Error) -> bool {
        eprintln!("{error}");
        eprintln!("Press Enter To Retry");

        let mut line = String::new();
        match self.input.read_line(&mut line).await {
            Ok(0) => {
                tracing::info!("Input closed, stopping");
                false
            }
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read acknowledgement");
                false
            }
        }
    }
}
