// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `light-monitor` - print lighting bridge changes as they happen.
//!
//! Change events go to stdout, logs to stderr. Set `RUST_LOG` to adjust
//! log verbosity (default `light_monitor=info`).
//!
//! # Usage
//!
//! ```bash
//! # Poll the default bridge every second, backing off on failure
//! light-monitor
//!
//! # Poll another bridge every 5 seconds, asking before each retry
//! light-monitor --url http://192.168.1.20 --interval-ms 5000 --interactive
//! ```

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use light_monitor::monitor::{Backoff, ConsoleSink, Monitor, PressEnter};
use light_monitor::protocol::BridgeConfig;

/// Poll a lighting bridge and print every change.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Bridge base URL or host.
    #[arg(long, default_value = "http://localhost:8080")]
    url: String,

    /// Delay between successful polls, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Per-request timeout, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Wait for Enter on stdin before retrying a failed poll.
    #[arg(long)]
    interactive: bool,

    /// Stop after this many consecutive failed polls (default: never).
    #[arg(long, conflicts_with = "interactive")]
    max_retries: Option<u32>,

    /// First retry delay, in milliseconds.
    #[arg(long, default_value_t = 1000, conflicts_with = "interactive")]
    initial_backoff_ms: u64,

    /// Upper bound for the retry delay, in milliseconds.
    #[arg(long, default_value_t = 60_000, conflicts_with = "interactive")]
    max_backoff_ms: u64,
}

impl Cli {
    fn backoff(&self) -> Backoff {
        let backoff = Backoff::new()
            .with_initial_delay(Duration::from_millis(self.initial_backoff_ms))
            .with_max_delay(Duration::from_millis(self.max_backoff_ms));
        match self.max_retries {
            Some(max) => backoff.with_max_retries(max),
            None => backoff.with_infinite_retries(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("light_monitor=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let code: u8 = match run(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "Light monitor stopped");
            1
        }
    };

    // A pending "Press Enter" read holds a blocking stdin thread that
    // runtime shutdown would wait on.
    if cli.interactive {
        std::process::exit(i32::from(code));
    }
    ExitCode::from(code)
}

async fn run(cli: &Cli) -> light_monitor::Result<()> {
    let client = BridgeConfig::new(cli.url.as_str())
        .with_timeout(Duration::from_millis(cli.timeout_ms))
        .into_client()?;
    let interval = Duration::from_millis(cli.interval_ms);

    tracing::info!(bridge = client.base_url(), "Monitoring lighting bridge");

    if cli.interactive {
        Monitor::new(client, PressEnter::stdin(), ConsoleSink::stdout())
            .with_poll_interval(interval)
            .run_until(shutdown_signal())
            .await
    } else {
        Monitor::new(client, cli.backoff(), ConsoleSink::stdout())
            .with_poll_interval(interval)
            .run_until(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_bridge() {
        let cli = Cli::parse_from(["light-monitor"]);
        assert_eq!(cli.url, "http://localhost:8080");
        assert_eq!(cli.interval_ms, 1000);
        assert!(!cli.interactive);
        assert_eq!(cli.backoff().max_retries, None);
    }

    #[test]
    fn backoff_flags() {
        let cli = Cli::parse_from([
            "light-monitor",
            "--max-retries",
            "4",
            "--initial-backoff-ms",
            "250",
            "--max-backoff-ms",
            "2000",
        ]);
        let backoff = cli.backoff();
        assert_eq!(backoff.max_retries, Some(4));
        assert_eq!(backoff.initial_delay, Duration::from_millis(250));
        assert_eq!(backoff.max_delay, Duration::from_secs(2));
    }

    #[test]
    fn interactive_conflicts_with_backoff() {
        let result = Cli::try_parse_from(["light-monitor", "--interactive", "--max-retries", "3"]);
        assert!(result.is_err());
    }
}
