//! Watch command - stream new tweets from a set of accounts.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use xcli_watch::{CancellationToken, DesktopNotifier, WatchEngine, WatchEvent, WatchOptions, WatchSink};

use super::Session;
use crate::Cli;
use crate::output::{self, OutputMode, RenderOptions, WatchFormatter};

/// Arguments for watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Accounts to watch, with or without `@`.
    #[arg(required = true)]
    pub usernames: Vec<String>,

    /// Poll interval in seconds (defaults to the configured value).
    #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Only show tweets containing this keyword (repeatable).
    #[arg(long, short)]
    pub filter: Vec<String>,

    /// Send a desktop notification for each new tweet.
    #[arg(long, short)]
    pub notify: bool,

    /// Stop after this many tweets (0 = unlimited).
    #[arg(long, default_value = "0")]
    pub max: u64,
}

/// Runs the watch command.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<()> {
    let Session {
        client,
        config,
        mode,
        opts,
    } = Session::open(cli)?;

    let options = WatchOptions {
        interval: Duration::from_secs(args.interval.unwrap_or(config.watch.interval_secs)),
        filters: args.filter.clone(),
        max_tweets: args.max,
        page_size: config.watch.page_size,
    };
    info!(interval = options.interval.as_secs(), "Starting watch mode");

    let cancel = CancellationToken::new();
    let bridge = tokio::spawn(cancel_on_signal(cancel.clone()));

    let mut engine = WatchEngine::new(client, options, cancel);
    if args.notify {
        engine = engine.with_notifier(Arc::new(DesktopNotifier));
    }

    let mut sink = TerminalSink::new(mode, opts);
    let result = engine.run(&args.usernames, &mut sink).await;
    bridge.abort();

    let summary = result?;
    debug!(polls = summary.polls, tweets = summary.tweets_seen, "Watch finished");
    Ok(())
}

/// Cancels `token` on Ctrl+C, or SIGTERM on Unix.
async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => debug!("Ctrl+C received"),
        () = terminate => debug!("SIGTERM received"),
    }
    token.cancel();
}

// ============================================================================
// Terminal Sink
// ============================================================================

/// Prints status to stderr and tweets to stdout in the selected mode.
struct TerminalSink {
    status: WatchFormatter,
    mode: OutputMode,
    opts: RenderOptions,
}

impl TerminalSink {
    fn new(mode: OutputMode, opts: RenderOptions) -> Self {
        Self {
            status: WatchFormatter::new(opts.use_colors),
            mode,
            opts,
        }
    }
}

impl WatchSink for TerminalSink {
    fn on_event(&mut self, event: WatchEvent<'_>) {
        match event {
            WatchEvent::Initializing => eprintln!("{}", self.status.initializing()),
            WatchEvent::Tracking(target) => eprintln!("{}", self.status.tracking(target)),
            WatchEvent::Started {
                targets,
                interval,
                filters,
            } => eprintln!("{}", self.status.started(targets, interval, filters)),
            WatchEvent::Tweet { username, envelope } => {
                let rendered = output::render(envelope, self.mode, &format!("@{username}"), self.opts)
                    .and_then(|r| r.emit());
                if let Err(e) = rendered {
                    warn!(error = %e, "Failed to print tweet");
                }
            }
            WatchEvent::RateLimited { wait, .. } => eprintln!("{}", self.status.rate_limited(wait)),
            WatchEvent::TargetFailed { username, error } => {
                eprintln!("{}", self.status.target_failed(username, error));
            }
            WatchEvent::MaxReached { max } => eprintln!("{}", self.status.max_reached(max)),
            WatchEvent::Summary(summary) => eprintln!("{}", self.status.summary(summary)),
        }
    }
}
