// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! x-cli - a terminal client for the X API v2.
//!
//! # Examples
//!
//! ```bash
//! # Post a tweet
//! x tweet post "hello from the terminal"
//!
//! # Read a tweet by ID or URL
//! x tweet get https://x.com/jack/status/20
//!
//! # Search, as JSON
//! x -j tweet search "rust lang" --max 20
//!
//! # Look up a user and their timeline
//! x user get jack
//! x user timeline @jack --max 5
//!
//! # Engage
//! x like 1234567890
//!
//! # Watch accounts for new tweets
//! x watch elonmusk jack --interval 30 --filter rust
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{engage, me, tweet, user, version, watch};
use output::OutputMode;

// ============================================================================
// CLI Definition
// ============================================================================

/// x-cli - X API v2 from the command line.
#[derive(Parser)]
#[command(name = "x")]
#[command(about = "CLI for X/Twitter API v2")]
#[command(long_about = r#"
x-cli talks to the X API v2 with your own developer credentials.

Credentials are read from the environment or ~/.config/x-cli/.env:
  X_API_KEY, X_API_SECRET, X_BEARER_TOKEN,
  X_ACCESS_TOKEN, X_ACCESS_TOKEN_SECRET

Examples:
  x tweet post "hello"            # Post a tweet
  x -j tweet get 20               # Tweet as JSON
  x user timeline jack --max 5    # Recent tweets
  x watch jack -i 30              # Stream new tweets
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// JSON output.
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Plain (TSV) output.
    #[arg(long, short = 'p', global = true)]
    pub plain: bool,

    /// Markdown output.
    #[arg(long = "markdown", short = 'm', global = true)]
    pub markdown: bool,

    /// Verbose output (timestamps, metrics, paging, debug logs).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no log output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Returns the selected output mode. JSON wins over plain, plain over markdown.
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.plain {
            OutputMode::Plain
        } else if self.markdown {
            OutputMode::Markdown
        } else {
            OutputMode::Human
        }
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Tweet operations.
    #[command(visible_alias = "t")]
    Tweet(tweet::TweetArgs),

    /// User operations.
    #[command(visible_alias = "u")]
    User(user::UserArgs),

    /// Authenticated user operations.
    Me(me::MeArgs),

    /// Like a tweet.
    Like(engage::TargetArgs),

    /// Unlike a tweet.
    Unlike(engage::TargetArgs),

    /// Retweet a tweet.
    Retweet(engage::TargetArgs),

    /// Undo a retweet.
    Unretweet(engage::TargetArgs),

    /// Watch accounts for new tweets.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Print the version.
    Version,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    #[allow(dead_code)]
    Success = 0,
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Environment variable that overrides the log filter.
const LOG_LEVEL_ENV: &str = "X_CLI_LOG_LEVEL";

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = match std::env::var(LOG_LEVEL_ENV) {
        Ok(directive) if !directive.is_empty() => EnvFilter::new(directive),
        _ if verbose => EnvFilter::new("xcli=debug,warn"),
        _ => EnvFilter::new("warn"),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Tweet(args) => tweet::run(args, &cli).await,
        Commands::User(args) => user::run(args, &cli).await,
        Commands::Me(args) => me::run(args, &cli).await,
        Commands::Like(args) => engage::run(engage::Action::Like, args, &cli).await,
        Commands::Unlike(args) => engage::run(engage::Action::Unlike, args, &cli).await,
        Commands::Retweet(args) => engage::run(engage::Action::Retweet, args, &cli).await,
        Commands::Unretweet(args) => engage::run(engage::Action::Unretweet, args, &cli).await,
        Commands::Watch(args) => watch::run(args, &cli).await,
        Commands::Version => {
            version::run();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_precedence() {
        let cli = Cli::parse_from(["x", "-p", "-j", "version"]);
        assert_eq!(cli.output_mode(), OutputMode::Json);

        let cli = Cli::parse_from(["x", "-m", "-p", "version"]);
        assert_eq!(cli.output_mode(), OutputMode::Plain);

        let cli = Cli::parse_from(["x", "version", "-m"]);
        assert_eq!(cli.output_mode(), OutputMode::Markdown);

        let cli = Cli::parse_from(["x", "version"]);
        assert_eq!(cli.output_mode(), OutputMode::Human);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_watch_flags() {
        let cli = Cli::parse_from([
            "x", "watch", "@jack", "elon", "-i", "30", "-f", "rust", "-f", "go", "-n", "--max", "5",
        ]);
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(args.usernames, vec!["@jack", "elon"]);
        assert_eq!(args.interval, Some(30));
        assert_eq!(args.filter, vec!["rust", "go"]);
        assert!(args.notify);
        assert_eq!(args.max, 5);
    }
}
