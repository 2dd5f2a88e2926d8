//! Tweet command - post, read, search, and delete tweets.

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use tracing::debug;
use xcli_core::parse_tweet_id;
use xcli_fetch::PollSpec;

use super::Session;
use crate::Cli;
use crate::output::{JsonFormatter, OutputMode};

/// Arguments for the tweet command.
#[derive(Args)]
pub struct TweetArgs {
    #[command(subcommand)]
    pub action: TweetAction,
}

/// Tweet subcommands.
#[derive(Subcommand)]
pub enum TweetAction {
    /// Post a tweet.
    Post {
        /// Tweet text.
        text: String,

        /// Poll options, comma-separated.
        #[arg(long)]
        poll: Option<String>,

        /// Poll duration in minutes.
        #[arg(long, default_value = "1440")]
        poll_duration: u32,
    },

    /// Fetch a tweet by ID or URL.
    Get {
        /// Tweet ID or URL.
        id: String,
    },

    /// Delete a tweet.
    Delete {
        /// Tweet ID or URL.
        id: String,
    },

    /// Reply to a tweet.
    Reply {
        /// Tweet ID or URL to reply to.
        id: String,
        /// Reply text.
        text: String,
    },

    /// Quote a tweet.
    Quote {
        /// Tweet ID or URL to quote.
        id: String,
        /// Quote text.
        text: String,
    },

    /// Search recent tweets.
    Search {
        /// Search query.
        query: String,

        /// Maximum results (10-100).
        #[arg(long, default_value = "10")]
        max: u32,
    },

    /// Show a tweet's engagement metrics.
    Metrics {
        /// Tweet ID or URL.
        id: String,
    },

    /// Print the long-form article attached to a tweet.
    Article {
        /// Tweet ID or URL.
        id: String,
    },
}

/// Runs the tweet command.
pub async fn run(args: &TweetArgs, cli: &Cli) -> Result<()> {
    let session = Session::open(cli)?;
    let client = &session.client;

    match &args.action {
        TweetAction::Post {
            text,
            poll,
            poll_duration,
        } => {
            let poll = poll.as_deref().map(|options| parse_poll(options, *poll_duration));
            let envelope = client.post_tweet(text, None, None, poll.as_ref()).await?;
            session.print(&envelope, "Posted")
        }
        TweetAction::Get { id } => {
            let id = parse_tweet_id(id)?;
            let envelope = client.get_tweet(&id).await?;
            session.print(&envelope, &format!("Tweet {id}"))
        }
        TweetAction::Delete { id } => {
            let id = parse_tweet_id(id)?;
            let envelope = client.delete_tweet(&id).await?;
            session.print(&envelope, "Deleted")
        }
        TweetAction::Reply { id, text } => {
            let id = parse_tweet_id(id)?;
            let envelope = client.post_tweet(text, Some(&id), None, None).await?;
            session.print(&envelope, "Reply")
        }
        TweetAction::Quote { id, text } => {
            let id = parse_tweet_id(id)?;
            let envelope = client.post_tweet(text, None, Some(&id), None).await?;
            session.print(&envelope, "Quote")
        }
        TweetAction::Search { query, max } => {
            let envelope = client.search_tweets(query, *max).await?;
            session.print(&envelope, &format!("Search: {query}"))
        }
        TweetAction::Metrics { id } => {
            let id = parse_tweet_id(id)?;
            let envelope = client.get_tweet_metrics(&id).await?;
            session.print(&envelope, &format!("Metrics {id}"))
        }
        TweetAction::Article { id } => print_article(&session, id).await,
    }
}

/// Splits `"yes, no"` into trimmed, non-empty poll options.
fn parse_poll(options: &str, duration_minutes: u32) -> PollSpec {
    PollSpec {
        options: options
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect(),
        duration_minutes,
    }
}

async fn print_article(session: &Session, raw_id: &str) -> Result<()> {
    let id = parse_tweet_id(raw_id)?;
    let envelope = session.client.get_tweet(&id).await?;

    let tweet = envelope
        .tweets()
        .first()
        .ok_or_else(|| anyhow!("tweet {id} not found"))?;
    let article = tweet
        .article
        .as_ref()
        .ok_or_else(|| anyhow!("tweet {id} does not contain an article"))?;
    debug!(tweet = %id, "Rendering article");

    if session.mode == OutputMode::Json {
        print!("{}", JsonFormatter::new(false).format_value(article)?);
        return Ok(());
    }

    let title = article.title.as_deref().unwrap_or_default();
    let body = article.plain_text.as_deref().unwrap_or_default();
    println!("# {title}\n\n{body}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_poll_trims_and_drops_empty() {
        let poll = parse_poll(" yes , no ,, maybe", 60);
        assert_eq!(poll.options, vec!["yes", "no", "maybe"]);
        assert_eq!(poll.duration_minutes, 60);
    }
}
