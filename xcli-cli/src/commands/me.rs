//! Me command - the authenticated user's mentions and bookmarks.

use anyhow::Result;
use clap::{Args, Subcommand};
use xcli_core::parse_tweet_id;

use super::Session;
use crate::Cli;

/// Arguments for the me command.
#[derive(Args)]
pub struct MeArgs {
    #[command(subcommand)]
    pub action: MeAction,
}

/// Me subcommands.
#[derive(Subcommand)]
pub enum MeAction {
    /// Fetch your recent mentions.
    Mentions {
        /// Maximum results (5-100).
        #[arg(long, default_value = "10")]
        max: u32,
    },

    /// Fetch your bookmarks.
    Bookmarks {
        /// Maximum results (1-100).
        #[arg(long, default_value = "10")]
        max: u32,
    },

    /// Bookmark a tweet.
    Bookmark {
        /// Tweet ID or URL.
        id: String,
    },

    /// Remove a bookmark.
    Unbookmark {
        /// Tweet ID or URL.
        id: String,
    },
}

/// Runs the me command.
pub async fn run(args: &MeArgs, cli: &Cli) -> Result<()> {
    let session = Session::open(cli)?;
    let client = &session.client;

    match &args.action {
        MeAction::Mentions { max } => {
            let envelope = client.get_mentions(*max).await?;
            session.print(&envelope, "Mentions")
        }
        MeAction::Bookmarks { max } => {
            let envelope = client.get_bookmarks(*max).await?;
            session.print(&envelope, "Bookmarks")
        }
        MeAction::Bookmark { id } => {
            let envelope = client.bookmark_tweet(&parse_tweet_id(id)?).await?;
            session.print(&envelope, "Bookmarked")
        }
        MeAction::Unbookmark { id } => {
            let envelope = client.unbookmark_tweet(&parse_tweet_id(id)?).await?;
            session.print(&envelope, "Unbookmarked")
        }
    }
}
