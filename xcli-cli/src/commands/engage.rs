//! Like, unlike, retweet, and unretweet.

use anyhow::Result;
use clap::Args;
use xcli_core::parse_tweet_id;

use super::Session;
use crate::Cli;

/// Arguments shared by the engagement commands.
#[derive(Args)]
pub struct TargetArgs {
    /// Tweet ID or URL.
    pub id: String,
}

/// An engagement toggle on a tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Like,
    Unlike,
    Retweet,
    Unretweet,
}

impl Action {
    /// Title shown above the result.
    pub fn title(self) -> &'static str {
        match self {
            Self::Like => "Liked",
            Self::Unlike => "Unliked",
            Self::Retweet => "Retweeted",
            Self::Unretweet => "Unretweeted",
        }
    }
}

/// Runs an engagement command.
pub async fn run(action: Action, args: &TargetArgs, cli: &Cli) -> Result<()> {
    let tweet_id = parse_tweet_id(&args.id)?;
    let session = Session::open(cli)?;
    let client = &session.client;

    let envelope = match action {
        Action::Like => client.like_tweet(&tweet_id).await?,
        Action::Unlike => client.unlike_tweet(&tweet_id).await?,
        Action::Retweet => client.retweet(&tweet_id).await?,
        Action::Unretweet => client.unretweet(&tweet_id).await?,
    };
    session.print(&envelope, action.title())
}
