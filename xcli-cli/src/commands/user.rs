//! User command - profiles, timelines, and follow graphs.

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use xcli_core::strip_at;

use super::Session;
use crate::Cli;

/// Arguments for the user command.
#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub action: UserAction,
}

/// User subcommands.
#[derive(Subcommand)]
pub enum UserAction {
    /// Look up a user profile.
    Get {
        /// Username, with or without `@`.
        username: String,
    },

    /// Show a user's recent tweets.
    Timeline {
        /// Username, with or without `@`.
        username: String,

        /// Maximum results (5-100).
        #[arg(long, default_value = "10")]
        max: u32,
    },

    /// List a user's followers.
    Followers {
        /// Username, with or without `@`.
        username: String,

        /// Maximum results (1-1000).
        #[arg(long, default_value = "100")]
        max: u32,
    },

    /// List accounts a user follows.
    Following {
        /// Username, with or without `@`.
        username: String,

        /// Maximum results (1-1000).
        #[arg(long, default_value = "100")]
        max: u32,
    },
}

/// Runs the user command.
pub async fn run(args: &UserArgs, cli: &Cli) -> Result<()> {
    let session = Session::open(cli)?;

    match &args.action {
        UserAction::Get { username } => {
            let username = strip_at(username);
            let envelope = session.client.get_user(username).await?;
            session.print(&envelope, &format!("@{username}"))
        }
        UserAction::Timeline { username, max } => {
            let username = strip_at(username);
            let user_id = resolve_user_id(&session, username).await?;
            let envelope = session.client.get_timeline(&user_id, *max, None).await?;
            session.print(&envelope, &format!("@{username} timeline"))
        }
        UserAction::Followers { username, max } => {
            let username = strip_at(username);
            let user_id = resolve_user_id(&session, username).await?;
            let envelope = session.client.get_followers(&user_id, *max).await?;
            session.print(&envelope, &format!("@{username} followers"))
        }
        UserAction::Following { username, max } => {
            let username = strip_at(username);
            let user_id = resolve_user_id(&session, username).await?;
            let envelope = session.client.get_following(&user_id, *max).await?;
            session.print(&envelope, &format!("@{username} following"))
        }
    }
}

async fn resolve_user_id(session: &Session, username: &str) -> Result<String> {
    let envelope = session.client.get_user(username).await?;
    envelope
        .user()
        .map(|u| u.id.clone())
        .ok_or_else(|| anyhow!("user @{username} not found"))
}
