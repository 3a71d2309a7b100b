//! social-graph - list and edit follow relationships from the command line
//!
//! Profiles are written to stdout as JSON lines; logs go to stderr.

mod config;
mod error;

use std::io::Write;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use futures::StreamExt;
use social_graph::{FollowAction, HttpApiClient, ListKind, Page, Profile, SocialGraph};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(name = "social-graph", version, about = "Read and edit the follow graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Accounts a user follows
    Following(ListArgs),
    /// Accounts following a user
    Followers(ListArgs),
    /// Show a single profile
    Profile { handle: String },
    /// Follow a user
    Follow { handle: String },
    /// Unfollow a user
    Unfollow { handle: String },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Handle, or numeric user id with --user-id
    user: String,
    /// Treat USER as a numeric user id and skip handle resolution
    #[arg(long)]
    user_id: bool,
    /// Page size (capped at 200 upstream)
    #[arg(long, default_value_t = 100)]
    count: u32,
    /// Continuation cursor from a previous run
    #[arg(long, default_value = "")]
    cursor: String,
    /// Keep fetching until the list is exhausted
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    info!(base_url = %config.base_url, "Starting social-graph");

    let client = HttpApiClient::with_timeout(config.credentials.clone(), config.timeout)?;
    let graph = SocialGraph::with_base_url(Arc::new(client), &config.base_url);

    match cli.command {
        Command::Following(args) => list(&graph, ListKind::Following, args).await,
        Command::Followers(args) => list(&graph, ListKind::Followers, args).await,
        Command::Profile { handle } => {
            let profile = graph.get_profile(&handle).await?;
            print_profiles(std::slice::from_ref(&profile))
        }
        Command::Follow { handle } => graph
            .set_relationship(&handle, FollowAction::Follow)
            .await
            .map_err(Into::into),
        Command::Unfollow { handle } => graph
            .set_relationship(&handle, FollowAction::Destroy)
            .await
            .map_err(Into::into),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("social_graph=info,social_graph_cli=info"));

    // JSON lines for log collectors when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn list(graph: &SocialGraph<HttpApiClient>, kind: ListKind, args: ListArgs) -> Result<()> {
    let user_id = if args.user_id {
        args.user.clone()
    } else {
        graph.resolve_identity(&args.user).await?
    };

    if !args.all {
        let page = match kind {
            ListKind::Following => {
                graph
                    .fetch_following_by_user_id(&user_id, args.count, &args.cursor)
                    .await?
            }
            ListKind::Followers => {
                graph
                    .fetch_followers_by_user_id(&user_id, args.count, &args.cursor)
                    .await?
            }
        };
        return report_page(&page);
    }

    let mut pages = match kind {
        ListKind::Following => graph
            .following_pages(&user_id, args.count, &args.cursor)
            .boxed_local(),
        ListKind::Followers => graph
            .followers_pages(&user_id, args.count, &args.cursor)
            .boxed_local(),
    };

    let mut total = 0;
    while let Some(page) = pages.next().await {
        let page = page?;
        total += page.profiles.len();
        report_page(&page)?;
    }
    info!(list = %kind, user_id = %user_id, total, "List exhausted");

    Ok(())
}

fn report_page(page: &Page) -> Result<()> {
    print_profiles(&page.profiles)?;
    if page.is_last() {
        info!(profiles = page.profiles.len(), "Last page");
    } else {
        info!(
            profiles = page.profiles.len(),
            next_cursor = %page.next_cursor,
            "More pages available"
        );
    }
    Ok(())
}

fn print_profiles(profiles: &[Profile]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for profile in profiles {
        serde_json::to_writer(&mut out, profile)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
