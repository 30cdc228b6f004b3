use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{PlayerView, VideoClient};
use shared::domain::VideoSummary;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod browse;
mod config;
mod player;
mod render;

use config::load_settings;
use render::{render_catalog, render_player};

#[derive(Parser, Debug)]
#[command(name = "video-client", about = "Browse and play videos from a catalog service")]
struct Cli {
    #[arg(long, default_value = "video_client.toml")]
    config: PathBuf,
    /// Overrides `api_base_url` from the config file and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog.
    List,
    /// Resolve a stream url for one video, by filename or title.
    Play {
        video: String,
        /// Hand the url to `player_command`.
        #[arg(long)]
        open: bool,
    },
    /// Interactive browsing (default).
    Browse,
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Exact filename first, then a case-insensitive title match.
fn find_video<'a>(catalog: &'a [VideoSummary], query: &str) -> Option<&'a VideoSummary> {
    catalog
        .iter()
        .find(|video| video.filename.as_str() == query)
        .or_else(|| {
            let query = query.trim().to_lowercase();
            catalog
                .iter()
                .find(|video| video.title.to_lowercase() == query)
        })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut settings = load_settings(&cli.config)?;
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    info!(api_base_url = %settings.api_base_url, "starting video client");

    let mut client = VideoClient::over_http(&settings.api_base_url, settings.http_options())
        .context("failed to configure catalog client")?;

    match cli.command.unwrap_or(Command::Browse) {
        Command::List => {
            client.load_catalog_and_wait().await;
            println!("{}", render_catalog(client.state().catalog_view()));
            if client.state().catalog_error().is_some() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Play { video, open } => {
            client.load_catalog_and_wait().await;
            if let Some(message) = client.state().catalog_error() {
                eprintln!("{message}");
                return Ok(ExitCode::FAILURE);
            }
            let Some(selected) = find_video(client.state().catalog(), &video).cloned() else {
                eprintln!("No video matching '{video}' in the catalog.");
                return Ok(ExitCode::FAILURE);
            };

            client.select_video_and_wait(selected).await;
            let view = client.state().player_view();
            if let Some(text) = render_player(view) {
                println!("{text}");
            }

            match view {
                PlayerView::Ready { stream, .. } if open => {
                    let Some(command) = settings.player_command.as_deref() else {
                        eprintln!("--open needs player_command in the config or APP__PLAYER_COMMAND");
                        return Ok(ExitCode::FAILURE);
                    };
                    let _player = player::launch(command, &stream.url)?;
                }
                PlayerView::Ready { .. } => {}
                _ => return Ok(ExitCode::FAILURE),
            }
        }
        Command::Browse => browse::run(client, settings.player_command).await?,
    }

    Ok(ExitCode::SUCCESS)
}
