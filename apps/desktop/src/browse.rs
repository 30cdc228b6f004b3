//! Interactive loop: stdin commands and request completions feed one state owner.

use anyhow::Context;
use client_core::VideoClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{player, render::render_screen};

pub const HELP: &str =
    "Commands: <number> play that video, r reload the list, o open in player, h help, q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Select(usize),
    Reload,
    Open,
    Help,
    Quit,
    Unknown(String),
}

/// Returns `None` for blank input. Video numbers are 1-based, as listed.
pub fn parse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line.to_ascii_lowercase().as_str() {
        "r" | "reload" => BrowseCommand::Reload,
        "o" | "open" => BrowseCommand::Open,
        "h" | "help" | "?" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => BrowseCommand::Select(n),
            _ => BrowseCommand::Unknown(line.to_string()),
        },
    };
    Some(command)
}

pub async fn run(mut client: VideoClient, player_command: Option<String>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    client.load_catalog();
    redraw(&client, Some(HELP));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                let Some(command) = parse_command(&line) else {
                    continue;
                };
                debug!(?command, "browse command");
                if command == BrowseCommand::Quit {
                    break;
                }
                let notice = handle_command(&mut client, command, player_command.as_deref());
                redraw(&client, notice.as_deref());
            }
            Some(event) = client.next_event() => {
                if client.apply(event) {
                    redraw(&client, None);
                }
            }
            else => break,
        }
    }

    Ok(())
}

fn handle_command(
    client: &mut VideoClient,
    command: BrowseCommand,
    player_command: Option<&str>,
) -> Option<String> {
    match command {
        BrowseCommand::Select(n) => match n
            .checked_sub(1)
            .and_then(|idx| client.state().catalog().get(idx))
            .cloned()
        {
            Some(video) => {
                client.select_video(video);
                None
            }
            None => Some(format!("No video numbered {n}.")),
        },
        BrowseCommand::Reload => {
            client.load_catalog();
            None
        }
        BrowseCommand::Open => Some(open_current(client, player_command)),
        BrowseCommand::Help => Some(HELP.to_string()),
        BrowseCommand::Unknown(input) => Some(format!("Unknown command '{input}'. {HELP}")),
        BrowseCommand::Quit => None,
    }
}

fn open_current(client: &VideoClient, player_command: Option<&str>) -> String {
    let Some(url) = client.state().stream_url() else {
        return "Nothing is ready to play yet.".to_string();
    };
    let Some(command) = player_command else {
        return "No player_command configured; use the stream URL above.".to_string();
    };

    match player::launch(command, url) {
        Ok(_) => format!("Opened in {command}."),
        Err(err) => format!("Could not start the player: {err:#}"),
    }
}

fn redraw(client: &VideoClient, notice: Option<&str>) {
    println!("\n{}", render_screen(client.state(), notice));
}
