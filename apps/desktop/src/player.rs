use std::process::{ExitStatus, Stdio};

use anyhow::Context;
use tokio::{process::Command, task::JoinHandle};
use tracing::{debug, info, warn};

/// Starts `command` (program plus optional args) with the stream url appended.
/// The client does not wait for the player; a background task reaps it.
pub fn launch(command: &str, url: &str) -> anyhow::Result<JoinHandle<Option<ExitStatus>>> {
    let mut parts = command.split_whitespace();
    let program = parts.next().context("player_command is empty")?.to_string();

    let mut child = Command::new(&program)
        .args(parts)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to start player '{program}'"))?;

    info!(pid = ?child.id(), %program, "player started");
    Ok(tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => {
                debug!(%program, %status, "player exited");
                Some(status)
            }
            Err(err) => {
                warn!(%program, "failed to wait for player: {err}");
                None
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let err = launch("   ", "https://cdn/a").expect_err("must fail");
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn missing_program_is_reported() {
        let err = launch("definitely-not-a-video-player-xyz", "https://cdn/a")
            .expect_err("must fail");
        assert!(format!("{err:#}").contains("definitely-not-a-video-player-xyz"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exited_player_is_reaped() {
        let reaper = launch("true --ignored", "https://cdn/a").expect("spawn");
        let status = reaper.await.expect("join").expect("exit status");
        assert!(status.success());
    }
}
