//! Plain-text rendering of the client views.

use client_core::{CatalogView, PlayerView, StateController};

pub const HEADING: &str = "Video Streaming Platform";
pub const LOADING_CATALOG: &str = "Loading videos...";
pub const EMPTY_CATALOG: &str = "No videos available. Please try again later.";
pub const LOADING_STREAM: &str = "Loading video...";

pub fn render_catalog(view: CatalogView<'_>) -> String {
    match view {
        CatalogView::Loading => LOADING_CATALOG.to_string(),
        CatalogView::Error(message) => message.to_string(),
        CatalogView::Empty => EMPTY_CATALOG.to_string(),
        CatalogView::Listed(videos) => {
            let width = videos.len().to_string().len();
            videos
                .iter()
                .enumerate()
                .map(|(idx, video)| format!("{:>width$}. {}", idx + 1, video.title))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

pub fn render_player(view: PlayerView<'_>) -> Option<String> {
    let video = view.video()?;
    let status = match view {
        PlayerView::Loading { .. } | PlayerView::Hidden => LOADING_STREAM.to_string(),
        PlayerView::Ready { stream, .. } => format!(
            "Stream: {}\nResolved at: {}",
            stream.url,
            stream.resolved_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        PlayerView::Failed { message, .. } => message.to_string(),
    };

    Some(format!(
        "Now Playing: {}\n{status}\nVideo Specifications:\n  Description: {}\n  Filename: {}\n  Size: {}",
        video.title, video.description, video.filename, video.size
    ))
}

pub fn render_screen(state: &StateController, notice: Option<&str>) -> String {
    let mut sections = vec![HEADING.to_string(), render_catalog(state.catalog_view())];
    if let Some(player) = render_player(state.player_view()) {
        sections.push(player);
    }
    if let Some(notice) = notice {
        sections.push(notice.to_string());
    }
    sections.join("\n\n")
}
