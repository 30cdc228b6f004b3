//! Render states derived from [`StateController`]. Nothing here is stored.

use shared::domain::VideoSummary;

use crate::state::{CatalogSlot, ResolvedStream, StateController, StreamSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogView<'a> {
    Loading,
    Error(&'static str),
    Empty,
    Listed(&'a [VideoSummary]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerView<'a> {
    Hidden,
    Loading {
        video: &'a VideoSummary,
    },
    Ready {
        video: &'a VideoSummary,
        stream: &'a ResolvedStream,
    },
    Failed {
        video: &'a VideoSummary,
        message: &'static str,
    },
}

impl<'a> PlayerView<'a> {
    pub fn video(&self) -> Option<&'a VideoSummary> {
        match *self {
            Self::Hidden => None,
            Self::Loading { video } | Self::Ready { video, .. } | Self::Failed { video, .. } => {
                Some(video)
            }
        }
    }
}

impl StateController {
    pub fn catalog_view(&self) -> CatalogView<'_> {
        match self.catalog_slot() {
            CatalogSlot::Loading => CatalogView::Loading,
            CatalogSlot::Failed(failure) => CatalogView::Error(failure.message),
            CatalogSlot::Idle | CatalogSlot::Loaded if self.catalog().is_empty() => {
                CatalogView::Empty
            }
            CatalogSlot::Idle | CatalogSlot::Loaded => CatalogView::Listed(self.catalog()),
        }
    }

    pub fn player_view(&self) -> PlayerView<'_> {
        let Some(video) = self.selection() else {
            return PlayerView::Hidden;
        };

        match self.stream_slot() {
            StreamSlot::Ready(stream) => PlayerView::Ready { video, stream },
            StreamSlot::Failed(failure) => PlayerView::Failed {
                video,
                message: failure.message,
            },
            // A selection always starts a request, so Idle only shows up transiently.
            StreamSlot::Loading | StreamSlot::Idle => PlayerView::Loading { video },
        }
    }
}
