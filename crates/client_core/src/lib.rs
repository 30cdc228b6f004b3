use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{Filename, VideoSummary};
use tokio::{sync::mpsc, task::AbortHandle};
use tracing::debug;

pub mod error;
pub mod state;
pub mod transport;
pub mod view;

pub use error::{
    ClientError, ErrorKind, Operation, CATALOG_FAILURE_MESSAGE, STREAM_FAILURE_MESSAGE,
};
pub use state::{
    CatalogSlot, CatalogTicket, Failure, ResolvedStream, SelectionTicket, StateController,
    StreamSlot,
};
pub use transport::{HttpCatalogService, HttpOptions};
pub use view::{CatalogView, PlayerView};

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_videos(&self) -> Result<Vec<VideoSummary>, ClientError>;
    async fn resolve_stream(&self, filename: &Filename) -> Result<String, ClientError>;
}

#[derive(Debug)]
pub enum ClientEvent {
    CatalogFetched {
        ticket: CatalogTicket,
        result: Result<Vec<VideoSummary>, ClientError>,
    },
    StreamResolved {
        ticket: SelectionTicket,
        result: Result<String, ClientError>,
    },
}

/// Drives [`StateController`] against a [`CatalogService`].
///
/// Requests run as spawned tasks and report back through [`ClientEvent`]s, so a
/// host loop can keep handling input while they are in flight. Starting a new
/// request of the same kind aborts the previous one. Must be used from inside
/// a tokio runtime.
pub struct VideoClient {
    service: Arc<dyn CatalogService>,
    state: StateController,
    events_tx: mpsc::UnboundedSender<ClientEvent>,
    events_rx: mpsc::UnboundedReceiver<ClientEvent>,
    inflight_catalog: Option<AbortHandle>,
    inflight_stream: Option<AbortHandle>,
}

impl VideoClient {
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            state: StateController::new(),
            events_tx,
            events_rx,
            inflight_catalog: None,
            inflight_stream: None,
        }
    }

    pub fn over_http(base_url: &str, options: HttpOptions) -> Result<Self, ClientError> {
        let service = HttpCatalogService::new(base_url, options)?;
        Ok(Self::new(Arc::new(service)))
    }

    pub fn state(&self) -> &StateController {
        &self.state
    }

    pub fn load_catalog(&mut self) -> CatalogTicket {
        let ticket = self.state.begin_catalog_load();
        if let Some(previous) = self.inflight_catalog.take() {
            debug!("aborting superseded catalog request");
            previous.abort();
        }

        let service = Arc::clone(&self.service);
        let events = self.events_tx.clone();
        let task = tokio::spawn(async move {
            let result = service.list_videos().await;
            let _ = events.send(ClientEvent::CatalogFetched { ticket, result });
        });
        self.inflight_catalog = Some(task.abort_handle());
        ticket
    }

    /// Always issues a fresh request, even when `video` is already selected.
    pub fn select_video(&mut self, video: VideoSummary) -> SelectionTicket {
        let ticket = self.state.begin_selection(video);
        if let Some(previous) = self.inflight_stream.take() {
            debug!(filename = %ticket.filename, "aborting superseded stream request");
            previous.abort();
        }

        let service = Arc::clone(&self.service);
        let events = self.events_tx.clone();
        let task_ticket = ticket.clone();
        let task = tokio::spawn(async move {
            let result = service.resolve_stream(&task_ticket.filename).await;
            let _ = events.send(ClientEvent::StreamResolved {
                ticket: task_ticket,
                result,
            });
        });
        self.inflight_stream = Some(task.abort_handle());
        ticket
    }

    /// Waits for the next completed request. Cancel-safe, so it can sit in a
    /// `tokio::select!` next to user input.
    pub async fn next_event(&mut self) -> Option<ClientEvent> {
        self.events_rx.recv().await
    }

    /// Returns `true` when the event changed state; stale results are dropped.
    pub fn apply(&mut self, event: ClientEvent) -> bool {
        match event {
            ClientEvent::CatalogFetched { ticket, result } => {
                let applied = self.state.apply_catalog(ticket, result);
                if applied {
                    self.inflight_catalog = None;
                }
                applied
            }
            ClientEvent::StreamResolved { ticket, result } => {
                let applied = self.state.apply_stream(&ticket, result);
                if applied {
                    self.inflight_stream = None;
                }
                applied
            }
        }
    }

    pub async fn load_catalog_and_wait(&mut self) {
        let ticket = self.load_catalog();
        while let Some(event) = self.next_event().await {
            let done = matches!(
                &event,
                ClientEvent::CatalogFetched { ticket: t, .. } if *t == ticket
            );
            self.apply(event);
            if done {
                break;
            }
        }
    }

    pub async fn select_video_and_wait(&mut self, video: VideoSummary) {
        let ticket = self.select_video(video);
        while let Some(event) = self.next_event().await {
            let done = matches!(
                &event,
                ClientEvent::StreamResolved { ticket: t, .. } if t.seq == ticket.seq
            );
            self.apply(event);
            if done {
                break;
            }
        }
    }
}

impl Drop for VideoClient {
    fn drop(&mut self) {
        for handle in [self.inflight_catalog.take(), self.inflight_stream.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
