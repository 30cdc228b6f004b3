//! Reducer for client-visible state.
//!
//! Catalog loading and stream resolution each own a slot. Every request is
//! tagged with a ticket, and a completion is applied only when its ticket is
//! still the newest one for that operation.

use chrono::{DateTime, Utc};
use shared::domain::{CatalogSeq, Filename, SelectionSeq, VideoSummary};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ErrorKind, Operation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: &'static str,
    pub kind: ErrorKind,
}

impl From<&ClientError> for Failure {
    fn from(err: &ClientError) -> Self {
        Self {
            message: err.user_message(),
            kind: err.kind(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSlot {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStream {
    pub url: String,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StreamSlot {
    #[default]
    Idle,
    Loading,
    Ready(ResolvedStream),
    Failed(Failure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogTicket {
    pub seq: CatalogSeq,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    pub seq: SelectionSeq,
    pub filename: Filename,
}

#[derive(Debug, Default)]
pub struct StateController {
    catalog: Vec<VideoSummary>,
    catalog_slot: CatalogSlot,
    catalog_seq: CatalogSeq,
    selection: Option<VideoSummary>,
    stream_slot: StreamSlot,
    selection_seq: SelectionSeq,
    // Operation that failed most recently, for single-slot renderers.
    last_failed: Option<Operation>,
}

impl StateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_catalog_load(&mut self) -> CatalogTicket {
        self.catalog_seq = self.catalog_seq.next();
        self.catalog_slot = CatalogSlot::Loading;
        debug!(seq = self.catalog_seq.0, "catalog load started");
        CatalogTicket {
            seq: self.catalog_seq,
        }
    }

    /// Returns `false` when the ticket was superseded and the result dropped.
    pub fn apply_catalog(
        &mut self,
        ticket: CatalogTicket,
        result: Result<Vec<VideoSummary>, ClientError>,
    ) -> bool {
        if ticket.seq != self.catalog_seq {
            debug!(
                seq = ticket.seq.0,
                current = self.catalog_seq.0,
                "dropping stale catalog result"
            );
            return false;
        }

        match result {
            Ok(videos) => {
                info!(count = videos.len(), "catalog loaded");
                self.catalog = videos;
                self.catalog_slot = CatalogSlot::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "catalog load failed");
                self.catalog_slot = CatalogSlot::Failed(Failure::from(&err));
                self.last_failed = Some(Operation::Catalog);
            }
        }
        true
    }

    /// Sets the selection and drops any previous stream url or error before
    /// the request goes out.
    pub fn begin_selection(&mut self, video: VideoSummary) -> SelectionTicket {
        self.selection_seq = self.selection_seq.next();
        let filename = video.filename.clone();
        info!(seq = self.selection_seq.0, %filename, "video selected");
        self.selection = Some(video);
        self.stream_slot = StreamSlot::Loading;
        SelectionTicket {
            seq: self.selection_seq,
            filename,
        }
    }

    pub fn apply_stream(
        &mut self,
        ticket: &SelectionTicket,
        result: Result<String, ClientError>,
    ) -> bool {
        if ticket.seq != self.selection_seq {
            debug!(
                seq = ticket.seq.0,
                current = self.selection_seq.0,
                filename = %ticket.filename,
                "dropping stale stream result"
            );
            return false;
        }

        match result {
            Ok(url) => {
                self.stream_slot = StreamSlot::Ready(ResolvedStream {
                    url,
                    resolved_at: Utc::now(),
                });
            }
            Err(err) => {
                warn!(error = %err, filename = %ticket.filename, "stream resolution failed");
                self.stream_slot = StreamSlot::Failed(Failure::from(&err));
                self.last_failed = Some(Operation::Stream);
            }
        }
        true
    }

    pub fn catalog(&self) -> &[VideoSummary] {
        &self.catalog
    }

    pub fn catalog_slot(&self) -> &CatalogSlot {
        &self.catalog_slot
    }

    pub fn selection(&self) -> Option<&VideoSummary> {
        self.selection.as_ref()
    }

    pub fn stream_slot(&self) -> &StreamSlot {
        &self.stream_slot
    }

    pub fn stream_url(&self) -> Option<&str> {
        match &self.stream_slot {
            StreamSlot::Ready(stream) => Some(stream.url.as_str()),
            _ => None,
        }
    }

    pub fn is_loading_catalog(&self) -> bool {
        self.catalog_slot == CatalogSlot::Loading
    }

    pub fn is_loading_stream(&self) -> bool {
        self.stream_slot == StreamSlot::Loading
    }

    pub fn catalog_error(&self) -> Option<&'static str> {
        match &self.catalog_slot {
            CatalogSlot::Failed(failure) => Some(failure.message),
            _ => None,
        }
    }

    pub fn stream_error(&self) -> Option<&'static str> {
        match &self.stream_slot {
            StreamSlot::Failed(failure) => Some(failure.message),
            _ => None,
        }
    }

    /// Most recent failure that is still live in either slot; falls back to
    /// the other operation once the latest one is retried.
    pub fn error(&self) -> Option<&'static str> {
        match self.last_failed {
            Some(Operation::Stream) => self.stream_error().or_else(|| self.catalog_error()),
            Some(Operation::Catalog) | None => {
                self.catalog_error().or_else(|| self.stream_error())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
