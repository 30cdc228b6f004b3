use super::*;
use crate::error::{CATALOG_FAILURE_MESSAGE, STREAM_FAILURE_MESSAGE};

fn video(title: &str, filename: &str) -> VideoSummary {
    VideoSummary::new(title, filename, format!("{title} description"), "10 MB")
}

fn catalog_failure() -> ClientError {
    ClientError::CatalogFetchFailed {
        reason: "500".to_string(),
    }
}

fn stream_missing(filename: &str) -> ClientError {
    ClientError::StreamUrlMissing {
        filename: Filename::from(filename),
    }
}

#[test]
fn starts_idle_with_nothing_selected() {
    let state = StateController::new();
    assert_eq!(state.catalog_slot(), &CatalogSlot::Idle);
    assert_eq!(state.stream_slot(), &StreamSlot::Idle);
    assert!(state.catalog().is_empty());
    assert!(state.selection().is_none());
    assert_eq!(state.error(), None);
}

#[test]
fn catalog_load_replaces_catalog_wholesale() {
    let mut state = StateController::new();
    let ticket = state.begin_catalog_load();
    assert!(state.apply_catalog(ticket, Ok(vec![video("A", "a.mp4"), video("B", "b.mp4")])));

    let ticket = state.begin_catalog_load();
    assert!(state.apply_catalog(ticket, Ok(vec![video("C", "c.mp4")])));

    let titles: Vec<_> = state.catalog().iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, ["C"]);
}

#[test]
fn begin_catalog_load_clears_previous_catalog_error() {
    let mut state = StateController::new();
    let ticket = state.begin_catalog_load();
    state.apply_catalog(ticket, Err(catalog_failure()));
    assert_eq!(state.error(), Some(CATALOG_FAILURE_MESSAGE));

    state.begin_catalog_load();
    assert_eq!(state.error(), None);
    assert_eq!(state.catalog_error(), None);
    assert!(state.is_loading_catalog());
}

#[test]
fn stale_catalog_result_is_dropped() {
    let mut state = StateController::new();
    let first = state.begin_catalog_load();
    let second = state.begin_catalog_load();

    assert!(state.apply_catalog(second, Ok(vec![video("New", "new.mp4")])));
    assert!(!state.apply_catalog(first, Ok(vec![video("Old", "old.mp4")])));

    assert_eq!(state.catalog()[0].title, "New");
    assert_eq!(state.catalog_slot(), &CatalogSlot::Loaded);
}

#[test]
fn selection_is_set_before_the_url_resolves() {
    let mut state = StateController::new();
    let a = video("A", "a.mp4");

    let ticket = state.begin_selection(a.clone());

    assert_eq!(ticket.filename.as_str(), "a.mp4");
    assert_eq!(state.selection(), Some(&a));
    assert!(state.is_loading_stream());
    assert_eq!(state.stream_url(), None);
}

#[test]
fn reselection_drops_previous_url_and_error_synchronously() {
    let mut state = StateController::new();
    let a = state.begin_selection(video("A", "a.mp4"));
    state.apply_stream(&a, Ok("https://cdn/a".to_string()));
    assert_eq!(state.stream_url(), Some("https://cdn/a"));

    let b = state.begin_selection(video("B", "b.mp4"));
    assert_eq!(state.stream_url(), None);
    state.apply_stream(&b, Err(stream_missing("b.mp4")));
    assert_eq!(state.stream_error(), Some(STREAM_FAILURE_MESSAGE));

    state.begin_selection(video("A", "a.mp4"));
    assert_eq!(state.stream_error(), None);
    assert_eq!(state.error(), None);
}

#[test]
fn only_the_latest_selection_result_is_applied() {
    let mut state = StateController::new();
    let a = state.begin_selection(video("A", "a.mp4"));
    let b = state.begin_selection(video("B", "b.mp4"));

    assert!(state.apply_stream(&b, Ok("https://cdn/b".to_string())));
    assert!(!state.apply_stream(&a, Ok("https://cdn/a".to_string())));
    assert!(!state.apply_stream(&a, Err(stream_missing("a.mp4"))));

    assert_eq!(state.selection().map(|v| v.title.as_str()), Some("B"));
    assert_eq!(state.stream_url(), Some("https://cdn/b"));
    assert_eq!(state.error(), None);
}

#[test]
fn stream_failure_keeps_selection() {
    let mut state = StateController::new();
    let a = video("A", "a.mp4");
    let ticket = state.begin_selection(a.clone());

    state.apply_stream(&ticket, Err(stream_missing("a.mp4")));

    assert_eq!(state.selection(), Some(&a));
    assert!(!state.is_loading_stream());
    assert_eq!(state.stream_url(), None);
    match state.stream_slot() {
        StreamSlot::Failed(failure) => assert_eq!(failure.kind, ErrorKind::StreamUrlMissing),
        other => panic!("unexpected slot: {other:?}"),
    }
}

#[test]
fn catalog_refresh_leaves_stale_selection_in_place() {
    let mut state = StateController::new();
    let ticket = state.begin_catalog_load();
    state.apply_catalog(ticket, Ok(vec![video("A", "a.mp4")]));
    let selected = state.begin_selection(video("A", "a.mp4"));
    state.apply_stream(&selected, Ok("https://cdn/a".to_string()));

    let ticket = state.begin_catalog_load();
    state.apply_catalog(ticket, Ok(vec![video("B", "b.mp4")]));

    assert_eq!(state.selection().map(|v| v.title.as_str()), Some("A"));
    assert_eq!(state.stream_url(), Some("https://cdn/a"));
    assert!(state.catalog().iter().all(|v| v.filename.as_str() != "a.mp4"));
}

#[test]
fn failures_are_reported_per_operation() {
    let mut state = StateController::new();
    let catalog = state.begin_catalog_load();
    state.apply_catalog(catalog, Err(catalog_failure()));
    let stream = state.begin_selection(video("A", "a.mp4"));
    state.apply_stream(&stream, Err(stream_missing("a.mp4")));

    assert_eq!(state.catalog_error(), Some(CATALOG_FAILURE_MESSAGE));
    assert_eq!(state.stream_error(), Some(STREAM_FAILURE_MESSAGE));
    assert_eq!(state.error(), Some(STREAM_FAILURE_MESSAGE));

    // Retrying the catalog does not hide the player failure.
    state.begin_catalog_load();
    assert_eq!(state.error(), Some(STREAM_FAILURE_MESSAGE));
}

#[test]
fn retrying_selection_keeps_live_catalog_failure_visible() {
    let mut state = StateController::new();
    let catalog = state.begin_catalog_load();
    state.apply_catalog(catalog, Err(catalog_failure()));
    let stream = state.begin_selection(video("A", "a.mp4"));
    state.apply_stream(&stream, Err(stream_missing("a.mp4")));
    assert_eq!(state.error(), Some(STREAM_FAILURE_MESSAGE));

    state.begin_selection(video("A", "a.mp4"));

    assert_eq!(state.stream_error(), None);
    assert_eq!(state.error(), state.catalog_error());
    assert_eq!(state.error(), Some(CATALOG_FAILURE_MESSAGE));
}
