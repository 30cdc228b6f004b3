use serde::{Deserialize, Serialize};

use crate::domain::VideoSummary;

pub const CATALOG_PATH: &[&str] = &["api", "videos"];
pub const STREAM_PATH_PREFIX: &[&str] = &["api", "video"];

pub type CatalogResponse = Vec<VideoSummary>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamUrlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presigned_url: Option<String>,
}

impl StreamUrlResponse {
    /// Returns the URL only when it is present and non-empty.
    pub fn into_url(self) -> Option<String> {
        self.presigned_url.filter(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ignores_unknown_fields_and_keeps_order() {
        let raw = r#"[
            {"title":"A","filename":"a.mp4","description":"first","size":"1 MB","views":3},
            {"title":"B","filename":"b.mp4","description":"second","size":"2 MB"}
        ]"#;
        let catalog: CatalogResponse = serde_json::from_str(raw).expect("catalog");
        let titles: Vec<_> = catalog.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(catalog[1].filename.as_str(), "b.mp4");
    }

    #[test]
    fn catalog_entry_missing_filename_is_rejected() {
        let raw = r#"[{"title":"A","description":"x","size":"1 MB"}]"#;
        assert!(serde_json::from_str::<CatalogResponse>(raw).is_err());
    }

    #[test]
    fn empty_or_absent_presigned_url_counts_as_missing() {
        let absent: StreamUrlResponse = serde_json::from_str("{}").expect("absent");
        assert_eq!(absent.into_url(), None);

        let null: StreamUrlResponse =
            serde_json::from_str(r#"{"presigned_url":null}"#).expect("null");
        assert_eq!(null.into_url(), None);

        let empty: StreamUrlResponse =
            serde_json::from_str(r#"{"presigned_url":""}"#).expect("empty");
        assert_eq!(empty.into_url(), None);

        let present: StreamUrlResponse =
            serde_json::from_str(r#"{"presigned_url":"https://cdn/b"}"#).expect("present");
        assert_eq!(present.into_url().as_deref(), Some("https://cdn/b"));
    }
}
