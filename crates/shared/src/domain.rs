use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! seq_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub u64);

        impl $name {
            pub fn next(self) -> Self {
                Self(self.0.wrapping_add(1))
            }
        }
    };
}

seq_newtype!(CatalogSeq);
seq_newtype!(SelectionSeq);

/// Key the catalog service uses to resolve a stream URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filename(pub String);

impl Filename {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Filename {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub title: String,
    pub filename: Filename,
    pub description: String,
    /// Human-readable, as reported by the service (e.g. "24 MB").
    pub size: String,
}

impl VideoSummary {
    pub fn new(
        title: impl Into<String>,
        filename: impl Into<String>,
        description: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            filename: Filename(filename.into()),
            description: description.into(),
            size: size.into(),
        }
    }
}
