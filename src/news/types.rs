use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A headline as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub image: Option<String>,
}

/// Cache key for one listing request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewsKey {
    pub feed: String,
    pub limit: u32,
}

impl NewsKey {
    pub fn new(feed: impl Into<String>, limit: u32) -> Self {
        Self {
            feed: feed.into(),
            limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
    /// Fullname of the last post, used to request the next page.
    pub after: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingChild {
    pub kind: String,
    pub data: RawPost,
}

/// The subset of a `t3` submission the dashboard reads.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub stickied: bool,
    pub thumbnail: Option<String>,
    pub preview: Option<Preview>,
    /// Gallery media keyed by media id. Kept as a JSON map so document
    /// order survives (serde_json is built with `preserve_order`).
    pub media_metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewImage {
    pub source: Option<ImageSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSource {
    pub url: Option<String>,
}

/// One `media_metadata` entry. `s` is the full-size rendition, `p` the
/// preview renditions from smallest to largest.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDescriptor {
    pub s: Option<MediaRendition>,
    #[serde(default)]
    pub p: Vec<MediaRendition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaRendition {
    pub u: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
    pub error: Option<String>,
}
