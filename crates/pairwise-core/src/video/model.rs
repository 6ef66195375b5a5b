use serde::{Deserialize, Serialize};

/// A video as returned by the catalog endpoints.
///
/// Only `video_id` is guaranteed; every other field is filled by the service
/// once it has fetched the upstream metadata, so all of them default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub rating_n_ratings: u32,
    #[serde(default)]
    pub rating_n_contributors: u32,
    #[serde(default)]
    pub tournesol_score: Option<f64>,
}

impl Video {
    /// Creates a catalog entry that only carries its identifier.
    pub fn with_id(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            name: String::new(),
            uploader: None,
            publication_date: None,
            views: None,
            rating_n_ratings: 0,
            rating_n_contributors: 0,
            tournesol_score: None,
        }
    }

    /// Public rating aggregates of this video.
    pub fn statistics(&self) -> VideoStatistics {
        VideoStatistics {
            n_ratings: self.rating_n_ratings,
            n_contributors: self.rating_n_contributors,
            score: self.tournesol_score,
        }
    }
}

/// Public aggregates computed server-side across all contributors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoStatistics {
    pub n_ratings: u32,
    pub n_contributors: u32,
    pub score: Option<f64>,
}
