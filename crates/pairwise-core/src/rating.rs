//! Contributor ratings: the per-user record attached to a video once the user
//! starts comparing it.

use crate::video::{Video, VideoStatistics};
use serde::{Deserialize, Serialize};

/// The current user's rating of one video, as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorRating {
    pub video: Video,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub n_comparisons: u32,
}

/// Rating metadata held by a selector slot once its fetch succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingMetadata {
    pub is_public: bool,
    pub n_comparisons: u32,
    /// Public aggregates from the catalog, absent when the catalog lookup failed.
    pub statistics: Option<VideoStatistics>,
}

impl RatingMetadata {
    pub fn from_rating(rating: &ContributorRating, statistics: Option<VideoStatistics>) -> Self {
        Self {
            is_public: rating.is_public,
            n_comparisons: rating.n_comparisons,
            statistics,
        }
    }
}
