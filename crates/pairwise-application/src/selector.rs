//! Video selector: turns raw input into a slot value with rating metadata.

use pairwise_core::api::ScoringApi;
use pairwise_core::rating::{ContributorRating, RatingMetadata};
use pairwise_core::video::parse_video_input;
use pairwise_core::{PairwiseError, Result};
use serde::Serialize;
use std::sync::Arc;

/// One slot of the session.
///
/// `rating` stays `None` until its metadata fetch succeeds. An empty
/// `video_id` means the slot is unselected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoSelectorValue {
    pub video_id: String,
    pub rating: Option<RatingMetadata>,
}

impl VideoSelectorValue {
    /// A selected slot whose metadata has not arrived yet.
    pub fn pending(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            rating: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.video_id.is_empty()
    }

    pub fn is_public(&self) -> bool {
        self.rating.as_ref().is_some_and(|r| r.is_public)
    }
}

/// Outcome of a metadata fetch for one slot.
///
/// A failed fetch still yields a usable value (`rating: None`) together with a
/// warning describing why no statistics are available.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorResolution {
    pub value: VideoSelectorValue,
    pub warning: Option<String>,
}

impl SelectorResolution {
    fn degraded(video_id: &str, warning: String) -> Self {
        Self {
            value: VideoSelectorValue::pending(video_id),
            warning: Some(warning),
        }
    }
}

/// Resolves selector input against the scoring service.
#[derive(Clone)]
pub struct VideoSelector {
    api: Arc<dyn ScoringApi>,
    default_rating_public: bool,
}

impl VideoSelector {
    /// # Arguments
    ///
    /// * `api` - Scoring service client
    /// * `default_rating_public` - Visibility used when a contributor rating
    ///   has to be created for a newly selected video
    pub fn new(api: Arc<dyn ScoringApi>, default_rating_public: bool) -> Self {
        Self {
            api,
            default_rating_public,
        }
    }

    /// Parses `raw` and fetches metadata for the resulting identifier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `raw` is neither a video URL nor a bare
    /// identifier. No request is made in that case. Fetch failures are not
    /// errors: they come back as a degraded [`SelectorResolution`].
    pub async fn resolve(&self, raw: &str) -> Result<SelectorResolution> {
        let video_id = parse_video_input(raw)?;
        Ok(self.fetch_metadata(&video_id).await)
    }

    /// Fetches catalog statistics and the user's rating for `video_id`.
    pub async fn fetch_metadata(&self, video_id: &str) -> SelectorResolution {
        let statistics = match self.api.get_video(video_id).await {
            Ok(video) => video.statistics(),
            Err(e) => {
                tracing::warn!("[VideoSelector] Video {} lookup failed: {}", video_id, e);
                return SelectorResolution::degraded(video_id, no_statistics(&e));
            }
        };

        match self.contributor_rating(video_id).await {
            Ok(rating) => SelectorResolution {
                value: VideoSelectorValue {
                    video_id: video_id.to_string(),
                    rating: Some(RatingMetadata::from_rating(&rating, Some(statistics))),
                },
                warning: None,
            },
            Err(e) => {
                tracing::warn!("[VideoSelector] Rating for {} unavailable: {}", video_id, e);
                SelectorResolution::degraded(video_id, no_statistics(&e))
            }
        }
    }

    /// Gets the user's rating, creating it on first selection.
    async fn contributor_rating(&self, video_id: &str) -> Result<ContributorRating> {
        match self.api.get_contributor_rating(video_id).await {
            Err(e) if e.is_not_found() => {
                tracing::debug!(
                    "[VideoSelector] No rating for {} yet, creating (public: {})",
                    video_id,
                    self.default_rating_public
                );
                self.api
                    .create_contributor_rating(video_id, self.default_rating_public)
                    .await
            }
            other => other,
        }
    }
}

fn no_statistics(err: &PairwiseError) -> String {
    if err.is_unauthenticated() {
        "No statistics available: make sure you are logged in.".to_string()
    } else {
        format!("No statistics available: {}", err)
    }
}
