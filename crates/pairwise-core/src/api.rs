//! Contract of the remote scoring service.
//!
//! Every method is a single request/response. Nothing is retried here; callers
//! decide whether and when to try again.

use crate::comparison::{Comparison, ComparisonUpdate};
use crate::error::Result;
use crate::rate_later::RateLaterEntry;
use crate::rating::ContributorRating;
use crate::video::Video;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A page of results from a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn single_page(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }
}

/// Catalog filter for [`ScoringApi::find_videos`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub video_id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl VideoFilter {
    pub fn by_video_id(video_id: impl Into<String>) -> Self {
        Self {
            video_id: Some(video_id.into()),
            ..Self::default()
        }
    }

    /// Query pairs in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(video_id) = &self.video_id {
            query.push(("video_id", video_id.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

/// Typed request/response boundary to the scoring service.
///
/// All operations fail with `Unauthenticated` when no valid credential is
/// attached; implementations must not fold that into `NotFound`.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    // ------------------------------------------------------------------
    // Comparisons
    // ------------------------------------------------------------------

    /// Retrieves the current user's comparison for the ordered pair.
    ///
    /// Returns `NotFound` when the user has not compared this pair yet.
    async fn get_comparison(&self, video_a: &str, video_b: &str) -> Result<Comparison>;

    /// Creates a comparison. Fails with `Conflict` if one already exists.
    async fn create_comparison(&self, comparison: &Comparison) -> Result<Comparison>;

    /// Replaces the scores and duration of an existing comparison.
    async fn update_comparison(
        &self,
        video_a: &str,
        video_b: &str,
        update: &ComparisonUpdate,
    ) -> Result<Comparison>;

    /// Lists the current user's comparisons, optionally only those involving `video_id`.
    async fn list_comparisons(&self, video_id: Option<&str>) -> Result<Paginated<Comparison>>;

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// Looks up one video. Fails with `NotFound` if the service does not know it.
    async fn get_video(&self, video_id: &str) -> Result<Video>;

    /// Catalog search.
    async fn find_videos(&self, filter: &VideoFilter) -> Result<Paginated<Video>>;

    /// Adds a video to the catalog. `Conflict` means it was already there.
    async fn create_video(&self, video_id: &str) -> Result<Video>;

    // ------------------------------------------------------------------
    // Contributor ratings
    // ------------------------------------------------------------------

    async fn get_contributor_rating(&self, video_id: &str) -> Result<ContributorRating>;

    async fn create_contributor_rating(
        &self,
        video_id: &str,
        is_public: bool,
    ) -> Result<ContributorRating>;

    async fn set_rating_visibility(
        &self,
        video_id: &str,
        is_public: bool,
    ) -> Result<ContributorRating>;

    /// Marks every rating of the current user public or private.
    async fn set_all_ratings_visibility(&self, is_public: bool) -> Result<()>;

    // ------------------------------------------------------------------
    // Rate-later queue
    // ------------------------------------------------------------------

    async fn list_rate_later(&self) -> Result<Paginated<RateLaterEntry>>;

    /// Appends to the queue. `Conflict` means the video is already queued.
    async fn add_rate_later(&self, video_id: &str) -> Result<RateLaterEntry>;

    async fn remove_rate_later(&self, video_id: &str) -> Result<()>;
}
