//! In-memory `ScoringApi` for unit tests, with gates to control the order in
//! which requests resolve.

use async_trait::async_trait;
use pairwise_core::api::{Paginated, ScoringApi, VideoFilter};
use pairwise_core::comparison::{Comparison, ComparisonPairKey, ComparisonUpdate};
use pairwise_core::rate_later::RateLaterEntry;
use pairwise_core::rating::ContributorRating;
use pairwise_core::video::Video;
use pairwise_core::{PairwiseError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, oneshot};

/// Handle for a held request: `started` fires when the request arrives,
/// sending on `release` lets it complete.
pub struct Gate {
    pub started: Arc<Notify>,
    pub release: oneshot::Sender<()>,
}

struct Held {
    started: Arc<Notify>,
    release: oneshot::Receiver<()>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetComparison(ComparisonPairKey),
    CreateComparison(ComparisonPairKey),
    UpdateComparison(ComparisonPairKey),
    GetVideo(String),
    GetRating(String),
    CreateRating(String, bool),
}

#[derive(Default)]
pub struct MockScoringApi {
    comparisons: Mutex<HashMap<ComparisonPairKey, Comparison>>,
    ratings: Mutex<HashMap<String, ContributorRating>>,
    video_errors: Mutex<HashMap<String, PairwiseError>>,
    comparison_error: Mutex<Option<PairwiseError>>,
    create_error: Mutex<Option<PairwiseError>>,
    update_error: Mutex<Option<PairwiseError>>,
    comparison_gates: Mutex<HashMap<ComparisonPairKey, Held>>,
    video_gates: Mutex<HashMap<String, Held>>,
    calls: Mutex<Vec<Call>>,
}

impl MockScoringApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert_comparison(&self, comparison: Comparison) {
        self.comparisons
            .lock()
            .unwrap()
            .insert(comparison.pair(), comparison);
    }

    pub fn insert_rating(&self, video_id: &str, is_public: bool, n_comparisons: u32) {
        self.ratings.lock().unwrap().insert(
            video_id.to_string(),
            ContributorRating {
                video: Video::with_id(video_id),
                is_public,
                n_comparisons,
            },
        );
    }

    pub fn fail_video(&self, video_id: &str, err: PairwiseError) {
        self.video_errors
            .lock()
            .unwrap()
            .insert(video_id.to_string(), err);
    }

    pub fn fail_get_comparison(&self, err: PairwiseError) {
        *self.comparison_error.lock().unwrap() = Some(err);
    }

    pub fn fail_create(&self, err: PairwiseError) {
        *self.create_error.lock().unwrap() = Some(err);
    }

    pub fn fail_update(&self, err: PairwiseError) {
        *self.update_error.lock().unwrap() = Some(err);
    }

    /// Holds the next `get_comparison` for `pair` until released.
    pub fn hold_comparison(&self, pair: ComparisonPairKey) -> Gate {
        let (gate, held) = new_gate();
        self.comparison_gates.lock().unwrap().insert(pair, held);
        gate
    }

    /// Holds the next `get_video` for `video_id` until released.
    pub fn hold_video(&self, video_id: &str) -> Gate {
        let (gate, held) = new_gate();
        self.video_gates
            .lock()
            .unwrap()
            .insert(video_id.to_string(), held);
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn stored_comparison(&self, pair: &ComparisonPairKey) -> Option<Comparison> {
        self.comparisons.lock().unwrap().get(pair).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn new_gate() -> (Gate, Held) {
    let started = Arc::new(Notify::new());
    let (release, receiver) = oneshot::channel();
    (
        Gate {
            started: started.clone(),
            release,
        },
        Held {
            started,
            release: receiver,
        },
    )
}

async fn pass_gate(held: Option<Held>) {
    if let Some(held) = held {
        held.started.notify_one();
        let _ = held.release.await;
    }
}

fn unused<T>() -> Result<T> {
    Err(PairwiseError::internal("not used by the session"))
}

#[async_trait]
impl ScoringApi for MockScoringApi {
    async fn get_comparison(&self, video_a: &str, video_b: &str) -> Result<Comparison> {
        let pair = ComparisonPairKey::new(video_a, video_b);
        self.record(Call::GetComparison(pair.clone()));
        let held = self.comparison_gates.lock().unwrap().remove(&pair);
        pass_gate(held).await;

        if let Some(err) = self.comparison_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.comparisons
            .lock()
            .unwrap()
            .get(&pair)
            .cloned()
            .ok_or_else(|| PairwiseError::not_found("comparison", pair.to_string()))
    }

    async fn create_comparison(&self, comparison: &Comparison) -> Result<Comparison> {
        let pair = comparison.pair();
        self.record(Call::CreateComparison(pair.clone()));
        if let Some(err) = self.create_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut comparisons = self.comparisons.lock().unwrap();
        if comparisons.contains_key(&pair) {
            return Err(PairwiseError::conflict("comparison", pair.to_string()));
        }
        comparisons.insert(pair, comparison.clone());
        Ok(comparison.clone())
    }

    async fn update_comparison(
        &self,
        video_a: &str,
        video_b: &str,
        update: &ComparisonUpdate,
    ) -> Result<Comparison> {
        let pair = ComparisonPairKey::new(video_a, video_b);
        self.record(Call::UpdateComparison(pair.clone()));
        if let Some(err) = self.update_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut comparisons = self.comparisons.lock().unwrap();
        let existing = comparisons
            .get_mut(&pair)
            .ok_or_else(|| PairwiseError::not_found("comparison", pair.to_string()))?;
        existing.apply_update(update);
        Ok(existing.clone())
    }

    async fn list_comparisons(&self, _video_id: Option<&str>) -> Result<Paginated<Comparison>> {
        unused()
    }

    async fn get_video(&self, video_id: &str) -> Result<Video> {
        self.record(Call::GetVideo(video_id.to_string()));
        let held = self.video_gates.lock().unwrap().remove(video_id);
        pass_gate(held).await;

        if let Some(err) = self.video_errors.lock().unwrap().get(video_id).cloned() {
            return Err(err);
        }
        let mut video = Video::with_id(video_id);
        video.rating_n_ratings = 2;
        video.rating_n_contributors = 1;
        Ok(video)
    }

    async fn find_videos(&self, _filter: &VideoFilter) -> Result<Paginated<Video>> {
        unused()
    }

    async fn create_video(&self, _video_id: &str) -> Result<Video> {
        unused()
    }

    async fn get_contributor_rating(&self, video_id: &str) -> Result<ContributorRating> {
        self.record(Call::GetRating(video_id.to_string()));
        self.ratings
            .lock()
            .unwrap()
            .get(video_id)
            .cloned()
            .ok_or_else(|| PairwiseError::not_found("contributor_rating", video_id))
    }

    async fn create_contributor_rating(
        &self,
        video_id: &str,
        is_public: bool,
    ) -> Result<ContributorRating> {
        self.record(Call::CreateRating(video_id.to_string(), is_public));
        let rating = ContributorRating {
            video: Video::with_id(video_id),
            is_public,
            n_comparisons: 0,
        };
        self.ratings
            .lock()
            .unwrap()
            .insert(video_id.to_string(), rating.clone());
        Ok(rating)
    }

    async fn set_rating_visibility(
        &self,
        _video_id: &str,
        _is_public: bool,
    ) -> Result<ContributorRating> {
        unused()
    }

    async fn set_all_ratings_visibility(&self, _is_public: bool) -> Result<()> {
        unused()
    }

    async fn list_rate_later(&self) -> Result<Paginated<RateLaterEntry>> {
        unused()
    }

    async fn add_rate_later(&self, _video_id: &str) -> Result<RateLaterEntry> {
        unused()
    }

    async fn remove_rate_later(&self, _video_id: &str) -> Result<()> {
        unused()
    }
}
