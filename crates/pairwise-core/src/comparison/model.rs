use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a video inside a comparison payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoRef {
    pub video_id: String,
}

impl VideoRef {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
        }
    }
}

/// One per-criterion judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaScore {
    pub criteria: String,
    pub score: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl CriteriaScore {
    pub fn new(criteria: impl Into<String>, score: f64) -> Self {
        Self {
            criteria: criteria.into(),
            score,
            weight: default_weight(),
        }
    }
}

/// A scored preference judgment between `video_a` and `video_b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub video_a: VideoRef,
    pub video_b: VideoRef,
    pub criteria_scores: Vec<CriteriaScore>,
    #[serde(default)]
    pub duration_ms: u64,
}

impl Comparison {
    pub fn new(
        video_a: impl Into<String>,
        video_b: impl Into<String>,
        criteria_scores: Vec<CriteriaScore>,
        duration_ms: u64,
    ) -> Self {
        Self {
            video_a: VideoRef::new(video_a),
            video_b: VideoRef::new(video_b),
            criteria_scores,
            duration_ms,
        }
    }

    /// The ordered pair this comparison is addressed by.
    pub fn pair(&self) -> ComparisonPairKey {
        ComparisonPairKey::new(&self.video_a.video_id, &self.video_b.video_id)
    }

    /// The partial body sent when updating an existing comparison.
    pub fn to_update(&self) -> ComparisonUpdate {
        ComparisonUpdate {
            criteria_scores: self.criteria_scores.clone(),
            duration_ms: self.duration_ms,
        }
    }

    /// Replaces scores and duration, keeping the pair.
    pub fn apply_update(&mut self, update: &ComparisonUpdate) {
        self.criteria_scores = update.criteria_scores.clone();
        self.duration_ms = update.duration_ms;
    }
}

/// Fields that can change on an existing comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonUpdate {
    pub criteria_scores: Vec<CriteriaScore>,
    #[serde(default)]
    pub duration_ms: u64,
}

/// Ordered `(video_a, video_b)` pair.
///
/// Roles are fixed: `(x, y)` and `(y, x)` are different sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonPairKey {
    pub video_a: String,
    pub video_b: String,
}

impl ComparisonPairKey {
    pub fn new(video_a: impl Into<String>, video_b: impl Into<String>) -> Self {
        Self {
            video_a: video_a.into(),
            video_b: video_b.into(),
        }
    }

    /// Both identifiers are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.video_a.is_empty() && !self.video_b.is_empty()
    }
}

impl fmt::Display for ComparisonPairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.video_a, self.video_b)
    }
}
