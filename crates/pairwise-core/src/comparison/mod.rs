//! Pairwise comparisons between two videos.

mod model;

pub use model::{Comparison, ComparisonPairKey, ComparisonUpdate, CriteriaScore, VideoRef};
