//! Domain layer for Pairwise.
//!
//! Holds the types exchanged with the remote scoring service, the shared error
//! taxonomy, and the traits the other layers implement (`ScoringApi`,
//! `CredentialProvider`, `NavigationHistory`).

pub mod api;
pub mod comparison;
pub mod config;
pub mod credential;
pub mod error;
pub mod navigation;
pub mod rate_later;
pub mod rating;
pub mod video;

// Re-export common error type
pub use error::{PairwiseError, Result};

pub use api::{Paginated, ScoringApi, VideoFilter};
pub use comparison::{Comparison, ComparisonPairKey, ComparisonUpdate, CriteriaScore, VideoRef};
pub use credential::CredentialProvider;
pub use navigation::{NavigationHistory, NavigationParams, NavigationSync, VideoKey};
pub use rate_later::RateLaterEntry;
pub use rating::{ContributorRating, RatingMetadata};
pub use video::{Video, VideoStatistics};
