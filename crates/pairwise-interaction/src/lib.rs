//! Remote interaction layer: the REST client for the scoring service and the
//! rate-later queue helper built on it.

pub mod http_client;
pub mod rate_later;

pub use http_client::HttpScoringClient;
pub use rate_later::{RateLaterHelper, RateLaterOutcome};
