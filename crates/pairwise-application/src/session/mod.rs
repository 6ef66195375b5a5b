//! Comparison session: two selector slots, the existing comparison for the
//! selected pair, and submission.

mod controller;
mod state;

pub use controller::{ComparisonSession, SessionOptions};
pub use state::{SessionState, SessionView};
