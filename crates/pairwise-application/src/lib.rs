//! Application layer for Pairwise.
//!
//! Coordinates the scoring service, navigation and notifications into the
//! comparison session the presentation layer drives.

pub mod notification;
pub mod selector;
pub mod session;
pub mod submission;

#[cfg(test)]
mod testing;

pub use notification::{
    CollectingNotifier, Notification, NotificationLevel, Notifier, TracingNotifier,
};
pub use selector::{SelectorResolution, VideoSelector, VideoSelectorValue};
pub use session::{ComparisonSession, SessionOptions, SessionState, SessionView};
pub use submission::{SubmissionOutcome, SubmissionResolver};
