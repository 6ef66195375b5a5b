//! Create-or-update decision for a comparison draft.

use crate::notification::Notification;
use pairwise_core::PairwiseError;
use pairwise_core::api::ScoringApi;
use pairwise_core::comparison::Comparison;
use std::sync::Arc;

pub const MESSAGE_SUBMITTED: &str = "The comparison has been successfully submitted.";
pub const MESSAGE_CONFLICT: &str =
    "A comparison of these two videos already exists. Reload the pair to edit it.";
pub const MESSAGE_UNAUTHENTICATED: &str =
    "Your session has expired. Log in again to submit comparisons.";
pub const MESSAGE_FAILED: &str = "The comparison could not be submitted.";

/// Tagged result of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// No comparison existed; the service created this one.
    Created(Comparison),
    /// An existing comparison was updated.
    Updated(Comparison),
    /// Create was refused because the pair already has a comparison.
    Conflict,
    Unauthenticated,
    /// The draft was not submitted (wrong pair, session not ready).
    Rejected(String),
    Failed(PairwiseError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created(_) | Self::Updated(_))
    }

    /// The single notification shown for this outcome.
    pub fn notification(&self) -> Notification {
        match self {
            Self::Created(_) | Self::Updated(_) => Notification::success(MESSAGE_SUBMITTED),
            Self::Conflict => Notification::warning(MESSAGE_CONFLICT),
            Self::Unauthenticated => Notification::warning(MESSAGE_UNAUTHENTICATED),
            Self::Rejected(reason) => Notification::warning(reason.clone()),
            Self::Failed(e) => Notification::error(format!("{} {}", MESSAGE_FAILED, e)),
        }
    }
}

/// Sends a draft as a create or an update. Never retries.
#[derive(Clone)]
pub struct SubmissionResolver {
    api: Arc<dyn ScoringApi>,
}

impl SubmissionResolver {
    pub fn new(api: Arc<dyn ScoringApi>) -> Self {
        Self { api }
    }

    /// Updates when `initial` is known for the pair, creates otherwise.
    ///
    /// A `Conflict` on create is returned as is: the existing record has to
    /// be fetched again before it can be updated.
    pub async fn submit(
        &self,
        initial: Option<&Comparison>,
        draft: &Comparison,
    ) -> SubmissionOutcome {
        let pair = draft.pair();
        let result = match initial {
            Some(_) => {
                tracing::debug!("[SubmissionResolver] Updating comparison {}", pair);
                self.api
                    .update_comparison(&pair.video_a, &pair.video_b, &draft.to_update())
                    .await
                    .map(SubmissionOutcome::Updated)
            }
            None => {
                tracing::debug!("[SubmissionResolver] Creating comparison {}", pair);
                self.api
                    .create_comparison(draft)
                    .await
                    .map(SubmissionOutcome::Created)
            }
        };

        match result {
            Ok(outcome) => {
                tracing::info!("[SubmissionResolver] Comparison {} submitted", pair);
                outcome
            }
            Err(e) if e.is_conflict() => {
                tracing::warn!("[SubmissionResolver] Comparison {} already exists", pair);
                SubmissionOutcome::Conflict
            }
            Err(e) if e.is_unauthenticated() => {
                tracing::warn!("[SubmissionResolver] Not logged in, {} not submitted", pair);
                SubmissionOutcome::Unauthenticated
            }
            Err(e) => {
                tracing::error!("[SubmissionResolver] Submitting {} failed: {}", pair, e);
                SubmissionOutcome::Failed(e)
            }
        }
    }
}
