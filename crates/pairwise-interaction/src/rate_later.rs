//! Rate-later queue helper used by the browser-extension surface.
//!
//! Queuing is two-phase: ensure the video exists in the catalog, then append
//! it to the personal queue. The second phase never runs if the first failed.

use pairwise_core::api::{Paginated, ScoringApi};
use pairwise_core::rate_later::RateLaterEntry;
use pairwise_core::{PairwiseError, Result};
use serde::Serialize;
use std::sync::Arc;

pub const MESSAGE_ADDED: &str = "Done!";
pub const MESSAGE_ALREADY_ADDED: &str = "Already added.";
pub const MESSAGE_FAILED: &str = "Failed.";
pub const MESSAGE_NOT_LOGGED_IN: &str = "Make sure you are logged in.";

/// Result shown to the user after a queue attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateLaterOutcome {
    pub success: bool,
    pub message: String,
}

impl RateLaterOutcome {
    fn new(success: bool, message: &str) -> Self {
        Self {
            success,
            message: message.to_string(),
        }
    }
}

/// Queues videos for later comparison.
#[derive(Clone)]
pub struct RateLaterHelper {
    api: Arc<dyn ScoringApi>,
}

impl RateLaterHelper {
    pub fn new(api: Arc<dyn ScoringApi>) -> Self {
        Self { api }
    }

    /// Ensures `video_id` is in the catalog, then appends it to the queue.
    ///
    /// An already-queued video counts as success with a distinct message.
    pub async fn add_rate_later(&self, video_id: &str) -> RateLaterOutcome {
        if let Err(e) = self.ensure_video(video_id).await {
            tracing::warn!(
                "[RateLaterHelper] Could not ensure video {} exists, not queuing: {}",
                video_id,
                e
            );
            return Self::failure(&e);
        }

        match self.api.add_rate_later(video_id).await {
            Ok(_) => {
                tracing::info!("[RateLaterHelper] Queued {}", video_id);
                RateLaterOutcome::new(true, MESSAGE_ADDED)
            }
            Err(e) if e.is_conflict() => {
                tracing::debug!("[RateLaterHelper] {} already queued", video_id);
                RateLaterOutcome::new(true, MESSAGE_ALREADY_ADDED)
            }
            Err(e) => {
                tracing::warn!("[RateLaterHelper] Failed to queue {}: {}", video_id, e);
                Self::failure(&e)
            }
        }
    }

    pub async fn list_rate_later(&self) -> Result<Paginated<RateLaterEntry>> {
        self.api.list_rate_later().await
    }

    pub async fn remove_rate_later(&self, video_id: &str) -> Result<()> {
        self.api.remove_rate_later(video_id).await?;
        tracing::info!("[RateLaterHelper] Removed {} from queue", video_id);
        Ok(())
    }

    /// Idempotent: a `Conflict` from the catalog means the video is already there.
    async fn ensure_video(&self, video_id: &str) -> Result<()> {
        match self.api.create_video(video_id).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_conflict() => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn failure(err: &PairwiseError) -> RateLaterOutcome {
        if err.is_unauthenticated() {
            RateLaterOutcome::new(false, MESSAGE_NOT_LOGGED_IN)
        } else {
            RateLaterOutcome::new(false, MESSAGE_FAILED)
        }
    }
}
