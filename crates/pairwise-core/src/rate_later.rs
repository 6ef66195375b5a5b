//! The personal rate-later queue.

use crate::video::Video;
use serde::{Deserialize, Serialize};

/// One queued video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLaterEntry {
    pub video: Video,
    #[serde(default)]
    pub created_at: Option<String>,
}
