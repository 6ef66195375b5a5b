//! Videos in the remote catalog and parsing of user-supplied identifiers.

pub mod id;
pub mod model;

pub use id::{VIDEO_ID_LEN, is_valid_video_id, parse_video_input};
pub use model::{Video, VideoStatistics};
