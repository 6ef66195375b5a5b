//! Resolution of raw user input to a canonical video identifier.

use crate::error::{PairwiseError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Length of a canonical video identifier.
pub const VIDEO_ID_LEN: usize = 11;

static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!("^[A-Za-z0-9_-]{{{VIDEO_ID_LEN}}}$");
    Regex::new(&pattern).expect("video id pattern is valid")
});

const WATCH_HOSTS: [&str; 4] = [
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
];
const SHORT_HOST: &str = "youtu.be";
const PATH_PREFIXES: [&str; 4] = ["embed", "shorts", "v", "live"];

/// Returns true when `candidate` has the shape of a bare identifier.
pub fn is_valid_video_id(candidate: &str) -> bool {
    VIDEO_ID_RE.is_match(candidate)
}

/// Parses a full video-platform URL or a bare identifier.
///
/// Surrounding whitespace is ignored. URLs without a scheme are accepted.
///
/// # Errors
///
/// Returns `InvalidInput` if the input matches neither form.
pub fn parse_video_input(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PairwiseError::invalid_input("empty video reference"));
    }

    if is_valid_video_id(trimmed) {
        return Ok(trimmed.to_string());
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|_| PairwiseError::invalid_input(format!("not a video URL or ID: {}", trimmed)))?;

    extract_from_url(&url)
        .filter(|id| is_valid_video_id(id))
        .ok_or_else(|| PairwiseError::invalid_input(format!("not a video URL or ID: {}", trimmed)))
}

fn extract_from_url(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    if host == SHORT_HOST {
        return segments.next().map(str::to_string);
    }

    if !WATCH_HOSTS.contains(&host.as_str()) {
        return None;
    }

    match segments.next()? {
        "watch" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned()),
        prefix if PATH_PREFIXES.contains(&prefix) => segments.next().map(str::to_string),
        _ => None,
    }
}
