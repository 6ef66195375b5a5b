//! Query-string representation of the selected pair.
//!
//! Two parameters, `videoA` and `videoB`, carry the session so it can be
//! shared and bookmarked. An absent parameter means the slot is unselected.

use std::fmt;
use std::sync::Arc;
use url::form_urlencoded;

/// Browser-like history the session is synchronized with.
///
/// `push` records a new entry for the given query string without reloading
/// anything; the session picks up back/forward moves through
/// `ComparisonSession::on_navigation_changed`.
pub trait NavigationHistory: Send + Sync {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    /// Records a new history entry carrying `query`.
    fn push(&self, query: String);
}

/// Which of the two slots a parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoKey {
    A,
    B,
}

impl VideoKey {
    pub fn param(self) -> &'static str {
        match self {
            VideoKey::A => "videoA",
            VideoKey::B => "videoB",
        }
    }
}

impl fmt::Display for VideoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Both parameters as read from navigation. Missing parameters are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    pub video_a: String,
    pub video_b: String,
}

impl NavigationParams {
    pub fn get(&self, key: VideoKey) -> &str {
        match key {
            VideoKey::A => &self.video_a,
            VideoKey::B => &self.video_b,
        }
    }
}

/// Reads and writes the two slot parameters on a [`NavigationHistory`].
#[derive(Clone)]
pub struct NavigationSync {
    history: Arc<dyn NavigationHistory>,
}

impl NavigationSync {
    pub fn new(history: Arc<dyn NavigationHistory>) -> Self {
        Self { history }
    }

    /// Parses the current parameters.
    pub fn read(&self) -> NavigationParams {
        let query = self.history.query();
        NavigationParams {
            video_a: lookup(&query, VideoKey::A).unwrap_or_default(),
            video_b: lookup(&query, VideoKey::B).unwrap_or_default(),
        }
    }

    /// Sets one parameter, leaving every other parameter untouched.
    ///
    /// An empty `video_id` removes the parameter. Writing the value already
    /// present does nothing. Returns whether a history entry was pushed.
    pub fn write(&self, key: VideoKey, video_id: &str) -> bool {
        let history_query = self.history.query();
        let query = history_query.trim_start_matches('?');
        let current = lookup(query, key).unwrap_or_default();
        if current == video_id {
            return false;
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            if name != key.param() {
                serializer.append_pair(&name, &value);
            }
        }
        if !video_id.is_empty() {
            serializer.append_pair(key.param(), video_id);
        }

        let next = serializer.finish();
        tracing::debug!("[NavigationSync] {} -> '{}' (query: {})", key, video_id, next);
        self.history.push(next);
        true
    }
}

fn lookup(query: &str, key: VideoKey) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(name, _)| name == key.param())
        .map(|(_, value)| value.into_owned())
}
