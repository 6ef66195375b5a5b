use super::state::{SessionState, SessionView};
use crate::notification::{Notification, Notifier};
use crate::selector::{SelectorResolution, VideoSelector, VideoSelectorValue};
use crate::submission::{SubmissionOutcome, SubmissionResolver};
use futures::future::join_all;
use pairwise_core::{PairwiseError, Result};
use pairwise_core::api::ScoringApi;
use pairwise_core::comparison::{Comparison, ComparisonPairKey};
use pairwise_core::navigation::{NavigationSync, VideoKey};
use pairwise_core::video::parse_video_input;
use std::sync::Arc;
use tokio::sync::RwLock;

const REJECT_NOT_READY: &str = "Select two rated videos before submitting a comparison.";
const REJECT_OTHER_PAIR: &str = "The comparison does not match the selected videos.";

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Visibility of contributor ratings created when a video is first selected.
    pub default_rating_public: bool,
}

/// Existing-comparison fetch in flight. Applies only while `seq` is the
/// latest issued and `pair` is still the selected pair.
#[derive(Debug, Clone)]
struct ComparisonTicket {
    seq: u64,
    pair: ComparisonPairKey,
}

/// Metadata fetch in flight for one slot.
#[derive(Debug, Clone)]
struct MetadataTicket {
    key: VideoKey,
    seq: u64,
    video_id: String,
}

#[derive(Debug, Default)]
struct SessionInner {
    state: SessionState,
    comparison_seq: u64,
    inflight_pair: Option<ComparisonPairKey>,
    fetched_pair: Option<ComparisonPairKey>,
    slot_seq: [u64; 2],
}

fn slot_index(key: VideoKey) -> usize {
    match key {
        VideoKey::A => 0,
        VideoKey::B => 1,
    }
}

impl SessionInner {
    /// Optimistically replaces a slot's identifier. Returns whether it changed.
    fn set_identifier(&mut self, key: VideoKey, video_id: &str) -> bool {
        if self.state.selector(key).video_id == video_id {
            return false;
        }
        *self.state.selector_mut(key) = VideoSelectorValue::pending(video_id);
        self.slot_seq[slot_index(key)] += 1;
        self.state.submitted = false;
        true
    }

    fn begin_metadata(&mut self, key: VideoKey) -> Option<MetadataTicket> {
        let video_id = self.state.selector(key).video_id.clone();
        if video_id.is_empty() {
            return None;
        }
        let seq = &mut self.slot_seq[slot_index(key)];
        *seq += 1;
        Some(MetadataTicket {
            key,
            seq: *seq,
            video_id,
        })
    }

    fn finish_metadata(&mut self, ticket: &MetadataTicket, value: VideoSelectorValue) -> bool {
        let current = self.state.selector(ticket.key);
        if self.slot_seq[slot_index(ticket.key)] != ticket.seq
            || current.video_id != ticket.video_id
        {
            return false;
        }
        *self.state.selector_mut(ticket.key) = value;
        true
    }

    /// Starts an existing-comparison fetch if the selected pair needs one.
    ///
    /// An incomplete pair invalidates any outstanding fetch. `force` issues a
    /// new fetch even if one is in flight or done for this pair; the older
    /// one then goes stale.
    fn begin_comparison_fetch(&mut self, force: bool) -> Option<ComparisonTicket> {
        let pair = self.state.pair();
        if !pair.is_complete() {
            self.comparison_seq += 1;
            self.inflight_pair = None;
            self.fetched_pair = None;
            self.state.initial_comparison = None;
            self.state.is_loading = false;
            return None;
        }
        if !force {
            if self.inflight_pair.as_ref() == Some(&pair) {
                return None;
            }
            if self.inflight_pair.is_none() && self.fetched_pair.as_ref() == Some(&pair) {
                return None;
            }
        }

        self.comparison_seq += 1;
        self.inflight_pair = Some(pair.clone());
        self.state.initial_comparison = None;
        self.state.is_loading = true;
        Some(ComparisonTicket {
            seq: self.comparison_seq,
            pair,
        })
    }

    fn finish_comparison_fetch(
        &mut self,
        ticket: &ComparisonTicket,
        result: Option<Comparison>,
    ) -> bool {
        if ticket.seq != self.comparison_seq || self.state.pair() != ticket.pair {
            return false;
        }
        self.state.initial_comparison = result;
        self.state.is_loading = false;
        self.inflight_pair = None;
        self.fetched_pair = Some(ticket.pair.clone());
        true
    }
}

/// Controller for one comparison view.
///
/// Sole owner of [`SessionState`]. Every network call runs with the state
/// lock released; results are applied afterwards only if they still match
/// the selection they were issued for.
#[derive(Clone)]
pub struct ComparisonSession {
    inner: Arc<RwLock<SessionInner>>,
    api: Arc<dyn ScoringApi>,
    selector: VideoSelector,
    resolver: SubmissionResolver,
    navigation: NavigationSync,
    notifier: Arc<dyn Notifier>,
}

impl ComparisonSession {
    /// Creates the session seeded from the current navigation parameters.
    ///
    /// Nothing is fetched until [`load`](Self::load) is called.
    pub fn mount(
        api: Arc<dyn ScoringApi>,
        navigation: NavigationSync,
        notifier: Arc<dyn Notifier>,
        options: SessionOptions,
    ) -> Self {
        let params = navigation.read();
        tracing::debug!(
            "[ComparisonSession] Mounted with videoA='{}' videoB='{}'",
            params.video_a,
            params.video_b
        );
        let inner = SessionInner {
            state: SessionState {
                selector_a: VideoSelectorValue::pending(params.video_a),
                selector_b: VideoSelectorValue::pending(params.video_b),
                ..SessionState::default()
            },
            ..SessionInner::default()
        };

        Self {
            inner: Arc::new(RwLock::new(inner)),
            selector: VideoSelector::new(api.clone(), options.default_rating_public),
            resolver: SubmissionResolver::new(api.clone()),
            api,
            navigation,
            notifier,
        }
    }

    /// Fetches metadata for the seeded slots and the existing comparison.
    pub async fn load(&self) {
        let (metadata, comparison) = {
            let mut inner = self.inner.write().await;
            let metadata: Vec<_> = [VideoKey::A, VideoKey::B]
                .into_iter()
                .filter_map(|key| inner.begin_metadata(key))
                .collect();
            (metadata, inner.begin_comparison_fetch(false))
        };

        let metadata_jobs = join_all(metadata.into_iter().map(|t| self.run_metadata(t)));
        futures::join!(metadata_jobs, self.run_comparison(comparison));
    }

    /// Applies user input to one slot.
    ///
    /// The identifier is shown immediately and written to navigation; its
    /// metadata and, when the pair is complete, the existing comparison are
    /// fetched concurrently.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for unparseable input. The slot, navigation and
    /// every other piece of state are left as they were.
    pub async fn edit_selector(&self, key: VideoKey, raw: &str) -> Result<SelectorResolution> {
        let video_id = parse_video_input(raw)?;

        let (metadata, comparison) = {
            let mut inner = self.inner.write().await;
            inner.set_identifier(key, &video_id);
            self.navigation.write(key, &video_id);
            (inner.begin_metadata(key), inner.begin_comparison_fetch(false))
        };
        let metadata =
            metadata.ok_or_else(|| PairwiseError::internal("parsed video id is empty"))?;

        let (resolution, _) =
            futures::join!(self.run_metadata(metadata), self.run_comparison(comparison));
        Ok(resolution)
    }

    /// Empties a slot and removes its navigation parameter.
    pub async fn clear_slot(&self, key: VideoKey) {
        let mut inner = self.inner.write().await;
        if inner.set_identifier(key, "") {
            tracing::debug!("[ComparisonSession] Cleared {}", key);
        }
        self.navigation.write(key, "");
        inner.begin_comparison_fetch(false);
    }

    /// Re-reads navigation (back/forward) and applies any identifier changes.
    ///
    /// Navigation is not written back.
    pub async fn on_navigation_changed(&self) {
        let params = self.navigation.read();
        let (metadata, comparison) = {
            let mut inner = self.inner.write().await;
            let changed: Vec<_> = [VideoKey::A, VideoKey::B]
                .into_iter()
                .filter(|&key| inner.set_identifier(key, params.get(key)))
                .collect();
            if changed.is_empty() {
                return;
            }
            tracing::debug!("[ComparisonSession] Navigation moved to {}", inner.state.pair());
            let metadata: Vec<_> = changed
                .into_iter()
                .filter_map(|key| inner.begin_metadata(key))
                .collect();
            (metadata, inner.begin_comparison_fetch(false))
        };

        let metadata_jobs = join_all(metadata.into_iter().map(|t| self.run_metadata(t)));
        futures::join!(metadata_jobs, self.run_comparison(comparison));
    }

    /// Fetches the existing comparison for the current pair again.
    pub async fn reload_comparison(&self) {
        let ticket = self.inner.write().await.begin_comparison_fetch(true);
        self.run_comparison(ticket).await;
    }

    /// Submits `draft` as a create or an update and notifies once.
    ///
    /// The draft must be for the selected pair and the view must be ready.
    /// Only successful outcomes change state; the result is dropped if the
    /// pair changed while the request was in flight.
    pub async fn submit(&self, draft: &Comparison) -> SubmissionOutcome {
        let checked = {
            let inner = self.inner.read().await;
            if !inner.state.view().is_ready() {
                Err(REJECT_NOT_READY)
            } else if draft.pair() != inner.state.pair() {
                Err(REJECT_OTHER_PAIR)
            } else {
                Ok((inner.state.initial_comparison.clone(), inner.state.pair()))
            }
        };

        let outcome = match checked {
            Err(reason) => {
                tracing::warn!("[ComparisonSession] Submission rejected: {}", reason);
                SubmissionOutcome::Rejected(reason.to_string())
            }
            Ok((initial, pair)) => {
                let outcome = self.resolver.submit(initial.as_ref(), draft).await;
                self.apply_submission(&pair, draft, &outcome).await;
                outcome
            }
        };

        self.notifier.notify(outcome.notification());
        outcome
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.read().await.state.clone()
    }

    pub async fn view(&self) -> SessionView {
        self.inner.read().await.state.view()
    }

    async fn apply_submission(
        &self,
        pair: &ComparisonPairKey,
        draft: &Comparison,
        outcome: &SubmissionOutcome,
    ) {
        let mut inner = self.inner.write().await;
        if inner.state.pair() != *pair {
            tracing::debug!(
                "[ComparisonSession] Pair changed during submission of {}, not applying",
                pair
            );
            return;
        }

        match outcome {
            SubmissionOutcome::Created(created) => {
                inner.comparison_seq += 1;
                inner.inflight_pair = None;
                inner.fetched_pair = Some(pair.clone());
                inner.state.is_loading = false;
                inner.state.initial_comparison = Some(created.clone());
                inner.state.submitted = true;
            }
            SubmissionOutcome::Updated(_) => {
                if let Some(initial) = inner.state.initial_comparison.as_mut() {
                    initial.apply_update(&draft.to_update());
                }
            }
            _ => {}
        }
    }

    async fn run_metadata(&self, ticket: MetadataTicket) -> SelectorResolution {
        let resolution = self.selector.fetch_metadata(&ticket.video_id).await;

        let applied = self
            .inner
            .write()
            .await
            .finish_metadata(&ticket, resolution.value.clone());
        if !applied {
            tracing::debug!(
                "[ComparisonSession] Dropping stale metadata for {} ({})",
                ticket.key,
                ticket.video_id
            );
        } else if let Some(warning) = &resolution.warning {
            self.notifier.notify(Notification::warning(warning.clone()));
        }
        resolution
    }

    /// Runs the fetch on its own task, so it completes and clears
    /// `is_loading` even when the calling future is dropped.
    async fn run_comparison(&self, ticket: Option<ComparisonTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        let session = self.clone();
        let task = tokio::spawn(async move { session.fetch_comparison(ticket).await });
        if let Err(e) = task.await {
            tracing::error!("[ComparisonSession] Comparison fetch task failed: {}", e);
        }
    }

    async fn fetch_comparison(&self, ticket: ComparisonTicket) {
        let pair = &ticket.pair;

        let mut unauthenticated = false;
        let result = match self.api.get_comparison(&pair.video_a, &pair.video_b).await {
            Ok(comparison) => Some(comparison),
            Err(e) if e.is_not_found() => {
                tracing::debug!("[ComparisonSession] No comparison yet for {}", pair);
                None
            }
            Err(e) if e.is_transport() => {
                tracing::warn!(
                    "[ComparisonSession] Service unreachable for {}, treating as none: {}",
                    pair,
                    e
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    "[ComparisonSession] Comparison fetch for {} failed, treating as none: {}",
                    pair,
                    e
                );
                unauthenticated = e.is_unauthenticated();
                None
            }
        };

        let applied = self
            .inner
            .write()
            .await
            .finish_comparison_fetch(&ticket, result);
        if !applied {
            tracing::debug!("[ComparisonSession] Dropping stale comparison for {}", pair);
        } else if unauthenticated {
            self.notifier.notify(Notification::warning(
                "Log in again to load your existing comparison.",
            ));
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
