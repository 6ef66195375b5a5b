use crate::selector::VideoSelectorValue;
use pairwise_core::comparison::{Comparison, ComparisonPairKey};
use pairwise_core::navigation::VideoKey;
use serde::Serialize;

/// Everything the comparison view renders from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub selector_a: VideoSelectorValue,
    pub selector_b: VideoSelectorValue,
    /// Existing comparison for the current pair, if the service has one.
    pub initial_comparison: Option<Comparison>,
    /// True while the existing-comparison fetch for the current pair is outstanding.
    pub is_loading: bool,
    /// Set after a comparison was created in this session.
    pub submitted: bool,
}

impl SessionState {
    pub fn selector(&self, key: VideoKey) -> &VideoSelectorValue {
        match key {
            VideoKey::A => &self.selector_a,
            VideoKey::B => &self.selector_b,
        }
    }

    pub fn selector_mut(&mut self, key: VideoKey) -> &mut VideoSelectorValue {
        match key {
            VideoKey::A => &mut self.selector_a,
            VideoKey::B => &mut self.selector_b,
        }
    }

    pub fn pair(&self) -> ComparisonPairKey {
        ComparisonPairKey::new(&self.selector_a.video_id, &self.selector_b.video_id)
    }

    /// Both ratings are known and public.
    pub fn is_comparison_public(&self) -> bool {
        self.selector_a.is_public() && self.selector_b.is_public()
    }

    pub fn view(&self) -> SessionView {
        let both_rated = self.selector_a.rating.is_some() && self.selector_b.rating.is_some();
        if !self.pair().is_complete() || !both_rated {
            SessionView::Placeholder
        } else if self.is_loading {
            SessionView::Loading
        } else {
            SessionView::Ready {
                initial_comparison: self.initial_comparison.clone(),
                is_comparison_public: self.is_comparison_public(),
            }
        }
    }
}

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionView {
    /// A slot is empty or its rating is unknown: prompt for two videos.
    Placeholder,
    Loading,
    /// Show the submission control, pre-filled from `initial_comparison`.
    Ready {
        initial_comparison: Option<Comparison>,
        is_comparison_public: bool,
    },
}

impl SessionView {
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionView::Ready { .. })
    }
}
