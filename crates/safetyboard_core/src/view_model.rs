use std::ops::Range;

use crate::chart::{SliceEmphasis, SlicePath};
use crate::{LoadStatus, Stats, Status, StatusFilter};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub load: LoadStatus,
    /// Loading, failure or empty-result notice shown instead of cards.
    pub message: Option<String>,
    /// Totals over the whole dataset, never the filtered subset.
    pub stats: Stats,
    pub slices: Vec<SliceView>,
    pub cards: Vec<CardView>,
    pub active_filter: StatusFilter,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceView {
    pub path: SlicePath,
    pub emphasis: SliceEmphasis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Position in the rendered list; cards have no other identity.
    pub index: usize,
    pub name: String,
    /// Byte ranges of `name` matching the search query.
    pub name_highlights: Vec<Range<usize>>,
    pub category: String,
    pub source: String,
    pub status: Status,
    pub status_label: &'static str,
    pub action_label: &'static str,
    pub link: String,
    pub css_class: String,
    pub animation_delay_ms: u64,
}
