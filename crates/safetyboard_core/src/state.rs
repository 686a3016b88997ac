use std::sync::Arc;

use crate::chart::{layout_segments, SliceEmphasis};
use crate::filter::{filter_records, highlight_ranges, FilterState};
use crate::stats::{compute_stats, Stats};
use crate::view_model::{AppViewModel, CardView, SliceView};
use crate::ProductRecord;

/// Shown in place of the results when the load fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load database. Check log.";
pub const LOADING_MESSAGE: &str = "Loading records...";
pub const NO_MATCHES_MESSAGE: &str = "No records found matching your query.";

/// Stagger between consecutive cards' entry animations.
pub const CARD_STAGGER_MS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    load: LoadStatus,
    records: Arc<Vec<ProductRecord>>,
    stats: Stats,
    filter: FilterState,
    load_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load
    }

    /// The full record snapshot, unaffected by filtering.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Reason of the last load failure, for diagnostics.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn visible_records(&self) -> Vec<&ProductRecord> {
        filter_records(&self.records, &self.filter)
    }

    pub fn view(&self) -> AppViewModel {
        let cards: Vec<CardView> = self
            .visible_records()
            .into_iter()
            .enumerate()
            .map(|(index, record)| CardView {
                index,
                name: record.name.clone(),
                name_highlights: highlight_ranges(&record.name, self.filter.query()),
                category: record.category.clone(),
                source: record.source.clone(),
                status: record.status,
                status_label: record.status.card_label(),
                action_label: record.status.action_label(),
                link: record.link.clone(),
                css_class: record.status.css_class(),
                animation_delay_ms: index as u64 * CARD_STAGGER_MS,
            })
            .collect();

        let slices = if self.stats.total > 0 {
            layout_segments(&self.stats.segments())
                .into_iter()
                .map(|path| SliceView {
                    emphasis: SliceEmphasis::for_filter(self.filter.status(), path.status),
                    path,
                })
                .collect()
        } else {
            Vec::new()
        };

        let message = match self.load {
            LoadStatus::Idle => None,
            LoadStatus::Loading => Some(LOADING_MESSAGE.to_string()),
            LoadStatus::Failed => Some(LOAD_FAILED_MESSAGE.to_string()),
            LoadStatus::Ready if cards.is_empty() => Some(NO_MATCHES_MESSAGE.to_string()),
            LoadStatus::Ready => None,
        };

        AppViewModel {
            load: self.load,
            message,
            stats: self.stats,
            slices,
            cards,
            active_filter: self.filter.status(),
            query: self.filter.query().to_string(),
        }
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_load(&mut self) {
        self.load = LoadStatus::Loading;
        self.mark_dirty();
    }

    pub(crate) fn apply_loaded(&mut self, records: Vec<ProductRecord>) {
        self.stats = compute_stats(&records);
        self.records = Arc::new(records);
        self.load = LoadStatus::Ready;
        self.load_error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_failed(&mut self, reason: String) {
        self.records = Arc::default();
        self.stats = Stats::default();
        self.load = LoadStatus::Failed;
        self.load_error = Some(reason);
        self.mark_dirty();
    }

    pub(crate) fn set_filter(&mut self, filter: FilterState) {
        if self.filter != filter {
            self.filter = filter;
            self.mark_dirty();
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
