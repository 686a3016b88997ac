use crate::{ProductRecord, Status, StatusFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Start the one-shot data load.
    LoadRequested,
    /// All three datasets arrived and were normalized.
    DataLoaded(Vec<ProductRecord>),
    /// Any source failed; the reason is for logs, not for display.
    LoadFailed(String),
    /// User edited the search box.
    SearchChanged(String),
    /// User picked a status filter (or `All`) directly.
    StatusFilterSelected(StatusFilter),
    /// User clicked a donut chart slice.
    SegmentClicked(Status),
    /// User clicked a card's category label.
    CategoryClicked(String),
    /// User clicked the chart centre, which clears every filter.
    ChartCenterClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
