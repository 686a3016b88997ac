//! Safetyboard core: record normalization, aggregation, filtering, chart
//! geometry and the pure dashboard state machine.
mod chart;
mod effect;
mod filter;
mod msg;
mod normalize;
mod record;
mod render;
mod state;
mod stats;
mod update;
mod view_model;

pub use chart::{
    layout_segments, ChartGeometry, ChartSegment, Point, SliceEmphasis, SlicePath,
};
pub use effect::Effect;
pub use filter::{filter_records, highlight_ranges, FilterState, MIN_QUERY_CHARS};
pub use msg::Msg;
pub use normalize::{
    clean_unbox_category, normalize_all, normalize_open_data, normalize_trustified,
    normalize_unbox, RawCategory, RawDataset, RawEntry, SourceKind,
};
pub use record::{ParseStatusError, ProductRecord, Status, StatusFilter};
pub use render::Renderer;
pub use state::{
    AppState, LoadStatus, CARD_STAGGER_MS, LOADING_MESSAGE, LOAD_FAILED_MESSAGE,
    NO_MATCHES_MESSAGE,
};
pub use stats::{compute_stats, Percentages, Stats};
pub use update::update;
pub use view_model::{AppViewModel, CardView, SliceView};
