//! Safetyboard engine: dataset fetching, the joint load pipeline, and
//! report export.
mod engine;
mod export;
mod fetch;
mod load;
mod persist;
mod report;
mod types;

pub use engine::EngineHandle;
pub use export::{export_dashboard, ExportError, ExportOptions, ExportSummary};
pub use fetch::{FetchSettings, Fetcher, NullProgressSink, ProgressSink, ReqwestFetcher};
pub use load::load_sources;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use report::{escape_html, HtmlRenderer};
pub use types::{
    EngineEvent, FailureKind, LoadError, SourceLocation, SourceProgress, SourceSet, SourceStage,
};
