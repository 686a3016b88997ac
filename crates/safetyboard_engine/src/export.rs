use std::path::{Path, PathBuf};

use safetyboard_core::{AppViewModel, Renderer};
use safetyboard_logging::board_info;
use serde_json::json;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::report::HtmlRenderer;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub html_filename: String,
    pub summary_filename: Option<String>,
    /// RFC 3339 timestamp stamped into the summary.
    pub generated_utc: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            html_filename: "dashboard.html".to_string(),
            summary_filename: Some("summary.json".to_string()),
            generated_utc: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub total: usize,
    pub visible: usize,
    pub html_path: PathBuf,
    pub summary_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes the HTML snapshot of `view` and, optionally, a JSON summary of
/// the totals and the active filter into `output_dir`.
pub fn export_dashboard(
    output_dir: &Path,
    view: &AppViewModel,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());

    let html = HtmlRenderer::default().render(view);
    let html_path = writer.write(&options.html_filename, &html)?;

    let summary_path = match &options.summary_filename {
        Some(name) => {
            let summary = json!({
                "generated_utc": options.generated_utc,
                "counts": view.stats,
                "percentages": view.stats.percentages(),
                "active_filter": view.active_filter.to_string(),
                "query": view.query,
                "visible_count": view.cards.len(),
            });
            let content = serde_json::to_string_pretty(&summary)?;
            Some(writer.write(name, &content)?)
        }
        None => None,
    };

    board_info!(
        "Exported dashboard ({} of {} records) to {:?}",
        view.cards.len(),
        view.stats.total,
        output_dir
    );

    Ok(ExportSummary {
        total: view.stats.total,
        visible: view.cards.len(),
        html_path,
        summary_path,
    })
}
