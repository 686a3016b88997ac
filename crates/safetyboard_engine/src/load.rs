use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::future::try_join3;
use futures_util::FutureExt;
use safetyboard_core::{normalize_all, ProductRecord, RawDataset, SourceKind};
use safetyboard_logging::board_info;

use crate::fetch::{Fetcher, ProgressSink};
use crate::{EngineEvent, FailureKind, LoadError, SourceProgress, SourceSet, SourceStage};

/// Fetches the three datasets concurrently and normalizes them into one
/// collection, Trustified first, then UnboxHealth, then Open Data.
///
/// The first failing source aborts the whole load; nothing partial is
/// returned and nothing is retried.
pub async fn load_sources(
    fetcher: &dyn Fetcher,
    sources: &SourceSet,
    sink: &dyn ProgressSink,
) -> Result<Vec<ProductRecord>, LoadError> {
    let (trustified, unbox, open_data) = try_join3(
        fetch_dataset(fetcher, SourceKind::Trustified, sources, sink),
        fetch_dataset(fetcher, SourceKind::UnboxHealth, sources, sink),
        fetch_dataset(fetcher, SourceKind::OpenData, sources, sink),
    )
    .await?;

    let records = normalize_all(&trustified, &unbox, &open_data);
    board_info!("Loaded {} records from 3 sources", records.len());
    Ok(records)
}

async fn fetch_dataset(
    fetcher: &dyn Fetcher,
    origin: SourceKind,
    sources: &SourceSet,
    sink: &dyn ProgressSink,
) -> Result<RawDataset, LoadError> {
    let bytes = AssertUnwindSafe(fetcher.fetch(origin, sources.location(origin), sink))
        .catch_unwind()
        .await
        .map_err(|payload| {
            LoadError::new(origin, FailureKind::Panicked, panic_message(&*payload))
        })??;
    let dataset = RawDataset::from_slice(&bytes)
        .map_err(|err| LoadError::new(origin, FailureKind::InvalidJson, err.to_string()))?;
    sink.emit(EngineEvent::Progress(SourceProgress {
        origin,
        stage: SourceStage::Parsed,
        bytes: Some(bytes.len() as u64),
    }));
    Ok(dataset)
}

/// Text of a panic payload, when it carries one.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
