use std::path::Path;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use safetyboard_core::SourceKind;
use safetyboard_logging::board_debug;

use crate::{EngineEvent, FailureKind, LoadError, SourceLocation, SourceProgress, SourceStage};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` waits for the response indefinitely.
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            redirect_limit: 5,
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Sink for callers that don't track progress.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: EngineEvent) {}
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Raw bytes of the dataset `origin` stored at `location`.
    async fn fetch(
        &self,
        origin: SourceKind,
        location: &str,
        sink: &dyn ProgressSink,
    ) -> Result<Bytes, LoadError>;
}

/// Reads remote locations over HTTP and local ones from disk.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self, origin: SourceKind) -> Result<reqwest::Client, LoadError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit));
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| LoadError::new(origin, FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, origin: SourceKind, actual: u64) -> LoadError {
        LoadError::new(
            origin,
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "dataset too large",
        )
    }

    async fn fetch_remote(
        &self,
        origin: SourceKind,
        url: reqwest::Url,
        sink: &dyn ProgressSink,
    ) -> Result<Bytes, LoadError> {
        let client = self.build_client(origin)?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|err| map_reqwest_error(origin, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::new(
                origin,
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(origin, content_len));
            }
        }

        sink.emit(progress(origin, SourceStage::Downloading, 0));

        let mut buffer = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| map_reqwest_error(origin, err))?;
            let next_len = buffer.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(origin, next_len));
            }
            buffer.extend_from_slice(&chunk);
            sink.emit(progress(origin, SourceStage::Downloading, next_len));
        }

        Ok(buffer.freeze())
    }

    async fn fetch_local(
        &self,
        origin: SourceKind,
        path: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<Bytes, LoadError> {
        let io_error = |err: std::io::Error| {
            LoadError::new(origin, FailureKind::Io, format!("{}: {err}", path.display()))
        };
        let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
        if metadata.len() > self.settings.max_bytes {
            return Err(self.too_large(origin, metadata.len()));
        }
        sink.emit(progress(origin, SourceStage::Downloading, 0));
        let bytes = tokio::fs::read(path).await.map_err(io_error)?;
        sink.emit(progress(origin, SourceStage::Downloading, bytes.len() as u64));
        Ok(Bytes::from(bytes))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        origin: SourceKind,
        location: &str,
        sink: &dyn ProgressSink,
    ) -> Result<Bytes, LoadError> {
        let location = SourceLocation::parse(location)
            .map_err(|message| LoadError::new(origin, FailureKind::InvalidLocation, message))?;
        board_debug!("Fetching {} from {:?}", origin, location);
        match location {
            SourceLocation::Remote(url) => self.fetch_remote(origin, url, sink).await,
            SourceLocation::Local(path) => self.fetch_local(origin, &path, sink).await,
        }
    }
}

fn progress(origin: SourceKind, stage: SourceStage, bytes: u64) -> EngineEvent {
    EngineEvent::Progress(SourceProgress {
        origin,
        stage,
        bytes: Some(bytes),
    })
}

fn map_reqwest_error(origin: SourceKind, err: reqwest::Error) -> LoadError {
    if err.is_timeout() {
        return LoadError::new(origin, FailureKind::Timeout, err.to_string());
    }
    LoadError::new(origin, FailureKind::Network, err.to_string())
}
