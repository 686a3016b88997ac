use std::fmt;
use std::path::{Path, PathBuf};

use safetyboard_core::{ProductRecord, SourceKind};
use url::Url;

/// Where each of the three datasets is read from.
///
/// Locations are kept as written (URL or filesystem path) and resolved at
/// fetch time, so a bad location surfaces as a load failure of its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub trustified: String,
    pub unbox: String,
    pub open_data: String,
}

impl SourceSet {
    /// Default file names resolved against a directory or base URL.
    pub fn from_base(base: &str) -> Self {
        Self {
            trustified: join_location(base, SourceKind::Trustified.default_file_name()),
            unbox: join_location(base, SourceKind::UnboxHealth.default_file_name()),
            open_data: join_location(base, SourceKind::OpenData.default_file_name()),
        }
    }

    pub fn location(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Trustified => &self.trustified,
            SourceKind::UnboxHealth => &self.unbox,
            SourceKind::OpenData => &self.open_data,
        }
    }

    pub fn set_location(&mut self, kind: SourceKind, location: impl Into<String>) {
        let slot = match kind {
            SourceKind::Trustified => &mut self.trustified,
            SourceKind::UnboxHealth => &mut self.unbox,
            SourceKind::OpenData => &mut self.open_data,
        };
        *slot = location.into();
    }
}

impl Default for SourceSet {
    fn default() -> Self {
        Self::from_base(".")
    }
}

fn join_location(base: &str, file_name: &str) -> String {
    if base.contains("://") {
        if base.ends_with('/') {
            format!("{base}{file_name}")
        } else {
            format!("{base}/{file_name}")
        }
    } else {
        Path::new(base).join(file_name).to_string_lossy().into_owned()
    }
}

/// A parsed dataset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Remote(Url),
    Local(PathBuf),
}

impl SourceLocation {
    /// `http(s)://` becomes [`SourceLocation::Remote`], `file://` and bare
    /// paths become [`SourceLocation::Local`].
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("empty location".to_string());
        }
        if !raw.contains("://") {
            return Ok(SourceLocation::Local(PathBuf::from(raw)));
        }
        let url = Url::parse(raw).map_err(|err| format!("{raw}: {err}"))?;
        match url.scheme() {
            "http" | "https" => Ok(SourceLocation::Remote(url)),
            "file" => url
                .to_file_path()
                .map(SourceLocation::Local)
                .map_err(|_| format!("{raw}: not a local file path")),
            other => Err(format!("{raw}: unsupported scheme `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStage {
    Downloading,
    Parsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProgress {
    pub origin: SourceKind,
    pub stage: SourceStage,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(SourceProgress),
    /// Either every record from all three sources or the first failure.
    LoadCompleted(Result<Vec<ProductRecord>, LoadError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} ({}): {}", .origin.map_or("engine", SourceKind::label), .kind, .message)]
pub struct LoadError {
    /// The dataset that failed; `None` when the load task itself died.
    pub origin: Option<SourceKind>,
    pub kind: FailureKind,
    pub message: String,
}

impl LoadError {
    pub(crate) fn new(origin: SourceKind, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            origin: Some(origin),
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn engine(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            origin: None,
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidLocation,
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Io,
    InvalidJson,
    /// Fetching or normalizing panicked.
    Panicked,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidLocation => write!(f, "invalid location"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Io => write!(f, "io error"),
            FailureKind::InvalidJson => write!(f, "invalid json"),
            FailureKind::Panicked => write!(f, "panicked"),
        }
    }
}
