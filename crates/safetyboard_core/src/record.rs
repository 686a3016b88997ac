use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of a safety/quality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Fail,
    Pending,
    NotHealthy,
}

impl Status {
    /// Every status, in declaration order.
    pub const ALL: [Status; 4] = [
        Status::Pass,
        Status::Fail,
        Status::Pending,
        Status::NotHealthy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
            Status::Pending => "pending",
            Status::NotHealthy => "not_healthy",
        }
    }

    /// Banner shown on a result card.
    pub fn card_label(self) -> &'static str {
        match self {
            Status::Pass => "PASSED TEST",
            Status::Fail => "FAILED TEST",
            Status::Pending => "UNDER REVIEW",
            Status::NotHealthy => "NOT HEALTHY",
        }
    }

    /// Text of the card's link button.
    pub fn action_label(self) -> &'static str {
        match self {
            Status::Pass | Status::Pending => "View Source",
            Status::Fail => "View Failure Report",
            Status::NotHealthy => "View Analysis",
        }
    }

    /// Class name used by presentation layers (`status-not-healthy`).
    pub fn css_class(self) -> String {
        format!("status-{}", self.as_str().replace('_', "-"))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status `{0}`")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "pass" => Ok(Status::Pass),
            "fail" => Ok(Status::Fail),
            "pending" => Ok(Status::Pending),
            "not_healthy" => Ok(Status::NotHealthy),
            _ => Err(ParseStatusError(value.to_string())),
        }
    }
}

/// Status restriction applied to the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn admits(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(active) => active == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        value.parse().map(StatusFilter::Only)
    }
}

/// A single normalized product/test entry.
///
/// Records are built once by the normalizers and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub source: String,
    pub category: String,
    pub status: Status,
    /// May be empty when the dataset carries no link and defines no fallback.
    pub link: String,
}
