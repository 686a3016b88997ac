//! Normalizers mapping each dataset's raw JSON shape onto [`ProductRecord`].
//!
//! All three datasets share one outer shape: an object keyed by category,
//! each value an object of status buckets holding `{name, link?, source?}`
//! entries. They differ only in which buckets exist, how a missing link is
//! filled in, where the `source` label comes from and whether the category
//! key needs cosmetic cleanup. Missing buckets yield nothing.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::{ProductRecord, Status};

const TRUSTIFIED_FALLBACK_LINK: &str = "https://www.trustified.in/passandfail";
const UNBOX_CATEGORY_KEYWORD: &str = "supplements";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawEntry {
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Status buckets of one category. Unknown bucket names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub pass: Option<Vec<RawEntry>>,
    #[serde(default)]
    pub fail: Option<Vec<RawEntry>>,
    #[serde(default)]
    pub expired: Option<Vec<RawEntry>>,
    #[serde(default)]
    pub not_healthy: Option<Vec<RawEntry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Pass,
    Fail,
    Expired,
    NotHealthy,
}

impl RawCategory {
    fn bucket(&self, bucket: Bucket) -> &[RawEntry] {
        let entries = match bucket {
            Bucket::Pass => &self.pass,
            Bucket::Fail => &self.fail,
            Bucket::Expired => &self.expired,
            Bucket::NotHealthy => &self.not_healthy,
        };
        entries.as_deref().unwrap_or_default()
    }
}

/// A parsed dataset, categories kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDataset {
    categories: Vec<(String, RawCategory)>,
}

impl RawDataset {
    pub fn new(categories: Vec<(String, RawCategory)>) -> Self {
        Self { categories }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &RawCategory)> {
        self.categories
            .iter()
            .map(|(name, category)| (name.as_str(), category))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<'de> Deserialize<'de> for RawDataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DatasetVisitor;

        impl<'de> Visitor<'de> for DatasetVisitor {
            type Value = RawDataset;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by category name")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories: Vec<(String, RawCategory)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, category)) = map.next_entry::<String, RawCategory>()? {
                    // A repeated key keeps its first position with the last value.
                    match categories.iter_mut().find(|(existing, _)| *existing == name) {
                        Some(slot) => slot.1 = category,
                        None => categories.push((name, category)),
                    }
                }
                Ok(RawDataset { categories })
            }
        }

        deserializer.deserialize_map(DatasetVisitor)
    }
}

/// The three origin datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    Trustified,
    UnboxHealth,
    OpenData,
}

impl SourceKind {
    /// Load and concatenation order.
    pub const ALL: [SourceKind; 3] = [
        SourceKind::Trustified,
        SourceKind::UnboxHealth,
        SourceKind::OpenData,
    ];

    /// Default `source` label stamped on records.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Trustified => "Trustified",
            SourceKind::UnboxHealth => "UnboxHealth",
            SourceKind::OpenData => "Open Data",
        }
    }

    /// File the dataset is served as, next to the application.
    pub fn default_file_name(self) -> &'static str {
        match self {
            SourceKind::Trustified => "trustified_data.json",
            SourceKind::UnboxHealth => "unbox_data.json",
            SourceKind::OpenData => "open_data.json",
        }
    }

    pub fn normalize(self, dataset: &RawDataset) -> Vec<ProductRecord> {
        match self {
            SourceKind::Trustified => normalize_trustified(dataset),
            SourceKind::UnboxHealth => normalize_unbox(dataset),
            SourceKind::OpenData => normalize_open_data(dataset),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trustified: `pass`, `fail`, `expired` (as pending). Pass and pending
/// entries without a link point at the public results page.
pub fn normalize_trustified(dataset: &RawDataset) -> Vec<ProductRecord> {
    let mut records = Vec::new();
    for (category, buckets) in dataset.categories() {
        for (bucket, status) in [
            (Bucket::Pass, Status::Pass),
            (Bucket::Fail, Status::Fail),
            (Bucket::Expired, Status::Pending),
        ] {
            let fallback = match status {
                Status::Pass | Status::Pending => Some(TRUSTIFIED_FALLBACK_LINK),
                Status::Fail | Status::NotHealthy => None,
            };
            records.extend(buckets.bucket(bucket).iter().map(|entry| ProductRecord {
                name: entry.name.clone(),
                source: SourceKind::Trustified.label().to_string(),
                category: category.to_string(),
                status,
                link: link_or(entry, fallback),
            }));
        }
    }
    records
}

/// UnboxHealth: `pass`, `not_healthy`, `fail`, with cleaned category names.
pub fn normalize_unbox(dataset: &RawDataset) -> Vec<ProductRecord> {
    let mut records = Vec::new();
    for (category, buckets) in dataset.categories() {
        let category = clean_unbox_category(category);
        for (bucket, status) in [
            (Bucket::Pass, Status::Pass),
            (Bucket::NotHealthy, Status::NotHealthy),
            (Bucket::Fail, Status::Fail),
        ] {
            records.extend(buckets.bucket(bucket).iter().map(|entry| ProductRecord {
                name: entry.name.clone(),
                source: SourceKind::UnboxHealth.label().to_string(),
                category: category.clone(),
                status,
                link: link_or(entry, None),
            }));
        }
    }
    records
}

/// Open Data: `pass`, `fail`, `expired` (as pending); entries may name
/// their own source.
pub fn normalize_open_data(dataset: &RawDataset) -> Vec<ProductRecord> {
    let mut records = Vec::new();
    for (category, buckets) in dataset.categories() {
        for (bucket, status) in [
            (Bucket::Pass, Status::Pass),
            (Bucket::Fail, Status::Fail),
            (Bucket::Expired, Status::Pending),
        ] {
            records.extend(buckets.bucket(bucket).iter().map(|entry| ProductRecord {
                name: entry.name.clone(),
                source: non_empty(entry.source.as_deref())
                    .unwrap_or(SourceKind::OpenData.label())
                    .to_string(),
                category: category.to_string(),
                status,
                link: link_or(entry, None),
            }));
        }
    }
    records
}

/// `protein_supplements` -> `protein`. Falls back to the raw key when the
/// cleanup leaves nothing.
pub fn clean_unbox_category(raw: &str) -> String {
    let cleaned = raw
        .replace('_', " ")
        .replacen(UNBOX_CATEGORY_KEYWORD, "", 1);
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        raw.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Normalizes and concatenates the three datasets in load order.
pub fn normalize_all(
    trustified: &RawDataset,
    unbox: &RawDataset,
    open_data: &RawDataset,
) -> Vec<ProductRecord> {
    let mut records = normalize_trustified(trustified);
    records.extend(normalize_unbox(unbox));
    records.extend(normalize_open_data(open_data));
    records
}

fn link_or(entry: &RawEntry, fallback: Option<&str>) -> String {
    non_empty(entry.link.as_deref())
        .or(fallback)
        .unwrap_or_default()
        .to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
