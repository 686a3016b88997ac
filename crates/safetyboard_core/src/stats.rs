use serde::Serialize;

use crate::chart::ChartSegment;
use crate::{ProductRecord, Status};

/// Per-status counts over the whole record collection.
///
/// Computed once when the data arrives; filtering never changes it, so the
/// dashboard totals always describe the entire dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub pending: usize,
    pub not_healthy: usize,
}

impl Stats {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Pass => self.pass,
            Status::Fail => self.fail,
            Status::Pending => self.pending,
            Status::NotHealthy => self.not_healthy,
        }
    }

    /// Share of `status` in percent; 0 for an empty collection.
    pub fn percentage(&self, status: Status) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.count(status) as f64 / self.total as f64) * 100.0
    }

    pub fn percentages(&self) -> Percentages {
        Percentages {
            pass: self.percentage(Status::Pass),
            fail: self.percentage(Status::Fail),
            pending: self.percentage(Status::Pending),
            not_healthy: self.percentage(Status::NotHealthy),
        }
    }

    /// Donut segments in drawing order: pass, not healthy, fail, pending.
    pub fn segments(&self) -> Vec<ChartSegment> {
        ChartSegment::DRAW_ORDER
            .iter()
            .map(|&status| ChartSegment::for_status(status, self.percentage(status)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Percentages {
    pub pass: f64,
    pub fail: f64,
    pub pending: f64,
    pub not_healthy: f64,
}

pub fn compute_stats(records: &[ProductRecord]) -> Stats {
    records.iter().fold(
        Stats {
            total: records.len(),
            ..Stats::default()
        },
        |mut stats, record| {
            match record.status {
                Status::Pass => stats.pass += 1,
                Status::Fail => stats.fail += 1,
                Status::Pending => stats.pending += 1,
                Status::NotHealthy => stats.not_healthy += 1,
            }
            stats
        },
    )
}
