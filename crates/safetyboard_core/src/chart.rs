//! Donut chart geometry.
//!
//! Segments are laid out clockwise from 0° in input order, each spanning
//! `(percentage / 100) * 360` degrees. Angles are in SVG user space; the
//! presentation layer rotates the chart by -90° so 0° sits at the top.

use std::f64::consts::PI;
use std::fmt::Write as _;

use crate::{Status, StatusFilter};

/// Full-circle slices are drawn this far short of 360° so that the arc's
/// start and end points differ.
const FULL_CIRCLE_GAP_DEGREES: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSegment {
    /// Share of the total, 0–100.
    pub percentage: f64,
    pub color: String,
    pub status: Status,
    pub label: String,
}

impl ChartSegment {
    pub const DRAW_ORDER: [Status; 4] = [
        Status::Pass,
        Status::NotHealthy,
        Status::Fail,
        Status::Pending,
    ];

    /// Segment with the dashboard's palette and legend label for `status`.
    pub fn for_status(status: Status, percentage: f64) -> Self {
        let (color, label) = match status {
            Status::Pass => ("#00ffa3", "Safe/Pass"),
            Status::NotHealthy => ("#ffb700", "Not Healthy"),
            Status::Fail => ("#ff4d4d", "Fail/Hazard"),
            Status::Pending => ("#00d2ff", "Under Review"),
        };
        Self {
            percentage,
            color: color.to_string(),
            status,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            center_x: 100.0,
            center_y: 100.0,
            outer_radius: 90.0,
            inner_radius: 72.0,
        }
    }
}

impl ChartGeometry {
    /// Side length of the square view box the chart fits in.
    pub fn view_box_size(&self) -> f64 {
        (self.center_x.max(self.center_y)) * 2.0
    }

    pub fn layout(&self, segments: &[ChartSegment]) -> Vec<SlicePath> {
        let mut slices = Vec::with_capacity(segments.len());
        let mut current_angle = 0.0;
        for segment in segments {
            if !segment.percentage.is_finite() || segment.percentage <= 0.0 {
                continue;
            }
            let span = (segment.percentage / 100.0) * 360.0;
            let end_angle = current_angle + span;
            slices.push(self.slice(segment, current_angle, end_angle));
            current_angle = end_angle;
        }
        slices
    }

    fn slice(&self, segment: &ChartSegment, start_angle: f64, end_angle: f64) -> SlicePath {
        let drawn_end = if end_angle - start_angle >= 360.0 {
            start_angle + 360.0 - FULL_CIRCLE_GAP_DEGREES
        } else {
            end_angle
        };
        SlicePath {
            status: segment.status,
            color: segment.color.clone(),
            label: segment.label.clone(),
            start_angle,
            end_angle,
            large_arc: end_angle - start_angle > 180.0,
            outer_radius: self.outer_radius,
            inner_radius: self.inner_radius,
            outer_start: self.point(self.outer_radius, start_angle),
            outer_end: self.point(self.outer_radius, drawn_end),
            inner_start: self.point(self.inner_radius, start_angle),
            inner_end: self.point(self.inner_radius, drawn_end),
        }
    }

    fn point(&self, radius: f64, angle_degrees: f64) -> Point {
        let radians = (angle_degrees * PI) / 180.0;
        Point {
            x: self.center_x + radius * radians.cos(),
            y: self.center_y + radius * radians.sin(),
        }
    }
}

/// Lays out segments with the default 200×200 donut geometry.
pub fn layout_segments(segments: &[ChartSegment]) -> Vec<SlicePath> {
    ChartGeometry::default().layout(segments)
}

/// Closed outline of one donut slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicePath {
    pub status: Status,
    pub color: String,
    pub label: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub large_arc: bool,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub outer_start: Point,
    pub outer_end: Point,
    pub inner_start: Point,
    pub inner_end: Point,
}

impl SlicePath {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// SVG path data: outer arc clockwise, edge inwards, inner arc back.
    pub fn to_svg_path(&self) -> String {
        let flag = u8::from(self.large_arc);
        let mut d = String::new();
        let _ = write!(
            d,
            "M {} {} A {r} {r} 0 {flag} 1 {} {} L {} {} A {ir} {ir} 0 {flag} 0 {} {} Z",
            coord(self.outer_start.x),
            coord(self.outer_start.y),
            coord(self.outer_end.x),
            coord(self.outer_end.y),
            coord(self.inner_end.x),
            coord(self.inner_end.y),
            coord(self.inner_start.x),
            coord(self.inner_start.y),
            r = coord(self.outer_radius),
            ir = coord(self.inner_radius),
        );
        d
    }
}

/// Visual state of a slice given the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceEmphasis {
    Normal,
    Active,
    Dimmed,
}

impl SliceEmphasis {
    pub fn for_filter(filter: StatusFilter, status: Status) -> Self {
        match filter {
            StatusFilter::All => SliceEmphasis::Normal,
            StatusFilter::Only(active) if active == status => SliceEmphasis::Active,
            StatusFilter::Only(_) => SliceEmphasis::Dimmed,
        }
    }
}

fn coord(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::coord;

    #[test]
    fn coordinates_are_trimmed() {
        assert_eq!(coord(190.0), "190");
        assert_eq!(coord(100.5), "100.5");
        assert_eq!(coord(-0.0001), "0");
        assert_eq!(coord(12.34567), "12.346");
    }
}
