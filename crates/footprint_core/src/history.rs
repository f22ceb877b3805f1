//! crates/footprint_core/src/history.rs
//!
//! Shapes a recent-history listing into the series drawn by the trend chart.

use crate::domain::FootprintRecord;
use chrono::FixedOffset;

/// One bar of the history chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Calendar date of the calculation at the display offset, `dd/mm/yyyy`.
    pub label: String,
    pub total_footprint: f64,
}

/// Turns a newest-first history list into an oldest-first chart series, dating each
/// point in the viewer's timezone `offset` rather than UTC.
pub fn trend(records: &[FootprintRecord], offset: FixedOffset) -> Vec<TrendPoint> {
    records
        .iter()
        .rev()
        .map(|record| TrendPoint {
            label: record
                .created_at
                .with_timezone(&offset)
                .format("%d/%m/%Y")
                .to_string(),
            total_footprint: record.total_footprint,
        })
        .collect()
}
