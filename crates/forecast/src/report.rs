//! Hierarchy-ordered forecast report and per-request warnings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use segcast_core::{ForecastPeriod, ReportId, SegmentId};

use crate::executor::SegmentOutcome;
use crate::format::format_outcome;
use crate::hierarchy::SegmentKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub segment: SegmentId,
    pub kind: SegmentKind,
    pub label: String,
    pub outcome: SegmentOutcome,
}

/// One request's result: a row per configured segment, in hierarchy order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub id: ReportId,
    pub generated_at: DateTime<Utc>,
    pub period: ForecastPeriod,
    pub rows: Vec<ReportRow>,
}

/// Row ready for tabular rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
    pub is_total: bool,
    pub status: &'static str,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub predicted: usize,
    pub failed: usize,
    pub unavailable: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    Unavailable,
    PredictionFailed,
}

/// Non-fatal, per-segment problem surfaced next to the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentWarning {
    pub segment: SegmentId,
    pub kind: WarningKind,
    pub message: String,
}

impl ForecastReport {
    pub fn title(&self) -> String {
        format!(
            "Forecast for week {} of {}/{}",
            self.period.week(),
            self.period.month(),
            self.period.year()
        )
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }

    pub fn display_rows(&self) -> Vec<DisplayRow> {
        self.rows
            .iter()
            .map(|r| DisplayRow {
                label: r.label.clone(),
                value: format_outcome(&r.outcome),
                is_total: r.kind == SegmentKind::Total,
                status: r.outcome.status(),
            })
            .collect()
    }

    pub fn summary(&self) -> ReportSummary {
        self.rows
            .iter()
            .fold(ReportSummary::default(), |mut acc, r| {
                match r.outcome {
                    SegmentOutcome::Predicted { .. } => acc.predicted += 1,
                    SegmentOutcome::Failed { .. } => acc.failed += 1,
                    SegmentOutcome::Unavailable => acc.unavailable += 1,
                }
                acc
            })
    }
}
