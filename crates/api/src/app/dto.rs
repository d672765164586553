use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use segcast_core::{DomainResult, SegmentId};
use segcast_forecast::{
    AggregateOutcome, ForecastRequest, ReportExporter, ReportSummary, SegmentKind, SegmentOutcome,
    SegmentWarning,
};

// -------------------------
// Request DTOs
// -------------------------

/// Form submission: target period plus the two exogenous drivers.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequestBody {
    pub year: i64,
    pub month: i64,
    pub week: i64,
    pub business_days: i64,
    /// Budget for the week, in tonnes.
    pub budget: f64,
}

impl ForecastRequestBody {
    pub fn into_request(self) -> DomainResult<ForecastRequest> {
        ForecastRequest::new(
            self.year,
            self.month,
            self.week,
            self.business_days,
            self.budget,
        )
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ForecastRowResponse {
    pub segment: SegmentId,
    pub label: String,
    pub kind: SegmentKind,
    pub is_total: bool,
    pub status: &'static str,
    /// Raw prediction; absent for failed/unavailable segments.
    pub value: Option<f64>,
    /// Same rendering as the exported artifact (`1,234.50` or `N/A`).
    pub display: String,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    pub year: u16,
    pub month: u8,
    pub week: u8,
    pub export_file_name: String,
    pub rows: Vec<ForecastRowResponse>,
    pub warnings: Vec<SegmentWarning>,
    pub summary: ReportSummary,
}

impl From<AggregateOutcome> for ForecastResponse {
    fn from(out: AggregateOutcome) -> Self {
        let report = out.report;
        let display = report.display_rows();
        Self {
            report_id: report.id.to_string(),
            generated_at: report.generated_at,
            title: report.title(),
            year: report.period.year(),
            month: report.period.month(),
            week: report.period.week(),
            export_file_name: ReportExporter::file_name(&report.period),
            summary: report.summary(),
            rows: report
                .rows
                .into_iter()
                .zip(display)
                .map(|(row, shown)| ForecastRowResponse {
                    value: row.outcome.value(),
                    reason: match &row.outcome {
                        SegmentOutcome::Failed { reason } => Some(reason.clone()),
                        _ => None,
                    },
                    segment: row.segment,
                    kind: row.kind,
                    label: shown.label,
                    is_total: shown.is_total,
                    status: shown.status,
                    display: shown.value,
                })
                .collect(),
            warnings: out.warnings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub id: SegmentId,
    pub kind: SegmentKind,
    pub label: String,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize)]
pub struct SegmentsResponse {
    pub segments: Vec<SegmentResponse>,
    /// Loaded models that the hierarchy does not reference.
    pub unreferenced_models: Vec<SegmentId>,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
}
