//! CSV export of a forecast report.

use csv::{ReaderBuilder, Writer};
use serde::Serialize;

use segcast_core::ForecastPeriod;

use crate::error::{ForecastError, ForecastResult};
use crate::format::format_outcome;
use crate::report::ForecastReport;

pub const LABEL_HEADER: &str = "Segment";
pub const VALUE_HEADER: &str = "Sales (t)";
pub const CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Exported report, ready to hand to a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// One record read back from an exported artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct ReportExporter;

impl ReportExporter {
    pub fn new() -> Self {
        Self
    }

    /// `forecast_Y{year}_M{month}_W{week}.csv`
    pub fn file_name(period: &ForecastPeriod) -> String {
        format!(
            "forecast_Y{}_M{}_W{}.csv",
            period.year(),
            period.month(),
            period.week()
        )
    }

    /// Serialize `report` to CSV: a header plus one record per report row.
    ///
    /// Output depends only on labels and outcomes, so exporting the same
    /// report twice yields identical bytes.
    pub fn export(&self, report: &ForecastReport) -> ForecastResult<ExportArtifact> {
        let mut wtr = Writer::from_writer(vec![]);

        wtr.write_record([LABEL_HEADER, VALUE_HEADER])
            .map_err(|e| ForecastError::export(format!("CSV writer error: {e}")))?;

        for row in &report.rows {
            wtr.write_record([row.label.as_str(), format_outcome(&row.outcome).as_str()])
                .map_err(|e| ForecastError::export(format!("CSV writer error: {e}")))?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| ForecastError::export(format!("CSV writer error: {e}")))?;

        Ok(ExportArtifact {
            file_name: Self::file_name(&report.period),
            content_type: CONTENT_TYPE,
            bytes,
        })
    }

    /// Read an exported artifact back into `(label, value)` records.
    pub fn parse(&self, bytes: &[u8]) -> ForecastResult<Vec<ExportedRow>> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(bytes);

        let headers = rdr
            .headers()
            .map_err(|e| ForecastError::export(format!("CSV reader error: {e}")))?;
        if headers.len() != 2 || &headers[0] != LABEL_HEADER || &headers[1] != VALUE_HEADER {
            return Err(ForecastError::export(format!(
                "unexpected header: {headers:?}"
            )));
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| ForecastError::export(format!("CSV reader error: {e}")))?;
            rows.push(ExportedRow {
                label: record.get(0).unwrap_or_default().to_string(),
                value: record.get(1).unwrap_or_default().to_string(),
            });
        }
        Ok(rows)
    }
}
