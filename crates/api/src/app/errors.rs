use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use segcast_core::DomainError;
use segcast_forecast::ForecastError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match &err {
        DomainError::Validation { field, .. } => json_error_with_field(
            StatusCode::BAD_REQUEST,
            "validation_error",
            field,
            err.to_string(),
        ),
        DomainError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", err.to_string())
        }
        DomainError::Configuration(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "configuration_error",
            err.to_string(),
        ),
    }
}

pub fn forecast_error_to_response(err: ForecastError) -> axum::response::Response {
    match err {
        ForecastError::Domain(e) => domain_error_to_response(e),
        ForecastError::Export(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "export_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn json_error_with_field(
    status: StatusCode,
    code: &'static str,
    field: &str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "field": field,
            "message": message.into(),
        })),
    )
        .into_response()
}
