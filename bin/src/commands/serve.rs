//! HTTP download endpoint.
//!
//! A thin surface over the retrieval pipeline: parameter validation, the
//! error-taxonomy-to-status mapping, and attachment headers. Everything
//! else lives in the library crates.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use galvani_lib::prelude::*;
use serde::Deserialize;

use crate::config::AppConfig;

/// Runs the HTTP server until interrupted.
pub(crate) async fn serve(config: AppConfig, host: &str, port: u16) -> Result<()> {
    let app = router(Arc::new(config));
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(host, port, "Listening for download requests");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/download", get(download))
        .with_state(config)
}

async fn health() -> &'static str {
    "OK"
}

/// Query parameters of the download operation.
#[derive(Debug, Deserialize)]
struct DownloadParams {
    format: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

/// One retrieval request: validate, build the dataset, encode, attach.
async fn download(
    State(config): State<Arc<AppConfig>>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    let format: OutputFormat = params
        .format
        .as_deref()
        .unwrap_or("csv")
        .parse()
        .map_err(|e: galvani_lib::FormatError| ApiError::bad_request(e.to_string()))?;
    let start = parse_date(params.start.as_deref(), "start")?;
    let end = parse_date(params.end.as_deref(), "end")?;
    let range = DateRange::new(start, end).map_err(|e| ApiError::from_error(e.into()))?;

    let transport = config.transport().map_err(ApiError::from_error)?;
    let encode_config = config.encode;

    tracing::info!(%range, %format, "Download requested");

    // The pipeline is blocking by design; keep it off the async executor.
    let aggregation = tokio::task::spawn_blocking(move || build(range, &transport))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(ApiError::from_error)?;

    let output = encode(&aggregation.records, format, range, &encode_config)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let headers = [
        (header::CONTENT_TYPE, output.mime_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", output.file_name),
        ),
    ];
    Ok((headers, output.bytes).into_response())
}

fn parse_date(value: Option<&str>, name: &str) -> Result<NaiveDate, ApiError> {
    let value =
        value.ok_or_else(|| ApiError::bad_request(format!("Missing parameter: {name}")))?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("Invalid {name} date: {value}")))
}

/// Maps the error taxonomy onto HTTP outcomes.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    fn from_error(err: Error) -> Self {
        let status = match &err {
            Error::DateRange(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Transport(_) => StatusCode::BAD_GATEWAY,
            Error::NoData { .. } => StatusCode::NOT_FOUND,
            Error::Format(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, "{}", self.message);
        (self.status, self.message).into_response()
    }
}
