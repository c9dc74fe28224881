//! Portfolio Analysis Routes
//!
//! Accepts a PDF statement and/or a pasted portfolio description and returns
//! the model's recommendation.

use analysis_core::{PortfolioSource, Recommendation};
use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use portfolio_reader::{extract_text_async, select_input};
use serde::Serialize;

use crate::{markdown::render_markdown, ApiResponse, AppError, AppState};

/// Form field carrying the uploaded PDF
pub const FILE_FIELD: &str = "file";
/// Form field carrying manually entered portfolio text
pub const TEXT_FIELD: &str = "portfolio_text";

/// Multipart form accepted by `POST /api/analyze`
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeForm {
    /// Portfolio statement as PDF; wins over `portfolio_text` when both are sent
    #[schema(value_type = Option<String>, format = Binary)]
    pub file: Option<Vec<u8>>,
    /// Free-text portfolio description
    pub portfolio_text: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AnalyzeResponse {
    pub status_message: String,
    pub source: PortfolioSource,
    pub recommendation: Recommendation,
    /// `recommendation.markdown` rendered to HTML, with raw HTML escaped
    pub recommendation_html: String,
}

pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze_portfolio))
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body(content = AnalyzeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Recommendation for the submitted portfolio", body = AnalyzeResponse),
        (status = 400, description = "No portfolio given, or the PDF could not be read"),
        (status = 413, description = "The upload exceeds the configured size limit"),
        (status = 502, description = "The completion provider failed")
    ),
    tag = "Analysis"
)]
pub async fn analyze_portfolio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, AppError> {
    let mut pdf_bytes: Option<Vec<u8>> = None;
    let mut manual_text: Option<String> = None;
    let limit = state.max_upload_bytes;
    let upload_error = |e| AppError::from_multipart(e, limit);

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let data = field.bytes().await.map_err(upload_error)?;
                // Browsers send an empty part when no file was chosen
                if !data.is_empty() {
                    pdf_bytes = Some(data.to_vec());
                }
            }
            TEXT_FIELD => manual_text = Some(field.text().await.map_err(upload_error)?),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    let pdf_text = match pdf_bytes {
        Some(bytes) => {
            tracing::info!(bytes = bytes.len(), "Extracting text from uploaded PDF");
            Some(extract_text_async(bytes).await?)
        }
        None => None,
    };

    let input = select_input(pdf_text, manual_text.as_deref())?;
    tracing::info!(source = %input.source, "{}", input.source.status_message());

    let recommendation = state.orchestrator.analyze(&input).await?;

    let recommendation_html = render_markdown(&recommendation.markdown);

    Ok(Json(ApiResponse::success(AnalyzeResponse {
        status_message: input.source.status_message().to_string(),
        source: input.source,
        recommendation,
        recommendation_html,
    })))
}
