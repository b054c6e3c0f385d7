//! Axum route handlers for the Posts API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppJson};
use crate::posts::form::{read_multipart, GenerateRequest, Submission};
use crate::posts::generator::{generate_posts, GenerateResponse};
use crate::posts::models::{Audience, FocusArea, OutputKind};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub focus_areas: Vec<&'static str>,
    pub output_kinds: Vec<&'static str>,
    pub whatsapp_audiences: Vec<&'static str>,
}

/// GET /api/v1/posts/options
///
/// Select options for a form frontend, in display order.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        focus_areas: FocusArea::ALL.iter().map(FocusArea::label).collect(),
        output_kinds: OutputKind::ALL.iter().map(OutputKind::label).collect(),
        whatsapp_audiences: Audience::ALL.iter().map(Audience::label).collect(),
    })
}

/// POST /api/v1/posts/generate
///
/// JSON submission. Returns one result per requested output, in selection order.
/// Per-post generation failures are reported inside the results, not as an error status.
/// A body that fails to deserialize (bad date, unknown focus area) is a validation error.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    run_submission(&state, request).await
}

/// POST /api/v1/posts/generate/form
///
/// Multipart variant of `handle_generate`; uploaded images are counted only.
pub async fn handle_generate_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let request = read_multipart(multipart).await?;
    run_submission(&state, request).await
}

async fn run_submission(
    state: &AppState,
    request: GenerateRequest,
) -> Result<Json<GenerateResponse>, AppError> {
    let submission = Submission::from_request(request, state.config.allow_unknown_kinds)?;

    let response = generate_posts(
        state.llm.as_ref(),
        &submission,
        state.config.generation_concurrency,
    )
    .await;

    Ok(Json(response))
}
