//! Axum route handlers for the Questions and Credential APIs.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::questions::models::{ExperienceLevel, JobRequirement, JobRole, Question};
use crate::questions::validation::validate_requirement;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateQuestionsResponse {
    pub session_id: Uuid,
    pub questions: Vec<Question>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FormOptionsResponse {
    pub roles: Vec<JobRole>,
    pub experience_levels: Vec<ExperienceLevel>,
}

#[derive(Debug, Deserialize)]
pub struct SaveCredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct CredentialStatusResponse {
    pub configured: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Credential resolution
// ────────────────────────────────────────────────────────────────────────────

/// Picks the credential for one call: request bearer token, then the saved key,
/// then the configured fallback. `None` lets the generator report it as missing.
async fn resolve_credential(state: &AppState, headers: &HeaderMap) -> Option<String> {
    if let Some(token) = bearer_token(headers) {
        return Some(token);
    }

    match state.credentials.api_key().await {
        Some(saved) => Some(saved),
        None => state.config.groq_api_key.clone(),
    }
}

/// Token from an `Authorization: Bearer <token>` header. The scheme name is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

async fn run_generation(
    state: &AppState,
    headers: &HeaderMap,
    session_id: Uuid,
    requirement: &JobRequirement,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let credential = resolve_credential(state, headers).await;

    let response = state
        .generator
        .generate(requirement, credential.as_deref())
        .await?;

    Ok(Json(GenerateQuestionsResponse {
        session_id,
        questions: response.questions,
        timestamp: response.timestamp,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
///
/// The fixed roles and experience levels the requirement form offers.
pub async fn handle_form_options() -> Json<FormOptionsResponse> {
    Json(FormOptionsResponse {
        roles: JobRole::ALL.to_vec(),
        experience_levels: ExperienceLevel::ALL.to_vec(),
    })
}

/// POST /api/v1/questions
///
/// Validates the requirement, opens a session holding it, and generates questions.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<JobRequirement>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let requirement = validate_requirement(&request)?;
    let session_id = state.sessions.create(requirement.clone()).await;
    info!("Session {session_id}: generating questions");

    run_generation(&state, &headers, session_id, &requirement).await
}

/// POST /api/v1/questions/:session_id/regenerate
///
/// Replays the session's last requirement. The previous result is not consulted.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let requirement = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    info!("Session {session_id}: regenerating questions");

    run_generation(&state, &headers, session_id, &requirement).await
}

/// GET /api/v1/credential
pub async fn handle_credential_status(
    State(state): State<AppState>,
) -> Json<CredentialStatusResponse> {
    let configured =
        state.credentials.api_key().await.is_some() || state.config.groq_api_key.is_some();
    Json(CredentialStatusResponse { configured })
}

/// PUT /api/v1/credential
pub async fn handle_save_credential(
    State(state): State<AppState>,
    Json(request): Json<SaveCredentialRequest>,
) -> Result<StatusCode, AppError> {
    if request.api_key.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter a valid API key".to_string(),
        ));
    }
    state.credentials.set_api_key(&request.api_key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/credential
pub async fn handle_clear_credential(
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.credentials.clear_api_key().await?;
    Ok(StatusCode::NO_CONTENT)
}
