use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::resources::dtos::CreatedResourceDto;
use crate::features::resources::services::CreatedResource;
use crate::features::submissions::dtos::{
    StepValidationResponseDto, ValidateStepDto, WizardAction,
};
use crate::features::submissions::models::{ResourceDraft, SubmissionWizard};
use crate::features::submissions::services::{DraftStore, SubmissionService};
use crate::shared::types::ErrorResponse;

/// State for submission handlers
#[derive(Clone)]
pub struct SubmissionState {
    pub service: Arc<SubmissionService>,
    pub drafts: Arc<DraftStore>,
}

fn validated(draft: &ResourceDraft) -> Result<()> {
    draft
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

fn created(created: CreatedResource) -> (StatusCode, Json<CreatedResourceDto>) {
    tracing::debug!(
        "Returning submitted resource {} (persisted={})",
        created.resource.id,
        created.persisted
    );
    (StatusCode::CREATED, Json(created.into()))
}

/// Check a wizard step and move forward or back
#[utoipa::path(
    post,
    path = "/api/submissions/validate",
    request_body = ValidateStepDto,
    responses(
        (status = 200, description = "Step checked", body = StepValidationResponseDto),
        (status = 400, description = "Malformed request", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn validate_step(
    AppJson(dto): AppJson<ValidateStepDto>,
) -> Result<Json<StepValidationResponseDto>> {
    let mut wizard = SubmissionWizard::at(dto.step, dto.draft);

    let validation = match dto.action {
        WizardAction::Advance => wizard.advance(),
        WizardAction::Back => {
            let validation = wizard.validate_current();
            wizard.back();
            validation
        }
    };

    Ok(Json(StepValidationResponseDto {
        validation,
        step: wizard.step(),
        ready_to_submit: wizard.validate_for_submit().is_valid(),
    }))
}

/// Get a saved draft
#[utoipa::path(
    get,
    path = "/api/submissions/drafts/{draft_id}",
    params(
        ("draft_id" = String, Path, description = "Draft ID")
    ),
    responses(
        (status = 200, description = "Saved draft", body = ResourceDraft),
        (status = 400, description = "Invalid draft id", body = ErrorResponse),
        (status = 404, description = "Draft not found", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn get_draft(
    State(state): State<SubmissionState>,
    Path(draft_id): Path<String>,
) -> Result<Json<ResourceDraft>> {
    let draft = state.drafts.load(&draft_id).await?;
    Ok(Json(draft))
}

/// Save (create or replace) a draft
#[utoipa::path(
    put,
    path = "/api/submissions/drafts/{draft_id}",
    params(
        ("draft_id" = String, Path, description = "Draft ID")
    ),
    request_body = ResourceDraft,
    responses(
        (status = 200, description = "Draft saved", body = ResourceDraft),
        (status = 400, description = "Invalid draft", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn save_draft(
    State(state): State<SubmissionState>,
    Path(draft_id): Path<String>,
    AppJson(draft): AppJson<ResourceDraft>,
) -> Result<Json<ResourceDraft>> {
    validated(&draft)?;

    state.drafts.save(&draft_id, &draft).await?;
    Ok(Json(draft))
}

/// Discard a draft
#[utoipa::path(
    delete,
    path = "/api/submissions/drafts/{draft_id}",
    params(
        ("draft_id" = String, Path, description = "Draft ID")
    ),
    responses(
        (status = 204, description = "Draft discarded"),
        (status = 400, description = "Invalid draft id", body = ErrorResponse),
        (status = 404, description = "Draft not found", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn discard_draft(
    State(state): State<SubmissionState>,
    Path(draft_id): Path<String>,
) -> Result<StatusCode> {
    if !state.drafts.clear(&draft_id).await? {
        return Err(AppError::NotFound(format!("Draft {} not found", draft_id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Submit a saved draft
///
/// The draft is removed only after the resource is created or acknowledged.
#[utoipa::path(
    post,
    path = "/api/submissions/drafts/{draft_id}/submit",
    params(
        ("draft_id" = String, Path, description = "Draft ID")
    ),
    responses(
        (status = 201, description = "Resource created or acknowledged", body = CreatedResourceDto),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Draft or address not found", body = ErrorResponse),
        (status = 502, description = "Geocoding service failed", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn submit_draft(
    State(state): State<SubmissionState>,
    Path(draft_id): Path<String>,
) -> Result<(StatusCode, Json<CreatedResourceDto>)> {
    let draft = state.drafts.load(&draft_id).await?;
    let resource = state.service.submit(&draft).await?;

    if let Err(e) = state.drafts.clear(&draft_id).await {
        tracing::warn!("Submitted draft {} could not be cleared: {}", draft_id, e);
    }

    Ok(created(resource))
}

/// Submit a completed form without saving a draft
#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = ResourceDraft,
    responses(
        (status = 201, description = "Resource created or acknowledged", body = CreatedResourceDto),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Address not found", body = ErrorResponse),
        (status = 502, description = "Geocoding service failed", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn submit(
    State(state): State<SubmissionState>,
    AppJson(draft): AppJson<ResourceDraft>,
) -> Result<(StatusCode, Json<CreatedResourceDto>)> {
    validated(&draft)?;

    let resource = state.service.submit(&draft).await?;
    Ok(created(resource))
}
