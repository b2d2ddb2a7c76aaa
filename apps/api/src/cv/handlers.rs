//! HTTP surface for the CV aggregate.
//!
//! Assembly and invariant errors resolve before any rendering starts, and a
//! download response body is only written once the PDF export has fully
//! succeeded, so callers never see a partially streamed document.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::cv::assembler::{self, CvSelector};
use crate::cv::main_guard;
use crate::errors::AppError;
use crate::models::cv::{ComposedCv, CvChanges, CvRecord};
use crate::render::pipeline::render_document;
use crate::state::AppState;
use crate::template::render_markup;

#[derive(Debug, Deserialize)]
pub struct CreateCvRequest {
    pub professional_summary: String,
    pub role: Option<String>,
    /// When omitted, the canonical header is resolved.
    pub header_id: Option<Uuid>,
    #[serde(default)]
    pub main_cv: bool,
    #[serde(default)]
    pub skill_ids: Vec<Uuid>,
    #[serde(default)]
    pub experience_ids: Vec<Uuid>,
    #[serde(default)]
    pub project_ids: Vec<Uuid>,
    #[serde(default)]
    pub education_ids: Vec<Uuid>,
    #[serde(default)]
    pub certification_ids: Vec<Uuid>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Partial update body; absent fields leave the record untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCvRequest {
    pub professional_summary: Option<String>,
    pub role: Option<String>,
    pub main_cv: Option<bool>,
    pub skill_ids: Option<Vec<Uuid>>,
    pub experience_ids: Option<Vec<Uuid>>,
    pub project_ids: Option<Vec<Uuid>>,
    pub education_ids: Option<Vec<Uuid>>,
    pub certification_ids: Option<Vec<Uuid>>,
    pub languages: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
}

impl From<UpdateCvRequest> for CvChanges {
    fn from(req: UpdateCvRequest) -> Self {
        CvChanges {
            professional_summary: req.professional_summary,
            role: req.role,
            main_cv: req.main_cv,
            skill_ids: req.skill_ids,
            experience_ids: req.experience_ids,
            project_ids: req.project_ids,
            education_ids: req.education_ids,
            certification_ids: req.certification_ids,
            languages: req.languages,
            interests: req.interests,
        }
    }
}

/// POST /api/v1/cvs
pub async fn create_cv(
    State(state): State<AppState>,
    Json(req): Json<CreateCvRequest>,
) -> Result<(StatusCode, Json<CvRecord>), AppError> {
    if req.professional_summary.trim().is_empty() {
        return Err(AppError::Validation(
            "professional_summary must not be empty".to_string(),
        ));
    }

    let header = match req.header_id {
        Some(id) => state
            .store
            .header_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Header {id} not found")))?,
        None => state
            .store
            .find_canonical_header()
            .await?
            .ok_or_else(|| AppError::NotFound("Header profile not found".to_string()))?,
    };

    if req.main_cv {
        main_guard::ensure_main_slot_free(state.store.as_ref()).await?;
    }

    let now = Utc::now();
    let record = CvRecord {
        id: Uuid::new_v4(),
        header_id: header.id,
        professional_summary: req.professional_summary,
        role: req.role,
        main_cv: req.main_cv,
        skill_ids: req.skill_ids,
        experience_ids: req.experience_ids,
        project_ids: req.project_ids,
        education_ids: req.education_ids,
        certification_ids: req.certification_ids,
        languages: req.languages,
        interests: req.interests,
        created_at: now,
        updated_at: now,
    };
    state.store.insert_cv(&record).await?;

    info!("Created CV {} (main: {})", record.id, record.main_cv);
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/cvs — all aggregates with relations resolved, newest first.
pub async fn list_cvs(State(state): State<AppState>) -> Result<Json<Vec<ComposedCv>>, AppError> {
    let records = state.store.list_cvs().await?;
    let mut composed = Vec::with_capacity(records.len());
    for record in records {
        composed.push(assembler::resolve(state.store.as_ref(), record).await?);
    }
    Ok(Json(composed))
}

/// PATCH /api/v1/cvs/:id
pub async fn update_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCvRequest>,
) -> Result<Json<CvRecord>, AppError> {
    if let Some(summary) = &req.professional_summary {
        if summary.trim().is_empty() {
            return Err(AppError::Validation(
                "professional_summary must not be empty".to_string(),
            ));
        }
    }
    let record = main_guard::apply_update(state.store.as_ref(), id, req.into()).await?;
    info!("Updated CV {id}");
    Ok(Json(record))
}

/// DELETE /api/v1/cvs/:id — removes the aggregate only, never the
/// referenced entities.
pub async fn delete_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_cv(id).await? {
        return Err(AppError::NotFound(format!("CV {id} not found")));
    }
    info!("Deleted CV {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/cvs/main/download
pub async fn download_main_cv(State(state): State<AppState>) -> Result<Response, AppError> {
    let composed = assembler::compose(state.store.as_ref(), CvSelector::Main).await?;
    stream_pdf(&state, composed).await
}

/// GET /api/v1/cvs/:id/download
pub async fn download_cv_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let composed = assembler::compose(state.store.as_ref(), CvSelector::ById(id)).await?;
    stream_pdf(&state, composed).await
}

async fn stream_pdf(state: &AppState, composed: ComposedCv) -> Result<Response, AppError> {
    let markup = render_markup(&composed);
    let artifact = render_document(
        state.renderer.as_ref(),
        &markup,
        &composed.header.full_name,
        state.config.render_timeout(),
    )
    .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename={}", artifact.filename),
        ),
        (
            header::CONTENT_LENGTH,
            artifact.content_length().to_string(),
        ),
    ];
    Ok((headers, artifact.bytes).into_response())
}
