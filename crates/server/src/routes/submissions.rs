use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Json,
};
use serde::Serialize;
use service::submissions::{Submission, SubmissionInput};

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Serialize, Debug)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub data: Submission,
}

#[derive(Serialize, Debug)]
pub struct SubmissionList {
    pub submissions: Vec<Submission>,
}

#[derive(Serialize, Debug)]
pub struct SubmissionItem {
    pub submission: Submission,
}

/// Save or replace the related topics of one question
pub async fn save_submission(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionInput>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(input) = payload?;
    let upserted = state.submissions.upsert(input).await.map_err(ApiError::save_failed)?;
    Ok(Json(SaveResponse {
        success: true,
        message: upserted.message(),
        data: upserted.submission,
    }))
}

/// All saved submissions in stored order
pub async fn list_submissions(State(state): State<AppState>) -> Result<Json<SubmissionList>, ApiError> {
    let submissions = state.submissions.list_all().await.map_err(ApiError::list_failed)?;
    Ok(Json(SubmissionList { submissions }))
}

pub async fn get_submission(
    State(state): State<AppState>,
    question_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SubmissionItem>, ApiError> {
    let Path(question_id) = question_id?;
    let submission = state.submissions.get_by_id(question_id).await.map_err(ApiError::get_failed)?;
    Ok(Json(SubmissionItem { submission }))
}
