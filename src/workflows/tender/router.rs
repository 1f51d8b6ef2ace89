use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{Submission, SubmissionId};
use super::provider::TextGenerator;
use super::repository::{RepositoryError, TenderRepository};
use super::service::{EvaluateError, EvaluationService};

/// Router builder exposing HTTP endpoints for intake, evaluation, and
/// evaluation listings.
pub fn tender_router<R, G>(service: Arc<EvaluationService<R, G>>) -> Router
where
    R: TenderRepository + 'static,
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/api/v1/submissions", post(submit_handler::<R, G>))
        .route(
            "/api/v1/submissions/:submission_id/evaluation",
            post(evaluate_handler::<R, G>).get(evaluation_handler::<R, G>),
        )
        .route("/api/v1/evaluations", get(ranked_handler::<R, G>))
        .route(
            "/api/v1/tenders/:tender_id/evaluations",
            get(tender_evaluations_handler::<R, G>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, G>(
    State(service): State<Arc<EvaluationService<R, G>>>,
    axum::Json(submission): axum::Json<Submission>,
) -> Response
where
    R: TenderRepository + 'static,
    G: TextGenerator + 'static,
{
    match service.submit(submission).await {
        Ok(stored) => (StatusCode::ACCEPTED, axum::Json(stored)).into_response(),
        Err(EvaluateError::Persistence(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "submission already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn evaluate_handler<R, G>(
    State(service): State<Arc<EvaluationService<R, G>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: TenderRepository + 'static,
    G: TextGenerator + 'static,
{
    let id = SubmissionId(submission_id);
    match service.evaluate(&id).await {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluation_handler<R, G>(
    State(service): State<Arc<EvaluationService<R, G>>>,
    Path(submission_id): Path<String>,
) -> Response
where
    R: TenderRepository + 'static,
    G: TextGenerator + 'static,
{
    let id = SubmissionId(submission_id);
    match service.evaluation_for(&id).await {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("no evaluation stored for submission {}", id),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ranked_handler<R, G>(
    State(service): State<Arc<EvaluationService<R, G>>>,
) -> Response
where
    R: TenderRepository + 'static,
    G: TextGenerator + 'static,
{
    match service.ranked().await {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn tender_evaluations_handler<R, G>(
    State(service): State<Arc<EvaluationService<R, G>>>,
    Path(tender_id): Path<String>,
) -> Response
where
    R: TenderRepository + 'static,
    G: TextGenerator + 'static,
{
    match service.ranked_for_tender(&tender_id).await {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: EvaluateError) -> Response {
    let status = match &error {
        EvaluateError::SubmissionNotFound(_) => StatusCode::NOT_FOUND,
        EvaluateError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluateError::Provider(_)
        | EvaluateError::Extraction(_)
        | EvaluateError::Validation(_) => StatusCode::BAD_GATEWAY,
        EvaluateError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
