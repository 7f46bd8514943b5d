//! HTTP request handlers for the payroll compliance API.
//!
//! This module contains the handler functions for all API endpoints.
//! Handlers are the only place the wall clock is read; every core
//! computation receives its timestamps explicitly.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::approval::ApprovalAction;
use crate::error::EngineError;
use crate::models::{PayrollBatch, ReconciliationReport};
use crate::reconciliation::reconcile;
use crate::schedule::{
    compute_deadlines, compute_pay_dates, month_bounds, month_calendar, MonthCalendar,
    PayFrequency,
};

use super::request::{
    ApproveRequest, CalendarQuery, DeadlinesQuery, IngestBatchRequest, PayDatesQuery,
    ReconciliationQuery, RejectRequest, SubmitRequest,
};
use super::response::{ApiError, ApiErrorResponse, DeadlinesResponse, PayDatesResponse};
use super::state::AppState;

/// Actor recorded when a transition request names none.
const DEFAULT_ACTOR: &str = "system";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pay-dates", get(pay_dates_handler))
        .route("/compliance-deadlines", get(deadlines_handler))
        .route("/calendar", get(calendar_handler))
        .route("/reconciliation", get(reconciliation_handler))
        .route("/batches", post(ingest_batch_handler))
        .route("/batches/:id", get(get_batch_handler))
        .route(
            "/batches/:id/submit-for-approval",
            post(submit_for_approval_handler),
        )
        .route("/batches/:id/approve", post(approve_handler))
        .route("/batches/:id/reject", post(reject_handler))
        .with_state(state)
}

/// Logs and converts an engine error into an HTTP error response.
fn fail(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Converts a query-string rejection into an HTTP error response.
fn bad_query(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %rejection, "Malformed query string");
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error: ApiError::malformed_query(rejection.to_string()),
    }
}

/// Converts a JSON body rejection into an HTTP error response.
fn bad_json(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
}

/// Handler for `GET /pay-dates`.
async fn pay_dates_handler(
    State(state): State<AppState>,
    query: Result<Query<PayDatesQuery>, QueryRejection>,
) -> Result<Json<PayDatesResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|r| bad_query(correlation_id, r))?;
    info!(
        correlation_id = %correlation_id,
        year = query.year,
        month = query.month,
        frequency = %query.frequency,
        "Computing pay dates"
    );

    let frequency =
        PayFrequency::parse(&query.frequency).map_err(|e| fail(correlation_id, e))?;
    let pay_dates =
        compute_pay_dates(query.year, query.month, frequency, state.rules().rules().schedule())
            .map_err(|e| fail(correlation_id, e))?;

    Ok(Json(PayDatesResponse {
        year: query.year,
        month: query.month,
        frequency,
        pay_dates,
    }))
}

/// Handler for `GET /compliance-deadlines`.
async fn deadlines_handler(
    State(state): State<AppState>,
    query: Result<Query<DeadlinesQuery>, QueryRejection>,
) -> Result<Json<DeadlinesResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|r| bad_query(correlation_id, r))?;
    info!(
        correlation_id = %correlation_id,
        year = query.year,
        month = query.month,
        jurisdiction = %query.jurisdiction,
        "Computing compliance deadlines"
    );

    let deadlines =
        compute_deadlines(query.year, query.month, &query.jurisdiction, state.rules().rules())
            .map_err(|e| fail(correlation_id, e))?;

    Ok(Json(DeadlinesResponse {
        year: query.year,
        month: query.month,
        jurisdiction: query.jurisdiction.to_uppercase(),
        deadlines,
    }))
}

/// Handler for `GET /calendar`.
async fn calendar_handler(
    State(state): State<AppState>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Json<MonthCalendar>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|r| bad_query(correlation_id, r))?;
    info!(
        correlation_id = %correlation_id,
        year = query.year,
        month = query.month,
        "Composing month calendar"
    );

    let frequency =
        PayFrequency::parse(&query.frequency).map_err(|e| fail(correlation_id, e))?;
    let batch = query
        .company_id
        .and_then(|company| state.store().find_by_period(company, query.year, query.month));

    let calendar = month_calendar(
        query.year,
        query.month,
        frequency,
        &query.jurisdiction,
        batch.as_ref(),
        state.rules().rules(),
    )
    .map_err(|e| fail(correlation_id, e))?;

    Ok(Json(calendar))
}

/// Handler for `GET /reconciliation`.
async fn reconciliation_handler(
    State(state): State<AppState>,
    query: Result<Query<ReconciliationQuery>, QueryRejection>,
) -> Result<Json<ReconciliationReport>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|r| bad_query(correlation_id, r))?;
    info!(
        correlation_id = %correlation_id,
        company_id = %query.company_id,
        year = query.year,
        month = query.month,
        "Reconciling payroll batches"
    );

    month_bounds(query.year, query.month).map_err(|e| fail(correlation_id, e))?;

    let current = state
        .store()
        .find_by_period(query.company_id, query.year, query.month)
        .ok_or_else(|| {
            fail(
                correlation_id,
                EngineError::PeriodNotFound {
                    company_id: query.company_id,
                    year: query.year,
                    month: query.month,
                },
            )
        })?;

    let (prev_year, prev_month) = if query.month == 1 {
        (query.year - 1, 12)
    } else {
        (query.year, query.month - 1)
    };
    let previous = state
        .store()
        .find_by_period(query.company_id, prev_year, prev_month);

    let report = reconcile(
        query.year,
        query.month,
        &current.snapshot,
        previous.as_ref().map(|b| &b.snapshot),
        state.rules().rules().reconciliation(),
    );
    info!(
        correlation_id = %correlation_id,
        anomalies = report.anomalies.len(),
        baseline = previous.is_some(),
        "Reconciliation completed"
    );

    Ok(Json(report))
}

/// Handler for `POST /batches` — ingestion from the processing pipeline.
async fn ingest_batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<IngestBatchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PayrollBatch>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| bad_json(correlation_id, r))?;

    month_bounds(request.year, request.month).map_err(|e| fail(correlation_id, e))?;

    let batch = PayrollBatch::new(
        request.company_id,
        request.year,
        request.month,
        request.processing_status,
        request.currency,
        request.snapshot.into(),
    );
    info!(
        correlation_id = %correlation_id,
        batch_id = %batch.id,
        company_id = %batch.company_id,
        year = batch.year,
        month = batch.month,
        "Batch ingested"
    );

    Ok((StatusCode::CREATED, Json(state.store().insert(batch))))
}

/// Handler for `GET /batches/:id`.
async fn get_batch_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayrollBatch>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let batch = state.store().get(id).map_err(|e| fail(correlation_id, e))?;
    Ok(Json(batch))
}

/// Handler for `POST /batches/:id/submit-for-approval`.
async fn submit_for_approval_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<SubmitRequest>>,
) -> Result<Json<PayrollBatch>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let actor = request.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string());
    info!(correlation_id = %correlation_id, batch_id = %id, actor = %actor, "Submitting batch for approval");

    let batch = state
        .store()
        .apply_approval(
            id,
            &ApprovalAction::Submit {
                notes: request.notes,
            },
            &actor,
            Utc::now(),
        )
        .map_err(|e| fail(correlation_id, e))?;
    Ok(Json(batch))
}

/// Handler for `POST /batches/:id/approve`.
async fn approve_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<ApproveRequest>>,
) -> Result<Json<PayrollBatch>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let actor = request.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string());
    info!(correlation_id = %correlation_id, batch_id = %id, actor = %actor, "Approving batch");

    let batch = state
        .store()
        .apply_approval(id, &ApprovalAction::Approve, &actor, Utc::now())
        .map_err(|e| fail(correlation_id, e))?;
    Ok(Json(batch))
}

/// Handler for `POST /batches/:id/reject`.
async fn reject_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<RejectRequest>>,
) -> Result<Json<PayrollBatch>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let actor = request.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string());
    info!(correlation_id = %correlation_id, batch_id = %id, actor = %actor, "Rejecting batch");

    // Absent notes surface as NOTES_REQUIRED through the machine's guard.
    let notes = request.notes.unwrap_or_default();
    let batch = state
        .store()
        .apply_approval(id, &ApprovalAction::Reject { notes }, &actor, Utc::now())
        .map_err(|e| fail(correlation_id, e))?;
    Ok(Json(batch))
}
