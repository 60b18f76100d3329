//! Eyewear reminder and self-assessment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        prescription::{ConditionForm, EyewearAppointmentRequest, EyewearRemindersResponse},
        user::Role,
    },
    AppState,
};

use super::AuthenticatedUser;

/// Eyewear check reminders for the logged-in customer
#[utoipa::path(
    get,
    path = "/eyewear/reminders",
    tag = "eyewear",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Due and upcoming reminders", body = EyewearRemindersResponse),
        (status = 403, description = "Customer access required")
    )
)]
pub async fn get_reminders(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<EyewearRemindersResponse>> {
    claims.require_role(&[Role::Customer])?;
    let reminders = state.services.eyewear.reminders(claims.user_id).await?;
    Ok(Json(reminders))
}

/// Submit an eyewear condition self-assessment
#[utoipa::path(
    post,
    path = "/eyewear/{eyewear_id}/condition-form",
    tag = "eyewear",
    security(("bearer_auth" = [])),
    params(("eyewear_id" = Uuid, Path, description = "Prescription id")),
    request_body = ConditionForm,
    responses(
        (status = 201, description = "Assessment accepted"),
        (status = 403, description = "Customer access required"),
        (status = 404, description = "Eyewear not found or not owned by the caller"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn submit_condition_form(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(eyewear_id): Path<Uuid>,
    Json(form): Json<ConditionForm>,
) -> AppResult<(StatusCode, Json<Value>)> {
    claims.require_role(&[Role::Customer])?;
    state
        .services
        .eyewear
        .submit_condition_form(claims.user_id, eyewear_id, &form)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Eyewear condition assessment submitted successfully",
        })),
    ))
}

/// Book a follow-up eyewear check appointment
#[utoipa::path(
    post,
    path = "/eyewear/{eyewear_id}/set-appointment",
    tag = "eyewear",
    security(("bearer_auth" = [])),
    params(("eyewear_id" = Uuid, Path, description = "Prescription id")),
    request_body = EyewearAppointmentRequest,
    responses(
        (status = 201, description = "Check appointment booked"),
        (status = 403, description = "Customer access required"),
        (status = 404, description = "Eyewear not found or not owned by the caller"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn schedule_eyewear_appointment(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(eyewear_id): Path<Uuid>,
    Json(request): Json<EyewearAppointmentRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    claims.require_role(&[Role::Customer])?;
    let appointment_id = state
        .services
        .eyewear
        .schedule_check(claims.user_id, eyewear_id, &request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Eyewear check appointment scheduled successfully",
            "appointment_id": appointment_id,
        })),
    ))
}
