//! Appointment availability endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::schedule::{AvailabilityQuery, AvailabilityResponse, WeeklyScheduleResponse},
    AppState,
};

/// Get open appointment slots for a date
#[utoipa::path(
    get,
    path = "/appointments/availability",
    tag = "availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability for the requested date", body = AvailabilityResponse),
        (status = 422, description = "Invalid or past date")
    )
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let response = state.services.availability.slots_for_date(&query.date).await?;
    Ok(Json(response))
}

/// Get the weekly schedule projection grouped by optometrist
#[utoipa::path(
    get,
    path = "/appointments/weekly-schedule",
    tag = "availability",
    responses(
        (status = 200, description = "Weekly schedule for all optometrists", body = WeeklyScheduleResponse)
    )
)]
pub async fn get_weekly_schedule(
    State(state): State<AppState>,
) -> AppResult<Json<WeeklyScheduleResponse>> {
    let response = state.services.availability.weekly_schedule().await?;
    Ok(Json(response))
}
