//! Administrative analytics and report endpoints

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        analytics::{
            AnalyticsData, AnalyticsQuery, Page, ReportFilter, ReservationLogEntry,
            RevenueReport, SystemStats, UserActivityEntry,
        },
        appointment::AppointmentLogEntry,
    },
    AppState,
};

use super::AuthenticatedUser;

/// Analytics aggregate for the admin dashboard
#[utoipa::path(
    get,
    path = "/analytics",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Analytics over the reporting window", body = AnalyticsData),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsData>> {
    claims.require_admin()?;
    let data = state.services.analytics.aggregate(&query).await?;
    Ok(Json(data))
}

/// Download the analytics report as a PDF attachment
#[utoipa::path(
    get,
    path = "/reports/analytics",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "PDF report", content_type = "application/pdf"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn download_analytics_report(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    claims.require_admin()?;
    let report = state
        .services
        .reports
        .analytics_pdf(&query, &claims.name)
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", report.filename))
            .map_err(|e| AppError::Internal(format!("Invalid report filename: {}", e)))?,
    );
    Ok((headers, report.bytes))
}

/// System-wide totals with per-group breakdowns
#[utoipa::path(
    get,
    path = "/reports/system-stats",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "System statistics", body = SystemStats),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_system_stats(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<SystemStats>> {
    claims.require_admin()?;
    let stats = state.services.reports.system_stats().await?;
    Ok(Json(stats))
}

/// Paginated reservation logs
#[utoipa::path(
    get,
    path = "/reports/reservation-logs",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportFilter),
    responses(
        (status = 200, description = "Reservation log page"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_reservation_logs(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<Page<ReservationLogEntry>>> {
    claims.require_admin()?;
    let page = state.services.reports.reservation_logs(&filter).await?;
    Ok(Json(page))
}

/// Paginated user activity with per-user record counts
#[utoipa::path(
    get,
    path = "/reports/user-activity",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportFilter),
    responses(
        (status = 200, description = "User activity page"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_user_activity(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<Page<UserActivityEntry>>> {
    claims.require_admin()?;
    let page = state.services.reports.user_activity(&filter).await?;
    Ok(Json(page))
}

/// Daily completed-reservation revenue with summary totals
#[utoipa::path(
    get,
    path = "/reports/revenue",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportFilter),
    responses(
        (status = 200, description = "Revenue report", body = RevenueReport),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_revenue_report(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<RevenueReport>> {
    claims.require_admin()?;
    let report = state.services.reports.revenue(&filter).await?;
    Ok(Json(report))
}

/// Paginated appointment logs
#[utoipa::path(
    get,
    path = "/reports/appointment-logs",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportFilter),
    responses(
        (status = 200, description = "Appointment log page"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn get_appointment_logs(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<Page<AppointmentLogEntry>>> {
    claims.require_admin()?;
    let page = state.services.reports.appointment_logs(&filter).await?;
    Ok(Json(page))
}
