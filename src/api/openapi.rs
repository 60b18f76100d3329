//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{availability, branches, eyewear, health, manufacturers, reports, role_requests};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OptiCare API",
        version = "0.1.0",
        description = "Multi-branch optical retail and eyewear clinic REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Availability
        availability::get_availability,
        availability::get_weekly_schedule,
        // Branches
        branches::list_branches,
        branches::list_public_branches,
        branches::get_branch,
        branches::create_branch,
        branches::update_branch,
        branches::delete_branch,
        // Manufacturers
        manufacturers::list_manufacturers,
        manufacturers::get_directory,
        manufacturers::list_by_product_line,
        manufacturers::get_manufacturer,
        manufacturers::create_manufacturer,
        manufacturers::update_manufacturer,
        manufacturers::delete_manufacturer,
        // Role requests
        role_requests::create_role_request,
        role_requests::list_role_requests,
        role_requests::approve_role_request,
        role_requests::reject_role_request,
        role_requests::get_role_request_status,
        // Eyewear
        eyewear::get_reminders,
        eyewear::submit_condition_form,
        eyewear::schedule_eyewear_appointment,
        // Reports
        reports::get_analytics,
        reports::download_analytics_report,
        reports::get_system_stats,
        reports::get_reservation_logs,
        reports::get_user_activity,
        reports::get_revenue_report,
        reports::get_appointment_logs,
    ),
    components(
        schemas(
            // Availability
            crate::models::schedule::AvailabilityQuery,
            crate::models::schedule::AvailabilityResponse,
            crate::models::schedule::WeeklyScheduleResponse,
            crate::models::schedule::OptometristWeek,
            crate::models::schedule::OptometristRef,
            crate::models::schedule::WeekdayEntry,
            crate::models::schedule::WeekdayBranch,
            crate::models::schedule::WeekdayWindow,
            // Branches
            crate::models::branch::Branch,
            crate::models::branch::BranchSummary,
            crate::models::branch::BranchPublic,
            crate::models::branch::BranchDetails,
            crate::models::branch::BranchStockSummary,
            crate::models::branch::CreateBranch,
            crate::models::branch::UpdateBranch,
            // Manufacturers
            crate::models::manufacturer::Manufacturer,
            crate::models::manufacturer::ManufacturerContact,
            crate::models::manufacturer::ManufacturerDetails,
            crate::models::manufacturer::ManufacturerDirectory,
            crate::models::manufacturer::CreateManufacturer,
            crate::models::manufacturer::UpdateManufacturer,
            // Role requests
            crate::models::role_request::RoleRequest,
            crate::models::role_request::RoleRequestDetails,
            crate::models::role_request::RoleRequestStatus,
            crate::models::role_request::RoleRequestStatusResponse,
            crate::models::role_request::CreateRoleRequest,
            crate::models::role_request::ReviewRoleRequest,
            // Eyewear
            crate::models::prescription::EyewearReminder,
            crate::models::prescription::EyewearRemindersResponse,
            crate::models::prescription::ReminderPriority,
            crate::models::prescription::ConditionForm,
            crate::models::prescription::EyewearAppointmentRequest,
            // Users
            crate::models::user::Role,
            crate::models::user::UpgradeRole,
            // Appointments
            crate::models::appointment::AppointmentStatus,
            crate::models::appointment::AppointmentLogEntry,
            // Analytics and reports
            crate::models::analytics::AnalyticsQuery,
            crate::models::analytics::AnalyticsData,
            crate::models::analytics::RevenueAnalytics,
            crate::models::analytics::AppointmentAnalytics,
            crate::models::analytics::FeedbackAnalytics,
            crate::models::analytics::BranchPerformance,
            crate::models::analytics::ServiceCount,
            crate::models::analytics::FeedbackEntry,
            crate::models::analytics::SystemStats,
            crate::models::analytics::CountByGroup,
            crate::models::analytics::ReservationStats,
            crate::models::analytics::TotalOnly,
            crate::models::analytics::ReportFilter,
            crate::models::analytics::ReservationLogEntry,
            crate::models::analytics::UserActivityEntry,
            crate::models::analytics::DailyRevenue,
            crate::models::analytics::RevenueReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Appointment availability"),
        (name = "branches", description = "Branch directory management"),
        (name = "manufacturers", description = "Manufacturer directory management"),
        (name = "role-requests", description = "Role-upgrade workflow"),
        (name = "eyewear", description = "Eyewear reminders and assessments"),
        (name = "reports", description = "Administrative analytics and reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
