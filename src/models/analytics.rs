//! Analytics aggregates and report feed rows

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::user::Role;

/// Query parameters for the analytics aggregate and PDF report
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct AnalyticsQuery {
    /// Reporting window in days ending now (default 30)
    pub period: Option<i64>,
    /// Restrict all figures to one branch
    pub branch_id: Option<i32>,
}

/// Revenue breakdown over the reporting window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueAnalytics {
    pub total: Decimal,
    /// Completed product reservations, by creation date
    pub reservations: Decimal,
    /// Service receipts, by the linked appointment's date
    pub receipts: Decimal,
}

/// Appointment volume and outcomes over the reporting window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentAnalytics {
    pub total: i64,
    pub completed: i64,
    pub cancelled: i64,
    /// completed / total as a percentage, 2 decimal places, 0 when empty
    pub completion_rate: f64,
}

/// Feedback volume and sentiment over the reporting window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackAnalytics {
    pub total: i64,
    pub avg_rating: f64,
    pub unique_customers: i64,
    /// feedback / appointments as a percentage, 2 decimal places, 0 when empty
    pub response_rate: f64,
}

/// Per-branch performance line
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BranchPerformance {
    pub name: String,
    pub appointments: i64,
    pub revenue: Decimal,
    pub avg_rating: f64,
}

/// Appointment type ranked by volume
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ServiceCount {
    pub r#type: Option<String>,
    pub count: i64,
}

/// Recent feedback entry with customer and branch identity
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FeedbackEntry {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub branch_id: i32,
    pub branch_name: String,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Full analytics aggregate for one reporting window
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsData {
    pub revenue: RevenueAnalytics,
    pub appointments: AppointmentAnalytics,
    pub feedback: FeedbackAnalytics,
    pub branch_performance: Vec<BranchPerformance>,
    pub top_services: Vec<ServiceCount>,
    pub recent_feedback: Vec<FeedbackEntry>,
}

/// Common pagination envelope for report feeds
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, current_page: i64, per_page: i64, total: i64) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Page {
            data,
            current_page,
            per_page,
            total,
            last_page,
        }
    }
}

/// Shared filters across the paginated report feeds
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct ReportFilter {
    pub page: Option<i64>,
    /// Inclusive lower bound (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub role: Option<Role>,
    pub branch_id: Option<i32>,
}

/// System-wide headline counters with per-group breakdowns
#[derive(Debug, Serialize, ToSchema)]
pub struct SystemStats {
    pub users: CountByGroup,
    pub reservations: ReservationStats,
    pub appointments: CountByGroup,
    pub prescriptions: TotalOnly,
}

/// Total plus a grouped breakdown (by role, by status, ...)
#[derive(Debug, Serialize, ToSchema)]
pub struct CountByGroup {
    pub total: i64,
    pub breakdown: std::collections::BTreeMap<String, i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationStats {
    pub total: i64,
    pub by_status: std::collections::BTreeMap<String, i64>,
    /// Revenue from completed reservations across all time
    pub total_revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TotalOnly {
    pub total: i64,
}

/// Reservation log row for the admin report feed
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReservationLogEntry {
    pub id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub branch_id: i32,
    pub branch_name: String,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// User activity row for the admin report feed
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserActivityEntry {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub reservations_count: i64,
    pub appointments_count: i64,
    pub prescriptions_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One day of completed-reservation revenue
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub daily_revenue: Decimal,
    pub reservations_count: i64,
}

/// Revenue report over a date range with summary totals
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_revenue: Decimal,
    pub total_reservations: i64,
    /// total_revenue / total_reservations, zero when there were none
    pub average_revenue_per_reservation: Decimal,
    pub daily_breakdown: Vec<DailyRevenue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_computes_last_page() {
        let p: Page<i32> = Page::new(vec![], 1, 50, 0);
        assert_eq!(p.last_page, 1);
        let p: Page<i32> = Page::new(vec![], 1, 50, 50);
        assert_eq!(p.last_page, 1);
        let p: Page<i32> = Page::new(vec![], 2, 50, 51);
        assert_eq!(p.last_page, 2);
    }
}
