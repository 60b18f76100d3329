//! Analytics repository: aggregate queries feeding the admin dashboard
//! and the PDF report

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::AppResult,
    models::analytics::{FeedbackEntry, ServiceCount},
};

/// Raw feedback aggregates before percentage shaping
#[derive(Debug, Clone, Copy, FromRow)]
pub struct FeedbackAggregates {
    pub total: i64,
    pub avg_rating: Option<f64>,
    pub unique_customers: i64,
}

/// Raw appointment counts before percentage shaping
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AppointmentCounts {
    pub total: i64,
    pub completed: i64,
    pub cancelled: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct ActiveBranchRef {
    pub id: i32,
    pub name: String,
}

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: Pool<Postgres>,
}

impl AnalyticsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Sum of completed reservation totals created in the window
    pub async fn reservation_revenue(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        branch_id: Option<i32>,
    ) -> AppResult<Decimal> {
        let sum: Option<Decimal> = if let Some(branch_id) = branch_id {
            sqlx::query_scalar(
                r#"
                SELECT SUM(total_price) FROM reservations
                WHERE created_at BETWEEN $1 AND $2 AND status = 'completed' AND branch_id = $3
                "#,
            )
            .bind(start)
            .bind(end)
            .bind(branch_id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                r#"
                SELECT SUM(total_price) FROM reservations
                WHERE created_at BETWEEN $1 AND $2 AND status = 'completed'
                "#,
            )
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(sum.unwrap_or_default())
    }

    /// Sum of receipt totals whose linked appointment falls in the window
    pub async fn receipt_revenue(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        branch_id: Option<i32>,
    ) -> AppResult<Decimal> {
        let sum: Option<Decimal> = if let Some(branch_id) = branch_id {
            sqlx::query_scalar(
                r#"
                SELECT SUM(r.total_due)
                FROM receipts r
                JOIN appointments a ON r.appointment_id = a.id
                WHERE a.appointment_date BETWEEN $1 AND $2 AND a.branch_id = $3
                "#,
            )
            .bind(start)
            .bind(end)
            .bind(branch_id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                r#"
                SELECT SUM(r.total_due)
                FROM receipts r
                JOIN appointments a ON r.appointment_id = a.id
                WHERE a.appointment_date BETWEEN $1 AND $2
                "#,
            )
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(sum.unwrap_or_default())
    }

    /// Appointment totals and outcomes over the window, by appointment date
    pub async fn appointment_counts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        branch_id: Option<i32>,
    ) -> AppResult<AppointmentCounts> {
        let base = r#"
            SELECT COUNT(*) as total,
                   COUNT(*) FILTER (WHERE status = 'completed') as completed,
                   COUNT(*) FILTER (WHERE status = 'cancelled') as cancelled
            FROM appointments
            WHERE appointment_date BETWEEN $1 AND $2
        "#;
        let row = if let Some(branch_id) = branch_id {
            sqlx::query_as::<_, AppointmentCounts>(&format!("{} AND branch_id = $3", base))
                .bind(start)
                .bind(end)
                .bind(branch_id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, AppointmentCounts>(base)
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(row)
    }

    /// Feedback volume, average rating and distinct customers over the window
    pub async fn feedback_aggregates(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        branch_id: Option<i32>,
    ) -> AppResult<FeedbackAggregates> {
        let base = r#"
            SELECT COUNT(*) as total,
                   AVG(rating)::float8 as avg_rating,
                   COUNT(DISTINCT customer_id) as unique_customers
            FROM feedback
            WHERE created_at BETWEEN $1 AND $2
        "#;
        let row = if let Some(branch_id) = branch_id {
            sqlx::query_as::<_, FeedbackAggregates>(&format!("{} AND branch_id = $3", base))
                .bind(start)
                .bind(end)
                .bind(branch_id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_as::<_, FeedbackAggregates>(base)
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(row)
    }

    /// Active branches, for the per-branch performance loop
    pub async fn active_branches(&self) -> AppResult<Vec<ActiveBranchRef>> {
        let rows = sqlx::query_as::<_, ActiveBranchRef>(
            "SELECT id, name FROM branches WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Average feedback rating for one branch over the window; None when
    /// the branch received no feedback
    pub async fn branch_avg_rating(
        &self,
        branch_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Option<f64>> {
        let avg: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(rating)::float8 FROM feedback
            WHERE branch_id = $1 AND created_at BETWEEN $2 AND $3
            "#,
        )
        .bind(branch_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(avg)
    }

    /// Top appointment types by volume. Ties break alphabetically so the
    /// ranking is stable.
    pub async fn top_services(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<ServiceCount>> {
        let rows = sqlx::query_as::<_, ServiceCount>(
            r#"
            SELECT type, COUNT(*) as count
            FROM appointments
            WHERE appointment_date BETWEEN $1 AND $2
            GROUP BY type
            ORDER BY count DESC, type ASC
            LIMIT $3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Most recent feedback in the window with customer and branch identity
    pub async fn recent_feedback(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: i64,
    ) -> AppResult<Vec<FeedbackEntry>> {
        let rows = sqlx::query_as::<_, FeedbackEntry>(
            r#"
            SELECT f.id, f.customer_id, u.name as customer_name,
                   f.branch_id, b.name as branch_name,
                   f.rating, f.comment, f.created_at
            FROM feedback f
            JOIN users u ON f.customer_id = u.id
            JOIN branches b ON f.branch_id = b.id
            WHERE f.created_at BETWEEN $1 AND $2
            ORDER BY f.created_at DESC
            LIMIT $3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
