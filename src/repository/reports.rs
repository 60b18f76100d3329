//! Reports repository: paginated admin feeds and system counters

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        analytics::{DailyRevenue, ReservationLogEntry, UserActivityEntry},
        appointment::AppointmentLogEntry,
        user::Role,
    },
};

pub const PAGE_SIZE: i64 = 50;

#[derive(Debug, Clone, FromRow)]
struct GroupCount {
    key: Option<String>,
    count: i64,
}

#[derive(Clone)]
pub struct ReportsRepository {
    pool: Pool<Postgres>,
}

impl ReportsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn group_counts(&self, query: &str) -> AppResult<(i64, BTreeMap<String, i64>)> {
        let rows = sqlx::query_as::<_, GroupCount>(query)
            .fetch_all(&self.pool)
            .await?;
        let total = rows.iter().map(|r| r.count).sum();
        let breakdown = rows
            .into_iter()
            .map(|r| (r.key.unwrap_or_else(|| "unknown".to_string()), r.count))
            .collect();
        Ok((total, breakdown))
    }

    /// User total and per-role counts
    pub async fn user_counts(&self) -> AppResult<(i64, BTreeMap<String, i64>)> {
        self.group_counts("SELECT role as key, COUNT(*) as count FROM users GROUP BY role")
            .await
    }

    /// Reservation total and per-status counts
    pub async fn reservation_counts(&self) -> AppResult<(i64, BTreeMap<String, i64>)> {
        self.group_counts(
            "SELECT status as key, COUNT(*) as count FROM reservations GROUP BY status",
        )
        .await
    }

    /// Appointment total and per-status counts
    pub async fn appointment_counts(&self) -> AppResult<(i64, BTreeMap<String, i64>)> {
        self.group_counts(
            "SELECT status as key, COUNT(*) as count FROM appointments GROUP BY status",
        )
        .await
    }

    /// All-time revenue from completed reservations
    pub async fn completed_reservation_revenue(&self) -> AppResult<Decimal> {
        let sum: Option<Decimal> = sqlx::query_scalar(
            "SELECT SUM(total_price) FROM reservations WHERE status = 'completed'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(sum.unwrap_or_default())
    }

    pub async fn prescription_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prescriptions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Reservation log page, newest first, with optional date and status
    /// filters on the creation timestamp
    pub async fn reservation_logs(
        &self,
        page: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: Option<&str>,
    ) -> AppResult<(Vec<ReservationLogEntry>, i64)> {
        let mut conditions = Vec::new();
        let mut idx = 1;
        if start_date.is_some() {
            conditions.push(format!("r.created_at >= ${}", idx));
            idx += 1;
        }
        if end_date.is_some() {
            conditions.push(format!("r.created_at < ${} + INTERVAL '1 day'", idx));
            idx += 1;
        }
        if status.is_some() {
            conditions.push(format!("r.status = ${}", idx));
            idx += 1;
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM reservations r {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(sd) = start_date { count_builder = count_builder.bind(sd); }
        if let Some(ed) = end_date { count_builder = count_builder.bind(ed); }
        if let Some(s) = status { count_builder = count_builder.bind(s); }
        let total = count_builder.fetch_one(&self.pool).await?;

        let query = format!(
            r#"
            SELECT r.id, r.customer_id, u.name as customer_name, u.email as customer_email,
                   r.branch_id, b.name as branch_name, r.total_price, r.status, r.created_at
            FROM reservations r
            JOIN users u ON r.customer_id = u.id
            JOIN branches b ON r.branch_id = b.id
            {}
            ORDER BY r.created_at DESC
            LIMIT ${} OFFSET ${}
            "#,
            where_clause,
            idx,
            idx + 1
        );
        let mut builder = sqlx::query_as::<_, ReservationLogEntry>(&query);
        if let Some(sd) = start_date { builder = builder.bind(sd); }
        if let Some(ed) = end_date { builder = builder.bind(ed); }
        if let Some(s) = status { builder = builder.bind(s); }
        let rows = builder
            .bind(PAGE_SIZE)
            .bind((page - 1) * PAGE_SIZE)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// User activity page with per-user record counts, newest first,
    /// optional role filter
    pub async fn user_activity(
        &self,
        page: i64,
        role: Option<Role>,
    ) -> AppResult<(Vec<UserActivityEntry>, i64)> {
        let where_clause = if role.is_some() { "WHERE u.role = $1" } else { "" };

        let count_query = format!("SELECT COUNT(*) FROM users u {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(r) = role { count_builder = count_builder.bind(r); }
        let total = count_builder.fetch_one(&self.pool).await?;

        let (limit_idx, offset_idx) = if role.is_some() { (2, 3) } else { (1, 2) };
        let query = format!(
            r#"
            SELECT u.id, u.name, u.email, u.role,
                   (SELECT COUNT(*) FROM reservations r WHERE r.customer_id = u.id) as reservations_count,
                   (SELECT COUNT(*) FROM appointments a WHERE a.patient_id = u.id) as appointments_count,
                   (SELECT COUNT(*) FROM prescriptions p WHERE p.patient_id = u.id) as prescriptions_count,
                   u.created_at, u.updated_at
            FROM users u
            {}
            ORDER BY u.created_at DESC
            LIMIT ${} OFFSET ${}
            "#,
            where_clause, limit_idx, offset_idx
        );
        let mut builder = sqlx::query_as::<_, UserActivityEntry>(&query);
        if let Some(r) = role { builder = builder.bind(r); }
        let rows = builder
            .bind(PAGE_SIZE)
            .bind((page - 1) * PAGE_SIZE)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Daily completed-reservation revenue between two dates, ascending
    pub async fn daily_revenue(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<DailyRevenue>> {
        let rows = sqlx::query_as::<_, DailyRevenue>(
            r#"
            SELECT DATE(created_at) as date,
                   SUM(total_price) as daily_revenue,
                   COUNT(*) as reservations_count
            FROM reservations
            WHERE status = 'completed'
              AND created_at >= $1 AND created_at < $2 + INTERVAL '1 day'
            GROUP BY DATE(created_at)
            ORDER BY date
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Appointment log page with patient and optometrist identity, newest
    /// first, optional date (appointment date) and status filters
    pub async fn appointment_logs(
        &self,
        page: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: Option<&str>,
    ) -> AppResult<(Vec<AppointmentLogEntry>, i64)> {
        let mut conditions = Vec::new();
        let mut idx = 1;
        if start_date.is_some() {
            conditions.push(format!("a.appointment_date >= ${}", idx));
            idx += 1;
        }
        if end_date.is_some() {
            conditions.push(format!("a.appointment_date <= ${}", idx));
            idx += 1;
        }
        if status.is_some() {
            conditions.push(format!("a.status = ${}", idx));
            idx += 1;
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM appointments a {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(sd) = start_date { count_builder = count_builder.bind(sd); }
        if let Some(ed) = end_date { count_builder = count_builder.bind(ed); }
        if let Some(s) = status { count_builder = count_builder.bind(s); }
        let total = count_builder.fetch_one(&self.pool).await?;

        let query = format!(
            r#"
            SELECT a.id, a.patient_id, u.name as patient_name, u.email as patient_email,
                   a.optometrist_id, o.name as optometrist_name,
                   a.appointment_date, a.start_time, a.status, a.notes, a.created_at
            FROM appointments a
            JOIN users u ON a.patient_id = u.id
            LEFT JOIN users o ON a.optometrist_id = o.id
            {}
            ORDER BY a.created_at DESC
            LIMIT ${} OFFSET ${}
            "#,
            where_clause,
            idx,
            idx + 1
        );
        let mut builder = sqlx::query_as::<_, AppointmentLogEntry>(&query);
        if let Some(sd) = start_date { builder = builder.bind(sd); }
        if let Some(ed) = end_date { builder = builder.bind(ed); }
        if let Some(s) = status { builder = builder.bind(s); }
        let rows = builder
            .bind(PAGE_SIZE)
            .bind((page - 1) * PAGE_SIZE)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }
}
