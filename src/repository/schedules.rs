//! Schedules repository: recurring availability windows and booked slots

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::schedule::ScheduleWindowDetails};

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// First active window for an ISO weekday (1=Monday..7=Sunday), joined
    /// with its optometrist and branch. Lowest id wins when several overlap.
    pub async fn first_active_window(
        &self,
        day_of_week: i16,
    ) -> AppResult<Option<ScheduleWindowDetails>> {
        let row = sqlx::query_as::<_, ScheduleWindowDetails>(
            r#"
            SELECT s.id, s.optometrist_id, u.name as optometrist_name,
                   s.branch_id, b.name as branch_name, b.code as branch_code,
                   s.day_of_week, s.start_time, s.end_time
            FROM schedules s
            JOIN users u ON s.optometrist_id = u.id
            JOIN branches b ON s.branch_id = b.id
            WHERE s.day_of_week = $1 AND s.is_active = TRUE
            ORDER BY s.id
            LIMIT 1
            "#,
        )
        .bind(day_of_week)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// All active windows joined with identity, for the weekly projection.
    /// Ordered so rows group naturally by optometrist.
    pub async fn list_active_windows(&self) -> AppResult<Vec<ScheduleWindowDetails>> {
        let rows = sqlx::query_as::<_, ScheduleWindowDetails>(
            r#"
            SELECT s.id, s.optometrist_id, u.name as optometrist_name,
                   s.branch_id, b.name as branch_name, b.code as branch_code,
                   s.day_of_week, s.start_time, s.end_time
            FROM schedules s
            JOIN users u ON s.optometrist_id = u.id
            JOIN branches b ON s.branch_id = b.id
            WHERE s.is_active = TRUE
            ORDER BY u.name, s.optometrist_id, s.day_of_week, s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Start times of one optometrist's appointments that still occupy a
    /// slot on the given date. Completed and cancelled appointments free
    /// their slot; other optometrists' bookings are irrelevant.
    pub async fn booked_starts(
        &self,
        date: NaiveDate,
        optometrist_id: i32,
    ) -> AppResult<Vec<NaiveTime>> {
        let rows: Vec<NaiveTime> = sqlx::query_scalar(
            r#"
            SELECT start_time FROM appointments
            WHERE appointment_date = $1 AND optometrist_id = $2
              AND status IN ('scheduled', 'confirmed')
            "#,
        )
        .bind(date)
        .bind(optometrist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
