//! Prescriptions repository

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{error::AppResult, models::prescription::PrescriptionRecord};

#[derive(Clone)]
pub struct PrescriptionsRepository {
    pool: Pool<Postgres>,
}

impl PrescriptionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Most recent active prescriptions for a patient, joined with the
    /// appointment they were issued at
    pub async fn active_for_patient(
        &self,
        patient_id: i32,
        limit: i64,
    ) -> AppResult<Vec<PrescriptionRecord>> {
        let rows = sqlx::query_as::<_, PrescriptionRecord>(
            r#"
            SELECT p.id as prescription_id, p.type, p.expiry_date,
                   a.id as appointment_id, a.appointment_date, p.created_at
            FROM prescriptions p
            JOIN appointments a ON p.appointment_id = a.id
            WHERE p.patient_id = $1 AND p.status = 'active'
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(patient_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Prescription owned by the given patient, if it exists
    pub async fn find_owned(
        &self,
        prescription_id: Uuid,
        patient_id: i32,
    ) -> AppResult<Option<PrescriptionRecord>> {
        let row = sqlx::query_as::<_, PrescriptionRecord>(
            r#"
            SELECT p.id as prescription_id, p.type, p.expiry_date,
                   a.id as appointment_id, a.appointment_date, p.created_at
            FROM prescriptions p
            JOIN appointments a ON p.appointment_id = a.id
            WHERE p.id = $1 AND p.patient_id = $2
            "#,
        )
        .bind(prescription_id)
        .bind(patient_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Record a follow-up eyewear check appointment at the branch of the
    /// source appointment, returning its id
    pub async fn create_followup_appointment(
        &self,
        patient_id: i32,
        source_appointment_id: i32,
        date: NaiveDate,
        time: NaiveTime,
        notes: Option<&str>,
    ) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO appointments
                (patient_id, optometrist_id, branch_id, appointment_date, start_time, end_time,
                 type, status, notes, created_at, updated_at)
            SELECT $1, a.optometrist_id, a.branch_id, $3, $4, $4 + INTERVAL '1 hour',
                   'eyewear_check', 'scheduled', $5, NOW(), NOW()
            FROM appointments a
            WHERE a.id = $2
            RETURNING id
            "#,
        )
        .bind(patient_id)
        .bind(source_appointment_id)
        .bind(date)
        .bind(time)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
