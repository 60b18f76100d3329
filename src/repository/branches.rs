//! Branches repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::branch::{
        Branch, BranchPublic, BranchStockSummary, BranchSummary, CreateBranch, UpdateBranch,
    },
};

/// Dependent record counts consulted before a branch delete
#[derive(Debug, Clone, Copy)]
pub struct BranchDependents {
    pub users: i64,
    pub stock: i64,
    pub reservations: i64,
    pub appointments: i64,
}

#[derive(Clone)]
pub struct BranchesRepository {
    pool: Pool<Postgres>,
}

impl BranchesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All branches with user and stock counts, for the admin list
    pub async fn list_with_counts(&self) -> AppResult<Vec<BranchSummary>> {
        let rows = sqlx::query_as::<_, BranchSummary>(
            r#"
            SELECT b.id, b.name, b.code, b.address, b.phone, b.email, b.is_active,
                   (SELECT COUNT(*) FROM users u WHERE u.branch_id = b.id) as user_count,
                   (SELECT COUNT(*) FROM inventories i WHERE i.branch_id = b.id) as stock_count
            FROM branches b
            ORDER BY b.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Active branches only, compact form for the customer-facing picker
    pub async fn list_public(&self) -> AppResult<Vec<BranchPublic>> {
        let rows = sqlx::query_as::<_, BranchPublic>(
            "SELECT id, name, code, address, phone FROM branches WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Branch> {
        sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Branch with id {} not found", id)))
    }

    pub async fn code_exists(&self, code: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM branches WHERE UPPER(code) = UPPER($1) AND id != $2)",
            )
            .bind(code)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM branches WHERE UPPER(code) = UPPER($1))")
                .bind(code)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateBranch) -> AppResult<Branch> {
        let row = sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branches (name, code, address, phone, email, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.email)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateBranch) -> AppResult<Branch> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        if data.name.is_some() { sets.push(format!("name = ${}", idx)); idx += 1; }
        if data.code.is_some() { sets.push(format!("code = ${}", idx)); idx += 1; }
        if data.address.is_some() { sets.push(format!("address = ${}", idx)); idx += 1; }
        if data.phone.is_some() { sets.push(format!("phone = ${}", idx)); idx += 1; }
        if data.email.is_some() { sets.push(format!("email = ${}", idx)); idx += 1; }
        if data.is_active.is_some() { sets.push(format!("is_active = ${}", idx)); idx += 1; }

        let query = format!(
            "UPDATE branches SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Branch>(&query);
        if let Some(ref v) = data.name { builder = builder.bind(v); }
        if let Some(ref v) = data.code { builder = builder.bind(v); }
        if let Some(ref v) = data.address { builder = builder.bind(v); }
        if let Some(ref v) = data.phone { builder = builder.bind(v); }
        if let Some(ref v) = data.email { builder = builder.bind(v); }
        if let Some(v) = data.is_active { builder = builder.bind(v); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Branch with id {} not found", id)))
    }

    /// Counts of records that must be cleared before the branch can go
    pub async fn dependent_counts(&self, id: i32) -> AppResult<BranchDependents> {
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE branch_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        let stock: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventories WHERE branch_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        let reservations: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE branch_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        let appointments: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE branch_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(BranchDependents { users, stock, reservations, appointments })
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Branch with id {} not found", id)));
        }
        Ok(())
    }

    /// Stock level summary for the branch detail view
    pub async fn stock_summary(&self, id: i32) -> AppResult<BranchStockSummary> {
        let row = sqlx::query_as::<_, BranchStockSummary>(
            r#"
            SELECT COUNT(*) as total_products,
                   COUNT(*) FILTER (WHERE quantity > low_stock_threshold) as in_stock,
                   COUNT(*) FILTER (WHERE quantity > 0 AND quantity <= low_stock_threshold) as low_stock,
                   COUNT(*) FILTER (WHERE quantity = 0) as out_of_stock
            FROM inventories
            WHERE branch_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
