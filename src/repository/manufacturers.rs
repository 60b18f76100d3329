//! Manufacturers repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::manufacturer::{
        CreateManufacturer, Manufacturer, ManufacturerContact, UpdateManufacturer,
    },
};

#[derive(Clone)]
pub struct ManufacturersRepository {
    pool: Pool<Postgres>,
}

impl ManufacturersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Active manufacturers ordered by name
    pub async fn list_active(&self) -> AppResult<Vec<Manufacturer>> {
        let rows = sqlx::query_as::<_, Manufacturer>(
            "SELECT * FROM manufacturers WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Active manufacturers restricted to one product line
    pub async fn list_by_product_line(&self, product_line: &str) -> AppResult<Vec<Manufacturer>> {
        let rows = sqlx::query_as::<_, Manufacturer>(
            r#"
            SELECT * FROM manufacturers
            WHERE is_active = TRUE AND LOWER(product_line) = LOWER($1)
            ORDER BY name
            "#,
        )
        .bind(product_line)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Contact directory, ordered by product line then name
    pub async fn directory(&self) -> AppResult<Vec<ManufacturerContact>> {
        let rows = sqlx::query_as::<_, ManufacturerContact>(
            r#"
            SELECT id, name, contact_person, phone, email, product_line, address, website
            FROM manufacturers
            WHERE is_active = TRUE
            ORDER BY product_line, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Manufacturer> {
        sqlx::query_as::<_, Manufacturer>("SELECT * FROM manufacturers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Manufacturer with id {} not found", id)))
    }

    pub async fn create(&self, data: &CreateManufacturer) -> AppResult<Manufacturer> {
        let row = sqlx::query_as::<_, Manufacturer>(
            r#"
            INSERT INTO manufacturers
                (name, contact_person, phone, email, product_line, address, website, notes,
                 is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.contact_person)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.product_line)
        .bind(&data.address)
        .bind(&data.website)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateManufacturer) -> AppResult<Manufacturer> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        if data.name.is_some() { sets.push(format!("name = ${}", idx)); idx += 1; }
        if data.contact_person.is_some() { sets.push(format!("contact_person = ${}", idx)); idx += 1; }
        if data.phone.is_some() { sets.push(format!("phone = ${}", idx)); idx += 1; }
        if data.email.is_some() { sets.push(format!("email = ${}", idx)); idx += 1; }
        if data.product_line.is_some() { sets.push(format!("product_line = ${}", idx)); idx += 1; }
        if data.address.is_some() { sets.push(format!("address = ${}", idx)); idx += 1; }
        if data.website.is_some() { sets.push(format!("website = ${}", idx)); idx += 1; }
        if data.notes.is_some() { sets.push(format!("notes = ${}", idx)); idx += 1; }
        if data.is_active.is_some() { sets.push(format!("is_active = ${}", idx)); idx += 1; }

        let query = format!(
            "UPDATE manufacturers SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Manufacturer>(&query);
        if let Some(ref v) = data.name { builder = builder.bind(v); }
        if let Some(ref v) = data.contact_person { builder = builder.bind(v); }
        if let Some(ref v) = data.phone { builder = builder.bind(v); }
        if let Some(ref v) = data.email { builder = builder.bind(v); }
        if let Some(ref v) = data.product_line { builder = builder.bind(v); }
        if let Some(ref v) = data.address { builder = builder.bind(v); }
        if let Some(ref v) = data.website { builder = builder.bind(v); }
        if let Some(ref v) = data.notes { builder = builder.bind(v); }
        if let Some(v) = data.is_active { builder = builder.bind(v); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Manufacturer with id {} not found", id)))
    }

    /// Number of inventory items sourced from this manufacturer
    pub async fn inventory_count(&self, id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventories WHERE manufacturer_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Distinct branch names stocking this manufacturer's products
    pub async fn branches_with_products(&self, id: i32) -> AppResult<Vec<String>> {
        let rows: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT b.name
            FROM inventories i
            JOIN branches b ON i.branch_id = b.id
            WHERE i.manufacturer_id = $1
            ORDER BY b.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Manufacturer with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
