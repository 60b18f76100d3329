//! Manufacturer directory management

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::manufacturer::{
        CreateManufacturer, Manufacturer, ManufacturerDetails, ManufacturerDirectory,
        UpdateManufacturer,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ManufacturersService {
    repository: Repository,
}

impl ManufacturersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Manufacturer>> {
        self.repository.manufacturers.list_active().await
    }

    pub async fn list_by_product_line(&self, product_line: &str) -> AppResult<Vec<Manufacturer>> {
        self.repository
            .manufacturers
            .list_by_product_line(product_line)
            .await
    }

    /// Contact directory ordered by product line, with the distinct
    /// product lines listed in order of first appearance
    pub async fn directory(&self) -> AppResult<ManufacturerDirectory> {
        let manufacturers = self.repository.manufacturers.directory().await?;
        let mut product_lines: Vec<String> = Vec::new();
        for m in &manufacturers {
            if !product_lines.contains(&m.product_line) {
                product_lines.push(m.product_line.clone());
            }
        }
        let count = manufacturers.len();
        Ok(ManufacturerDirectory { manufacturers, product_lines, count })
    }

    /// Detail view with inventory usage
    pub async fn details(&self, id: i32) -> AppResult<ManufacturerDetails> {
        let manufacturer = self.repository.manufacturers.get_by_id(id).await?;
        let inventory_count = self.repository.manufacturers.inventory_count(id).await?;
        let branches_with_products = self
            .repository
            .manufacturers
            .branches_with_products(id)
            .await?;
        Ok(ManufacturerDetails {
            manufacturer,
            inventory_count,
            branches_with_products,
        })
    }

    pub async fn create(&self, data: &CreateManufacturer) -> AppResult<Manufacturer> {
        data.validate()?;
        let manufacturer = self.repository.manufacturers.create(data).await?;
        tracing::info!("Manufacturer {} created", manufacturer.id);
        Ok(manufacturer)
    }

    pub async fn update(&self, id: i32, data: &UpdateManufacturer) -> AppResult<Manufacturer> {
        data.validate()?;
        self.repository.manufacturers.update(id, data).await
    }

    /// Delete a manufacturer. Refused while inventory items still
    /// reference it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.manufacturers.get_by_id(id).await?;
        if self.repository.manufacturers.inventory_count(id).await? > 0 {
            return Err(AppError::Conflict(
                "Cannot delete manufacturer with associated inventory items. Please reassign or remove inventory items first."
                    .to_string(),
            ));
        }
        self.repository.manufacturers.delete(id).await?;
        tracing::info!("Manufacturer {} deleted", id);
        Ok(())
    }
}
