use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::warehouse::{Warehouse, WarehouseRule};
use crate::utils::errors::AppError;

pub struct WarehouseRepository {
    pool: PgPool,
}

impl WarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        name: String,
        city: String,
    ) -> Result<Warehouse, AppError> {
        let id = Uuid::new_v4();

        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (id, company_id, name, city, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(name)
        .bind(city)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating warehouse: {}", e)))?;

        Ok(warehouse)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Warehouse>, AppError> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT * FROM warehouses WHERE company_id = $1 ORDER BY name ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing warehouses: {}", e)))?;

        Ok(warehouses)
    }

    pub async fn create_rule(
        &self,
        company_id: Uuid,
        warehouse_id: Uuid,
        destination_keyword: String,
        cargo_type: Option<String>,
        priority: i32,
    ) -> Result<WarehouseRule, AppError> {
        let id = Uuid::new_v4();

        let rule = sqlx::query_as::<_, WarehouseRule>(
            r#"
            INSERT INTO warehouse_rules (
                id, company_id, warehouse_id, destination_keyword, cargo_type, priority, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(warehouse_id)
        .bind(destination_keyword)
        .bind(cargo_type)
        .bind(priority)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating warehouse rule: {}", e)))?;

        Ok(rule)
    }

    pub async fn find_rules_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<WarehouseRule>, AppError> {
        let rules = sqlx::query_as::<_, WarehouseRule>(
            "SELECT * FROM warehouse_rules WHERE company_id = $1 ORDER BY priority DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing warehouse rules: {}", e)))?;

        Ok(rules)
    }

    pub async fn delete_rule(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM warehouse_rules WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting warehouse rule: {}", e)))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Regla no encontrada".to_string()));
        }

        Ok(())
    }
}
