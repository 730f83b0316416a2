use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::FleetDocument;
use crate::utils::errors::AppError;

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        company_id: Uuid,
        vehicle_id: Option<Uuid>,
        driver_id: Option<Uuid>,
        document_type: String,
        reference_number: Option<String>,
        expiry_date: NaiveDate,
    ) -> Result<FleetDocument, AppError> {
        let id = Uuid::new_v4();

        let document = sqlx::query_as::<_, FleetDocument>(
            r#"
            INSERT INTO fleet_documents (
                id, company_id, vehicle_id, driver_id, document_type,
                reference_number, expiry_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(document_type)
        .bind(reference_number)
        .bind(expiry_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating document: {}", e)))?;

        Ok(document)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<FleetDocument>, AppError> {
        let documents = sqlx::query_as::<_, FleetDocument>(
            "SELECT * FROM fleet_documents WHERE company_id = $1 ORDER BY expiry_date ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing documents: {}", e)))?;

        Ok(documents)
    }

    /// Documentos vencidos o por vencer dentro de `within_days`
    pub async fn find_expiring(
        &self,
        company_id: Uuid,
        within_days: i64,
    ) -> Result<Vec<FleetDocument>, AppError> {
        let documents = sqlx::query_as::<_, FleetDocument>(
            r#"
            SELECT * FROM fleet_documents
            WHERE company_id = $1
              AND expiry_date <= CURRENT_DATE + $2 * INTERVAL '1 day'
            ORDER BY expiry_date ASC
            "#,
        )
        .bind(company_id)
        .bind(within_days as f64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing expiring documents: {}", e)))?;

        Ok(documents)
    }

    pub async fn count_expiring(&self, company_id: Uuid, within_days: i64) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM fleet_documents
            WHERE company_id = $1
              AND expiry_date <= CURRENT_DATE + $2 * INTERVAL '1 day'
            "#,
        )
        .bind(company_id)
        .bind(within_days as f64)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error counting expiring documents: {}", e)))?;

        Ok(result.0)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM fleet_documents WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting document: {}", e)))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Documento no encontrado".to_string()));
        }

        Ok(())
    }
}
