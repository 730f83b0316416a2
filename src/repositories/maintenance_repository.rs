use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::MaintenanceRecord;
use crate::utils::errors::AppError;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        company_id: Uuid,
        vehicle_id: Uuid,
        maintenance_type: String,
        service_date: NaiveDate,
        odometer_at_service: sqlx::types::Decimal,
        cost: Option<sqlx::types::Decimal>,
        notes: Option<String>,
    ) -> Result<MaintenanceRecord, AppError> {
        let id = Uuid::new_v4();

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (
                id, company_id, vehicle_id, maintenance_type, service_date,
                odometer_at_service, cost, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(vehicle_id)
        .bind(maintenance_type)
        .bind(service_date)
        .bind(odometer_at_service)
        .bind(cost)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating maintenance record: {}", e)))?;

        Ok(record)
    }

    pub async fn find_by_vehicle(
        &self,
        company_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE company_id = $1 AND vehicle_id = $2
            ORDER BY service_date DESC
            "#,
        )
        .bind(company_id)
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing maintenance records: {}", e)))?;

        Ok(records)
    }

    /// Último registro por tipo de mantenimiento para un vehículo
    pub async fn find_latest_by_type(
        &self,
        company_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT DISTINCT ON (maintenance_type) *
            FROM maintenance_records
            WHERE company_id = $1 AND vehicle_id = $2
            ORDER BY maintenance_type, service_date DESC
            "#,
        )
        .bind(company_id)
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error reading latest maintenance: {}", e)))?;

        Ok(records)
    }

    /// Último registro por vehículo y tipo para toda la empresa (dashboard)
    pub async fn find_latest_by_type_for_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT DISTINCT ON (vehicle_id, maintenance_type) *
            FROM maintenance_records
            WHERE company_id = $1
            ORDER BY vehicle_id, maintenance_type, service_date DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error reading latest maintenance: {}", e)))?;

        Ok(records)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let deleted = sqlx::query(
            "DELETE FROM maintenance_records WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error deleting maintenance record: {}", e)))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Registro de mantenimiento no encontrado".to_string(),
            ));
        }

        Ok(())
    }
}
