use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        full_name: String,
        phone: Option<String>,
        license_number: String,
        license_expiry: NaiveDate,
    ) -> Result<Driver, AppError> {
        let id = Uuid::new_v4();

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, company_id, full_name, phone, license_number, license_expiry, driver_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'active', $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(full_name)
        .bind(phone)
        .bind(license_number)
        .bind(license_expiry)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing drivers: {}", e)))?;

        Ok(drivers)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        full_name: Option<String>,
        phone: Option<String>,
        license_number: Option<String>,
        license_expiry: Option<NaiveDate>,
        driver_status: Option<String>,
    ) -> Result<Driver, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "El conductor no pertenece a esta empresa".to_string(),
            ));
        }

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET full_name = $2, phone = $3, license_number = $4, license_expiry = $5, driver_status = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name.unwrap_or(current.full_name))
        .bind(phone.or(current.phone))
        .bind(license_number.unwrap_or(current.license_number))
        .bind(license_expiry.unwrap_or(current.license_expiry))
        .bind(driver_status.unwrap_or(current.driver_status))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let driver = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        if driver.company_id != company_id {
            return Err(AppError::Forbidden(
                "El conductor no pertenece a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting driver: {}", e)))?;

        Ok(())
    }

    /// Conductores con licencia vencida o por vencer dentro de `within_days`
    pub async fn find_license_expiring(
        &self,
        company_id: Uuid,
        within_days: i64,
    ) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM drivers
            WHERE company_id = $1
              AND license_expiry <= CURRENT_DATE + $2 * INTERVAL '1 day'
            ORDER BY license_expiry ASC
            "#,
        )
        .bind(company_id)
        .bind(within_days as f64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing expiring licenses: {}", e)))?;

        Ok(drivers)
    }
}
