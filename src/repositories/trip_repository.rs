use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::trip::Trip;
use crate::services::serial_service::SerialStore;
use crate::utils::errors::AppError;

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        company_id: Uuid,
        vehicle_id: Uuid,
        driver_id: Uuid,
        trip_serial_number: String,
        serial_is_fallback: bool,
        origin: String,
        destination: String,
        cargo_type: Option<String>,
        warehouse_id: Option<Uuid>,
        start_date: NaiveDate,
        start_odometer: sqlx::types::Decimal,
    ) -> Result<Trip, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                id, company_id, vehicle_id, driver_id, trip_serial_number,
                serial_is_fallback, origin, destination, cargo_type, warehouse_id,
                start_date, trip_status, start_odometer, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'planned', $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(trip_serial_number)
        .bind(serial_is_fallback)
        .bind(origin)
        .bind(destination)
        .bind(cargo_type)
        .bind(warehouse_id)
        .bind(start_date)
        .bind(start_odometer)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating trip: {}", e)))?;

        Ok(trip)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding trip: {}", e)))?;

        Ok(trip)
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing trips: {}", e)))?;

        Ok(trips)
    }

    /// Actualizar un viaje existente.
    ///
    /// La columna `trip_serial_number` nunca aparece en el SET: el serial se
    /// asigna una sola vez al crear el viaje y se conserva sin cambios en
    /// todas las ediciones posteriores.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        origin: Option<String>,
        destination: Option<String>,
        cargo_type: Option<String>,
        warehouse_id: Option<Uuid>,
        end_date: Option<NaiveDate>,
        end_odometer: Option<sqlx::types::Decimal>,
        trip_status: Option<String>,
    ) -> Result<Trip, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        if current.company_id != company_id {
            return Err(AppError::Forbidden(
                "El viaje no pertenece a esta empresa".to_string(),
            ));
        }

        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET origin = $2, destination = $3, cargo_type = $4, warehouse_id = $5,
                end_date = $6, end_odometer = $7, trip_status = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(origin.unwrap_or(current.origin))
        .bind(destination.unwrap_or(current.destination))
        .bind(cargo_type.or(current.cargo_type))
        .bind(warehouse_id.or(current.warehouse_id))
        .bind(end_date.or(current.end_date))
        .bind(end_odometer.or(current.end_odometer))
        .bind(trip_status.unwrap_or(current.trip_status))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating trip: {}", e)))?;

        Ok(trip)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let trip = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        if trip.company_id != company_id {
            return Err(AppError::Forbidden(
                "El viaje no pertenece a esta empresa".to_string(),
            ));
        }

        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting trip: {}", e)))?;

        Ok(())
    }

    pub async fn count_in_month(&self, company_id: Uuid, year: i32, month: u32) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM trips
            WHERE company_id = $1
              AND EXTRACT(YEAR FROM start_date) = $2
              AND EXTRACT(MONTH FROM start_date) = $3
            "#,
        )
        .bind(company_id)
        .bind(year)
        .bind(month as i32)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error counting trips: {}", e)))?;

        Ok(result.0)
    }

    pub async fn count_fallback_serials(&self, company_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM trips WHERE company_id = $1 AND serial_is_fallback",
        )
        .bind(company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error counting fallback serials: {}", e)))?;

        Ok(result.0)
    }
}

/// El repositorio de viajes es el almacén de seriales del protocolo de
/// asignación: lector y validador comparten el mismo predicado de alcance
/// (empresa + prefijo vehículo/año).
#[async_trait]
impl SerialStore for TripRepository {
    async fn list_serials_with_prefix(
        &self,
        company_id: Uuid,
        prefix: &str,
    ) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT trip_serial_number FROM trips
            WHERE company_id = $1 AND trip_serial_number LIKE $2 || '%'
            ORDER BY trip_serial_number DESC
            "#,
        )
        .bind(company_id)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error reading serials: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn serial_exists(
        &self,
        company_id: Uuid,
        serial: &str,
        exclude_trip_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM trips
                WHERE company_id = $1
                  AND trip_serial_number = $2
                  AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(company_id)
        .bind(serial)
        .bind(exclude_trip_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error validating serial: {}", e)))?;

        Ok(result.0)
    }
}
