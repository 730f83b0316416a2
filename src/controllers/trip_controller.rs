use std::time::Duration;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::dto::company_dto::ApiResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripResponse, UpdateTripRequest};
use crate::models::trip::TRIP_STATUSES;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::repositories::warehouse_repository::WarehouseRepository;
use crate::services::serial_service::SerialAllocator;
use crate::services::warehouse_assignment_service::select_warehouse;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

pub struct TripController {
    pool: PgPool,
    config: EnvironmentConfig,
}

impl TripController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self { pool, config }
    }

    fn allocator(&self) -> SerialAllocator<TripRepository> {
        SerialAllocator::with_limits(
            TripRepository::new(self.pool.clone()),
            self.config.serial_max_attempts,
            Duration::from_millis(self.config.serial_retry_delay_ms),
        )
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: CreateTripRequest,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        // Validar campos
        if request.origin.trim().is_empty() {
            return Err(AppError::ValidationError("El origen es requerido".to_string()));
        }
        if request.destination.trim().is_empty() {
            return Err(AppError::ValidationError("El destino es requerido".to_string()));
        }

        // La fecha debe ser válida ANTES de invocar la asignación de serial
        let start_date = validate_date(&request.start_date).map_err(|_| {
            AppError::ValidationError("Fecha de inicio inválida (formato YYYY-MM-DD)".to_string())
        })?;

        // Verificar que el vehículo pertenece a la empresa
        let vehicle = VehicleRepository::new(self.pool.clone())
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        if vehicle.company_id != company_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta empresa".to_string(),
            ));
        }

        // Verificar que el conductor pertenece a la empresa
        let driver = DriverRepository::new(self.pool.clone())
            .find_by_id(request.driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;
        if driver.company_id != company_id {
            return Err(AppError::Forbidden(
                "El conductor no pertenece a esta empresa".to_string(),
            ));
        }

        // Auto-asignar almacén si el caller no fijó uno
        let warehouse_id = match request.warehouse_id {
            Some(id) => Some(id),
            None => {
                let rules = WarehouseRepository::new(self.pool.clone())
                    .find_rules_by_company(company_id)
                    .await?;
                select_warehouse(&rules, &request.destination, request.cargo_type.as_deref())
            }
        };

        // Asignar serial único para esta empresa (prefijo vehículo+año)
        let serial = self
            .allocator()
            .allocate(company_id, &vehicle.license_plate, start_date, None)
            .await?;
        let serial_is_fallback = serial.is_fallback();

        let start_odometer = match request.start_odometer {
            Some(o) => sqlx::types::Decimal::from_f64_retain(o)
                .ok_or_else(|| AppError::ValidationError("Odómetro inválido".to_string()))?,
            None => vehicle.current_odometer,
        };

        let trip = TripRepository::new(self.pool.clone())
            .create(
                company_id,
                request.vehicle_id,
                request.driver_id,
                serial.into_inner(),
                serial_is_fallback,
                request.origin,
                request.destination,
                request.cargo_type,
                warehouse_id,
                start_date,
                start_odometer,
            )
            .await?;

        info!(
            "🚚 Viaje creado con serial {} (fallback: {})",
            trip.trip_serial_number, trip.serial_is_fallback
        );

        Ok(ApiResponse::success_with_message(
            trip.into(),
            "Viaje creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, company_id: Uuid) -> Result<TripResponse, AppError> {
        let trip = TripRepository::new(self.pool.clone())
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Viaje no encontrado".to_string()))?;

        if trip.company_id != company_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a este viaje".to_string(),
            ));
        }

        Ok(trip.into())
    }

    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<TripResponse>, AppError> {
        let trips = TripRepository::new(self.pool.clone())
            .find_by_company(company_id)
            .await?;

        Ok(trips.into_iter().map(TripResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        request: UpdateTripRequest,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        if let Some(ref status) = request.trip_status {
            if !TRIP_STATUSES.contains(&status.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Estado de viaje inválido: {}",
                    status
                )));
            }
        }

        let end_date = match request.end_date {
            Some(ref d) => Some(validate_date(d).map_err(|_| {
                AppError::ValidationError("Fecha de fin inválida (formato YYYY-MM-DD)".to_string())
            })?),
            None => None,
        };

        let end_odometer = match request.end_odometer {
            Some(o) => Some(
                sqlx::types::Decimal::from_f64_retain(o)
                    .ok_or_else(|| AppError::ValidationError("Odómetro inválido".to_string()))?,
            ),
            None => None,
        };

        // El serial del viaje se conserva sin cambios en toda edición
        let trip = TripRepository::new(self.pool.clone())
            .update(
                id,
                company_id,
                request.origin,
                request.destination,
                request.cargo_type,
                request.warehouse_id,
                end_date,
                end_odometer,
                request.trip_status,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            trip.into(),
            "Viaje actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        TripRepository::new(self.pool.clone())
            .delete(id, company_id)
            .await?;
        Ok(())
    }
}
