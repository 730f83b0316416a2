use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::company_dto::ApiResponse;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceResponse, VehicleHealthResponse,
};
use crate::models::maintenance::MAINTENANCE_TYPES;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::parts_health_service::{interval_for, part_health};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

pub struct MaintenanceController {
    pool: PgPool,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        if !MAINTENANCE_TYPES.contains(&request.maintenance_type.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Tipo de mantenimiento inválido: {}",
                request.maintenance_type
            )));
        }

        let service_date = validate_date(&request.service_date).map_err(|_| {
            AppError::ValidationError("Fecha de servicio inválida (formato YYYY-MM-DD)".to_string())
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

        let odometer = sqlx::types::Decimal::from_f64_retain(request.odometer_at_service)
            .ok_or_else(|| AppError::ValidationError("Odómetro inválido".to_string()))?;

        let cost = match request.cost {
            Some(c) => Some(
                sqlx::types::Decimal::from_f64_retain(c)
                    .ok_or_else(|| AppError::ValidationError("Costo inválido".to_string()))?,
            ),
            None => None,
        };

        let record = MaintenanceRepository::new(self.pool.clone())
            .create(
                company_id,
                request.vehicle_id,
                request.maintenance_type,
                service_date,
                odometer,
                cost,
                request.notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            record.into(),
            "Mantenimiento registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_by_vehicle(
        &self,
        company_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        let records = MaintenanceRepository::new(self.pool.clone())
            .find_by_vehicle(company_id, vehicle_id)
            .await?;

        Ok(records.into_iter().map(MaintenanceResponse::from).collect())
    }

    /// Calcular la salud de piezas de un vehículo a partir del último
    /// mantenimiento registrado de cada tipo.
    pub async fn vehicle_health(
        &self,
        company_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<VehicleHealthResponse, AppError> {
        let vehicle = VehicleRepository::new(self.pool.clone())
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        if vehicle.company_id != company_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta empresa".to_string(),
            ));
        }

        let latest = MaintenanceRepository::new(self.pool.clone())
            .find_latest_by_type(company_id, vehicle_id)
            .await?;

        let today = Utc::now().date_naive();
        let parts = latest
            .iter()
            .filter_map(|record| {
                interval_for(&record.maintenance_type).map(|interval| {
                    part_health(
                        interval,
                        record.service_date,
                        record.odometer_at_service,
                        vehicle.current_odometer,
                        today,
                    )
                })
            })
            .collect();

        Ok(VehicleHealthResponse {
            vehicle_id: vehicle.id,
            license_plate: vehicle.license_plate,
            current_odometer: vehicle.current_odometer.to_string().parse().unwrap_or(0.0),
            parts,
        })
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        MaintenanceRepository::new(self.pool.clone())
            .delete(id, company_id)
            .await?;
        Ok(())
    }
}
