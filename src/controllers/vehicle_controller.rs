use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::company_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::{Vehicle, VEHICLE_STATUSES};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_license_plate;

pub struct VehicleController {
    repository: VehicleRepository,
}

fn to_response(vehicle: Vehicle) -> VehicleResponse {
    VehicleResponse {
        id: vehicle.id,
        company_id: vehicle.company_id,
        license_plate: vehicle.license_plate,
        brand: vehicle.brand,
        model: vehicle.model,
        vehicle_status: vehicle.vehicle_status,
        current_odometer: vehicle.current_odometer.to_string().parse().unwrap_or(0.0),
        fuel_type: vehicle.fuel_type,
        created_at: vehicle.created_at,
    }
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        // Validar campos
        if request.license_plate.trim().is_empty() {
            return Err(AppError::ValidationError("La matrícula es requerida".to_string()));
        }

        if validate_license_plate(&request.license_plate).is_err() {
            return Err(AppError::ValidationError("Formato de matrícula inválido".to_string()));
        }

        // Verificar que la matrícula no exista para esta empresa
        if self
            .repository
            .license_plate_exists(&request.license_plate, company_id)
            .await?
        {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada para esta empresa".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(
                company_id,
                request.license_plate,
                request.brand,
                request.model,
                request.fuel_type.unwrap_or_else(|| "diesel".to_string()),
                request.current_odometer.unwrap_or(0.0),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            to_response(vehicle),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if vehicle.company_id != company_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a este vehículo".to_string(),
            ));
        }

        Ok(to_response(vehicle))
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_company(company_id).await?;

        Ok(vehicles.into_iter().map(to_response).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        if let Some(ref status) = request.vehicle_status {
            if !VEHICLE_STATUSES.contains(&status.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Estado de vehículo inválido: {}",
                    status
                )));
            }
        }

        let vehicle = self
            .repository
            .update(
                id,
                company_id,
                request.license_plate,
                request.brand,
                request.model,
                request.vehicle_status,
                request.current_odometer,
                request.fuel_type,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            to_response(vehicle),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, company_id).await?;
        Ok(())
    }
}
