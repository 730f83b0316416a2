use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::company_dto::ApiResponse;
use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse, UpdateDriverRequest};
use crate::models::driver::{Driver, DRIVER_STATUSES};
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

pub struct DriverController {
    repository: DriverRepository,
}

fn to_response(driver: Driver) -> DriverResponse {
    DriverResponse {
        id: driver.id,
        company_id: driver.company_id,
        full_name: driver.full_name,
        phone: driver.phone,
        license_number: driver.license_number,
        license_expiry: driver.license_expiry,
        driver_status: driver.driver_status,
        created_at: driver.created_at,
    }
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        if request.full_name.trim().is_empty() {
            return Err(AppError::ValidationError("El nombre es requerido".to_string()));
        }
        if request.license_number.trim().is_empty() {
            return Err(AppError::ValidationError(
                "El número de licencia es requerido".to_string(),
            ));
        }

        let license_expiry = validate_date(&request.license_expiry).map_err(|_| {
            AppError::ValidationError(
                "Fecha de vencimiento de licencia inválida (formato YYYY-MM-DD)".to_string(),
            )
        })?;

        let driver = self
            .repository
            .create(
                company_id,
                request.full_name,
                request.phone,
                request.license_number,
                license_expiry,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            to_response(driver),
            "Conductor creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, company_id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        if driver.company_id != company_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a este conductor".to_string(),
            ));
        }

        Ok(to_response(driver))
    }

    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<DriverResponse>, AppError> {
        let drivers = self.repository.find_by_company(company_id).await?;

        Ok(drivers.into_iter().map(to_response).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        company_id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        if let Some(ref status) = request.driver_status {
            if !DRIVER_STATUSES.contains(&status.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Estado de conductor inválido: {}",
                    status
                )));
            }
        }

        let license_expiry = match request.license_expiry {
            Some(ref d) => Some(validate_date(d).map_err(|_| {
                AppError::ValidationError(
                    "Fecha de vencimiento de licencia inválida (formato YYYY-MM-DD)".to_string(),
                )
            })?),
            None => None,
        };

        let driver = self
            .repository
            .update(
                id,
                company_id,
                request.full_name,
                request.phone,
                request.license_number,
                license_expiry,
                request.driver_status,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            to_response(driver),
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, company_id).await?;
        Ok(())
    }
}
