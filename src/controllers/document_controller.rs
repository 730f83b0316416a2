use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::company_dto::ApiResponse;
use crate::dto::document_dto::{CreateDocumentRequest, DocumentResponse};
use crate::models::document::FleetDocument;
use crate::repositories::document_repository::DocumentRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

pub struct DocumentController {
    repository: DocumentRepository,
    warning_days: i64,
}

impl DocumentController {
    pub fn new(pool: PgPool, warning_days: i64) -> Self {
        Self {
            repository: DocumentRepository::new(pool),
            warning_days,
        }
    }

    fn to_response(&self, document: FleetDocument) -> DocumentResponse {
        let today = Utc::now().date_naive();
        let expiry_status = document.expiry_status(today, self.warning_days);

        DocumentResponse {
            id: document.id,
            company_id: document.company_id,
            vehicle_id: document.vehicle_id,
            driver_id: document.driver_id,
            document_type: document.document_type,
            reference_number: document.reference_number,
            expiry_date: document.expiry_date,
            expiry_status,
            created_at: document.created_at,
        }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: CreateDocumentRequest,
    ) -> Result<ApiResponse<DocumentResponse>, AppError> {
        if request.document_type.trim().is_empty() {
            return Err(AppError::ValidationError(
                "El tipo de documento es requerido".to_string(),
            ));
        }

        // El documento debe asociarse a un vehículo o a un conductor
        if request.vehicle_id.is_none() && request.driver_id.is_none() {
            return Err(AppError::ValidationError(
                "El documento debe asociarse a un vehículo o a un conductor".to_string(),
            ));
        }

        let expiry_date = validate_date(&request.expiry_date).map_err(|_| {
            AppError::ValidationError(
                "Fecha de vencimiento inválida (formato YYYY-MM-DD)".to_string(),
            )
        })?;

        let document = self
            .repository
            .create(
                company_id,
                request.vehicle_id,
                request.driver_id,
                request.document_type,
                request.reference_number,
                expiry_date,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            self.to_response(document),
            "Documento registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let documents = self.repository.find_by_company(company_id).await?;

        Ok(documents.into_iter().map(|d| self.to_response(d)).collect())
    }

    pub async fn list_expiring(
        &self,
        company_id: Uuid,
        within_days: Option<i64>,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let days = within_days.unwrap_or(self.warning_days);
        if days < 0 {
            return Err(AppError::ValidationError(
                "El parámetro days no puede ser negativo".to_string(),
            ));
        }

        let documents = self.repository.find_expiring(company_id, days).await?;

        Ok(documents.into_iter().map(|d| self.to_response(d)).collect())
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, company_id).await?;
        Ok(())
    }
}
