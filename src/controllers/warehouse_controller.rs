use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::company_dto::ApiResponse;
use crate::dto::warehouse_dto::{
    CreateWarehouseRequest, CreateWarehouseRuleRequest, WarehouseResponse, WarehouseRuleResponse,
};
use crate::models::warehouse::{Warehouse, WarehouseRule};
use crate::repositories::warehouse_repository::WarehouseRepository;
use crate::utils::errors::AppError;

pub struct WarehouseController {
    repository: WarehouseRepository,
}

fn to_response(warehouse: Warehouse) -> WarehouseResponse {
    WarehouseResponse {
        id: warehouse.id,
        company_id: warehouse.company_id,
        name: warehouse.name,
        city: warehouse.city,
        created_at: warehouse.created_at,
    }
}

fn rule_to_response(rule: WarehouseRule) -> WarehouseRuleResponse {
    WarehouseRuleResponse {
        id: rule.id,
        company_id: rule.company_id,
        warehouse_id: rule.warehouse_id,
        destination_keyword: rule.destination_keyword,
        cargo_type: rule.cargo_type,
        priority: rule.priority,
        created_at: rule.created_at,
    }
}

impl WarehouseController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: WarehouseRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        request: CreateWarehouseRequest,
    ) -> Result<ApiResponse<WarehouseResponse>, AppError> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("El nombre es requerido".to_string()));
        }
        if request.city.trim().is_empty() {
            return Err(AppError::ValidationError("La ciudad es requerida".to_string()));
        }

        let warehouse = self
            .repository
            .create(company_id, request.name, request.city)
            .await?;

        Ok(ApiResponse::success_with_message(
            to_response(warehouse),
            "Almacén creado exitosamente".to_string(),
        ))
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<WarehouseResponse>, AppError> {
        let warehouses = self.repository.find_by_company(company_id).await?;

        Ok(warehouses.into_iter().map(to_response).collect())
    }

    pub async fn create_rule(
        &self,
        company_id: Uuid,
        request: CreateWarehouseRuleRequest,
    ) -> Result<ApiResponse<WarehouseRuleResponse>, AppError> {
        if request.destination_keyword.trim().is_empty() {
            return Err(AppError::ValidationError(
                "La palabra clave de destino es requerida".to_string(),
            ));
        }

        // Verificar que el almacén pertenece a la empresa
        let owned = self
            .repository
            .find_by_company(company_id)
            .await?
            .iter()
            .any(|w| w.id == request.warehouse_id);
        if !owned {
            return Err(AppError::Forbidden(
                "El almacén no pertenece a esta empresa".to_string(),
            ));
        }

        let rule = self
            .repository
            .create_rule(
                company_id,
                request.warehouse_id,
                request.destination_keyword,
                request.cargo_type,
                request.priority.unwrap_or(1),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            rule_to_response(rule),
            "Regla creada exitosamente".to_string(),
        ))
    }

    pub async fn list_rules(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<WarehouseRuleResponse>, AppError> {
        let rules = self.repository.find_rules_by_company(company_id).await?;

        Ok(rules.into_iter().map(rule_to_response).collect())
    }

    pub async fn delete_rule(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        self.repository.delete_rule(id, company_id).await?;
        Ok(())
    }
}
