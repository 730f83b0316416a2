use axum::{
    extract::{Path, State},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::warehouse_controller::WarehouseController;
use crate::dto::company_dto::ApiResponse;
use crate::dto::warehouse_dto::{
    CreateWarehouseRequest, CreateWarehouseRuleRequest, WarehouseResponse, WarehouseRuleResponse,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedCompany};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_warehouse_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_warehouse))
        .route("/", get(list_warehouses))
        .route("/rules", post(create_rule))
        .route("/rules", get(list_rules))
        .route("/rules/:id", delete(delete_rule))
        .layer(from_fn_with_state(state, auth_middleware))
}

async fn create_warehouse(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Json(request): Json<CreateWarehouseRequest>,
) -> Result<Json<ApiResponse<WarehouseResponse>>, AppError> {
    let controller = WarehouseController::new(state.pool.clone());
    let response = controller.create(company.company_id, request).await?;
    Ok(Json(response))
}

async fn list_warehouses(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
) -> Result<Json<Vec<WarehouseResponse>>, AppError> {
    let controller = WarehouseController::new(state.pool.clone());
    let response = controller.list_by_company(company.company_id).await?;
    Ok(Json(response))
}

async fn create_rule(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Json(request): Json<CreateWarehouseRuleRequest>,
) -> Result<Json<ApiResponse<WarehouseRuleResponse>>, AppError> {
    let controller = WarehouseController::new(state.pool.clone());
    let response = controller.create_rule(company.company_id, request).await?;
    Ok(Json(response))
}

async fn list_rules(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
) -> Result<Json<Vec<WarehouseRuleResponse>>, AppError> {
    let controller = WarehouseController::new(state.pool.clone());
    let response = controller.list_rules(company.company_id).await?;
    Ok(Json(response))
}

async fn delete_rule(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = WarehouseController::new(state.pool.clone());
    controller.delete_rule(id, company.company_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Regla eliminada exitosamente"
    })))
}
