use axum::{
    extract::{Path, State},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::company_dto::ApiResponse;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceResponse, VehicleHealthResponse,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedCompany};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_maintenance))
        .route("/vehicle/:vehicle_id", get(list_by_vehicle))
        .route("/vehicle/:vehicle_id/health", get(vehicle_health))
        .route("/:id", delete(delete_maintenance))
        .layer(from_fn_with_state(state, auth_middleware))
}

async fn create_maintenance(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.create(company.company_id, request).await?;
    Ok(Json(response))
}

async fn list_by_vehicle(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller
        .list_by_vehicle(company.company_id, vehicle_id)
        .await?;
    Ok(Json(response))
}

async fn vehicle_health(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<VehicleHealthResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller
        .vehicle_health(company.company_id, vehicle_id)
        .await?;
    Ok(Json(response))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    controller.delete(id, company.company_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Mantenimiento eliminado exitosamente"
    })))
}
