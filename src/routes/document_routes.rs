use axum::{
    extract::{Path, Query, State},
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::document_controller::DocumentController;
use crate::dto::company_dto::ApiResponse;
use crate::dto::document_dto::{CreateDocumentRequest, DocumentResponse};
use crate::middleware::auth::{auth_middleware, AuthenticatedCompany};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_document_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_document))
        .route("/", get(list_documents))
        .route("/expiring", get(list_expiring))
        .route("/:id", delete(delete_document))
        .layer(from_fn_with_state(state, auth_middleware))
}

#[derive(Debug, Deserialize)]
struct ExpiringQuery {
    days: Option<i64>,
}

async fn create_document(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<Json<ApiResponse<DocumentResponse>>, AppError> {
    let controller =
        DocumentController::new(state.pool.clone(), state.config.document_expiry_warning_days);
    let response = controller.create(company.company_id, request).await?;
    Ok(Json(response))
}

async fn list_documents(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let controller =
        DocumentController::new(state.pool.clone(), state.config.document_expiry_warning_days);
    let response = controller.list_by_company(company.company_id).await?;
    Ok(Json(response))
}

async fn list_expiring(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Query(query): Query<ExpiringQuery>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let controller =
        DocumentController::new(state.pool.clone(), state.config.document_expiry_warning_days);
    let response = controller
        .list_expiring(company.company_id, query.days)
        .await?;
    Ok(Json(response))
}

async fn delete_document(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller =
        DocumentController::new(state.pool.clone(), state.config.document_expiry_warning_days);
    controller.delete(id, company.company_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Documento eliminado exitosamente"
    })))
}
