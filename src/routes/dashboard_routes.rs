use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::cache::dashboard_cache::DashboardCache;
use crate::dto::dashboard_dto::DashboardSummary;
use crate::middleware::auth::{auth_middleware, AuthenticatedCompany};
use crate::services::dashboard_service::DashboardService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/invalidate", post(invalidate_summary))
        .layer(from_fn_with_state(state, auth_middleware))
}

async fn get_summary(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
) -> Result<Json<DashboardSummary>, AppError> {
    let cache = DashboardCache::new(state.redis.clone());
    let service = DashboardService::new(state.pool.clone(), cache, &state.config);
    let summary = service.summary(company.company_id).await?;
    Ok(Json(summary))
}

async fn invalidate_summary(
    State(state): State<AppState>,
    Extension(company): Extension<AuthenticatedCompany>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache = DashboardCache::new(state.redis.clone());
    let service = DashboardService::new(state.pool.clone(), cache, &state.config);
    service.invalidate(company.company_id).await;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cache de dashboard invalidado"
    })))
}
