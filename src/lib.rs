//! Fleet Manager
//!
//! API de gestión de flota: empresas, vehículos, conductores, viajes con
//! seriales únicos, mantenimientos, documentos y almacenes.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

/// Construir el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    // Sin orígenes configurados se permite cualquiera (desarrollo)
    let cors: CorsLayer = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api/company",
            routes::company_routes::create_company_router(state.clone()),
        )
        .nest(
            "/api/vehicle",
            routes::vehicle_routes::create_vehicle_router(state.clone()),
        )
        .nest(
            "/api/driver",
            routes::driver_routes::create_driver_router(state.clone()),
        )
        .nest(
            "/api/trip",
            routes::trip_routes::create_trip_router(state.clone()),
        )
        .nest(
            "/api/maintenance",
            routes::maintenance_routes::create_maintenance_router(state.clone()),
        )
        .nest(
            "/api/document",
            routes::document_routes::create_document_router(state.clone()),
        )
        .nest(
            "/api/warehouse",
            routes::warehouse_routes::create_warehouse_router(state.clone()),
        )
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(state.clone()),
        )
        .layer(cors)
        .with_state(state)
}

/// Health check con estado de las dependencias
async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let database_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let redis_ok = state.redis.is_connected().await;

    Json(json!({
        "status": if database_ok && redis_ok { "ok" } else { "degraded" },
        "database": database_ok,
        "redis": redis_ok,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
