//! Routes
//!
//! Este módulo define los routers de Axum por entidad.

pub mod company_routes;
pub mod dashboard_routes;
pub mod document_routes;
pub mod driver_routes;
pub mod maintenance_routes;
pub mod trip_routes;
pub mod vehicle_routes;
pub mod warehouse_routes;
