//! DTOs
//!
//! Este módulo contiene los tipos de request/response de la API.

pub mod auth_dto;
pub mod company_dto;
pub mod dashboard_dto;
pub mod document_dto;
pub mod driver_dto;
pub mod maintenance_dto;
pub mod trip_dto;
pub mod vehicle_dto;
pub mod warehouse_dto;
