//! Servicios
//!
//! Este módulo contiene la lógica de negocio del sistema.

pub mod dashboard_service;
pub mod parts_health_service;
pub mod serial_service;
pub mod warehouse_assignment_service;
