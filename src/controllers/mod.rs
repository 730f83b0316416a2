//! Controllers
//!
//! Este módulo contiene la lógica de orquestación de cada entidad.

pub mod company_controller;
pub mod document_controller;
pub mod driver_controller;
pub mod maintenance_controller;
pub mod trip_controller;
pub mod vehicle_controller;
pub mod warehouse_controller;
