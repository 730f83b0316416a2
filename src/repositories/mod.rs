//! Repositorios
//!
//! Este módulo contiene el acceso a datos de cada entidad.
//! Todas las consultas se limitan a la empresa autenticada.

pub mod company_repository;
pub mod document_repository;
pub mod driver_repository;
pub mod maintenance_repository;
pub mod trip_repository;
pub mod vehicle_repository;
pub mod warehouse_repository;
