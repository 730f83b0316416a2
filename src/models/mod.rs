//! Modelos de dominio
//!
//! Este módulo contiene las entidades persistidas del sistema.

pub mod company;
pub mod document;
pub mod driver;
pub mod maintenance;
pub mod trip;
pub mod vehicle;
pub mod warehouse;
