//! Configuración
//!
//! Este módulo contiene la configuración del sistema.

pub mod environment;

pub use environment::EnvironmentConfig;
