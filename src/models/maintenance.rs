use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registro de mantenimiento de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type: String,
    pub service_date: NaiveDate,
    pub odometer_at_service: sqlx::types::Decimal,
    pub cost: Option<sqlx::types::Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Tipos de mantenimiento con heurísticas de salud asociadas
pub const MAINTENANCE_TYPES: &[&str] = &[
    "engine_oil",
    "brake_pads",
    "tires",
    "air_filter",
    "battery",
    "general_service",
];
