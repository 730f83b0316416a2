use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vehículo de la flota
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub company_id: Uuid,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_status: String,
    pub current_odometer: sqlx::types::Decimal,
    pub fuel_type: String,
    pub created_at: DateTime<Utc>,
}

/// Estados válidos de un vehículo
pub const VEHICLE_STATUSES: &[&str] = &["active", "in_maintenance", "retired"];
