use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conductor de la flota
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub driver_status: String,
    pub created_at: DateTime<Utc>,
}

/// Estados válidos de un conductor
pub const DRIVER_STATUSES: &[&str] = &["active", "on_leave", "inactive"];
