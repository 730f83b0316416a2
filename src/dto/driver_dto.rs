use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Request para crear un conductor
#[derive(Debug, Deserialize)]
pub struct CreateDriverRequest {
    pub full_name: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub license_expiry: String, // YYYY-MM-DD
}

// Request para actualizar un conductor
#[derive(Debug, Deserialize)]
pub struct UpdateDriverRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<String>, // YYYY-MM-DD
    pub driver_status: Option<String>,
}

// Response de conductor
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub driver_status: String,
    pub created_at: DateTime<Utc>,
}
