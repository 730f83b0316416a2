use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::parts_health_service::PartHealth;

// Request para registrar un mantenimiento
#[derive(Debug, Deserialize)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: Uuid,
    pub maintenance_type: String,
    pub service_date: String, // YYYY-MM-DD
    pub odometer_at_service: f64,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

// Response de registro de mantenimiento
#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type: String,
    pub service_date: NaiveDate,
    pub odometer_at_service: f64,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<crate::models::maintenance::MaintenanceRecord> for MaintenanceResponse {
    fn from(record: crate::models::maintenance::MaintenanceRecord) -> Self {
        Self {
            id: record.id,
            company_id: record.company_id,
            vehicle_id: record.vehicle_id,
            maintenance_type: record.maintenance_type,
            service_date: record.service_date,
            odometer_at_service: record.odometer_at_service.to_string().parse().unwrap_or(0.0),
            cost: record.cost.map(|c| c.to_string().parse().unwrap_or(0.0)),
            notes: record.notes,
            created_at: record.created_at,
        }
    }
}

// Response de salud de piezas de un vehículo
#[derive(Debug, Serialize)]
pub struct VehicleHealthResponse {
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub current_odometer: f64,
    pub parts: Vec<PartHealth>,
}
