use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Request para crear un almacén
#[derive(Debug, Deserialize)]
pub struct CreateWarehouseRequest {
    pub name: String,
    pub city: String,
}

// Request para crear una regla de auto-asignación
#[derive(Debug, Deserialize)]
pub struct CreateWarehouseRuleRequest {
    pub warehouse_id: Uuid,
    pub destination_keyword: String,
    pub cargo_type: Option<String>,
    pub priority: Option<i32>,
}

// Response de almacén
#[derive(Debug, Serialize)]
pub struct WarehouseResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

// Response de regla de auto-asignación
#[derive(Debug, Serialize)]
pub struct WarehouseRuleResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub warehouse_id: Uuid,
    pub destination_keyword: String,
    pub cargo_type: Option<String>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}
