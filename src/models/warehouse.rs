use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Almacén de la empresa
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Warehouse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

/// Regla de auto-asignación de almacén.
///
/// Una regla aplica cuando el destino del viaje contiene `destination_keyword`
/// y, si `cargo_type` está definido, el tipo de carga coincide. Entre las
/// reglas aplicables gana la de mayor `priority`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WarehouseRule {
    pub id: Uuid,
    pub company_id: Uuid,
    pub warehouse_id: Uuid,
    pub destination_keyword: String,
    pub cargo_type: Option<String>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}
