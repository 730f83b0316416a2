use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Viaje de un vehículo con conductor asignado.
///
/// `trip_serial_number` se calcula una sola vez al crear el viaje y es
/// inmutable: las actualizaciones posteriores nunca tocan esa columna.
/// `serial_is_fallback` indica si el serial se generó por la vía de
/// emergencia con sufijo derivado de timestamp (ver `serial_service`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub trip_serial_number: String,
    pub serial_is_fallback: bool,
    pub origin: String,
    pub destination: String,
    pub cargo_type: Option<String>,
    pub warehouse_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_odometer: sqlx::types::Decimal,
    pub end_odometer: Option<sqlx::types::Decimal>,
    pub trip_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Estados válidos de un viaje
pub const TRIP_STATUSES: &[&str] = &["planned", "in_progress", "completed", "cancelled"];
