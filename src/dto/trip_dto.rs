use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Request para crear un viaje. La fecha de inicio llega como string ISO
// y se valida antes de invocar la asignación de serial.
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub cargo_type: Option<String>,
    pub warehouse_id: Option<Uuid>,
    pub start_date: String, // YYYY-MM-DD
    pub start_odometer: Option<f64>,
}

// Request para actualizar un viaje. El serial no es editable.
#[derive(Debug, Deserialize)]
pub struct UpdateTripRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub cargo_type: Option<String>,
    pub warehouse_id: Option<Uuid>,
    pub end_date: Option<String>, // YYYY-MM-DD
    pub end_odometer: Option<f64>,
    pub trip_status: Option<String>,
}

// Response de viaje
#[derive(Debug, Serialize)]
pub struct TripResponse {
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
    pub start_odometer: f64,
    pub end_odometer: Option<f64>,
    pub trip_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::models::trip::Trip> for TripResponse {
    fn from(trip: crate::models::trip::Trip) -> Self {
        Self {
            id: trip.id,
            company_id: trip.company_id,
            vehicle_id: trip.vehicle_id,
            driver_id: trip.driver_id,
            trip_serial_number: trip.trip_serial_number,
            serial_is_fallback: trip.serial_is_fallback,
            origin: trip.origin,
            destination: trip.destination,
            cargo_type: trip.cargo_type,
            warehouse_id: trip.warehouse_id,
            start_date: trip.start_date,
            end_date: trip.end_date,
            start_odometer: trip.start_odometer.to_string().parse().unwrap_or(0.0),
            end_odometer: trip
                .end_odometer
                .map(|o| o.to_string().parse().unwrap_or(0.0)),
            trip_status: trip.trip_status,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}
