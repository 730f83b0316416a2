use serde::{Deserialize, Serialize};

/// Resumen agregado del dashboard de una empresa.
///
/// `fallback_serial_count` expone cuántos viajes recibieron un serial de
/// emergencia: sirve para monitorear la frecuencia de colisiones del
/// protocolo de asignación.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub active_vehicles: i64,
    pub trips_this_month: i64,
    pub maintenance_alerts: i64,
    pub documents_expiring: i64,
    pub licenses_expiring: i64,
    pub fallback_serial_count: i64,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
