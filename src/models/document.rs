use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Documento con fecha de vencimiento (seguro, permiso, revisión técnica...)
/// asociado a un vehículo o a un conductor.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FleetDocument {
    pub id: Uuid,
    pub company_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub document_type: String,
    pub reference_number: Option<String>,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Estado de vencimiento calculado, nunca persistido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Valid,
    ExpiringSoon,
    Expired,
}

impl FleetDocument {
    /// Clasificar el documento respecto a una fecha de referencia
    pub fn expiry_status(&self, today: NaiveDate, warning_days: i64) -> ExpiryStatus {
        let remaining = (self.expiry_date - today).num_days();
        if remaining < 0 {
            ExpiryStatus::Expired
        } else if remaining <= warning_days {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doc(expiry: NaiveDate) -> FleetDocument {
        FleetDocument {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            vehicle_id: None,
            driver_id: None,
            document_type: "insurance".to_string(),
            reference_number: None,
            expiry_date: expiry,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expiry_status_classification() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 18).unwrap();

        let valid = doc(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(valid.expiry_status(today, 30), ExpiryStatus::Valid);

        let soon = doc(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(soon.expiry_status(today, 30), ExpiryStatus::ExpiringSoon);

        let expired = doc(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(expired.expiry_status(today, 30), ExpiryStatus::Expired);
    }

    #[test]
    fn test_expiry_status_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 18).unwrap();

        // Vence exactamente hoy: aún no está vencido
        let today_doc = doc(today);
        assert_eq!(today_doc.expiry_status(today, 30), ExpiryStatus::ExpiringSoon);

        // Vence exactamente en el límite de aviso
        let limit = doc(NaiveDate::from_ymd_opt(2025, 10, 18).unwrap());
        assert_eq!(limit.expiry_status(today, 30), ExpiryStatus::ExpiringSoon);
    }
}
