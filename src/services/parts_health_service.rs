//! Heurísticas de salud de piezas
//!
//! Este módulo calcula el estado de desgaste de las piezas de un vehículo
//! a partir del último mantenimiento registrado: aritmética de umbrales
//! sobre deltas de odómetro y de fechas.

use chrono::NaiveDate;
use num_traits::ToPrimitive;
use serde::Serialize;
use sqlx::types::Decimal;

/// Intervalo de servicio de una pieza
#[derive(Debug, Clone, Copy)]
pub struct ServiceInterval {
    pub part: &'static str,
    pub interval_km: f64,
    pub interval_days: i64,
}

/// Intervalos de servicio por tipo de mantenimiento
pub const SERVICE_INTERVALS: &[ServiceInterval] = &[
    ServiceInterval { part: "engine_oil", interval_km: 10_000.0, interval_days: 180 },
    ServiceInterval { part: "brake_pads", interval_km: 30_000.0, interval_days: 540 },
    ServiceInterval { part: "tires", interval_km: 50_000.0, interval_days: 1_095 },
    ServiceInterval { part: "air_filter", interval_km: 15_000.0, interval_days: 365 },
    ServiceInterval { part: "battery", interval_km: 100_000.0, interval_days: 1_460 },
    ServiceInterval { part: "general_service", interval_km: 20_000.0, interval_days: 365 },
];

/// Umbral de aviso: a partir de este porcentaje de desgaste la pieza
/// se reporta como próxima a servicio
const DUE_SOON_THRESHOLD: f64 = 80.0;

/// Estado de salud calculado de una pieza
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartStatus {
    Ok,
    DueSoon,
    Overdue,
}

/// Salud de una pieza respecto a su último servicio
#[derive(Debug, Clone, Serialize)]
pub struct PartHealth {
    pub part: String,
    pub status: PartStatus,
    pub wear_percent: f64,
    pub km_since_service: f64,
    pub km_remaining: f64,
    pub days_since_service: i64,
    pub days_remaining: i64,
}

/// Buscar el intervalo de servicio de un tipo de mantenimiento
pub fn interval_for(part: &str) -> Option<&'static ServiceInterval> {
    SERVICE_INTERVALS.iter().find(|i| i.part == part)
}

/// Calcular la salud de una pieza.
///
/// El desgaste es el máximo entre el avance por kilómetros y el avance por
/// días: la pieza vence por el eje que se agote primero.
pub fn part_health(
    interval: &ServiceInterval,
    last_service_date: NaiveDate,
    odometer_at_service: Decimal,
    current_odometer: Decimal,
    today: NaiveDate,
) -> PartHealth {
    let km_since = (current_odometer - odometer_at_service)
        .to_f64()
        .unwrap_or(0.0)
        .max(0.0);
    let days_since = (today - last_service_date).num_days().max(0);

    let km_ratio = km_since / interval.interval_km;
    let day_ratio = days_since as f64 / interval.interval_days as f64;
    let wear_percent = km_ratio.max(day_ratio) * 100.0;

    let status = if wear_percent >= 100.0 {
        PartStatus::Overdue
    } else if wear_percent >= DUE_SOON_THRESHOLD {
        PartStatus::DueSoon
    } else {
        PartStatus::Ok
    };

    PartHealth {
        part: interval.part.to_string(),
        status,
        wear_percent,
        km_since_service: km_since,
        km_remaining: (interval.interval_km - km_since).max(0.0),
        days_since_service: days_since,
        days_remaining: (interval.interval_days - days_since).max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn oil() -> &'static ServiceInterval {
        interval_for("engine_oil").unwrap()
    }

    #[test]
    fn test_fresh_service_is_ok() {
        let health = part_health(
            oil(),
            date(2025, 9, 1),
            Decimal::from(50_000),
            Decimal::from(50_500),
            date(2025, 9, 18),
        );
        assert_eq!(health.status, PartStatus::Ok);
        assert_eq!(health.km_since_service, 500.0);
        assert_eq!(health.km_remaining, 9_500.0);
    }

    #[test]
    fn test_due_soon_by_kilometers() {
        // 8.500 km de 10.000 → 85% de desgaste
        let health = part_health(
            oil(),
            date(2025, 9, 1),
            Decimal::from(50_000),
            Decimal::from(58_500),
            date(2025, 9, 18),
        );
        assert_eq!(health.status, PartStatus::DueSoon);
        assert!((health.wear_percent - 85.0).abs() < 0.01);
    }

    #[test]
    fn test_overdue_by_days_even_with_low_kilometers() {
        // Pocos kilómetros pero 200 días desde el servicio (intervalo 180)
        let health = part_health(
            oil(),
            date(2025, 1, 1),
            Decimal::from(50_000),
            Decimal::from(50_100),
            date(2025, 7, 20),
        );
        assert_eq!(health.status, PartStatus::Overdue);
        assert_eq!(health.days_remaining, 0);
    }

    #[test]
    fn test_odometer_regression_clamps_to_zero() {
        // Odómetro actual menor que el del servicio (corrección manual)
        let health = part_health(
            oil(),
            date(2025, 9, 1),
            Decimal::from(50_000),
            Decimal::from(49_000),
            date(2025, 9, 18),
        );
        assert_eq!(health.km_since_service, 0.0);
        assert_eq!(health.status, PartStatus::Ok);
    }

    #[test]
    fn test_all_known_parts_have_intervals() {
        for part in crate::models::maintenance::MAINTENANCE_TYPES {
            assert!(interval_for(part).is_some(), "sin intervalo para {}", part);
        }
    }
}
