//! Servicio de dashboard
//!
//! Este módulo calcula el resumen agregado de la flota de una empresa,
//! cacheado en Redis con TTL corto.

use chrono::{Datelike, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use std::collections::HashSet;

use crate::cache::dashboard_cache::DashboardCache;
use crate::config::environment::EnvironmentConfig;
use crate::dto::dashboard_dto::DashboardSummary;
use crate::repositories::document_repository::DocumentRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::parts_health_service::{interval_for, part_health, PartStatus};
use crate::utils::errors::AppError;

pub struct DashboardService {
    pool: PgPool,
    cache: DashboardCache,
    warning_days: i64,
}

impl DashboardService {
    pub fn new(pool: PgPool, cache: DashboardCache, config: &EnvironmentConfig) -> Self {
        Self {
            pool,
            cache,
            warning_days: config.document_expiry_warning_days,
        }
    }

    /// Obtener el resumen de la empresa, sirviendo desde cache si existe.
    /// Un fallo del cache no tumba la petición: se recalcula desde la base.
    pub async fn summary(&self, company_id: Uuid) -> Result<DashboardSummary, AppError> {
        match self.cache.get_summary(company_id).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!("⚠️ Error leyendo dashboard cache: {}", e),
        }

        let summary = self.compute_summary(company_id).await?;

        if let Err(e) = self.cache.set_summary(company_id, &summary).await {
            warn!("⚠️ Error guardando dashboard cache: {}", e);
        }

        Ok(summary)
    }

    async fn compute_summary(&self, company_id: Uuid) -> Result<DashboardSummary, AppError> {
        let vehicles = VehicleRepository::new(self.pool.clone());
        let trips = TripRepository::new(self.pool.clone());
        let documents = DocumentRepository::new(self.pool.clone());
        let drivers = DriverRepository::new(self.pool.clone());

        let now = Utc::now();

        let (active_vehicles, trips_this_month, documents_expiring, fallback_serial_count) = tokio::try_join!(
            vehicles.count_active(company_id),
            trips.count_in_month(company_id, now.year(), now.month()),
            documents.count_expiring(company_id, self.warning_days),
            trips.count_fallback_serials(company_id),
        )?;

        let licenses_expiring = drivers
            .find_license_expiring(company_id, self.warning_days)
            .await?
            .len() as i64;

        let maintenance_alerts = self.count_maintenance_alerts(company_id).await?;

        Ok(DashboardSummary {
            active_vehicles,
            trips_this_month,
            maintenance_alerts,
            documents_expiring,
            licenses_expiring,
            fallback_serial_count,
            generated_at: now,
        })
    }

    /// Vehículos con al menos una pieza próxima a servicio o vencida,
    /// según el último mantenimiento registrado de cada tipo.
    async fn count_maintenance_alerts(&self, company_id: Uuid) -> Result<i64, AppError> {
        let vehicles = VehicleRepository::new(self.pool.clone())
            .find_by_company(company_id)
            .await?;
        let latest = MaintenanceRepository::new(self.pool.clone())
            .find_latest_by_type_for_company(company_id)
            .await?;

        let odometers: std::collections::HashMap<_, _> = vehicles
            .iter()
            .map(|v| (v.id, v.current_odometer))
            .collect();

        let today = Utc::now().date_naive();
        let mut flagged: HashSet<Uuid> = HashSet::new();

        for record in &latest {
            let Some(current_odometer) = odometers.get(&record.vehicle_id) else {
                continue;
            };
            let Some(interval) = interval_for(&record.maintenance_type) else {
                continue;
            };

            let health = part_health(
                interval,
                record.service_date,
                record.odometer_at_service,
                *current_odometer,
                today,
            );
            if health.status != PartStatus::Ok {
                flagged.insert(record.vehicle_id);
            }
        }

        Ok(flagged.len() as i64)
    }

    /// Invalidar el resumen cacheado (al mutar entidades de la empresa)
    pub async fn invalidate(&self, company_id: Uuid) {
        if let Err(e) = self.cache.invalidate(company_id).await {
            warn!("⚠️ Error invalidando dashboard cache: {}", e);
        }
    }
}
