//! Cache del resumen de dashboard
//!
//! Este módulo envuelve el cliente Redis con un cache TTL para el resumen
//! agregado del dashboard de cada empresa. El TTL se varía con jitter para
//! que las entradas de distintas empresas no expiren en ráfaga.

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use super::cache_config::CacheOperations;
use super::redis_client::RedisClient;
use crate::dto::dashboard_dto::DashboardSummary;

/// TTL base del resumen en segundos
const SUMMARY_TTL: u64 = 300;

/// Cache TTL del dashboard
#[derive(Clone)]
pub struct DashboardCache {
    redis: RedisClient,
}

impl DashboardCache {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    /// Clave derivada de la empresa; el digest evita claves con
    /// caracteres arbitrarios
    fn key(&self, company_id: Uuid) -> String {
        let digest = md5::compute(company_id.as_bytes());
        self.redis.dashboard_key(&format!("{:x}", digest))
    }

    /// Obtener el resumen cacheado de una empresa
    pub async fn get_summary(&self, company_id: Uuid) -> Result<Option<DashboardSummary>> {
        let key = self.key(company_id);

        match self.redis.get::<DashboardSummary>(&key).await? {
            Some(summary) => {
                debug!("📊 Dashboard cache HIT para empresa {}", company_id);
                Ok(Some(summary))
            }
            None => {
                debug!("📊 Dashboard cache MISS para empresa {}", company_id);
                Ok(None)
            }
        }
    }

    /// Guardar el resumen de una empresa con TTL con jitter
    pub async fn set_summary(&self, company_id: Uuid, summary: &DashboardSummary) -> Result<()> {
        let key = self.key(company_id);
        let ttl = self.jittered_ttl(SUMMARY_TTL);

        self.redis.set(&key, summary, ttl).await?;
        Ok(())
    }

    /// Invalidar el resumen de una empresa (al crear/editar entidades)
    pub async fn invalidate(&self, company_id: Uuid) -> Result<()> {
        let key = self.key(company_id);

        info!("🗑️ Invalidando dashboard cache para empresa {}", company_id);
        self.redis.delete(&key).await?;
        Ok(())
    }

    /// Variar el TTL ±20% para evitar expiraciones sincronizadas
    fn jittered_ttl(&self, base_ttl: u64) -> u64 {
        let mut rng = rand::thread_rng();
        let spread = (base_ttl / 5) as i64;
        let variation = rng.gen_range(-spread..=spread);

        ((base_ttl as i64 + variation).max(30)) as u64
    }
}
