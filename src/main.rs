use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use fleet_manager::cache::redis_client::RedisClient;
use fleet_manager::cache::CacheConfig;
use fleet_manager::config::environment::EnvironmentConfig;
use fleet_manager::create_app;
use fleet_manager::database::create_pool;
use fleet_manager::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Fleet Manager - API de gestión de flota");
    info!("==========================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Inicializar Redis y cache
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let redis_config = CacheConfig {
        redis_url,
        default_ttl: 300,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let app_state = AppState::new(pool, config.clone(), redis_client);
    let app = create_app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🏢 Company:");
    info!("   POST /api/company/register - Registrar empresa");
    info!("   POST /api/company/login - Login empresa");
    info!("   GET  /api/company/me - Obtener empresa actual");
    info!("🚗 Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("👤 Driver:");
    info!("   POST /api/driver - Crear conductor");
    info!("   GET  /api/driver - Listar conductores");
    info!("   GET  /api/driver/:id - Obtener conductor");
    info!("   PUT  /api/driver/:id - Actualizar conductor");
    info!("   DELETE /api/driver/:id - Eliminar conductor");
    info!("🚚 Trip:");
    info!("   POST /api/trip - Crear viaje (asigna serial único)");
    info!("   GET  /api/trip - Listar viajes");
    info!("   GET  /api/trip/:id - Obtener viaje");
    info!("   PUT  /api/trip/:id - Actualizar viaje (el serial se conserva)");
    info!("   DELETE /api/trip/:id - Eliminar viaje");
    info!("🔧 Maintenance:");
    info!("   POST /api/maintenance - Registrar mantenimiento");
    info!("   GET  /api/maintenance/vehicle/:id - Historial del vehículo");
    info!("   GET  /api/maintenance/vehicle/:id/health - Salud de piezas");
    info!("   DELETE /api/maintenance/:id - Eliminar registro");
    info!("📄 Document:");
    info!("   POST /api/document - Registrar documento");
    info!("   GET  /api/document - Listar documentos");
    info!("   GET  /api/document/expiring - Documentos por vencer");
    info!("   DELETE /api/document/:id - Eliminar documento");
    info!("🏭 Warehouse:");
    info!("   POST /api/warehouse - Crear almacén");
    info!("   GET  /api/warehouse - Listar almacenes");
    info!("   POST /api/warehouse/rules - Crear regla de auto-asignación");
    info!("   GET  /api/warehouse/rules - Listar reglas");
    info!("   DELETE /api/warehouse/rules/:id - Eliminar regla");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard/summary - Resumen de la flota");
    info!("   POST /api/dashboard/invalidate - Invalidar cache del resumen");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
