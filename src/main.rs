use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use fleet_records::config::environment::EnvironmentConfig;
use fleet_records::database::connection::{create_pool, run_migrations};
use fleet_records::routes;
use fleet_records::state::AppState;
use fleet_records::storage::{LocalStorage, StorageBackend};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Fleet Records - registro de flota");
    info!("====================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };
    run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    // Inicializar almacenamiento de archivos
    let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(&config.upload_dir).await?);
    info!("✅ Almacenamiento de archivos en '{}'", config.upload_dir);

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(pool, config, storage);
    let app = routes::app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("🏢 Companies:");
    info!("   GET/POST       /api/companies");
    info!("   GET/PUT/DELETE /api/companies/:id");
    info!("   GET            /api/companies/:id/vehicles");
    info!("   GET            /api/companies/:id/drivers");
    info!("   POST           /api/companies/:id/files");
    info!("🚗 Vehicles:");
    info!("   GET/POST       /api/vehicles");
    info!("   GET/PUT/DELETE /api/vehicles/:id");
    info!("   PUT            /api/vehicles/:id/assign");
    info!("   GET            /api/vehicles/:id/driver");
    info!("   POST           /api/vehicles/:id/files");
    info!("🪪 Drivers:");
    info!("   GET/POST       /api/drivers");
    info!("   GET/PUT/DELETE /api/drivers/:id");
    info!("   POST           /api/drivers/:id/files");
    info!("📄 Files:");
    info!("   GET            /api/files");
    info!("   GET/DELETE     /api/files/:id");
    info!("   GET            /api/files/:id/download");
    info!("   GET            /api/files/{{companies,vehicles,drivers}}/:id");
    info!("🔎 Search:");
    info!("   GET            /api/search/{{companies,vehicles,drivers}}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

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
