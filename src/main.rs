use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use motor_platform::config::environment::EnvironmentConfig;
use motor_platform::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Motor Platform - Vehicle Checkout API");
    info!("========================================");

    let config = EnvironmentConfig::from_env()?;
    info!(
        "⚙️ Entorno: {} | catálogo: {} | política de refresco: {}",
        config.environment, config.catalog_base_url, config.refresh_policy
    );

    let app_state = AppState::with_nhtsa_catalog(config.clone())?;

    // Carga inicial del listado; si falla el servidor arranca con la lista vacía
    if config.fetch_on_startup {
        match app_state.store.fetch_vehicles().await {
            Ok(count) => info!("✅ {} vehículos cargados del catálogo", count),
            Err(e) => warn!("⚠️ No se pudo cargar el catálogo al arrancar: {}", e),
        }
    }

    if app_state.store.is_empty().await {
        warn!("⚠️ Listado vacío: usa POST /api/vehicles/refresh para cargar el catálogo");
    }

    let app = create_router(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/about - Información de la plataforma");
    info!("🚗 Endpoints - Vehicle:");
    info!("   GET  /api/vehicles?page=&per_page= - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   POST /api/vehicles/refresh - Recargar catálogo");
    info!("   POST /api/vehicles/:id/checkout - Entregar vehículo");
    info!("   POST /api/vehicles/:id/checkin - Devolver vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
