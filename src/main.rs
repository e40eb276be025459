use std::sync::Arc;

use axum::Router;
use totruth_dashboard::{
    aggregator::WarningService, api, app_state::AppState, client::HttpBackend, config,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Cargar .env e inicializar logging
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 2. Cargar configuración
    let cfg = config::AppConfig::from_env()?;

    // 3. Cliente del backend totruth
    let backend = HttpBackend::from_config(&cfg)?;
    info!(
        "Backend totruth en {} (timeout {:?})",
        cfg.backend_base_url, cfg.backend_timeout
    );

    // 4. Crear estado compartido de la aplicación
    let app_state = AppState {
        config: cfg.clone(),
        service: WarningService::new(Arc::new(backend)),
    };

    // 5. Configurar el router de la API y el servicio de ficheros estáticos del panel
    let app = Router::new()
        .merge(api::create_router(app_state.clone()))
        .fallback_service(ServeDir::new(&app_state.config.frontend_dir))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // 6. Iniciar el servidor
    let server_addr = &app_state.config.server_addr;
    let listener = tokio::net::TcpListener::bind(server_addr).await?;
    info!("🚀 Servidor escuchando en http://{}", server_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
