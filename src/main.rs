use notes_api::{AppState, app::router::build_router, config::Config, db};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::connect(&config.database_url, config.db_max_connections).await?;
    db::migrate(&pool).await?;
    tracing::info!(database_url = %config.database_url, "database ready");

    let state = AppState::new(pool, &config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        "listening on http://{} (notes auth: {:?})",
        config.bind_addr,
        config.notes_auth
    );
    axum::serve(listener, app).await?;

    Ok(())
}
