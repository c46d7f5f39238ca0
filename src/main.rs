use std::net::{IpAddr, SocketAddr};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airport_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    routes::build_router,
    state::{AppState, AuthSettings},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,airport_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    let state = AppState::new(
        pool,
        AuthSettings {
            jwt_secret: config.jwt_secret.clone(),
            jwt_ttl_hours: config.jwt_ttl_hours,
        },
    );

    run_migrations(&state.orm).await?;
    tracing::info!("migrations applied");

    let app = build_router(state);

    let addr = SocketAddr::from((config.host.parse::<IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
