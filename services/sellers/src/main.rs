use anyhow::Result;
use common::database::{health_check, init_pool};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sellers::{
    build_state, config::Settings, create_router, jwt::SigningSecret,
    repositories::UserRepository,
};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!("Starting sellers service");

    // Initialize database connection pool
    let pool = init_pool(&settings.database).await?;

    // Check database connectivity
    if health_check(&pool).await {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // One secret for the whole process, shared by issuer and verifier
    let secret = SigningSecret::generate();
    let app_state = build_state(pool, &secret, UserRepository::default()).await?;

    info!("Sellers service initialized successfully");

    // Start the web server
    let app = create_router(app_state);

    let address = settings.server.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Sellers service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
