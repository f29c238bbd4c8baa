use std::sync::Arc;
use subscription_tracker::controllers::subscription::SubscriptionController;
use subscription_tracker::domain::subscription::SubscriptionService;
use subscription_tracker::infrastructure::config::{Config, LogFormat};
use subscription_tracker::infrastructure::db::{check_connection, create_pool, run_migrations};
use subscription_tracker::infrastructure::http::start_http_server;
use subscription_tracker::infrastructure::repositories::SubscriptionRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Subscription Tracker on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool (bounded retries at startup only)
    let pool = create_pool(&config.database_url()).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    // Apply pending migrations
    run_migrations(&pool).await?;
    tracing::info!("Migrations applied successfully");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    let subscription_repo = Arc::new(SubscriptionRepository::new(pool.clone()));

    // 2. Instantiate services (inject repositories)
    let subscription_service = Arc::new(SubscriptionService::new(subscription_repo));

    // 3. Instantiate controllers (inject services)
    let subscription_controller = Arc::new(SubscriptionController::new(subscription_service));

    // Start HTTP server with all routes
    start_http_server(pool, config, subscription_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "subscription_tracker=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "subscription_tracker=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
