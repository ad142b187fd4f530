use anyhow::Result;
use price_monitor::{
    api::{create_router, ApiState},
    database::Database,
    services::{AlertEvaluator, BrevoNotifier, MoralisClient, QueryService, Scheduler},
    Config,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Connect to database
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    let database = Arc::new(Database::new(pool));
    database.create_tables().await?;
    info!("Database connected and tables created");

    // External collaborators, injected everywhere from here
    let price_source = Arc::new(MoralisClient::new(config.price_source.clone()));
    let notifier = Arc::new(BrevoNotifier::new(config.notifier.clone()));

    // Start the sampling/alerting scheduler
    let evaluator = AlertEvaluator::new(
        database.clone(),
        config.notifier.alert_recipient.clone(),
    );
    let scheduler = Scheduler::new(
        database.clone(),
        price_source.clone(),
        notifier,
        evaluator,
        config.assets.clone(),
        &config.scheduler,
    );

    tokio::spawn(async move {
        scheduler.run().await;
    });

    // Start API server
    let query_service = Arc::new(QueryService::new(
        database,
        price_source,
        config.swap.clone(),
        &config.assets,
    ));
    let api_state = ApiState::new(query_service);

    let app = create_router(api_state);
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))
            .await?;

    info!(
        "Server starting on {}:{}",
        config.server.host, config.server.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
