use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::app;
use crate::auth::PasswordHasher;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, Stores};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "goida-api")]
#[command(about = "Goida blog API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run migrations and start the HTTP server (default)")]
    Serve,

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Print a bcrypt hash for seeding credentials")]
    HashPassword {
        #[arg(help = "Plaintext password to hash")]
        password: String,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Migrate => migrate(config).await,
        Commands::HashPassword { password } => hash_password(&config, &password).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    info!("Starting Goida API in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config).await.context("failed to connect to database")?;
    db.migrate().await.context("failed to apply migrations")?;

    let state = AppState::new(&config.security, Stores::postgres(&db)).context("failed to initialise auth")?;
    let router = app::router(state, &config.security);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn migrate(config: AppConfig) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config).await.context("failed to connect to database")?;
    db.migrate().await.context("failed to apply migrations")?;
    db.close().await;
    Ok(())
}

async fn hash_password(config: &AppConfig, password: &str) -> anyhow::Result<()> {
    let hasher = PasswordHasher::new(config.security.bcrypt_cost)?;
    println!("{}", hasher.hash(password).await?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
