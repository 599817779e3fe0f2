use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::auth::create_token;
use crate::config::{AppConfig, Environment};
use crate::database::DatabaseManager;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "jobly-api")]
#[command(about = "Jobly - job board REST API over PostgreSQL")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run migrations and serve the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,

    #[command(about = "Print a signed token for a user")]
    Token {
        username: String,

        #[arg(long, help = "Mark the token as admin")]
        admin: bool,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    if config.environment == Environment::Production && config.security.jwt_secret.is_empty() {
        bail!("SECRET_KEY must be set in production");
    }

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::migrate(&pool).await?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        Commands::Token { username, admin } => {
            let token = create_token(&username, admin, &config.security)?;
            println!("{}", token);
            Ok(())
        }
    }
}

async fn serve(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.api.port = port;
    }

    tracing::info!("Starting Jobly API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::migrate(&pool).await?;

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Jobly API listening on http://{}", bind_addr);

    let app = crate::app(AppState::new(pool, config));
    axum::serve(listener, app).await?;
    Ok(())
}
