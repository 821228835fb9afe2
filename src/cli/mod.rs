use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::schema::ensure_schema;
use crate::database::{DatabaseManager, MemoryStore, PgStore, Store};
use crate::resources::all_schemas;

#[derive(Parser)]
#[command(name = "resource-api")]
#[command(about = "Ownership-scoped CRUD API for todos, organisations, memberships and records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Mint a signed bearer token for a user")]
    Token {
        #[arg(long, help = "User id to embed in the token")]
        user_id: Uuid,
        #[arg(long, help = "Lifetime in hours (defaults to security.jwt_expiry_hours)")]
        hours: Option<u64>,
    },

    #[command(about = "Create missing resource tables in DATABASE_URL")]
    Migrate,
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Token { user_id, hours } => {
            let keys = JwtKeys::from_secret(
                &config.security.jwt_secret,
                hours.unwrap_or(config.security.jwt_expiry_hours),
            )
            .context("SECURITY_JWT_SECRET must be set to mint tokens")?;
            println!("{}", keys.generate(user_id)?);
            Ok(())
        }
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database).await?;
            ensure_schema(&pool, &all_schemas()).await?;
            info!("Schema up to date");
            Ok(())
        }
    }
}

/// Pick the store from configuration: PostgreSQL when a URL is set, memory otherwise.
async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn Store>> {
    if config.database.url.is_none() {
        warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let pool = DatabaseManager::connect(&config.database).await?;
    if config.database.auto_migrate {
        ensure_schema(&pool, &all_schemas()).await?;
    }
    Ok(Arc::new(PgStore::new(pool)))
}

async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    info!("Starting resource API in {:?} mode", config.environment);

    let store = open_store(config).await?;
    let app = crate::app::app(store, config).context("failed to build router")?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::parse_from(["resource-api"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn token_requires_a_uuid() {
        let id = Uuid::new_v4().to_string();
        let cli = Cli::parse_from(["resource-api", "token", "--user-id", &id, "--hours", "2"]);
        assert!(matches!(cli.command, Some(Commands::Token { hours: Some(2), .. })));
        assert!(Cli::try_parse_from(["resource-api", "token", "--user-id", "bob"]).is_err());
    }
}
