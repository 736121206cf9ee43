use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use supplier_auth_bridge::auth::hash_password;
use supplier_auth_bridge::config;
use supplier_auth_bridge::database::{DatabaseManager, MemorySupplierStore, PgSupplierStore, SupplierStore};
use supplier_auth_bridge::{app, is_production, AppState};

#[derive(Parser)]
#[command(name = "supplier-auth-bridge", version, about = "Supplier session authentication service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),
    /// Print an argon2 hash for suppliers.password_hash
    HashPassword { password: String },
}

#[derive(Args, Default)]
struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Overrides API_PORT / PORT
    #[arg(long)]
    port: Option<u16>,
    /// Use an empty in-process supplier store instead of Postgres
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supplier_auth_bridge=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::HashPassword { password }) => {
            let hash = hash_password(&password).map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
            println!("{}", hash);
            Ok(())
        }
        Some(Command::Serve(args)) => serve(args).await,
        None => serve(ServeArgs {
            host: "0.0.0.0".to_string(),
            ..ServeArgs::default()
        })
        .await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting Supplier Auth Bridge in {:?} mode", config.environment);

    let store: Arc<dyn SupplierStore> = if args.in_memory {
        if is_production!() {
            tracing::warn!("Running with the in-memory supplier store in production");
        }
        Arc::new(MemorySupplierStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database).context("failed to configure supplier database")?;
        Arc::new(PgSupplierStore::new(pool, &config.database))
    };

    let app = app(AppState::new(store), config);

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("{}:{}", args.host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Supplier Auth Bridge listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
