/// Tuneline Server - media search, streaming redirects and playlists
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio_util::sync::CancellationToken;
use tuneline_core::MediaResolver;
use tuneline_resolver::YtDlpResolver;
use tuneline_server::{config::ServerConfig, create_router, state::AppState, AuthService};
use tuneline_storage::UserStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tuneline-server")]
#[command(about = "Tuneline media search and playlist server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "TUNELINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
    /// Run one search through the resolver and print the results as JSON
    Search {
        /// Free-text query
        query: String,
    },
    /// Resolve a source locator to its direct stream URL
    Resolve {
        /// Source locator (video URL or id)
        locator: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tuneline_server=info,tuneline_resolver=info,tuneline_storage=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser { username, password } => {
            add_user(&config, &username, &password).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
        Commands::Search { query } => {
            search(&config, &query).await?;
        }
        Commands::Resolve { locator } => {
            resolve(&config, &locator).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Tuneline Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = AppState::from_config(&config).await?;
    let app = create_router(app_state, config.server.web_dir.clone());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn add_user(config: &ServerConfig, username: &str, password: &str) -> anyhow::Result<()> {
    let users = UserStore::open(config.storage.users_path()).await?;

    // Only hashing is used here, so no secret is needed
    let auth_service = AuthService::new(
        Arc::new(users),
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );
    auth_service.register(username, password).await?;

    println!("Created user: {}", username);
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let users = UserStore::open(config.storage.users_path()).await?;

    println!("Users:");
    for username in users.list_usernames().await {
        println!("  {}", username);
    }

    Ok(())
}

async fn search(config: &ServerConfig, query: &str) -> anyhow::Result<()> {
    let resolver = YtDlpResolver::new(config.resolver.options());
    let tracks = resolver.search(query, &CancellationToken::new()).await?;

    println!("{}", serde_json::to_string_pretty(&tracks)?);
    Ok(())
}

async fn resolve(config: &ServerConfig, locator: &str) -> anyhow::Result<()> {
    let resolver = YtDlpResolver::new(config.resolver.options());
    let url = resolver
        .resolve_stream(locator, &CancellationToken::new())
        .await?;

    println!("{}", url);
    Ok(())
}
