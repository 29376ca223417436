use clap::Parser;
use jsondb::{config::CONFIG_FILE_NAME, create_router, MemoryStore, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "jsondb")]
#[command(about = "jsondb - A schema-less JSON document server", long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file holding the collections
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Field used for id lookups in paths
    #[arg(long)]
    id_field: Option<String>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data_file) = self.data_file {
            config.data_file = data_file;
        }
        if let Some(id_field) = self.id_field {
            config.id_field = id_field;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config)?;
    args.apply(&mut config);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize store
    let store = MemoryStore::open(&config.data_file, config.id_field.clone())?;
    tracing::info!("Id field: {}", config.id_field);

    let app = create_router(store, &config);

    // Start server with graceful shutdown
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown complete");
}
