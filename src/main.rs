use axum::serve;
use clap::Parser;
use color_eyre::Result;
use logstash_exporter::{
    config::{
        self,
        Config,
        Settings,
    },
    server::create_router,
    Orchestrator,
};
use std::{
    path::PathBuf,
    sync::Arc,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

#[derive(Parser, Debug)]
#[command(name = "logstash-exporter")]
#[command(about = "A Prometheus exporter for Logstash metrics")]
#[command(version)]
struct Args {
    /// URL of the Logstash instance to monitor
    #[arg(long, env = "LOGSTASH_EXPORTER_URL", default_value = config::DEFAULT_LOGSTASH_URL)]
    logstash_url: String,

    /// The address to listen on for Prometheus scrapes
    #[arg(long, env = "LOGSTASH_EXPORTER_LISTEN_ADDRESS", default_value = config::DEFAULT_LISTEN_ADDRESS)]
    listen_address: String,

    /// Deadline for each request against Logstash (e.g. "10s", "1500ms")
    #[arg(long, env = "LOGSTASH_EXPORTER_SCRAPE_TIMEOUT", default_value = config::DEFAULT_SCRAPE_TIMEOUT)]
    scrape_timeout: String,

    /// Path to a YAML config file. Replaces the flags above when given.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        match &self.config {
            Some(path) => config::load_settings(path),
            None => Ok(Settings {
                logstash_url: self.logstash_url.clone(),
                listen_address: self.listen_address.clone(),
                scrape_timeout: self.scrape_timeout.clone(),
            }),
        }
    }
}

fn init_logging() -> Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(filter))
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn start_server(config: Config) -> Result<()> {
    let orchestrator = Arc::new(Orchestrator::new(&config)?);
    let app = create_router(orchestrator);

    info!("logstash-exporter version: {}", env!("CARGO_PKG_VERSION"));
    info!("Logstash URL: {}", config.logstash_url);
    info!("Logstash exporter is running on {}", config.listen_address);

    let listener = TcpListener::bind(config.listen_address).await?;
    serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();
    let config = Config::from_settings(&args.settings()?)?;
    start_server(config).await
}
