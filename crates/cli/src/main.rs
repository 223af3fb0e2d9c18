use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "mediagate")]
#[command(about = "Popularity gate for autobrr download decisions", long_about = None)]
struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "media.db")]
    database: String,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to run the webserver on
    #[arg(short, long, default_value = "8053")]
    port: u16,

    /// Shared secret expected in the "Authorization" header
    #[arg(long, env = "MEDIAGATE_AUTH")]
    auth: String,

    /// Interval between popular-media scrapes
    #[arg(long, default_value = "24h", value_parser = humantime::parse_duration)]
    refresh_interval: Duration,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = server::Config {
        database_url: format!("sqlite:{}?mode=rwc", cli.database),
        host: cli.host,
        port: cli.port,
        auth_token: cli.auth,
        refresh_interval: cli.refresh_interval,
    };

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            signal_cancel.cancel();
        }
    });

    server::run_server(config, cancel).await
}
