pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

pub use api::router::create_router;
pub use config::Config;
pub use db::create_pool;
pub use state::AppState;

use services::RefreshJob;

/// How long an in-flight refresh gets to wind down after shutdown is
/// requested before it is aborted. Aborting mid-replace rolls the
/// catalog transaction back.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Run the media-check webserver and the periodic catalog refresh until
/// the token is cancelled or the refresh job fails.
///
/// A refresh failure is fatal: the function returns the error and the
/// process is expected to exit and be restarted by its supervisor.
pub async fn run_server(
    config: Config,
    cancel: CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = create_pool(&config.database_url).await?;
    let state = AppState::new(pool.clone(), config);

    let refresh = RefreshJob::new(
        pool,
        Arc::clone(&state.imdb),
        state.config.refresh_interval,
    );
    let mut refresh_task = tokio::spawn(refresh.run(cancel.clone()));

    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port).parse()?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "starting webserver");

    let shutdown = cancel.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .into_future();

    tokio::select! {
        result = &mut refresh_task => {
            cancel.cancel();
            result??;
        }
        result = server => {
            cancel.cancel();
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut refresh_task).await.is_err() {
                tracing::warn!("refresh job did not stop in time, aborting it");
                refresh_task.abort();
            }
            result?;
        }
    }

    Ok(())
}
