use std::future::IntoFuture;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &rosterd::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let static_root = cfg.static_root();
    info!(
        database_url = %cfg.database_url,
        port = cfg.port,
        static_root = %static_root.display(),
        loglevel = %cfg.loglevel
    );

    // One connection handle for the whole process, acquired before any route
    // is wired. Failure here is fatal.
    let db = rosterd::db::connect(&cfg.database_url).await?;

    let state = rosterd::router::RosterState::new(db.clone());
    let app = rosterd::router::roster_router(state, &static_root);

    let listener = TcpListener::bind(format!("0.0.0.0:{}", cfg.port)).await?;
    info!("api server listening on port: {}", cfg.port);

    let server = axum::serve(listener, app).into_future();
    tokio::select! {
        served = server => {
            db.disconnect().await;
            served?;
        }
        code = rosterd::shutdown::wait_for_termination() => {
            let code = code?;
            // Release the handle, then exit with the signal-derived status.
            // In-flight requests are not drained.
            db.disconnect().await;
            info!("database connection closed, exiting with status {code}");
            std::process::exit(code);
        }
    }

    Ok(())
}
