use anyhow::Context;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use todo_rest::{SharedData, app_env, build_app, logging, persistence};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let dotenv_missing = dotenv().is_err();

    let otel_exporters = match (
        env::var(app_env::OTEL_SPAN_EXPORT_URL),
        env::var(app_env::OTEL_METRIC_EXPORT_URL),
    ) {
        (Ok(span_url), Ok(metric_url)) => Some(logging::init_exporters(&span_url, &metric_url)?),
        _ => None,
    };
    let otel_enabled = otel_exporters.is_some();
    logging::setup_logging_and_tracing(logging::init_env_filter()?, otel_exporters);

    if dotenv_missing {
        info!("No .env file found, reading configuration from the environment only.");
    }
    if !otel_enabled {
        info!("OpenTelemetry endpoints not configured, only logging to stdout.");
    }

    let db_url = env::var(app_env::DB_URL)
        .with_context(|| format!("{} must be set to a PostgreSQL URL", app_env::DB_URL))?;
    let db_pool = persistence::connect_sqlx(&db_url)
        .await
        .context("connecting to the database")?;
    persistence::run_migrations(&db_pool)
        .await
        .context("applying database migrations")?;

    let shared_data = Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(db_pool),
    });

    let listen_addr =
        env::var(app_env::LISTEN_ADDR).unwrap_or_else(|_| app_env::DEFAULT_LISTEN_ADDR.to_owned());
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding to {listen_addr}"))?;

    info!("Starting server on {listen_addr}.");
    axum::serve(listener, build_app(shared_data))
        .await
        .context("running the HTTP server")?;

    Ok(())
}
