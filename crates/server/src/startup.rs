use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: migrate the database and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection + migrations
    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let state = ServerState::from_db(db);

    let app: Router = routes::build_router(state, build_cors());

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "course service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
