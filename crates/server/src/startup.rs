use std::net::SocketAddr;

use configs::AppConfig;
use service::{books::ConnectionManager, people::PeopleStore};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{errors::StartupError, routes};

fn parse_addr(raw: &str) -> Result<SocketAddr, StartupError> {
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw:?}: {e}")))
}

/// Connect to the store, ensure the ISBN index, then serve the book routes.
///
/// Any failure before the listener is bound is returned, so the caller can
/// exit instead of serving without the uniqueness guarantee.
pub async fn run_books(cfg: &AppConfig) -> Result<(), StartupError> {
    let addr = parse_addr(&cfg.server.bind_addr())?;

    let manager = ConnectionManager::connect(&cfg.database).await?;
    if let Err(e) = manager.ensure_index().await {
        error!(error = %e, "cannot ensure unique isbn index");
        return Err(e.into());
    }

    let app = routes::build_books_router(manager);
    info!(%addr, "starting book service");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Serve the in-memory people routes.
pub async fn run_people(cfg: &AppConfig) -> Result<(), StartupError> {
    let addr = parse_addr(&cfg.people.bind_addr())?;

    let store = if cfg.people.seed { PeopleStore::seeded() } else { PeopleStore::new() };
    let app = routes::build_people_router(store);
    info!(%addr, seed = cfg.people.seed, "starting people service");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
