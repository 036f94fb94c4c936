use std::{env, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use service::{books::BookService, runtime};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Store file location from configs or the STORE_PATH env var.
fn load_store_path() -> String {
    match configs::load_default() {
        Ok(cfg) => cfg.store.path,
        Err(_) => env::var("STORE_PATH").unwrap_or_else(|_| "data/db.json".to_string()),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let store_path = load_store_path();
    if let Some(dir) = Path::new(&store_path).parent().and_then(|p| p.to_str()) {
        if !dir.is_empty() {
            runtime::ensure_env(dir).await?;
        }
    }

    // Book collection persisted as a single JSON document
    let books = BookService::new(&store_path).await?;

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(Arc::clone(&books), cors);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, store = %store_path, "starting bookshelf server");
    println!("bookshelf listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
