//! Web interface: the temperature page, a greeting page and a flat
//! static file directory.

pub mod config;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod static_files;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::{create_app, AppState};

use crate::error::{Error, Result};
use crate::reading::SnapshotReader;
use std::net::SocketAddr;
use tracing::info;

/// Start the web server and serve until it fails.
pub async fn start_web_server(config: WebConfig, snapshot: SnapshotReader) -> Result<()> {
    let app = create_app(&config, snapshot);

    // Parse the bind address
    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| Error::config_error(format!("Invalid bind address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::web_server_error(format!("Failed to bind to address: {}", e)))?;

    info!("Web server running at http://{}/", addr);
    info!("Serving static files from {}", config.static_root.display());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| Error::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
