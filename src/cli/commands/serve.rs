use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::{Settings, initialize_app_state_with_url};
use crate::router::create_router;

/// Run the HTTP API until the listener fails.
pub async fn serve(settings: &Settings) -> Result<()> {
    info!("Holonet starting");

    let state = initialize_app_state_with_url(&settings.database_url).await?;
    let route_count = state.routes.routes.len();
    let app = create_router(state);

    let listener = TcpListener::bind(&settings.bind_address)
        .await
        .with_context(|| format!("Failed to bind to address {}", settings.bind_address))?;
    let local_addr = listener.local_addr()?;

    info!("Serving {} routes on http://{}", route_count, local_addr);
    debug!("Swagger UI at http://{}/swagger-ui", local_addr);

    axum::serve(listener, app).await.context("Server error")?;

    info!("Server stopped");
    Ok(())
}
