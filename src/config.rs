use anyhow::{Context, Result};
use sea_orm::Database;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::handlers::sitemap::RouteTable;
use crate::schemas::{ApiDoc, AppState};

/// Local file-backed store used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://holonet.db?mode=rwc";
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings, layered from defaults, `.env` and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
}

/// Settings as read from the sources, before `PORT` is folded into the bind
/// address.
#[derive(Debug, Deserialize)]
struct RawSettings {
    database_url: String,
    bind_address: Option<String>,
    port: u16,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let bind_address = raw
            .bind_address
            .unwrap_or_else(|| format!("{}:{}", DEFAULT_BIND_HOST, raw.port));

        Self {
            database_url: raw.database_url,
            bind_address,
        }
    }
}

impl Settings {
    /// Load settings from `.env` and the process environment
    /// (`DATABASE_URL`, `BIND_ADDRESS`, and `PORT` when no bind address is set).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_environment(::config::Environment::default())
    }

    fn from_environment(environment: ::config::Environment) -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?;

        let raw: RawSettings = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        Ok(raw.into())
    }

    /// Apply values given explicitly on the command line.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }
}

/// Initialize application state for the given database
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;

    let routes = RouteTable::from_openapi(&ApiDoc::openapi());
    debug!("Route table built with {} paths", routes.routes.len());

    Ok(AppState {
        db,
        routes: Arc::new(routes),
    })
}
