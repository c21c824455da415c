use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::openapi::{OpenApi, PathItemType};
use utoipa::ToSchema;

use crate::schemas::AppState;

/// A registered path and the methods it answers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RouteEntry {
    pub path: String,
    pub methods: Vec<String>,
}

/// Listing of every documented route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RouteTable {
    pub routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Builds the table from the OpenAPI document, so the listing follows the
    /// annotated handlers rather than a second hand-maintained list.
    pub fn from_openapi(doc: &OpenApi) -> Self {
        let routes = doc
            .paths
            .paths
            .iter()
            .map(|(path, item)| RouteEntry {
                path: path.clone(),
                methods: item
                    .operations
                    .keys()
                    .map(|kind| method_name(kind).to_string())
                    .collect(),
            })
            .collect();

        Self { routes }
    }

    /// Methods registered for `route`, given either as documented
    /// (`/planets/{planet_id}`) or as the router pattern (`/planets/:planet_id`).
    pub fn methods_for(&self, route: &str) -> Option<&[String]> {
        let path = documented_path(route);
        self.routes
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.methods.as_slice())
    }
}

fn documented_path(route: &str) -> String {
    route
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn method_name(kind: &PathItemType) -> &'static str {
    match kind {
        PathItemType::Get => "GET",
        PathItemType::Post => "POST",
        PathItemType::Put => "PUT",
        PathItemType::Delete => "DELETE",
        PathItemType::Patch => "PATCH",
        PathItemType::Head => "HEAD",
        PathItemType::Options => "OPTIONS",
        _ => "OTHER",
    }
}

/// List all registered routes
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "Registered routes", body = RouteTable)
    )
)]
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Json<RouteTable> {
    Json(RouteTable::clone(&state.routes))
}
