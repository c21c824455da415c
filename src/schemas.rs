use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::favorites::{FavoriteCharacterRequest, FavoritePlanetRequest};
use crate::handlers::sitemap::{RouteEntry, RouteTable};
use crate::serializers::{
    CharacterResponse, FavoriteCharacterResponse, FavoritePlanetResponse, PlanetResponse,
    UserFavoritesResponse, UserResponse,
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Registered routes, built once at startup
    pub routes: Arc<RouteTable>,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable error message
    pub message: String,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::sitemap::sitemap,
        crate::handlers::health::health_check,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user_favorites,
        crate::handlers::characters::get_characters,
        crate::handlers::characters::get_character,
        crate::handlers::planets::get_planets,
        crate::handlers::planets::get_planet,
        crate::handlers::favorites::upsert_favorite_character,
        crate::handlers::favorites::delete_favorite_character,
        crate::handlers::favorites::upsert_favorite_planet,
        crate::handlers::favorites::delete_favorite_planet,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            HealthResponse,
            RouteEntry,
            RouteTable,
            UserResponse,
            UserFavoritesResponse,
            CharacterResponse,
            PlanetResponse,
            FavoriteCharacterResponse,
            FavoritePlanetResponse,
            FavoriteCharacterRequest,
            FavoritePlanetRequest,
        )
    ),
    tags(
        (name = "meta", description = "Sitemap and health endpoints"),
        (name = "users", description = "User endpoints"),
        (name = "characters", description = "Character endpoints"),
        (name = "planets", description = "Planet endpoints"),
        (name = "favorites", description = "Favorite characters and planets"),
    ),
    info(
        title = "Holonet API",
        description = "Users, characters, planets and the favorites linking them",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
