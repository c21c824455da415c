use crate::handlers::{
    characters::{get_character, get_characters},
    fallback::{method_not_allowed, not_found},
    favorites::{
        delete_favorite_character, delete_favorite_planet, upsert_favorite_character,
        upsert_favorite_planet,
    },
    health::health_check,
    planets::{get_planet, get_planets},
    sitemap::sitemap,
    users::{get_user_favorites, get_users},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, normalize_path::NormalizePath,
    timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Sitemap and health
        .route("/", get(sitemap).fallback(method_not_allowed))
        .route("/health", get(health_check).fallback(method_not_allowed))
        // Users
        .route("/users", get(get_users).fallback(method_not_allowed))
        .route(
            "/users/favorites/:user_id",
            get(get_user_favorites).fallback(method_not_allowed),
        )
        // Characters and planets (read only)
        .route("/characters", get(get_characters).fallback(method_not_allowed))
        .route(
            "/characters/:character_id",
            get(get_character).fallback(method_not_allowed),
        )
        .route("/planets", get(get_planets).fallback(method_not_allowed))
        .route("/planets/:planet_id", get(get_planet).fallback(method_not_allowed))
        // Favorites
        .route(
            "/favorite/characters/:favorite_id",
            post(upsert_favorite_character)
                .delete(delete_favorite_character)
                .fallback(method_not_allowed),
        )
        .route(
            "/favorite/planets/:favorite_id",
            post(upsert_favorite_planet)
                .delete(delete_favorite_planet)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state);

    // Swagger UI stays outside the slash normalisation, it redirects
    // `/swagger-ui` to `/swagger-ui/` itself.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(NormalizePath::trim_trailing_slash(api))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
}
