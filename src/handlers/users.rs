use axum::{extract::State, response::Json};
use model::entities::user;
use sea_orm::{EntityTrait, QueryOrder};
use tracing::{debug, info, instrument, trace};

use crate::error::ApiError;
use crate::extract::IdPath;
use crate::schemas::AppState;
use crate::serializers::{UserFavoritesResponse, UserResponse};
use crate::service::list_user_favorites;

/// Get all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    trace!("Entering get_users function");

    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    debug!("Retrieved {} users from database", users.len());
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user together with their favorite characters and planets
#[utoipa::path(
    get,
    path = "/users/favorites/{user_id}",
    tag = "users",
    params(
        ("user_id" = u64, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Favorites retrieved successfully", body = UserFavoritesResponse),
        (status = 404, description = "User not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user_favorites(
    IdPath(user_id): IdPath<u64>,
    State(state): State<AppState>,
) -> Result<Json<UserFavoritesResponse>, ApiError> {
    trace!("Entering get_user_favorites function for user_id: {}", user_id);

    let favorites = list_user_favorites(&state.db, user_id).await?;

    info!(
        "Retrieved favorites for user {}: {} characters, {} planets",
        user_id,
        favorites.characters.len(),
        favorites.planets.len()
    );
    Ok(Json(UserFavoritesResponse::from(favorites)))
}
