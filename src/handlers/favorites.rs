use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::{favorite_character, favorite_planet};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};
use crate::schemas::{AppState, MessageResponse};
use crate::serializers::{FavoriteCharacterResponse, FavoritePlanetResponse};
use crate::service::{FavoriteChanges, FavoriteKind, Upserted, delete_favorite, upsert_favorite};

/// Marks a key that was sent, keeping `null` as `Some(None)`. Absent keys fall
/// back to the field's `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

/// Request body for creating or updating a favorite character.
/// Both keys are required when the favorite does not exist yet; `null` stores
/// or sets a NULL reference.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct FavoriteCharacterRequest {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i32>)]
    pub user_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i32>)]
    pub character_id: Option<Option<i32>>,
}

impl From<FavoriteCharacterRequest> for FavoriteChanges {
    fn from(request: FavoriteCharacterRequest) -> Self {
        Self {
            user_id: request.user_id,
            target_id: request.character_id,
        }
    }
}

/// Request body for creating or updating a favorite planet.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct FavoritePlanetRequest {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i32>)]
    pub user_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i32>)]
    pub planet_id: Option<Option<i32>>,
}

impl From<FavoritePlanetRequest> for FavoriteChanges {
    fn from(request: FavoritePlanetRequest) -> Self {
        Self {
            user_id: request.user_id,
            target_id: request.planet_id,
        }
    }
}

fn upsert_status<T>(upserted: &Upserted<T>) -> StatusCode {
    if upserted.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// Create or update a favorite character
///
/// Looks the favorite up by the path id. A missing favorite is created with a
/// database-assigned id; an existing one has the given fields overwritten.
#[utoipa::path(
    post,
    path = "/favorite/characters/{favorite_id}",
    tag = "favorites",
    params(
        ("favorite_id" = u64, Path, description = "Favorite character ID"),
    ),
    request_body = FavoriteCharacterRequest,
    responses(
        (status = 201, description = "Favorite character created", body = FavoriteCharacterResponse),
        (status = 200, description = "Favorite character updated", body = FavoriteCharacterResponse),
        (status = 400, description = "Missing required fields or invalid reference", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn upsert_favorite_character(
    IdPath(favorite_id): IdPath<u64>,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<FavoriteCharacterRequest>,
) -> Result<(StatusCode, Json<FavoriteCharacterResponse>), ApiError> {
    debug!("Upserting favorite character {}", favorite_id);

    let upserted =
        upsert_favorite::<favorite_character::Entity>(&state.db, favorite_id, request.into())
            .await?
            .map(FavoriteCharacterResponse::from);

    Ok((upsert_status(&upserted), Json(upserted.into_inner())))
}

/// Delete a favorite character
#[utoipa::path(
    delete,
    path = "/favorite/characters/{favorite_id}",
    tag = "favorites",
    params(
        ("favorite_id" = u64, Path, description = "Favorite character ID"),
    ),
    responses(
        (status = 200, description = "Favorite character deleted", body = MessageResponse),
        (status = 404, description = "Favorite character not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_favorite_character(
    IdPath(favorite_id): IdPath<u64>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    delete_favorite::<favorite_character::Entity>(&state.db, favorite_id).await?;
    Ok(Json(MessageResponse::new(favorite_character::Entity::DELETED)))
}

/// Create or update a favorite planet
#[utoipa::path(
    post,
    path = "/favorite/planets/{favorite_id}",
    tag = "favorites",
    params(
        ("favorite_id" = u64, Path, description = "Favorite planet ID"),
    ),
    request_body = FavoritePlanetRequest,
    responses(
        (status = 201, description = "Favorite planet created", body = FavoritePlanetResponse),
        (status = 200, description = "Favorite planet updated", body = FavoritePlanetResponse),
        (status = 400, description = "Missing required fields or invalid reference", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn upsert_favorite_planet(
    IdPath(favorite_id): IdPath<u64>,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<FavoritePlanetRequest>,
) -> Result<(StatusCode, Json<FavoritePlanetResponse>), ApiError> {
    debug!("Upserting favorite planet {}", favorite_id);

    let upserted = upsert_favorite::<favorite_planet::Entity>(&state.db, favorite_id, request.into())
        .await?
        .map(FavoritePlanetResponse::from);

    Ok((upsert_status(&upserted), Json(upserted.into_inner())))
}

/// Delete a favorite planet
#[utoipa::path(
    delete,
    path = "/favorite/planets/{favorite_id}",
    tag = "favorites",
    params(
        ("favorite_id" = u64, Path, description = "Favorite planet ID"),
    ),
    responses(
        (status = 200, description = "Favorite planet deleted", body = MessageResponse),
        (status = 404, description = "Favorite planet not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_favorite_planet(
    IdPath(favorite_id): IdPath<u64>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    delete_favorite::<favorite_planet::Entity>(&state.db, favorite_id).await?;
    Ok(Json(MessageResponse::new(favorite_planet::Entity::DELETED)))
}
