use axum::{extract::State, response::Json};
use model::entities::character;
use sea_orm::{EntityTrait, QueryOrder};
use tracing::{debug, instrument, warn};

use crate::error::ApiError;
use crate::extract::{IdPath, row_id};
use crate::schemas::AppState;
use crate::serializers::CharacterResponse;

/// Get all characters
#[utoipa::path(
    get,
    path = "/characters",
    tag = "characters",
    responses(
        (status = 200, description = "Characters retrieved successfully", body = [CharacterResponse]),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<CharacterResponse>>, ApiError> {
    let characters = character::Entity::find()
        .order_by_asc(character::Column::Id)
        .all(&state.db)
        .await?;

    debug!("Retrieved {} characters from database", characters.len());
    Ok(Json(characters.into_iter().map(CharacterResponse::from).collect()))
}

/// Get a specific character by ID
#[utoipa::path(
    get,
    path = "/characters/{character_id}",
    tag = "characters",
    params(
        ("character_id" = u64, Path, description = "Character ID"),
    ),
    responses(
        (status = 200, description = "Character retrieved successfully", body = CharacterResponse),
        (status = 404, description = "Character not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_character(
    IdPath(character_id): IdPath<u64>,
    State(state): State<AppState>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let found = match row_id(character_id) {
        Some(id) => character::Entity::find_by_id(id).one(&state.db).await?,
        None => None,
    };

    match found {
        Some(character_model) => Ok(Json(CharacterResponse::from(character_model))),
        None => {
            warn!("Character with ID {} not found", character_id);
            Err(ApiError::NotFound("Character"))
        }
    }
}
