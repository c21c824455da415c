use axum::{extract::State, response::Json};
use model::entities::planet;
use sea_orm::{EntityTrait, QueryOrder};
use tracing::{debug, instrument, warn};

use crate::error::ApiError;
use crate::extract::{IdPath, row_id};
use crate::schemas::AppState;
use crate::serializers::PlanetResponse;

/// Get all planets
#[utoipa::path(
    get,
    path = "/planets",
    tag = "planets",
    responses(
        (status = 200, description = "Planets retrieved successfully", body = [PlanetResponse]),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_planets(State(state): State<AppState>) -> Result<Json<Vec<PlanetResponse>>, ApiError> {
    let planets = planet::Entity::find()
        .order_by_asc(planet::Column::Id)
        .all(&state.db)
        .await?;

    debug!("Retrieved {} planets from database", planets.len());
    Ok(Json(planets.into_iter().map(PlanetResponse::from).collect()))
}

/// Get a specific planet by ID
#[utoipa::path(
    get,
    path = "/planets/{planet_id}",
    tag = "planets",
    params(
        ("planet_id" = u64, Path, description = "Planet ID"),
    ),
    responses(
        (status = 200, description = "Planet retrieved successfully", body = PlanetResponse),
        (status = 404, description = "Planet not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_planet(
    IdPath(planet_id): IdPath<u64>,
    State(state): State<AppState>,
) -> Result<Json<PlanetResponse>, ApiError> {
    let found = match row_id(planet_id) {
        Some(id) => planet::Entity::find_by_id(id).one(&state.db).await?,
        None => None,
    };

    match found {
        Some(planet_model) => Ok(Json(PlanetResponse::from(planet_model))),
        None => {
            warn!("Planet with ID {} not found", planet_id);
            Err(ApiError::NotFound("Planet"))
        }
    }
}
