//! Public JSON representations of the stored entities.
//!
//! These shapes are the wire contract. The user password is never part of
//! any of them, and favorite planets keep their `userID` / `planetID`
//! casing for compatibility with existing clients.

use model::entities::{character, favorite_character, favorite_planet, planet, user};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::UserFavorites;

/// User response model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
        }
    }
}

/// Character response model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CharacterResponse {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub eyecolor: Option<String>,
}

impl From<character::Model> for CharacterResponse {
    fn from(model: character::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            gender: model.gender,
            eyecolor: model.eyecolor,
        }
    }
}

/// Planet response model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlanetResponse {
    pub id: i32,
    pub name: Option<String>,
    pub weather: Option<String>,
    pub diameter: Option<i32>,
}

impl From<planet::Model> for PlanetResponse {
    fn from(model: planet::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            weather: model.weather,
            diameter: model.diameter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FavoriteCharacterResponse {
    pub id: i32,
    pub user_id: Option<i32>,
    pub character_id: Option<i32>,
}

impl From<favorite_character::Model> for FavoriteCharacterResponse {
    fn from(model: favorite_character::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            character_id: model.character_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FavoritePlanetResponse {
    pub id: i32,
    #[serde(rename = "userID")]
    pub user_id: Option<i32>,
    #[serde(rename = "planetID")]
    pub planet_id: Option<i32>,
}

impl From<favorite_planet::Model> for FavoritePlanetResponse {
    fn from(model: favorite_planet::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            planet_id: model.planet_id,
        }
    }
}

/// Everything a user has marked as favorite, together with the user itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserFavoritesResponse {
    pub favorites_characters: Vec<FavoriteCharacterResponse>,
    pub favorites_planets: Vec<FavoritePlanetResponse>,
    pub user: UserResponse,
}

impl From<UserFavorites> for UserFavoritesResponse {
    fn from(favorites: UserFavorites) -> Self {
        Self {
            favorites_characters: favorites
                .characters
                .into_iter()
                .map(FavoriteCharacterResponse::from)
                .collect(),
            favorites_planets: favorites
                .planets
                .into_iter()
                .map(FavoritePlanetResponse::from)
                .collect(),
            user: UserResponse::from(favorites.user),
        }
    }
}
