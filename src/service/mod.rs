//! Favorites business logic. Every call is an independent unit of work
//! against the database; nothing is kept between requests.

pub mod favorites;

pub use favorites::{
    FavoriteChanges, FavoriteKind, UserFavorites, Upserted, delete_favorite, list_user_favorites,
    upsert_favorite,
};
