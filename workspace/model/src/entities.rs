//! SeaORM entity modules for users, characters, planets and the two
//! favorite join tables that link them.

pub mod character;
pub mod favorite_character;
pub mod favorite_planet;
pub mod planet;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::character::Entity as Character;
    pub use super::favorite_character::Entity as FavoriteCharacter;
    pub use super::favorite_planet::Entity as FavoritePlanet;
    pub use super::planet::Entity as Planet;
    pub use super::user::Entity as User;
}
