pub mod characters;
pub mod fallback;
pub mod favorites;
pub mod health;
pub mod planets;
pub mod sitemap;
pub mod users;
