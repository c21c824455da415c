pub mod entities;
pub mod store;

pub use store::{ConstraintViolation, FavoriteStore, constraint_violation};
