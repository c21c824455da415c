use model::entities::{favorite_character, favorite_planet, user};
use model::{FavoriteStore, constraint_violation};
use sea_orm::{DatabaseConnection, DatabaseTransaction, EntityTrait, TransactionTrait};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::ApiError;
use crate::extract::row_id;

/// Wording a favorite kind uses in its responses.
pub trait FavoriteKind: FavoriteStore {
    /// Entity label for "<label> not found".
    const NOT_FOUND: &'static str;
    const DELETED: &'static str;
}

impl FavoriteKind for favorite_character::Entity {
    const NOT_FOUND: &'static str = "Favorite character";
    const DELETED: &'static str = "Favorite character deleted";
}

impl FavoriteKind for favorite_planet::Entity {
    const NOT_FOUND: &'static str = "Planet";
    const DELETED: &'static str = "Planet deleted";
}

/// References supplied in an upsert body. `target_id` is the character or
/// planet id, depending on the kind.
///
/// The outer `Option` tells whether the key was sent at all, the inner one
/// carries its value, so `Some(None)` is an explicit JSON `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FavoriteChanges {
    pub user_id: Option<Option<i32>>,
    pub target_id: Option<Option<i32>>,
}

/// Result of an upsert, telling whether a row was created or updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted<T> {
    Created(T),
    Updated(T),
}

impl<T> Upserted<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Upserted<U> {
        match self {
            Self::Created(value) => Upserted::Created(f(value)),
            Self::Updated(value) => Upserted::Updated(f(value)),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Created(value) | Self::Updated(value) => value,
        }
    }
}

/// A user with every favorite that references them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFavorites {
    pub user: user::Model,
    pub characters: Vec<favorite_character::Model>,
    pub planets: Vec<favorite_planet::Model>,
}

/// Creates or updates the favorite addressed by `favorite_id`.
///
/// The id only decides which branch runs. When no row has that id (including
/// ids too large for the column) a new one is inserted and the database
/// assigns its id, which may differ from `favorite_id`. Creating needs both
/// keys present, though either may be `null`. An existing row gets the
/// supplied references written over its own without checking them first;
/// the database constraints are the only guard on that path.
#[instrument(skip(db))]
pub async fn upsert_favorite<K>(
    db: &DatabaseConnection,
    favorite_id: u64,
    changes: FavoriteChanges,
) -> Result<Upserted<K::Model>, ApiError>
where
    K: FavoriteKind,
{
    trace!("Opening transaction for favorite {} upsert", K::KIND);
    let txn = db.begin().await?;

    let upserted = match find_by_path_id::<K>(&txn, favorite_id).await? {
        None => {
            let (Some(user_id), Some(target_id)) = (changes.user_id, changes.target_id) else {
                warn!(
                    "Cannot create favorite {}: missing user_id or {}_id",
                    K::KIND,
                    K::KIND
                );
                return Err(ApiError::MissingFields);
            };

            debug!(
                "Favorite {} {} not found, creating one for user {:?}",
                K::KIND,
                favorite_id,
                user_id
            );
            let created = K::insert_favorite(&txn, user_id, target_id)
                .await
                .map_err(reference_error::<K>)?;
            Upserted::Created(created)
        }
        Some(existing) => {
            debug!("Favorite {} {} exists, updating it", K::KIND, favorite_id);
            let updated = K::update_favorite(&txn, existing, changes.user_id, changes.target_id)
                .await
                .map_err(reference_error::<K>)?;
            Upserted::Updated(updated)
        }
    };

    txn.commit().await?;
    info!(
        "Favorite {} {} ({})",
        K::KIND,
        if upserted.is_created() { "created" } else { "updated" },
        favorite_id
    );
    Ok(upserted)
}

/// Removes the favorite with `favorite_id`.
#[instrument(skip(db))]
pub async fn delete_favorite<K>(db: &DatabaseConnection, favorite_id: u64) -> Result<(), ApiError>
where
    K: FavoriteKind,
{
    let txn = db.begin().await?;

    let Some(existing) = find_by_path_id::<K>(&txn, favorite_id).await? else {
        warn!("Favorite {} {} not found for deletion", K::KIND, favorite_id);
        return Err(ApiError::NotFound(K::NOT_FOUND));
    };

    K::delete_favorite(&txn, existing).await?;
    txn.commit().await?;

    info!("Favorite {} {} deleted", K::KIND, favorite_id);
    Ok(())
}

/// Loads a user and all of their favorite characters and planets from one
/// transaction, so the three reads see the same state.
#[instrument(skip(db))]
pub async fn list_user_favorites(
    db: &DatabaseConnection,
    user_id: u64,
) -> Result<UserFavorites, ApiError> {
    let txn = db.begin().await?;

    let user = match row_id(user_id) {
        Some(id) => user::Entity::find_by_id(id).one(&txn).await?,
        None => None,
    };
    let Some(user) = user else {
        warn!("User {} not found", user_id);
        return Err(ApiError::NotFound("User"));
    };

    let characters = favorite_character::Entity::list_favorites_for_user(&txn, user.id).await?;
    let planets = favorite_planet::Entity::list_favorites_for_user(&txn, user.id).await?;
    txn.commit().await?;
    debug!(
        "User {} has {} favorite characters and {} favorite planets",
        user_id,
        characters.len(),
        planets.len()
    );

    Ok(UserFavorites {
        user,
        characters,
        planets,
    })
}

/// Looks up a favorite by the id taken from the path. Ids outside the
/// column's range match no row.
async fn find_by_path_id<K: FavoriteKind>(
    txn: &DatabaseTransaction,
    favorite_id: u64,
) -> Result<Option<K::Model>, ApiError> {
    match row_id(favorite_id) {
        Some(id) => Ok(K::find_favorite(txn, id).await?),
        None => {
            debug!("Favorite {} id {} is out of range", K::KIND, favorite_id);
            Ok(None)
        }
    }
}

/// Turns a rejected write into the 400 answer; other failures stay database errors.
/// The caller drops the open transaction, which rolls it back.
fn reference_error<K: FavoriteKind>(err: sea_orm::DbErr) -> ApiError {
    match constraint_violation(&err) {
        Some(violation) => {
            warn!("Favorite {} rejected by {:?} constraint: {}", K::KIND, violation, err);
            ApiError::InvalidReference { kind: K::KIND }
        }
        None => ApiError::Database(err),
    }
}
