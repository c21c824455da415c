//! Persistence operations for favorite join records.
//!
//! Both favorite tables share the same shape (a surrogate id, a user
//! reference and a reference to the favorited row), so the operations the
//! favorites service needs are expressed once as [`FavoriteStore`] and
//! implemented for each favorite entity. Callers pass any
//! [`ConnectionTrait`], which lets a request run the whole
//! read-modify-write against a single [`sea_orm::DatabaseTransaction`].

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set, SqlErr};
use tracing::{debug, trace};

use crate::entities::{favorite_character, favorite_planet};

/// Kind of integrity constraint rejected by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
}

/// Classifies a database error as a constraint violation, if it is one.
///
/// Drivers that report structured error codes are handled through
/// [`DbErr::sql_err`]; anything else falls back to inspecting the message.
pub fn constraint_violation(err: &DbErr) -> Option<ConstraintViolation> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return Some(ConstraintViolation::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            return Some(ConstraintViolation::ForeignKey);
        }
        _ => {}
    }

    let message = err.to_string().to_lowercase();
    if message.contains("foreign key") {
        Some(ConstraintViolation::ForeignKey)
    } else if message.contains("unique") {
        Some(ConstraintViolation::Unique)
    } else {
        None
    }
}

/// Store operations for a favorite join table.
#[async_trait]
pub trait FavoriteStore: EntityTrait {
    /// Name of the favorited entity, e.g. `character` for `character_id`.
    const KIND: &'static str;

    async fn find_favorite<C>(conn: &C, favorite_id: i32) -> Result<Option<Self::Model>, DbErr>
    where
        C: ConnectionTrait;

    /// Inserts a new row. The database assigns the id. A `None` reference is
    /// stored as NULL.
    async fn insert_favorite<C>(
        conn: &C,
        user_id: Option<i32>,
        target_id: Option<i32>,
    ) -> Result<Self::Model, DbErr>
    where
        C: ConnectionTrait;

    /// Overwrites whichever references are provided and keeps the rest.
    /// `Some(None)` clears a reference.
    async fn update_favorite<C>(
        conn: &C,
        existing: Self::Model,
        user_id: Option<Option<i32>>,
        target_id: Option<Option<i32>>,
    ) -> Result<Self::Model, DbErr>
    where
        C: ConnectionTrait;

    async fn delete_favorite<C>(conn: &C, existing: Self::Model) -> Result<(), DbErr>
    where
        C: ConnectionTrait;

    async fn list_favorites<C>(conn: &C) -> Result<Vec<Self::Model>, DbErr>
    where
        C: ConnectionTrait;

    async fn list_favorites_for_user<C>(conn: &C, user_id: i32) -> Result<Vec<Self::Model>, DbErr>
    where
        C: ConnectionTrait;
}

#[async_trait]
impl FavoriteStore for favorite_character::Entity {
    const KIND: &'static str = "character";

    async fn find_favorite<C>(conn: &C, favorite_id: i32) -> Result<Option<Self::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        trace!("Looking up favorite character {}", favorite_id);
        Self::find_by_id(favorite_id).one(conn).await
    }

    async fn insert_favorite<C>(
        conn: &C,
        user_id: Option<i32>,
        target_id: Option<i32>,
    ) -> Result<Self::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        debug!("Inserting favorite character: user {:?}, character {:?}", user_id, target_id);
        favorite_character::ActiveModel {
            user_id: Set(user_id),
            character_id: Set(target_id),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    async fn update_favorite<C>(
        conn: &C,
        existing: Self::Model,
        user_id: Option<Option<i32>>,
        target_id: Option<Option<i32>>,
    ) -> Result<Self::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        if user_id.is_none() && target_id.is_none() {
            debug!("Nothing to change on favorite character {}", existing.id);
            return Ok(existing);
        }

        let mut active: favorite_character::ActiveModel = existing.into();
        if let Some(user_id) = user_id {
            active.user_id = Set(user_id);
        }
        if let Some(character_id) = target_id {
            active.character_id = Set(character_id);
        }
        active.update(conn).await
    }

    async fn delete_favorite<C>(conn: &C, existing: Self::Model) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let result = Self::delete_by_id(existing.id).exec(conn).await?;
        debug!("Deleted favorite character {} ({} rows)", existing.id, result.rows_affected);
        Ok(())
    }

    async fn list_favorites<C>(conn: &C) -> Result<Vec<Self::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Self::find()
            .order_by_asc(favorite_character::Column::Id)
            .all(conn)
            .await
    }

    async fn list_favorites_for_user<C>(conn: &C, user_id: i32) -> Result<Vec<Self::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Self::find()
            .filter(favorite_character::Column::UserId.eq(user_id))
            .order_by_asc(favorite_character::Column::Id)
            .all(conn)
            .await
    }
}

#[async_trait]
impl FavoriteStore for favorite_planet::Entity {
    const KIND: &'static str = "planet";

    async fn find_favorite<C>(conn: &C, favorite_id: i32) -> Result<Option<Self::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        trace!("Looking up favorite planet {}", favorite_id);
        Self::find_by_id(favorite_id).one(conn).await
    }

    async fn insert_favorite<C>(
        conn: &C,
        user_id: Option<i32>,
        target_id: Option<i32>,
    ) -> Result<Self::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        debug!("Inserting favorite planet: user {:?}, planet {:?}", user_id, target_id);
        favorite_planet::ActiveModel {
            user_id: Set(user_id),
            planet_id: Set(target_id),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    async fn update_favorite<C>(
        conn: &C,
        existing: Self::Model,
        user_id: Option<Option<i32>>,
        target_id: Option<Option<i32>>,
    ) -> Result<Self::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        if user_id.is_none() && target_id.is_none() {
            debug!("Nothing to change on favorite planet {}", existing.id);
            return Ok(existing);
        }

        let mut active: favorite_planet::ActiveModel = existing.into();
        if let Some(user_id) = user_id {
            active.user_id = Set(user_id);
        }
        if let Some(planet_id) = target_id {
            active.planet_id = Set(planet_id);
        }
        active.update(conn).await
    }

    async fn delete_favorite<C>(conn: &C, existing: Self::Model) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let result = Self::delete_by_id(existing.id).exec(conn).await?;
        debug!("Deleted favorite planet {} ({} rows)", existing.id, result.rows_affected);
        Ok(())
    }

    async fn list_favorites<C>(conn: &C) -> Result<Vec<Self::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Self::find()
            .order_by_asc(favorite_planet::Column::Id)
            .all(conn)
            .await
    }

    async fn list_favorites_for_user<C>(conn: &C, user_id: i32) -> Result<Vec<Self::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Self::find()
            .filter(favorite_planet::Column::UserId.eq(user_id))
            .order_by_asc(favorite_planet::Column::Id)
            .all(conn)
            .await
    }
}
