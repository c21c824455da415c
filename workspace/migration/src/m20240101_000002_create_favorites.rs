use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000001_create_table::{Characters, Planets, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No cascade: a referenced user, character or planet cannot be
        // removed while favorites still point at it.
        manager
            .create_table(
                Table::create()
                    .table(FavoriteCharacters::Table)
                    .if_not_exists()
                    .col(pk_auto(FavoriteCharacters::Id))
                    .col(integer_null(FavoriteCharacters::UserId))
                    .col(integer_null(FavoriteCharacters::CharacterId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_characters_user")
                            .from(FavoriteCharacters::Table, FavoriteCharacters::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_characters_character")
                            .from(FavoriteCharacters::Table, FavoriteCharacters::CharacterId)
                            .to(Characters::Table, Characters::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FavoritePlanets::Table)
                    .if_not_exists()
                    .col(pk_auto(FavoritePlanets::Id))
                    .col(integer_null(FavoritePlanets::UserId))
                    .col(integer_null(FavoritePlanets::PlanetId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_planets_user")
                            .from(FavoritePlanets::Table, FavoritePlanets::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_planets_planet")
                            .from(FavoritePlanets::Table, FavoritePlanets::PlanetId)
                            .to(Planets::Table, Planets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Favorites are listed per user
        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_characters_user_id")
                    .table(FavoriteCharacters::Table)
                    .col(FavoriteCharacters::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_planets_user_id")
                    .table(FavoritePlanets::Table)
                    .col(FavoritePlanets::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FavoritePlanets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FavoriteCharacters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FavoriteCharacters {
    Table,
    Id,
    UserId,
    CharacterId,
}

#[derive(DeriveIden)]
enum FavoritePlanets {
    Table,
    Id,
    UserId,
    PlanetId,
}
