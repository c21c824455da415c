use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Email, 120).unique_key())
                    .col(string_len(Users::Password, 80))
                    .col(boolean(Users::IsActive))
                    .to_owned(),
            )
            .await?;

        // Create characters table
        manager
            .create_table(
                Table::create()
                    .table(Characters::Table)
                    .if_not_exists()
                    .col(pk_auto(Characters::Id))
                    .col(string_len(Characters::Name, 50))
                    .col(string_len_null(Characters::Gender, 10))
                    .col(string_len_null(Characters::Eyecolor, 15))
                    .to_owned(),
            )
            .await?;

        // Create planets table
        manager
            .create_table(
                Table::create()
                    .table(Planets::Table)
                    .if_not_exists()
                    .col(pk_auto(Planets::Id))
                    .col(string_len_null(Planets::Name, 50))
                    .col(string_len_null(Planets::Weather, 10))
                    .col(integer_null(Planets::Diameter))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Planets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Characters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    Password,
    IsActive,
}

#[derive(DeriveIden)]
pub(crate) enum Characters {
    Table,
    Id,
    Name,
    Gender,
    Eyecolor,
}

#[derive(DeriveIden)]
pub(crate) enum Planets {
    Table,
    Id,
    Name,
    Weather,
    Diameter,
}
