use anyhow::{Context, Result};
use model::entities::{character, planet, user};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, Set, TransactionTrait};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, trace};

/// Reference data to load into an empty database.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<UserFixture>,
    #[serde(default)]
    pub characters: Vec<CharacterFixture>,
    #[serde(default)]
    pub planets: Vec<PlanetFixture>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct UserFixture {
    pub email: String,
    pub password: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct CharacterFixture {
    pub name: String,
    pub gender: Option<String>,
    pub eyecolor: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct PlanetFixture {
    pub name: Option<String>,
    pub weather: Option<String>,
    pub diameter: Option<i32>,
}

/// Number of rows inserted per table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub characters: usize,
    pub planets: usize,
}

impl Fixture {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open fixture file '{}'", path.display()))?;
        serde_yaml::from_reader(file)
            .with_context(|| format!("Failed to parse fixture file '{}'", path.display()))
    }
}

/// Insert every fixture row. Either all rows are stored or none.
pub async fn seed_database<C>(db: &C, fixture: &Fixture) -> Result<SeedSummary>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let mut summary = SeedSummary::default();

    for entry in &fixture.users {
        trace!("Seeding user {}", entry.email);
        user::ActiveModel {
            email: Set(entry.email.clone()),
            password: Set(entry.password.clone()),
            is_active: Set(entry.is_active),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .with_context(|| format!("Failed to insert user '{}'", entry.email))?;
        summary.users += 1;
    }

    for entry in &fixture.characters {
        trace!("Seeding character {}", entry.name);
        character::ActiveModel {
            name: Set(entry.name.clone()),
            gender: Set(entry.gender.clone()),
            eyecolor: Set(entry.eyecolor.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .with_context(|| format!("Failed to insert character '{}'", entry.name))?;
        summary.characters += 1;
    }

    for entry in &fixture.planets {
        planet::ActiveModel {
            name: Set(entry.name.clone()),
            weather: Set(entry.weather.clone()),
            diameter: Set(entry.diameter),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert planet")?;
        summary.planets += 1;
    }

    txn.commit().await?;
    Ok(summary)
}

pub async fn seed(fixture_path: &Path, database_url: &str) -> Result<()> {
    info!("Seeding database from {}", fixture_path.display());
    debug!("Database URL: {}", database_url);

    let fixture = Fixture::from_path(fixture_path)?;
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;

    let summary = seed_database(&db, &fixture).await?;
    info!(
        "Seeded {} users, {} characters and {} planets",
        summary.users, summary.characters, summary.planets
    );
    Ok(())
}
