#[cfg(test)]
pub mod test_utils {
    use crate::handlers::sitemap::RouteTable;
    use crate::router::create_router;
    use crate::schemas::{ApiDoc, AppState};
    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use model::entities::{character, planet, user};
    use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;
    use utoipa::OpenApi;

    /// Ids of the rows created by [`setup_test_app_state`].
    #[derive(Debug, Clone, Copy)]
    pub struct TestIds {
        pub user: i32,
        pub other_user: i32,
        pub character: i32,
        pub other_character: i32,
        pub planet: i32,
        pub other_planet: i32,
        /// An id no table uses.
        pub missing: i32,
    }

    impl Default for TestIds {
        fn default() -> Self {
            Self {
                user: 1,
                other_user: 2,
                character: 1,
                other_character: 2,
                planet: 1,
                other_planet: 2,
                missing: 999,
            }
        }
    }

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        db.execute_unprepared("PRAGMA foreign_keys = ON;")
            .await
            .expect("Failed to enable foreign keys");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing, with two users, characters and planets
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        for (email, password) in [("luke@rebellion.org", "bluemilk"), ("leia@rebellion.org", "alderaan")] {
            user::ActiveModel {
                email: Set(email.to_string()),
                password: Set(password.to_string()),
                is_active: Set(true),
                ..Default::default()
            }
            .insert(&db)
            .await
            .expect("Failed to create test user");
        }

        for (name, gender, eyecolor) in [("Luke Skywalker", Some("male"), Some("blue")), ("R2-D2", None, Some("red"))] {
            character::ActiveModel {
                name: Set(name.to_string()),
                gender: Set(gender.map(str::to_string)),
                eyecolor: Set(eyecolor.map(str::to_string)),
                ..Default::default()
            }
            .insert(&db)
            .await
            .expect("Failed to create test character");
        }

        for (name, weather, diameter) in [("Tatooine", "arid", 10465), ("Hoth", "frozen", 7200)] {
            planet::ActiveModel {
                name: Set(Some(name.to_string())),
                weather: Set(Some(weather.to_string())),
                diameter: Set(Some(diameter)),
                ..Default::default()
            }
            .insert(&db)
            .await
            .expect("Failed to create test planet");
        }

        AppState {
            db,
            routes: Arc::new(RouteTable::from_openapi(&ApiDoc::openapi())),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is read from RUST_LOG and defaults to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _guard = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }
}
