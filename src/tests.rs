#[cfg(test)]
mod integration_tests {
    use crate::handlers::favorites::{FavoriteCharacterRequest, FavoritePlanetRequest};
    use crate::handlers::sitemap::RouteTable;
    use crate::schemas::{HealthResponse, MessageResponse};
    use crate::serializers::{
        CharacterResponse, FavoriteCharacterResponse, FavoritePlanetResponse, PlanetResponse,
        UserFavoritesResponse,
    };
    use crate::test_utils::test_utils::{setup_test_app, TestIds};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn setup_server() -> TestServer {
        let app = setup_test_app().await;
        TestServer::new(app).unwrap()
    }

    async fn create_favorite_character(server: &TestServer, user_id: i32, character_id: i32) -> FavoriteCharacterResponse {
        let response = server
            .post("/favorite/characters/1000")
            .json(&FavoriteCharacterRequest {
                user_id: Some(Some(user_id)),
                character_id: Some(Some(character_id)),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    async fn create_favorite_planet(server: &TestServer, user_id: i32, planet_id: i32) -> FavoritePlanetResponse {
        let response = server
            .post("/favorite/planets/1000")
            .json(&FavoritePlanetRequest {
                user_id: Some(Some(user_id)),
                planet_id: Some(Some(planet_id)),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = setup_server().await;

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.database, "connected");
    }

    #[tokio::test]
    async fn test_sitemap_lists_registered_routes() {
        let server = setup_server().await;

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let table: RouteTable = response.json();
        assert_eq!(table.methods_for("/users"), Some(&["GET".to_string()][..]));
        assert!(table.methods_for("/favorite/characters/{favorite_id}").is_some());
    }

    #[tokio::test]
    async fn test_get_users_omits_password() {
        let server = setup_server().await;

        let response = server.get("/users").await;

        response.assert_status(StatusCode::OK);
        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0], json!({ "id": 1, "email": "luke@rebellion.org" }));
        assert!(body.iter().all(|user| user.get("password").is_none()));
        assert!(body.iter().all(|user| user.get("is_active").is_none()));
    }

    #[tokio::test]
    async fn test_get_user_favorites() {
        let server = setup_server().await;
        let ids = TestIds::default();

        create_favorite_character(&server, ids.user, ids.character).await;
        create_favorite_character(&server, ids.other_user, ids.other_character).await;
        create_favorite_planet(&server, ids.user, ids.other_planet).await;

        let response = server.get(&format!("/users/favorites/{}", ids.user)).await;

        response.assert_status(StatusCode::OK);
        let raw: Value = response.json();
        assert!(raw["user"].get("password").is_none());
        assert_eq!(raw["favorites_planets"][0]["userID"], ids.user);

        let body: UserFavoritesResponse = response.json();
        assert_eq!(body.user.id, ids.user);
        assert_eq!(body.favorites_characters.len(), 1);
        assert!(body.favorites_characters.iter().all(|f| f.user_id == Some(ids.user)));
        assert_eq!(body.favorites_planets.len(), 1);
        assert_eq!(body.favorites_planets[0].planet_id, Some(ids.other_planet));
    }

    #[tokio::test]
    async fn test_get_user_favorites_not_found() {
        let server = setup_server().await;

        let response = server.get("/users/favorites/999").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body, json!({ "message": "User not found" }));
    }

    #[tokio::test]
    async fn test_get_characters_and_character_by_id() {
        let server = setup_server().await;

        let response = server.get("/characters").await;
        response.assert_status(StatusCode::OK);
        let characters: Vec<CharacterResponse> = response.json();
        assert_eq!(characters.len(), 2);
        assert_eq!(characters[1].name, "R2-D2");
        assert_eq!(characters[1].gender, None);

        let response = server.get("/characters/1").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "id": 1, "name": "Luke Skywalker", "gender": "male", "eyecolor": "blue" })
        );
    }

    #[tokio::test]
    async fn test_get_planets_and_planet_by_id() {
        let server = setup_server().await;

        let response = server.get("/planets").await;
        response.assert_status(StatusCode::OK);
        let planets: Vec<PlanetResponse> = response.json();
        assert_eq!(planets.len(), 2);

        let response = server.get("/planets/2").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "id": 2, "name": "Hoth", "weather": "frozen", "diameter": 7200 })
        );
    }

    #[tokio::test]
    async fn test_unknown_character_and_planet_return_404() {
        let server = setup_server().await;

        let response = server.get("/characters/999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Character not found");

        let response = server.get("/planets/999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Planet not found");
    }

    #[tokio::test]
    async fn test_non_integer_id_returns_json_404() {
        let server = setup_server().await;

        let response = server.get("/characters/vader").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Not Found");
    }

    #[tokio::test]
    async fn test_ids_past_the_key_range_behave_as_missing_rows() {
        let server = setup_server().await;
        let ids = TestIds::default();
        let huge = u64::from(u32::MAX) + 1;

        let response = server.get(&format!("/characters/{huge}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Character not found");

        let response = server.get(&format!("/planets/{huge}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Planet not found");

        let response = server.get(&format!("/users/favorites/{huge}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "User not found");

        let response = server.delete(&format!("/favorite/planets/{huge}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Planet not found");

        let response = server
            .post(&format!("/favorite/planets/{huge}"))
            .json(&json!({ "user_id": ids.user, "planet_id": ids.planet }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: FavoritePlanetResponse = response.json();
        assert_eq!(body.id, 1);
    }

    #[tokio::test]
    async fn test_unknown_path_and_wrong_method_answer_json() {
        let server = setup_server().await;

        let response = server.get("/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Not Found");

        let response = server.get("/favorite/planets/1").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Method Not Allowed");
        let allowed = body["allowed"].as_array().unwrap();
        assert!(allowed.contains(&json!("POST")));
        assert!(allowed.contains(&json!("DELETE")));

        let response = server.delete("/characters").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = response.json();
        assert_eq!(body["allowed"], json!(["GET"]));
    }

    #[tokio::test]
    async fn test_reads_are_idempotent() {
        let server = setup_server().await;

        for path in ["/users", "/characters/2", "/planets/1"] {
            let first: Value = server.get(path).await.json();
            let second: Value = server.get(path).await.json();
            assert_eq!(first, second, "repeated read of {path} differs");
        }
    }

    #[tokio::test]
    async fn test_trailing_slash_is_insignificant() {
        let server = setup_server().await;

        let with_slash = server.get("/planets/").await;
        with_slash.assert_status(StatusCode::OK);
        let without_slash = server.get("/planets").await;
        assert_eq!(with_slash.json::<Value>(), without_slash.json::<Value>());

        let response = server.get("/characters/1/").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_favorite_character_uses_store_assigned_id() {
        let server = setup_server().await;
        let ids = TestIds::default();

        let response = server
            .post("/favorite/characters/77")
            .json(&json!({ "user_id": ids.user, "character_id": ids.character }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: FavoriteCharacterResponse = response.json();
        assert_eq!(body.id, 1);
        assert_eq!(body.user_id, Some(ids.user));
        assert_eq!(body.character_id, Some(ids.character));

        // The path id was never used, so it still addresses nothing
        let response = server.delete("/favorite/characters/77").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_favorite_with_missing_fields() {
        let server = setup_server().await;
        let ids = TestIds::default();

        let response = server
            .post("/favorite/characters/1")
            .json(&json!({ "user_id": ids.user }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Missing required fields");

        let response = server
            .post("/favorite/planets/1")
            .json(&json!({ "planet_id": ids.planet }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Missing required fields");
    }

    #[tokio::test]
    async fn test_null_reference_is_a_value_not_a_missing_field() {
        let server = setup_server().await;
        let ids = TestIds::default();

        let response = server
            .post("/favorite/characters/5")
            .json(&json!({ "user_id": null, "character_id": ids.character }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "id": 1, "user_id": null, "character_id": ids.character })
        );

        let created = create_favorite_planet(&server, ids.user, ids.planet).await;
        let response = server
            .post(&format!("/favorite/planets/{}", created.id))
            .json(&json!({ "user_id": null }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "id": created.id, "userID": null, "planetID": ids.planet })
        );

        let favorites: UserFavoritesResponse = server
            .get(&format!("/users/favorites/{}", ids.user))
            .await
            .json();
        assert!(favorites.favorites_planets.is_empty());
    }

    #[tokio::test]
    async fn test_create_favorite_with_invalid_reference_creates_nothing() {
        let server = setup_server().await;
        let ids = TestIds::default();

        let response = server
            .post("/favorite/characters/1")
            .json(&json!({ "user_id": ids.user, "character_id": ids.missing }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Invalid user_id or character_id");

        let response = server
            .post("/favorite/planets/1")
            .json(&json!({ "user_id": ids.missing, "planet_id": ids.planet }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Invalid user_id or planet_id");

        let favorites: UserFavoritesResponse = server
            .get(&format!("/users/favorites/{}", ids.user))
            .await
            .json();
        assert!(favorites.favorites_characters.is_empty());
        assert!(favorites.favorites_planets.is_empty());
    }

    #[tokio::test]
    async fn test_update_existing_favorite_character() {
        let server = setup_server().await;
        let ids = TestIds::default();
        let created = create_favorite_character(&server, ids.user, ids.character).await;

        let response = server
            .post(&format!("/favorite/characters/{}", created.id))
            .json(&json!({ "user_id": ids.other_user }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: FavoriteCharacterResponse = response.json();
        assert_eq!(body.id, created.id);
        assert_eq!(body.user_id, Some(ids.other_user));
        assert_eq!(body.character_id, Some(ids.character));

        let favorites: UserFavoritesResponse = server
            .get(&format!("/users/favorites/{}", ids.other_user))
            .await
            .json();
        assert_eq!(favorites.favorites_characters, vec![body]);
    }

    #[tokio::test]
    async fn test_update_existing_favorite_planet() {
        let server = setup_server().await;
        let ids = TestIds::default();
        let created = create_favorite_planet(&server, ids.user, ids.planet).await;

        let response = server
            .post(&format!("/favorite/planets/{}", created.id))
            .json(&json!({ "user_id": ids.other_user, "planet_id": ids.other_planet }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "id": created.id, "userID": ids.other_user, "planetID": ids.other_planet })
        );

        let favorites: UserFavoritesResponse = server
            .get(&format!("/users/favorites/{}", ids.other_user))
            .await
            .json();
        assert_eq!(favorites.favorites_planets.len(), 1);
        assert_eq!(favorites.favorites_planets[0].planet_id, Some(ids.other_planet));
    }

    #[tokio::test]
    async fn test_update_existing_favorite_planet_with_empty_body() {
        let server = setup_server().await;
        let ids = TestIds::default();
        let created = create_favorite_planet(&server, ids.user, ids.planet).await;

        let response = server
            .post(&format!("/favorite/planets/{}", created.id))
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(
            body,
            json!({ "id": created.id, "userID": ids.user, "planetID": ids.planet })
        );
    }

    #[tokio::test]
    async fn test_update_rejected_by_store_is_bad_request() {
        let server = setup_server().await;
        let ids = TestIds::default();
        let created = create_favorite_planet(&server, ids.user, ids.planet).await;

        let response = server
            .post(&format!("/favorite/planets/{}", created.id))
            .json(&json!({ "planet_id": ids.missing }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Invalid user_id or planet_id");

        let favorites: UserFavoritesResponse = server
            .get(&format!("/users/favorites/{}", ids.user))
            .await
            .json();
        assert_eq!(favorites.favorites_planets, vec![created]);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_json_error() {
        let server = setup_server().await;

        let response = server
            .post("/favorite/characters/1")
            .bytes("{\"user_id\": ".into())
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: MessageResponse = response.json();
        assert!(!body.message.is_empty());
    }

    #[tokio::test]
    async fn test_delete_favorite_planet() {
        let server = setup_server().await;
        let ids = TestIds::default();

        let response = server.delete("/favorite/planets/5").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Planet not found");

        let created = create_favorite_planet(&server, ids.user, ids.planet).await;
        let response = server.delete(&format!("/favorite/planets/{}", created.id)).await;
        response.assert_status(StatusCode::OK);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Planet deleted");

        let favorites: UserFavoritesResponse = server
            .get(&format!("/users/favorites/{}", ids.user))
            .await
            .json();
        assert!(favorites.favorites_planets.is_empty());

        // The planet itself is untouched
        server.get(&format!("/planets/{}", ids.planet)).await.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_favorite_character() {
        let server = setup_server().await;
        let ids = TestIds::default();

        let response = server.delete("/favorite/characters/5").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Favorite character not found");

        let created = create_favorite_character(&server, ids.user, ids.character).await;
        let response = server
            .delete(&format!("/favorite/characters/{}/", created.id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: MessageResponse = response.json();
        assert_eq!(body.message, "Favorite character deleted");

        let response = server.delete(&format!("/favorite/characters/{}", created.id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
