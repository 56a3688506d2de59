mod common;

use std::sync::Arc;

use common::{spawn_server, station, ADMIN_EMAIL, ADMIN_PASSWORD};
use station_client::types::{ListStationsParams, StationPayload};
use station_client::{MemoryTokenStore, Route, Session};

#[tokio::test]
async fn login_returns_token_and_user() {
    let server = spawn_server().await;
    let client = server.client();

    let auth = client.api.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(auth.message, "Login successful");
    assert_eq!(auth.user.role, "admin");
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn bad_credentials_are_normalized() {
    let server = spawn_server().await;
    let client = server.client();

    let err = client.api.login(ADMIN_EMAIL, "wrong-password").await.unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "Invalid credentials");
    assert!(client.history.visits().is_empty());
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;

    let profile = client.api.profile().await.unwrap();
    assert_eq!(profile.user.email, "ada@example.com");
    assert_eq!(profile.user.role, "user");
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_once() {
    let server = spawn_server().await;
    let store = Arc::new(MemoryTokenStore::with_token("not-a-real-token"));
    let client = server.client_with_session(Session::new(store.clone()));

    let err = client.api.profile().await.unwrap_err();
    assert_eq!(err.status, Some(401));
    assert!(!client.api.session().is_authenticated());
    assert!(station_client::TokenStore::load(store.as_ref()).is_none());
    assert_eq!(client.history.visits(), vec![Route::Login]);
}

#[tokio::test]
async fn validation_errors_carry_fields() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;

    let err = client
        .api
        .create_station(&StationPayload::default())
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "Validation failed");
    let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"powerOutput"));
}

#[tokio::test]
async fn list_skips_empty_filters() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;

    client.api.create_station(&station("Low", 7.0)).await.unwrap();
    client.api.create_station(&station("High", 150.0)).await.unwrap();

    let page = client
        .api
        .list_stations(&ListStationsParams {
            status: Some(String::new()),
            connector_type: Some(String::new()),
            min_power: Some("100".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.pagination.total_items, 1);
    assert_eq!(page.charging_stations[0].name, "High");
}

#[tokio::test]
async fn get_update_delete_round() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;

    let created = client
        .api
        .create_station(&station("Main St", 50.0))
        .await
        .unwrap()
        .charging_station;

    let fetched = client.api.get_station(&created.id).await.unwrap();
    assert_eq!(fetched.charging_station.created_by.unwrap().email, "ada@example.com");

    let updated = client
        .api
        .update_station(
            &created.id,
            &StationPayload {
                status: Some("Maintenance".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.charging_station.status, "Maintenance");
    assert_eq!(updated.charging_station.name, "Main St");

    let deleted = client.api.delete_station(&created.id).await.unwrap();
    assert_eq!(deleted.message, "Charging station deleted successfully");

    let err = client.api.get_station(&created.id).await.unwrap_err();
    assert_eq!(err.status, Some(404));

    let err = client.api.get_station("not-a-valid-id-format").await.unwrap_err();
    assert_eq!(err.status, Some(400));
}

#[tokio::test]
async fn station_ids_cannot_escape_their_route() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;

    let err = client.api.get_station("../auth/profile").await.unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "Invalid charging station ID");

    let err = client
        .api
        .update_station("../auth/profile", &StationPayload::default())
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));
    assert!(client.api.session().token().is_some());
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    let client = station_client::ApiClient::with_base_url("http://127.0.0.1:1/api").unwrap();
    let err = client.login("a@b.c", "whatever").await.unwrap_err();
    assert_eq!(err.status, None);
    assert!(!err.message.is_empty());
}
