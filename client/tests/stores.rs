mod common;

use std::sync::Arc;

use common::{spawn_server, station, ADMIN_EMAIL, ADMIN_PASSWORD, PASSWORD};
use station_client::types::{ListStationsParams, StationPayload};
use station_client::{
    AuthState, AuthStore, MemoryTokenStore, Route, Session, StationFilters, StationListStore,
    ToastKind,
};

#[tokio::test]
async fn login_then_logout() {
    let server = spawn_server().await;
    let client = server.client();
    let mut auth = AuthStore::init(client.api.clone(), client.toasts.clone()).await;
    assert_eq!(auth.state(), AuthState::Anonymous);

    let response = auth.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(auth.state(), AuthState::Authenticated);
    assert!(!auth.loading());
    assert_eq!(auth.token(), Some(response.token));
    assert_eq!(auth.user().unwrap().role, "admin");
    assert_eq!(client.toasts.latest().unwrap().message, "Login successful!");

    auth.logout();
    assert_eq!(auth.state(), AuthState::Anonymous);
    assert!(auth.user().is_none());
    assert_eq!(client.toasts.latest().unwrap().message, "Logged out successfully");
}

#[tokio::test]
async fn failed_login_notifies_and_reraises() {
    let server = spawn_server().await;
    let client = server.client();
    let mut auth = AuthStore::init(client.api.clone(), client.toasts.clone()).await;

    let err = auth.login(ADMIN_EMAIL, "nope").await.unwrap_err();
    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(auth.state(), AuthState::Anonymous);
    assert!(!auth.loading());

    let toast = client.toasts.latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Invalid credentials");
}

#[tokio::test]
async fn register_signs_in() {
    let server = spawn_server().await;
    let client = server.client();
    let mut auth = AuthStore::init(client.api.clone(), client.toasts.clone()).await;

    auth.register("Ada", "ada@example.com", PASSWORD).await.unwrap();
    assert!(auth.is_authenticated());
    assert_eq!(auth.user().unwrap().name, "Ada");
    assert_eq!(client.toasts.latest().unwrap().message, "Registration successful!");

    let err = auth.register("Ada", "ada@example.com", PASSWORD).await.unwrap_err();
    assert_eq!(err.status, Some(409));
}

#[tokio::test]
async fn resumed_token_loads_profile() {
    let server = spawn_server().await;
    let token = server
        .client()
        .api
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap()
        .token;

    let client = server.client_with_session(Session::new(Arc::new(MemoryTokenStore::with_token(token))));
    let auth = AuthStore::init(client.api.clone(), client.toasts.clone()).await;

    assert_eq!(auth.state(), AuthState::Authenticated);
    assert_eq!(auth.user().unwrap().email, ADMIN_EMAIL);
    assert!(client.toasts.toasts().is_empty());
}

#[tokio::test]
async fn stale_token_degrades_to_anonymous() {
    let server = spawn_server().await;
    let client = server.client_with_session(Session::new(Arc::new(MemoryTokenStore::with_token("stale"))));
    let auth = AuthStore::init(client.api.clone(), client.toasts.clone()).await;

    assert_eq!(auth.state(), AuthState::Anonymous);
    assert_eq!(client.history.current(), Some(Route::Login));
    assert_eq!(client.toasts.latest().unwrap().message, "Logged out successfully");
}

#[tokio::test]
async fn create_prepends_without_refetch() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;
    let mut store = StationListStore::new(client.api.clone(), client.toasts.clone());

    client.api.create_station(&station("Existing", 22.0)).await.unwrap();
    store.fetch(ListStationsParams::default()).await.unwrap();
    assert_eq!(store.stations().len(), 1);

    let created = store.create(&station("Main St", 50.0)).await.unwrap();
    assert_eq!(store.stations().len(), 2);
    assert_eq!(store.stations()[0].id, created.id);
    assert_eq!(store.stations()[0].status, "Active");
    assert!(!store.loading());
    assert_eq!(
        client.toasts.latest().unwrap().message,
        "Charging station created successfully!"
    );
}

#[tokio::test]
async fn update_replaces_in_place_and_delete_removes() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;
    let mut store = StationListStore::new(client.api.clone(), client.toasts.clone());

    let first = store.create(&station("First", 22.0)).await.unwrap();
    let second = store.create(&station("Second", 50.0)).await.unwrap();

    let updated = store
        .update(
            &first.id,
            &StationPayload {
                status: Some("Maintenance".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, "Maintenance");
    assert_eq!(store.stations()[1].id, first.id);
    assert_eq!(store.stations()[1].status, "Maintenance");

    store.delete(&second.id).await.unwrap();
    assert_eq!(store.stations().len(), 1);
    assert_eq!(store.stations()[0].id, first.id);
    assert_eq!(
        client.toasts.latest().unwrap().message,
        "Charging station deleted successfully!"
    );
}

#[tokio::test]
async fn update_of_uncached_station_does_not_insert() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;
    let created = client
        .api
        .create_station(&station("Elsewhere", 22.0))
        .await
        .unwrap()
        .charging_station;

    let mut store = StationListStore::new(client.api.clone(), client.toasts.clone());
    store
        .update(
            &created.id,
            &StationPayload {
                name: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(store.stations().is_empty());
}

#[tokio::test]
async fn forbidden_update_notifies_and_keeps_cache() {
    let server = spawn_server().await;
    let owner = server.signed_in("Owner", "owner@example.com").await;
    let other = server.signed_in("Other", "other@example.com").await;

    let created = owner
        .api
        .create_station(&station("Main St", 50.0))
        .await
        .unwrap()
        .charging_station;

    let mut store = StationListStore::new(other.api.clone(), other.toasts.clone());
    store.fetch(ListStationsParams::default()).await.unwrap();

    let err = store.delete(&created.id).await.unwrap_err();
    assert_eq!(err.status, Some(403));
    assert_eq!(store.stations().len(), 1);
    assert!(!store.loading());

    let toast = other.toasts.latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Not authorized to delete this charging station");
}

#[tokio::test]
async fn stored_filters_apply_until_cleared() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;
    let mut store = StationListStore::new(client.api.clone(), client.toasts.clone());

    for (name, power) in [("Slow", 7.0), ("Medium", 50.0), ("Fast", 150.0)] {
        store.create(&station(name, power)).await.unwrap();
    }

    store.set_filters(StationFilters {
        min_power: Some("10".into()),
        max_power: Some("100".into()),
        ..Default::default()
    });
    let page = store.fetch(ListStationsParams::default()).await.unwrap();
    assert_eq!(page.pagination.total_items, 1);
    assert_eq!(store.stations()[0].name, "Medium");

    let page = store
        .fetch(ListStationsParams {
            max_power: Some("200".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.pagination.total_items, 2);

    store.clear_filters();
    assert_eq!(store.filters(), &StationFilters::default());
    store
        .fetch(ListStationsParams {
            limit: Some("2".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let pagination = store.pagination().unwrap();
    assert_eq!(pagination.total_items, 3);
    assert_eq!(pagination.total_pages, 2);
    assert_eq!(store.stations().len(), 2);
}

#[tokio::test]
async fn fetch_failure_uses_fixed_message() {
    let server = spawn_server().await;
    let client = server.signed_in("Ada", "ada@example.com").await;
    let mut store = StationListStore::new(client.api.clone(), client.toasts.clone());

    let err = store
        .fetch(ListStationsParams {
            sort: Some("nonsense".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(
        client.toasts.latest().unwrap().message,
        "Failed to fetch charging stations"
    );
    assert!(!store.loading());
}
