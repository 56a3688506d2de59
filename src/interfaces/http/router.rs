//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ChargingStationService, UserService};
use crate::domain::{FieldError, RepositoryProvider};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ErrorBody, MessageResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, charging_stations, health};

/// Unified state for every API route.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
    pub users: Arc<UserService>,
    pub stations: Arc<ChargingStationService>,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self {
            users: Arc::new(UserService::new(repos.clone(), jwt_config.clone())),
            stations: Arc::new(ChargingStationService::new(repos.clone())),
            repos,
            jwt_config,
            started_at: Arc::new(Instant::now()),
        }
    }

    /// Rebuild the user service with a different bcrypt work factor.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.users = Arc::new(
            UserService::new(self.repos.clone(), self.jwt_config.clone()).with_bcrypt_cost(cost),
        );
        self
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        AuthState {
            jwt_config: s.jwt_config.clone(),
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<ApiState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        auth::AuthHandlerState {
            users: Arc::clone(&s.users),
        }
    }
}

impl FromRef<ApiState> for charging_stations::StationHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        charging_stations::StationHandlerState {
            stations: Arc::clone(&s.stations),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            repos: Arc::clone(&s.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::profile,
        // Charging Stations
        charging_stations::create_station,
        charging_stations::list_stations,
        charging_stations::get_station,
        charging_stations::update_station,
        charging_stations::delete_station,
    ),
    components(
        schemas(
            // Common
            ErrorBody,
            FieldError,
            MessageResponse,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::AuthResponse,
            auth::ProfileResponse,
            auth::UserInfo,
            // Charging Stations
            charging_stations::StationPayload,
            charging_stations::LocationPayload,
            charging_stations::ChargingStationDto,
            charging_stations::LocationDto,
            charging_stations::CreatorDto,
            charging_stations::StationMutationResponse,
            charging_stations::StationResponse,
            charging_stations::StationListResponse,
            charging_stations::PaginationDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User registration, login (JWT) and profile"),
        (name = "Charging Stations", description = "Charging station CRUD, filtering and pagination"),
    ),
    info(
        title = "Station Registry API",
        version = "1.0.0",
        description = "REST API for managing EV charging station records",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
///
/// `/metrics` is only mounted when a Prometheus handle is given.
pub fn create_api_router(state: ApiState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let auth_layer = middleware::from_fn_with_state(AuthState::from_ref(&state), auth_middleware);

    // Auth routes (public + protected profile)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/profile", get(auth::profile))
                .route_layer(auth_layer.clone()),
        );

    // Charging station routes (protected)
    let station_routes = Router::new()
        .route(
            "/",
            get(charging_stations::list_stations).post(charging_stations::create_station),
        )
        .route(
            "/{id}",
            get(charging_stations::get_station)
                .put(charging_stations::update_station)
                .delete(charging_stations::delete_station),
        )
        .route_layer(auth_layer);

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", auth_routes)
        .nest("/charging-stations", station_routes)
        .route_layer(middleware::from_fn(http_metrics_middleware));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // REST API
        .nest("/api", api_routes)
        .with_state(state);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::InMemoryStorage;

    fn app() -> Router {
        let state = ApiState::new(Arc::new(InMemoryStorage::new()), JwtConfig::default())
            .with_bcrypt_cost(4);
        create_api_router(state, None)
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn register(app: &Router, email: &str) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"name": "Tester", "email": email, "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    fn main_st() -> Value {
        json!({
            "name": "Main St",
            "location": {"latitude": 40.0, "longitude": -73.0},
            "status": "Active",
            "powerOutput": 50,
            "connectorType": "CCS"
        })
    }

    #[tokio::test]
    async fn station_lifecycle_respects_ownership() {
        let app = app();
        let owner = register(&app, "owner@example.com").await;
        let other = register(&app, "other@example.com").await;

        let (status, body) = call(&app, Method::POST, "/api/charging-stations", Some(&owner), Some(main_st())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Charging station created successfully");
        assert_eq!(body["chargingStation"]["status"], "Active");
        assert_eq!(body["chargingStation"]["createdBy"]["email"], "owner@example.com");
        let id = body["chargingStation"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/charging-stations/{id}");

        let (status, body) = call(
            &app,
            Method::PUT,
            &uri,
            Some(&owner),
            Some(json!({"status": "Maintenance"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chargingStation"]["status"], "Maintenance");
        assert_eq!(body["chargingStation"]["name"], "Main St");

        let (status, body) = call(&app, Method::DELETE, &uri, Some(&other), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Not authorized to delete this charging station");

        let (status, _) = call(&app, Method::GET, &uri, Some(&other), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, Method::DELETE, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Charging station deleted successfully");

        let (status, body) = call(&app, Method::DELETE, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Charging station not found");
    }

    fn error_fields(body: &Value) -> Vec<&str> {
        body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn owner_update_with_invalid_value_leaves_record() {
        let app = app();
        let owner = register(&app, "owner@example.com").await;

        let (_, body) = call(&app, Method::POST, "/api/charging-stations", Some(&owner), Some(main_st())).await;
        let before = body["chargingStation"].clone();
        let uri = format!("/api/charging-stations/{}", before["id"].as_str().unwrap());

        let (status, body) = call(
            &app,
            Method::PUT,
            &uri,
            Some(&owner),
            Some(json!({"powerOutput": 500, "name": "Renamed"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(error_fields(&body), vec!["powerOutput"]);

        let (status, body) = call(&app, Method::GET, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chargingStation"], before);
    }

    #[tokio::test]
    async fn wrong_json_types_are_field_errors() {
        let app = app();
        let token = register(&app, "owner@example.com").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/charging-stations",
            Some(&token),
            Some(json!({"name": 42, "powerOutput": "fast"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        let fields = error_fields(&body);
        assert!(fields.contains(&"name"), "{body}");
        assert!(fields.contains(&"powerOutput"), "{body}");

        let mut station = main_st();
        station["powerOutput"] = json!("50");
        station["location"]["latitude"] = json!("40.5");
        let (status, body) = call(&app, Method::POST, "/api/charging-stations", Some(&token), Some(station)).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["chargingStation"]["powerOutput"], 50.0);
        assert_eq!(body["chargingStation"]["location"]["latitude"], 40.5);
    }

    #[tokio::test]
    async fn protected_routes_require_a_valid_token() {
        let app = app();

        let (status, body) = call(&app, Method::GET, "/api/charging-stations", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].is_string());

        let (status, _) = call(&app, Method::GET, "/api/auth/profile", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_input_is_reported_per_field() {
        let app = app();
        let token = register(&app, "owner@example.com").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/charging-stations",
            Some(&token),
            Some(json!({"name": "", "location": {"latitude": 91, "longitude": 0}, "status": "Active", "powerOutput": 50, "connectorType": "CCS"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "location.latitude"]);

        let (status, body) = call(
            &app,
            Method::GET,
            "/api/charging-stations/not-a-valid-id-format",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid charging station ID");

        let (status, _) = call(
            &app,
            Method::GET,
            "/api/charging-stations?sort=-password",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_filters_and_reports_pagination() {
        let app = app();
        let token = register(&app, "owner@example.com").await;

        for power in [5, 10, 22, 50, 150] {
            let mut station = main_st();
            station["powerOutput"] = json!(power);
            let (status, _) = call(&app, Method::POST, "/api/charging-stations", Some(&token), Some(station)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = call(
            &app,
            Method::GET,
            "/api/charging-stations?minPower=10&maxPower=50&limit=2&status=",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["pagination"],
            json!({"currentPage": 1, "totalPages": 2, "totalItems": 3, "itemsPerPage": 2})
        );
        for station in body["chargingStations"].as_array().unwrap() {
            let power = station["powerOutput"].as_f64().unwrap();
            assert!((10.0..=50.0).contains(&power));
        }
    }

    #[tokio::test]
    async fn auth_endpoints() {
        let app = app();
        let token = register(&app, "ada@example.com").await;

        let (status, body) = call(&app, Method::GET, "/api/auth/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert_eq!(body["user"]["role"], "user");

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"name": "Again", "email": "ada@example.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ada@example.com", "password": "wrong-one"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid credentials");

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ada@example.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());
    }

    #[tokio::test]
    async fn health_and_request_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }
}
