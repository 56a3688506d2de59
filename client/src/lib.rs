//! # Station Client
//!
//! Client-side state layer for the station registry API: the pieces a
//! single-page frontend keeps between screens.
//!
//! - **api**: HTTP client that injects the bearer token and normalizes errors
//! - **session**: token + identity shared by the client and the auth store
//! - **stores**: auth session state machine and the station list cache
//! - **router**: route table and navigation guard
//! - **notify**: user-facing toast notifications

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod router;
pub mod session;
pub mod stores;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use notify::{Notifier, Toast, ToastKind, ToastLog, TracingNotifier};
pub use router::{guard, Navigation, Navigator, Route, RouteHistory};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use stores::{AuthState, AuthStore, StationFilters, StationListStore};

/// Wire types shared with the server
pub mod types {
    pub use station_registry::domain::FieldError;
    pub use station_registry::interfaces::http::common::{ErrorBody, MessageResponse};
    pub use station_registry::interfaces::http::modules::auth::{
        AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UserInfo,
    };
    pub use station_registry::interfaces::http::modules::charging_stations::{
        ChargingStationDto, CreatorDto, ListStationsParams, LocationDto, LocationPayload,
        PaginationDto, StationListResponse, StationMutationResponse, StationPayload,
        StationResponse,
    };
}
