//! Client routes and the navigation guard

use std::sync::Mutex;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    ChargingStations,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Only while signed out
    GuestOnly,
    /// Only while signed in
    AuthRequired,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Root,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::ChargingStations,
        Route::Map,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::ChargingStations => "/charging-stations",
            Route::Map => "/map",
        }
    }

    /// Match a path, ignoring any query string and trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn access(self) -> Access {
        match self {
            Route::Root => Access::Public,
            Route::Login | Route::Register => Access::GuestOnly,
            Route::Dashboard | Route::ChargingStations | Route::Map => Access::AuthRequired,
        }
    }

    /// Static redirect applied before the guard runs
    pub fn redirect(self) -> Option<Route> {
        match self {
            Route::Root => Some(Route::Dashboard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    Redirect(Route),
}

impl Navigation {
    /// Where the user ends up
    pub fn target(self) -> Route {
        match self {
            Navigation::Proceed(r) | Navigation::Redirect(r) => r,
        }
    }
}

/// Decide a navigation to `to` given the current sign-in state.
pub fn guard(to: Route, authenticated: bool) -> Navigation {
    if let Some(target) = to.redirect() {
        return match guard(target, authenticated) {
            Navigation::Proceed(r) | Navigation::Redirect(r) => Navigation::Redirect(r),
        };
    }

    match (to.access(), authenticated) {
        (Access::AuthRequired, false) => Navigation::Redirect(Route::Login),
        (Access::GuestOnly, true) => Navigation::Redirect(Route::Dashboard),
        _ => Navigation::Proceed(to),
    }
}

/// Receives forced navigations, e.g. the redirect to login after a 401
pub trait Navigator: Send + Sync {
    fn redirect(&self, to: Route);
}

/// Records every forced navigation
#[derive(Debug, Default)]
pub struct RouteHistory {
    visits: Mutex<Vec<Route>>,
}

impl RouteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<Route> {
        self.visits.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn current(&self) -> Option<Route> {
        self.visits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .copied()
    }
}

impl Navigator for RouteHistory {
    fn redirect(&self, to: Route) {
        debug!("Redirecting to {}", to.path());
        self.visits.lock().unwrap_or_else(|e| e.into_inner()).push(to);
    }
}
