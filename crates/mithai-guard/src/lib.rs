//! Route table and view authorization.
//!
//! Every navigation attempt is decided synchronously from the current
//! session snapshot; decisions are never cached. A view either renders or
//! redirects, with no intermediate loading state, because session
//! hydration completes before the first navigation. Authorization failures
//! are silent redirects, never error screens.

use mithai_session::{Role, Session};

/// The views of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The storefront landing page. Served without a guard, like the
    /// dashboard it renders.
    Home,
    Login,
    Register,
    Dashboard,
    Purchases,
    Admin,
}

/// What a route demands of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone may view.
    Public,
    /// Any authenticated session.
    Authenticated,
    /// A specific role.
    Role(Role),
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Render the requested view.
    Render,
    /// Go somewhere else instead.
    Redirect(Route),
}

impl Route {
    /// URL path of the view.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Purchases => "/purchases",
            Route::Admin => "/admin",
        }
    }

    /// Access requirement of the view.
    pub fn access(&self) -> Access {
        match self {
            Route::Home | Route::Login | Route::Register => Access::Public,
            Route::Dashboard | Route::Purchases => Access::Authenticated,
            Route::Admin => Access::Role(Role::Admin),
        }
    }
}

/// Decide whether `route` renders for `session`.
///
/// Unauthenticated sessions are sent to login; authenticated sessions
/// lacking the required role land on the dashboard (the default
/// authenticated view), not an error page.
pub fn decide(session: &Session, route: Route) -> Decision {
    match route.access() {
        Access::Public => Decision::Render,
        Access::Authenticated => {
            if session.is_authenticated() {
                Decision::Render
            } else {
                Decision::Redirect(Route::Login)
            }
        }
        Access::Role(required) => {
            if !session.is_authenticated() {
                Decision::Redirect(Route::Login)
            } else if session.role() == Some(required) {
                Decision::Render
            } else {
                Decision::Redirect(Route::Dashboard)
            }
        }
    }
}
