//! Route table and the authentication guard.
//!
//! Every view the app can show is a [`Route`]. Protected routes are gated
//! by [`evaluate`]: until session hydration finishes they show a neutral
//! loading frame (never a protected view, never a premature login screen),
//! and after hydration an unauthenticated visitor is redirected to login.
//! The guard is re-run on every reducer pass, so a session that expires
//! mid-flight redirects on the next update.

/// Top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    /// Whether this route requires an authenticated session.
    pub fn is_protected(self) -> bool {
        match self {
            Route::Login | Route::Register => false,
            Route::Dashboard => true,
        }
    }
}

/// Resolved guard status for the current route, stored on app state so the
/// renderer never re-derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Hydration has not finished; protected content must not render.
    Unresolved,
    /// The current route may render.
    Ready,
    /// The visitor is being sent to the login view.
    Redirecting,
}

/// What the guard decided for one (route, session) snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Hydration pending on a protected route: show the neutral frame.
    Loading,
    /// Route may render.
    Render,
    /// Unauthenticated on a protected route: go to login.
    RedirectToLogin,
}

/// Pure guard decision.
///
/// Public routes always render. Protected routes render only once the
/// persisted session has been hydrated AND a session is present.
pub fn evaluate(route: Route, hydrated: bool, authenticated: bool) -> GuardOutcome {
    if !route.is_protected() {
        return GuardOutcome::Render;
    }
    if !hydrated {
        return GuardOutcome::Loading;
    }
    if authenticated {
        GuardOutcome::Render
    } else {
        GuardOutcome::RedirectToLogin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Protected content never renders before hydration resolves.
    #[test]
    fn test_protected_route_loading_until_hydrated() {
        assert_eq!(
            evaluate(Route::Dashboard, false, false),
            GuardOutcome::Loading
        );
        // Even an (impossibly) authenticated pre-hydration snapshot waits.
        assert_eq!(
            evaluate(Route::Dashboard, false, true),
            GuardOutcome::Loading
        );
    }

    /// After hydration, a missing session redirects; a present one renders.
    #[test]
    fn test_protected_route_after_hydration() {
        assert_eq!(
            evaluate(Route::Dashboard, true, false),
            GuardOutcome::RedirectToLogin
        );
        assert_eq!(evaluate(Route::Dashboard, true, true), GuardOutcome::Render);
    }

    /// Public routes render regardless of hydration or session state.
    #[test]
    fn test_public_routes_always_render() {
        for route in [Route::Login, Route::Register] {
            assert_eq!(evaluate(route, false, false), GuardOutcome::Render);
            assert_eq!(evaluate(route, true, false), GuardOutcome::Render);
            assert_eq!(evaluate(route, true, true), GuardOutcome::Render);
        }
    }
}
