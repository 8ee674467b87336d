//! Navigation guards.
//!
//! # Responsibilities
//! - Decide whether a navigation may proceed
//! - Optionally perform their own redirect when they deny
//!
//! # Design Decisions
//! - A guard sees the target path and the route's metadata, nothing else
//! - Denial carries no follow-up instruction; a guard that wants the user
//!   elsewhere pushes the address itself
//! - Guards may suspend (e.g., to consult a credential store)

use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;

use crate::history::History;
use crate::routing::RouteConfig;

/// A gate evaluated before a route is shown. Returns true to allow.
#[async_trait]
pub trait Guard: Send + Sync {
    async fn check(&self, path: &str, route: &RouteConfig) -> bool;
}

#[async_trait]
impl<F, Fut> Guard for F
where
    F: Fn(String, RouteConfig) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send + 'static,
{
    async fn check(&self, path: &str, route: &RouteConfig) -> bool {
        (self)(path.to_string(), route.clone()).await
    }
}

/// Stored credential of the current user.
#[derive(Debug, Default)]
pub struct Credentials {
    token: ArcSwapOption<String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        self.token.store(Some(Arc::new(token.into())));
    }

    pub fn sign_out(&self) {
        self.token.store(None);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.load().is_some()
    }
}

/// Denies routes marked `requires_auth` while no credential is stored, and
/// redirects to the login address.
pub struct AuthGuard {
    credentials: Arc<Credentials>,
    history: Arc<dyn History>,
    login_address: String,
}

impl AuthGuard {
    pub fn new(
        credentials: Arc<Credentials>,
        history: Arc<dyn History>,
        login_address: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            history,
            login_address: login_address.into(),
        }
    }
}

#[async_trait]
impl Guard for AuthGuard {
    async fn check(&self, path: &str, route: &RouteConfig) -> bool {
        if !route.requires_auth || self.credentials.is_authenticated() {
            return true;
        }
        tracing::info!(path, redirect = %self.login_address, "Not signed in, redirecting");
        self.history.push(&self.login_address);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;

    fn guard() -> (AuthGuard, Arc<Credentials>, Arc<MemoryHistory>) {
        let credentials = Arc::new(Credentials::new());
        let history = Arc::new(MemoryHistory::with_initial_address("/dashboard"));
        let guard = AuthGuard::new(credentials.clone(), history.clone(), "/login");
        (guard, credentials, history)
    }

    #[tokio::test]
    async fn test_public_route_always_allowed() {
        let (guard, _, history) = guard();
        assert!(guard.check("about", &RouteConfig::default()).await);
        assert_eq!(history.current_address(), "/dashboard");
    }

    #[tokio::test]
    async fn test_protected_route_redirects_when_signed_out() {
        let (guard, credentials, history) = guard();
        let route = RouteConfig::titled("Dashboard").requires_auth(true);

        assert!(!guard.check("dashboard", &route).await);
        assert_eq!(history.current_address(), "/login");

        credentials.sign_in("token-123");
        assert!(guard.check("dashboard", &route).await);

        credentials.sign_out();
        assert!(!guard.check("dashboard", &route).await);
    }

    #[tokio::test]
    async fn test_closure_guard() {
        let guard = |path: String, route: RouteConfig| async move {
            path.starts_with("public") || !route.requires_auth
        };
        assert!(guard.check("public-page", &RouteConfig::default().requires_auth(true)).await);
        assert!(!guard.check("secret", &RouteConfig::default().requires_auth(true)).await);
    }
}
