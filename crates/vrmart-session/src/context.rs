//! Session context.
//!
//! State machine: `Uninitialized -> Loading -> {Authenticated, Unauthenticated}`.
//! Login and logout move between the two settled states; `teardown` returns
//! to `Uninitialized`.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use vrmart_core::{Asset, AssetId, CreateAssetRequest, Principal};
use vrmart_ledger::LedgerClient;
use vrmart_telemetry::Metrics;

use crate::error::SessionResult;

/// Authentication state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Uninitialized,
    Loading,
    Authenticated,
    Unauthenticated,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of the session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub state: SessionState,
    pub principal: Option<Principal>,
    pub assets: Vec<Asset>,
    pub is_loading: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }
}

/// Shared authentication state and asset cache.
///
/// The lock is only taken for reads and swaps; ledger calls run without it.
pub struct SessionContext {
    client: Arc<LedgerClient>,
    inner: RwLock<Session>,
}

impl SessionContext {
    pub fn new(client: Arc<LedgerClient>) -> Self {
        Self {
            client,
            inner: RwLock::new(Session::default()),
        }
    }

    pub fn client(&self) -> &Arc<LedgerClient> {
        &self.client
    }

    /// Move to `next`, writing state and principal under one guard.
    ///
    /// The principal is kept only in `Authenticated`; every other state also
    /// drops the cached assets.
    fn transition(&self, next: SessionState, principal: Option<Principal>) {
        let prev = {
            let mut inner = self.inner.write();
            if next == SessionState::Authenticated {
                inner.principal = principal;
            } else {
                inner.principal = None;
                inner.assets.clear();
            }
            std::mem::replace(&mut inner.state, next)
        };
        if prev != next {
            debug!(from = %prev, to = %next, "Session state transition");
        }
        Metrics::session_state_set(next.as_str());
    }

    /// Settle after the client reported a live session.
    ///
    /// Returns whether the session is authenticated, which requires a
    /// resolved principal.
    fn settle_logged_in(&self) -> bool {
        match self.client.principal() {
            Some(principal) => {
                info!(principal = %principal, "Session authenticated");
                self.transition(SessionState::Authenticated, Some(principal));
                true
            }
            None => {
                warn!(kind = "no_identity", "Session has no principal, staying unauthenticated");
                self.transition(SessionState::Unauthenticated, None);
                false
            }
        }
    }

    /// Pick up a persisted session, if any.
    ///
    /// Never fails: a broken identity provider leaves the session
    /// unauthenticated. `is_loading` is true only while this runs.
    pub async fn init(&self) {
        self.inner.write().is_loading = true;
        self.transition(SessionState::Loading, None);

        match self.client.init().await {
            Ok(()) if self.client.is_logged_in() => {
                if self.settle_logged_in() {
                    self.refresh_assets().await;
                }
            }
            Ok(()) => {
                self.transition(SessionState::Unauthenticated, None);
            }
            Err(e) => {
                error!(error = %e, "Session initialization failed");
                self.transition(SessionState::Unauthenticated, None);
            }
        }

        self.inner.write().is_loading = false;
    }

    /// Run the login flow. Returns whether the user is now authenticated.
    pub async fn login(&self) -> bool {
        match self.client.login().await {
            Ok(true) => {
                if !self.settle_logged_in() {
                    return false;
                }
                self.refresh_assets().await;
                true
            }
            Ok(false) => {
                warn!("Login was not completed");
                false
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                false
            }
        }
    }

    /// Log out. Local state is cleared even when the ledger call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "Logout failed remotely, clearing local session anyway");
        }
        self.transition(SessionState::Unauthenticated, None);
        info!("Logged out");
    }

    /// Mint an asset and refresh the cache.
    pub async fn create_asset(&self, request: &CreateAssetRequest) -> SessionResult<AssetId> {
        let id = self.client.create_asset(request).await?;
        info!(asset_id = id, title = %request.title, "Asset created");
        self.refresh_assets().await;
        Ok(id)
    }

    /// Buy an asset and refresh the cache. Returns the ledger's message.
    pub async fn purchase_asset(&self, id: AssetId) -> SessionResult<String> {
        let message = self.client.purchase_asset(id).await?;
        info!(asset_id = id, message = %message, "Asset purchased");
        self.refresh_assets().await;
        Ok(message)
    }

    /// Like an asset. Failures are logged and reported as `false`.
    pub async fn like_asset(&self, id: AssetId) -> bool {
        match self.client.like_asset(id).await {
            Ok(true) => {
                self.refresh_assets().await;
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(asset_id = id, error = %e, "Like failed");
                false
            }
        }
    }

    /// Count a view. Failures are logged and reported as `false`.
    pub async fn record_view(&self, id: AssetId) -> bool {
        match self.client.increment_views(id).await {
            Ok(true) => {
                self.refresh_assets().await;
                true
            }
            Ok(false) => false,
            Err(e) => {
                warn!(asset_id = id, error = %e, "View count failed");
                false
            }
        }
    }

    /// Replace the cached asset list with the ledger's.
    ///
    /// On failure the previous list is kept.
    pub async fn refresh_assets(&self) {
        match self.client.get_all_assets().await {
            Ok(assets) => {
                debug!(count = assets.len(), "Assets refreshed");
                self.inner.write().assets = assets;
            }
            Err(e) => {
                warn!(error = %e, "Asset refresh failed, keeping cached list");
                Metrics::refresh_failed();
            }
        }
    }

    /// Log out if needed and return to `Uninitialized`.
    pub async fn teardown(&self) {
        if self.is_authenticated() {
            self.logout().await;
        }
        self.inner.write().is_loading = false;
        self.transition(SessionState::Uninitialized, None);
    }

    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    pub fn state(&self) -> SessionState {
        self.inner.read().state
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_authenticated()
    }

    pub fn principal(&self) -> Option<Principal> {
        self.inner.read().principal.clone()
    }

    pub fn assets(&self) -> Vec<Asset> {
        self.inner.read().assets.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrmart_core::E8s;
    use vrmart_ledger::mock::{MockActorFactory, MockIdentityProvider, MockLedgerActor};
    use vrmart_ledger::{LedgerError, PurchaseResult};

    struct Harness {
        identity: Arc<MockIdentityProvider>,
        actor: Arc<MockLedgerActor>,
        factory: Arc<MockActorFactory>,
        session: SessionContext,
    }

    fn harness() -> Harness {
        let identity = Arc::new(MockIdentityProvider::new());
        let actor = Arc::new(MockLedgerActor::new());
        let factory = Arc::new(MockActorFactory::new(actor.clone()));
        let client = LedgerClient::new(identity.clone(), factory.clone(), "http://idp/#authorize");
        Harness {
            identity,
            actor,
            factory,
            session: SessionContext::new(Arc::new(client)),
        }
    }

    fn principal() -> Principal {
        "2vxsx-fae".parse().unwrap()
    }

    fn asset(id: AssetId) -> Asset {
        Asset {
            id,
            title: format!("Asset {id}"),
            description: String::new(),
            category: "Props".to_string(),
            price: E8s(100_000_000),
            creator: principal(),
            created_at: 0,
            likes: 0,
            views: 0,
            model_url: format!("/models/{id}.glb"),
            rating: 0.0,
            reviews: 0,
        }
    }

    fn request() -> CreateAssetRequest {
        CreateAssetRequest {
            title: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            category: "Props".to_string(),
            price: E8s(250_000_000),
            model_url: "/models/lamp.glb".to_string(),
        }
    }

    fn assert_principal_matches_state(session: &SessionContext) {
        let snapshot = session.snapshot();
        assert_eq!(snapshot.principal.is_some(), snapshot.is_authenticated());
    }

    async fn logged_in() -> Harness {
        let h = harness();
        h.identity.set_login_outcome(Some(principal()));
        assert!(h.session.login().await);
        h
    }

    #[test]
    fn test_new_session_is_uninitialized() {
        let h = harness();
        assert_eq!(h.session.state(), SessionState::Uninitialized);
        assert!(!h.session.is_loading());
        assert!(h.session.principal().is_none());
    }

    #[tokio::test]
    async fn test_init_without_persisted_session() {
        let h = harness();
        h.session.init().await;
        assert_eq!(h.session.state(), SessionState::Unauthenticated);
        assert!(!h.session.is_loading());
    }

    #[tokio::test]
    async fn test_init_restores_session_and_assets() {
        let h = harness();
        h.identity.set_persisted(Some(principal()));
        h.actor.set_assets(vec![asset(1), asset(2)]);

        h.session.init().await;
        let snapshot = h.session.snapshot();
        assert!(snapshot.is_authenticated());
        assert_eq!(snapshot.principal, Some(principal()));
        assert_eq!(snapshot.assets.len(), 2);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_init_failure_falls_through_to_unauthenticated() {
        let h = harness();
        h.identity.set_fail_restore(true);
        h.session.init().await;
        assert_eq!(h.session.state(), SessionState::Unauthenticated);
        assert!(!h.session.is_loading());
    }

    #[tokio::test]
    async fn test_login_refused_returns_false() {
        let h = harness();
        h.identity.set_login_outcome(None);
        assert!(!h.session.login().await);
        assert!(!h.session.is_authenticated());

        h.identity.set_fail_login(true);
        assert!(!h.session.login().await);
        assert!(h.session.principal().is_none());
    }

    #[tokio::test]
    async fn test_login_loads_assets() {
        let h = harness();
        h.actor.set_assets(vec![asset(4)]);
        h.identity.set_login_outcome(Some(principal()));

        assert!(h.session.login().await);
        assert_eq!(h.session.state(), SessionState::Authenticated);
        assert_eq!(h.session.assets()[0].id, 4);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_remote_fails() {
        let h = logged_in().await;
        h.actor.set_assets(vec![asset(1)]);
        h.session.refresh_assets().await;
        h.identity.set_fail_logout(true);

        h.session.logout().await;
        assert_eq!(h.session.state(), SessionState::Unauthenticated);
        assert!(h.session.principal().is_none());
        assert!(h.session.assets().is_empty());
    }

    #[tokio::test]
    async fn test_create_asset_unauthenticated_leaves_state() {
        let h = harness();
        h.session.init().await;
        let before = h.session.snapshot();

        let err = h.session.create_asset(&request()).await.unwrap_err();
        assert!(matches!(err.ledger(), LedgerError::NotAuthenticated));

        let after = h.session.snapshot();
        assert_eq!(after.state, before.state);
        assert!(after.assets.is_empty());
        assert!(h.actor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_asset_refreshes_cache() {
        let h = logged_in().await;
        let id = h.session.create_asset(&request()).await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(h.session.assets().len(), 1);
        assert_eq!(h.session.assets()[0].title, "Lamp");
    }

    #[tokio::test]
    async fn test_purchase_error_message_is_verbatim() {
        let h = logged_in().await;
        h.actor
            .set_purchase_result(PurchaseResult::Error("insufficient funds".to_string()));

        let err = h.session.purchase_asset(1).await.unwrap_err();
        assert_eq!(err.to_string(), "insufficient funds");
    }

    #[tokio::test]
    async fn test_like_refreshes_only_on_true() {
        let h = logged_in().await;
        h.actor.set_assets(vec![asset(1)]);

        assert!(h.session.like_asset(1).await);
        assert_eq!(h.session.assets()[0].likes, 1);

        h.actor.set_like_result(false);
        let refreshes = h.actor.call_count("getAllAssets");
        assert!(!h.session.like_asset(1).await);
        assert_eq!(h.actor.call_count("getAllAssets"), refreshes);
    }

    #[tokio::test]
    async fn test_like_and_view_swallow_failures() {
        let h = harness();
        assert!(!h.session.like_asset(1).await);
        assert!(!h.session.record_view(1).await);

        let h = logged_in().await;
        h.actor.set_fail_transport(true);
        assert!(!h.session.like_asset(1).await);
        assert!(!h.session.record_view(1).await);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_stale_list() {
        let h = logged_in().await;
        h.actor.set_assets(vec![asset(1), asset(2)]);
        h.session.refresh_assets().await;

        h.actor.set_fail_transport(true);
        h.session.refresh_assets().await;
        assert_eq!(h.session.assets().len(), 2);
    }

    #[tokio::test]
    async fn test_teardown_returns_to_uninitialized() {
        let h = logged_in().await;
        h.session.teardown().await;
        assert_eq!(h.session.state(), SessionState::Uninitialized);
        assert!(h.session.principal().is_none());
        assert!(!h.session.client().is_logged_in());
    }

    #[tokio::test]
    async fn test_login_actor_failure_stays_unauthenticated() {
        let h = harness();
        h.session.init().await;
        h.identity.set_login_outcome(Some(principal()));
        h.factory.set_fail(true);

        assert!(!h.session.login().await);
        assert_eq!(h.session.state(), SessionState::Unauthenticated);
        assert!(h.session.principal().is_none());
        assert!(!h.session.client().is_logged_in());
        assert!(h.actor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_init_actor_failure_stays_unauthenticated() {
        let h = harness();
        h.identity.set_persisted(Some(principal()));
        h.factory.set_fail(true);

        h.session.init().await;
        assert_eq!(h.session.state(), SessionState::Unauthenticated);
        assert!(h.session.principal().is_none());
        assert!(!h.session.is_loading());
    }

    #[tokio::test]
    async fn test_principal_present_only_when_authenticated() {
        let h = harness();
        assert_principal_matches_state(&h.session);

        h.identity.set_persisted(Some(principal()));
        h.session.init().await;
        assert!(h.session.is_authenticated());
        assert_principal_matches_state(&h.session);

        h.session.logout().await;
        assert_principal_matches_state(&h.session);

        h.identity.set_login_outcome(Some(principal()));
        assert!(h.session.login().await);
        assert_principal_matches_state(&h.session);

        h.session.teardown().await;
        assert_principal_matches_state(&h.session);
    }

    #[tokio::test]
    async fn test_session_without_principal_is_unauthenticated() {
        let h = harness();
        h.identity.set_anonymous(true);
        h.identity.set_persisted(Some(principal()));

        h.session.init().await;
        assert_eq!(h.session.state(), SessionState::Unauthenticated);
        assert_principal_matches_state(&h.session);
        assert_eq!(h.actor.call_count("getAllAssets"), 0);

        h.identity.set_login_outcome(Some(principal()));
        assert!(!h.session.login().await);
        assert_eq!(h.session.state(), SessionState::Unauthenticated);
        assert_principal_matches_state(&h.session);
    }
}
