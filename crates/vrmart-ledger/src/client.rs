//! Ledger client.
//!
//! Holds at most one authenticated session and one actor handle derived
//! from it. Both are absent until `init` restores a session or `login`
//! succeeds; `logout` discards them again.

use std::future::Future;

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use vrmart_core::{Asset, AssetId, CreateAssetRequest, Principal};
use vrmart_telemetry::Metrics;

use crate::actor::{DynActorFactory, DynLedgerActor};
use crate::error::{LedgerError, LedgerResult};
use crate::identity::DynIdentityProvider;
use crate::result::{CreateAssetResult, PurchaseResult};

#[derive(Default)]
struct ClientState {
    initialized: bool,
    authenticated: bool,
    actor: Option<DynLedgerActor>,
}

/// Client for the remote asset ledger.
pub struct LedgerClient {
    identity: DynIdentityProvider,
    factory: DynActorFactory,
    identity_provider_url: String,
    state: RwLock<ClientState>,
}

impl LedgerClient {
    /// Create a client. Nothing is contacted until `init` or `login`.
    pub fn new(
        identity: DynIdentityProvider,
        factory: DynActorFactory,
        identity_provider_url: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            factory,
            identity_provider_url: identity_provider_url.into(),
            state: RwLock::new(ClientState::default()),
        }
    }

    /// Establish the identity handle and pick up a persisted session.
    ///
    /// If no actor can be built for the restored session the client stays
    /// logged out; the persisted session is kept for the next attempt.
    pub async fn init(&self) -> LedgerResult<()> {
        let restored = self.identity.restore().await?;
        self.state.write().initialized = true;

        if !restored {
            debug!("No persisted session");
            return Ok(());
        }

        info!("Persisted session found");
        let actor = self.factory.build(self.identity.principal()).await?;
        self.authenticate(actor);
        Ok(())
    }

    /// Run the interactive login flow.
    ///
    /// Returns whether the provider reported success. On success the actor
    /// handle is rebuilt for the fresh identity. If that fails the provider
    /// session is discarded so a failed login is never persisted.
    pub async fn login(&self) -> LedgerResult<bool> {
        if !self.state.read().initialized {
            self.init().await?;
        }

        let ok = self.identity.login(&self.identity_provider_url).await?;
        if !ok {
            info!("Identity provider reported login failure");
            Metrics::ledger_call("login", "refused");
            return Ok(false);
        }

        let actor = match self.factory.build(self.identity.principal()).await {
            Ok(actor) => actor,
            Err(e) => {
                warn!(error = %e, "Actor creation failed, discarding new session");
                Metrics::ledger_call("login", e.kind());
                self.reset();
                if let Err(logout_err) = self.identity.logout().await {
                    warn!(error = %logout_err, "Failed to discard provider session");
                }
                return Err(e);
            }
        };

        self.authenticate(actor);
        Metrics::ledger_call("login", "ok");
        Ok(true)
    }

    /// Invalidate the session and drop the actor handle.
    ///
    /// The provider is always asked to forget its session, so an unreadable
    /// persisted session can be cleared without a successful `init`. Local
    /// state is cleared even when that fails; the failure is still returned.
    pub async fn logout(&self) -> LedgerResult<()> {
        let result = self.identity.logout().await;
        self.reset();
        info!("Ledger session closed");
        result
    }

    fn authenticate(&self, actor: DynLedgerActor) {
        let mut state = self.state.write();
        state.actor = Some(actor);
        state.authenticated = true;
    }

    fn reset(&self) {
        let mut state = self.state.write();
        state.authenticated = false;
        state.actor = None;
    }

    /// Principal of the current identity while logged in.
    pub fn principal(&self) -> Option<Principal> {
        if !self.is_logged_in() {
            return None;
        }
        self.identity.principal()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().authenticated
    }

    fn actor(&self) -> LedgerResult<DynLedgerActor> {
        self.state
            .read()
            .actor
            .clone()
            .ok_or(LedgerError::NotAuthenticated)
    }

    fn owner(&self) -> LedgerResult<(DynLedgerActor, Principal)> {
        let actor = self.actor()?;
        let principal = self.identity.principal().ok_or(LedgerError::NoIdentity)?;
        Ok((actor, principal))
    }

    async fn observe<T, F>(&self, operation: &'static str, call: F) -> LedgerResult<T>
    where
        F: Future<Output = LedgerResult<T>>,
    {
        let result = call.await;
        match &result {
            Ok(_) => Metrics::ledger_call(operation, "ok"),
            Err(e) => {
                warn!(operation, error = %e, kind = e.kind(), "Ledger call failed");
                Metrics::ledger_call(operation, e.kind());
            }
        }
        result
    }

    pub async fn get_all_assets(&self) -> LedgerResult<Vec<Asset>> {
        let actor = self.actor()?;
        self.observe("get_all_assets", actor.get_all_assets()).await
    }

    pub async fn get_asset(&self, id: AssetId) -> LedgerResult<Option<Asset>> {
        let actor = self.actor()?;
        self.observe("get_asset", actor.get_asset(id)).await
    }

    pub async fn get_assets_by_category(&self, category: &str) -> LedgerResult<Vec<Asset>> {
        let actor = self.actor()?;
        self.observe(
            "get_assets_by_category",
            actor.get_assets_by_category(category),
        )
        .await
    }

    pub async fn get_user_assets(&self, owner: &Principal) -> LedgerResult<Vec<Asset>> {
        let actor = self.actor()?;
        self.observe("get_user_assets", actor.get_user_assets(owner))
            .await
    }

    /// Mint a new asset owned by the current principal.
    pub async fn create_asset(&self, request: &CreateAssetRequest) -> LedgerResult<AssetId> {
        let (actor, principal) = self.owner()?;
        self.observe("create_asset", async {
            actor
                .create_asset(&principal, request)
                .await
                .and_then(CreateAssetResult::into_result)
        })
        .await
    }

    /// Buy an asset for the current principal.
    pub async fn purchase_asset(&self, id: AssetId) -> LedgerResult<String> {
        let (actor, principal) = self.owner()?;
        self.observe("purchase_asset", async {
            actor
                .purchase_asset(&principal, id)
                .await
                .and_then(PurchaseResult::into_result)
        })
        .await
    }

    pub async fn like_asset(&self, id: AssetId) -> LedgerResult<bool> {
        let actor = self.actor()?;
        self.observe("like_asset", actor.like_asset(id)).await
    }

    pub async fn increment_views(&self, id: AssetId) -> LedgerResult<bool> {
        let actor = self.actor()?;
        self.observe("increment_views", actor.increment_views(id))
            .await
    }
}
