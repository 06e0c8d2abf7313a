//! In-memory fakes for the ledger seams.
//!
//! Used by tests in this crate and in downstream crates that need a ledger
//! without a network.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use vrmart_core::{Asset, AssetId, CreateAssetRequest, Principal};

use crate::actor::{ActorFactory, BoxFuture, DynLedgerActor, LedgerActor};
use crate::error::{LedgerError, LedgerResult};
use crate::identity::IdentityProvider;
use crate::result::{CreateAssetResult, PurchaseResult};

/// Mock ledger actor with programmable results.
#[derive(Debug)]
pub struct MockLedgerActor {
    assets: Mutex<Vec<Asset>>,
    create_result: Mutex<CreateAssetResult>,
    purchase_result: Mutex<PurchaseResult>,
    like_result: AtomicBool,
    fail_transport: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl Default for MockLedgerActor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedgerActor {
    pub fn new() -> Self {
        Self {
            assets: Mutex::new(Vec::new()),
            create_result: Mutex::new(CreateAssetResult::Ok(1)),
            purchase_result: Mutex::new(PurchaseResult::Success("purchased".to_string())),
            like_result: AtomicBool::new(true),
            fail_transport: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replace the ledger's asset list.
    pub fn set_assets(&self, assets: Vec<Asset>) {
        *self.assets.lock() = assets;
    }

    pub fn set_create_result(&self, result: CreateAssetResult) {
        *self.create_result.lock() = result;
    }

    pub fn set_purchase_result(&self, result: PurchaseResult) {
        *self.purchase_result.lock() = result;
    }

    pub fn set_like_result(&self, liked: bool) {
        self.like_result.store(liked, Ordering::SeqCst);
    }

    /// Make every call fail with a transport error.
    pub fn set_fail_transport(&self, fail: bool) {
        self.fail_transport.store(fail, Ordering::SeqCst);
    }

    /// Names of the methods called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of calls to `method`.
    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == method).count()
    }

    fn record(&self, method: &str) -> LedgerResult<()> {
        self.calls.lock().push(method.to_string());
        if self.fail_transport.load(Ordering::SeqCst) {
            return Err(LedgerError::Transport("mock transport failure".to_string()));
        }
        Ok(())
    }

    fn bump(&self, id: AssetId, f: impl FnOnce(&mut Asset)) -> bool {
        let mut assets = self.assets.lock();
        match assets.iter_mut().find(|a| a.id == id) {
            Some(asset) => {
                f(asset);
                true
            }
            None => false,
        }
    }
}

impl LedgerActor for MockLedgerActor {
    fn get_all_assets(&self) -> BoxFuture<'_, LedgerResult<Vec<Asset>>> {
        Box::pin(async move {
            self.record("getAllAssets")?;
            Ok(self.assets.lock().clone())
        })
    }

    fn get_asset(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<Option<Asset>>> {
        Box::pin(async move {
            self.record("getAsset")?;
            Ok(self.assets.lock().iter().find(|a| a.id == id).cloned())
        })
    }

    fn get_assets_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> BoxFuture<'a, LedgerResult<Vec<Asset>>> {
        Box::pin(async move {
            self.record("getAssetsByCategory")?;
            Ok(self
                .assets
                .lock()
                .iter()
                .filter(|a| a.category == category)
                .cloned()
                .collect())
        })
    }

    fn get_user_assets<'a>(
        &'a self,
        owner: &'a Principal,
    ) -> BoxFuture<'a, LedgerResult<Vec<Asset>>> {
        Box::pin(async move {
            self.record("getUserAssets")?;
            Ok(self
                .assets
                .lock()
                .iter()
                .filter(|a| &a.creator == owner)
                .cloned()
                .collect())
        })
    }

    fn create_asset<'a>(
        &'a self,
        owner: &'a Principal,
        request: &'a CreateAssetRequest,
    ) -> BoxFuture<'a, LedgerResult<CreateAssetResult>> {
        Box::pin(async move {
            self.record("createAsset")?;
            let result = self.create_result.lock().clone();
            if let CreateAssetResult::Ok(id) = result {
                self.assets.lock().push(Asset {
                    id,
                    title: request.title.clone(),
                    description: request.description.clone(),
                    category: request.category.clone(),
                    price: request.price,
                    creator: owner.clone(),
                    created_at: 0,
                    likes: 0,
                    views: 0,
                    model_url: request.model_url.clone(),
                    rating: 0.0,
                    reviews: 0,
                });
            }
            Ok(result)
        })
    }

    fn purchase_asset<'a>(
        &'a self,
        _owner: &'a Principal,
        _id: AssetId,
    ) -> BoxFuture<'a, LedgerResult<PurchaseResult>> {
        Box::pin(async move {
            self.record("purchaseAsset")?;
            Ok(self.purchase_result.lock().clone())
        })
    }

    fn like_asset(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<bool>> {
        Box::pin(async move {
            self.record("likeAsset")?;
            if !self.like_result.load(Ordering::SeqCst) {
                return Ok(false);
            }
            Ok(self.bump(id, |a| a.likes += 1))
        })
    }

    fn increment_views(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<bool>> {
        Box::pin(async move {
            self.record("incrementViews")?;
            Ok(self.bump(id, |a| a.views += 1))
        })
    }
}

/// Mock identity provider.
///
/// `login` succeeds with the configured outcome principal, or fails when
/// none is configured.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    persisted: Mutex<Option<Principal>>,
    login_outcome: Mutex<Option<Principal>>,
    current: Mutex<Option<Principal>>,
    fail_restore: AtomicBool,
    fail_login: AtomicBool,
    fail_logout: AtomicBool,
    anonymous: AtomicBool,
    login_urls: Mutex<Vec<String>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that `restore` will find.
    pub fn set_persisted(&self, principal: Option<Principal>) {
        *self.persisted.lock() = principal;
    }

    /// Principal the next `login` resolves to, `None` to refuse.
    pub fn set_login_outcome(&self, principal: Option<Principal>) {
        *self.login_outcome.lock() = principal;
    }

    pub fn set_fail_restore(&self, fail: bool) {
        self.fail_restore.store(fail, Ordering::SeqCst);
    }

    /// Make `login` return an error instead of a verdict.
    pub fn set_fail_login(&self, fail: bool) {
        self.fail_login.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_logout(&self, fail: bool) {
        self.fail_logout.store(fail, Ordering::SeqCst);
    }

    /// Drop the resolved principal while keeping the session.
    pub fn forget_principal(&self) {
        self.current.lock().take();
    }

    /// Report sessions as live but never resolve a principal for them.
    pub fn set_anonymous(&self, anonymous: bool) {
        self.anonymous.store(anonymous, Ordering::SeqCst);
    }

    /// Provider URLs passed to `login`.
    pub fn login_urls(&self) -> Vec<String> {
        self.login_urls.lock().clone()
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn restore(&self) -> BoxFuture<'_, LedgerResult<bool>> {
        Box::pin(async move {
            if self.fail_restore.load(Ordering::SeqCst) {
                return Err(LedgerError::Identity("mock restore failure".to_string()));
            }
            let persisted = self.persisted.lock().clone();
            let found = persisted.is_some();
            *self.current.lock() = persisted;
            Ok(found)
        })
    }

    fn login<'a>(&'a self, provider_url: &'a str) -> BoxFuture<'a, LedgerResult<bool>> {
        Box::pin(async move {
            self.login_urls.lock().push(provider_url.to_string());
            if self.fail_login.load(Ordering::SeqCst) {
                return Err(LedgerError::Identity("mock login failure".to_string()));
            }
            let outcome = self.login_outcome.lock().clone();
            match outcome {
                Some(principal) => {
                    *self.current.lock() = Some(principal);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    fn logout(&self) -> BoxFuture<'_, LedgerResult<()>> {
        Box::pin(async move {
            if self.fail_logout.load(Ordering::SeqCst) {
                return Err(LedgerError::Identity("mock logout failure".to_string()));
            }
            self.current.lock().take();
            self.persisted.lock().take();
            Ok(())
        })
    }

    fn principal(&self) -> Option<Principal> {
        if self.anonymous.load(Ordering::SeqCst) {
            return None;
        }
        self.current.lock().clone()
    }
}

/// Factory handing out one shared mock actor.
#[derive(Debug)]
pub struct MockActorFactory {
    actor: Arc<MockLedgerActor>,
    builds: AtomicUsize,
    fail: AtomicBool,
}

impl MockActorFactory {
    pub fn new(actor: Arc<MockLedgerActor>) -> Self {
        Self {
            actor,
            builds: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// Number of actors built so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl ActorFactory for MockActorFactory {
    fn build(&self, _principal: Option<Principal>) -> BoxFuture<'_, LedgerResult<DynLedgerActor>> {
        Box::pin(async move {
            if self.fail.load(Ordering::SeqCst) {
                return Err(LedgerError::Transport("mock agent unavailable".to_string()));
            }
            self.builds.fetch_add(1, Ordering::SeqCst);
            Ok(self.actor.clone() as DynLedgerActor)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_actor_records_calls() {
        let actor = MockLedgerActor::new();
        actor.get_all_assets().await.unwrap();
        actor.like_asset(3).await.unwrap();
        assert_eq!(actor.calls(), vec!["getAllAssets", "likeAsset"]);
        assert_eq!(actor.call_count("likeAsset"), 1);
    }

    #[tokio::test]
    async fn test_mock_create_adds_asset() {
        let actor = MockLedgerActor::new();
        actor.set_create_result(CreateAssetResult::Ok(5));
        let owner: Principal = "2vxsx-fae".parse().unwrap();
        let request = CreateAssetRequest {
            title: "Tree".to_string(),
            description: "Oak".to_string(),
            category: "Environments".to_string(),
            price: vrmart_core::E8s(1),
            model_url: "/models/tree.glb".to_string(),
        };

        actor.create_asset(&owner, &request).await.unwrap();
        let assets = actor.get_user_assets(&owner).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, 5);
    }
}
