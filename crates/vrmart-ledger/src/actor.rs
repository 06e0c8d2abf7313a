//! Remote ledger service contract.
//!
//! `LedgerActor` is the typed proxy for the remote service. Methods return
//! boxed futures so the trait stays dyn-compatible and handles can be
//! swapped at runtime (HTTP transport, test fakes).

use std::pin::Pin;
use std::sync::Arc;

use vrmart_core::{Asset, AssetId, CreateAssetRequest, Principal};

use crate::error::LedgerResult;
use crate::result::{CreateAssetResult, PurchaseResult};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Typed proxy for the remote asset ledger.
///
/// `Err` is reserved for transport-level failures; business rejections come
/// back inside `CreateAssetResult` / `PurchaseResult`.
pub trait LedgerActor: Send + Sync {
    fn get_all_assets(&self) -> BoxFuture<'_, LedgerResult<Vec<Asset>>>;

    fn get_asset(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<Option<Asset>>>;

    fn get_assets_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> BoxFuture<'a, LedgerResult<Vec<Asset>>>;

    fn get_user_assets<'a>(&'a self, owner: &'a Principal)
        -> BoxFuture<'a, LedgerResult<Vec<Asset>>>;

    fn create_asset<'a>(
        &'a self,
        owner: &'a Principal,
        request: &'a CreateAssetRequest,
    ) -> BoxFuture<'a, LedgerResult<CreateAssetResult>>;

    fn purchase_asset<'a>(
        &'a self,
        owner: &'a Principal,
        id: AssetId,
    ) -> BoxFuture<'a, LedgerResult<PurchaseResult>>;

    fn like_asset(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<bool>>;

    fn increment_views(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<bool>>;
}

/// Arc wrapper for LedgerActor trait objects.
pub type DynLedgerActor = Arc<dyn LedgerActor>;

/// Builds actor handles bound to an identity.
pub trait ActorFactory: Send + Sync {
    /// Build a handle that signs calls as `principal`, or anonymously.
    fn build(&self, principal: Option<Principal>) -> BoxFuture<'_, LedgerResult<DynLedgerActor>>;
}

/// Arc wrapper for ActorFactory trait objects.
pub type DynActorFactory = Arc<dyn ActorFactory>;
