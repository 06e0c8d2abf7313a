//! Remote asset ledger client for vrmart.
//!
//! This crate is the only place that talks to the remote side:
//! - `LedgerActor`: typed proxy for the ledger service contract
//! - `IdentityProvider`: session persistence and the interactive login flow
//! - `LedgerClient`: owns at most one session and one actor handle
//! - `HttpLedgerActor` / `FileIdentityProvider`: concrete transports
//! - `mock`: in-memory fakes for tests

pub mod actor;
pub mod client;
pub mod environment;
pub mod error;
pub mod http;
pub mod identity;
pub mod mock;
pub mod result;

pub use actor::{ActorFactory, BoxFuture, DynActorFactory, DynLedgerActor, LedgerActor};
pub use client::LedgerClient;
pub use environment::{LedgerEnvironment, DEFAULT_CANISTER_ID, DEFAULT_IDENTITY_CANISTER_ID};
pub use error::{LedgerError, LedgerResult};
pub use http::{HttpActorFactory, HttpLedgerActor};
pub use identity::{DynIdentityProvider, FileIdentityProvider, IdentityProvider};
pub use result::{CreateAssetResult, PurchaseResult};
pub use vrmart_core::{e8s_to_icp, icp_to_e8s};
