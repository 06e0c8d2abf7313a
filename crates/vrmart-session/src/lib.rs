//! Session context for vrmart.
//!
//! `SessionContext` is the single shared view of authentication state: it
//! tracks whether the user is logged in, the resolved principal, and a cache
//! of the ledger's asset list that is refreshed after every mutation.

pub mod context;
pub mod error;

pub use context::{Session, SessionContext, SessionState};
pub use error::{SessionError, SessionResult};
