//! vrmart storefront application.
//!
//! Wires the local catalog, the session context and the remote ledger
//! together from configuration, and exposes headless view-models:
//! - `CatalogView`: filtered listing with like toggling
//! - `DetailView`: one item with its viewer settings
//! - `CreateForm`: upload validation and publishing

pub mod app;
pub mod config;
pub mod error;
pub mod views;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
