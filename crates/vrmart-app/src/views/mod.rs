//! Headless view-models for the storefront pages.

pub mod catalog;
pub mod create_form;
pub mod detail;

pub use catalog::{CatalogRow, CatalogView};
pub use create_form::{CreateForm, FormRejection, UploadCandidate, ValidatedListing};
pub use detail::{DetailView, ViewerSettings};
