//! Create & mint page.
//!
//! Every check here runs before anything touches the catalog or the ledger.

use std::fmt;

use tracing::{info, warn};
use vrmart_catalog::CatalogStore;
use vrmart_core::{
    icp_to_e8s, AssetId, Category, CreateAssetRequest, Icp, ItemId, NewMarketplaceItem,
};
use vrmart_session::SessionContext;
use vrmart_telemetry::Metrics;

use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub size_bytes: u64,
}

impl UploadCandidate {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
        }
    }

    /// Lowercased extension with its leading dot.
    ///
    /// A name without a dot is treated as all extension.
    pub fn extension(&self) -> String {
        let ext = self.file_name.rsplit('.').next().unwrap_or_default();
        format!(".{}", ext.to_lowercase())
    }

    /// Where the model is served from once published.
    pub fn model_path(&self) -> String {
        format!("/models/{}", self.file_name)
    }
}

/// Why the form refused input. Shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRejection {
    UnsupportedType {
        extension: String,
        accepted: Vec<String>,
    },
    TooLarge {
        max_size_bytes: u64,
    },
    MissingFile,
    MissingFields,
    NonPositivePrice,
}

impl FormRejection {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "extension",
            Self::TooLarge { .. } => "size",
            Self::MissingFile => "missing_file",
            Self::MissingFields => "missing_fields",
            Self::NonPositivePrice => "price",
        }
    }
}

impl fmt::Display for FormRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType {
                extension,
                accepted,
            } => write!(
                f,
                "File type {extension} not supported. Please upload: {}",
                accepted.join(", ")
            ),
            Self::TooLarge { max_size_bytes } => write!(
                f,
                "File size must be less than {}MB",
                max_size_bytes / (1024 * 1024)
            ),
            Self::MissingFile => f.write_str("Please upload an asset file"),
            Self::MissingFields => f.write_str("Please fill in all required fields"),
            Self::NonPositivePrice => f.write_str("Price must be greater than 0"),
        }
    }
}

impl std::error::Error for FormRejection {}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Rejected(rejection.to_string())
    }
}

/// Form contents that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedListing {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: Icp,
    pub file: UploadCandidate,
}

impl ValidatedListing {
    fn into_catalog_item(self) -> NewMarketplaceItem {
        NewMarketplaceItem::new(
            self.title,
            self.file.model_path(),
            self.category,
            self.price.to_string(),
        )
        .with_description(self.description)
    }

    fn to_request(&self) -> AppResult<CreateAssetRequest> {
        Ok(CreateAssetRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.label().to_string(),
            price: icp_to_e8s(self.price)?,
            model_url: self.file.model_path(),
        })
    }
}

/// Asset creation form.
#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    /// Price in ICP as typed.
    pub price: String,
    file: Option<UploadCandidate>,
    limits: UploadConfig,
}

impl CreateForm {
    pub fn new(limits: UploadConfig) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Categories offered by the form.
    pub fn categories() -> &'static [Category] {
        &Category::CREATABLE
    }

    pub fn file(&self) -> Option<&UploadCandidate> {
        self.file.as_ref()
    }

    /// Check a picked file and attach it.
    ///
    /// A rejected file leaves any previously attached file in place.
    pub fn attach_file(&mut self, candidate: UploadCandidate) -> Result<(), FormRejection> {
        let extension = candidate.extension();
        if !self
            .limits
            .accepted_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&extension))
        {
            return Err(reject(FormRejection::UnsupportedType {
                extension,
                accepted: self.limits.accepted_extensions.clone(),
            }));
        }

        if candidate.size_bytes > self.limits.max_size_bytes {
            return Err(reject(FormRejection::TooLarge {
                max_size_bytes: self.limits.max_size_bytes,
            }));
        }

        info!(file = %candidate.file_name, size_bytes = candidate.size_bytes, "File attached");
        self.file = Some(candidate);
        Ok(())
    }

    /// Check the whole form.
    pub fn validate(&self) -> Result<ValidatedListing, FormRejection> {
        let Some(file) = self.file.clone() else {
            return Err(reject(FormRejection::MissingFile));
        };

        let title = self.title.trim();
        let description = self.description.trim();
        let price = self.price.trim();
        let category = match self.category {
            Some(c) if !title.is_empty() && !description.is_empty() && !price.is_empty() => c,
            _ => return Err(reject(FormRejection::MissingFields)),
        };

        let price = match price.parse::<Icp>() {
            Ok(p) if p.is_positive() => p,
            _ => return Err(reject(FormRejection::NonPositivePrice)),
        };

        Ok(ValidatedListing {
            title: title.to_string(),
            description: description.to_string(),
            category,
            price,
            file,
        })
    }

    /// Clear all fields and the attached file.
    pub fn reset(&mut self) {
        *self = Self::new(self.limits.clone());
    }

    /// Publish into the local catalog. Returns the new item's id.
    pub fn publish_local(&mut self, store: &CatalogStore) -> Result<ItemId, FormRejection> {
        let listing = self.validate()?;
        let id = store.add_item(listing.into_catalog_item());
        Metrics::catalog_item_added();
        info!(id = %id, "Asset published to catalog");
        self.reset();
        Ok(id)
    }

    /// Mint on the ledger for the signed-in user. Returns the ledger's id.
    ///
    /// The form is kept on failure so the user can retry.
    pub async fn publish_remote(&mut self, session: &SessionContext) -> AppResult<AssetId> {
        let request = self.validate()?.to_request()?;
        let id = session.create_asset(&request).await?;
        info!(asset_id = id, "Asset minted");
        self.reset();
        Ok(id)
    }
}

fn reject(rejection: FormRejection) -> FormRejection {
    warn!(reason = rejection.reason(), message = %rejection, "Upload rejected");
    Metrics::upload_rejected(rejection.reason());
    rejection
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn filled_form() -> CreateForm {
        let mut form = CreateForm::new(UploadConfig::default());
        form.attach_file(UploadCandidate::new("lamp.glb", 1024))
            .unwrap();
        form.title = "Lamp".to_string();
        form.description = "Desk lamp".to_string();
        form.category = Some(Category::Props);
        form.price = "2.5".to_string();
        form
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let mut form = CreateForm::new(UploadConfig::default());
        let err = form
            .attach_file(UploadCandidate::new("model.psd", 10))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "File type .psd not supported. Please upload: .gltf, .glb, .fbx, .obj, .gmpf"
        );
        assert!(form.file().is_none());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let mut form = CreateForm::new(UploadConfig::default());
        assert!(form
            .attach_file(UploadCandidate::new("Scene.GLTF", 10))
            .is_ok());
        assert_eq!(form.file().unwrap().extension(), ".gltf");
    }

    #[test]
    fn test_size_limit() {
        let mut form = CreateForm::new(UploadConfig::default());
        assert!(form
            .attach_file(UploadCandidate::new("big.fbx", 50 * 1024 * 1024))
            .is_ok());

        let err = form
            .attach_file(UploadCandidate::new("bigger.fbx", 50 * 1024 * 1024 + 1))
            .unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 50MB");
        // previous file stays attached
        assert_eq!(form.file().unwrap().file_name, "big.fbx");
    }

    #[test]
    fn test_validate_order() {
        let mut form = CreateForm::new(UploadConfig::default());
        form.title = "Lamp".to_string();
        assert_eq!(form.validate().unwrap_err(), FormRejection::MissingFile);

        form.attach_file(UploadCandidate::new("lamp.obj", 1)).unwrap();
        assert_eq!(form.validate().unwrap_err(), FormRejection::MissingFields);

        let mut form = filled_form();
        form.price = "0".to_string();
        assert_eq!(form.validate().unwrap_err(), FormRejection::NonPositivePrice);
        form.price = "-3".to_string();
        assert_eq!(form.validate().unwrap_err(), FormRejection::NonPositivePrice);
        form.price = "cheap".to_string();
        assert_eq!(form.validate().unwrap_err(), FormRejection::NonPositivePrice);
    }

    #[test]
    fn test_validate_accepts_filled_form() {
        let listing = filled_form().validate().unwrap();
        assert_eq!(listing.price, Icp(dec!(2.5)));
        assert_eq!(listing.category, Category::Props);

        let request = listing.to_request().unwrap();
        assert_eq!(request.price.value(), 250_000_000);
        assert_eq!(request.category, "Props");
        assert_eq!(request.model_url, "/models/lamp.glb");
    }

    #[test]
    fn test_publish_local_appends_and_resets() {
        let store = CatalogStore::seeded();
        let mut form = filled_form();

        let id = form.publish_local(&store).unwrap();
        assert_eq!(id, ItemId(9));
        let item = store.get(id).unwrap();
        assert_eq!(item.title, "Lamp");
        assert_eq!(item.price, "2.5 ICP");
        assert_eq!(item.description.as_deref(), Some("Desk lamp"));

        assert!(form.file().is_none());
        assert!(form.title.is_empty());
        assert!(form.category.is_none());
    }

    #[test]
    fn test_creatable_categories() {
        assert_eq!(CreateForm::categories().len(), 8);
    }
}
