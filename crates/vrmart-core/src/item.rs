//! Local storefront catalog types.

use crate::display::ModelDisplay;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog item identifier.
///
/// Assigned by the catalog store; positive and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marketplace category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Furniture,
    Architecture,
    #[serde(rename = "Object/Prop")]
    ObjectProp,
    Beauty,
    Decor,
    Avatars,
    Props,
    Environments,
    Vehicles,
    Wearables,
    #[serde(rename = "VR Experiences")]
    VrExperiences,
    Animations,
    Textures,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Furniture,
        Category::Architecture,
        Category::ObjectProp,
        Category::Beauty,
        Category::Decor,
        Category::Avatars,
        Category::Props,
        Category::Environments,
        Category::Vehicles,
        Category::Wearables,
        Category::VrExperiences,
        Category::Animations,
        Category::Textures,
    ];

    /// Categories offered when creating a new asset.
    pub const CREATABLE: [Category; 8] = [
        Category::Avatars,
        Category::Props,
        Category::Environments,
        Category::Vehicles,
        Category::Wearables,
        Category::VrExperiences,
        Category::Animations,
        Category::Textures,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Furniture => "Furniture",
            Self::Architecture => "Architecture",
            Self::ObjectProp => "Object/Prop",
            Self::Beauty => "Beauty",
            Self::Decor => "Decor",
            Self::Avatars => "Avatars",
            Self::Props => "Props",
            Self::Environments => "Environments",
            Self::Vehicles => "Vehicles",
            Self::Wearables => "Wearables",
            Self::VrExperiences => "VR Experiences",
            Self::Animations => "Animations",
            Self::Textures => "Textures",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownCategory(wanted.to_string()))
    }
}

/// Item listed in the local storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceItem {
    pub id: ItemId,
    pub title: String,
    /// Location of the 3D model file.
    pub model_path: String,
    pub category: Category,
    /// Display price, e.g. "45 ICP". Not interpreted by the catalog.
    pub price: String,
    pub likes: u64,
    pub views: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<u64>,
    #[serde(default)]
    pub display: ModelDisplay,
}

/// A catalog item before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMarketplaceItem {
    pub title: String,
    pub model_path: String,
    pub category: Category,
    pub price: String,
    pub likes: u64,
    pub views: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<u64>,
    #[serde(default)]
    pub display: ModelDisplay,
}

impl NewMarketplaceItem {
    /// Minimal item with zeroed counters and default display.
    pub fn new(
        title: impl Into<String>,
        model_path: impl Into<String>,
        category: Category,
        price: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            model_path: model_path.into(),
            category,
            price: price.into(),
            likes: 0,
            views: 0,
            description: None,
            creator: None,
            rating: None,
            reviews: None,
            display: ModelDisplay::default(),
        }
    }

    #[must_use]
    pub fn with_counters(mut self, likes: u64, views: u64) -> Self {
        self.likes = likes;
        self.views = views;
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: ModelDisplay) -> Self {
        self.display = display;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an id, producing a listed item.
    pub fn into_item(self, id: ItemId) -> MarketplaceItem {
        MarketplaceItem {
            id,
            title: self.title,
            model_path: self.model_path,
            category: self.category,
            price: self.price,
            likes: self.likes,
            views: self.views,
            description: self.description,
            creator: self.creator,
            rating: self.rating,
            reviews: self.reviews,
            display: self.display,
        }
    }
}
