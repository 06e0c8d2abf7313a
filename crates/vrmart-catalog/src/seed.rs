//! Seed list shown by the storefront at startup.

use vrmart_core::{Category, ModelDisplay, NewMarketplaceItem};

/// The fixed startup catalog, in listing order.
///
/// The store assigns ids 1..=8 in this order.
pub fn seed_items() -> Vec<NewMarketplaceItem> {
    let entry = |title: &str,
                 path: &str,
                 category: Category,
                 price: &str,
                 likes: u64,
                 views: u64,
                 scale: f32| {
        NewMarketplaceItem::new(title, path, category, price)
            .with_counters(likes, views)
            .with_display(ModelDisplay::with_scale(scale))
    };

    vec![
        entry(
            "Aesthetic Desk",
            "/models/Aesthetic Desk .glb",
            Category::Furniture,
            "45 ICP",
            892,
            5400,
            3.0,
        ),
        entry(
            "Apartment",
            "/models/Apartment.glb",
            Category::Architecture,
            "120 ICP",
            634,
            3200,
            1.5,
        ),
        entry(
            "Desk",
            "/models/Desk.glb",
            Category::Furniture,
            "35 ICP",
            423,
            2800,
            7.0,
        ),
        entry(
            "Duck",
            "/models/Duck.glb",
            Category::ObjectProp,
            "8 ICP",
            1205,
            8900,
            4.0,
        ),
        entry(
            "Kitchen Table",
            "/models/Kitchen Table.glb",
            Category::Furniture,
            "55 ICP",
            567,
            3400,
            6.0,
        ),
        entry(
            "Nail Polish",
            "/models/Nail Polish.glb",
            Category::Beauty,
            "12 ICP",
            789,
            4200,
            45.0,
        ),
        entry(
            "Office Chair",
            "/models/Office Chair.glb",
            Category::Furniture,
            "65 ICP",
            345,
            2100,
            8.0,
        ),
        entry(
            "Plants - Assorted Shelf Plants",
            "/models/Plants - Assorted shelf plants.glb",
            Category::Decor,
            "25 ICP",
            478,
            2900,
            7.0,
        ),
    ]
}
