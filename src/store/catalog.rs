//! Static catalog data shown without an API round-trip.

use std::{collections::BTreeMap, sync::LazyLock};

/// Manufacturer key (lowercase slug) → display name.
pub static MANUFACTURERS: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("bluebrixx", "BlueBrixx"),
        ("cada", "CaDA"),
        ("cobi", "COBI"),
        ("lego", "LEGO"),
        ("mouldking", "Mould King"),
        ("reobrix", "Reobrix"),
        ("sluban", "Sluban"),
    ])
});

/// Labels of the featured new products, in display order.
pub const NEW_PRODUCTS: &[&str] = &[
    "CaDA City Bus",
    "Mould King Liebherr Crawler Crane",
    "BlueBrixx Star Trek USS Enterprise",
    "COBI Tiger I",
    "Reobrix Ferris Wheel",
];

/// Display name for a manufacturer key.
pub fn manufacturer_name(key: &str) -> Option<&'static str> {
    MANUFACTURERS.get(key).copied()
}
