//! Default coverage regions inserted on first start

use crate::db::{Storage, StorageError};
use crate::models::NewRegion;

/// Title, description, sensor count for each default region
const DEFAULT_REGIONS: [(&str, &str, i32); 4] = [
    (
        "Northern Region",
        "Coverage across the Himalayan seismic zone, including major cities like Delhi, Chandigarh, and Dehradun.",
        450,
    ),
    (
        "Western Region",
        "Kutch and surrounding areas in Gujarat with extended coverage to Mumbai and parts of Maharashtra.",
        350,
    ),
    (
        "Eastern Region",
        "Coverage across the northeastern states including Assam, Meghalaya, and parts of West Bengal.",
        300,
    ),
    (
        "Central Region",
        "Narmada-Son lineament and surrounding areas with growing coverage in central India.",
        200,
    ),
];

pub fn default_regions() -> Vec<NewRegion> {
    DEFAULT_REGIONS
        .iter()
        .map(|&(title, description, sensors)| NewRegion {
            title: title.to_owned(),
            description: description.to_owned(),
            sensors,
        })
        .collect()
}

/// Insert the default regions if and only if the table is empty.
///
/// Returns the number of rows inserted (0 or 4). The defaults go in as one
/// batch, so a failed seed leaves the table empty and the next run retries.
/// Existing rows are never compared against the defaults. Not safe to run concurrently with itself.
pub async fn seed_regions(storage: &dyn Storage) -> Result<usize, StorageError> {
    if !storage.list_regions().await?.is_empty() {
        tracing::info!("Regions already exist in the database, skipping seed");
        return Ok(0);
    }

    tracing::info!("Seeding initial region data...");
    let inserted = storage.create_regions(default_regions()).await?.len();
    tracing::info!(inserted, "Region data seeded");
    Ok(inserted)
}
