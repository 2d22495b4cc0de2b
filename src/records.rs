//! Address-registry record types shared between ingestion, classification
//! and export.
//!
//! `AddressRecord` is one parsed row of source address data; the parser
//! (CSV or JSON) lives outside this crate. `ClassifiedObject` is the
//! classifier's output row, the sole input to the export serializers.

use serde::{Deserialize, Serialize};

/// One raw address row for a municipality, as delivered by the ingestion
/// collaborator. Immutable once read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Registry identifier of the building this address belongs to.
    pub building_id: String,
    /// Free-text building-type hint from the registry, when present.
    pub building_type: Option<String>,
    /// Coordinates are absent when geocoding failed for the row.
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
}

/// Building classification, serialized with the source registry codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingType {
    /// Standalone family house ("RD").
    #[serde(rename = "RD")]
    SingleFamily,
    /// Apartment or other multi-unit block ("BD").
    #[serde(rename = "BD")]
    MultiUnit,
}

/// One classified output row. Cardinality matches the input records: every
/// record of a building yields one row, all sharing the building-level
/// type, unit estimate, leaflet count and uncertainty flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedObject {
    pub municipality_code: String,
    pub building_id: String,
    pub building_type: BuildingType,
    /// Estimated dwelling units, capped at 100.
    pub unit_estimate: u32,
    /// Leaflets to deliver; one per estimated unit.
    pub leaflet_count: u32,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    /// Set when the true unit count likely exceeds the applied cap.
    pub uncertain: bool,
}

/// Drops records without a usable building identifier.
///
/// The classifier assumes every record carries one; this is the
/// ingestion-side filter that guarantees it.
pub fn retain_identified(records: Vec<AddressRecord>) -> Vec<AddressRecord> {
    records
        .into_iter()
        .filter(|record| !record.building_id.trim().is_empty())
        .collect()
}
