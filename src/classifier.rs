//! Building classifier: groups address records into buildings and derives
//! type, unit and leaflet estimates.
//!
//! Pure and infallible; any group composition is a valid input. A fresh run
//! fully replaces the prior classification for a municipality, so callers
//! never merge output sets.

use std::collections::HashMap;

use tracing::debug;

use crate::records::{AddressRecord, BuildingType, ClassifiedObject};

/// Registry hint substring marking an apartment building. The registry's
/// type strings vary ("bytový dům", "objekt k bydlení s byty", ...); this is
/// the one marker the classifier tests for.
const APARTMENT_HINT: &str = "byt";

/// Unit estimates are capped here; larger groups raise the uncertainty flag
/// instead of the estimate.
const UNIT_CAP: usize = 100;

/// Classify one municipality's address records.
///
/// Records are grouped by building identifier; each group becomes one
/// building and every record of the group is emitted as one
/// `ClassifiedObject` carrying the group-level estimates. Callers must have
/// filtered out identifier-less records (see
/// [`crate::records::retain_identified`]).
pub fn classify(records: &[AddressRecord], municipality_code: &str) -> Vec<ClassifiedObject> {
    let mut grouped: HashMap<&str, Vec<&AddressRecord>> = HashMap::new();
    for record in records {
        grouped.entry(record.building_id.as_str()).or_default().push(record);
    }

    debug!(
        municipality_code,
        records = records.len(),
        buildings = grouped.len(),
        "classifying address records"
    );

    let mut results = Vec::with_capacity(records.len());
    for (building_id, group) in grouped {
        let building_type = determine_type(&group);
        let (unit_estimate, uncertain) = estimate_units(&group, building_type);
        let leaflet_count = estimate_leaflets(building_type, unit_estimate);
        for record in group {
            results.push(ClassifiedObject {
                municipality_code: municipality_code.to_string(),
                building_id: building_id.to_string(),
                building_type,
                unit_estimate,
                leaflet_count,
                lon: record.lon,
                lat: record.lat,
                street: record.street.clone(),
                house_number: record.house_number.clone(),
                locality: record.locality.clone(),
                postal_code: record.postal_code.clone(),
                uncertain,
            });
        }
    }
    results
}

/// An explicit apartment hint wins over the count rule, so a single-entrance
/// block with one address still classifies as multi-unit.
fn determine_type(group: &[&AddressRecord]) -> BuildingType {
    for record in group {
        if let Some(hint) = &record.building_type {
            if hint.to_lowercase().contains(APARTMENT_HINT) {
                return BuildingType::MultiUnit;
            }
        }
    }
    if group.len() > 1 {
        BuildingType::MultiUnit
    } else {
        BuildingType::SingleFamily
    }
}

fn estimate_units(group: &[&AddressRecord], building_type: BuildingType) -> (u32, bool) {
    match building_type {
        BuildingType::SingleFamily => (1, false),
        BuildingType::MultiUnit => {
            let count = group.len();
            (count.min(UNIT_CAP) as u32, count > UNIT_CAP)
        }
    }
}

fn estimate_leaflets(building_type: BuildingType, unit_estimate: u32) -> u32 {
    match building_type {
        BuildingType::SingleFamily => 1,
        BuildingType::MultiUnit => unit_estimate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(building_id: &str, building_type: Option<&str>) -> AddressRecord {
        AddressRecord {
            building_id: building_id.to_string(),
            building_type: building_type.map(str::to_string),
            lon: Some(15.0),
            lat: Some(49.0),
            house_number: None,
            street: None,
            locality: None,
            postal_code: None,
        }
    }

    #[test]
    fn test_single_record_no_hint_is_single_family() {
        let records = vec![record("1", None)];
        let objects = classify(&records, "586846");
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].building_type, BuildingType::SingleFamily);
        assert_eq!(objects[0].unit_estimate, 1);
        assert_eq!(objects[0].leaflet_count, 1);
        assert!(!objects[0].uncertain);
    }

    #[test]
    fn test_multi_record_group_is_multi_unit() {
        let records = vec![record("1", None), record("1", None), record("1", None)];
        let objects = classify(&records, "586846");
        assert_eq!(objects.len(), 3);
        for obj in &objects {
            assert_eq!(obj.building_type, BuildingType::MultiUnit);
            assert_eq!(obj.unit_estimate, 3);
            assert_eq!(obj.leaflet_count, 3);
            assert!(!obj.uncertain);
        }
    }

    #[test]
    fn test_apartment_hint_overrides_count() {
        let records = vec![record("1", Some("Bytový dům"))];
        let objects = classify(&records, "586846");
        assert_eq!(objects[0].building_type, BuildingType::MultiUnit);
        // min(1, 100): a known undercount, kept deliberately
        assert_eq!(objects[0].unit_estimate, 1);
        assert_eq!(objects[0].leaflet_count, 1);
    }

    #[test]
    fn test_hint_match_is_case_insensitive_substring() {
        let records = vec![record("1", Some("objekt k bydlení s BYTY"))];
        let objects = classify(&records, "586846");
        assert_eq!(objects[0].building_type, BuildingType::MultiUnit);
    }

    #[test]
    fn test_unit_cap_sets_uncertainty() {
        let records: Vec<AddressRecord> = (0..120).map(|_| record("1", None)).collect();
        let objects = classify(&records, "586846");
        assert_eq!(objects.len(), 120, "One output row per input record");
        for obj in &objects {
            assert_eq!(obj.building_type, BuildingType::MultiUnit);
            assert_eq!(obj.unit_estimate, 100);
            assert_eq!(obj.leaflet_count, 100);
            assert!(obj.uncertain);
        }
    }

    #[test]
    fn test_exactly_at_cap_is_not_uncertain() {
        let records: Vec<AddressRecord> = (0..100).map(|_| record("1", None)).collect();
        let objects = classify(&records, "586846");
        assert_eq!(objects[0].unit_estimate, 100);
        assert!(!objects[0].uncertain);
    }

    #[test]
    fn test_records_keep_their_own_fields() {
        let mut first = record("1", None);
        first.street = Some("Dlouhá".to_string());
        let mut second = record("1", None);
        second.street = Some("Krátká".to_string());
        let objects = classify(&[first, second], "586846");

        let mut streets: Vec<&str> = objects
            .iter()
            .filter_map(|obj| obj.street.as_deref())
            .collect();
        streets.sort();
        assert_eq!(streets, vec!["Dlouhá", "Krátká"]);
    }
}
