//! In-memory correlation of two result sets
//!
//! The secondary set is indexed by identifier once, then every primary
//! record is resolved against the index, so a join costs O(n + m).
//! Identifiers must be unique within the secondary set: a duplicate is
//! reported instead of silently picking one of the candidates.

use std::collections::HashMap;

use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::error::DashboardError;
use crate::record::{Record, References};

/// A flat field → value record as returned by the store
pub type JsonRecord = Map<String, JsonValue>;

/// Identifier → record lookup over a borrowed result set
#[derive(Debug)]
pub struct Index<'a, S: Record> {
    by_id: HashMap<&'a S::Id, &'a S>,
}

impl<'a, S: Record> Index<'a, S> {
    /// Index `records`, rejecting duplicate identifiers
    pub fn build(records: &'a [S]) -> Result<Self, DashboardError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            if by_id.insert(record.id(), record).is_some() {
                return Err(DashboardError::DuplicateIdentifier {
                    collection: S::SCHEMA.collection.to_string(),
                    id: record.id().to_string(),
                });
            }
        }
        Ok(Self { by_id })
    }

    pub fn get(&self, id: &S::Id) -> Option<&'a S> {
        self.by_id.get(id).copied()
    }
}

/// A primary record enriched with the record it references.
///
/// Serializes as the primary record's fields plus one extra field named
/// after [`References::RELATION`], holding the related record or `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlated<P, S> {
    pub record: P,
    pub related: Option<S>,
}

impl<P, S> Serialize for Correlated<P, S>
where
    P: References<S>,
    S: Record,
{
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut fields = match serde_json::to_value(&self.record).map_err(Ser::Error::custom)? {
            JsonValue::Object(map) => map,
            _ => return Err(Ser::Error::custom("joined record is not a JSON object")),
        };
        let related = serde_json::to_value(&self.related).map_err(Ser::Error::custom)?;
        fields.insert(P::RELATION.to_string(), related);
        fields.serialize(serializer)
    }
}

/// Correlate every primary record with the secondary record its foreign
/// key points at. Output keeps the primary length and order.
pub fn join<P, S>(primary: Vec<P>, secondary: &[S]) -> Result<Vec<Correlated<P, S>>, DashboardError>
where
    P: References<S>,
    S: Record,
{
    let index = Index::build(secondary)?;

    let joined = primary
        .into_iter()
        .map(|record| {
            let related = record.foreign_key().and_then(|fk| index.get(fk)).cloned();
            Correlated { record, related }
        })
        .collect();

    Ok(joined)
}

/// Same correlation over untyped records.
///
/// Keys are compared by JSON value, so the number `1` and the string `"1"`
/// do not match. Secondary records with a missing or null identifier can
/// never be referenced and are skipped.
pub fn join_records(
    primary: &[JsonRecord],
    fk_field: &str,
    secondary: &[JsonRecord],
    id_field: &str,
    nested_field: &str,
) -> Result<Vec<JsonRecord>, DashboardError> {
    let mut by_id: HashMap<String, &JsonRecord> = HashMap::with_capacity(secondary.len());
    for record in secondary {
        let Some(id) = record.get(id_field).filter(|v| !v.is_null()) else {
            continue;
        };
        let key = id.to_string();
        if by_id.contains_key(&key) {
            return Err(DashboardError::DuplicateIdentifier {
                collection: nested_field.to_string(),
                id: key,
            });
        }
        by_id.insert(key, record);
    }

    let joined = primary
        .iter()
        .map(|record| {
            let related = record
                .get(fk_field)
                .filter(|v| !v.is_null())
                .and_then(|fk| by_id.get(&fk.to_string()))
                .map(|found| JsonValue::Object((*found).clone()))
                .unwrap_or(JsonValue::Null);

            let mut out = record.clone();
            out.insert(nested_field.to_string(), related);
            out
        })
        .collect();

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::{Appointment, Patient};

    fn records(value: JsonValue) -> Vec<JsonRecord> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    fn patient(id: &str, name: &str) -> Patient {
        Patient {
            id: id.to_string(),
            name: name.to_string(),
            age: None,
            gender: None,
            phone: None,
            address: None,
            blood_group: None,
            created_at: None,
        }
    }

    fn visit(id: i64, patient_id: Option<&str>) -> Appointment {
        Appointment {
            id,
            patient_id: patient_id.map(str::to_string),
            doctor: None,
            department: None,
            visit_type: None,
            appointment_date: None,
            appointment_time: None,
            status: None,
            notes: None,
        }
    }

    #[test]
    fn matching_reference_is_nested() {
        let primary = records(json!([{"id": 1, "patient_fk": "P1"}]));
        let secondary = records(json!([{"id": "P1", "name": "Asha"}]));

        let joined = join_records(&primary, "patient_fk", &secondary, "id", "patient").unwrap();

        assert_eq!(
            JsonValue::Array(joined.into_iter().map(JsonValue::Object).collect()),
            json!([{"id": 1, "patient_fk": "P1", "patient": {"id": "P1", "name": "Asha"}}])
        );
    }

    #[test]
    fn missing_reference_is_null() {
        let primary = records(json!([{"id": 1, "patient_fk": "P9"}]));

        let joined = join_records(&primary, "patient_fk", &[], "id", "patient").unwrap();

        assert_eq!(
            JsonValue::Object(joined[0].clone()),
            json!({"id": 1, "patient_fk": "P9", "patient": null})
        );
    }

    #[test]
    fn empty_secondary_nulls_every_row() {
        let primary = records(json!([
            {"id": 1, "patient_fk": "P1"},
            {"id": 2, "patient_fk": "P2"},
            {"id": 3, "patient_fk": null},
        ]));
        let secondary = records(json!([{"id": "P1"}, {"id": "P2"}]));

        let first = join_records(&primary, "patient_fk", &secondary, "id", "patient").unwrap();
        let again = join_records(&first, "patient_fk", &[], "id", "patient").unwrap();

        assert_eq!(again.len(), 3);
        assert!(again.iter().all(|r| r["patient"].is_null()));
    }

    #[test]
    fn rejoining_is_deterministic() {
        let primary = records(json!([
            {"id": 2, "patient_fk": "P2"},
            {"id": 1, "patient_fk": "P1"},
        ]));
        let secondary = records(json!([
            {"id": "P1", "name": "Asha"},
            {"id": "P2", "name": "Ravi"},
        ]));

        let a = join_records(&primary, "patient_fk", &secondary, "id", "patient").unwrap();
        let b = join_records(&primary, "patient_fk", &secondary, "id", "patient").unwrap();

        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
        assert_eq!(a[0]["id"], 2);
        assert_eq!(a[0]["patient"]["name"], "Ravi");
    }

    #[test]
    fn keys_compare_by_json_value() {
        let primary = records(json!([{"id": 1, "ward_fk": 5}]));
        let secondary = records(json!([{"id": "5"}]));

        let joined = join_records(&primary, "ward_fk", &secondary, "id", "ward").unwrap();
        assert!(joined[0]["ward"].is_null());
    }

    #[test]
    fn duplicate_secondary_identifier_is_rejected() {
        let primary = records(json!([{"id": 1, "patient_fk": "P1"}]));
        let secondary = records(json!([{"id": "P1"}, {"id": "P1"}]));

        let err = join_records(&primary, "patient_fk", &secondary, "id", "patient").unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn typed_join_keeps_primary_order_and_length() {
        let visits = vec![visit(3, Some("P2")), visit(1, None), visit(2, Some("P1"))];
        let patients = vec![patient("P1", "Asha"), patient("P2", "Ravi")];

        let joined = join(visits, &patients).unwrap();

        let ids: Vec<i64> = joined.iter().map(|c| c.record.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(joined[0].related.as_ref().map(|p| p.name.as_str()), Some("Ravi"));
        assert!(joined[1].related.is_none());
        assert_eq!(joined[2].related.as_ref().map(|p| p.name.as_str()), Some("Asha"));
    }

    #[test]
    fn typed_join_serializes_relation_inline() {
        let joined = join(vec![visit(1, Some("P1"))], &[patient("P1", "Asha")]).unwrap();

        let value = serde_json::to_value(&joined[0]).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["patient_id"], "P1");
        assert_eq!(value["patient"]["name"], "Asha");

        let orphan = join(vec![visit(2, Some("P9"))], &[]).unwrap();
        let value = serde_json::to_value(&orphan[0]).unwrap();
        assert!(value["patient"].is_null());
    }

    #[test]
    fn typed_index_rejects_duplicates() {
        let patients = vec![patient("P1", "Asha"), patient("P1", "Asha again")];
        let err = Index::build(&patients).unwrap_err();
        assert_eq!(
            err,
            DashboardError::DuplicateIdentifier {
                collection: "patients".to_string(),
                id: "P1".to_string(),
            }
        );
    }
}
