//! Flattening of an [`OcelDocument`] into eight relational row sets.
//!
//! Every table is derived independently from the same in-memory document:
//! iterate a top-level array, then its nested array, and carry the parent
//! identifier into each row. Attribute values are always stored as text so a
//! single column can hold heterogeneous value types.

use serde::{Deserialize, Serialize};

use crate::document::OcelDocument;

// ── Table catalogue ────────────────────────────────────────────────────────

/// A column of an output table. All columns are text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub nullable: bool,
}

/// Name and columns of one output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSpec {
    /// Comma-separated column names, e.g. `object_id, object_type`.
    #[must_use]
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

const fn required(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        nullable: false,
    }
}

const fn nullable(name: &'static str) -> ColumnSpec {
    ColumnSpec {
        name,
        nullable: true,
    }
}

pub const OBJECT_TYPES: TableSpec = TableSpec {
    name: "object_types",
    columns: &[
        required("object_type_name"),
        required("attribute_name"),
        required("attribute_type"),
    ],
};

pub const EVENT_TYPES: TableSpec = TableSpec {
    name: "event_types",
    columns: &[
        required("event_type_name"),
        required("attribute_name"),
        required("attribute_type"),
    ],
};

pub const OBJECTS: TableSpec = TableSpec {
    name: "objects",
    columns: &[required("object_id"), required("object_type")],
};

pub const OBJECT_ATTRIBUTES: TableSpec = TableSpec {
    name: "object_attributes",
    columns: &[
        required("object_id"),
        required("attribute_name"),
        required("attribute_value"),
        nullable("attribute_time"),
    ],
};

pub const OBJECT_RELATIONSHIPS: TableSpec = TableSpec {
    name: "object_relationships",
    columns: &[
        required("source_object_id"),
        required("target_object_id"),
        required("qualifier"),
    ],
};

pub const EVENTS: TableSpec = TableSpec {
    name: "events",
    columns: &[
        required("event_id"),
        required("event_type"),
        required("event_time"),
    ],
};

pub const EVENT_ATTRIBUTES: TableSpec = TableSpec {
    name: "event_attributes",
    columns: &[
        required("event_id"),
        required("attribute_name"),
        required("attribute_value"),
    ],
};

pub const EVENT_OBJECT_RELATIONSHIPS: TableSpec = TableSpec {
    name: "event_object_relationships",
    columns: &[
        required("event_id"),
        required("object_id"),
        required("qualifier"),
    ],
};

/// All output tables in processing order.
pub const TABLES: [TableSpec; 8] = [
    OBJECT_TYPES,
    EVENT_TYPES,
    OBJECTS,
    OBJECT_ATTRIBUTES,
    OBJECT_RELATIONSHIPS,
    EVENTS,
    EVENT_ATTRIBUTES,
    EVENT_OBJECT_RELATIONSHIPS,
];

// ── Row structs ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTypeRow {
    pub object_type_name: String,
    pub attribute_name: String,
    pub attribute_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeRow {
    pub event_type_name: String,
    pub attribute_name: String,
    pub attribute_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRow {
    pub object_id: String,
    pub object_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectAttributeRow {
    pub object_id: String,
    pub attribute_name: String,
    pub attribute_value: String,
    /// `None` when the source attribute carries no timestamp.
    pub attribute_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRelationshipRow {
    pub source_object_id: String,
    pub target_object_id: String,
    pub qualifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub event_id: String,
    pub event_type: String,
    pub event_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttributeRow {
    pub event_id: String,
    pub attribute_name: String,
    pub attribute_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventObjectRelationshipRow {
    pub event_id: String,
    pub object_id: String,
    pub qualifier: String,
}

/// The eight flattened row sets of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcelTables {
    pub object_types: Vec<ObjectTypeRow>,
    pub event_types: Vec<EventTypeRow>,
    pub objects: Vec<ObjectRow>,
    pub object_attributes: Vec<ObjectAttributeRow>,
    pub object_relationships: Vec<ObjectRelationshipRow>,
    pub events: Vec<EventRow>,
    pub event_attributes: Vec<EventAttributeRow>,
    pub event_object_relationships: Vec<EventObjectRelationshipRow>,
}

impl OcelTables {
    /// Flatten a parsed document into all eight tables.
    #[must_use]
    pub fn from_document(doc: &OcelDocument) -> Self {
        Self {
            object_types: object_type_rows(doc),
            event_types: event_type_rows(doc),
            objects: object_rows(doc),
            object_attributes: object_attribute_rows(doc),
            object_relationships: object_relationship_rows(doc),
            events: event_rows(doc),
            event_attributes: event_attribute_rows(doc),
            event_object_relationships: event_object_relationship_rows(doc),
        }
    }

    /// Row count per table, in processing order.
    #[must_use]
    pub fn row_counts(&self) -> [(&'static str, usize); 8] {
        [
            (OBJECT_TYPES.name, self.object_types.len()),
            (EVENT_TYPES.name, self.event_types.len()),
            (OBJECTS.name, self.objects.len()),
            (OBJECT_ATTRIBUTES.name, self.object_attributes.len()),
            (OBJECT_RELATIONSHIPS.name, self.object_relationships.len()),
            (EVENTS.name, self.events.len()),
            (EVENT_ATTRIBUTES.name, self.event_attributes.len()),
            (
                EVENT_OBJECT_RELATIONSHIPS.name,
                self.event_object_relationships.len(),
            ),
        ]
    }
}

/// Render an attribute value as text.
///
/// Strings are kept verbatim, everything else uses its compact JSON form
/// (`42`, `1.5`, `true`, `null`, `[1,2]`). Numbers keep the digits they had
/// in the document, however large. Booleans are the JSON `true`/`false`,
/// not the capitalised `True`/`False` some Python-based importers write.
/// Applying it to its own output returns the same text.
#[must_use]
pub fn stringify_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Per-table extraction ───────────────────────────────────────────────────

fn object_type_rows(doc: &OcelDocument) -> Vec<ObjectTypeRow> {
    doc.object_types
        .iter()
        .flat_map(|ty| {
            ty.attributes.iter().map(|attr| ObjectTypeRow {
                object_type_name: ty.name.clone(),
                attribute_name: attr.name.clone(),
                attribute_type: attr.attribute_type.clone(),
            })
        })
        .collect()
}

fn event_type_rows(doc: &OcelDocument) -> Vec<EventTypeRow> {
    doc.event_types
        .iter()
        .flat_map(|ty| {
            ty.attributes.iter().map(|attr| EventTypeRow {
                event_type_name: ty.name.clone(),
                attribute_name: attr.name.clone(),
                attribute_type: attr.attribute_type.clone(),
            })
        })
        .collect()
}

fn object_rows(doc: &OcelDocument) -> Vec<ObjectRow> {
    doc.objects
        .iter()
        .map(|obj| ObjectRow {
            object_id: obj.id.clone(),
            object_type: obj.object_type.clone(),
        })
        .collect()
}

fn object_attribute_rows(doc: &OcelDocument) -> Vec<ObjectAttributeRow> {
    doc.objects
        .iter()
        .flat_map(|obj| {
            obj.attributes.iter().map(|attr| ObjectAttributeRow {
                object_id: obj.id.clone(),
                attribute_name: attr.name.clone(),
                attribute_value: stringify_value(&attr.value),
                attribute_time: attr.time.clone(),
            })
        })
        .collect()
}

fn object_relationship_rows(doc: &OcelDocument) -> Vec<ObjectRelationshipRow> {
    doc.objects
        .iter()
        .flat_map(|obj| {
            obj.relationships.iter().map(|rel| ObjectRelationshipRow {
                source_object_id: obj.id.clone(),
                target_object_id: rel.object_id.clone(),
                qualifier: rel.qualifier.clone(),
            })
        })
        .collect()
}

fn event_rows(doc: &OcelDocument) -> Vec<EventRow> {
    doc.events
        .iter()
        .map(|event| EventRow {
            event_id: event.id.clone(),
            event_type: event.event_type.clone(),
            event_time: event.time.clone(),
        })
        .collect()
}

fn event_attribute_rows(doc: &OcelDocument) -> Vec<EventAttributeRow> {
    doc.events
        .iter()
        .flat_map(|event| {
            event.attributes.iter().map(|attr| EventAttributeRow {
                event_id: event.id.clone(),
                attribute_name: attr.name.clone(),
                attribute_value: stringify_value(&attr.value),
            })
        })
        .collect()
}

fn event_object_relationship_rows(doc: &OcelDocument) -> Vec<EventObjectRelationshipRow> {
    doc.events
        .iter()
        .flat_map(|event| {
            event
                .relationships
                .iter()
                .map(|rel| EventObjectRelationshipRow {
                    event_id: event.id.clone(),
                    object_id: rel.object_id.clone(),
                    qualifier: rel.qualifier.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    fn doc(value: Value) -> OcelDocument {
        OcelDocument::from_value(value).expect("valid document")
    }

    #[test]
    fn minimal_document_yields_one_object_and_one_event() {
        let tables = OcelTables::from_document(&doc(json!({
            "objectTypes": [],
            "eventTypes": [],
            "objects": [{"id": "o1", "type": "order"}],
            "events": [{"id": "e1", "type": "place", "time": "2024-01-01T00:00:00Z"}]
        })));

        assert_eq!(
            tables.objects,
            vec![ObjectRow {
                object_id: "o1".into(),
                object_type: "order".into(),
            }]
        );
        assert_eq!(
            tables.events,
            vec![EventRow {
                event_id: "e1".into(),
                event_type: "place".into(),
                event_time: "2024-01-01T00:00:00Z".into(),
            }]
        );
        assert!(tables.object_types.is_empty());
        assert!(tables.event_types.is_empty());
        assert!(tables.object_attributes.is_empty());
        assert!(tables.object_relationships.is_empty());
        assert!(tables.event_attributes.is_empty());
        assert!(tables.event_object_relationships.is_empty());
    }

    #[test]
    fn object_attribute_rows_sum_over_objects() {
        let tables = OcelTables::from_document(&doc(json!({
            "objectTypes": [],
            "eventTypes": [],
            "objects": [
                {"id": "o1", "type": "order", "attributes": [
                    {"name": "price", "time": "1970-01-01T00:00:00Z", "value": 10},
                    {"name": "price", "time": "2024-02-01T00:00:00Z", "value": 12.5}
                ]},
                {"id": "o2", "type": "item"},
                {"id": "o3", "type": "item", "attributes": [
                    {"name": "weight", "value": "3kg"}
                ]}
            ],
            "events": []
        })));

        assert_eq!(tables.object_attributes.len(), 3);
        let ids: HashSet<_> = tables.objects.iter().map(|o| &o.object_id).collect();
        assert!(
            tables
                .object_attributes
                .iter()
                .all(|row| ids.contains(&row.object_id))
        );
        assert_eq!(tables.object_attributes[1].attribute_value, "12.5");
        assert_eq!(tables.object_attributes[2].attribute_time, None);
    }

    #[test]
    fn type_attributes_carry_type_name() {
        let tables = OcelTables::from_document(&doc(json!({
            "objectTypes": [
                {"name": "order", "attributes": [
                    {"name": "price", "type": "float"},
                    {"name": "status", "type": "string"}
                ]},
                {"name": "item", "attributes": []}
            ],
            "eventTypes": [
                {"name": "place", "attributes": [{"name": "channel", "type": "string"}]}
            ],
            "objects": [],
            "events": []
        })));

        assert_eq!(tables.object_types.len(), 2);
        assert!(
            tables
                .object_types
                .iter()
                .all(|row| row.object_type_name == "order")
        );
        assert_eq!(
            tables.event_types,
            vec![EventTypeRow {
                event_type_name: "place".into(),
                attribute_name: "channel".into(),
                attribute_type: "string".into(),
            }]
        );
    }

    #[test]
    fn relationships_without_key_produce_no_rows() {
        let tables = OcelTables::from_document(&doc(json!({
            "objectTypes": [],
            "eventTypes": [],
            "objects": [{"id": "o1", "type": "order"}],
            "events": [{"id": "e1", "type": "place", "time": "t"}]
        })));
        assert!(tables.object_relationships.is_empty());
        assert!(tables.event_object_relationships.is_empty());
    }

    #[test]
    fn missing_qualifier_becomes_empty_string() {
        let tables = OcelTables::from_document(&doc(json!({
            "objectTypes": [],
            "eventTypes": [],
            "objects": [{"id": "o1", "type": "order", "relationships": [
                {"objectId": "o2"},
                {"objectId": "o3", "qualifier": "contains"}
            ]}],
            "events": [{"id": "e1", "type": "place", "time": "t", "relationships": [
                {"objectId": "o1"}
            ]}]
        })));

        assert_eq!(
            tables.object_relationships,
            vec![
                ObjectRelationshipRow {
                    source_object_id: "o1".into(),
                    target_object_id: "o2".into(),
                    qualifier: String::new(),
                },
                ObjectRelationshipRow {
                    source_object_id: "o1".into(),
                    target_object_id: "o3".into(),
                    qualifier: "contains".into(),
                },
            ]
        );
        assert_eq!(tables.event_object_relationships[0].qualifier, "");
    }

    #[test]
    fn event_attributes_are_stringified() {
        let tables = OcelTables::from_document(&doc(json!({
            "objectTypes": [],
            "eventTypes": [],
            "objects": [],
            "events": [{"id": "e1", "type": "pay", "time": "t", "attributes": [
                {"name": "amount", "value": 99},
                {"name": "express", "value": false},
                {"name": "note", "value": "gift"}
            ]}]
        })));

        let values: Vec<_> = tables
            .event_attributes
            .iter()
            .map(|row| row.attribute_value.as_str())
            .collect();
        assert_eq!(values, vec!["99", "false", "gift"]);
    }

    #[rstest]
    #[case(json!(42), "42")]
    #[case(json!(-1.25), "-1.25")]
    #[case(json!(true), "true")]
    #[case(json!("hello"), "hello")]
    #[case(json!(null), "null")]
    #[case(json!([1, "a"]), r#"[1,"a"]"#)]
    #[case(number("123456789012345678901234567890"), "123456789012345678901234567890")]
    #[case(number("-98765432109876543210"), "-98765432109876543210")]
    #[case(number("1.10"), "1.10")]
    fn stringify_is_idempotent(#[case] value: Value, #[case] expected: &str) {
        let once = stringify_value(&value);
        assert_eq!(once, expected);
        assert_eq!(stringify_value(&Value::String(once.clone())), once);
    }

    fn number(text: &str) -> Value {
        serde_json::from_str(text).expect("valid number")
    }

    #[test]
    fn integers_beyond_u64_keep_every_digit() {
        let tables = OcelTables::from_document(
            &OcelDocument::from_json_str(
                r#"{"objectTypes":[],"eventTypes":[],
                    "objects":[{"id":"o1","type":"account","attributes":[
                        {"name":"balance","value":123456789012345678901234567890}]}],
                    "events":[{"id":"e1","type":"audit","time":"2024-01-01T00:00:00Z",
                        "attributes":[{"name":"ratio","value":1.10}]}]}"#,
            )
            .unwrap(),
        );

        assert_eq!(
            tables.object_attributes[0].attribute_value,
            "123456789012345678901234567890"
        );
        assert_eq!(tables.event_attributes[0].attribute_value, "1.10");
    }

    #[test]
    fn row_counts_follow_processing_order() {
        let tables = OcelTables::default();
        let names: Vec<_> = tables.row_counts().iter().map(|(name, _)| *name).collect();
        let expected: Vec<_> = TABLES.iter().map(|t| t.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn column_list_joins_names() {
        assert_eq!(OBJECTS.column_list(), "object_id, object_type");
        assert!(OBJECT_ATTRIBUTES.columns[3].nullable);
    }
}
