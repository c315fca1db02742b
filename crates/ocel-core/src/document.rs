//! OCEL 2.0 JSON object model.
//!
//! Only the keys the flattener reads are modelled; anything else in the
//! document is ignored. Nested `attributes` and `relationships` arrays are
//! optional and default to empty. Every other key is required, so a document
//! missing one fails to parse with [`CoreError::Schema`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A complete OCEL 2.0 document held in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcelDocument {
    pub object_types: Vec<ObjectType>,
    pub event_types: Vec<EventType>,
    pub objects: Vec<Object>,
    pub events: Vec<Event>,
}

/// Declared attribute of an object or event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
}

/// Time-stamped attribute value of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAttributeValue {
    pub name: String,
    #[serde(default)]
    pub time: Option<String>,
    pub value: serde_json::Value,
}

/// Attribute value of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAttributeValue {
    pub name: String,
    pub value: serde_json::Value,
}

/// Qualified link to an object, used by both objects and events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub object_id: String,
    #[serde(default)]
    pub qualifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub attributes: Vec<ObjectAttributeValue>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub time: String,
    #[serde(default)]
    pub attributes: Vec<EventAttributeValue>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl OcelDocument {
    /// Read and parse a document from disk. The whole file is loaded into memory.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the file cannot be opened, and
    /// [`CoreError::Schema`] if it is not a well-formed OCEL 2.0 document.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let file = File::open(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = serde_json::from_reader(BufReader::new(file))?;
        Ok(document)
    }

    /// Parse a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Schema`] on malformed JSON or a missing required key.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Schema`] on a missing required key.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }
}
