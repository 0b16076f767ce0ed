#![deny(missing_docs)]

//! # Schema Fragments
//!
//! The serializable schema node embedded in the generated document.
//! Field order here is the key order of the emitted YAML/JSON.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Location prefix of component schemas.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Represents the simplified JSON types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// A string type.
    String,
    /// An integer type.
    Integer,
    /// A floating point number.
    Number,
    /// A boolean type.
    Boolean,
    /// An array.
    Array,
    /// An object.
    Object,
}

/// A resolved schema node, either self-contained or a reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SchemaFragment {
    /// `$ref` target.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<JsonType>,
    /// `format`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Allowed values for enumerations.
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Array item schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaFragment>>,
    /// Object properties in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaFragment>,
    /// Required property names, omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Composition members.
    #[serde(rename = "allOf", skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaFragment>,
    /// Human readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Deprecation flag, omitted when false.
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Validation keywords (`minLength`, `pattern`, ...).
    #[serde(flatten)]
    pub constraints: BTreeMap<String, Value>,
    /// `x-` vendor extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Keys emitted from typed fields of [`SchemaFragment`]; a flattened
/// constraint under one of these names would duplicate the key.
pub const RESERVED_SCHEMA_KEYS: [&str; 10] = [
    "$ref",
    "type",
    "enum",
    "items",
    "properties",
    "required",
    "allOf",
    "description",
    "example",
    "deprecated",
];

/// Whether `key` cannot be used as a flattened validation constraint.
///
/// `x-` keys are reserved for extensions.
pub fn is_reserved_keyword(key: &str) -> bool {
    key.starts_with("x-") || RESERVED_SCHEMA_KEYS.contains(&key)
}

impl SchemaFragment {
    /// A typed scalar with an optional format.
    pub fn primitive(schema_type: JsonType, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(schema_type),
            format: format.map(str::to_string),
            ..Default::default()
        }
    }

    /// The safe default for anything that cannot be resolved.
    pub fn string() -> Self {
        Self::primitive(JsonType::String, None)
    }

    /// An array of `items`.
    pub fn array(items: SchemaFragment) -> Self {
        Self {
            schema_type: Some(JsonType::Array),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    /// A reference to the component schema `name`.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", SCHEMA_REF_PREFIX, name)),
            ..Default::default()
        }
    }

    /// A string enumeration with the given values, order preserved.
    pub fn enumeration(values: Vec<String>) -> Self {
        Self {
            schema_type: Some(JsonType::String),
            enum_values: values,
            ..Default::default()
        }
    }

    /// An empty object schema.
    pub fn object() -> Self {
        Self {
            schema_type: Some(JsonType::Object),
            ..Default::default()
        }
    }

    /// An untyped fragment carrying only `properties`, used as an `allOf` overlay.
    pub fn overlay(properties: IndexMap<String, SchemaFragment>) -> Self {
        Self {
            properties,
            ..Default::default()
        }
    }

    /// An `allOf` composition.
    pub fn all_of(members: Vec<SchemaFragment>) -> Self {
        Self {
            all_of: members,
            ..Default::default()
        }
    }

    /// The referenced component name, if this is a reference.
    pub fn referenced_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix(SCHEMA_REF_PREFIX))
    }

    /// Adds an `x-` extension, prefixing the key when needed.
    pub fn insert_extension(&mut self, key: &str, value: Value) {
        let key = if key.starts_with("x-") {
            key.to_string()
        } else {
            format!("x-{}", key)
        };
        self.extensions.insert(key, value);
    }
}
