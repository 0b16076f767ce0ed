#![deny(missing_docs)]

//! # Schema Synthesis
//!
//! Produces one component schema per IR model, choosing between the
//! enumeration and object representations and layering model/field metadata
//! on top of the resolved types.

use crate::ir::{Field, Model};
use crate::oas::schema::{is_reserved_keyword, SchemaFragment};
use crate::type_mapping::TypeMapper;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Validation keywords copied onto properties unless configured otherwise.
pub const DEFAULT_VALIDATION_KEYS: [&str; 6] = [
    "minLength",
    "maxLength",
    "pattern",
    "minimum",
    "maximum",
    "format",
];

/// Builds the `components.schemas` map.
///
/// Duplicate model names resolve last-write-wins. The returned map iterates
/// in name order.
///
/// # Arguments
///
/// * `models` - Models in discovery order.
/// * `mapper` - Type resolver aware of every model name.
/// * `validation_keys` - Allow-list of validation keywords to keep.
pub fn synthesize_schemas(
    models: &[Model],
    mapper: &impl TypeMapper,
    validation_keys: &BTreeSet<String>,
) -> BTreeMap<String, SchemaFragment> {
    let mut schemas = BTreeMap::new();
    for model in models {
        let schema = synthesize_model(model, mapper, validation_keys);
        if schemas.insert(model.name.clone(), schema).is_some() {
            debug!(model = %model.name, "Duplicate model name, keeping the last definition");
        }
    }
    schemas
}

/// Builds the schema of a single model.
pub fn synthesize_model(
    model: &Model,
    mapper: &impl TypeMapper,
    validation_keys: &BTreeSet<String>,
) -> SchemaFragment {
    let mut schema = if model.is_enumeration() {
        SchemaFragment::enumeration(model.fields.iter().map(|f| f.name.clone()).collect())
    } else {
        let mut properties = IndexMap::with_capacity(model.fields.len());
        let mut required = Vec::new();
        for field in &model.fields {
            properties.insert(
                field.name.clone(),
                synthesize_property(field, mapper, validation_keys),
            );
            if field.required {
                required.push(field.name.clone());
            }
        }
        SchemaFragment {
            properties,
            required,
            ..SchemaFragment::object()
        }
    };

    apply_model_metadata(&mut schema, model);
    schema
}

/// Resolves a field's type and overlays its metadata.
fn synthesize_property(
    field: &Field,
    mapper: &impl TypeMapper,
    validation_keys: &BTreeSet<String>,
) -> SchemaFragment {
    let mut property = mapper.resolve(&field.type_ref);

    if !field.description.is_empty() {
        property.description = Some(field.description.clone());
    }
    if !field.example.is_empty() {
        property.example = Some(field.example.clone());
    }
    if field.deprecated {
        property.deprecated = true;
    }
    if !field.deprecation_notes.is_empty() {
        property.insert_extension(
            "deprecation-notes",
            Value::String(field.deprecation_notes.clone()),
        );
    }

    for (key, value) in &field.validation_rules {
        if !validation_keys.contains(key) {
            trace!(field = %field.name, key = %key, "Dropping unrecognized validation rule");
            continue;
        }
        if is_reserved_keyword(key) {
            debug!(field = %field.name, key = %key, "Validation rule shadows a schema keyword, dropping");
            continue;
        }
        if key == "format" {
            // `format` is a first-class keyword, not a flattened constraint.
            match value {
                Value::String(format) => property.format = Some(format.clone()),
                other => property.format = Some(other.to_string()),
            }
        } else {
            property.constraints.insert(key.clone(), value.clone());
        }
    }

    property
}

/// Attaches description, example, deprecation and inheritance metadata.
fn apply_model_metadata(schema: &mut SchemaFragment, model: &Model) {
    if !model.description.is_empty() {
        schema.description = Some(model.description.clone());
    }
    if !model.example.is_empty() {
        schema.example = Some(model.example.clone());
    }
    if model.deprecated {
        schema.deprecated = true;
    }
    if !model.deprecation_notes.is_empty() {
        schema.insert_extension(
            "deprecation-notes",
            Value::String(model.deprecation_notes.clone()),
        );
    }
    if !model.since.is_empty() {
        schema.insert_extension("since", Value::String(model.since.clone()));
    }
    if model.is_interface {
        schema.insert_extension("interface", Value::Bool(true));
    }
    if !model.extends.is_empty() {
        schema.insert_extension("extends", string_list(&model.extends));
    }
    if !model.implements.is_empty() {
        schema.insert_extension("implements", string_list(&model.implements));
    }
    for (key, value) in &model.extensions {
        schema.insert_extension(key, value.clone());
    }
}

fn string_list(names: &BTreeSet<String>) -> Value {
    Value::Array(names.iter().cloned().map(Value::String).collect())
}
