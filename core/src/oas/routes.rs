#![deny(missing_docs)]

//! # Operation Compiler
//!
//! Transforms IR endpoints into path items. Endpoints sharing a path merge
//! into one entry; method keys are lower-cased.
//!
//! Response schemas follow three branches:
//! - a direct container inlines as an array,
//! - a generic wrapper (`ApiResponse<User>`) becomes an `allOf` of the wrapper
//!   reference and an overlay replacing its `data` property,
//! - anything else resolves normally.

use crate::ir::{Endpoint, Parameter, TypeRef};
use crate::oas::models::{
    MediaType, Operation, ParameterObject, Paths, RequestBody, Response, SUCCESS_DESCRIPTION,
    SUCCESS_STATUS,
};
use crate::oas::schema::SchemaFragment;
use crate::type_mapping::TypeMapper;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use tracing::debug;

/// Property of an envelope type that carries the payload.
pub const ENVELOPE_PAYLOAD_PROPERTY: &str = "data";

/// Compiles every endpoint into the `paths` map.
///
/// A repeated (path, method) pair keeps the last endpoint.
///
/// # Arguments
///
/// * `endpoints` - Endpoints in discovery order.
/// * `mapper` - Type resolver aware of every model name.
pub fn compile_operations(endpoints: &[Endpoint], mapper: &impl TypeMapper) -> Paths {
    let mut paths = Paths::new();
    for endpoint in endpoints {
        let method = endpoint.method.to_ascii_lowercase();
        let operation = build_operation(endpoint, mapper);
        let item = paths.entry(endpoint.path.clone()).or_default();
        if item.insert(method.clone(), operation).is_some() {
            debug!(
                path = %endpoint.path,
                method = %method,
                "Duplicate operation, keeping the last definition"
            );
        }
    }
    paths
}

/// Builds a single operation.
pub fn build_operation(endpoint: &Endpoint, mapper: &impl TypeMapper) -> Operation {
    let request_body = endpoint
        .request_body_type
        .as_ref()
        .filter(|ty| !ty.is_empty() && !endpoint.method.eq_ignore_ascii_case("GET"))
        .map(|ty| build_request_body(ty, mapper));

    Operation {
        tags: endpoint.tags.clone(),
        summary: non_empty(&endpoint.summary),
        description: non_empty(&endpoint.description),
        parameters: endpoint
            .parameters
            .iter()
            .map(|p| build_parameter(p, mapper))
            .collect(),
        request_body,
        responses: build_responses(&endpoint.response_type, mapper),
        deprecated: endpoint.deprecated,
    }
}

fn build_parameter(param: &Parameter, mapper: &impl TypeMapper) -> ParameterObject {
    ParameterObject {
        name: param.name.clone(),
        location: param.location,
        required: param.required,
        description: non_empty(&param.description),
        schema: mapper.resolve_scalar(&param.type_ref),
    }
}

/// Request bodies reference the request model by name. Types without a
/// schema slot resolve normally instead of producing a dangling reference.
fn build_request_body(ty: &TypeRef, mapper: &impl TypeMapper) -> RequestBody {
    let schema = if mapper.is_model(&ty.base) {
        SchemaFragment::reference(&ty.base)
    } else {
        debug!(ty = %ty, "Request body is not a model, resolving inline");
        mapper.resolve(ty)
    };
    RequestBody {
        required: true,
        content: MediaType::json_content(schema),
    }
}

fn build_responses(ty: &TypeRef, mapper: &impl TypeMapper) -> BTreeMap<String, Response> {
    let content = match response_schema(ty, mapper) {
        Some(schema) => MediaType::json_content(schema),
        None => BTreeMap::new(),
    };
    BTreeMap::from([(
        SUCCESS_STATUS.to_string(),
        Response {
            description: SUCCESS_DESCRIPTION.to_string(),
            content,
        },
    )])
}

/// Picks the response schema; `None` for void handlers.
pub fn response_schema(ty: &TypeRef, mapper: &impl TypeMapper) -> Option<SchemaFragment> {
    if ty.is_empty() {
        return None;
    }
    if mapper.is_container(&ty.base) {
        return Some(mapper.resolve(ty));
    }
    match ty.args.first() {
        Some(payload) => Some(envelope_schema(ty, payload, mapper)),
        None => Some(mapper.resolve(ty)),
    }
}

fn envelope_schema(wrapper: &TypeRef, payload: &TypeRef, mapper: &impl TypeMapper) -> SchemaFragment {
    let mut properties = IndexMap::new();
    properties.insert(ENVELOPE_PAYLOAD_PROPERTY.to_string(), mapper.resolve(payload));

    if mapper.is_model(&wrapper.base) {
        SchemaFragment::all_of(vec![
            SchemaFragment::reference(&wrapper.base),
            SchemaFragment::overlay(properties),
        ])
    } else {
        debug!(wrapper = %wrapper, "Envelope type is not a model, emitting payload object only");
        SchemaFragment {
            properties,
            ..SchemaFragment::object()
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
