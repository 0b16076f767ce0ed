#![deny(missing_docs)]

//! # Operation Models
//!
//! Serializable path-level structures of the generated document.

use crate::ir::ParamLocation;
use crate::oas::schema::SchemaFragment;
use serde::Serialize;
use std::collections::BTreeMap;

/// Media type used for every body and response.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Status key of the single documented response.
pub const SUCCESS_STATUS: &str = "200";

/// Description of the single documented response.
pub const SUCCESS_DESCRIPTION: &str = "Successful Response";

/// Operations of one path, keyed by lower-case method.
pub type PathItem = BTreeMap<String, Operation>;

/// All path items, keyed by path.
pub type Paths = BTreeMap<String, PathItem>;

/// A single (path, method) operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Tags, copied verbatim.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterObject>,
    /// Request body, never present on `GET`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    pub responses: BTreeMap<String, Response>,
    /// Deprecation flag, omitted when false.
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterObject {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Whether it is mandatory.
    pub required: bool,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scalar or reference schema.
    pub schema: SchemaFragment,
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    /// Always true for generated bodies.
    pub required: bool,
    /// Content keyed by media type.
    pub content: BTreeMap<String, MediaType>,
}

/// A response entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Response description.
    pub description: String,
    /// Content keyed by media type; omitted for void responses.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

/// A media type entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    /// Body schema.
    pub schema: SchemaFragment,
}

impl MediaType {
    /// Wraps `schema` into a single `application/json` content map.
    pub fn json_content(schema: SchemaFragment) -> BTreeMap<String, MediaType> {
        BTreeMap::from([(JSON_MEDIA_TYPE.to_string(), MediaType { schema })])
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
