#![deny(missing_docs)]

//! # Data Models
//!
//! Definition of the Intermediate Representation (IR) structures produced by
//! the external source parser. Everything here is read-only once decoded.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};

/// A possibly generic type reference, e.g. `List<User>` or `ApiResponse<Page<Item>>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TypeRef {
    /// Primitive, container or model name. Empty for enum constants.
    pub base: String,
    /// Type parameters, empty for non-generic types.
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    /// A non-generic type reference.
    pub fn named(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            args: Vec::new(),
        }
    }

    /// A generic type reference with the given arguments.
    pub fn generic(base: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            base: base.into(),
            args,
        }
    }

    /// Whether the reference carries no type at all (void responses, enum constants).
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Represents a field of a model (or a constant of an enum model).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    /// The name of the field.
    pub name: String,
    /// Whether the field must be present.
    pub required: bool,
    /// Extracted doc comments.
    pub description: String,
    /// The declared type.
    pub type_ref: TypeRef,
    /// Validation constraints keyed by constraint name (`minLength`, `pattern`, ...).
    pub validation_rules: BTreeMap<String, Value>,
    /// Example value, verbatim.
    pub example: String,
    /// Whether the field is marked as deprecated.
    pub deprecated: bool,
    /// Free-text deprecation notes.
    pub deprecation_notes: String,
}

/// Represents a data model (class, record, interface or enum).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Model {
    /// The model name, used as the schema key.
    pub name: String,
    /// Model-level description.
    pub description: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Explicit enum flag.
    pub is_enum: bool,
    /// Whether the model is an interface.
    pub is_interface: bool,
    /// Supertypes.
    #[serde(rename = "extendsList", alias = "extends")]
    pub extends: BTreeSet<String>,
    /// Implemented interfaces.
    #[serde(rename = "implementsList", alias = "implements")]
    pub implements: BTreeSet<String>,
    /// Example value, verbatim.
    pub example: String,
    /// Whether the model is marked as deprecated.
    pub deprecated: bool,
    /// Free-text deprecation notes.
    pub deprecation_notes: String,
    /// Version the model was introduced in.
    pub since: String,
    /// Vendor metadata (`isEntity`, `tableName`, ...).
    pub extensions: BTreeMap<String, Value>,
}

impl Model {
    /// Whether this model renders as an enumeration.
    ///
    /// True when flagged explicitly, or when the model has fields and none of
    /// them carries a type. In the second case the field names are the enum values.
    pub fn is_enumeration(&self) -> bool {
        self.is_enum
            || (!self.fields.is_empty() && self.fields.iter().all(|f| f.type_ref.is_empty()))
    }
}

/// Where an operation parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Templated path segment.
    Path,
    /// Query string.
    #[default]
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
        };
        write!(f, "{}", s)
    }
}

/// Represents a single endpoint parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Whether the parameter is mandatory.
    pub required: bool,
    /// Parameter description.
    pub description: String,
    /// Declared type.
    #[serde(rename = "type", alias = "typeRef")]
    pub type_ref: TypeRef,
}

/// A collaborator injected into a controller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dependency {
    /// Field or parameter name of the injected collaborator.
    pub name: String,
    /// Type name of the collaborator; the identity used for deduplication.
    #[serde(rename = "type")]
    pub type_name: String,
    /// How it is injected (`field`, `constructor`, ...).
    pub injection_type: String,
}

/// Represents one (path, method) handler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoint {
    /// Full route path, e.g. `/api/v1/users/{id}`.
    pub path: String,
    /// HTTP method in any case.
    pub method: String,
    /// Short summary.
    pub summary: String,
    /// Long description.
    pub description: String,
    /// Declared tags, first one wins for grouping.
    pub tags: Vec<String>,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Request body type, if any.
    pub request_body_type: Option<TypeRef>,
    /// Response type; empty base for void handlers.
    pub response_type: TypeRef,
    /// Whether the endpoint is marked as deprecated.
    pub deprecated: bool,
    /// Simple name of the declaring controller.
    pub controller_name: String,
    /// Package of the declaring controller.
    pub controller_package: String,
    /// Collaborators injected into the declaring controller.
    pub dependencies: Vec<Dependency>,
}

/// The root aggregate handed over by the source parser.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Ir {
    /// All models, in discovery order.
    pub models: Vec<Model>,
    /// All endpoints, in discovery order.
    pub endpoints: Vec<Endpoint>,
}

impl Ir {
    /// Names of every model in the IR.
    pub fn model_names(&self) -> BTreeSet<String> {
        self.models.iter().map(|m| m.name.clone()).collect()
    }
}
