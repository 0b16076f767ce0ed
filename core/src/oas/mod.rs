#![deny(missing_docs)]

//! # OpenAPI Generation Module
//!
//! - **schema**: The serializable schema fragment.
//! - **resolver**: IR type references to schema fragments.
//! - **schemas**: Component schema synthesis from models.
//! - **models**: Operation-level document structures.
//! - **routes**: Operation compilation from endpoints.
//! - **document**: Assembly of the final document.

pub mod document;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod schema;
pub mod schemas;

pub use document::{build_document, ApiDocument, Components, OPENAPI_VERSION};
pub use models::{MediaType, Operation, ParameterObject, Paths, RequestBody, Response};
pub use resolver::SchemaResolver;
pub use routes::compile_operations;
pub use schema::{JsonType, SchemaFragment};
pub use schemas::synthesize_schemas;
