#![deny(missing_docs)]

//! # Autodoc Core
//!
//! Compiles a parsed, language-agnostic description of a web API (the IR)
//! into an OpenAPI document, Markdown reference tables and Mermaid diagrams.
//!
//! Everything here is a pure function of the IR and the configuration:
//! no process spawning, no output files.
//!
//! ```
//! use autodoc_core::{build_document, GeneratorConfig, Ir};
//!
//! let ir = Ir::from_json(r#"{"models":[{"name":"Role","isEnum":true,"fields":[{"name":"ADMIN"}]}]}"#)?;
//! let doc = build_document(&ir, &GeneratorConfig::default());
//! assert!(doc.to_yaml()?.contains("- ADMIN"));
//! # Ok::<(), autodoc_core::AppError>(())
//! ```

/// Shared error types.
pub mod error;

/// The intermediate representation and its decoder.
pub mod ir;

/// Generator configuration and lookup tables.
pub mod config;

/// Type vocabulary and classification.
pub mod type_mapping;

/// OpenAPI document generation.
pub mod oas;

/// Common-prefix grouping and dependency aggregation.
pub mod grouping;

/// Markdown and Mermaid renderers.
pub mod render;

/// One-call generation of every artifact.
pub mod artifacts;

pub use artifacts::{generate_artifacts, Artifacts};
pub use config::GeneratorConfig;
pub use error::{AppError, AppResult};
pub use grouping::{
    common_prefix, group_endpoints, group_key, DependencyGraph, ServiceCategory,
    ServiceClassifier, ServiceRule,
};
pub use ir::{Dependency, Endpoint, Field, Ir, Model, ParamLocation, Parameter, TypeRef};
pub use oas::{build_document, ApiDocument, SchemaFragment, SchemaResolver};
pub use type_mapping::{Primitive, TypeMapper, TypeShape, TypeVocabulary};
