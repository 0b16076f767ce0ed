#![deny(missing_docs)]

//! # Document Assembly
//!
//! Merges the synthesized component schemas and the compiled operations into
//! one serializable OpenAPI document.
//!
//! Every map in the document is ordered, so the same IR and configuration
//! always encode to the same bytes.

use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::ir::Ir;
use crate::oas::models::Paths;
use crate::oas::resolver::SchemaResolver;
use crate::oas::routes::compile_operations;
use crate::oas::schema::SchemaFragment;
use crate::oas::schemas::synthesize_schemas;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// OpenAPI version marker of generated documents.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// The generated OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiDocument {
    /// Version marker.
    pub openapi: String,
    /// `info` block.
    pub info: BTreeMap<String, String>,
    /// `servers` block.
    pub servers: Vec<BTreeMap<String, String>>,
    /// Compiled operations.
    pub paths: Paths,
    /// Reusable components.
    pub components: Components,
}

/// The `components` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Components {
    /// One schema per model, keyed by model name.
    pub schemas: BTreeMap<String, SchemaFragment>,
}

impl ApiDocument {
    /// Encodes the document as YAML.
    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Encodes the document as pretty-printed JSON.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compiles an IR into a OpenAPI document.
///
/// # Arguments
///
/// * `ir` - The parsed API description.
/// * `config` - Document metadata and lookup tables.
pub fn build_document(ir: &Ir, config: &GeneratorConfig) -> ApiDocument {
    let resolver = SchemaResolver::for_models(config.vocabulary(), &ir.models);
    let schemas = synthesize_schemas(&ir.models, &resolver, &config.validation_keys);
    let paths = compile_operations(&ir.endpoints, &resolver);
    debug!(
        schemas = schemas.len(),
        paths = paths.len(),
        "Assembled OpenAPI document"
    );

    ApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: config.info.clone(),
        servers: config.servers.clone(),
        paths,
        components: Components { schemas },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Endpoint, Field, Model, TypeRef};

    fn sample_ir() -> Ir {
        Ir {
            models: vec![
                Model {
                    name: "User".into(),
                    fields: vec![Field {
                        name: "id".into(),
                        type_ref: TypeRef::named("Long"),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Model {
                    name: "Address".into(),
                    ..Default::default()
                },
            ],
            endpoints: vec![
                Endpoint {
                    path: "/users".into(),
                    method: "POST".into(),
                    request_body_type: Some(TypeRef::named("User")),
                    response_type: TypeRef::named("User"),
                    ..Default::default()
                },
                Endpoint {
                    path: "/addresses".into(),
                    method: "GET".into(),
                    response_type: TypeRef::generic("List", vec![TypeRef::named("Address")]),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_document_shape() {
        let doc = build_document(&sample_ir(), &GeneratorConfig::default());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["openapi"], "3.0.0");
        assert_eq!(value["info"]["title"], "API");
        assert_eq!(value["servers"][0]["url"], "https://api.example.com");
        assert!(value["paths"]["/users"]["post"]["requestBody"].is_object());
        assert!(value["components"]["schemas"]["Address"].is_object());
    }

    #[test]
    fn test_yaml_is_deterministic() {
        let ir = sample_ir();
        let config = GeneratorConfig::default();
        let first = build_document(&ir, &config).to_yaml().unwrap();
        for _ in 0..5 {
            assert_eq!(build_document(&ir, &config).to_yaml().unwrap(), first);
        }
        // Ordered output: paths and schemas sorted by key
        let addresses = first.find("/addresses:").unwrap();
        let users = first.find("/users:").unwrap();
        assert!(addresses < users);
        assert!(first.find("    Address:").unwrap() < first.find("    User:").unwrap());
    }

    #[test]
    fn test_no_dangling_references() {
        let mut ir = sample_ir();
        ir.endpoints.push(Endpoint {
            path: "/orphans".into(),
            method: "GET".into(),
            response_type: TypeRef::generic("Wrapper", vec![TypeRef::named("Ghost")]),
            ..Default::default()
        });
        let doc = build_document(&ir, &GeneratorConfig::default());
        let json = doc.to_json().unwrap();
        for name in ["Wrapper", "Ghost"] {
            assert!(!json.contains(&format!("#/components/schemas/{}", name)));
        }
    }
}
