#![deny(missing_docs)]

//! # Artifacts
//!
//! Runs every generator over one IR. The document is compiled independently
//! of the grouped views; both read the same IR.

use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::grouping::{group_endpoints, DependencyGraph};
use crate::ir::Ir;
use crate::oas::{build_document, ApiDocument};
use crate::render::{
    endpoint_rows, render_dependency_diagram, render_endpoint_map, render_endpoint_table,
    render_model_reference,
};

/// Everything derived from one IR.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    /// The OpenAPI document, not yet encoded.
    pub document: ApiDocument,
    /// Markdown endpoint table.
    pub endpoint_table: String,
    /// Markdown model reference.
    pub model_reference: String,
    /// Mermaid endpoint map.
    pub endpoint_map: String,
    /// Mermaid dependency diagram.
    pub dependency_diagram: String,
}

/// Generates every artifact.
///
/// # Errors
///
/// Fails only when `config` is invalid.
pub fn generate_artifacts(ir: &Ir, config: &GeneratorConfig) -> AppResult<Artifacts> {
    config.validate()?;

    let document = build_document(ir, config);

    let rows = endpoint_rows(&ir.endpoints, &config.default_group);
    let groups = group_endpoints(&ir.endpoints, &config.default_group);
    let graph = DependencyGraph::from_endpoints(&ir.endpoints);

    Ok(Artifacts {
        document,
        endpoint_table: render_endpoint_table(&rows),
        model_reference: render_model_reference(&ir.models),
        endpoint_map: render_endpoint_map(&groups),
        dependency_diagram: render_dependency_diagram(
            &graph,
            &config.classifier(),
            config.core_service_threshold,
        ),
    })
}
