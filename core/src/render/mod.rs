#![deny(missing_docs)]

//! # Renderers
//!
//! Text encodings of the grouped views:
//! - **tables**: Markdown endpoint table and model reference.
//! - **diagrams**: Mermaid endpoint map and dependency diagram.

pub mod diagrams;
pub mod tables;

pub use diagrams::{render_dependency_diagram, render_endpoint_map, sanitize_id};
pub use tables::{
    endpoint_rows, param_summary, render_endpoint_table, render_model_reference, EndpointRow,
};
