#![deny(missing_docs)]

//! # Reference Tables
//!
//! Markdown renderings of the grouped endpoint list and the model reference.

use crate::grouping::{endpoint_common_prefix, group_key};
use crate::ir::{Endpoint, Model, Parameter};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Placeholder for empty cells.
const EMPTY_CELL: &str = "-";

/// One row of the endpoint table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRow {
    /// Grouping key.
    pub group: String,
    /// Upper-case HTTP method.
    pub method: String,
    /// Route path.
    pub path: String,
    /// `name (in, required)` list.
    pub params: String,
    /// Summary, or description when there is no summary.
    pub description: String,
}

/// Builds the endpoint rows sorted by (group, path, method).
pub fn endpoint_rows(endpoints: &[Endpoint], default_group: &str) -> Vec<EndpointRow> {
    let prefix = endpoint_common_prefix(endpoints);
    let mut rows: Vec<EndpointRow> = endpoints
        .iter()
        .map(|endpoint| EndpointRow {
            group: group_key(endpoint, &prefix, default_group),
            method: endpoint.method.to_ascii_uppercase(),
            path: endpoint.path.clone(),
            params: param_summary(&endpoint.parameters),
            description: if endpoint.summary.is_empty() {
                endpoint.description.clone()
            } else {
                endpoint.summary.clone()
            },
        })
        .collect();
    rows.sort_by(|a, b| {
        (&a.group, &a.path, &a.method).cmp(&(&b.group, &b.path, &b.method))
    });
    rows
}

/// Renders `id (path, required), q (query)`.
pub fn param_summary(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|p| {
            if p.required {
                format!("{} ({}, required)", p.name, p.location)
            } else {
                format!("{} ({})", p.name, p.location)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the endpoint table.
pub fn render_endpoint_table(rows: &[EndpointRow]) -> String {
    let mut out = String::new();
    out.push_str("| Group | Method | Path | Params | Description |\n");
    out.push_str("|-------|--------|------|--------|-------------|\n");
    for row in rows {
        let _ = writeln!(
            out,
            "| {} | {} | `{}` | {} | {} |",
            cell(&row.group),
            cell(&row.method),
            or_empty(&row.path),
            cell(&row.params),
            cell(&row.description),
        );
    }
    out
}

/// Renders one section per model, sorted by name.
///
/// Duplicate names keep the last model, as the schema map does.
pub fn render_model_reference(models: &[Model]) -> String {
    let by_name: BTreeMap<&str, &Model> = models.iter().map(|m| (m.name.as_str(), m)).collect();

    let mut out = String::new();
    for model in by_name.values() {
        let _ = writeln!(out, "### {}\n", or_empty(&model.name));
        let _ = writeln!(out, "_Description_: {}\n", cell(&model.description));

        if model.is_enumeration() {
            out.push_str("| Value | Description |\n");
            out.push_str("|-------|-------------|\n");
            for field in &model.fields {
                let _ = writeln!(out, "| {} | {} |", cell(&field.name), cell(&field.description));
            }
        } else {
            out.push_str("| Field | Type | Required | Description |\n");
            out.push_str("|-------|------|----------|-------------|\n");
            if model.fields.is_empty() {
                out.push_str("| - | - | - | - |\n");
            }
            for field in &model.fields {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    cell(&field.name),
                    cell(&field.type_ref.to_string()),
                    if field.required { "yes" } else { "no" },
                    cell(&field.description),
                );
            }
        }
        out.push('\n');
    }
    out
}

fn or_empty(s: &str) -> &str {
    if s.is_empty() {
        EMPTY_CELL
    } else {
        s
    }
}

/// Table-safe cell text: pipes escaped, newlines flattened.
fn cell(s: &str) -> String {
    or_empty(s.trim()).replace('|', "\\|").replace('\n', " ")
}
