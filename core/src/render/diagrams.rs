#![deny(missing_docs)]

//! # Diagrams
//!
//! Mermaid flowcharts: the endpoint map (one subgraph per group) and the
//! controller/service dependency diagram.

use crate::grouping::{DependencyGraph, ServiceClassifier};
use crate::ir::Endpoint;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::sync::OnceLock;

static NON_IDENT_RE: OnceLock<Regex> = OnceLock::new();

/// Converts arbitrary text into a Mermaid-safe identifier.
///
/// Runs of characters outside `[A-Za-z0-9]` collapse into one underscore.
pub fn sanitize_id(s: &str) -> String {
    let re = NON_IDENT_RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("Invalid regex"));
    re.replace_all(s, "_").trim_matches('_').to_string()
}

/// Escapes text placed inside a quoted node label.
fn label(s: &str) -> String {
    s.replace('"', "#quot;")
}

/// Hands out Mermaid node ids. Inputs that sanitize to an id already taken
/// get `_2`, `_3`, ... appended, so distinct nodes never merge.
#[derive(Debug, Default)]
struct NodeIds {
    used: BTreeSet<String>,
}

impl NodeIds {
    fn allocate(&mut self, prefix: &str, raw: &str) -> String {
        let mut base = format!("{}{}", prefix, sanitize_id(raw));
        if base.is_empty() {
            base.push_str("node");
        }
        let mut id = base.clone();
        let mut n = 1;
        while !self.used.insert(id.clone()) {
            n += 1;
            id = format!("{}_{}", base, n);
        }
        id
    }
}

/// Renders the endpoint map from grouped endpoints.
pub fn render_endpoint_map(groups: &BTreeMap<String, Vec<&Endpoint>>) -> String {
    let mut ids = NodeIds::default();
    let mut out = String::from("flowchart TB\n");
    for (name, endpoints) in groups {
        let group_id = ids.allocate("group_", name);
        let _ = writeln!(out, "  subgraph {}[\"{}\"]", group_id, label(name));
        out.push_str("    direction TB\n");
        for endpoint in endpoints {
            let method = endpoint.method.to_ascii_uppercase();
            let mut text = format!("{} {}", method, endpoint.path);
            if !endpoint.parameters.is_empty() {
                let params: Vec<String> = endpoint
                    .parameters
                    .iter()
                    .map(|p| {
                        if p.required {
                            format!("{}:{} (req)", p.name, p.location)
                        } else {
                            format!("{}:{}", p.name, p.location)
                        }
                    })
                    .collect();
                text.push_str("<br/>Params: ");
                text.push_str(&params.join(", "));
            }
            let id = ids.allocate("", &format!("{}_{}", method, endpoint.path));
            let _ = writeln!(out, "    {}[\"{}\"]", id, label(&text));
        }
        out.push_str("  end\n\n");
    }
    out
}

/// Renders the dependency diagram.
///
/// # Arguments
///
/// * `graph` - Aggregated controller/service usage.
/// * `classifier` - Service bucketing rules.
/// * `core_threshold` - Usage count from which a service is flagged as core.
pub fn render_dependency_diagram(
    graph: &DependencyGraph,
    classifier: &ServiceClassifier,
    core_threshold: usize,
) -> String {
    // Names iterate sorted, so ids are stable across runs.
    let mut ids = NodeIds::default();
    let controller_ids: BTreeMap<&str, String> = graph
        .controllers()
        .map(|c| (c, ids.allocate("ctrl_", c)))
        .collect();
    let service_ids: BTreeMap<&str, String> = graph
        .services()
        .map(|s| (s, ids.allocate("svc_", s)))
        .collect();

    let mut out = String::from("flowchart LR\n");

    out.push_str("  subgraph Controllers\n");
    for (controller, id) in &controller_ids {
        let _ = writeln!(out, "    {}[\"{}\"]", id, label(controller));
    }
    out.push_str("  end\n");

    let mut core_services = Vec::new();
    for (category, services) in graph.services_by_category(classifier) {
        let _ = writeln!(out, "  subgraph {}", category.title());
        for service in services {
            let id = &service_ids[service];
            let count = graph.usage_count(service);
            let is_core = graph.is_core(service, core_threshold);
            if is_core {
                core_services.push(id.as_str());
            }
            let _ = writeln!(
                out,
                "    {}[\"{}{}<br/>used by {} controller{}\"]",
                id,
                label(service),
                if is_core { " (core)" } else { "" },
                count,
                if count == 1 { "" } else { "s" },
            );
        }
        out.push_str("  end\n");
    }

    for edge in graph.edges() {
        let from = &controller_ids[edge.controller];
        let to = &service_ids[edge.service];
        let kinds: Vec<&str> = edge.injection_kinds.iter().map(String::as_str).collect();
        if kinds.is_empty() {
            let _ = writeln!(out, "  {} --> {}", from, to);
        } else {
            let _ = writeln!(out, "  {} -->|{}| {}", from, kinds.join(", "), to);
        }
    }

    if !core_services.is_empty() {
        out.push_str("  classDef core stroke-width:3px\n");
        let _ = writeln!(out, "  class {} core", core_services.join(","));
    }
    out
}
