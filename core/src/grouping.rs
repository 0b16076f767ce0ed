#![deny(missing_docs)]

//! # Grouping Engine
//!
//! Shared normalization for the table and diagram renderers:
//! - the longest common path-segment prefix across all endpoints,
//! - a grouping key per endpoint (first tag, then first segment past the
//!   prefix, then a fallback group),
//! - controller/service dependency aggregation with service bucketing.
//!
//! Every collection handed out here iterates in lexicographic order.

use crate::ir::Endpoint;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};
use tracing::debug;

/// Group used when an endpoint has no tag and no segment past the common prefix.
pub const DEFAULT_GROUP: &str = "Default";

/// Usage count from which a service counts as core.
pub const DEFAULT_CORE_SERVICE_THRESHOLD: usize = 3;

/// Splits a path into its non-empty `/`-delimited segments.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Longest segment sequence shared by every path.
///
/// Starts from the first path and shrinks on each mismatch or shorter path.
pub fn common_prefix<'a>(paths: &[Vec<&'a str>]) -> Vec<&'a str> {
    let Some((first, rest)) = paths.split_first() else {
        return Vec::new();
    };
    let mut prefix = first.clone();
    for parts in rest {
        let shared = prefix
            .iter()
            .zip(parts.iter())
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(shared);
    }
    prefix
}

/// Common prefix over the paths of `endpoints`.
pub fn endpoint_common_prefix(endpoints: &[Endpoint]) -> Vec<&str> {
    let paths: Vec<Vec<&str>> = endpoints.iter().map(|e| path_segments(&e.path)).collect();
    common_prefix(&paths)
}

/// Upper-cases the first character.
pub fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives the grouping key of an endpoint.
///
/// # Arguments
///
/// * `endpoint` - The endpoint to classify.
/// * `common_prefix` - Shared prefix of all endpoint paths.
/// * `default_group` - Fallback group name.
pub fn group_key(endpoint: &Endpoint, common_prefix: &[&str], default_group: &str) -> String {
    if let Some(tag) = endpoint.tags.first().filter(|t| !t.is_empty()) {
        return tag.clone();
    }
    match path_segments(&endpoint.path).get(common_prefix.len()) {
        Some(segment) => capitalize(segment),
        None => default_group.to_string(),
    }
}

/// Groups endpoints by key; groups iterate in name order, endpoints keep input order.
pub fn group_endpoints<'a>(
    endpoints: &'a [Endpoint],
    default_group: &str,
) -> BTreeMap<String, Vec<&'a Endpoint>> {
    let prefix = endpoint_common_prefix(endpoints);
    debug!(prefix = %prefix.join("/"), "Computed common path prefix");

    let mut groups: BTreeMap<String, Vec<&Endpoint>> = BTreeMap::new();
    for endpoint in endpoints {
        groups
            .entry(group_key(endpoint, &prefix, default_group))
            .or_default()
            .push(endpoint);
    }
    groups
}

/// Bucket a service falls into on the dependency diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    /// Data access (`*Repository`, `*Dao`).
    Repository,
    /// Helpers and utilities.
    Utility,
    /// Everything else.
    Service,
}

impl ServiceCategory {
    /// Diagram heading of the bucket.
    pub fn title(self) -> &'static str {
        match self {
            ServiceCategory::Repository => "Repositories",
            ServiceCategory::Utility => "Utilities",
            ServiceCategory::Service => "Services",
        }
    }
}

impl Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A substring rule: any pattern found in the type name selects `category`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceRule {
    /// Bucket selected by this rule.
    pub category: ServiceCategory,
    /// Case-insensitive substrings.
    pub patterns: Vec<String>,
}

/// Ordered service bucketing rules; first match wins, no match is a generic service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceClassifier {
    rules: Vec<ServiceRule>,
}

impl Default for ServiceClassifier {
    fn default() -> Self {
        Self::new(default_service_rules())
    }
}

/// The built-in bucketing rules.
pub fn default_service_rules() -> Vec<ServiceRule> {
    vec![
        ServiceRule {
            category: ServiceCategory::Repository,
            patterns: vec!["repository".into(), "dao".into(), "repo".into()],
        },
        ServiceRule {
            category: ServiceCategory::Utility,
            patterns: vec!["util".into(), "helper".into()],
        },
    ]
}

impl ServiceClassifier {
    /// Creates a classifier; patterns are matched lower-cased.
    pub fn new(rules: Vec<ServiceRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| ServiceRule {
                category: rule.category,
                patterns: rule.patterns.iter().map(|p| p.to_lowercase()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// Buckets a service type name.
    pub fn classify(&self, type_name: &str) -> ServiceCategory {
        let name = type_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| name.contains(p.as_str())))
            .map_or(ServiceCategory::Service, |rule| rule.category)
    }
}

/// Controller to service usage, deduplicated by service type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyGraph {
    /// Controller name -> service type -> injection kinds.
    controllers: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    /// Service type -> controller names using it.
    usage: BTreeMap<String, BTreeSet<String>>,
}

/// One deduplicated controller -> service edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge<'a> {
    /// Using controller.
    pub controller: &'a str,
    /// Used service type.
    pub service: &'a str,
    /// Injection kinds seen for this pair, sorted.
    pub injection_kinds: &'a BTreeSet<String>,
}

impl DependencyGraph {
    /// Aggregates the dependencies declared on every endpoint.
    ///
    /// Endpoints without a controller name are skipped, as are dependencies
    /// without a type.
    pub fn from_endpoints(endpoints: &[Endpoint]) -> Self {
        let mut graph = Self::default();
        for endpoint in endpoints {
            if endpoint.controller_name.is_empty() {
                debug!(path = %endpoint.path, "Endpoint has no controller, skipping dependencies");
                continue;
            }
            let services = graph
                .controllers
                .entry(endpoint.controller_name.clone())
                .or_default();
            for dependency in &endpoint.dependencies {
                if dependency.type_name.is_empty() {
                    continue;
                }
                let kinds = services.entry(dependency.type_name.clone()).or_default();
                if !dependency.injection_type.is_empty() {
                    kinds.insert(dependency.injection_type.clone());
                }
                graph
                    .usage
                    .entry(dependency.type_name.clone())
                    .or_default()
                    .insert(endpoint.controller_name.clone());
            }
        }
        graph
    }

    /// Controller names, sorted.
    pub fn controllers(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    /// Service type names, sorted.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.usage.keys().map(String::as_str)
    }

    /// Distinct service types used by `controller`, sorted.
    pub fn services_of(&self, controller: &str) -> impl Iterator<Item = &str> {
        self.controllers
            .get(controller)
            .into_iter()
            .flat_map(|services| services.keys().map(String::as_str))
    }

    /// Controllers using `service`, sorted.
    pub fn users_of(&self, service: &str) -> impl Iterator<Item = &str> {
        self.usage
            .get(service)
            .into_iter()
            .flat_map(|users| users.iter().map(String::as_str))
    }

    /// Number of distinct controllers using `service`.
    pub fn usage_count(&self, service: &str) -> usize {
        self.usage.get(service).map_or(0, BTreeSet::len)
    }

    /// Whether `service` is used by at least `threshold` controllers.
    pub fn is_core(&self, service: &str, threshold: usize) -> bool {
        self.usage_count(service) >= threshold
    }

    /// Every edge, ordered by controller then service.
    pub fn edges(&self) -> impl Iterator<Item = DependencyEdge<'_>> {
        self.controllers.iter().flat_map(|(controller, services)| {
            services.iter().map(move |(service, kinds)| DependencyEdge {
                controller: controller.as_str(),
                service: service.as_str(),
                injection_kinds: kinds,
            })
        })
    }

    /// Services grouped by bucket; buckets and members sorted.
    pub fn services_by_category(
        &self,
        classifier: &ServiceClassifier,
    ) -> BTreeMap<ServiceCategory, Vec<&str>> {
        let mut buckets: BTreeMap<ServiceCategory, Vec<&str>> = BTreeMap::new();
        for service in self.services() {
            buckets
                .entry(classifier.classify(service))
                .or_default()
                .push(service);
        }
        buckets
    }
}
