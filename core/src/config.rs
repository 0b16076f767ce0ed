#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Caller-supplied document metadata plus the declarative lookup tables
//! (validation allow-list, container names, service bucketing rules) used by
//! the compiler and the grouping engine.

use crate::error::{AppError, AppResult};
use crate::grouping::{
    default_service_rules, ServiceClassifier, ServiceRule, DEFAULT_CORE_SERVICE_THRESHOLD,
    DEFAULT_GROUP,
};
use crate::oas::schema::is_reserved_keyword;
use crate::oas::schemas::DEFAULT_VALIDATION_KEYS;
use crate::type_mapping::TypeVocabulary;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::warn;
use url::Url;

/// Configuration for one generator run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// `info` block of the document; `title` and `version` are mandatory.
    pub info: BTreeMap<String, String>,
    /// `servers` block of the document.
    pub servers: Vec<BTreeMap<String, String>>,
    /// Validation keywords copied from field rules onto properties.
    pub validation_keys: BTreeSet<String>,
    /// Service bucketing rules, first match wins.
    pub service_rules: Vec<ServiceRule>,
    /// Group for endpoints without a tag or a segment past the common prefix.
    pub default_group: String,
    /// Usage count from which a service is flagged as core.
    pub core_service_threshold: usize,
    /// Container type names.
    pub container_names: BTreeSet<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            info: BTreeMap::from([
                ("title".to_string(), "API".to_string()),
                ("version".to_string(), "1.0.0".to_string()),
            ]),
            servers: vec![BTreeMap::from([(
                "url".to_string(),
                "https://api.example.com".to_string(),
            )])],
            validation_keys: DEFAULT_VALIDATION_KEYS.iter().map(|k| k.to_string()).collect(),
            service_rules: default_service_rules(),
            default_group: DEFAULT_GROUP.to_string(),
            core_service_threshold: DEFAULT_CORE_SERVICE_THRESHOLD,
            container_names: ["List", "Set", "Array"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a config file. `.json` files are read as JSON, anything else as YAML.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would produce an invalid document.
    ///
    /// Server URLs that do not parse are only reported.
    pub fn validate(&self) -> AppResult<()> {
        for key in ["title", "version"] {
            if self.info.get(key).map_or(true, |v| v.trim().is_empty()) {
                return Err(AppError::Config(format!("info.{} must be set", key)));
            }
        }
        if self.core_service_threshold == 0 {
            return Err(AppError::Config(
                "core_service_threshold must be at least 1".into(),
            ));
        }
        if self.default_group.trim().is_empty() {
            return Err(AppError::Config("default_group must not be empty".into()));
        }
        if let Some(key) = self.validation_keys.iter().find(|k| is_reserved_keyword(k)) {
            return Err(AppError::Config(format!(
                "validation_keys entry '{}' is a reserved schema keyword",
                key
            )));
        }
        for (index, server) in self.servers.iter().enumerate() {
            match server.get("url") {
                Some(url) => {
                    if let Err(e) = Url::parse(url) {
                        warn!(server = index, url = %url, error = %e, "Server URL is not absolute");
                    }
                }
                None => warn!(server = index, "Server entry has no url"),
            }
        }
        Ok(())
    }

    /// The container vocabulary used by the resolver.
    pub fn vocabulary(&self) -> TypeVocabulary {
        TypeVocabulary::new(self.container_names.iter().cloned())
    }

    /// The service bucketing rules used by the dependency diagram.
    pub fn classifier(&self) -> ServiceClassifier {
        ServiceClassifier::new(self.service_rules.clone())
    }
}
