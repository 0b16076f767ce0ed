#![deny(missing_docs)]

//! # IR Module
//!
//! The language-agnostic description of an API that the external source
//! parser hands over, plus decoding of its JSON wire form.
//!
//! The parser serializes unset collections and strings as `null`; those are
//! stripped before decoding so every field falls back to its default. `null`
//! array elements are dropped the same way.

pub mod models;

pub use models::{Dependency, Endpoint, Field, Ir, Model, ParamLocation, Parameter, TypeRef};

use crate::error::AppResult;
use serde_json::Value;
use tracing::debug;

impl Ir {
    /// Decodes the parser's JSON output.
    ///
    /// # Arguments
    ///
    /// * `json` - The raw JSON document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Json` when the text is not JSON or does not have the IR shape.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let mut value: Value = serde_json::from_str(json)?;
        strip_nulls(&mut value);
        let ir: Ir = serde_json::from_value(value)?;
        debug!(
            models = ir.models.len(),
            endpoints = ir.endpoints.len(),
            "Decoded IR"
        );
        Ok(ir)
    }
}

/// Removes `null` object members and array elements recursively so serde
/// defaults apply.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                strip_nulls(v);
            }
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            for v in items.iter_mut() {
                strip_nulls(v);
            }
        }
        _ => {}
    }
}
