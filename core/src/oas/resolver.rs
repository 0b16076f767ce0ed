#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for resolving IR type references into schema fragments.
//!
//! Handles:
//! - Recursive container mapping (`List<List<Integer>>` nests arrays).
//! - Primitive/wrapper mapping via the fixed vocabulary.
//! - Named references, only for models that have a schema slot.
//! - A string fallback for everything else, so no reference ever dangles.

use crate::ir::{Model, TypeRef};
use crate::oas::schema::SchemaFragment;
use crate::type_mapping::{TypeMapper, TypeShape, TypeVocabulary};
use std::collections::BTreeSet;
use tracing::debug;

/// A standard implementation of `TypeMapper` bound to one IR's model names.
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    vocabulary: TypeVocabulary,
    known_models: BTreeSet<String>,
}

impl SchemaResolver {
    /// Creates a resolver over an explicit set of model names.
    pub fn new(vocabulary: TypeVocabulary, known_models: BTreeSet<String>) -> Self {
        Self {
            vocabulary,
            known_models,
        }
    }

    /// Creates a resolver that knows every model in `models`.
    pub fn for_models(vocabulary: TypeVocabulary, models: &[Model]) -> Self {
        let known_models = models.iter().map(|m| m.name.clone()).collect();
        Self::new(vocabulary, known_models)
    }
}

impl TypeMapper for SchemaResolver {
    fn resolve(&self, ty: &TypeRef) -> SchemaFragment {
        match self.vocabulary.classify(ty, &self.known_models) {
            TypeShape::Container(item) => {
                if ty.args.len() > 1 {
                    debug!(
                        ty = %ty,
                        ignored = ty.args.len() - 1,
                        "Container has extra type arguments, using the first"
                    );
                }
                SchemaFragment::array(self.resolve(item))
            }
            TypeShape::Primitive(primitive) => primitive.fragment(),
            TypeShape::ModelReference(name) => SchemaFragment::reference(name),
            TypeShape::Unknown => {
                debug!(ty = %ty, "Unresolved type, defaulting to string");
                SchemaFragment::string()
            }
        }
    }

    fn resolve_scalar(&self, ty: &TypeRef) -> SchemaFragment {
        match self.vocabulary.classify(ty, &self.known_models) {
            TypeShape::Primitive(primitive) => primitive.fragment(),
            TypeShape::ModelReference(name) => SchemaFragment::reference(name),
            TypeShape::Container(_) | TypeShape::Unknown => {
                debug!(ty = %ty, "Unsupported parameter type, defaulting to string");
                SchemaFragment::string()
            }
        }
    }

    fn is_container(&self, base: &str) -> bool {
        self.vocabulary.is_container(base)
    }

    fn is_model(&self, name: &str) -> bool {
        self.known_models.contains(name)
    }
}
