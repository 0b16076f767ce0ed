#![deny(missing_docs)]

//! # Type Mapping
//!
//! Classifies IR type references into a closed set of shapes before any
//! schema is produced. The primitive vocabulary is fixed; the container
//! vocabulary comes from configuration.
//!
//! Generics are limited to single-argument containers: only the first type
//! argument of a container is looked at, the rest are ignored.

use crate::ir::TypeRef;
use crate::oas::schema::{JsonType, SchemaFragment};
use std::collections::BTreeSet;

/// Canonical primitive kinds of the source vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Integer family.
    Integer,
    /// Floating point family.
    Number,
    /// Booleans.
    Boolean,
    /// String family.
    String,
    /// UUIDs, rendered as formatted strings.
    Uuid,
    /// Timestamps, rendered as `date-time` strings.
    DateTime,
    /// Calendar dates, rendered as `date` strings.
    Date,
}

impl Primitive {
    /// Looks a type name up in the primitive/wrapper vocabulary.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "int" | "Integer" | "long" | "Long" | "short" | "Short" | "byte" | "Byte"
            | "BigInteger" => Primitive::Integer,
            "double" | "Double" | "float" | "Float" | "BigDecimal" => Primitive::Number,
            "boolean" | "Boolean" => Primitive::Boolean,
            "String" | "string" | "char" | "Character" | "java.lang.String" => Primitive::String,
            "UUID" => Primitive::Uuid,
            "LocalDateTime" | "Date" | "Instant" | "ZonedDateTime" | "OffsetDateTime" => {
                Primitive::DateTime
            }
            "LocalDate" => Primitive::Date,
            _ => return None,
        };
        Some(primitive)
    }

    /// The JSON type this primitive maps to.
    pub fn json_type(self) -> JsonType {
        match self {
            Primitive::Integer => JsonType::Integer,
            Primitive::Number => JsonType::Number,
            Primitive::Boolean => JsonType::Boolean,
            Primitive::String | Primitive::Uuid | Primitive::DateTime | Primitive::Date => {
                JsonType::String
            }
        }
    }

    /// Optional format annotation.
    pub fn format(self) -> Option<&'static str> {
        match self {
            Primitive::Uuid => Some("uuid"),
            Primitive::DateTime => Some("date-time"),
            Primitive::Date => Some("date"),
            _ => None,
        }
    }

    /// Builds the canonical schema for this primitive.
    pub fn fragment(self) -> SchemaFragment {
        SchemaFragment::primitive(self.json_type(), self.format())
    }
}

/// The resolved shape of a [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape<'a> {
    /// A scalar from the primitive vocabulary.
    Primitive(Primitive),
    /// A container; holds the item type.
    Container(&'a TypeRef),
    /// A model known to the current IR.
    ModelReference(&'a str),
    /// Anything else, including malformed containers without arguments.
    Unknown,
}

/// Container vocabulary plus the classification rules built on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeVocabulary {
    containers: BTreeSet<String>,
}

impl Default for TypeVocabulary {
    fn default() -> Self {
        Self::new(["List", "Set", "Array"])
    }
}

impl TypeVocabulary {
    /// Creates a vocabulary with the given container names.
    pub fn new<I, S>(containers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            containers: containers.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `base` names a container.
    pub fn is_container(&self, base: &str) -> bool {
        self.containers.contains(base)
    }

    /// Classifies a type reference.
    ///
    /// Order matters: containers first, then primitives, then known models.
    ///
    /// # Arguments
    ///
    /// * `ty` - The reference to classify.
    /// * `known_models` - Names of every model in the IR.
    pub fn classify<'a>(&self, ty: &'a TypeRef, known_models: &BTreeSet<String>) -> TypeShape<'a> {
        if self.is_container(&ty.base) {
            return match ty.args.first() {
                Some(item) => TypeShape::Container(item),
                None => TypeShape::Unknown,
            };
        }
        if let Some(primitive) = Primitive::from_type_name(&ty.base) {
            return TypeShape::Primitive(primitive);
        }
        if known_models.contains(&ty.base) {
            return TypeShape::ModelReference(&ty.base);
        }
        TypeShape::Unknown
    }
}

/// Trait for converting IR type references to schema fragments.
///
/// Implementations must be total: every input yields a fragment, and no
/// fragment may reference a schema that does not exist.
pub trait TypeMapper {
    /// Resolves any type, recursing through containers.
    fn resolve(&self, ty: &TypeRef) -> SchemaFragment;

    /// Resolves a parameter type. Containers are not supported here.
    fn resolve_scalar(&self, ty: &TypeRef) -> SchemaFragment;

    /// Whether `base` names a container.
    fn is_container(&self, base: &str) -> bool;

    /// Whether `name` is a model with a schema slot.
    fn is_model(&self, name: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_primitive_mapping() {
        let cases = vec![
            ("int", JsonType::Integer),
            ("Long", JsonType::Integer),
            ("Double", JsonType::Number),
            ("boolean", JsonType::Boolean),
            ("java.lang.String", JsonType::String),
            ("LocalDateTime", JsonType::String),
        ];

        for (input, expected) in cases {
            let p = Primitive::from_type_name(input).expect(input);
            assert_eq!(p.json_type(), expected);
        }
        assert_eq!(Primitive::DateTime.format(), Some("date-time"));
        assert_eq!(Primitive::Integer.format(), None);
        assert!(Primitive::from_type_name("User").is_none());
    }

    #[test]
    fn test_classify_order() {
        let vocab = TypeVocabulary::default();
        let models = known(&["User", "List"]);

        let list = TypeRef::generic("List", vec![TypeRef::named("User")]);
        match vocab.classify(&list, &models) {
            TypeShape::Container(item) => assert_eq!(item.base, "User"),
            other => panic!("Expected container, got {:?}", other),
        }

        assert_eq!(
            vocab.classify(&TypeRef::named("User"), &models),
            TypeShape::ModelReference("User")
        );
        assert_eq!(
            vocab.classify(&TypeRef::named("Integer"), &models),
            TypeShape::Primitive(Primitive::Integer)
        );
        assert_eq!(
            vocab.classify(&TypeRef::named("Mystery"), &models),
            TypeShape::Unknown
        );
    }

    #[test]
    fn test_zero_argument_container_is_unknown() {
        let vocab = TypeVocabulary::default();
        let bare = TypeRef::named("Set");
        assert_eq!(vocab.classify(&bare, &known(&[])), TypeShape::Unknown);
    }

    #[test]
    fn test_custom_containers() {
        let vocab = TypeVocabulary::new(["Collection"]);
        assert!(vocab.is_container("Collection"));
        assert!(!vocab.is_container("List"));
    }
}
