//! Renderer-agnostic output model
//!
//! One [`OutputFile`] is produced per generated `.proto` file. It holds a flat,
//! ordered list of [`TypeDefinition`]s (one per message, nested messages
//! included) and each definition holds its fields in declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target-language primitive a protobuf scalar maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Numeric,
    /// 64-bit integer kept apart from `Numeric` by the configured policy
    WideInteger(WideRepresentation),
    Boolean,
    Text,
    Bytes,
}

/// Concrete representation chosen for 64-bit integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WideRepresentation {
    ArbitraryPrecision,
    WordPair,
}

/// A field's protobuf type resolved for the target language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResolvedType {
    Primitive(Primitive),
    /// Repeated field of the inner type
    Sequence(Box<ResolvedType>),
    /// Message, enum, or unrecognized type, carried by its referenced name verbatim
    OpaqueReference(String),
}

impl ResolvedType {
    /// Wrap this type in a sequence
    pub fn into_sequence(self) -> Self {
        ResolvedType::Sequence(Box::new(self))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, ResolvedType::Sequence(_))
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Numeric => write!(f, "numeric"),
            Primitive::WideInteger(WideRepresentation::ArbitraryPrecision) => {
                write!(f, "wide_integer(arbitrary_precision)")
            }
            Primitive::WideInteger(WideRepresentation::WordPair) => {
                write!(f, "wide_integer(word_pair)")
            }
            Primitive::Boolean => write!(f, "boolean"),
            Primitive::Text => write!(f, "text"),
            Primitive::Bytes => write!(f, "bytes"),
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Primitive(p) => write!(f, "{}", p),
            ResolvedType::Sequence(inner) => write!(f, "sequence<{}>", inner),
            ResolvedType::OpaqueReference(name) => write!(f, "ref({})", name),
        }
    }
}

/// One `(field name, resolved type)` pair of a type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub resolved_type: ResolvedType,
}

/// One generated type, produced from one message descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Simple message name (e.g., "Inner")
    pub name: String,

    /// Enclosing message names and the simple name joined by dots
    /// (e.g., "Outer.Inner"). Equal to `name` for top-level messages.
    pub qualified_name: String,

    /// Fields in declaration order
    pub fields: Vec<FieldSpec>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field after all previously added ones
    pub fn push_field(&mut self, name: impl Into<String>, resolved_type: ResolvedType) {
        self.fields.push(FieldSpec {
            name: name.into(),
            resolved_type,
        });
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Result unit for one input `.proto` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    /// Name of the source descriptor (e.g., "foo/bar.proto")
    pub name: String,

    /// Protobuf package of the source file, empty when none is declared
    #[serde(default)]
    pub package: String,

    /// All generated types, flattened in pre-order
    pub types: Vec<TypeDefinition>,
}

impl OutputFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            types: Vec::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Fold a completed definition into this file
    pub fn push_type(&mut self, definition: TypeDefinition) {
        self.types.push(definition);
    }

    /// Look up a type by its qualified name
    pub fn find_type(&self, qualified_name: &str) -> Option<&TypeDefinition> {
        self.types
            .iter()
            .find(|t| t.qualified_name == qualified_name)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut def = TypeDefinition::new("Point", "Point");
        def.push_field("x", ResolvedType::Primitive(Primitive::Numeric));
        def.push_field("y", ResolvedType::Primitive(Primitive::Numeric));

        let names: Vec<&str> = def.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);

        let mut file = OutputFile::new("a.proto");
        assert!(file.is_empty());
        file.push_type(def);
        file.push_type(TypeDefinition::new("Other", "Other"));
        assert_eq!(file.types[0].name, "Point");
        assert_eq!(file.types[1].name, "Other");
        assert!(file.find_type("Other").is_some());
        assert!(file.find_type("Missing").is_none());
    }

    #[test]
    fn test_resolved_type_display() {
        let t = ResolvedType::Primitive(Primitive::Text).into_sequence();
        assert!(t.is_sequence());
        assert_eq!(t.to_string(), "sequence<text>");
        assert_eq!(
            ResolvedType::OpaqueReference(".pkg.Other".to_string()).to_string(),
            "ref(.pkg.Other)"
        );
        assert_eq!(
            Primitive::WideInteger(WideRepresentation::WordPair).to_string(),
            "wide_integer(word_pair)"
        );
    }

    #[test]
    fn test_resolved_type_json_shape() {
        let t = ResolvedType::Primitive(Primitive::Boolean).into_sequence();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["kind"], "sequence");
        assert_eq!(json["value"]["kind"], "primitive");
        assert_eq!(json["value"]["value"], "boolean");

        let back: ResolvedType = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }
}
