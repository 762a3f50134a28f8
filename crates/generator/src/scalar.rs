//! Scalar type resolution
//!
//! Maps a protobuf field kind to a [`ResolvedType`]. The mapping is total:
//! message, enum, group, and unknown kinds all become an opaque reference so
//! generation never stops on an unfamiliar field.

use prost_types::field_descriptor_proto::Type;
use protoc_gen_interfaces_common::{
    GeneratorConfig, Primitive, ResolvedType, WideIntegerPolicy, WideRepresentation,
};

/// Resolve a field kind to its target type
///
/// `kind` is `None` when the descriptor carries no kind or one this
/// version of `prost-types` does not know. `type_name` is the referenced
/// type name and is only used for the opaque-reference branch.
///
/// # Examples
/// ```
/// use prost_types::field_descriptor_proto::Type;
/// use protoc_gen_interfaces_common::{GeneratorConfig, Primitive, ResolvedType};
/// use protoc_gen_interfaces_generator::resolve_scalar;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(
///     resolve_scalar(Some(Type::Bool), "", &config),
///     ResolvedType::Primitive(Primitive::Boolean)
/// );
/// assert_eq!(
///     resolve_scalar(Some(Type::Message), ".pkg.Other", &config),
///     ResolvedType::OpaqueReference(".pkg.Other".to_string())
/// );
/// ```
pub fn resolve_scalar(
    kind: Option<Type>,
    type_name: &str,
    config: &GeneratorConfig,
) -> ResolvedType {
    match kind {
        Some(
            Type::Double
            | Type::Float
            | Type::Int32
            | Type::Uint32
            | Type::Sint32
            | Type::Fixed32
            | Type::Sfixed32,
        ) => ResolvedType::Primitive(Primitive::Numeric),
        Some(Type::Int64 | Type::Uint64 | Type::Sint64 | Type::Fixed64 | Type::Sfixed64) => {
            ResolvedType::Primitive(wide_integer(config.wide_integer_policy))
        }
        Some(Type::Bool) => ResolvedType::Primitive(Primitive::Boolean),
        Some(Type::String) => ResolvedType::Primitive(Primitive::Text),
        Some(Type::Bytes) => ResolvedType::Primitive(Primitive::Bytes),
        Some(Type::Message | Type::Enum | Type::Group) | None => {
            ResolvedType::OpaqueReference(type_name.to_string())
        }
    }
}

fn wide_integer(policy: WideIntegerPolicy) -> Primitive {
    match policy {
        WideIntegerPolicy::NativeNumeric => Primitive::Numeric,
        WideIntegerPolicy::ArbitraryPrecision => {
            Primitive::WideInteger(WideRepresentation::ArbitraryPrecision)
        }
        WideIntegerPolicy::WordPair => Primitive::WideInteger(WideRepresentation::WordPair),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NARROW: [Type; 7] = [
        Type::Double,
        Type::Float,
        Type::Int32,
        Type::Uint32,
        Type::Sint32,
        Type::Fixed32,
        Type::Sfixed32,
    ];

    const WIDE: [Type; 5] = [
        Type::Int64,
        Type::Uint64,
        Type::Sint64,
        Type::Fixed64,
        Type::Sfixed64,
    ];

    #[test]
    fn test_numeric_kinds() {
        let config = GeneratorConfig::default();
        for kind in NARROW.iter().chain(WIDE.iter()) {
            assert_eq!(
                resolve_scalar(Some(*kind), "", &config),
                ResolvedType::Primitive(Primitive::Numeric),
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_other_scalars() {
        let config = GeneratorConfig::default();
        assert_eq!(
            resolve_scalar(Some(Type::Bool), "", &config),
            ResolvedType::Primitive(Primitive::Boolean)
        );
        assert_eq!(
            resolve_scalar(Some(Type::String), "", &config),
            ResolvedType::Primitive(Primitive::Text)
        );
        assert_eq!(
            resolve_scalar(Some(Type::Bytes), "", &config),
            ResolvedType::Primitive(Primitive::Bytes)
        );
    }

    #[test]
    fn test_references_and_unknown() {
        let config = GeneratorConfig::default();
        for kind in [Some(Type::Message), Some(Type::Enum), Some(Type::Group), None] {
            assert_eq!(
                resolve_scalar(kind, ".pkg.Other", &config),
                ResolvedType::OpaqueReference(".pkg.Other".to_string())
            );
        }
    }

    #[test]
    fn test_wide_integer_policies() {
        let config = GeneratorConfig {
            wide_integer_policy: WideIntegerPolicy::ArbitraryPrecision,
            ..Default::default()
        };
        for kind in WIDE {
            assert_eq!(
                resolve_scalar(Some(kind), "", &config),
                ResolvedType::Primitive(Primitive::WideInteger(
                    WideRepresentation::ArbitraryPrecision
                ))
            );
        }
        // 32-bit kinds are unaffected by the policy
        for kind in NARROW {
            assert_eq!(
                resolve_scalar(Some(kind), "", &config),
                ResolvedType::Primitive(Primitive::Numeric)
            );
        }

        let config = GeneratorConfig {
            wide_integer_policy: WideIntegerPolicy::WordPair,
            ..Default::default()
        };
        assert_eq!(
            resolve_scalar(Some(Type::Fixed64), "", &config),
            ResolvedType::Primitive(Primitive::WideInteger(WideRepresentation::WordPair))
        );
    }

    #[test]
    fn test_resolution_is_pure() {
        let config = GeneratorConfig::default();
        let first = resolve_scalar(Some(Type::Sint64), "", &config);
        let second = resolve_scalar(Some(Type::Sint64), "", &config);
        assert_eq!(first, second);
    }
}
