//! Field type resolution

use crate::scalar::resolve_scalar;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::FieldDescriptorProto;
use protoc_gen_interfaces_common::{GeneratorConfig, ResolvedType};
use tracing::trace;

/// Resolve a field descriptor to its target type
///
/// Repeated fields are wrapped in [`ResolvedType::Sequence`]; optional and
/// required labels resolve the same as an unlabeled field.
pub fn resolve_field(field: &FieldDescriptorProto, config: &GeneratorConfig) -> ResolvedType {
    let base = resolve_scalar(field_kind(field), field.type_name(), config);

    let resolved = if is_repeated(field) {
        base.into_sequence()
    } else {
        base
    };

    trace!(field = field.name(), resolved = %resolved, "resolved field");
    resolved
}

/// The field's declared kind, `None` if missing or not a known `Type` value
///
/// Reads the raw value: the generated `r#type()` accessor would turn an
/// unknown kind into `Double`.
fn field_kind(field: &FieldDescriptorProto) -> Option<Type> {
    field.r#type.and_then(|t| Type::try_from(t).ok())
}

fn is_repeated(field: &FieldDescriptorProto) -> bool {
    field.label == Some(Label::Repeated as i32)
}
