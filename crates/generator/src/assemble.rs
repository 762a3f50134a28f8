//! Message and file assembly
//!
//! Walks each file's message tree and folds one [`TypeDefinition`] per
//! message into the file's [`OutputFile`]. Nested messages are flattened
//! into the same list, directly after their parent (pre-order), and carry
//! the dotted chain of enclosing names in `qualified_name`.

use crate::field::resolve_field;
use prost_types::{DescriptorProto, FileDescriptorProto};
use protoc_gen_interfaces_common::{GeneratorConfig, OutputFile, TypeDefinition};
use std::collections::HashSet;
use tracing::debug;

/// Assemble `message` and its nested messages into `into`
///
/// `parent` is the qualified name of the enclosing message, `None` for a
/// top-level message.
pub fn assemble_message(
    message: &DescriptorProto,
    parent: Option<&str>,
    into: &mut OutputFile,
    config: &GeneratorConfig,
) {
    let name = message.name();
    let qualified_name = match parent {
        Some(parent) => format!("{}.{}", parent, name),
        None => name.to_string(),
    };

    let mut definition = TypeDefinition::new(name, qualified_name.as_str());
    for field in &message.field {
        definition.push_field(field.name(), resolve_field(field, config));
    }

    debug!(
        message = %qualified_name,
        fields = definition.fields.len(),
        nested = message.nested_type.len(),
        "assembled message"
    );
    into.push_type(definition);

    for nested in &message.nested_type {
        assemble_message(nested, Some(&qualified_name), into, config);
    }
}

/// Assemble one output unit from a file descriptor
pub fn assemble_file(file: &FileDescriptorProto, config: &GeneratorConfig) -> OutputFile {
    let mut output = OutputFile::new(file.name()).with_package(file.package());

    for message in &file.message_type {
        assemble_message(message, None, &mut output, config);
    }

    debug!(file = file.name(), types = output.types.len(), "assembled file");
    output
}

/// Assemble every descriptor, one output per file in input order
pub fn assemble_files(files: &[FileDescriptorProto], config: &GeneratorConfig) -> Vec<OutputFile> {
    files.iter().map(|f| assemble_file(f, config)).collect()
}

/// Assemble only the descriptors named in `files_to_generate`
///
/// The other descriptors are dependencies protoc includes for reference and
/// produce no output. Input order is preserved.
pub fn assemble_requested(
    files: &[FileDescriptorProto],
    files_to_generate: &[String],
    config: &GeneratorConfig,
) -> Vec<OutputFile> {
    let targets: HashSet<&str> = files_to_generate.iter().map(String::as_str).collect();

    files
        .iter()
        .filter(|f| targets.contains(f.name()))
        .map(|f| assemble_file(f, config))
        .collect()
}
