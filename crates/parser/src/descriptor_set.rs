//! Protobuf FileDescriptorSet parser

use prost::Message;
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use protoc_gen_interfaces_common::{GeneratorError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Descriptor set loaded outside of a plugin invocation
///
/// `protoc --include_imports --descriptor_set_out=out.pb foo.proto` writes
/// the imports first and `foo.proto` last, so the last file is treated as
/// the generation target when no explicit list is available.
pub struct DescriptorSetParser {
    files: Vec<FileDescriptorProto>,
}

impl DescriptorSetParser {
    /// Load FileDescriptorSet from binary file
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = DescriptorSetParser::from_file("service.pb")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref()).map_err(|e| {
            GeneratorError::Decode(format!(
                "Failed to read FileDescriptorSet file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_bytes(&bytes)
    }

    /// Parse FileDescriptorSet from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let set = FileDescriptorSet::decode(bytes).map_err(|e| {
            GeneratorError::Decode(format!("Failed to decode FileDescriptorSet: {}", e))
        })?;

        debug!(files = set.file.len(), "decoded FileDescriptorSet");

        Ok(Self { files: set.file })
    }

    /// All descriptors in the set, in the order they were written
    pub fn files(&self) -> &[FileDescriptorProto] {
        &self.files
    }

    /// Default generation targets: the last file of the set
    pub fn default_targets(&self) -> Vec<String> {
        self.files
            .last()
            .map(|f| vec![f.name().to_string()])
            .unwrap_or_default()
    }
}
