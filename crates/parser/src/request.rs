//! protoc plugin request decoding

use crate::options::config_from_parameter;
use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::FileDescriptorProto;
use protoc_gen_interfaces_common::{GeneratorConfig, GeneratorError, Result};
use std::io::Read;
use tracing::debug;

/// Decoded `CodeGeneratorRequest`
///
/// Holds every file descriptor protoc sent (targets and their imports, in
/// topological order) together with the names of the files to generate.
#[derive(Debug, Clone)]
pub struct PluginRequest {
    request: CodeGeneratorRequest,
}

impl PluginRequest {
    /// Decode a request from its protobuf encoding
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let request = CodeGeneratorRequest::decode(bytes).map_err(|e| {
            GeneratorError::Decode(format!(
                "Failed to decode CodeGeneratorRequest (is this running as a protoc plugin?): {}",
                e
            ))
        })?;

        debug!(
            proto_files = request.proto_file.len(),
            files_to_generate = request.file_to_generate.len(),
            "decoded CodeGeneratorRequest"
        );

        Ok(Self::from_request(request))
    }

    /// Read a whole request from `reader` (normally stdin) and decode it
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an already decoded request
    pub fn from_request(request: CodeGeneratorRequest) -> Self {
        Self { request }
    }

    /// Names of the files protoc asked output for
    pub fn files_to_generate(&self) -> &[String] {
        &self.request.file_to_generate
    }

    /// All descriptors in the request, dependencies included
    pub fn proto_files(&self) -> &[FileDescriptorProto] {
        &self.request.proto_file
    }

    /// Raw plugin parameter string, empty when none was given
    pub fn parameter(&self) -> &str {
        self.request.parameter()
    }

    /// Generator configuration parsed from the plugin parameter
    pub fn config(&self) -> Result<GeneratorConfig> {
        config_from_parameter(self.parameter())
    }

    /// Version of the invoking protoc, formatted as `major.minor.patch[-suffix]`
    pub fn compiler_version(&self) -> Option<String> {
        self.request.compiler_version.as_ref().map(|v| {
            let mut version = format!("{}.{}.{}", v.major(), v.minor(), v.patch());
            if !v.suffix().is_empty() {
                version.push('-');
                version.push_str(v.suffix());
            }
            version
        })
    }
}
