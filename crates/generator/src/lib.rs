//! Descriptor-to-type mapping and file assembly for protoc-gen-interfaces
//!
//! The core of the generator is a pure walk over `prost_types` descriptors:
//!
//! - [`resolve_scalar`] maps a protobuf field kind to a [`ResolvedType`]
//! - [`resolve_field`] adds repetition on top of the scalar mapping
//! - [`assemble_message`] builds one [`TypeDefinition`] per message and
//!   recurses into nested messages
//! - [`assemble_file`] / [`assemble_files`] / [`assemble_requested`] build one
//!   [`OutputFile`] per descriptor
//!
//! None of these fail: anything not recognized becomes an opaque reference.
//! [`Generator`] wraps the core with the optional validation pass and a
//! [`Renderer`] that turns the model into source text.
//!
//! [`ResolvedType`]: protoc_gen_interfaces_common::ResolvedType
//! [`TypeDefinition`]: protoc_gen_interfaces_common::TypeDefinition

mod assemble;
mod field;
mod render;
mod scalar;
mod templates;

pub use assemble::{assemble_file, assemble_files, assemble_message, assemble_requested};
pub use field::resolve_field;
pub use render::{output_file_name, ts_type, RenderedFile, Renderer, TypeScriptRenderer};
pub use scalar::resolve_scalar;

use prost_types::FileDescriptorProto;
use protoc_gen_interfaces_common::{GeneratorConfig, GeneratorError, OutputFile, Result};
use protoc_gen_interfaces_parser::validate_descriptors;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Plugin-level driver
///
/// Applies the configuration (validation, target selection) around the
/// assembly core and hands each [`OutputFile`] to the renderer.
pub struct Generator<R = TypeScriptRenderer> {
    config: GeneratorConfig,
    renderer: R,
}

impl Generator<TypeScriptRenderer> {
    /// Create a generator that renders TypeScript interfaces
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let renderer = TypeScriptRenderer::new(&config)?;
        Ok(Self { config, renderer })
    }
}

impl<R: Renderer> Generator<R> {
    /// Create a generator with a custom renderer
    pub fn with_renderer(config: GeneratorConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Build the output model for a request
    ///
    /// Only files named in `files_to_generate` produce output unless
    /// `emit_dependencies` is set. With `validate` set, the whole descriptor
    /// set is checked first.
    pub fn assemble(
        &self,
        files: &[FileDescriptorProto],
        files_to_generate: &[String],
    ) -> Result<Vec<OutputFile>> {
        if self.config.validate {
            validate_descriptors(files)?;
        }

        let outputs = if self.config.emit_dependencies {
            assemble_files(files, &self.config)
        } else {
            assemble_requested(files, files_to_generate, &self.config)
        };

        info!(
            descriptors = files.len(),
            outputs = outputs.len(),
            "assembled request"
        );
        Ok(outputs)
    }

    /// Assemble and render a request
    pub fn generate(
        &self,
        files: &[FileDescriptorProto],
        files_to_generate: &[String],
    ) -> Result<Vec<RenderedFile>> {
        self.assemble(files, files_to_generate)?
            .iter()
            .map(|output| self.renderer.render(output))
            .collect()
    }

    /// Assemble, render and write every file below `output_dir`
    ///
    /// Returns the paths written, in generation order.
    pub fn generate_to_directory(
        &self,
        files: &[FileDescriptorProto],
        files_to_generate: &[String],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir).map_err(|e| {
            GeneratorError::Render(format!("Failed to create output directory: {}", e))
        })?;

        let mut written = Vec::new();
        for rendered in self.generate(files, files_to_generate)? {
            let output_path = output_dir.join(&rendered.name);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    GeneratorError::Render(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }

            fs::write(&output_path, &rendered.content).map_err(|e| {
                GeneratorError::Render(format!("Failed to write {}: {}", rendered.name, e))
            })?;
            written.push(output_path);
        }

        Ok(written)
    }
}
