//! Common types and utilities for protoc-gen-interfaces
//!
//! This crate contains the output model produced by the generator core,
//! the generator configuration, and the error type shared by the parser,
//! generator, and CLI components.

pub mod config;
pub mod model;

pub use config::{GeneratorConfig, WideIntegerPolicy};
pub use model::{
    FieldSpec, OutputFile, Primitive, ResolvedType, TypeDefinition, WideRepresentation,
};

use thiserror::Error;

/// Errors that can occur at the boundaries of code generation
///
/// Type resolution and file assembly never fail; these variants cover
/// decoding, option parsing, validation, and rendering.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid plugin option: {0}")]
    Options(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::Options("unknown key `foo`".to_string());
        assert_eq!(err.to_string(), "Invalid plugin option: unknown key `foo`");

        let err = GeneratorError::Decode("truncated".to_string());
        assert_eq!(err.to_string(), "Decode error: truncated");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GeneratorError = io.into();
        assert!(matches!(err, GeneratorError::Io(_)));
    }
}
