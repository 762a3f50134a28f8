//! Input decoding for protoc-gen-interfaces
//!
//! This crate turns the bytes a generator receives into `prost_types`
//! descriptors and a
//! [`GeneratorConfig`](protoc_gen_interfaces_common::GeneratorConfig):
//!
//! - [`PluginRequest`]: a `CodeGeneratorRequest` read from protoc
//! - [`DescriptorSetParser`]: a `FileDescriptorSet` written by
//!   `protoc --descriptor_set_out`
//! - [`config_from_parameter`]: the `--<plugin>_opt` parameter string
//! - [`validate_descriptors`]: optional consistency check of a descriptor set

mod descriptor_set;
mod options;
mod request;
mod validate;

pub use descriptor_set::DescriptorSetParser;
pub use options::{config_from_parameter, split_escaped};
pub use request::PluginRequest;
pub use validate::validate_descriptors;
