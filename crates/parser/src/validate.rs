//! Descriptor validation
//!
//! Assembly trusts its input. When descriptors come from somewhere other
//! than protoc, this pass rebuilds them into a `prost_reflect::DescriptorPool`,
//! which rejects duplicate names, dangling type references and missing
//! imports before any output is produced.

use prost_reflect::DescriptorPool;
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use protoc_gen_interfaces_common::{GeneratorError, Result};
use tracing::debug;

/// Check that `files` form a consistent, self-contained descriptor set
pub fn validate_descriptors(files: &[FileDescriptorProto]) -> Result<()> {
    let set = FileDescriptorSet {
        file: files.to_vec(),
    };

    let pool = DescriptorPool::from_file_descriptor_set(set)
        .map_err(|e| GeneratorError::Validation(e.to_string()))?;

    debug!(
        files = pool.files().len(),
        messages = pool.all_messages().count(),
        "descriptor set validated"
    );

    Ok(())
}
