//! Generator configuration
//!
//! Configuration reaches the generator either as the protoc plugin parameter
//! string (see the parser crate) or as a YAML file loaded with
//! [`GeneratorConfig::load`].

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// How 64-bit integer kinds (int64, uint64, sint64, fixed64, sfixed64) resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WideIntegerPolicy {
    /// Same numeric primitive as 32-bit kinds; values beyond 2^53 lose precision
    #[default]
    NativeNumeric,
    /// Arbitrary-precision integer type
    ArbitraryPrecision,
    /// Pair of 32-bit words
    WordPair,
}

impl FromStr for WideIntegerPolicy {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "native_numeric" => Ok(WideIntegerPolicy::NativeNumeric),
            "arbitrary_precision" => Ok(WideIntegerPolicy::ArbitraryPrecision),
            "word_pair" => Ok(WideIntegerPolicy::WordPair),
            other => Err(GeneratorError::Options(format!(
                "unknown wide_integer_policy `{}` (expected native_numeric, arbitrary_precision or word_pair)",
                other
            ))),
        }
    }
}

impl fmt::Display for WideIntegerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WideIntegerPolicy::NativeNumeric => "native_numeric",
            WideIntegerPolicy::ArbitraryPrecision => "arbitrary_precision",
            WideIntegerPolicy::WordPair => "word_pair",
        };
        f.write_str(s)
    }
}

/// Options that shape type resolution and output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Representation of 64-bit integer kinds
    pub wide_integer_policy: WideIntegerPolicy,

    /// Generate output for every descriptor in the request, not only the
    /// files protoc asked for
    pub emit_dependencies: bool,

    /// Run the descriptor validation pass before assembly
    pub validate: bool,

    /// Extension of rendered files, without the leading dot
    pub file_extension: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            wide_integer_policy: WideIntegerPolicy::default(),
            emit_dependencies: false,
            validate: false,
            file_extension: "ts".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Options(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml_str(&content).map_err(|e| {
            GeneratorError::Options(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }

    /// Parse configuration from YAML text; missing keys take their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.wide_integer_policy, WideIntegerPolicy::NativeNumeric);
        assert!(!config.emit_dependencies);
        assert!(!config.validate);
        assert_eq!(config.file_extension, "ts");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "word_pair".parse::<WideIntegerPolicy>().unwrap(),
            WideIntegerPolicy::WordPair
        );
        assert_eq!(
            "arbitrary_precision".parse::<WideIntegerPolicy>().unwrap(),
            WideIntegerPolicy::ArbitraryPrecision
        );
        assert!("long".parse::<WideIntegerPolicy>().is_err());
        assert_eq!(WideIntegerPolicy::WordPair.to_string(), "word_pair");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = GeneratorConfig::from_yaml_str("wide_integer_policy: arbitrary_precision\n")
            .unwrap();
        assert_eq!(
            config.wide_integer_policy,
            WideIntegerPolicy::ArbitraryPrecision
        );
        assert_eq!(config.file_extension, "ts");
        assert!(!config.validate);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "validate: true").unwrap();
        writeln!(file, "emit_dependencies: true").unwrap();
        writeln!(file, "file_extension: d.ts").unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert!(config.validate);
        assert!(config.emit_dependencies);
        assert_eq!(config.file_extension, "d.ts");
    }

    #[test]
    fn test_load_missing_file() {
        let result = GeneratorConfig::load(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(GeneratorError::Options(_))));
    }
}
