//! Plugin parameter parsing
//!
//! protoc passes everything given through `--<plugin>_opt` as one string,
//! options separated by commas. A backslash escapes the next character so
//! values may contain commas.

use protoc_gen_interfaces_common::{GeneratorConfig, GeneratorError, Result};

/// Split `s` on unescaped occurrences of `sep`, dropping empty pieces
pub fn split_escaped(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                current.push(escaped);
            }
        } else if ch == sep {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Build a [`GeneratorConfig`] from the plugin parameter string
///
/// Recognized options:
/// - `wide_integer_policy=native_numeric|arbitrary_precision|word_pair`
/// - `emit_dependencies[=true|false]`
/// - `validate[=true|false]`
/// - `file_extension=<ext>`
///
/// A bare key sets a boolean option to `true`. Unknown keys are an error.
pub fn config_from_parameter(parameter: &str) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::default();
    let mut unknown = Vec::new();

    for option in split_escaped(parameter, ',') {
        let (key, value) = match option.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim())),
            None => (option.as_str(), None),
        };

        match key {
            "wide_integer_policy" => {
                config.wide_integer_policy = required_value(key, value)?.parse()?;
            }
            "emit_dependencies" => config.emit_dependencies = parse_bool(key, value)?,
            "validate" => config.validate = parse_bool(key, value)?,
            "file_extension" => {
                config.file_extension = required_value(key, value)?
                    .trim_start_matches('.')
                    .to_string();
            }
            _ => unknown.push(option.clone()),
        }
    }

    if !unknown.is_empty() {
        return Err(GeneratorError::Options(format!(
            "unknown options: {}",
            unknown.join(", ")
        )));
    }

    Ok(config)
}

fn required_value<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GeneratorError::Options(format!("`{}` requires a value", key))),
    }
}

fn parse_bool(key: &str, value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(GeneratorError::Options(format!(
            "`{}` expects true or false, got `{}`",
            key, other
        ))),
    }
}
