//! Template loading and management

use protoc_gen_interfaces_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

pub const INTERFACES_TEMPLATE: &str = "interfaces.ts";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("ts_ident", ts_ident_filter);

    tera.add_raw_template(
        INTERFACES_TEMPLATE,
        include_str!("../templates/interfaces.ts.tera"),
    )
    .map_err(|e| {
        GeneratorError::Render(format!("Failed to load interfaces.ts template: {}", e))
    })?;

    Ok(tera)
}

/// Turn a dotted protobuf name into a single TypeScript identifier
///
/// `Outer.Inner` becomes `Outer_Inner`, so flattened nested types keep
/// distinct names.
pub fn ts_ident(name: &str) -> String {
    name.trim_start_matches('.').replace('.', "_")
}

/// Filter form of [`ts_ident`]
fn ts_ident_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let name = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("ts_ident filter expects a string"))?;

    Ok(Value::String(ts_ident(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_ident() {
        assert_eq!(ts_ident("Point"), "Point");
        assert_eq!(ts_ident("Outer.Inner"), "Outer_Inner");
        assert_eq!(ts_ident(".pkg.Other"), "pkg_Other");
    }

    #[test]
    fn test_ts_ident_filter_rejects_non_string() {
        let result = ts_ident_filter(&Value::Bool(true), &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_templates() {
        let tera = load_templates().unwrap();
        assert!(tera.get_template_names().any(|n| n == INTERFACES_TEMPLATE));
    }
}
