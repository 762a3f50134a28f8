//! Rendering of the output model into TypeScript source

use crate::templates::{self, ts_ident, INTERFACES_TEMPLATE};
use protoc_gen_interfaces_common::{
    GeneratorConfig, GeneratorError, OutputFile, Primitive, ResolvedType, Result,
    WideRepresentation,
};
use serde::Serialize;
use tera::Tera;

/// A rendered source file, ready to be written or returned to protoc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Output path relative to the output root (e.g., "foo/bar.ts")
    pub name: String,
    pub content: String,
}

/// Turns one [`OutputFile`] into target-language source text
#[cfg_attr(test, mockall::automock)]
pub trait Renderer {
    fn render(&self, file: &OutputFile) -> Result<RenderedFile>;
}

/// Renders each type definition as an exported TypeScript interface
pub struct TypeScriptRenderer {
    tera: Tera,
    file_extension: String,
}

#[derive(Serialize)]
struct InterfaceContext<'a> {
    qualified_name: &'a str,
    fields: Vec<FieldContext<'a>>,
}

#[derive(Serialize)]
struct FieldContext<'a> {
    name: &'a str,
    ts_type: String,
}

impl TypeScriptRenderer {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            tera: templates::load_templates()?,
            file_extension: config.file_extension.clone(),
        })
    }
}

impl Renderer for TypeScriptRenderer {
    fn render(&self, file: &OutputFile) -> Result<RenderedFile> {
        let interfaces: Vec<InterfaceContext<'_>> = file
            .types
            .iter()
            .map(|definition| InterfaceContext {
                qualified_name: &definition.qualified_name,
                fields: definition
                    .fields
                    .iter()
                    .map(|field| FieldContext {
                        name: &field.name,
                        ts_type: ts_type(&field.resolved_type, &file.package),
                    })
                    .collect(),
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("source", &file.name);
        context.insert("package", &file.package);
        context.insert("interfaces", &interfaces);

        let rendered = self
            .tera
            .render(INTERFACES_TEMPLATE, &context)
            .map_err(|e| GeneratorError::Render(format!("Template error: {:?}", e)))?;

        let mut content = rendered.trim_end().to_string();
        content.push('\n');

        Ok(RenderedFile {
            name: output_file_name(&file.name, &self.file_extension),
            content,
        })
    }
}

/// Name of the generated file for a `.proto` path
///
/// A trailing `.proto` is replaced by `extension`; any other name gets
/// `extension` appended.
pub fn output_file_name(proto_name: &str, extension: &str) -> String {
    let stem = proto_name.strip_suffix(".proto").unwrap_or(proto_name);
    format!("{}.{}", stem, extension)
}

/// TypeScript spelling of a resolved type
///
/// `package` is the package of the file being rendered; references into it
/// are shortened to the local interface name.
pub fn ts_type(resolved: &ResolvedType, package: &str) -> String {
    match resolved {
        ResolvedType::Primitive(primitive) => match primitive {
            Primitive::Numeric => "number".to_string(),
            Primitive::WideInteger(WideRepresentation::ArbitraryPrecision) => "bigint".to_string(),
            Primitive::WideInteger(WideRepresentation::WordPair) => "[number, number]".to_string(),
            Primitive::Boolean => "boolean".to_string(),
            Primitive::Text => "string".to_string(),
            Primitive::Bytes => "Uint8Array".to_string(),
        },
        ResolvedType::Sequence(inner) => format!("Array<{}>", ts_type(inner, package)),
        ResolvedType::OpaqueReference(name) => reference_name(name, package),
    }
}

fn reference_name(name: &str, package: &str) -> String {
    let name = name.trim_start_matches('.');
    if name.is_empty() {
        return "unknown".to_string();
    }

    let local = if package.is_empty() {
        name
    } else {
        name.strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(name)
    };

    ts_ident(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoc_gen_interfaces_common::TypeDefinition;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("a.proto", "ts"), "a.ts");
        assert_eq!(output_file_name("foo/bar.proto", "d.ts"), "foo/bar.d.ts");
        assert_eq!(output_file_name("schema", "ts"), "schema.ts");
    }

    #[test]
    fn test_ts_type_primitives() {
        let p = |p| ResolvedType::Primitive(p);
        assert_eq!(ts_type(&p(Primitive::Numeric), ""), "number");
        assert_eq!(ts_type(&p(Primitive::Boolean), ""), "boolean");
        assert_eq!(ts_type(&p(Primitive::Text), ""), "string");
        assert_eq!(ts_type(&p(Primitive::Bytes), ""), "Uint8Array");
        assert_eq!(
            ts_type(
                &p(Primitive::WideInteger(WideRepresentation::ArbitraryPrecision)),
                ""
            ),
            "bigint"
        );
        assert_eq!(
            ts_type(&p(Primitive::WideInteger(WideRepresentation::WordPair)), ""),
            "[number, number]"
        );
    }

    #[test]
    fn test_ts_type_references() {
        let r = |n: &str| ResolvedType::OpaqueReference(n.to_string());
        assert_eq!(ts_type(&r(".pkg.Other"), "pkg"), "Other");
        assert_eq!(ts_type(&r(".pkg.Outer.Inner"), "pkg"), "Outer_Inner");
        assert_eq!(ts_type(&r(".other.Thing"), "pkg"), "other_Thing");
        assert_eq!(ts_type(&r(".pkgx.Thing"), "pkg"), "pkgx_Thing");
        assert_eq!(ts_type(&r(".Top"), ""), "Top");
        assert_eq!(ts_type(&r(""), "pkg"), "unknown");
        assert_eq!(
            ts_type(&r(".pkg.Other").into_sequence(), "pkg"),
            "Array<Other>"
        );
    }

    #[test]
    fn test_render_interfaces() {
        let renderer = TypeScriptRenderer::new(&GeneratorConfig::default()).unwrap();

        let mut outer = TypeDefinition::new("Outer", "Outer");
        outer.push_field(
            "tags",
            ResolvedType::Primitive(Primitive::Text).into_sequence(),
        );
        outer.push_field(
            "inner",
            ResolvedType::OpaqueReference(".shop.Outer.Inner".to_string()),
        );

        let mut file = OutputFile::new("shop/cart.proto").with_package("shop");
        file.push_type(outer);
        file.push_type(TypeDefinition::new("Inner", "Outer.Inner"));

        let rendered = renderer.render(&file).unwrap();
        assert_eq!(rendered.name, "shop/cart.ts");
        assert!(rendered.content.starts_with(
            "// Generated by protoc-gen-interfaces from shop/cart.proto. Do not edit.\n"
        ));
        assert!(rendered.content.contains("// Package: shop\n"));
        assert!(rendered.content.contains(
            "export interface Outer {\n  tags: Array<string>;\n  inner: Outer_Inner;\n}"
        ));
        assert!(rendered.content.contains("export interface Outer_Inner {\n}"));
        assert!(rendered.content.ends_with("}\n"));

        let outer_at = rendered.content.find("interface Outer ").unwrap();
        let inner_at = rendered.content.find("interface Outer_Inner ").unwrap();
        assert!(outer_at < inner_at);
    }

    #[test]
    fn test_render_without_package() {
        let renderer = TypeScriptRenderer::new(&GeneratorConfig::default()).unwrap();
        let file = OutputFile::new("empty.proto");

        let rendered = renderer.render(&file).unwrap();
        assert_eq!(
            rendered.content,
            "// Generated by protoc-gen-interfaces from empty.proto. Do not edit.\n"
        );
    }
}
