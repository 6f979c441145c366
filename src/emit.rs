//! Rust source emission over a populated registry.
//!
//! Mechanical collaborator: walks entries in registration order, one module
//! per namespace, one serde-annotated struct per composite. External keys are
//! preserved as `#[serde(rename = ...)]` wire annotations. Duplicate names in
//! one namespace come out as duplicate declarations, exactly as registered.

use std::fmt::Write;

use crate::ir::{Composite, ScalarKind, TypeNode};
use crate::registry::TypeRegistry;

pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        let mut out = String::new();
        out.push_str("// Generated by json2record. Do not edit by hand.\n");
        out.push_str("#![allow(non_snake_case)]\n\n");
        out.push_str("use serde::{Deserialize, Serialize};\n");
        Self { out }
    }

    /// Render every namespace of the registry, insertion order throughout.
    pub fn emit_registry(&mut self, registry: &TypeRegistry) {
        for (namespace, composites) in registry.by_namespace() {
            let _ = writeln!(self.out, "\npub mod {} {{", module_ident(namespace));
            self.out.push_str("    use super::*;\n");
            for composite in composites {
                self.emit_composite(registry, composite);
            }
            self.out.push_str("}\n");
        }
    }

    fn emit_composite(&mut self, registry: &TypeRegistry, composite: &Composite) {
        let _ = writeln!(
            self.out,
            "\n    #[derive(Debug, Clone, Serialize, Deserialize)]"
        );
        if composite.fields.is_empty() {
            let _ = writeln!(self.out, "    pub struct {} {{}}", composite.name);
            return;
        }
        let _ = writeln!(self.out, "    pub struct {} {{", composite.name);
        for field in &composite.fields {
            let _ = writeln!(self.out, "        #[serde(rename = {:?})]", field.external_key);
            let _ = writeln!(
                self.out,
                "        pub {}: {},",
                field_ident(&field.local_name),
                render_type(registry, &field.ty)
            );
        }
        self.out.push_str("    }\n");
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

fn render_type(registry: &TypeRegistry, node: &TypeNode) -> String {
    match node {
        TypeNode::Scalar(kind) => scalar_type(*kind).to_owned(),
        TypeNode::List(item) => format!("Vec<{}>", render_type(registry, item)),
        TypeNode::Composite(id) => registry.get(*id).name.clone(),
    }
}

fn scalar_type(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Boolean => "bool",
        ScalarKind::Integer32 => "i32",
        ScalarKind::Integer64 => "i64",
        ScalarKind::Text => "String",
        ScalarKind::Opaque => "serde_json::Value",
    }
}

/// Normalized field names are already identifier-shaped except for Rust
/// keywords and digit-leading keys.
fn field_ident(name: &str) -> String {
    match name {
        "" => "field".to_owned(),
        // not expressible as raw identifiers
        "self" | "Self" | "super" | "crate" => format!("{name}_"),
        _ if name.starts_with(|c: char| c.is_ascii_digit()) => format!("_{name}"),
        _ if is_keyword(name) => format!("r#{name}"),
        _ => name.to_owned(),
    }
}

fn module_ident(namespace: &str) -> String {
    let cleaned: String = namespace
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    field_ident(&cleaned)
}

fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "async" | "await" | "break" | "const" | "continue" | "dyn" | "else" | "enum"
            | "extern" | "false" | "fn" | "for" | "if" | "impl" | "in" | "let" | "loop"
            | "match" | "mod" | "move" | "mut" | "pub" | "ref" | "return" | "static"
            | "struct" | "trait" | "true" | "type" | "unsafe" | "use" | "where" | "while"
    )
}

// ------------------------------- Tests ------------------------------------ //
