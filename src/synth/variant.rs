//! Variant naming for discriminated event envelopes.
//!
//! Event documentation shows a group of envelope samples that all share one
//! wrapper shape; a discriminant field at a fixed location selects which
//! variant payload follows. The resolver only picks the variant's type name;
//! synthesis of the envelope itself is the ordinary recursive walk.

use serde_json::Value;

use crate::ir::{Composite, TypeId};
use crate::naming;
use crate::registry::TypeRegistry;
use crate::synth::Synthesizer;

/// Where the discriminant lives inside an envelope.
pub const DISCRIMINANT_POINTER: &str = "/d/extra/type";

/// Resolve the type name for one envelope's variant.
///
/// Textual discriminants normalize to a type name. Numeric ones append their
/// literal digits to the group name, which is distinguishable but not
/// descriptive. An absent discriminant falls back to the group name itself;
/// any other shape falls back to the node's raw JSON text.
pub fn resolve_variant_name(envelope: &Value, group_name: &str, pointer: &str) -> String {
    match envelope.pointer(pointer) {
        Some(Value::String(s)) => naming::type_name(s),
        Some(Value::Number(n)) => format!("{group_name}{n}"),
        Some(other) => other.to_string(),
        None => group_name.to_owned(),
    }
}

/// Synthesize every envelope of one document group and register a group-level
/// composite named `{group_name}Event` whose children are the variants.
pub fn synthesize_group(
    registry: &mut TypeRegistry,
    namespace: &str,
    group_name: &str,
    pointer: &str,
    envelopes: &[Value],
) -> TypeId {
    let mut children = Vec::new();
    {
        let mut synth = Synthesizer::new(registry, namespace);
        for envelope in envelopes {
            let name = resolve_variant_name(envelope, group_name, pointer);
            children.push(synth.synthesize(envelope, &name));
        }
    }
    registry.register(
        namespace,
        Composite {
            name: format!("{group_name}Event"),
            fields: Vec::new(),
            children,
        },
    )
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn textual_discriminant_normalizes() {
        let envelope = json!({"d": {"extra": {"type": "text_message"}}});
        assert_eq!(
            resolve_variant_name(&envelope, "Message", DISCRIMINANT_POINTER),
            "TextMessage"
        );
    }

    #[test]
    fn numeric_discriminant_concatenates_literal_digits() {
        let envelope = json!({"d": {"extra": {"type": 5}}});
        assert_eq!(
            resolve_variant_name(&envelope, "Message", DISCRIMINANT_POINTER),
            "Message5"
        );
    }

    #[test]
    fn absent_discriminant_falls_back_to_the_group_name() {
        let envelope = json!({"d": {"extra": {}}});
        assert_eq!(
            resolve_variant_name(&envelope, "Guild", DISCRIMINANT_POINTER),
            "Guild"
        );
    }

    #[test]
    fn other_shapes_fall_back_to_raw_text() {
        let envelope = json!({"d": {"extra": {"type": true}}});
        assert_eq!(
            resolve_variant_name(&envelope, "Guild", DISCRIMINANT_POINTER),
            "true"
        );
    }

    #[test]
    fn group_composite_collects_variants_as_children() {
        let envelopes = vec![
            json!({"s": 0, "d": {"extra": {"type": "added_reaction"}}}),
            json!({"s": 0, "d": {"extra": {"type": 9}}}),
        ];
        let mut reg = TypeRegistry::new();
        let group = synthesize_group(
            &mut reg,
            "event",
            "Channel",
            DISCRIMINANT_POINTER,
            &envelopes,
        );
        let composite = reg.get(group);
        assert_eq!(composite.name, "ChannelEvent");
        assert!(composite.fields.is_empty());
        assert_eq!(composite.children.len(), 2);
        let variant_names: Vec<_> = composite
            .children
            .iter()
            .map(|id| reg.get(*id).name.as_str())
            .collect();
        assert_eq!(variant_names, ["AddedReaction", "Channel9"]);
    }
}
