//! Recursive schema synthesis from a single sample document.
//!
//! One JSON sample is the sole evidence for a type's shape: object keys
//! become fields in document key order, nested objects become sibling
//! composites referenced by id, and only the first element of an array is
//! ever inspected. There is no cross-sample widening; every synthesis call
//! produces its own final tree.

pub mod scalar;
pub mod variant;

use serde_json::Value;

use crate::ir::{Composite, Field, ScalarKind, TypeId, TypeNode};
use crate::naming;
use crate::registry::TypeRegistry;

pub use scalar::classify;

/// Walks one sample and registers every composite it produces (nested ones
/// included) under a single namespace in a caller-owned registry.
pub struct Synthesizer<'a> {
    registry: &'a mut TypeRegistry,
    namespace: &'a str,
}

impl<'a> Synthesizer<'a> {
    pub fn new(registry: &'a mut TypeRegistry, namespace: &'a str) -> Self {
        Self { registry, namespace }
    }

    /// Synthesize a composite for `value` under `desired_name` and return its
    /// registry id.
    ///
    /// The root is always treated as an object; a non-object root yields an
    /// empty composite. Children register post-order, so a nested composite
    /// always has a lower id than its parent.
    pub fn synthesize(&mut self, value: &Value, desired_name: &str) -> TypeId {
        let mut fields = Vec::new();
        let mut children = Vec::new();

        if let Value::Object(map) = value {
            for (key, val) in map {
                let ty = match val {
                    Value::Object(_) => {
                        let child = self.synthesize(val, &naming::type_name(key));
                        children.push(child);
                        TypeNode::Composite(child)
                    }
                    Value::Array(items) => match items.first() {
                        Some(first @ Value::Object(_)) => {
                            // The first element is the representative sample;
                            // later elements are never inspected.
                            let child = self.synthesize(first, &naming::type_name(key));
                            children.push(child);
                            TypeNode::List(Box::new(TypeNode::Composite(child)))
                        }
                        Some(first) => {
                            TypeNode::List(Box::new(TypeNode::Scalar(classify(first))))
                        }
                        None => TypeNode::List(Box::new(TypeNode::Scalar(ScalarKind::Opaque))),
                    },
                    _ => TypeNode::Scalar(classify(val)),
                };
                fields.push(Field {
                    external_key: key.clone(),
                    local_name: naming::field_name(key),
                    ty,
                });
            }
        }

        self.registry.register(
            self.namespace,
            Composite {
                name: desired_name.to_owned(),
                fields,
                children,
            },
        )
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn synth_one(value: &Value, name: &str) -> (TypeRegistry, TypeId) {
        let mut reg = TypeRegistry::new();
        let root = Synthesizer::new(&mut reg, "response").synthesize(value, name);
        (reg, root)
    }

    #[test]
    fn field_count_order_and_external_keys_match_the_document() {
        let sample = json!({"zeta": 1, "alpha": "x", "user_id": true});
        let (reg, root) = synth_one(&sample, "Sample");
        let composite = reg.get(root);
        assert_eq!(composite.fields.len(), 3);
        let keys: Vec<_> = composite
            .fields
            .iter()
            .map(|f| f.external_key.as_str())
            .collect();
        assert_eq!(keys, ["zeta", "alpha", "user_id"]);
        assert_eq!(composite.fields[2].local_name, "userId");
    }

    #[test]
    fn empty_array_infers_opaque_elements() {
        let sample = json!({"sort": []});
        let (reg, root) = synth_one(&sample, "Sample");
        assert_eq!(
            reg.get(root).fields[0].ty,
            TypeNode::List(Box::new(TypeNode::Scalar(ScalarKind::Opaque)))
        );
    }

    #[test]
    fn array_schema_comes_from_the_first_element_only() {
        let sample = json!({"items": [{"a": 1, "b": 2}, {"a": 1, "b": 2, "c": 3}]});
        let (reg, root) = synth_one(&sample, "Sample");
        let composite = reg.get(root);
        let items = match &composite.fields[0].ty {
            TypeNode::List(item) => match item.as_ref() {
                TypeNode::Composite(id) => reg.get(*id),
                other => panic!("expected composite element, got {other:?}"),
            },
            other => panic!("expected list, got {other:?}"),
        };
        let keys: Vec<_> = items.fields.iter().map(|f| f.external_key.as_str()).collect();
        assert_eq!(keys, ["a", "b"], "second element's extra key must not leak in");
    }

    #[test]
    fn arrays_of_scalars_classify_their_first_element() {
        let sample = json!({"tags": ["a", "b"], "levels": [1, 2], "nested": [[1], [2]]});
        let (reg, root) = synth_one(&sample, "Sample");
        let tys: Vec<_> = reg.get(root).fields.iter().map(|f| &f.ty).collect();
        assert_eq!(
            *tys[0],
            TypeNode::List(Box::new(TypeNode::Scalar(ScalarKind::Text)))
        );
        assert_eq!(
            *tys[1],
            TypeNode::List(Box::new(TypeNode::Scalar(ScalarKind::Integer32)))
        );
        // array-of-arrays has no object sample to recurse into
        assert_eq!(
            *tys[2],
            TypeNode::List(Box::new(TypeNode::Scalar(ScalarKind::Opaque)))
        );
    }

    #[test]
    fn non_object_root_yields_an_empty_composite() {
        let (reg, root) = synth_one(&json!([1, 2, 3]), "Odd");
        assert!(reg.get(root).fields.is_empty());
        assert_eq!(reg.get(root).name, "Odd");
    }

    #[test]
    fn nested_composites_register_as_siblings_post_order() {
        let sample = json!({"data": {"meta": {"page": 1}}});
        let (reg, root) = synth_one(&sample, "Response");
        let names: Vec<_> = reg.entries().map(|e| e.composite.name.as_str()).collect();
        assert_eq!(names, ["Meta", "Data", "Response"]);
        assert_eq!(root, TypeId(2));
        // field holds a reference, not an embedded subtree
        assert_eq!(reg.get(root).fields[0].ty, TypeNode::Composite(TypeId(1)));
        assert_eq!(reg.get(root).children, vec![TypeId(1)]);
    }

    /// The acceptance sample: a wrapped paged response with an empty sort.
    #[test]
    fn paged_response_sample() {
        let sample = json!({
            "code": 0,
            "message": "ok",
            "data": {
                "items": [{"id": "1", "name": "x"}],
                "meta": {"page": 1},
                "sort": []
            }
        });
        let (reg, root) = synth_one(&sample, "Response");

        let response = reg.get(root);
        assert_eq!(response.name, "Response");
        assert_eq!(response.fields[0].ty, TypeNode::Scalar(ScalarKind::Integer32));
        assert_eq!(response.fields[1].ty, TypeNode::Scalar(ScalarKind::Text));
        let data_id = match response.fields[2].ty {
            TypeNode::Composite(id) => id,
            ref other => panic!("data should be a composite ref, got {other:?}"),
        };

        let data = reg.get(data_id);
        assert_eq!(data.name, "Data");
        let field_names: Vec<_> = data.fields.iter().map(|f| f.local_name.as_str()).collect();
        assert_eq!(field_names, ["items", "meta", "sort"]);
        assert_eq!(
            data.fields[2].ty,
            TypeNode::List(Box::new(TypeNode::Scalar(ScalarKind::Opaque)))
        );

        let items_id = match data.fields[0].ty {
            TypeNode::List(ref item) => match **item {
                TypeNode::Composite(id) => id,
                ref other => panic!("items element should be composite, got {other:?}"),
            },
            ref other => panic!("items should be a list, got {other:?}"),
        };
        let items = reg.get(items_id);
        assert_eq!(items.name, "Items");
        assert_eq!(items.fields[0].ty, TypeNode::Scalar(ScalarKind::Text));
        assert_eq!(items.fields[1].ty, TypeNode::Scalar(ScalarKind::Text));

        let meta_id = match data.fields[1].ty {
            TypeNode::Composite(id) => id,
            ref other => panic!("meta should be a composite ref, got {other:?}"),
        };
        let meta = reg.get(meta_id);
        assert_eq!(meta.name, "Meta");
        assert_eq!(meta.fields[0].external_key, "page");
        assert_eq!(meta.fields[0].ty, TypeNode::Scalar(ScalarKind::Integer32));
    }
}
