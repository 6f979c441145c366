//! Append-only registry of synthesized composites.
//!
//! One registry spans one generation run. It is owned by the caller and
//! threaded through every synthesis call; entries accumulate monotonically
//! and are final once inserted. There is no update, delete, or merging of
//! independently synthesized samples.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::ir::{Composite, TypeId, TypeNode};

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub namespace: String,
    pub composite: Composite,
}

#[derive(Debug, Default, Serialize)]
pub struct TypeRegistry {
    entries: Vec<Entry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a composite under `namespace` and return its arena id.
    ///
    /// A name that already exists in the same namespace is a latent duplicate
    /// declaration; it is logged and kept, so emission reproduces it visibly
    /// rather than silently renaming or merging.
    pub fn register(&mut self, namespace: &str, composite: Composite) -> TypeId {
        let duplicate = self
            .entries
            .iter()
            .any(|e| e.namespace == namespace && e.composite.name == composite.name);
        if duplicate {
            warn!(
                namespace,
                name = %composite.name,
                "duplicate type name in namespace; it will be declared twice"
            );
        }
        let id = TypeId(self.entries.len());
        self.entries.push(Entry {
            namespace: namespace.to_owned(),
            composite,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: TypeId) -> &Composite {
        &self.entries[id.0].composite
    }

    /// All entries, insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entries grouped by namespace; namespaces appear in first-registration
    /// order, composites in insertion order within each group.
    pub fn by_namespace(&self) -> IndexMap<&str, Vec<&Composite>> {
        let mut out: IndexMap<&str, Vec<&Composite>> = IndexMap::new();
        for e in &self.entries {
            out.entry(e.namespace.as_str()).or_default().push(&e.composite);
        }
        out
    }

    /// Append every entry of `other`, remapping its ids past our tail.
    ///
    /// Used by the parallel batch path: each document synthesizes into its own
    /// registry, then the parts are absorbed in document processing order, so
    /// emission stays byte-identical to a sequential run.
    pub fn absorb(&mut self, other: TypeRegistry) {
        let base = self.entries.len();
        for mut entry in other.entries {
            shift_composite(&mut entry.composite, base);
            self.entries.push(entry);
        }
    }
}

fn shift_composite(composite: &mut Composite, base: usize) {
    for child in &mut composite.children {
        child.0 += base;
    }
    for field in &mut composite.fields {
        shift_node(&mut field.ty, base);
    }
}

fn shift_node(node: &mut TypeNode, base: usize) {
    match node {
        TypeNode::Composite(id) => id.0 += base,
        TypeNode::List(item) => shift_node(item, base),
        TypeNode::Scalar(_) => {}
    }
}

// ------------------------------- Tests ------------------------------------ //
