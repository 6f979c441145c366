// Strongly-typed schema model for codegen. No serde_json::Value here:
// composite bodies live in the registry arena and a `TypeNode` refers to
// them by id, never by an owning subtree.

use serde::Serialize;

/// Index of a registered composite within one `TypeRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypeId(pub usize);

/// Semantic primitive kinds a raw scalar can classify to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarKind {
    Boolean,
    /// Fits a 32-bit signed integer by magnitude.
    Integer32,
    Integer64,
    Text,
    /// Null, or any node shape with no better classification.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeNode {
    Scalar(ScalarKind),
    /// Homogeneous sequence; element type comes from the first sampled
    /// element, `Scalar(Opaque)` when the array was empty.
    List(Box<TypeNode>),
    /// Reference to a registered composite.
    Composite(TypeId),
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    /// Raw document key, preserved for the wire-format annotation.
    pub external_key: String,
    /// Normalized identifier (field-name form).
    pub local_name: String,
    pub ty: TypeNode,
}

/// A named record type with an ordered field list.
#[derive(Debug, Clone, Serialize)]
pub struct Composite {
    pub name: String,
    /// Document key order; must survive through emission.
    pub fields: Vec<Field>,
    /// Nested composites, kept for source-emission nesting. The registry
    /// still holds every composite as its own flat entry.
    pub children: Vec<TypeId>,
}
