//! Relationship inference
//!
//! Classifies the type references of one declaration into edges against the
//! completed name index. The rules are syntactic heuristics and language
//! agnostic; front ends only supply [`TypeReferences`].
//!
//! Rule order, each rule emitting independently:
//! 1. superclass (and extended interfaces) -> generalization
//! 2. implemented interfaces -> realization
//! 3. fields -> composition / aggregation / association
//! 4. optionally, parameter and return types -> dependency

use crate::identity::NameIndex;
use crate::model::{AccessModifier, Edge, EdgeKind, EdgeMultiplicity};
use std::collections::HashSet;

/// Type references of a single declaration, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeReferences {
    pub superclass: Option<String>,
    /// Interfaces an interface extends
    pub extended_interfaces: Vec<String>,
    /// Interfaces a class, enum or record implements
    pub implemented_interfaces: Vec<String>,
    pub fields: Vec<FieldReference>,
    /// Every type name appearing in a method or constructor parameter type
    pub parameter_types: Vec<String>,
    /// Every type name appearing in a method return type
    pub return_types: Vec<String>,
}

impl TypeReferences {
    /// Distinct referenced names in first-seen order
    pub fn referenced_type_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.superclass
            .iter()
            .chain(self.extended_interfaces.iter())
            .chain(self.implemented_interfaces.iter())
            .chain(self.fields.iter().flat_map(|f| f.type_names.iter()))
            .chain(self.parameter_types.iter())
            .chain(self.return_types.iter())
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }

    fn has_parameter_type(&self, name: &str) -> bool {
        self.parameter_types.iter().any(|p| p == name)
    }
}

/// One declared field (one per declarator)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference {
    pub name: String,
    pub access: AccessModifier,
    /// Declared type exactly as written
    pub raw_type: String,
    /// Type identifiers in the declared type; for generic types every nested argument
    pub type_names: Vec<String>,
}

/// Edge classifier for one run
pub struct RelationshipInference<'a> {
    index: &'a NameIndex,
    collection_markers: &'a [String],
    infer_dependencies: bool,
}

impl<'a> RelationshipInference<'a> {
    pub fn new(index: &'a NameIndex, collection_markers: &'a [String]) -> Self {
        Self {
            index,
            collection_markers,
            infer_dependencies: false,
        }
    }

    pub fn with_dependencies(mut self, infer_dependencies: bool) -> Self {
        self.infer_dependencies = infer_dependencies;
        self
    }

    /// Lexical to-many check on the raw declared type
    pub fn is_collection(&self, raw_type: &str) -> bool {
        self.collection_markers
            .iter()
            .any(|marker| raw_type.contains(marker.as_str()))
    }

    /// Whether any of `names` resolves to a node other than `from_id`
    ///
    /// When this is false, `infer` cannot produce an edge for the node.
    pub fn references_known_type(&self, from_id: &str, names: &[String]) -> bool {
        names.iter().any(|name| self.resolve(from_id, name).is_some())
    }

    /// All edges sourced from `from_id`
    pub fn infer(&self, from_id: &str, refs: &TypeReferences) -> Vec<Edge> {
        let mut edges = Vec::new();

        if let Some(superclass) = &refs.superclass {
            self.push_structural(&mut edges, from_id, superclass, EdgeKind::Generalization);
        }
        for interface in &refs.extended_interfaces {
            self.push_structural(&mut edges, from_id, interface, EdgeKind::Generalization);
        }
        for interface in &refs.implemented_interfaces {
            self.push_structural(&mut edges, from_id, interface, EdgeKind::Realization);
        }

        for field in &refs.fields {
            self.push_field_edges(&mut edges, from_id, field, refs);
        }

        if self.infer_dependencies {
            self.push_dependencies(&mut edges, from_id, refs);
        }

        edges
    }

    fn resolve(&self, from_id: &str, type_name: &str) -> Option<&'a str> {
        let to_id = self.index.resolve(simple_type_name(type_name))?;
        if to_id == from_id {
            return None;
        }
        Some(to_id)
    }

    fn push_structural(&self, edges: &mut Vec<Edge>, from_id: &str, type_name: &str, kind: EdgeKind) {
        if let Some(to_id) = self.resolve(from_id, type_name) {
            edges.push(Edge {
                kind,
                from_id: from_id.to_string(),
                to_id: to_id.to_string(),
                multiplicity: None,
                label: String::new(),
            });
        }
    }

    fn push_field_edges(
        &self,
        edges: &mut Vec<Edge>,
        from_id: &str,
        field: &FieldReference,
        refs: &TypeReferences,
    ) {
        let multiplicity = if self.is_collection(&field.raw_type) {
            EdgeMultiplicity::to_many()
        } else {
            EdgeMultiplicity::to_one()
        };

        // Map<Room, Room> yields one edge per distinct target
        let mut targets = HashSet::new();
        for type_name in &field.type_names {
            let Some(to_id) = self.resolve(from_id, type_name) else {
                continue;
            };
            if !targets.insert(to_id) {
                continue;
            }

            let kind = if field.access.is_encapsulated() {
                if refs.has_parameter_type(simple_type_name(type_name)) {
                    EdgeKind::Aggregation
                } else {
                    EdgeKind::Composition
                }
            } else {
                EdgeKind::Association
            };

            edges.push(Edge {
                kind,
                from_id: from_id.to_string(),
                to_id: to_id.to_string(),
                multiplicity: Some(multiplicity),
                label: field.name.clone(),
            });
        }
    }

    fn push_dependencies(&self, edges: &mut Vec<Edge>, from_id: &str, refs: &TypeReferences) {
        let mut covered: HashSet<String> = edges.iter().map(|e| e.to_id.clone()).collect();

        for type_name in refs.parameter_types.iter().chain(refs.return_types.iter()) {
            let Some(to_id) = self.resolve(from_id, type_name) else {
                continue;
            };
            if !covered.insert(to_id.to_string()) {
                continue;
            }
            edges.push(Edge {
                kind: EdgeKind::Dependency,
                from_id: from_id.to_string(),
                to_id: to_id.to_string(),
                multiplicity: None,
                label: String::new(),
            });
        }
    }
}

/// `java.util.List<Room>` -> `List`, `Base<T>` -> `Base`, `Room[]` -> `Room`
pub fn simple_type_name(raw: &str) -> &str {
    let without_args = raw.split('<').next().unwrap_or(raw);
    let without_dims = without_args.split('[').next().unwrap_or(without_args);
    let trimmed = without_dims.trim();
    trimmed.rsplit('.').next().unwrap_or(trimmed).trim()
}
