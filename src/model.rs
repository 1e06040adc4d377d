// Classgraph Diagram Model
//
// All data structures handed to external collaborators: the Diagram and its
// nodes, members and edges. Everything here is plain data with serde support.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The result of one extraction run
///
/// Produced once per run and never mutated afterwards. Owns its nodes and edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Diagram {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Assemble a diagram from all nodes and the concatenated per-node edge lists
    pub fn assemble(nodes: Vec<Node>, edges: Vec<Vec<Edge>>) -> Self {
        Self {
            nodes,
            edges: edges.into_iter().flatten().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Edges leaving the given node, in emission order
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.from_id == id)
    }
}

/// One extracted type declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Qualified name (`package.Name`) or a fallback UUID when no package is declared
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub properties: Vec<Property>,
    pub operations: Vec<Operation>,
    pub enumeration_literals: Vec<String>,
    pub comment: String,
}

impl Node {
    /// A node with no members; `id` is assigned later by the identity resolver
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            kind,
            properties: Vec::new(),
            operations: Vec::new(),
            enumeration_literals: Vec::new(),
            comment: String::new(),
        }
    }
}

/// Node kinds of a UML class diagram
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Class,
    AbstractClass,
    Interface,
    Enumeration,
    DataType,
    PrimitiveType,
    Package,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Class => write!(f, "class"),
            NodeKind::AbstractClass => write!(f, "abstract-class"),
            NodeKind::Interface => write!(f, "interface"),
            NodeKind::Enumeration => write!(f, "enumeration"),
            NodeKind::DataType => write!(f, "data-type"),
            NodeKind::PrimitiveType => write!(f, "primitive-type"),
            NodeKind::Package => write!(f, "package"),
        }
    }
}

/// Member visibility
///
/// Package-private is Java's default when no modifier is written and
/// serializes as an empty string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum AccessModifier {
    #[serde(rename = "public")]
    Public,
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "protected")]
    Protected,
    #[default]
    #[serde(rename = "")]
    PackagePrivate,
}

impl AccessModifier {
    /// UML visibility marker
    pub fn uml_symbol(&self) -> &'static str {
        match self {
            AccessModifier::Public => "+",
            AccessModifier::Private => "-",
            AccessModifier::Protected => "#",
            AccessModifier::PackagePrivate => "~",
        }
    }

    /// Private and protected members are encapsulated; they drive the
    /// composition/aggregation split
    pub fn is_encapsulated(&self) -> bool {
        matches!(self, AccessModifier::Private | AccessModifier::Protected)
    }
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessModifier::Public => write!(f, "public"),
            AccessModifier::Private => write!(f, "private"),
            AccessModifier::Protected => write!(f, "protected"),
            AccessModifier::PackagePrivate => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    /// Raw textual type signature, e.g. `List<Room>`
    #[serde(rename = "type")]
    pub type_name: String,
    pub access_modifier: AccessModifier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    pub return_type: String,
    pub access_modifier: AccessModifier,
    pub parameters: Vec<Attribute>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Relationship kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Association,
    Aggregation,
    Composition,
    Generalization,
    Realization,
    Dependency,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Association => write!(f, "association"),
            EdgeKind::Aggregation => write!(f, "aggregation"),
            EdgeKind::Composition => write!(f, "composition"),
            EdgeKind::Generalization => write!(f, "generalization"),
            EdgeKind::Realization => write!(f, "realization"),
            EdgeKind::Dependency => write!(f, "dependency"),
        }
    }
}

/// One inferred relationship between two nodes of the same diagram
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub kind: EdgeKind,
    pub from_id: String,
    pub to_id: String,
    /// Only field-based edges carry multiplicity
    pub multiplicity: Option<EdgeMultiplicity>,
    pub label: String,
}

/// Both ends of a field-based edge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EdgeMultiplicity {
    pub source: Multiplicity,
    pub target: Multiplicity,
}

impl EdgeMultiplicity {
    pub fn to_one() -> Self {
        Self {
            source: Multiplicity::ONE,
            target: Multiplicity::ONE,
        }
    }

    pub fn to_many() -> Self {
        Self {
            source: Multiplicity::ONE,
            target: Multiplicity::MANY,
        }
    }
}

/// A `{lower, upper}` multiplicity range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Multiplicity {
    pub lower: u32,
    pub upper: UpperBound,
}

impl Multiplicity {
    pub const ONE: Multiplicity = Multiplicity {
        lower: 1,
        upper: UpperBound::Bounded(1),
    };
    pub const MANY: Multiplicity = Multiplicity {
        lower: 0,
        upper: UpperBound::Unbounded,
    };

    pub fn is_many(&self) -> bool {
        match self.upper {
            UpperBound::Unbounded => true,
            UpperBound::Bounded(n) => n > 1,
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            UpperBound::Bounded(upper) if upper == self.lower => write!(f, "{}", upper),
            UpperBound::Bounded(upper) => write!(f, "{}..{}", self.lower, upper),
            UpperBound::Unbounded => write!(f, "{}..*", self.lower),
        }
    }
}

/// Upper end of a multiplicity; serializes as a number or `"*"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpperBound {
    Bounded(u32),
    Unbounded,
}

impl Serialize for UpperBound {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UpperBound::Bounded(n) => serializer.serialize_u32(*n),
            UpperBound::Unbounded => serializer.serialize_str("*"),
        }
    }
}

impl<'de> Deserialize<'de> for UpperBound {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(UpperBound::Bounded(n)),
            Raw::Text(s) if s == "*" => Ok(UpperBound::Unbounded),
            Raw::Text(s) => s
                .parse()
                .map(UpperBound::Bounded)
                .map_err(|_| serde::de::Error::custom(format!("invalid upper bound '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicity_display() {
        assert_eq!(Multiplicity::ONE.to_string(), "1");
        assert_eq!(Multiplicity::MANY.to_string(), "0..*");
        let optional = Multiplicity {
            lower: 0,
            upper: UpperBound::Bounded(1),
        };
        assert_eq!(optional.to_string(), "0..1");
        assert!(!optional.is_many());
        assert!(Multiplicity::MANY.is_many());
    }

    #[test]
    fn test_edge_serializes_with_star_upper_bound() {
        let edge = Edge {
            kind: EdgeKind::Composition,
            from_id: "p.A".to_string(),
            to_id: "p.B".to_string(),
            multiplicity: Some(EdgeMultiplicity::to_many()),
            label: "items".to_string(),
        };
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["kind"], "composition");
        assert_eq!(json["fromId"], "p.A");
        assert_eq!(json["multiplicity"]["target"]["upper"], "*");
        assert_eq!(json["multiplicity"]["source"]["upper"], 1);

        let back: Edge = serde_json::from_value(json).unwrap();
        assert_eq!(back, edge);
    }

    #[test]
    fn test_node_json_shape() {
        let mut node = Node::new("Room", NodeKind::AbstractClass);
        node.id = "home.Room".to_string();
        node.properties.push(Property {
            name: "size".to_string(),
            type_name: "int".to_string(),
            access_modifier: AccessModifier::PackagePrivate,
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "abstract-class");
        assert_eq!(json["properties"][0]["type"], "int");
        assert_eq!(json["properties"][0]["accessModifier"], "");
        assert!(json["enumerationLiterals"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_access_modifier_symbols() {
        assert_eq!(AccessModifier::Public.uml_symbol(), "+");
        assert_eq!(AccessModifier::Private.uml_symbol(), "-");
        assert_eq!(AccessModifier::Protected.uml_symbol(), "#");
        assert_eq!(AccessModifier::PackagePrivate.to_string(), "");
        assert!(AccessModifier::Protected.is_encapsulated());
        assert!(!AccessModifier::PackagePrivate.is_encapsulated());
    }

    #[test]
    fn test_assemble_concatenates_in_order() {
        let edge = |label: &str| Edge {
            kind: EdgeKind::Association,
            from_id: "a".to_string(),
            to_id: "b".to_string(),
            multiplicity: None,
            label: label.to_string(),
        };
        let diagram = Diagram::assemble(vec![], vec![vec![edge("x")], vec![], vec![edge("y")]]);
        let labels: Vec<_> = diagram.edges.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["x", "y"]);
    }
}
