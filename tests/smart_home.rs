// Integration tests against the checked-in smart home fixture
//
// test_samples/java/smart_home holds eleven `mock.java` types plus one
// scratch file without a package.

use classgraph_core::{
    count_source_files, extract, extract_with_report, Diagram, EdgeKind, EdgeMultiplicity,
    ExtractConfig, NodeKind,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test_samples/java/smart_home")
}

fn edge_set(diagram: &Diagram) -> BTreeSet<(EdgeKind, String, String, String)> {
    diagram
        .edges
        .iter()
        .map(|e| (e.kind, e.from_id.clone(), e.to_id.clone(), e.label.clone()))
        .collect()
}

fn id(name: &str) -> String {
    format!("mock.java.{}", name)
}

#[test]
fn test_fixture_file_count() {
    assert_eq!(count_source_files(Some(&fixture_root())).unwrap(), 12);
}

#[test]
fn test_nodes_and_kinds() {
    let diagram = extract(Some(&fixture_root())).unwrap();
    assert_eq!(diagram.nodes.len(), 12);

    let expected = [
        ("ADevice", NodeKind::AbstractClass),
        ("Switchable", NodeKind::Interface),
        ("Dimmable", NodeKind::Interface),
        ("Light", NodeKind::Class),
        ("Thermostat", NodeKind::Class),
        ("Mode", NodeKind::Enumeration),
        ("Room", NodeKind::Class),
        ("Logger", NodeKind::Class),
        ("Reading", NodeKind::DataType),
        ("SmartHomeController", NodeKind::Class),
        ("IntegrationTest", NodeKind::Class),
    ];
    for (name, kind) in expected {
        let node = diagram
            .node(&id(name))
            .unwrap_or_else(|| panic!("missing node {}", name));
        assert_eq!(node.kind, kind, "kind of {}", name);
        assert_eq!(node.name, name);
    }

    let mode = diagram.node(&id("Mode")).unwrap();
    assert_eq!(mode.enumeration_literals, vec!["OFF", "HEAT", "COOL"]);

    let device = diagram.node(&id("ADevice")).unwrap();
    assert_eq!(device.comment, "/** Base of every device in the house */");
    let ops: Vec<_> = device.operations.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(ops, vec!["turnOn", "moveTo"]);
}

#[test]
fn test_inferred_edges() {
    let diagram = extract(Some(&fixture_root())).unwrap();
    let scratch = diagram.node_by_name("Scratch").unwrap().id.clone();

    let e = |kind, from: &str, to: &str, label: &str| {
        (kind, from.to_string(), to.to_string(), label.to_string())
    };
    let expected: BTreeSet<_> = [
        e(EdgeKind::Realization, &id("ADevice"), &id("Switchable"), ""),
        e(EdgeKind::Aggregation, &id("ADevice"), &id("Room"), "room"),
        e(EdgeKind::Generalization, &id("Dimmable"), &id("Switchable"), ""),
        e(EdgeKind::Generalization, &id("Light"), &id("ADevice"), ""),
        e(EdgeKind::Realization, &id("Light"), &id("Dimmable"), ""),
        e(EdgeKind::Generalization, &id("Thermostat"), &id("ADevice"), ""),
        e(EdgeKind::Composition, &id("Thermostat"), &id("Mode"), "mode"),
        e(EdgeKind::Composition, &id("Room"), &id("Light"), "lights"),
        e(EdgeKind::Composition, &id("Reading"), &id("Thermostat"), "source"),
        e(EdgeKind::Composition, &id("SmartHomeController"), &id("ADevice"), "devices"),
        e(EdgeKind::Composition, &id("SmartHomeController"), &id("Room"), "rooms"),
        e(EdgeKind::Composition, &id("SmartHomeController"), &id("Light"), "lightThermostatMap"),
        e(EdgeKind::Composition, &id("SmartHomeController"), &id("Thermostat"), "lightThermostatMap"),
        e(EdgeKind::Composition, &id("IntegrationTest"), &id("Logger"), "logger"),
        e(EdgeKind::Composition, &scratch, &id("Room"), "room"),
    ]
    .into_iter()
    .collect();

    assert_eq!(diagram.edges.len(), expected.len(), "no duplicate edges");
    assert_eq!(edge_set(&diagram), expected);
}

#[test]
fn test_collection_multiplicities() {
    let diagram = extract(Some(&fixture_root())).unwrap();
    let controller = id("SmartHomeController");

    let multiplicity_of = |label: &str, to: &str| {
        diagram
            .edges_from(&controller)
            .find(|e| e.label == label && e.to_id == id(to))
            .and_then(|e| e.multiplicity)
    };
    assert_eq!(multiplicity_of("devices", "ADevice"), Some(EdgeMultiplicity::to_many()));
    assert_eq!(multiplicity_of("rooms", "Room"), Some(EdgeMultiplicity::to_many()));
    assert_eq!(
        multiplicity_of("lightThermostatMap", "Light"),
        Some(EdgeMultiplicity::to_one())
    );

    for edge in &diagram.edges {
        match edge.kind {
            EdgeKind::Generalization | EdgeKind::Realization => {
                assert!(edge.multiplicity.is_none())
            }
            _ => assert!(edge.multiplicity.is_some()),
        }
    }
}

#[test]
fn test_scratch_file_gets_unindexed_fallback_id() {
    let extraction = extract_with_report(Some(&fixture_root()), &ExtractConfig::default()).unwrap();
    let scratch = extraction.diagram.node_by_name("Scratch").unwrap();
    assert!(!scratch.id.starts_with("mock.java"));
    assert_eq!(scratch.comment, "/* Scratch file without a package */");
    assert_eq!(extraction.report.unnamed_nodes, 1);
    assert!(extraction.diagram.edges.iter().all(|e| e.to_id != scratch.id));

    let again = extract(Some(&fixture_root())).unwrap();
    assert_eq!(again.node_by_name("Scratch").unwrap().id, scratch.id);
}

#[test]
fn test_report_counts() {
    let extraction = extract_with_report(Some(&fixture_root()), &ExtractConfig::default()).unwrap();
    let report = &extraction.report;
    assert_eq!(report.files_found, 12);
    assert_eq!(report.files_extracted, 12);
    assert_eq!(report.skipped_entries, 0);
    assert!(report.failures.is_empty());
    assert!(report.duplicates.is_empty());
}

#[test]
fn test_referential_integrity() {
    let diagram = extract(Some(&fixture_root())).unwrap();
    let ids: BTreeSet<_> = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), diagram.nodes.len(), "node ids are unique");
    for edge in &diagram.edges {
        assert!(ids.contains(edge.from_id.as_str()), "dangling from {:?}", edge);
        assert!(ids.contains(edge.to_id.as_str()), "dangling to {:?}", edge);
        assert_ne!(edge.from_id, edge.to_id);
    }
}

#[test]
fn test_serialized_shape() {
    let diagram = extract(Some(&fixture_root())).unwrap();
    let json = serde_json::to_value(&diagram).unwrap();

    let edge = json["edges"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["label"] == "devices")
        .unwrap();
    assert_eq!(edge["kind"], "composition");
    assert_eq!(edge["fromId"], "mock.java.SmartHomeController");
    assert_eq!(edge["multiplicity"]["target"]["upper"], "*");
    assert_eq!(edge["multiplicity"]["source"]["upper"], 1);

    let node = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "mock.java.Room")
        .unwrap();
    assert_eq!(node["properties"][0]["name"], "name");
    assert_eq!(node["properties"][0]["type"], "String");
    assert_eq!(node["properties"][0]["accessModifier"], "public");
    assert!(node["enumerationLiterals"].as_array().unwrap().is_empty());
}
