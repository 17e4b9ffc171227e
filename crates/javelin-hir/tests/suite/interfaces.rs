use javelin_hir::ModuleKind;
use javelin_test_utils::{
    annotation_type, class, interface, interface_constants, interface_generic_method,
    interface_method, interface_nested, type_declaration,
};
use javelin_types::{JavaType, PrimitiveType};
use pretty_assertions::assert_eq;

use super::support::{build, module};

#[test]
fn members_split_into_constants_and_abstract_methods() {
    let shape = interface(
        "Shape",
        &[],
        &["Comparable", "java.io.Serializable"],
        vec![
            interface_constants("double", &[("PI", "3.14"), ("E", "2.71")]),
            interface_method("double", "area", &[]),
            interface_method("void", "draw", &[("Canvas", "canvas")]),
            interface_generic_method(&["T"], "T", "accept", &[("Visitor", "visitor")]),
        ],
    );
    let graph = build(vec![type_declaration(&["public"], shape)]);
    let shape = module(&graph, "Shape");

    assert_eq!(shape.kind, ModuleKind::Interface);
    let interfaces: Vec<String> = shape.interfaces.iter().map(ToString::to_string).collect();
    assert_eq!(interfaces, ["Comparable", "java.io.Serializable"]);

    let constants: Vec<(&str, &str)> = shape
        .constants
        .iter()
        .map(|c| (c.name.as_str(), c.value.as_str()))
        .collect();
    assert_eq!(constants, [("PI", "3.14"), ("E", "2.71")]);

    let names: Vec<&str> = shape.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["area", "draw", "accept"]);
    assert!(shape.methods.iter().all(|m| m.is_abstract() && !m.is_static));
    assert_eq!(
        shape.method("area").unwrap().return_type,
        JavaType::Primitive(PrimitiveType::Double)
    );

    let accept = shape.method("accept").unwrap();
    assert_eq!(accept.generic_params, ["T"]);
    assert_eq!(accept.return_type, JavaType::object());
    assert!(shape.constructors.is_empty());
}

#[test]
fn member_types_of_an_interface_are_local() {
    let registry = interface(
        "Registry",
        &[],
        &[],
        vec![
            interface_nested(&[], class("Entry", &[], None, &[], vec![])),
            interface_nested(&[], interface("Listener", &[], &[], vec![])),
        ],
    );
    let graph = build(vec![type_declaration(&[], registry)]);

    assert_eq!(module(&graph, "Entry").kind, ModuleKind::LocalClass);
    assert_eq!(module(&graph, "Listener").kind, ModuleKind::LocalInterface);
    let registry = graph.find("Registry").unwrap();
    assert_eq!(graph[registry].nested.len(), 2);
}

#[test]
fn annotation_types_become_empty_interfaces() {
    let graph = build(vec![type_declaration(
        &["public"],
        annotation_type("Audited", &[("String", "value"), ("int", "level")]),
    )]);
    let audited = module(&graph, "Audited");

    assert_eq!(audited.kind, ModuleKind::Interface);
    assert!(audited.methods.is_empty());
    assert!(audited.constants.is_empty());
}
