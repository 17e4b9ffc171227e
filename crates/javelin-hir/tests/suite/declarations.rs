use javelin_hir::{BuildError, MethodBody, ModuleKind, StaticMember};
use javelin_test_utils::{
    block, class, compilation_unit, comment, expr_stmt, field, generic_method,
    import_declaration, interface, local_class, member, method, nested, node, qualified_name,
    static_block, tok, type_declaration,
};
use javelin_syntax::{kinds, MatchError};
use javelin_types::{JavaType, PrimitiveType};
use pretty_assertions::assert_eq;

use super::support::{build, module, try_build, TokenPeer};

#[test]
fn kinds_follow_the_declaration_context() {
    let outer = class(
        "Outer",
        &[],
        None,
        &[],
        vec![
            nested(&["private"], class("Member", &[], None, &[], vec![])),
            nested(&["static"], class("Helper", &[], None, &[], vec![])),
            nested(&[], interface("Callback", &[], &[], vec![])),
            method(
                &[],
                "void",
                "run",
                &[],
                Some(vec![
                    local_class(type_declaration(&[], class("Local", &[], None, &[], vec![]))),
                    expr_stmt("helper ( )"),
                ]),
            ),
        ],
    );
    let graph = build(vec![
        type_declaration(&["public"], outer),
        type_declaration(&[], interface("Top", &[], &[], vec![])),
    ]);

    assert_eq!(module(&graph, "Outer").kind, ModuleKind::Class);
    assert_eq!(module(&graph, "Top").kind, ModuleKind::Interface);
    assert_eq!(module(&graph, "Member").kind, ModuleKind::LocalClass);
    assert_eq!(module(&graph, "Helper").kind, ModuleKind::StaticLocalClass);
    assert_eq!(module(&graph, "Callback").kind, ModuleKind::LocalInterface);
    assert_eq!(module(&graph, "Local").kind, ModuleKind::InnerClass);

    let local = graph.find("Local").unwrap();
    assert_eq!(graph.ruby_path(local), ["Outer", "Local_run"]);

    let run = module(&graph, "Outer").method("run").unwrap();
    assert_eq!(run.local_classes, [local]);
    let MethodBody::Pending(body) = &run.body else {
        panic!("run should have a body");
    };
    assert_eq!(body.peek().unwrap().len(), 1);
}

#[test]
fn generics_are_captured_and_erased() {
    let boxed = class(
        "Box",
        &["T"],
        None,
        &[],
        vec![
            field(&["private"], "T", &[("value", None)]),
            generic_method(
                &["public"],
                &["R"],
                "R",
                "map",
                &[("Function", "f")],
                Some(vec![expr_stmt("f . apply ( value )")]),
            ),
        ],
    );
    let graph = build(vec![type_declaration(&[], boxed)]);

    let boxed = module(&graph, "Box");
    assert_eq!(boxed.generics, ["T"]);
    assert_eq!(boxed.fields[0].ty, JavaType::object());

    let map = boxed.method("map").unwrap();
    assert_eq!(map.generic_params, ["R"]);
    assert_eq!(map.return_type, JavaType::object());
    assert_eq!(map.params[0].ty.to_string(), "Function");
}

#[test]
fn bodiless_methods_are_abstract_or_native_whatever_they_return() {
    let device = class(
        "Device",
        &[],
        None,
        &[],
        vec![
            method(&["abstract"], "void", "reset", &[], None),
            method(&["native"], "void", "poke", &[("int", "value")], None),
            method(&["public", "native"], "int", "peek", &[], None),
            method(&["abstract"], "int", "size", &[], None),
            method(&["synchronized"], "void", "tick", &[], Some(vec![])),
        ],
    );
    let graph = build(vec![type_declaration(&["abstract"], device)]);
    let device = module(&graph, "Device");

    assert!(device.method("reset").unwrap().is_abstract());
    assert!(device.method("poke").unwrap().is_native());
    assert!(device.method("peek").unwrap().is_native());
    assert!(device.method("size").unwrap().is_abstract());

    let tick = device.method("tick").unwrap();
    assert!(tick.is_synchronized);
    assert_eq!(tick.return_type, JavaType::Void);
}

#[test]
fn static_members_keep_source_order() {
    let config = class(
        "Config",
        &[],
        None,
        &[],
        vec![
            field(&["static"], "int", &[("loads", Some("1"))]),
            static_block(vec![expr_stmt("loads ++")]),
            field(&["static", "final"], "int", &[("MAX", Some("10"))]),
            field(&["public", "static", "final"], "String", &[("NAME", None)]),
        ],
    );
    let graph = build(vec![type_declaration(&[], config)]);
    let config = module(&graph, "Config");

    assert_eq!(
        config.static_order,
        [
            StaticMember::Field(0),
            StaticMember::Block(0),
            StaticMember::Constant(0),
            StaticMember::Constant(1),
        ]
    );
    assert_eq!(config.static_fields[0].name, "loads");
    assert_eq!(config.constant("MAX").unwrap().value.as_str(), "10");
    assert_eq!(config.constant("NAME").unwrap().value.as_str(), "nil");
    assert_eq!(
        config.constant("MAX").unwrap().ty,
        Some(JavaType::Primitive(PrimitiveType::Int))
    );
}

#[test]
fn array_types_on_fields() {
    let matrix = class(
        "Matrix",
        &[],
        None,
        &[],
        vec![field(&[], "int[]", &[("cells", None)])],
    );
    let graph = build(vec![type_declaration(&[], matrix)]);

    assert_eq!(
        module(&graph, "Matrix").fields[0].ty,
        JavaType::array_of(JavaType::Primitive(PrimitiveType::Int))
    );
}

#[test]
fn package_imports_and_comments_are_recorded() {
    let unit = node(
        kinds::COMPILATION_UNIT,
        vec![
            comment("// generated"),
            node(
                kinds::PACKAGE_DECLARATION,
                vec![tok("package"), qualified_name("com.acme"), tok(";")],
            ),
            import_declaration("java.util.List"),
            import_declaration("static java.lang.Math.max"),
            import_declaration("java.io.*"),
            comment("// the widget"),
            node(
                kinds::TYPE_DECLARATION,
                vec![type_declaration(&[], class("Widget", &[], None, &[], vec![]))],
            ),
        ],
    );
    let graph = javelin_hir::build_compilation_unit(&unit, &TokenPeer).unwrap();

    assert_eq!(graph.package, ["com", "acme"]);
    let imports: Vec<String> = graph.imports.iter().map(ToString::to_string).collect();
    assert_eq!(
        imports,
        [
            "import java.util.List",
            "import static java.lang.Math.max",
            "import java.io.*",
        ]
    );
    assert_eq!(graph.comments, ["// generated"]);
    assert_eq!(module(&graph, "Widget").comments, ["// the widget"]);
}

#[test]
fn empty_unit_builds_an_empty_graph() {
    let graph =
        javelin_hir::build_compilation_unit(&compilation_unit(None, &[], vec![]), &TokenPeer)
            .unwrap();
    assert!(graph.is_empty());
    assert!(graph.roots().is_empty());
}

#[test]
fn instance_initializer_blocks_are_rejected() {
    let widget = class(
        "Widget",
        &[],
        None,
        &[],
        vec![node(
            kinds::CLASS_BODY_DECLARATION,
            vec![block(vec![])],
        )],
    );

    let err = try_build(vec![type_declaration(&[], widget)]).unwrap_err();
    assert_eq!(err, BuildError::unsupported("instance initializer block"));
}

#[test]
fn unknown_member_shape_is_a_structural_mismatch() {
    let widget = class(
        "Widget",
        &[],
        None,
        &[],
        vec![member(&[], vec![tok("goto")])],
    );

    let err = try_build(vec![type_declaration(&[], widget)]).unwrap_err();
    assert!(
        matches!(
            &err,
            BuildError::Match(MatchError::StructuralMismatch { parent, found, .. })
                if parent.as_str() == kinds::MEMBER_DECL && found.as_str() == "goto"
        ),
        "unexpected error: {err}"
    );
}
