use javelin_flow::Stmt;
use javelin_hir::{initialization_plan, ConstructorInvocation, MethodBody};
use javelin_test_utils::{
    class, constructor, constructor_calling, expr_stmt, field, method, type_declaration,
};
use pretty_assertions::assert_eq;

use super::support::{build, describe, module};

#[test]
fn fields_without_constructor_get_a_synthesized_one() {
    let counter = class(
        "Counter",
        &[],
        Some("Base"),
        &[],
        vec![field(&[], "int", &[("count", None)])],
    );
    let graph = build(vec![type_declaration(&[], counter)]);
    let counter = module(&graph, "Counter");

    assert_eq!(counter.constructors.len(), 1);
    let ctor = &counter.constructors[0];
    assert!(ctor.synthesized);
    assert!(ctor.params.is_empty());
    assert_eq!(
        describe(&initialization_plan(counter, &ctor.invocation)),
        ["@count = 0", "super()"]
    );
}

#[test]
fn defaults_run_before_super_and_initializers_after() {
    let point = class(
        "Point",
        &[],
        Some("Shape"),
        &[],
        vec![
            field(&["private"], "int", &[("x", Some("1")), ("y", None)]),
            field(&[], "String", &[("label", Some("\"p\""))]),
            constructor_calling(
                &["public"],
                "Point",
                &[("int", "a")],
                Some("super"),
                &["a"],
                vec![expr_stmt("y = a")],
            ),
        ],
    );
    let graph = build(vec![type_declaration(&[], point)]);
    let point = module(&graph, "Point");
    let ctor = &point.constructors[0];

    assert!(!ctor.synthesized);
    assert_eq!(ctor.invocation, ConstructorInvocation::Super("(a)".to_owned()));
    assert_eq!(
        describe(&initialization_plan(point, &ctor.invocation)),
        [
            "@x = 0",
            "@y = 0",
            "@label = nil",
            "super(a)",
            "@x = 1",
            "@label = \"p\"",
        ]
    );
    assert_eq!(ctor.body.peek().unwrap(), [Stmt::other("y = a")]);
}

#[test]
fn delegating_constructor_leaves_fields_to_its_target() {
    let point = class(
        "Point",
        &[],
        None,
        &[],
        vec![
            field(&[], "int", &[("x", Some("1"))]),
            constructor(&[], "Point", &[("int", "x")], vec![expr_stmt("this . x = x")]),
            constructor_calling(&[], "Point", &[], Some("this"), &["0"], vec![]),
        ],
    );
    let graph = build(vec![type_declaration(&[], point)]);
    let point = module(&graph, "Point");

    assert_eq!(point.constructors.len(), 2);
    let delegating = &point.constructors[1];
    assert_eq!(
        describe(&initialization_plan(point, &delegating.invocation)),
        ["initialize(0)"]
    );
    assert_eq!(
        describe(&initialization_plan(point, &point.constructors[0].invocation)),
        ["@x = 1"]
    );
}

#[test]
fn without_superclass_fields_are_assigned_directly() {
    let plain = class(
        "Plain",
        &[],
        None,
        &[],
        vec![
            field(&[], "int", &[("a", Some("5"))]),
            field(&[], "String", &[("s", None)]),
        ],
    );
    let graph = build(vec![type_declaration(&[], plain)]);
    let plain = module(&graph, "Plain");
    let ctor = &plain.constructors[0];

    assert_eq!(ctor.invocation, ConstructorInvocation::None);
    assert_eq!(
        describe(&initialization_plan(plain, &ctor.invocation)),
        ["@a = 5", "@s = nil"]
    );
}

#[test]
fn classes_without_fields_get_no_constructor() {
    let util = class(
        "Util",
        &[],
        None,
        &[],
        vec![method(&["static"], "void", "run", &[], Some(vec![]))],
    );
    let graph = build(vec![type_declaration(&[], util)]);

    assert!(module(&graph, "Util").constructors.is_empty());
}

#[test]
fn pending_bodies_are_taken_once() {
    let job = class(
        "Job",
        &[],
        None,
        &[],
        vec![method(&[], "void", "run", &[], Some(vec![expr_stmt("work ( )")]))],
    );
    let mut graph = build(vec![type_declaration(&[], job)]);
    let id = graph.find("Job").unwrap();

    let MethodBody::Pending(body) = &mut graph[id].methods[0].body else {
        panic!("run should have a pending body");
    };
    assert_eq!(body.take(), Some(vec![Stmt::other("work ( )")]));
    assert!(body.is_taken());
    assert_eq!(body.take(), None);
}
