use javelin_flow::{
    normalize_body, CaseBranch, CaseLabel, ClosureMode, Expression, FlowConfig, Stmt,
    SWITCH_EXIT_LABEL,
};
use pretty_assertions::assert_eq;

fn value(v: &str) -> CaseLabel {
    CaseLabel::Value(Expression::new(v))
}

fn case(value: &str, branches: Vec<CaseBranch>) -> Stmt {
    Stmt::Case {
        value: Expression::new(value),
        branches,
    }
}

fn if_then(then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>>) -> Stmt {
    Stmt::If {
        condition: Expression::new("flag"),
        then_branch,
        else_branch,
    }
}

fn strict() -> FlowConfig {
    FlowConfig {
        closure_mode: ClosureMode::Strict,
    }
}

#[test]
fn switch_nested_in_loop_is_normalized() {
    let body = vec![Stmt::While {
        condition: Expression::new("running"),
        body: vec![case(
            "op",
            vec![
                CaseBranch::open(vec![value("1")], vec![Stmt::other("a"), Stmt::unlabeled_break()]),
                CaseBranch::open(vec![CaseLabel::Default], vec![Stmt::unlabeled_break()]),
            ],
        )],
    }];

    let out = normalize_body(body, FlowConfig::default()).unwrap();

    assert_eq!(
        out,
        vec![Stmt::While {
            condition: Expression::new("running"),
            body: vec![case(
                "op",
                vec![
                    CaseBranch {
                        labels: vec![value("1")],
                        closed: true,
                        body: vec![Stmt::other("a")],
                    },
                    CaseBranch {
                        labels: vec![CaseLabel::Default],
                        closed: true,
                        body: Vec::new(),
                    },
                ],
            )],
        }]
    );
}

#[test]
fn breaks_inside_tail_if_are_dropped() {
    let body = vec![case(
        "x",
        vec![CaseBranch::open(
            vec![value("1")],
            vec![if_then(
                vec![Stmt::other("a"), Stmt::unlabeled_break()],
                Some(vec![Stmt::Return(Some(Expression::new("b")))]),
            )],
        )],
    )];

    let out = normalize_body(body, strict()).unwrap();

    let Stmt::Case { branches, .. } = &out[0] else {
        panic!("expected case");
    };
    assert_eq!(
        branches[0].body,
        vec![if_then(
            vec![Stmt::other("a")],
            Some(vec![Stmt::Return(Some(Expression::new("b")))]),
        )]
    );
}

#[test]
fn else_less_if_closes_only_in_compatible_mode() {
    let branches = || {
        vec![
            CaseBranch::open(
                vec![value("1")],
                vec![if_then(vec![Stmt::Return(None)], None)],
            ),
            CaseBranch::open(vec![value("2")], vec![Stmt::other("two"), Stmt::unlabeled_break()]),
        ]
    };

    let compatible = normalize_body(vec![case("x", branches())], FlowConfig::default()).unwrap();
    let Stmt::Case { branches: out, .. } = &compatible[0] else {
        panic!("expected case");
    };
    assert_eq!(out[0].body, vec![if_then(vec![Stmt::Return(None)], None)]);

    let strict = normalize_body(vec![case("x", branches())], strict()).unwrap();
    let Stmt::Case { branches: out, .. } = &strict[0] else {
        panic!("expected case");
    };
    assert_eq!(
        out[0].body,
        vec![if_then(vec![Stmt::Return(None)], None), Stmt::other("two")]
    );
}

#[test]
fn statements_before_the_tail_keep_their_breaks() {
    // Only the last statement decides closure; an inner loop keeps its own `break`.
    let inner_loop = Stmt::While {
        condition: Expression::new("true"),
        body: vec![Stmt::unlabeled_break()],
    };
    let body = vec![case(
        "x",
        vec![CaseBranch::open(
            vec![value("1")],
            vec![inner_loop.clone(), Stmt::unlabeled_break()],
        )],
    )];

    let out = normalize_body(body, FlowConfig::default()).unwrap();
    let Stmt::Case { branches, .. } = &out[0] else {
        panic!("expected case");
    };
    assert_eq!(branches[0].body, vec![inner_loop]);
}

#[test]
fn switch_inside_case_body_is_normalized_too() {
    let inner = case(
        "y",
        vec![
            CaseBranch::open(vec![value("1")], vec![Stmt::other("p")]),
            CaseBranch::open(vec![value("2")], vec![Stmt::other("q"), Stmt::unlabeled_break()]),
        ],
    );
    let body = vec![case(
        "x",
        vec![CaseBranch::open(
            vec![value("1")],
            vec![inner, Stmt::unlabeled_break()],
        )],
    )];

    let out = normalize_body(body, FlowConfig::default()).unwrap();
    let Stmt::Case { branches, .. } = &out[0] else {
        panic!("expected case");
    };
    let Stmt::Case { branches: inner, .. } = &branches[0].body[0] else {
        panic!("expected nested case");
    };
    assert_eq!(inner[0].body, vec![Stmt::other("p"), Stmt::other("q")]);
    assert_eq!(inner[1].body, vec![Stmt::other("q")]);
}

#[test]
fn open_tail_if_keeps_its_break_as_a_switch_exit() {
    let body = vec![case(
        "x",
        vec![
            CaseBranch::open(
                vec![value("1")],
                vec![if_then(vec![Stmt::other("a"), Stmt::unlabeled_break()], None)],
            ),
            CaseBranch::open(vec![value("2")], vec![Stmt::other("b"), Stmt::unlabeled_break()]),
        ],
    )];

    let out = normalize_body(body, strict()).unwrap();
    let Stmt::Case { branches, .. } = &out[0] else {
        panic!("expected case");
    };
    let exit = Stmt::Break {
        label: Some(SWITCH_EXIT_LABEL.to_owned()),
    };
    assert_eq!(
        branches[0].body,
        vec![Stmt::Labeled {
            label: SWITCH_EXIT_LABEL.to_owned(),
            body: vec![if_then(vec![Stmt::other("a"), exit], None), Stmt::other("b")],
        }]
    );
    assert_eq!(branches[1].body, vec![Stmt::other("b")]);
}
