use javelin_flow::{
    closes, normalize_switch, CaseBranch, CaseLabel, ClosureMode, Expression, FlowConfig, Stmt,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Tail {
    FallThrough,
    Break,
    Return,
}

fn arb_branch_shapes() -> impl Strategy<Value = (Vec<(usize, Tail)>, Option<usize>)> {
    let tail = prop_oneof![Just(Tail::FallThrough), Just(Tail::Break), Just(Tail::Return)];
    (prop::collection::vec((1usize..3, tail), 1..6), any::<prop::sample::Index>())
        .prop_map(|(shapes, idx)| {
            let default_at = if shapes.len() > 1 {
                Some(idx.index(shapes.len()))
            } else {
                None
            };
            (shapes, default_at)
        })
}

fn build(shapes: &[(usize, Tail)], default_at: Option<usize>) -> Vec<CaseBranch> {
    let mut next_label = 0;
    shapes
        .iter()
        .enumerate()
        .map(|(idx, (label_count, tail))| {
            let mut labels: Vec<CaseLabel> = (0..*label_count)
                .map(|_| {
                    next_label += 1;
                    CaseLabel::Value(Expression::new(next_label.to_string()))
                })
                .collect();
            if default_at == Some(idx) {
                labels.push(CaseLabel::Default);
            }
            let mut body = vec![Stmt::other(format!("s{idx}"))];
            match tail {
                Tail::FallThrough => {}
                Tail::Break => body.push(Stmt::unlabeled_break()),
                Tail::Return => body.push(Stmt::Return(None)),
            }
            CaseBranch::open(labels, body)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn output_branches_are_closed_and_default_is_last((shapes, default_at) in arb_branch_shapes()) {
        let input = build(&shapes, default_at);
        let input_labels: usize = input.iter().map(|b| b.labels.len()).sum();

        let out = normalize_switch(Expression::new("x"), input, FlowConfig::default()).unwrap();
        let Stmt::Case { branches, .. } = out else {
            panic!("expected case");
        };

        prop_assert!(branches.iter().all(|b| b.closed));
        prop_assert_eq!(branches.iter().map(|b| b.labels.len()).sum::<usize>(), input_labels);

        let defaults: Vec<usize> = branches
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_default())
            .map(|(idx, _)| idx)
            .collect();
        match default_at {
            Some(_) => {
                prop_assert_eq!(defaults, vec![branches.len() - 1]);
                prop_assert_eq!(&branches[branches.len() - 1].labels, &vec![CaseLabel::Default]);
            }
            None => prop_assert!(defaults.is_empty()),
        }

        for branch in &branches {
            prop_assert!(!branch.body.contains(&Stmt::unlabeled_break()));
        }
    }

    #[test]
    fn closing_branches_absorb_no_later_statements((shapes, _) in arb_branch_shapes()) {
        let input = build(&shapes, None);
        let closed_input: Vec<bool> = input
            .iter()
            .map(|b| closes(&b.body, ClosureMode::Strict))
            .collect();

        let out = normalize_switch(Expression::new("x"), input, FlowConfig::default()).unwrap();
        let Stmt::Case { branches, .. } = out else {
            panic!("expected case");
        };

        for (idx, branch) in branches.iter().enumerate() {
            let own = Stmt::other(format!("s{idx}"));
            prop_assert_eq!(branch.body.first(), Some(&own));
            if closed_input[idx] {
                let later = (idx + 1..shapes.len()).map(|j| Stmt::other(format!("s{j}")));
                for stmt in later {
                    prop_assert!(!branch.body.contains(&stmt));
                }
            }
        }
    }
}
