use javelin_test_utils::{comment, expr, ident, node, tok};
use javelin_syntax::{kinds, MatchError, Matcher};
use pretty_assertions::assert_eq;

#[test]
fn nested_walk_collects_comments_in_order() {
    let tree = node(
        "pair",
        vec![
            comment("// first"),
            node("left", vec![ident("a"), comment("// inside")]),
            comment("// between"),
            node("right", vec![ident("b")]),
        ],
    );
    let mut m = Matcher::new(&tree);

    let names = m
        .expect_with(&["pair"], |m| {
            let left = m.expect_with(&["left"], Matcher::match_name)?;
            let before_right = m.take_comments();
            let right = m.expect_with(&["right"], Matcher::match_name)?;
            Ok::<_, MatchError>((left, before_right, right))
        })
        .unwrap();

    assert_eq!(
        names,
        (
            "a".to_owned(),
            vec!["// first".to_owned(), "// inside".to_owned()],
            "b".to_owned()
        )
    );
    assert_eq!(m.finish().unwrap(), ["// between"]);
}

#[test]
fn alternatives_are_chosen_by_lookahead() {
    let tree = expr("x >> = 2");
    let tree = node(kinds::EXPRESSION, {
        let mut children = tree.children;
        // the front-end splits shift operators into single characters
        children.splice(1..2, [tok(">"), tok(">")]);
        children
    });
    let mut m = Matcher::new(&tree);

    let rendered = m
        .expect_with(&[kinds::EXPRESSION], |m| {
            let target = m.match_name()?;
            let op = m.multi_match(&[&[">", ">", "="], &[">", ">", ">", "="], &[">", ">"]])?;
            let value = m.expect_text(&[kinds::LITERAL])?;
            Ok::<_, MatchError>(format!("{target} {} {value}", op.unwrap_or_default()))
        })
        .unwrap();

    assert_eq!(rendered, "x >>= 2");
    m.finish().unwrap();
}

#[test]
fn loop_match_counts_repetitions() {
    let tree = node(
        "list",
        vec![node("item", vec![ident("a")]), node("item", vec![ident("b")]), tok(";")],
    );
    let mut m = Matcher::new(&tree);
    let mut names = Vec::new();

    let count = m
        .expect_with(&["list"], |m| {
            let count = m.loop_match("item", |m| {
                names.push(m.match_name()?);
                Ok::<_, MatchError>(())
            })?;
            m.expect(&[";"])?;
            Ok::<_, MatchError>(count)
        })
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(names, ["a", "b"]);
}
