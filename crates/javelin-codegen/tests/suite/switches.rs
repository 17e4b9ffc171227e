use javelin_codegen::translate;
use javelin_config::TranslateConfig;
use javelin_flow::ClosureMode;
use javelin_test_utils::{
    block_stmt, break_stmt, class, compilation_unit, expr_stmt, if_stmt, method, return_stmt,
    switch_stmt, type_declaration, while_stmt,
};
use javelin_syntax::ParseNode;
use pretty_assertions::assert_eq;

use super::support::ruby;

fn in_method(body: Vec<ParseNode>) -> ParseNode {
    let holder = class(
        "Sw",
        &[],
        None,
        &[],
        vec![method(&[], "void", "run", &[("int", "x")], Some(body))],
    );
    type_declaration(&[], holder)
}

#[test]
fn fall_through_is_copied_into_the_arm_above() {
    let switch = switch_stmt(
        "x",
        vec![
            (vec![Some("1")], vec![expr_stmt("x = 1")]),
            (vec![Some("2")], vec![expr_stmt("x = 2"), break_stmt(None)]),
            (vec![None], vec![expr_stmt("x = - 1")]),
        ],
    );

    assert_eq!(
        ruby(vec![in_method(vec![switch])]),
        r#"class Sw
  def run(x)
    case x
    when 1
      x = 1
      x = 2
    when 2
      x = 2
    else
      x = -1
    end
  end
end
"#
    );
}

#[test]
fn default_moves_last_and_keeps_its_fall_through() {
    let switch = switch_stmt(
        "x",
        vec![
            (vec![None], vec![expr_stmt("x = 0")]),
            (vec![Some("1"), Some("2")], vec![expr_stmt("x = 1"), break_stmt(None)]),
            (vec![Some("3")], vec![return_stmt(None)]),
        ],
    );

    assert_eq!(
        ruby(vec![in_method(vec![switch])]),
        r#"class Sw
  def run(x)
    case x
    when 1, 2
      x = 1
    when 3
      return
    else
      x = 0
      x = 1
    end
  end
end
"#
    );
}

#[test]
fn closure_mode_decides_whether_an_else_less_if_closes() {
    let body = || {
        vec![while_stmt(
            "true",
            block_stmt(vec![switch_stmt(
                "x",
                vec![
                    (
                        vec![Some("1")],
                        vec![if_stmt("done", block_stmt(vec![return_stmt(None)]), None)],
                    ),
                    (vec![Some("2")], vec![expr_stmt("x = 2"), break_stmt(None)]),
                ],
            )]),
        )]
    };

    let compatible = ruby(vec![in_method(body())]);
    assert!(
        compatible.contains("      when 1\n        if done\n          return\n        end\n      when 2\n"),
        "{compatible}"
    );

    let config = TranslateConfig {
        closure_mode: ClosureMode::Strict,
        ..TranslateConfig::default()
    };
    let strict = translate(&compilation_unit(None, &[], vec![in_method(body())]), &config).unwrap();
    assert!(
        strict.contains(
            "      when 1\n        if done\n          return\n        end\n        x = 2\n      when 2\n"
        ),
        "{strict}"
    );
}

#[test]
fn early_break_throws_out_of_its_arm() {
    let switch = switch_stmt(
        "x",
        vec![
            (
                vec![Some("1")],
                vec![
                    if_stmt("c", block_stmt(vec![break_stmt(None)]), None),
                    expr_stmt("y ( )"),
                    break_stmt(None),
                ],
            ),
            (vec![Some("2")], vec![expr_stmt("z ( )"), break_stmt(None)]),
        ],
    );

    assert_eq!(
        ruby(vec![in_method(vec![switch])]),
        r#"class Sw
  def run(x)
    case x
    when 1
      catch(:break_switch) do
        if c
          throw :break_switch
        end
        y()
      end
    when 2
      z()
    end
  end
end
"#
    );
}

#[test]
fn strict_mode_keeps_the_break_of_an_open_tail_if() {
    let switch = switch_stmt(
        "x",
        vec![
            (
                vec![Some("1")],
                vec![if_stmt(
                    "c",
                    block_stmt(vec![expr_stmt("a ( )"), break_stmt(None)]),
                    None,
                )],
            ),
            (vec![Some("2")], vec![expr_stmt("b ( )"), break_stmt(None)]),
        ],
    );
    let config = TranslateConfig {
        closure_mode: ClosureMode::Strict,
        ..TranslateConfig::default()
    };

    let strict = translate(&compilation_unit(None, &[], vec![in_method(vec![switch])]), &config)
        .unwrap();
    assert!(
        strict.contains(
            "    when 1\n      catch(:break_switch) do\n        if c\n          a()\n          throw :break_switch\n        end\n        b()\n      end\n    when 2\n      b()\n"
        ),
        "{strict}"
    );
}
