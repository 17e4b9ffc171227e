use javelin_test_utils::{
    class, constructor, enum_constant, enumeration, expr_stmt, field, method, nested,
    return_stmt, type_declaration,
};
use pretty_assertions::assert_eq;

use super::support::ruby;

#[test]
fn plain_enum_gets_value_helpers_and_constants() {
    let color = enumeration(
        "Color",
        &[],
        vec![
            enum_constant("RED", &[], None),
            enum_constant("GREEN", &[], None),
        ],
        vec![],
    );

    assert_eq!(
        ruby(vec![type_declaration(&[], color)]),
        r#"class Color
  def set_value_name(name)
    @value_name = name
    self
  end

  def to_s
    @value_name
  end

  def self.values
    [RED, GREEN]
  end

  RED = Color.new.set_value_name("RED")
  GREEN = Color.new.set_value_name("GREEN")
end
"#
    );
}

#[test]
fn constant_bodies_become_forwarding_subclasses() {
    let op = enumeration(
        "Op",
        &[],
        vec![enum_constant(
            "PLUS",
            &[],
            Some(vec![method(
                &[],
                "int",
                "apply",
                &[("int", "a"), ("int", "b")],
                Some(vec![return_stmt(Some("a + b"))]),
            )]),
        )],
        vec![method(&["abstract"], "int", "apply", &[("int", "a"), ("int", "b")], None)],
    );

    assert_eq!(
        ruby(vec![type_declaration(&[], op)]),
        r#"class Op
  class PLUS_Body < Op
    def initialize(*args)
      super(*args)
    end

    def apply(a, b)
      return a + b
    end
  end

  def apply(a, b)
    raise NotImplementedError
  end

  def set_value_name(name)
    @value_name = name
    self
  end

  def to_s
    @value_name
  end

  def self.values
    [PLUS]
  end

  PLUS = PLUS_Body.new.set_value_name("PLUS")
end
"#
    );
}

#[test]
fn nested_enum_constants_are_reexported_with_constructor_arguments() {
    let planet = enumeration(
        "Planet",
        &[],
        vec![enum_constant("EARTH", &["1"], None)],
        vec![
            field(&["private", "final"], "int", &[("order", None)]),
            constructor(
                &[],
                "Planet",
                &[("int", "order")],
                vec![expr_stmt("this . order = order")],
            ),
        ],
    );
    let solar = class("Solar", &[], None, &[], vec![nested(&[], planet)]);

    let source = ruby(vec![type_declaration(&[], solar)]);

    assert!(
        source.contains("    EARTH = Planet.new(1).set_value_name(\"EARTH\")\n"),
        "{source}"
    );
    assert!(
        source.ends_with("  end\n\n  EARTH = Solar::Planet::EARTH\nend\n"),
        "{source}"
    );
    assert!(
        source.contains("    def initialize(order)\n      @order = 0\n      @order = order\n    end\n"),
        "{source}"
    );
}
