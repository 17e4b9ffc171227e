use javelin_codegen::{translate, TranslateError};
use javelin_config::TranslateConfig;
use javelin_test_utils::{
    class, comment, compilation_unit, constructor, constructor_calling, expr_stmt, field,
    interface, interface_constants, interface_method, local_class, local_var, method, node,
    return_stmt, static_block, type_declaration,
};
use javelin_syntax::kinds;
use pretty_assertions::assert_eq;

use super::support::{ruby, try_ruby};

#[test]
fn package_modules_wrap_a_class_with_superclass() {
    let point = class(
        "Point",
        &[],
        Some("Shape"),
        &[],
        vec![
            field(&["private"], "int", &[("x", None)]),
            field(&["private"], "String", &[("label", Some("\"p\""))]),
            constructor_calling(
                &["public"],
                "Point",
                &[("int", "x")],
                Some("super"),
                &["x"],
                vec![expr_stmt("this . x = x")],
            ),
            method(
                &["public"],
                "int",
                "getX",
                &[],
                Some(vec![return_stmt(Some("this . x"))]),
            ),
            method(
                &["public", "static"],
                "int",
                "origin",
                &[],
                Some(vec![return_stmt(Some("0"))]),
            ),
        ],
    );
    let unit = compilation_unit(
        Some("com.acme"),
        &["java.util.List"],
        vec![type_declaration(&["public"], point)],
    );

    let source = translate(&unit, &TranslateConfig::default()).unwrap();

    assert_eq!(
        source,
        r#"# import java.util.List

module Com
  module Acme
    class Point < Shape
      def initialize(x)
        @x = 0
        @label = nil
        super(x)
        @label = "p"
        @x = x
      end

      def getX
        return @x
      end

      def self.origin
        return 0
      end
    end
  end
end
"#
    );
}

#[test]
fn interfaces_become_mixin_modules() {
    let shape = interface(
        "Shape",
        &[],
        &[],
        vec![
            interface_constants("double", &[("PI", "3.14")]),
            interface_method("double", "area", &[]),
        ],
    );
    let circle = class(
        "Circle",
        &[],
        None,
        &["Shape"],
        vec![
            field(&["private"], "double", &[("r", None)]),
            constructor(&[], "Circle", &[("double", "r")], vec![expr_stmt("this . r = r")]),
            comment("// area of the disc"),
            method(
                &["public"],
                "double",
                "area",
                &[],
                Some(vec![return_stmt(Some("PI * r * r"))]),
            ),
        ],
    );
    let unit = node(
        kinds::COMPILATION_UNIT,
        vec![
            comment("// Shapes"),
            node(kinds::TYPE_DECLARATION, vec![type_declaration(&[], shape)]),
            node(kinds::TYPE_DECLARATION, vec![type_declaration(&[], circle)]),
        ],
    );

    let source = translate(&unit, &TranslateConfig::default()).unwrap();

    assert_eq!(
        source,
        r#"# Shapes
module Shape
  def area
    raise NotImplementedError
  end

  PI = 3.14
end

class Circle
  include Shape

  def initialize(r)
    @r = 0.0
    @r = r
  end

  # area of the disc
  def area
    return PI * r * r
  end
end
"#
    );
}

#[test]
fn overloaded_constructors_dispatch_on_arity() {
    let range = class(
        "Range",
        &[],
        None,
        &[],
        vec![
            field(&[], "int", &[("lo", None)]),
            field(&[], "int", &[("hi", None)]),
            constructor_calling(&[], "Range", &[], Some("this"), &["0", "10"], vec![]),
            constructor(
                &[],
                "Range",
                &[("int", "lo"), ("int", "hi")],
                vec![expr_stmt("this . lo = lo"), expr_stmt("this . hi = hi")],
            ),
        ],
    );

    assert_eq!(
        ruby(vec![type_declaration(&[], range)]),
        r#"class Range
  def initialize(*args)
    case args.size
    when 0
      initialize(0, 10)
    when 2
      lo, hi = args
      @lo = 0
      @hi = 0
      @lo = lo
      @hi = hi
    else
      raise ArgumentError, "wrong number of arguments (given #{args.size})"
    end
  end
end
"#
    );
}

#[test]
fn constructors_overloaded_on_types_are_unsupported() {
    let money = class(
        "Money",
        &[],
        None,
        &[],
        vec![
            constructor(&[], "Money", &[("int", "cents")], vec![]),
            constructor(&[], "Money", &[("String", "amount")], vec![]),
        ],
    );

    let err = try_ruby(vec![type_declaration(&[], money)]).unwrap_err();
    assert!(
        matches!(&err, TranslateError::Unsupported { construct } if construct.contains("Money")),
        "unexpected error: {err}"
    );
}

#[test]
fn local_classes_are_hoisted_next_to_their_method() {
    let outer = class(
        "Outer",
        &[],
        None,
        &[],
        vec![method(
            &[],
            "void",
            "run",
            &[],
            Some(vec![
                local_class(type_declaration(&[], class("Helper", &[], None, &[], vec![]))),
                local_var("Helper", &[("h", Some("new Helper ( )"))]),
            ]),
        )],
    );

    assert_eq!(
        ruby(vec![type_declaration(&[], outer)]),
        r#"class Outer
  class Helper_run
  end

  def run
    h = Outer::Helper_run.new()
  end
end
"#
    );
}

#[test]
fn static_members_render_in_source_order() {
    let registry = class(
        "Registry",
        &[],
        None,
        &[],
        vec![
            field(&["static"], "int", &[("hits", None)]),
            static_block(vec![expr_stmt("hits = 1")]),
            field(&["static", "final"], "int", &[("LIMIT", Some("10"))]),
        ],
    );

    assert_eq!(
        ruby(vec![type_declaration(&[], registry)]),
        "class Registry\n  @@hits = 0\n  hits = 1\n  LIMIT = 10\nend\n"
    );
}
