use javelin_test_utils::{ident, node, tok};
use javelin_syntax::{kinds, ParseNode, TreeError};
use pretty_assertions::assert_eq;

const IMPORT: &str = r#"{
  "kind": "importDeclaration",
  "children": [
    { "kind": "import" },
    { "kind": "qualifiedName", "children": [
      { "kind": "Identifier", "payload": "java" },
      { "kind": "." },
      { "kind": "Identifier", "payload": "util" }
    ] },
    { "kind": ";" }
  ]
}"#;

#[test]
fn front_end_json_loads_into_nodes() {
    let tree = ParseNode::from_json(IMPORT).unwrap();

    assert_eq!(
        tree,
        node(
            kinds::IMPORT_DECLARATION,
            vec![
                tok("import"),
                node(kinds::QUALIFIED_NAME, vec![ident("java"), tok("."), ident("util")]),
                tok(";"),
            ],
        )
    );
    assert_eq!(tree.node_count(), 7);
}

#[test]
fn serialized_trees_omit_empty_fields() {
    let json = tok("{").to_json().unwrap();
    assert_eq!(json, r#"{"kind":"{"}"#);
}

#[test]
fn malformed_json_is_reported() {
    let err = ParseNode::from_json(r#"{"children": []}"#).unwrap_err();
    assert!(matches!(err, TreeError::Json(_)));
    assert!(err.to_string().starts_with("invalid parse tree json"));
}
