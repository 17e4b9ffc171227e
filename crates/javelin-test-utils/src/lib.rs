//! Parse tree builders shared by Javelin tests.
//!
//! Each helper produces the subtree the grammar front-end would emit for one
//! production, so suites can state their input as Java-shaped calls instead of raw
//! JSON.

use javelin_syntax::{kinds, ParseNode};

pub fn node(kind: &str, children: Vec<ParseNode>) -> ParseNode {
    ParseNode::new(kind, children)
}

pub fn tok(text: &str) -> ParseNode {
    ParseNode::token(text)
}

pub fn ident(name: &str) -> ParseNode {
    ParseNode::leaf(kinds::IDENTIFIER, name)
}

pub fn lit(text: &str) -> ParseNode {
    ParseNode::leaf(kinds::LITERAL, text)
}

pub fn comment(text: &str) -> ParseNode {
    ParseNode::leaf(kinds::LINE_COMMENT, text)
}

/// `qualifiedName` for a dotted path such as `java.util.List`.
pub fn qualified_name(path: &str) -> ParseNode {
    let mut children = Vec::new();
    for (idx, segment) in path.split('.').enumerate() {
        if idx > 0 {
            children.push(tok("."));
        }
        children.push(ident(segment));
    }
    node(kinds::QUALIFIED_NAME, children)
}

/// `type` node for a primitive or dotted class name, with trailing `[]` pairs.
pub fn ty(name: &str) -> ParseNode {
    let (base, dims) = split_dims(name);
    let mut children = if kinds::PRIMITIVE_KEYWORDS.contains(&base) {
        vec![node(kinds::PRIMITIVE_TYPE, vec![tok(base)])]
    } else {
        vec![class_type(base)]
    };
    for _ in 0..dims {
        children.push(tok("["));
        children.push(tok("]"));
    }
    node(kinds::TYPE, children)
}

/// `classOrInterfaceType` for a dotted name, without type arguments.
pub fn class_type(name: &str) -> ParseNode {
    let mut children = Vec::new();
    for (idx, segment) in name.split('.').enumerate() {
        if idx > 0 {
            children.push(tok("."));
        }
        children.push(ident(segment));
    }
    node(kinds::CLASS_OR_INTERFACE_TYPE, children)
}

/// `expression` made of plain tokens: identifiers, literals and operators.
///
/// Words starting with a letter or `_` become identifiers (keywords such as `this`,
/// `null`, `new`, `true` stay tokens), numbers and quoted strings become literals.
pub fn expr(source: &str) -> ParseNode {
    node(
        kinds::EXPRESSION,
        source.split_whitespace().map(expr_token).collect(),
    )
}

const EXPRESSION_KEYWORDS: &[&str] = &["this", "super", "null", "new", "true", "false"];

/// `arguments: '(' expressionList? ')'`, one [`expr`] per argument.
pub fn arguments(args: &[&str]) -> ParseNode {
    let mut children = vec![tok("(")];
    if !args.is_empty() {
        children.push(node(
            kinds::EXPRESSION_LIST,
            separated(args.iter().map(|arg| expr(arg)), ","),
        ));
    }
    children.push(tok(")"));
    node(kinds::ARGUMENTS, children)
}

fn separated(items: impl IntoIterator<Item = ParseNode>, separator: &str) -> Vec<ParseNode> {
    let mut children = Vec::new();
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            children.push(tok(separator));
        }
        children.push(item);
    }
    children
}

// Declarations.

/// `compilationUnit` with an optional package, imports written as in source
/// (`static java.lang.Math.max`, `java.util.*`) and type declarations built with
/// [`type_declaration`].
pub fn compilation_unit(
    package: Option<&str>,
    imports: &[&str],
    types: Vec<ParseNode>,
) -> ParseNode {
    let mut children = Vec::new();
    if let Some(package) = package {
        children.push(node(
            kinds::PACKAGE_DECLARATION,
            vec![tok("package"), qualified_name(package), tok(";")],
        ));
    }
    children.extend(imports.iter().map(|import| import_declaration(import)));
    children.extend(
        types
            .into_iter()
            .map(|decl| node(kinds::TYPE_DECLARATION, vec![decl])),
    );
    node(kinds::COMPILATION_UNIT, children)
}

pub fn import_declaration(import: &str) -> ParseNode {
    let mut children = vec![tok("import")];
    let path = match import.strip_prefix("static ") {
        Some(path) => {
            children.push(tok("static"));
            path
        }
        None => import,
    };
    match path.strip_suffix(".*") {
        Some(path) => children.extend([qualified_name(path), tok("."), tok("*")]),
        None => children.push(qualified_name(path)),
    }
    children.push(tok(";"));
    node(kinds::IMPORT_DECLARATION, children)
}

/// Modifier list; words starting with `@` become marker annotations.
fn modifier_list(list_kind: &str, item_kind: &str, keywords: &[&str]) -> ParseNode {
    let items = keywords
        .iter()
        .map(|keyword| match keyword.strip_prefix('@') {
            Some(name) => node(
                item_kind,
                vec![node(kinds::ANNOTATION, vec![tok("@"), qualified_name(name)])],
            ),
            None => node(item_kind, vec![tok(keyword)]),
        })
        .collect();
    node(list_kind, items)
}

pub fn modifiers(keywords: &[&str]) -> ParseNode {
    modifier_list(kinds::MODIFIERS, kinds::MODIFIER, keywords)
}

/// `classOrInterfaceDeclaration` around a [`class`], [`enumeration`], [`interface`] or
/// [`annotation_type`] node.
pub fn type_declaration(keywords: &[&str], decl: ParseNode) -> ParseNode {
    node(
        kinds::CLASS_OR_INTERFACE_DECLARATION,
        vec![
            modifier_list(
                kinds::CLASS_OR_INTERFACE_MODIFIERS,
                kinds::CLASS_OR_INTERFACE_MODIFIER,
                keywords,
            ),
            decl,
        ],
    )
}

pub fn type_parameters(names: &[&str]) -> ParseNode {
    let mut children = vec![tok("<")];
    children.extend(separated(
        names
            .iter()
            .map(|name| node(kinds::TYPE_PARAMETER, vec![ident(name)])),
        ",",
    ));
    children.push(tok(">"));
    node(kinds::TYPE_PARAMETERS, children)
}

pub fn type_list(names: &[&str]) -> ParseNode {
    node(kinds::TYPE_LIST, separated(names.iter().map(|name| ty(name)), ","))
}

pub fn class_body(members: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![tok("{")];
    children.extend(members);
    children.push(tok("}"));
    node(kinds::CLASS_BODY, children)
}

/// `classDeclaration` of a normal class.
pub fn class(
    name: &str,
    generics: &[&str],
    extends: Option<&str>,
    implements: &[&str],
    members: Vec<ParseNode>,
) -> ParseNode {
    let mut children = vec![tok("class"), ident(name)];
    if !generics.is_empty() {
        children.push(type_parameters(generics));
    }
    if let Some(superclass) = extends {
        children.extend([tok("extends"), ty(superclass)]);
    }
    if !implements.is_empty() {
        children.extend([tok("implements"), type_list(implements)]);
    }
    children.push(class_body(members));
    node(
        kinds::CLASS_DECLARATION,
        vec![node(kinds::NORMAL_CLASS_DECLARATION, children)],
    )
}

/// `classDeclaration` of an enum; `members` go after the `;` separating them from the
/// constants.
pub fn enumeration(
    name: &str,
    implements: &[&str],
    constants: Vec<ParseNode>,
    members: Vec<ParseNode>,
) -> ParseNode {
    let mut children = vec![tok("enum"), ident(name)];
    if !implements.is_empty() {
        children.extend([tok("implements"), type_list(implements)]);
    }
    let mut body = vec![tok("{")];
    if !constants.is_empty() {
        body.push(node(kinds::ENUM_CONSTANTS, separated(constants, ",")));
    }
    if !members.is_empty() {
        let mut declarations = vec![tok(";")];
        declarations.extend(members);
        body.push(node(kinds::ENUM_BODY_DECLARATIONS, declarations));
    }
    body.push(tok("}"));
    children.push(node(kinds::ENUM_BODY, body));
    node(
        kinds::CLASS_DECLARATION,
        vec![node(kinds::ENUM_DECLARATION, children)],
    )
}

/// `enumConstant`; empty `args` leave out the argument list.
pub fn enum_constant(name: &str, args: &[&str], body: Option<Vec<ParseNode>>) -> ParseNode {
    let mut children = vec![ident(name)];
    if !args.is_empty() {
        children.push(arguments(args));
    }
    if let Some(members) = body {
        children.push(class_body(members));
    }
    node(kinds::ENUM_CONSTANT, children)
}

/// `interfaceDeclaration` of a normal interface.
pub fn interface(name: &str, generics: &[&str], extends: &[&str], members: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![tok("interface"), ident(name)];
    if !generics.is_empty() {
        children.push(type_parameters(generics));
    }
    if !extends.is_empty() {
        children.extend([tok("extends"), type_list(extends)]);
    }
    let mut body = vec![tok("{")];
    body.extend(members);
    body.push(tok("}"));
    children.push(node(kinds::INTERFACE_BODY, body));
    node(
        kinds::INTERFACE_DECLARATION,
        vec![node(kinds::NORMAL_INTERFACE_DECLARATION, children)],
    )
}

/// `interfaceDeclaration` of an `@interface` with `(type, name)` elements.
pub fn annotation_type(name: &str, elements: &[(&str, &str)]) -> ParseNode {
    let mut body = vec![tok("{")];
    body.extend(elements.iter().map(|(element_type, element)| {
        node(
            kinds::ANNOTATION_TYPE_ELEMENT_DECLARATION,
            vec![
                modifiers(&[]),
                node(
                    kinds::ANNOTATION_TYPE_ELEMENT_REST,
                    vec![
                        ty(element_type),
                        node(
                            kinds::ANNOTATION_METHOD_OR_CONSTANT_REST,
                            vec![node(
                                kinds::ANNOTATION_METHOD_REST,
                                vec![ident(element), tok("("), tok(")")],
                            )],
                        ),
                        tok(";"),
                    ],
                ),
            ],
        )
    }));
    body.push(tok("}"));
    node(
        kinds::INTERFACE_DECLARATION,
        vec![node(
            kinds::ANNOTATION_TYPE_DECLARATION,
            vec![
                tok("@"),
                tok("interface"),
                ident(name),
                node(kinds::ANNOTATION_TYPE_BODY, body),
            ],
        )],
    )
}

/// `classBodyDeclaration: modifiers memberDecl`
pub fn member(keywords: &[&str], decl: Vec<ParseNode>) -> ParseNode {
    node(
        kinds::CLASS_BODY_DECLARATION,
        vec![modifiers(keywords), node(kinds::MEMBER_DECL, decl)],
    )
}

/// Member type declaration: a [`class`], [`enumeration`] or [`interface`] node.
pub fn nested(keywords: &[&str], decl: ParseNode) -> ParseNode {
    member(keywords, vec![decl])
}

/// `variableDeclarators` from `(name, initializer)` pairs.
pub fn variable_declarators(declarators: &[(&str, Option<&str>)]) -> ParseNode {
    node(
        kinds::VARIABLE_DECLARATORS,
        separated(
            declarators.iter().map(|(name, initializer)| {
                let mut children = vec![node(kinds::VARIABLE_DECLARATOR_ID, vec![ident(name)])];
                if let Some(initializer) = initializer {
                    children.extend([
                        tok("="),
                        node(kinds::VARIABLE_INITIALIZER, vec![expr(initializer)]),
                    ]);
                }
                node(kinds::VARIABLE_DECLARATOR, children)
            }),
            ",",
        ),
    )
}

pub fn field(keywords: &[&str], field_type: &str, declarators: &[(&str, Option<&str>)]) -> ParseNode {
    member(
        keywords,
        vec![node(
            kinds::MEMBER_DECLARATION,
            vec![
                ty(field_type),
                node(
                    kinds::FIELD_DECLARATION,
                    vec![variable_declarators(declarators), tok(";")],
                ),
            ],
        )],
    )
}

/// `formalParameters` from `(type, name)` pairs; a type ending in `...` is variadic.
pub fn formal_parameters(params: &[(&str, &str)]) -> ParseNode {
    fn decls(params: &[(&str, &str)]) -> ParseNode {
        let (param_type, name) = params[0];
        let mut rest = Vec::new();
        let param_type = match param_type.strip_suffix("...") {
            Some(element) => {
                rest.push(tok("..."));
                element
            }
            None => param_type,
        };
        rest.push(node(kinds::VARIABLE_DECLARATOR_ID, vec![ident(name)]));
        if params.len() > 1 {
            rest.extend([tok(","), decls(&params[1..])]);
        }
        node(
            kinds::FORMAL_PARAMETER_DECLS,
            vec![
                node(kinds::VARIABLE_MODIFIERS, Vec::new()),
                ty(param_type),
                node(kinds::FORMAL_PARAMETER_DECLS_REST, rest),
            ],
        )
    }

    let mut children = vec![tok("(")];
    if !params.is_empty() {
        children.push(decls(params));
    }
    children.push(tok(")"));
    node(kinds::FORMAL_PARAMETERS, children)
}

fn method_rest(rest_kind: &str, params: &[(&str, &str)], body: Option<Vec<ParseNode>>) -> ParseNode {
    let tail = match body {
        Some(statements) => node(kinds::METHOD_BODY, vec![block(statements)]),
        None => tok(";"),
    };
    node(rest_kind, vec![formal_parameters(params), tail])
}

/// Method member; `None` as body declares it abstract (or native, with the modifier).
pub fn method(
    keywords: &[&str],
    return_type: &str,
    name: &str,
    params: &[(&str, &str)],
    body: Option<Vec<ParseNode>>,
) -> ParseNode {
    if return_type == "void" {
        return member(
            keywords,
            vec![
                tok("void"),
                ident(name),
                method_rest(kinds::VOID_METHOD_DECLARATOR_REST, params, body),
            ],
        );
    }
    member(
        keywords,
        vec![node(
            kinds::MEMBER_DECLARATION,
            vec![
                ty(return_type),
                node(
                    kinds::METHOD_DECLARATION,
                    vec![
                        ident(name),
                        method_rest(kinds::METHOD_DECLARATOR_REST, params, body),
                    ],
                ),
            ],
        )],
    )
}

/// Method member with its own type parameters.
pub fn generic_method(
    keywords: &[&str],
    generics: &[&str],
    return_type: &str,
    name: &str,
    params: &[(&str, &str)],
    body: Option<Vec<ParseNode>>,
) -> ParseNode {
    let result = if return_type == "void" {
        tok("void")
    } else {
        ty(return_type)
    };
    member(
        keywords,
        vec![node(
            kinds::GENERIC_METHOD_OR_CONSTRUCTOR_DECL,
            vec![
                type_parameters(generics),
                node(
                    kinds::GENERIC_METHOD_OR_CONSTRUCTOR_REST,
                    vec![
                        result,
                        ident(name),
                        method_rest(kinds::METHOD_DECLARATOR_REST, params, body),
                    ],
                ),
            ],
        )],
    )
}

/// Constructor member without explicit `this`/`super` call.
pub fn constructor(
    keywords: &[&str],
    name: &str,
    params: &[(&str, &str)],
    body: Vec<ParseNode>,
) -> ParseNode {
    constructor_calling(keywords, name, params, None, &[], body)
}

/// Constructor member opening with `invocation(args)`, `invocation` being `this` or
/// `super`.
pub fn constructor_calling(
    keywords: &[&str],
    name: &str,
    params: &[(&str, &str)],
    invocation: Option<&str>,
    args: &[&str],
    body: Vec<ParseNode>,
) -> ParseNode {
    let mut ctor_body = vec![tok("{")];
    if let Some(keyword) = invocation {
        ctor_body.push(node(
            kinds::EXPLICIT_CONSTRUCTOR_INVOCATION,
            vec![tok(keyword), arguments(args), tok(";")],
        ));
    }
    ctor_body.extend(block_statements(body));
    ctor_body.push(tok("}"));
    member(
        keywords,
        vec![
            ident(name),
            node(
                kinds::CONSTRUCTOR_DECLARATOR_REST,
                vec![
                    formal_parameters(params),
                    node(kinds::CONSTRUCTOR_BODY, ctor_body),
                ],
            ),
        ],
    )
}

pub fn static_block(body: Vec<ParseNode>) -> ParseNode {
    node(
        kinds::CLASS_BODY_DECLARATION,
        vec![tok("static"), block(body)],
    )
}

fn interface_member(keywords: &[&str], decl: Vec<ParseNode>) -> ParseNode {
    node(
        kinds::INTERFACE_BODY_DECLARATION,
        vec![
            modifiers(keywords),
            node(kinds::INTERFACE_MEMBER_DECL, decl),
        ],
    )
}

pub fn interface_method(return_type: &str, name: &str, params: &[(&str, &str)]) -> ParseNode {
    if return_type == "void" {
        return interface_member(
            &[],
            vec![
                tok("void"),
                ident(name),
                node(
                    kinds::VOID_INTERFACE_METHOD_DECLARATOR_REST,
                    vec![formal_parameters(params), tok(";")],
                ),
            ],
        );
    }
    interface_member(
        &[],
        vec![node(
            kinds::INTERFACE_METHOD_OR_FIELD_DECL,
            vec![
                ty(return_type),
                ident(name),
                node(
                    kinds::INTERFACE_METHOD_OR_FIELD_REST,
                    vec![node(
                        kinds::INTERFACE_METHOD_DECLARATOR_REST,
                        vec![formal_parameters(params), tok(";")],
                    )],
                ),
            ],
        )],
    )
}

/// Interface constants sharing one type, from `(name, value)` pairs.
pub fn interface_constants(constant_type: &str, constants: &[(&str, &str)]) -> ParseNode {
    fn rest(value: &str) -> ParseNode {
        node(
            kinds::CONSTANT_DECLARATOR_REST,
            vec![tok("="), node(kinds::VARIABLE_INITIALIZER, vec![expr(value)])],
        )
    }

    let (first_name, first_value) = constants[0];
    let mut declarators = vec![rest(first_value)];
    for (name, value) in &constants[1..] {
        declarators.extend([
            tok(","),
            node(kinds::CONSTANT_DECLARATOR, vec![ident(name), rest(value)]),
        ]);
    }
    interface_member(
        &[],
        vec![node(
            kinds::INTERFACE_METHOD_OR_FIELD_DECL,
            vec![
                ty(constant_type),
                ident(first_name),
                node(
                    kinds::INTERFACE_METHOD_OR_FIELD_REST,
                    vec![node(kinds::CONSTANT_DECLARATORS_REST, declarators), tok(";")],
                ),
            ],
        )],
    )
}

/// Generic method of an interface.
pub fn interface_generic_method(
    generics: &[&str],
    return_type: &str,
    name: &str,
    params: &[(&str, &str)],
) -> ParseNode {
    let result = if return_type == "void" {
        tok("void")
    } else {
        ty(return_type)
    };
    interface_member(
        &[],
        vec![node(
            kinds::INTERFACE_GENERIC_METHOD_DECL,
            vec![
                type_parameters(generics),
                result,
                ident(name),
                node(
                    kinds::INTERFACE_METHOD_DECLARATOR_REST,
                    vec![formal_parameters(params), tok(";")],
                ),
            ],
        )],
    )
}

/// Member type of an interface.
pub fn interface_nested(keywords: &[&str], decl: ParseNode) -> ParseNode {
    interface_member(keywords, vec![decl])
}

// Statements. Helpers return `statement` nodes unless noted; bodies accept
// `statement` and `blockStatement` nodes alike.

/// Wraps every node that is not already a `blockStatement`.
pub fn block_statements(body: Vec<ParseNode>) -> Vec<ParseNode> {
    body.into_iter()
        .map(|stmt| {
            if stmt.kind == kinds::BLOCK_STATEMENT || stmt.is_comment() {
                stmt
            } else {
                node(kinds::BLOCK_STATEMENT, vec![stmt])
            }
        })
        .collect()
}

pub fn block(body: Vec<ParseNode>) -> ParseNode {
    let mut children = vec![tok("{")];
    children.extend(block_statements(body));
    children.push(tok("}"));
    node(kinds::BLOCK, children)
}

/// `blockStatement` declaring local variables.
pub fn local_var(var_type: &str, declarators: &[(&str, Option<&str>)]) -> ParseNode {
    node(
        kinds::BLOCK_STATEMENT,
        vec![node(
            kinds::LOCAL_VARIABLE_DECLARATION_STATEMENT,
            vec![
                node(
                    kinds::LOCAL_VARIABLE_DECLARATION,
                    vec![
                        node(kinds::VARIABLE_MODIFIERS, Vec::new()),
                        ty(var_type),
                        variable_declarators(declarators),
                    ],
                ),
                tok(";"),
            ],
        )],
    )
}

/// `blockStatement` declaring a local class; `decl` comes from [`type_declaration`].
pub fn local_class(decl: ParseNode) -> ParseNode {
    node(kinds::BLOCK_STATEMENT, vec![decl])
}

fn statement(children: Vec<ParseNode>) -> ParseNode {
    node(kinds::STATEMENT, children)
}

fn par_expression(condition: &str) -> ParseNode {
    node(
        kinds::PAR_EXPRESSION,
        vec![tok("("), expr(condition), tok(")")],
    )
}

pub fn expr_stmt(source: &str) -> ParseNode {
    statement(vec![
        node(kinds::STATEMENT_EXPRESSION, vec![expr(source)]),
        tok(";"),
    ])
}

pub fn block_stmt(body: Vec<ParseNode>) -> ParseNode {
    statement(vec![block(body)])
}

pub fn if_stmt(condition: &str, then_branch: ParseNode, else_branch: Option<ParseNode>) -> ParseNode {
    let mut children = vec![tok("if"), par_expression(condition), then_branch];
    if let Some(else_branch) = else_branch {
        children.extend([tok("else"), else_branch]);
    }
    statement(children)
}

pub fn while_stmt(condition: &str, body: ParseNode) -> ParseNode {
    statement(vec![tok("while"), par_expression(condition), body])
}

/// `switch` with one group per entry; a `None` label is `default`.
pub fn switch_stmt(value: &str, groups: Vec<(Vec<Option<&str>>, Vec<ParseNode>)>) -> ParseNode {
    let groups = groups
        .into_iter()
        .map(|(labels, body)| {
            let mut children: Vec<ParseNode> = labels
                .into_iter()
                .map(|label| match label {
                    Some(value) => node(kinds::SWITCH_LABEL, vec![tok("case"), expr(value), tok(":")]),
                    None => node(kinds::SWITCH_LABEL, vec![tok("default"), tok(":")]),
                })
                .collect();
            children.extend(block_statements(body));
            node(kinds::SWITCH_BLOCK_STATEMENT_GROUP, children)
        })
        .collect();
    statement(vec![
        tok("switch"),
        par_expression(value),
        tok("{"),
        node(kinds::SWITCH_BLOCK_STATEMENT_GROUPS, groups),
        tok("}"),
    ])
}

pub fn return_stmt(value: Option<&str>) -> ParseNode {
    let mut children = vec![tok("return")];
    children.extend(value.map(expr));
    children.push(tok(";"));
    statement(children)
}

pub fn throw_stmt(value: &str) -> ParseNode {
    statement(vec![tok("throw"), expr(value), tok(";")])
}

pub fn break_stmt(label: Option<&str>) -> ParseNode {
    let mut children = vec![tok("break")];
    children.extend(label.map(ident));
    children.push(tok(";"));
    statement(children)
}

pub fn labeled_stmt(label: &str, body: ParseNode) -> ParseNode {
    statement(vec![ident(label), tok(":"), body])
}

fn expr_token(word: &str) -> ParseNode {
    let first = word.chars().next().unwrap_or(' ');
    if EXPRESSION_KEYWORDS.contains(&word) {
        tok(word)
    } else if first.is_ascii_digit() || first == '"' || first == '\'' {
        lit(word)
    } else if first.is_alphabetic() || first == '_' || first == '$' {
        ident(word)
    } else {
        tok(word)
    }
}

fn split_dims(name: &str) -> (&str, usize) {
    let mut base = name;
    let mut dims = 0;
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped;
        dims += 1;
    }
    (base, dims)
}
