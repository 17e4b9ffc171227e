//! Node kinds of the grammar front-end.
//!
//! Rule names follow the front-end's Java 5 grammar. Keyword and punctuation tokens are
//! not listed: their kind is their own text.

pub const IDENTIFIER: &str = "Identifier";
pub const LITERAL: &str = "Literal";
pub const LINE_COMMENT: &str = "line_comment";

// Compilation unit.
pub const COMPILATION_UNIT: &str = "compilationUnit";
pub const PACKAGE_DECLARATION: &str = "packageDeclaration";
pub const IMPORT_DECLARATION: &str = "importDeclaration";
pub const QUALIFIED_NAME: &str = "qualifiedName";
pub const QUALIFIED_NAME_LIST: &str = "qualifiedNameList";
pub const TYPE_DECLARATION: &str = "typeDeclaration";
pub const CLASS_OR_INTERFACE_DECLARATION: &str = "classOrInterfaceDeclaration";
pub const CLASS_OR_INTERFACE_MODIFIERS: &str = "classOrInterfaceModifiers";
pub const CLASS_OR_INTERFACE_MODIFIER: &str = "classOrInterfaceModifier";
pub const MODIFIERS: &str = "modifiers";
pub const MODIFIER: &str = "modifier";
pub const ANNOTATION: &str = "annotation";

// Classes and enums.
pub const CLASS_DECLARATION: &str = "classDeclaration";
pub const NORMAL_CLASS_DECLARATION: &str = "normalClassDeclaration";
pub const ENUM_DECLARATION: &str = "enumDeclaration";
pub const ENUM_BODY: &str = "enumBody";
pub const ENUM_CONSTANTS: &str = "enumConstants";
pub const ENUM_CONSTANT: &str = "enumConstant";
pub const ENUM_BODY_DECLARATIONS: &str = "enumBodyDeclarations";
pub const CLASS_BODY: &str = "classBody";
pub const CLASS_BODY_DECLARATION: &str = "classBodyDeclaration";
pub const MEMBER_DECL: &str = "memberDecl";
pub const MEMBER_DECLARATION: &str = "memberDeclaration";
pub const METHOD_DECLARATION: &str = "methodDeclaration";
pub const FIELD_DECLARATION: &str = "fieldDeclaration";
pub const GENERIC_METHOD_OR_CONSTRUCTOR_DECL: &str = "genericMethodOrConstructorDecl";
pub const GENERIC_METHOD_OR_CONSTRUCTOR_REST: &str = "genericMethodOrConstructorRest";
pub const METHOD_DECLARATOR_REST: &str = "methodDeclaratorRest";
pub const VOID_METHOD_DECLARATOR_REST: &str = "voidMethodDeclaratorRest";
pub const CONSTRUCTOR_DECLARATOR_REST: &str = "constructorDeclaratorRest";
pub const CONSTRUCTOR_BODY: &str = "constructorBody";
pub const EXPLICIT_CONSTRUCTOR_INVOCATION: &str = "explicitConstructorInvocation";
pub const METHOD_BODY: &str = "methodBody";

// Interfaces.
pub const INTERFACE_DECLARATION: &str = "interfaceDeclaration";
pub const NORMAL_INTERFACE_DECLARATION: &str = "normalInterfaceDeclaration";
pub const INTERFACE_BODY: &str = "interfaceBody";
pub const INTERFACE_BODY_DECLARATION: &str = "interfaceBodyDeclaration";
pub const INTERFACE_MEMBER_DECL: &str = "interfaceMemberDecl";
pub const INTERFACE_METHOD_OR_FIELD_DECL: &str = "interfaceMethodOrFieldDecl";
pub const INTERFACE_METHOD_OR_FIELD_REST: &str = "interfaceMethodOrFieldRest";
pub const INTERFACE_METHOD_DECLARATOR_REST: &str = "interfaceMethodDeclaratorRest";
pub const VOID_INTERFACE_METHOD_DECLARATOR_REST: &str = "voidInterfaceMethodDeclaratorRest";
pub const INTERFACE_GENERIC_METHOD_DECL: &str = "interfaceGenericMethodDecl";
pub const CONSTANT_DECLARATORS_REST: &str = "constantDeclaratorsRest";
pub const CONSTANT_DECLARATOR: &str = "constantDeclarator";
pub const CONSTANT_DECLARATOR_REST: &str = "constantDeclaratorRest";
pub const ANNOTATION_TYPE_DECLARATION: &str = "annotationTypeDeclaration";
pub const ANNOTATION_TYPE_BODY: &str = "annotationTypeBody";
pub const ANNOTATION_TYPE_ELEMENT_DECLARATION: &str = "annotationTypeElementDeclaration";
pub const ANNOTATION_TYPE_ELEMENT_REST: &str = "annotationTypeElementRest";
pub const ANNOTATION_METHOD_OR_CONSTANT_REST: &str = "annotationMethodOrConstantRest";
pub const ANNOTATION_METHOD_REST: &str = "annotationMethodRest";

// Types and generics.
pub const TYPE: &str = "type";
pub const TYPE_LIST: &str = "typeList";
pub const CLASS_OR_INTERFACE_TYPE: &str = "classOrInterfaceType";
pub const PRIMITIVE_TYPE: &str = "primitiveType";
pub const TYPE_ARGUMENTS: &str = "typeArguments";
pub const TYPE_ARGUMENT: &str = "typeArgument";
pub const TYPE_PARAMETERS: &str = "typeParameters";
pub const TYPE_PARAMETER: &str = "typeParameter";
pub const TYPE_BOUND: &str = "typeBound";

// Variables and parameters.
pub const FORMAL_PARAMETERS: &str = "formalParameters";
pub const FORMAL_PARAMETER_DECLS: &str = "formalParameterDecls";
pub const FORMAL_PARAMETER_DECLS_REST: &str = "formalParameterDeclsRest";
pub const VARIABLE_MODIFIERS: &str = "variableModifiers";
pub const VARIABLE_MODIFIER: &str = "variableModifier";
pub const VARIABLE_DECLARATORS: &str = "variableDeclarators";
pub const VARIABLE_DECLARATOR: &str = "variableDeclarator";
pub const VARIABLE_DECLARATOR_ID: &str = "variableDeclaratorId";
pub const VARIABLE_INITIALIZER: &str = "variableInitializer";
pub const ARRAY_INITIALIZER: &str = "arrayInitializer";

// Statements and expressions (peer matchers).
pub const BLOCK: &str = "block";
pub const BLOCK_STATEMENT: &str = "blockStatement";
pub const LOCAL_VARIABLE_DECLARATION_STATEMENT: &str = "localVariableDeclarationStatement";
pub const LOCAL_VARIABLE_DECLARATION: &str = "localVariableDeclaration";
pub const STATEMENT: &str = "statement";
pub const STATEMENT_EXPRESSION: &str = "statementExpression";
pub const PAR_EXPRESSION: &str = "parExpression";
pub const SWITCH_BLOCK_STATEMENT_GROUPS: &str = "switchBlockStatementGroups";
pub const SWITCH_BLOCK_STATEMENT_GROUP: &str = "switchBlockStatementGroup";
pub const SWITCH_LABEL: &str = "switchLabel";
pub const EXPRESSION: &str = "expression";
pub const ARGUMENTS: &str = "arguments";
pub const EXPRESSION_LIST: &str = "expressionList";

/// Modifier keywords accepted by `modifier` / `classOrInterfaceModifier`.
pub const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "transient",
    "native",
    "volatile",
    "synchronized",
    "strictfp",
];

pub const PRIMITIVE_KEYWORDS: &[&str] = &[
    "boolean", "char", "byte", "short", "int", "long", "float", "double",
];
