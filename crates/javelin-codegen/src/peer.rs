//! Reference statement and expression matchers.
//!
//! Covers blocks, local variables and local classes, expression statements, `if`,
//! `while`, `switch`, `return`, `throw`, `break` and labeled statements. Any other
//! statement shape is a structural mismatch.

use javelin_flow::{CaseBranch, CaseLabel, Expression, Stmt};
use javelin_hir::{BodyScope, BuildError, Context, PeerMatchers};
use javelin_syntax::{kinds, MatchError, Matcher};

use crate::expr::render_tokens;

/// Operator spellings the front-end splits into single-character tokens.
const GREATER_THAN_OPERATORS: &[&[&str]] = &[
    &[">", ">", ">", "="],
    &[">", ">", "="],
    &[">", ">", ">"],
    &[">", ">"],
    &[">", "="],
    &[">"],
];
const LESS_THAN_OPERATORS: &[&[&str]] = &[&["<", "<", "="], &["<", "<"], &["<", "="], &["<"]];

/// Statement kinds accepted after `statement`, for mismatch reports.
const STATEMENT_STARTS: &[&str] = &[
    kinds::BLOCK,
    kinds::STATEMENT_EXPRESSION,
    kinds::IDENTIFIER,
    "if",
    "while",
    "switch",
    "return",
    "throw",
    "break",
    ";",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct RubyPeer;

impl PeerMatchers for RubyPeer {
    fn match_expression(
        &self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<Expression, BuildError> {
        let tokens = m.expect_with(&[kinds::EXPRESSION], |m| {
            let mut tokens = Vec::new();
            collect_tokens(m, &mut tokens)?;
            Ok::<_, MatchError>(tokens)
        })?;
        Ok(Expression::new(render_tokens(&tokens, cx)?))
    }

    fn match_block_statements(
        &self,
        scope: &mut BodyScope<'_, '_>,
    ) -> Result<Vec<Stmt>, BuildError> {
        let mut stmts = Vec::new();
        scope.loop_match(kinds::BLOCK_STATEMENT, |scope| {
            stmts.extend(scope.take_comments().into_iter().map(Stmt::Comment));
            self.match_block_statement(scope, &mut stmts)
        })?;
        Ok(stmts)
    }

    fn compose_arguments(&self, arguments: &[Expression], explicit_self: bool) -> String {
        if arguments.is_empty() && !explicit_self {
            return String::new();
        }
        let joined: Vec<&str> = arguments.iter().map(Expression::as_str).collect();
        format!("({})", joined.join(", "))
    }
}

/// Leaf texts below the cursor, in order. Type arguments are dropped and split
/// comparison and shift operators are glued back together.
fn collect_tokens(m: &mut Matcher<'_>, tokens: &mut Vec<String>) -> Result<(), MatchError> {
    while let Some(node) = m.peek() {
        let kind = node.kind.as_str();
        if kind == kinds::TYPE_ARGUMENTS {
            m.expect_with(&[kind], |m| collect_tokens(m, &mut Vec::new()))?;
        } else if !node.is_leaf() {
            m.expect_with(&[kind], |m| collect_tokens(m, tokens))?;
        } else if let Some(options) = split_operator(kind) {
            if let Some(op) = m.multi_match(options)? {
                tokens.push(op);
            }
        } else {
            tokens.push(m.expect_text(&[kind])?);
        }
    }
    Ok(())
}

fn split_operator(kind: &str) -> Option<&'static [&'static [&'static str]]> {
    match kind {
        ">" => Some(GREATER_THAN_OPERATORS),
        "<" => Some(LESS_THAN_OPERATORS),
        _ => None,
    }
}

impl RubyPeer {
    /// `blockStatement: localVariableDeclarationStatement | classOrInterfaceDeclaration | statement`
    fn match_block_statement(
        &self,
        scope: &mut BodyScope<'_, '_>,
        stmts: &mut Vec<Stmt>,
    ) -> Result<(), BuildError> {
        if scope.next_is(&[kinds::LOCAL_VARIABLE_DECLARATION_STATEMENT]) {
            stmts.extend(self.match_local_variables(scope)?);
        } else if scope.next_is(&[kinds::CLASS_OR_INTERFACE_DECLARATION]) {
            scope.match_local_type_declaration()?;
        } else {
            stmts.extend(self.match_statement(scope)?);
        }
        Ok(())
    }

    /// Every declarator becomes an assignment; variables without initializer start at
    /// the default of their type.
    fn match_local_variables(&self, scope: &mut BodyScope<'_, '_>) -> Result<Vec<Stmt>, BuildError> {
        scope.expect_with(&[kinds::LOCAL_VARIABLE_DECLARATION_STATEMENT], |scope| {
            let declarators = scope.expect_with(&[kinds::LOCAL_VARIABLE_DECLARATION], |scope| {
                scope.match_variable_modifiers()?;
                let ty = scope.match_type()?;
                scope.match_variable_declarators(&ty)
            })?;
            scope.expect(&[";"])?;
            Ok(declarators
                .into_iter()
                .map(|declarator| {
                    let value = declarator
                        .initializer
                        .map_or_else(|| declarator.ty.default_value().to_owned(), |e| e.0);
                    Stmt::other(format!("{} = {value}", declarator.name))
                })
                .collect())
        })
    }

    /// One `statement`; the empty statement yields nothing.
    fn match_statement(&self, scope: &mut BodyScope<'_, '_>) -> Result<Option<Stmt>, BuildError> {
        scope.expect_with(&[kinds::STATEMENT], |scope| {
            let stmt = match scope.peek_kind() {
                Some(kinds::BLOCK) => Stmt::Block(self.match_block(scope)?),
                Some("if") => {
                    scope.expect(&["if"])?;
                    let condition = self.match_par_expression(scope)?;
                    let then_branch = self.match_branch(scope)?;
                    let else_branch = match scope.try_match(&["else"])? {
                        Some(_) => Some(self.match_branch(scope)?),
                        None => None,
                    };
                    Stmt::If {
                        condition,
                        then_branch,
                        else_branch,
                    }
                }
                Some("while") => {
                    scope.expect(&["while"])?;
                    let condition = self.match_par_expression(scope)?;
                    let body = self.match_branch(scope)?;
                    Stmt::While { condition, body }
                }
                Some("switch") => self.match_switch(scope)?,
                Some("return") => {
                    scope.expect(&["return"])?;
                    let value = if scope.next_is(&[kinds::EXPRESSION]) {
                        Some(scope.match_expression()?)
                    } else {
                        None
                    };
                    scope.expect(&[";"])?;
                    Stmt::Return(value)
                }
                Some("throw") => {
                    scope.expect(&["throw"])?;
                    let value = scope.match_expression()?;
                    scope.expect(&[";"])?;
                    Stmt::Raise(value)
                }
                Some("break") => {
                    scope.expect(&["break"])?;
                    let label = if scope.next_is(&[kinds::IDENTIFIER]) {
                        Some(scope.match_name()?)
                    } else {
                        None
                    };
                    scope.expect(&[";"])?;
                    Stmt::Break { label }
                }
                Some(";") => {
                    scope.expect(&[";"])?;
                    return Ok(None);
                }
                Some(kinds::STATEMENT_EXPRESSION) => {
                    let value = scope.expect_with(&[kinds::STATEMENT_EXPRESSION], |scope| {
                        scope.match_expression()
                    })?;
                    scope.expect(&[";"])?;
                    Stmt::Other(value)
                }
                Some(kinds::IDENTIFIER) => {
                    let label = scope.match_name()?;
                    scope.expect(&[":"])?;
                    let body = self.match_branch(scope)?;
                    Stmt::Labeled { label, body }
                }
                _ => return Err(scope.matcher().mismatch(STATEMENT_STARTS).into()),
            };
            Ok(Some(stmt))
        })
    }

    /// `block: '{' blockStatement* '}'`
    fn match_block(&self, scope: &mut BodyScope<'_, '_>) -> Result<Vec<Stmt>, BuildError> {
        scope.expect_with(&[kinds::BLOCK], |scope| {
            scope.expect(&["{"])?;
            let mut stmts = self.match_block_statements(scope)?;
            scope.expect(&["}"])?;
            stmts.extend(scope.take_comments().into_iter().map(Stmt::Comment));
            Ok(stmts)
        })
    }

    /// The statement controlled by `if`, `else`, `while` or a label, flattened when it
    /// is a block.
    fn match_branch(&self, scope: &mut BodyScope<'_, '_>) -> Result<Vec<Stmt>, BuildError> {
        Ok(match self.match_statement(scope)? {
            Some(Stmt::Block(stmts)) => stmts,
            Some(stmt) => vec![stmt],
            None => Vec::new(),
        })
    }

    /// `parExpression: '(' expression ')'`
    fn match_par_expression(&self, scope: &mut BodyScope<'_, '_>) -> Result<Expression, BuildError> {
        scope.expect_with(&[kinds::PAR_EXPRESSION], |scope| {
            scope.expect(&["("])?;
            let value = scope.match_expression()?;
            scope.expect(&[")"])?;
            Ok(value)
        })
    }

    /// `'switch' parExpression '{' switchBlockStatementGroups '}'`
    ///
    /// Groups are handed over as open branches in source order; fall-through is
    /// resolved later by the normalizer.
    fn match_switch(&self, scope: &mut BodyScope<'_, '_>) -> Result<Stmt, BuildError> {
        scope.expect(&["switch"])?;
        let value = self.match_par_expression(scope)?;
        scope.expect(&["{"])?;
        let mut branches = Vec::new();
        scope.try_match_with(&[kinds::SWITCH_BLOCK_STATEMENT_GROUPS], |scope| {
            scope.loop_match(kinds::SWITCH_BLOCK_STATEMENT_GROUP, |scope| {
                let mut labels = Vec::new();
                scope.loop_match(kinds::SWITCH_LABEL, |scope| {
                    if scope.try_match(&["default"])?.is_some() {
                        labels.push(CaseLabel::Default);
                    } else {
                        scope.expect(&["case"])?;
                        labels.push(CaseLabel::Value(scope.match_expression()?));
                    }
                    scope.expect(&[":"])?;
                    Ok(())
                })?;
                let body = self.match_block_statements(scope)?;
                branches.push(CaseBranch::open(labels, body));
                Ok(())
            })
        })?;
        scope.expect(&["}"])?;
        Ok(Stmt::Case { value, branches })
    }
}
