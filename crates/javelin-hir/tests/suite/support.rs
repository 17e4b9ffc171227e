use javelin_flow::{Expression, Stmt};
use javelin_hir::{
    build_compilation_unit, BodyScope, BuildError, Context, InitStep, JavaModule, ModuleGraph,
    PeerMatchers,
};
use javelin_test_utils::compilation_unit;
use javelin_syntax::{kinds, Matcher, ParseNode};

/// Joins expression tokens with spaces; bodies may hold expression statements and
/// local classes only.
pub struct TokenPeer;

impl PeerMatchers for TokenPeer {
    fn match_expression(
        &self,
        m: &mut Matcher<'_>,
        _cx: &Context,
    ) -> Result<Expression, BuildError> {
        m.expect_with(&[kinds::EXPRESSION], |m| {
            let mut words = Vec::new();
            while let Some(node) = m.peek() {
                words.push(m.expect_text(&[node.kind.as_str()])?);
            }
            Ok::<_, BuildError>(Expression::new(words.join(" ")))
        })
    }

    fn match_block_statements(
        &self,
        scope: &mut BodyScope<'_, '_>,
    ) -> Result<Vec<Stmt>, BuildError> {
        let mut stmts = Vec::new();
        scope.loop_match(kinds::BLOCK_STATEMENT, |scope| {
            if scope.next_is(&[kinds::CLASS_OR_INTERFACE_DECLARATION]) {
                scope.match_local_type_declaration()?;
                return Ok(());
            }
            scope.expect_with(&[kinds::STATEMENT], |scope| {
                let text = scope.expect_with(&[kinds::STATEMENT_EXPRESSION], |scope| {
                    scope.match_expression()
                })?;
                scope.expect(&[";"])?;
                stmts.push(Stmt::Other(text));
                Ok(())
            })
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

pub fn try_build(types: Vec<ParseNode>) -> Result<ModuleGraph, BuildError> {
    build_compilation_unit(&compilation_unit(None, &[], types), &TokenPeer)
}

pub fn build(types: Vec<ParseNode>) -> ModuleGraph {
    try_build(types).expect("compilation unit should build")
}

pub fn module<'g>(graph: &'g ModuleGraph, name: &str) -> &'g JavaModule {
    let id = graph
        .find(name)
        .unwrap_or_else(|| panic!("no module named {name}"));
    &graph[id]
}

/// Initialization plan as readable Ruby-ish steps.
pub fn describe(plan: &[InitStep<'_>]) -> Vec<String> {
    plan.iter()
        .map(|step| match step {
            InitStep::Default(field) => format!("{} = {}", field.ivar(), field.ty.default_value()),
            InitStep::Initialize(field) => match &field.initializer {
                Some(value) => format!("{} = {value}", field.ivar()),
                None => format!("{} = ?", field.ivar()),
            },
            InitStep::Super(arguments) => format!("super{arguments}"),
            InitStep::Delegate(arguments) => format!("initialize{arguments}"),
        })
        .collect()
}
