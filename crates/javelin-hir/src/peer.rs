use javelin_flow::{Expression, Stmt};
use javelin_syntax::{kinds, Matcher};
use javelin_types::JavaType;

use crate::builder::Builder;
use crate::decl::{self, Declarator, Modifiers};
use crate::model::{ModuleGraph, ModuleId};
use crate::{signature, BuildError, Context};

/// Expression and statement matchers the declaration builder delegates to.
///
/// Implementations translate the expression and statement grammar; the builder only
/// knows declarations.
pub trait PeerMatchers {
    /// Consumes one `expression` node and renders it.
    fn match_expression(
        &self,
        m: &mut Matcher<'_>,
        cx: &Context,
    ) -> Result<Expression, BuildError>;

    /// Consumes every consecutive `blockStatement` node at the cursor.
    fn match_block_statements(&self, scope: &mut BodyScope<'_, '_>)
        -> Result<Vec<Stmt>, BuildError>;

    /// Renders an argument list. An empty list renders as `()` when `explicit_self`
    /// is set (a bare `super` would forward the caller's arguments) and as nothing
    /// otherwise.
    fn compose_arguments(&self, arguments: &[Expression], explicit_self: bool) -> String;
}

/// Matching state for one method, constructor or initializer body.
///
/// Mirrors the [`Matcher`] combinators so statement matchers can keep calling back
/// into the builder, e.g. for classes declared inside the body.
pub struct BodyScope<'b, 't> {
    m: &'b mut Matcher<'t>,
    graph: &'b mut ModuleGraph,
    peer: &'b dyn PeerMatchers,
    cx: Context,
    local_classes: Vec<ModuleId>,
}

impl<'b, 't> BodyScope<'b, 't> {
    pub(crate) fn new(
        m: &'b mut Matcher<'t>,
        graph: &'b mut ModuleGraph,
        peer: &'b dyn PeerMatchers,
        cx: Context,
    ) -> Self {
        Self {
            m,
            graph,
            peer,
            cx,
            local_classes: Vec::new(),
        }
    }

    /// Classes declared in the body so far.
    pub(crate) fn finish(self) -> Vec<ModuleId> {
        self.local_classes
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn matcher(&mut self) -> &mut Matcher<'t> {
        &mut *self.m
    }

    #[must_use]
    pub fn next_is(&self, kinds: &[&str]) -> bool {
        self.m.next_is(kinds)
    }

    #[must_use]
    pub fn peek_kind(&self) -> Option<&'t str> {
        self.m.peek_kind()
    }

    pub fn expect(&mut self, kinds: &[&str]) -> Result<&'t str, BuildError> {
        Ok(self.m.expect(kinds)?)
    }

    pub fn try_match(&mut self, kinds: &[&str]) -> Result<Option<&'t str>, BuildError> {
        Ok(self.m.try_match(kinds)?)
    }

    pub fn match_name(&mut self) -> Result<String, BuildError> {
        Ok(self.m.match_name()?)
    }

    pub fn take_comments(&mut self) -> Vec<String> {
        self.m.take_comments()
    }

    /// [`Matcher::expect_with`] with the scope handed to `body`.
    pub fn expect_with<T>(
        &mut self,
        kinds: &[&str],
        body: impl FnOnce(&mut Self) -> Result<T, BuildError>,
    ) -> Result<T, BuildError> {
        self.m.enter(kinds)?;
        let result = body(self);
        let exit = self.m.leave();
        let value = result?;
        exit?;
        Ok(value)
    }

    pub fn try_match_with<T>(
        &mut self,
        kinds: &[&str],
        body: impl FnOnce(&mut Self) -> Result<T, BuildError>,
    ) -> Result<Option<T>, BuildError> {
        if !self.next_is(kinds) {
            return Ok(None);
        }
        self.expect_with(kinds, body).map(Some)
    }

    pub fn loop_match(
        &mut self,
        kind: &str,
        mut body: impl FnMut(&mut Self) -> Result<(), BuildError>,
    ) -> Result<usize, BuildError> {
        let mut count = 0;
        while self.try_match_with(&[kind], &mut body)?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    pub fn match_expression(&mut self) -> Result<Expression, BuildError> {
        self.peer.match_expression(self.m, &self.cx)
    }

    /// Statements of a nested block, matched with the same peer.
    pub fn match_block_statements(&mut self) -> Result<Vec<Stmt>, BuildError> {
        let peer = self.peer;
        peer.match_block_statements(self)
    }

    #[must_use]
    pub fn compose_arguments(&self, arguments: &[Expression], explicit_self: bool) -> String {
        self.peer.compose_arguments(arguments, explicit_self)
    }

    pub fn match_arguments(&mut self) -> Result<Vec<Expression>, BuildError> {
        decl::match_arguments(self.m, &self.cx, self.peer)
    }

    pub fn match_type(&mut self) -> Result<JavaType, BuildError> {
        Ok(signature::match_type(self.m, &self.cx)?)
    }

    pub fn match_variable_modifiers(&mut self) -> Result<Modifiers, BuildError> {
        decl::match_modifiers(
            self.m,
            &self.cx,
            self.peer,
            kinds::VARIABLE_MODIFIERS,
            kinds::VARIABLE_MODIFIER,
        )
    }

    pub fn match_variable_declarators(
        &mut self,
        ty: &JavaType,
    ) -> Result<Vec<Declarator>, BuildError> {
        decl::match_variable_declarators(self.m, &self.cx, self.peer, ty)
    }

    /// A `classOrInterfaceDeclaration` inside the body. The class is added to the
    /// enclosing module and can be referenced by later statements of the body.
    pub fn match_local_type_declaration(&mut self) -> Result<ModuleId, BuildError> {
        let id = Builder::new(self.graph, self.peer)
            .match_class_or_interface_declaration(self.m, &self.cx)?;
        let name = self.graph[id].name.clone();
        self.cx.declare_local_type(&name, self.graph.ruby_path(id));
        self.local_classes.push(id);
        Ok(id)
    }
}
