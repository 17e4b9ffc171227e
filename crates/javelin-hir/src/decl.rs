//! Matchers shared by declarations and statement bodies: modifiers, annotations,
//! variable declarators, parameters and argument lists.

use javelin_flow::Expression;
use javelin_syntax::{kinds, Matcher};
use javelin_types::JavaType;

use crate::model::Param;
use crate::signature::{match_declarator_id, match_dims, match_qualified_name, match_type};
use crate::{BuildError, Context, PeerMatchers};

/// Modifier keywords of one declaration; annotations are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    keywords: Vec<String>,
}

impl Modifiers {
    #[must_use]
    pub fn has(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.has("static")
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.has("final")
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        self.has("native")
    }

    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.has("synchronized")
    }
}

/// A list node of modifier items (`modifiers`, `classOrInterfaceModifiers`,
/// `variableModifiers`), each a keyword or an annotation.
pub(crate) fn match_modifiers(
    m: &mut Matcher<'_>,
    cx: &Context,
    peer: &dyn PeerMatchers,
    list_kind: &str,
    item_kind: &str,
) -> Result<Modifiers, BuildError> {
    m.expect_with(&[list_kind], |m| {
        let mut modifiers = Modifiers::default();
        m.loop_match(item_kind, |m| {
            match m.try_match(kinds::MODIFIER_KEYWORDS)? {
                Some(keyword) => modifiers.keywords.push(keyword.to_owned()),
                None => match_annotation(m, cx, peer)?,
            }
            Ok::<_, BuildError>(())
        })?;
        Ok::<_, BuildError>(modifiers)
    })
}

/// `annotation: '@' qualifiedName ('(' expression? ')')?`, discarded.
pub(crate) fn match_annotation(
    m: &mut Matcher<'_>,
    cx: &Context,
    peer: &dyn PeerMatchers,
) -> Result<(), BuildError> {
    m.expect_with(&[kinds::ANNOTATION], |m| {
        m.expect(&["@"])?;
        let name = match_qualified_name(m)?;
        if m.try_match(&["("])?.is_some() {
            if m.next_is(&[kinds::EXPRESSION]) {
                peer.match_expression(m, cx)?;
            }
            m.expect(&[")"])?;
        }
        tracing::trace!(name, "dropped annotation");
        Ok::<_, BuildError>(())
    })
}

/// One variable of a field or local variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarator {
    pub name: String,
    pub ty: JavaType,
    pub initializer: Option<Expression>,
}

/// `variableDeclarators: variableDeclarator (',' variableDeclarator)*`
pub(crate) fn match_variable_declarators(
    m: &mut Matcher<'_>,
    cx: &Context,
    peer: &dyn PeerMatchers,
    ty: &JavaType,
) -> Result<Vec<Declarator>, BuildError> {
    m.expect_with(&[kinds::VARIABLE_DECLARATORS], |m| {
        let mut declarators = Vec::new();
        loop {
            let declarator = m.expect_with(&[kinds::VARIABLE_DECLARATOR], |m| {
                let (name, ty) = match_declarator_id(m, ty.clone())?;
                let initializer = if m.try_match(&["="])?.is_some() {
                    Some(match_variable_initializer(m, cx, peer)?)
                } else {
                    None
                };
                Ok::<_, BuildError>(Declarator {
                    name,
                    ty,
                    initializer,
                })
            })?;
            declarators.push(declarator);
            if m.try_match(&[","])?.is_none() {
                break;
            }
        }
        Ok::<_, BuildError>(declarators)
    })
}

/// `constantDeclaratorRest: ('[' ']')* '=' variableInitializer`
pub(crate) fn match_constant_declarator_rest(
    m: &mut Matcher<'_>,
    cx: &Context,
    peer: &dyn PeerMatchers,
    ty: JavaType,
) -> Result<(JavaType, Expression), BuildError> {
    m.expect_with(&[kinds::CONSTANT_DECLARATOR_REST], |m| {
        let ty = match_dims(m, ty)?;
        m.expect(&["="])?;
        let value = match_variable_initializer(m, cx, peer)?;
        Ok::<_, BuildError>((ty, value))
    })
}

/// `variableInitializer: arrayInitializer | expression`. Array initializers become
/// array literals.
pub(crate) fn match_variable_initializer(
    m: &mut Matcher<'_>,
    cx: &Context,
    peer: &dyn PeerMatchers,
) -> Result<Expression, BuildError> {
    m.expect_with(&[kinds::VARIABLE_INITIALIZER], |m| {
        if !m.next_is(&[kinds::ARRAY_INITIALIZER]) {
            return peer.match_expression(m, cx);
        }
        m.expect_with(&[kinds::ARRAY_INITIALIZER], |m| {
            m.expect(&["{"])?;
            let mut elements = Vec::new();
            while m.next_is(&[kinds::VARIABLE_INITIALIZER]) {
                elements.push(match_variable_initializer(m, cx, peer)?.0);
                if m.try_match(&[","])?.is_none() {
                    break;
                }
            }
            m.expect(&["}"])?;
            Ok::<_, BuildError>(Expression::new(format!("[{}]", elements.join(", "))))
        })
    })
}

/// `formalParameters: '(' formalParameterDecls? ')'`
pub(crate) fn match_formal_parameters(
    m: &mut Matcher<'_>,
    cx: &Context,
    peer: &dyn PeerMatchers,
) -> Result<Vec<Param>, BuildError> {
    m.expect_with(&[kinds::FORMAL_PARAMETERS], |m| {
        m.expect(&["("])?;
        let mut params = Vec::new();
        if m.next_is(&[kinds::FORMAL_PARAMETER_DECLS]) {
            match_formal_parameter_decls(m, cx, peer, &mut params)?;
        }
        m.expect(&[")"])?;
        Ok::<_, BuildError>(params)
    })
}

fn match_formal_parameter_decls(
    m: &mut Matcher<'_>,
    cx: &Context,
    peer: &dyn PeerMatchers,
    params: &mut Vec<Param>,
) -> Result<(), BuildError> {
    m.expect_with(&[kinds::FORMAL_PARAMETER_DECLS], |m| {
        match_modifiers(
            m,
            cx,
            peer,
            kinds::VARIABLE_MODIFIERS,
            kinds::VARIABLE_MODIFIER,
        )?;
        let ty = match_type(m, cx)?;
        m.expect_with(&[kinds::FORMAL_PARAMETER_DECLS_REST], |m| {
            let variadic = m.try_match(&["..."])?.is_some();
            let (name, ty) = match_declarator_id(m, ty)?;
            let ty = if variadic { JavaType::array_of(ty) } else { ty };
            params.push(Param { name, ty, variadic });
            if !variadic && m.try_match(&[","])?.is_some() {
                match_formal_parameter_decls(m, cx, peer, params)?;
            }
            Ok::<_, BuildError>(())
        })
    })
}

/// `arguments: '(' expressionList? ')'`
pub(crate) fn match_arguments(
    m: &mut Matcher<'_>,
    cx: &Context,
    peer: &dyn PeerMatchers,
) -> Result<Vec<Expression>, BuildError> {
    m.expect_with(&[kinds::ARGUMENTS], |m| {
        m.expect(&["("])?;
        let arguments = m
            .try_match_with(&[kinds::EXPRESSION_LIST], |m| {
                let mut arguments = Vec::new();
                loop {
                    arguments.push(peer.match_expression(m, cx)?);
                    if m.try_match(&[","])?.is_none() {
                        break;
                    }
                }
                Ok::<_, BuildError>(arguments)
            })?
            .unwrap_or_default();
        m.expect(&[")"])?;
        Ok::<_, BuildError>(arguments)
    })
}
