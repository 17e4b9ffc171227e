//! Matchers for types, type parameters and other signature pieces that never contain
//! expressions.

use javelin_syntax::{kinds, MatchError, Matcher};
use javelin_types::{ClassType, JavaType, PrimitiveType};

use crate::Context;

/// `type: (classOrInterfaceType | primitiveType) ('[' ']')*`
pub(crate) fn match_type(m: &mut Matcher<'_>, cx: &Context) -> Result<JavaType, MatchError> {
    m.expect_with(&[kinds::TYPE], |m| {
        let base = if m.next_is(&[kinds::PRIMITIVE_TYPE]) {
            let keyword = m.expect_with(&[kinds::PRIMITIVE_TYPE], |m| {
                m.expect(kinds::PRIMITIVE_KEYWORDS)
            })?;
            PrimitiveType::from_keyword(keyword).map_or_else(JavaType::object, JavaType::Primitive)
        } else {
            match_class_type(m, cx)?
        };
        match_dims(m, base)
    })
}

/// Trailing `[]` pairs, each wrapping `ty` in an array.
pub(crate) fn match_dims(m: &mut Matcher<'_>, mut ty: JavaType) -> Result<JavaType, MatchError> {
    while m.try_match(&["["])?.is_some() {
        m.expect(&["]"])?;
        ty = JavaType::array_of(ty);
    }
    Ok(ty)
}

fn match_class_type(m: &mut Matcher<'_>, cx: &Context) -> Result<JavaType, MatchError> {
    m.expect_with(&[kinds::CLASS_OR_INTERFACE_TYPE], |m| {
        let mut segments = Vec::new();
        loop {
            segments.push(m.match_name()?);
            if m.next_is(&[kinds::TYPE_ARGUMENTS]) {
                match_type_arguments(m, cx)?;
            }
            if m.try_match(&["."])?.is_none() {
                break;
            }
        }
        Ok::<_, MatchError>(resolve_class(&segments, cx))
    })
}

fn resolve_class(segments: &[String], cx: &Context) -> JavaType {
    if let [name] = segments {
        if cx.is_type_param(name) {
            return JavaType::object();
        }
        if let Some(path) = cx.local_type(name) {
            return JavaType::Class(ClassType::new(Vec::new(), path.to_vec()));
        }
    }
    JavaType::Class(ClassType::from_dotted(&segments.join(".")))
}

/// Type arguments are erased; they are matched only to keep the cursor complete.
fn match_type_arguments(m: &mut Matcher<'_>, cx: &Context) -> Result<(), MatchError> {
    m.expect_with(&[kinds::TYPE_ARGUMENTS], |m| {
        m.expect(&["<"])?;
        loop {
            m.expect_with(&[kinds::TYPE_ARGUMENT], |m| {
                if m.try_match(&["?"])?.is_some() {
                    if m.try_match(&["extends", "super"])?.is_some() {
                        match_type(m, cx)?;
                    }
                } else {
                    match_type(m, cx)?;
                }
                Ok::<_, MatchError>(())
            })?;
            if m.try_match(&[","])?.is_none() {
                break;
            }
        }
        m.expect(&[">"])?;
        Ok::<_, MatchError>(())
    })
}

/// `typeParameters: '<' typeParameter (',' typeParameter)* '>'`; returns the names,
/// bounds are consumed and dropped.
pub(crate) fn match_type_parameters(
    m: &mut Matcher<'_>,
    cx: &Context,
) -> Result<Vec<String>, MatchError> {
    m.expect_with(&[kinds::TYPE_PARAMETERS], |m| {
        m.expect(&["<"])?;
        let mut names = Vec::new();
        loop {
            let name = m.expect_with(&[kinds::TYPE_PARAMETER], |m| {
                let name = m.match_name()?;
                if m.try_match(&["extends"])?.is_some() {
                    m.expect_with(&[kinds::TYPE_BOUND], |m| {
                        loop {
                            match_type(m, cx)?;
                            if m.try_match(&["&"])?.is_none() {
                                break;
                            }
                        }
                        Ok::<_, MatchError>(())
                    })?;
                }
                Ok::<_, MatchError>(name)
            })?;
            names.push(name);
            if m.try_match(&[","])?.is_none() {
                break;
            }
        }
        m.expect(&[">"])?;
        Ok::<_, MatchError>(names)
    })
}

pub(crate) fn match_type_list(
    m: &mut Matcher<'_>,
    cx: &Context,
) -> Result<Vec<JavaType>, MatchError> {
    m.expect_with(&[kinds::TYPE_LIST], |m| {
        let mut types = Vec::new();
        loop {
            types.push(match_type(m, cx)?);
            if m.try_match(&[","])?.is_none() {
                break;
            }
        }
        Ok::<_, MatchError>(types)
    })
}

/// `qualifiedName` as a dotted string.
pub(crate) fn match_qualified_name(m: &mut Matcher<'_>) -> Result<String, MatchError> {
    m.expect_with(&[kinds::QUALIFIED_NAME], |m| {
        let mut segments = Vec::new();
        loop {
            segments.push(m.match_name()?);
            if m.try_match(&["."])?.is_none() {
                break;
            }
        }
        Ok::<_, MatchError>(segments.join("."))
    })
}

/// Optional `throws` clause; checked exceptions do not exist in the target.
pub(crate) fn try_match_throws(m: &mut Matcher<'_>) -> Result<(), MatchError> {
    if m.try_match(&["throws"])?.is_none() {
        return Ok(());
    }
    m.expect_with(&[kinds::QUALIFIED_NAME_LIST], |m| {
        loop {
            match_qualified_name(m)?;
            if m.try_match(&[","])?.is_none() {
                break;
            }
        }
        Ok::<_, MatchError>(())
    })
}

/// `variableDeclaratorId: Identifier ('[' ']')*`
pub(crate) fn match_declarator_id(
    m: &mut Matcher<'_>,
    ty: JavaType,
) -> Result<(String, JavaType), MatchError> {
    m.expect_with(&[kinds::VARIABLE_DECLARATOR_ID], |m| {
        let name = m.match_name()?;
        let ty = match_dims(m, ty)?;
        Ok::<_, MatchError>((name, ty))
    })
}
