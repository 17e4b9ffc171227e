//! Token-level rewriting of Java expressions into Ruby.
//!
//! Expressions arrive as flat token lists. Only the handful of forms whose spelling
//! differs between the two languages are rewritten; everything else is re-joined with
//! Ruby spacing.

use javelin_hir::{BuildError, Context};
use javelin_types::{ClassType, PrimitiveType};

/// Rewrites `tokens` and joins them into one expression.
///
/// Increments are only supported as whole expressions on a plain variable, field or
/// array element; Ruby has no operator with the value semantics of `i++` inside a
/// larger expression.
pub(crate) fn render_tokens(tokens: &[String], cx: &Context) -> Result<String, BuildError> {
    if let Some((op, operand)) = split_increment(tokens) {
        let step = if op == "++" { "+=" } else { "-=" };
        return Ok(format!("{} {step} 1", render_tokens(operand, cx)?));
    }
    if let Some(op) = tokens.iter().find(|token| is_increment(token)) {
        return Err(BuildError::unsupported(format!(
            "`{op}` inside the expression `{}`",
            tokens.join(" ")
        )));
    }
    Ok(join(&rewrite(tokens, cx)?))
}

fn is_increment(token: &str) -> bool {
    matches!(token, "++" | "--")
}

/// `i++`, `++this.count` and friends used as a whole expression.
fn split_increment(tokens: &[String]) -> Option<(&str, &[String])> {
    let (first, rest) = tokens.split_first()?;
    if is_increment(first) && is_lvalue(rest) {
        return Some((first, rest));
    }
    let (last, rest) = tokens.split_last()?;
    if is_increment(last) && is_lvalue(rest) {
        return Some((last, rest));
    }
    None
}

/// A dotted name path, optionally indexed: `a`, `this.a.b`, `items[i + 1]`.
fn is_lvalue(tokens: &[String]) -> bool {
    let mut expect_name = true;
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx].as_str();
        if expect_name {
            if !is_name(token) {
                return false;
            }
            expect_name = false;
        } else if token == "." {
            expect_name = true;
        } else if token == "[" {
            let Some(end) = closing_bracket(tokens, idx) else {
                return false;
            };
            if tokens[idx + 1..end].iter().any(|token| is_increment(token)) {
                return false;
            }
            idx = end;
        } else {
            return false;
        }
        idx += 1;
    }
    !tokens.is_empty() && !expect_name
}

fn rewrite(tokens: &[String], cx: &Context) -> Result<Vec<String>, BuildError> {
    let at = |idx: usize| tokens.get(idx).map(String::as_str);
    let mut pieces = Vec::with_capacity(tokens.len());
    let mut idx = 0;
    while idx < tokens.len() {
        match tokens[idx].as_str() {
            "this" if at(idx + 1) == Some(".") && at(idx + 2).is_some_and(is_name) => {
                let name = &tokens[idx + 2];
                if at(idx + 3) == Some("(") {
                    pieces.push(name.clone());
                } else {
                    pieces.push(format!("@{name}"));
                }
                idx += 3;
            }
            "this" => {
                pieces.push("self".to_owned());
                idx += 1;
            }
            "null" => {
                pieces.push("nil".to_owned());
                idx += 1;
            }
            "System"
                if at(idx + 1) == Some(".")
                    && at(idx + 2) == Some("out")
                    && at(idx + 3) == Some(".")
                    && matches!(at(idx + 4), Some("println" | "print")) =>
            {
                let method = if at(idx + 4) == Some("println") { "puts" } else { "print" };
                pieces.push(method.to_owned());
                idx += 5;
            }
            "new" => idx = rewrite_new(tokens, idx, cx, &mut pieces)?,
            token => {
                pieces.push(token.to_owned());
                idx += 1;
            }
        }
    }
    Ok(pieces)
}

/// `new A.B(...)` becomes `A::B.new(...)`, `new T[n]` becomes `Array.new(n, default)`.
/// Returns the index of the first token not consumed.
fn rewrite_new(
    tokens: &[String],
    start: usize,
    cx: &Context,
    pieces: &mut Vec<String>,
) -> Result<usize, BuildError> {
    let mut names = Vec::new();
    let mut idx = start + 1;
    while let Some(name) = tokens.get(idx).filter(|token| is_name(token)) {
        names.push(name.as_str());
        idx += 1;
        if tokens.get(idx).map(String::as_str) != Some(".") {
            break;
        }
        idx += 1;
    }

    let next = match (names.as_slice(), tokens.get(idx).map(String::as_str)) {
        (names, Some("(")) if !names.is_empty() => {
            pieces.push(format!("{}.new", class_reference(names, cx)));
            idx
        }
        ([element], Some("[")) => match closing_bracket(tokens, idx) {
            Some(end) if end > idx + 1 => {
                let size = render_tokens(&tokens[idx + 1..end], cx)?;
                let default = PrimitiveType::from_keyword(element)
                    .map_or("nil", PrimitiveType::default_value);
                pieces.push(format!("Array.new({size}, {default})"));
                end + 1
            }
            _ => {
                pieces.push("new".to_owned());
                start + 1
            }
        },
        _ => {
            pieces.push("new".to_owned());
            start + 1
        }
    };
    Ok(next)
}

fn class_reference(names: &[&str], cx: &Context) -> String {
    if let [name] = names {
        if let Some(path) = cx.local_type(name) {
            return path.join("::");
        }
    }
    ClassType::from_dotted(&names.join(".")).class_reference()
}

fn closing_bracket(tokens: &[String], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token.as_str() {
            "[" => depth += 1,
            "]" => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_name(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
}

/// Ends an operand: a name, a literal or a closing bracket.
fn is_operand(piece: &str) -> bool {
    piece
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '"' | '\'' | ')' | ']'))
}

fn join(pieces: &[String]) -> String {
    let mut out = String::new();
    let mut glue = false;
    let mut prev: Option<&str> = None;
    for piece in pieces {
        let piece = piece.as_str();
        let tight = matches!(piece, "." | "," | ")" | "]")
            || (matches!(piece, "(" | "[") && prev.is_some_and(is_operand));
        if !out.is_empty() && !glue && !tight {
            out.push(' ');
        }
        out.push_str(piece);
        // Prefix operators bind to the following operand.
        let unary = matches!(piece, "-" | "+") && !prev.is_some_and(is_operand);
        glue = unary || matches!(piece, "." | "(" | "[" | "!" | "~");
        prev = Some(piece);
    }
    out
}
