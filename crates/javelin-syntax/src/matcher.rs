use smol_str::SmolStr;

use crate::kinds;
use crate::ParseNode;

const ROOT: &str = "<root>";
const END_OF_INPUT: &str = "<end of input>";

/// Fatal structural errors raised while walking a parse tree.
///
/// A mismatch means the tree does not have the shape the grammar vocabulary promises,
/// either because the front-end is out of sync or because the construct is not
/// supported. There is no recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("wrong match in `{parent}`: found `{found}` instead of one of {expected:?}")]
    StructuralMismatch {
        parent: SmolStr,
        expected: Vec<SmolStr>,
        found: SmolStr,
    },
    #[error("children of `{parent}` not processed: {remaining:?}")]
    Unconsumed {
        parent: SmolStr,
        remaining: Vec<SmolStr>,
    },
    #[error("expected a name in `{parent}`, found `{found}`")]
    ExpectedName { parent: SmolStr, found: SmolStr },
}

/// Position inside one sibling list.
///
/// Leading line comments are moved into `pending_comments` as soon as the cursor
/// reaches them, so lookahead never sees them.
#[derive(Debug)]
struct Cursor<'t> {
    parent: &'t str,
    nodes: &'t [ParseNode],
    index: usize,
    pending_comments: Vec<&'t ParseNode>,
}

impl<'t> Cursor<'t> {
    fn new(parent: &'t str, nodes: &'t [ParseNode]) -> Self {
        let mut cursor = Self {
            parent,
            nodes,
            index: 0,
            pending_comments: Vec::new(),
        };
        cursor.skip_comments();
        cursor
    }

    fn skip_comments(&mut self) {
        while let Some(node) = self.nodes.get(self.index) {
            if !node.is_comment() {
                break;
            }
            self.pending_comments.push(node);
            self.index += 1;
        }
    }

    fn peek(&self) -> Option<&'t ParseNode> {
        self.nodes.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
        self.skip_comments();
    }

    fn is_complete(&self) -> bool {
        self.index == self.nodes.len()
    }

    fn remaining(&self) -> Vec<SmolStr> {
        self.nodes[self.index.min(self.nodes.len())..]
            .iter()
            .map(|node| node.kind.clone())
            .collect()
    }
}

/// Cursor-based, lookahead-driven walker over a [`ParseNode`] tree.
///
/// Matching a node with a body pushes a cursor over the node's children, runs the body,
/// then requires every child to have been consumed before returning to the parent.
/// `expect*` methods fail with a [`MatchError`]; `try_*` methods return `None` without
/// moving the cursor so callers can pick between alternative productions.
#[derive(Debug)]
pub struct Matcher<'t> {
    root: Cursor<'t>,
    stack: Vec<Cursor<'t>>,
    comments: Vec<String>,
}

impl<'t> Matcher<'t> {
    /// A matcher positioned in front of `root`.
    pub fn new(root: &'t ParseNode) -> Self {
        Self {
            root: Cursor::new(ROOT, std::slice::from_ref(root)),
            stack: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Checks that the root node was consumed and returns the comments nobody drained.
    pub fn finish(mut self) -> Result<Vec<String>, MatchError> {
        flush_comments(&mut self.root, &mut self.comments);
        if !self.root.is_complete() {
            return Err(MatchError::Unconsumed {
                parent: SmolStr::new(ROOT),
                remaining: self.root.remaining(),
            });
        }
        Ok(self.comments)
    }

    fn cursor(&self) -> &Cursor<'t> {
        self.stack.last().unwrap_or(&self.root)
    }

    /// Kind of the production currently being walked.
    #[must_use]
    pub fn parent_kind(&self) -> &'t str {
        self.cursor().parent
    }

    /// The next non-comment node, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&'t ParseNode> {
        self.cursor().peek()
    }

    #[must_use]
    pub fn peek_kind(&self) -> Option<&'t str> {
        self.peek().map(|node| node.kind.as_str())
    }

    /// Pure lookahead; never consumes and never flushes comments.
    #[must_use]
    pub fn next_is(&self, kinds: &[&str]) -> bool {
        self.peek_kind().is_some_and(|kind| kinds.contains(&kind))
    }

    #[must_use]
    pub fn next_is_name(&self) -> bool {
        self.next_is(&[kinds::IDENTIFIER])
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.peek().is_none()
    }

    /// Comments flushed by consumed matches since the last call.
    pub fn take_comments(&mut self) -> Vec<String> {
        std::mem::take(&mut self.comments)
    }

    fn consume(&mut self) -> Option<&'t ParseNode> {
        let Self {
            root,
            stack,
            comments,
        } = self;
        let cursor = stack.last_mut().unwrap_or(root);
        let node = cursor.peek()?;
        flush_comments(cursor, comments);
        cursor.advance();
        tracing::trace!(kind = %node.kind, parent = cursor.parent, "consumed node");
        Some(node)
    }

    /// Error describing that the next node is none of `kinds`.
    #[must_use]
    pub fn mismatch(&self, kinds: &[&str]) -> MatchError {
        MatchError::StructuralMismatch {
            parent: SmolStr::new(self.parent_kind()),
            expected: kinds.iter().map(|kind| SmolStr::new(kind)).collect(),
            found: SmolStr::new(self.peek_kind().unwrap_or(END_OF_INPUT)),
        }
    }

    /// Consumes a node that must be one of `kinds` and starts walking its children.
    ///
    /// Every `enter` must be paired with a [`leave`](Self::leave). Prefer
    /// [`expect_with`](Self::expect_with) unless the body needs more than the matcher.
    pub fn enter(&mut self, kinds: &[&str]) -> Result<(), MatchError> {
        if !self.next_is(kinds) {
            return Err(self.mismatch(kinds));
        }
        let node = self.consume().ok_or_else(|| self.mismatch(kinds))?;
        self.stack.push(Cursor::new(&node.kind, &node.children));
        Ok(())
    }

    /// Stops walking the children of the node entered last; all of them must have been
    /// consumed.
    pub fn leave(&mut self) -> Result<(), MatchError> {
        let Some(mut cursor) = self.stack.pop() else {
            return Ok(());
        };
        flush_comments(&mut cursor, &mut self.comments);
        if cursor.is_complete() {
            Ok(())
        } else {
            Err(MatchError::Unconsumed {
                parent: SmolStr::new(cursor.parent),
                remaining: cursor.remaining(),
            })
        }
    }

    /// Matches a node that must be one of `kinds`, walking its children with `body`.
    pub fn expect_with<T, E>(
        &mut self,
        kinds: &[&str],
        body: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<MatchError>,
    {
        self.enter(kinds)?;
        let result = body(self);
        let exit = self.leave();
        let value = result?;
        exit?;
        Ok(value)
    }

    /// Matches a childless node (a token) and returns its kind.
    pub fn expect(&mut self, kinds: &[&str]) -> Result<&'t str, MatchError> {
        let kind = self.peek_kind();
        self.expect_with(kinds, |_| Ok::<_, MatchError>(()))?;
        Ok(kind.unwrap_or(END_OF_INPUT))
    }

    /// Like [`expect_with`](Self::expect_with) but returns `Ok(None)` when the next node
    /// is not one of `kinds`.
    pub fn try_match_with<T, E>(
        &mut self,
        kinds: &[&str],
        body: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<Option<T>, E>
    where
        E: From<MatchError>,
    {
        if !self.next_is(kinds) {
            return Ok(None);
        }
        self.expect_with(kinds, body).map(Some)
    }

    pub fn try_match(&mut self, kinds: &[&str]) -> Result<Option<&'t str>, MatchError> {
        if !self.next_is(kinds) {
            return Ok(None);
        }
        self.expect(kinds).map(Some)
    }

    /// Repeats `body` for every consecutive `kind` node; returns how many matched.
    pub fn loop_match<E>(
        &mut self,
        kind: &str,
        mut body: impl FnMut(&mut Self) -> Result<(), E>,
    ) -> Result<usize, E>
    where
        E: From<MatchError>,
    {
        let mut count = 0;
        while self.try_match_with(&[kind], &mut body)?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Consumes an identifier leaf and returns its text.
    pub fn match_name(&mut self) -> Result<String, MatchError> {
        let Some(node) = self.peek().filter(|node| node.kind == kinds::IDENTIFIER) else {
            return Err(MatchError::ExpectedName {
                parent: SmolStr::new(self.parent_kind()),
                found: SmolStr::new(self.peek_kind().unwrap_or(END_OF_INPUT)),
            });
        };
        self.expect(&[kinds::IDENTIFIER])?;
        Ok(node.text().to_owned())
    }

    /// Consumes one of `kinds` and returns its source text.
    pub fn expect_text(&mut self, kinds: &[&str]) -> Result<String, MatchError> {
        let text = self.peek().map(|node| node.text().to_owned());
        self.expect(kinds)?;
        Ok(text.unwrap_or_default())
    }

    /// Matches the longest of several token sequences, e.g. `>` `>` `=` against
    /// `[[">", ">", "="], [">", ">"], [">"]]`, and returns the concatenated text.
    ///
    /// While every remaining option still expects a token the match is mandatory;
    /// once some option is complete the remaining tokens are optional.
    pub fn multi_match(&mut self, options: &[&[&str]]) -> Result<Option<String>, MatchError> {
        let mut options: Vec<&[&str]> = options.to_vec();
        let mut result: Option<String> = None;
        let mut index = 0;
        loop {
            let names: Vec<Option<&str>> = options.iter().map(|o| o.get(index).copied()).collect();
            let present: Vec<&str> = names.iter().flatten().copied().collect();
            if present.is_empty() {
                break;
            }
            let part = if present.len() == names.len() {
                Some(self.expect(&present)?)
            } else {
                self.try_match(&present)?
            };
            let Some(part) = part else { break };
            options.retain(|option| option.get(index).copied() == Some(part));
            result.get_or_insert_with(String::new).push_str(part);
            index += 1;
        }
        Ok(result)
    }
}

fn flush_comments(cursor: &mut Cursor<'_>, sink: &mut Vec<String>) {
    sink.extend(
        cursor
            .pending_comments
            .drain(..)
            .map(|comment| comment.text().to_owned()),
    );
}
