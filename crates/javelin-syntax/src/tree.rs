use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::kinds;

/// A node of the labeled parse tree handed over by the grammar front-end.
///
/// Rule nodes use the production name as `kind` (`classBody`), keyword and punctuation
/// tokens use their own text (`class`, `{`). Identifier and literal leaves use
/// [`kinds::IDENTIFIER`] / [`kinds::LITERAL`] and keep the source text in `payload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseNode {
    pub kind: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub fn new(kind: impl Into<SmolStr>, children: Vec<ParseNode>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
            children,
        }
    }

    pub fn leaf(kind: impl Into<SmolStr>, payload: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(payload.into()),
            children: Vec::new(),
        }
    }

    /// A keyword or punctuation token; its kind is its text.
    pub fn token(text: impl Into<SmolStr>) -> Self {
        Self::new(text, Vec::new())
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind == kinds::LINE_COMMENT
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Source text of a leaf: the payload when present, the token kind otherwise.
    #[must_use]
    pub fn text(&self) -> &str {
        self.payload.as_deref().unwrap_or(&self.kind)
    }

    /// Loads a tree serialized by the front-end.
    pub fn from_json(text: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of nodes in this subtree, comments included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ParseNode::node_count).sum::<usize>()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("invalid parse tree json: {0}")]
    Json(#[from] serde_json::Error),
}
