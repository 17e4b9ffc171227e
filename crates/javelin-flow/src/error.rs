/// Broken internal assumption while rewriting control flow.
///
/// Never caused by user input: the statement matchers only ever hand over open
/// branches with at most one `default`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("control-flow invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl FlowError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}
