use javelin_flow::FlowError;
use javelin_hir::BuildError;
use javelin_syntax::TreeError;

/// Everything that can abort the translation of one compilation unit.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Flow(#[from] FlowError),
    /// A pending body was rendered twice; the module graph was walked incorrectly.
    #[error("body of {owner} was already rendered")]
    BodyAlreadyRendered { owner: String },
    #[error("unsupported construct: {construct}")]
    Unsupported { construct: String },
}

impl TranslateError {
    pub(crate) fn unsupported(construct: impl Into<String>) -> Self {
        Self::Unsupported {
            construct: construct.into(),
        }
    }
}
