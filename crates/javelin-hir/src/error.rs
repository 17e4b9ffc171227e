use javelin_syntax::MatchError;

/// Fatal errors raised while building the module graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Match(#[from] MatchError),
    /// A recognized declaration shape the translator does not handle.
    #[error("unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String },
}

impl BuildError {
    pub fn unsupported(construct: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            construct: construct.into(),
        }
    }
}
