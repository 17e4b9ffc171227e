use std::fmt;

/// An already-rendered expression fragment in the target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression(pub String);

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Statement tree of one method, constructor or initializer body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// A source line comment carried through to the output.
    Comment(String),
    /// Opaque statement line (expression statement, local variable assignment, ...).
    Other(Expression),
    Block(Vec<Stmt>),
    If {
        condition: Expression,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    While {
        condition: Expression,
        body: Vec<Stmt>,
    },
    /// A statement that a labeled `break` may leave.
    Labeled {
        label: String,
        body: Vec<Stmt>,
    },
    Case {
        value: Expression,
        branches: Vec<CaseBranch>,
    },
    Break {
        label: Option<String>,
    },
    Return(Option<Expression>),
    Raise(Expression),
}

impl Stmt {
    pub fn other(text: impl Into<String>) -> Self {
        Self::Other(Expression::new(text))
    }

    pub fn unlabeled_break() -> Self {
        Self::Break { label: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaseLabel {
    Value(Expression),
    Default,
}

/// One arm of a `case` statement.
///
/// Branches straight out of the statement matcher are not `closed`; the normalizer
/// produces closed branches whose bodies never fall through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseBranch {
    pub labels: Vec<CaseLabel>,
    pub closed: bool,
    pub body: Vec<Stmt>,
}

impl CaseBranch {
    pub fn open(labels: Vec<CaseLabel>, body: Vec<Stmt>) -> Self {
        Self {
            labels,
            closed: false,
            body,
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.labels.contains(&CaseLabel::Default)
    }
}
