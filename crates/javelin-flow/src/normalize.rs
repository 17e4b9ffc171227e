use serde::{Deserialize, Serialize};

use crate::ir::{CaseBranch, CaseLabel, Expression, Stmt};
use crate::FlowError;

/// How an `if` without `else` counts towards closing a case body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosureMode {
    /// An `if` closes when its true branch closes, whether or not it has an `else`.
    ///
    /// This matches the output of earlier translator releases even though the
    /// condition-false path of an else-less `if` still falls through.
    #[default]
    Compatible,
    /// An `if` closes only when it has an `else` and both branches close.
    Strict,
}

/// Label of the statement wrapped around a branch that leaves the switch early.
pub const SWITCH_EXIT_LABEL: &str = "switch";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowConfig {
    pub closure_mode: ClosureMode,
}

/// Rewrites every `case` statement in `body` (at any depth) into closed branches.
pub fn normalize_body(body: Vec<Stmt>, config: FlowConfig) -> Result<Vec<Stmt>, FlowError> {
    body.into_iter()
        .map(|stmt| normalize_stmt(stmt, config))
        .collect()
}

fn normalize_stmt(stmt: Stmt, config: FlowConfig) -> Result<Stmt, FlowError> {
    Ok(match stmt {
        Stmt::Block(body) => Stmt::Block(normalize_body(body, config)?),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => Stmt::If {
            condition,
            then_branch: normalize_body(then_branch, config)?,
            else_branch: else_branch
                .map(|branch| normalize_body(branch, config))
                .transpose()?,
        },
        Stmt::While { condition, body } => Stmt::While {
            condition,
            body: normalize_body(body, config)?,
        },
        Stmt::Labeled { label, body } => Stmt::Labeled {
            label,
            body: normalize_body(body, config)?,
        },
        Stmt::Case { value, branches } => normalize_switch(value, branches, config)?,
        other => other,
    })
}

/// Turns the fall-through branches of one `switch` into closed branches.
///
/// Adjacent branches without a closing statement share the statements that follow
/// them; the `default` branch is always emitted last. A `break` that leaves the
/// switch before the end of a branch becomes a labeled break out of a
/// [`SWITCH_EXIT_LABEL`] statement wrapping that branch.
pub fn normalize_switch(
    value: Expression,
    branches: Vec<CaseBranch>,
    config: FlowConfig,
) -> Result<Stmt, FlowError> {
    let fold = branches
        .into_iter()
        .try_fold(SwitchFold::default(), |fold, branch| fold.push(branch, config))?;
    Ok(Stmt::Case {
        value,
        branches: fold.finish(),
    })
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Regular(usize),
    Default,
}

/// Accumulator threaded through the branches of one switch.
#[derive(Debug, Default)]
struct SwitchFold {
    regular: Vec<CaseBranch>,
    default_branch: Option<CaseBranch>,
    open_branches: Vec<Slot>,
}

impl SwitchFold {
    fn push(mut self, branch: CaseBranch, config: FlowConfig) -> Result<Self, FlowError> {
        if branch.closed {
            return Err(FlowError::invariant(
                "case branch visited after it was closed",
            ));
        }

        let (defaults, values): (Vec<CaseLabel>, Vec<CaseLabel>) = branch
            .labels
            .into_iter()
            .partition(|label| *label == CaseLabel::Default);

        if !defaults.is_empty() {
            if self.default_branch.is_some() {
                return Err(FlowError::invariant("switch has more than one default label"));
            }
            self.default_branch = Some(closed_branch(vec![CaseLabel::Default]));
            self.open_branches.push(Slot::Default);
        }

        if !values.is_empty() {
            self.regular.push(closed_branch(values));
            self.open_branches.push(Slot::Regular(self.regular.len() - 1));
        }

        // Trailing breaks may only go when nothing is appended after them.
        let drop_trailing_break = closes(&branch.body, config.closure_mode);
        let collected = collect_tail(branch.body, drop_trailing_break, config)?;
        for slot in &self.open_branches {
            let target = match *slot {
                Slot::Regular(idx) => self.regular.get_mut(idx),
                Slot::Default => self.default_branch.as_mut(),
            };
            if let Some(target) = target {
                target.body.extend(collected.stmts.iter().cloned());
            }
        }

        if collected.closed {
            self.open_branches.clear();
        }
        Ok(self)
    }

    fn finish(self) -> Vec<CaseBranch> {
        let mut branches = self.regular;
        branches.extend(self.default_branch);
        branches.into_iter().map(label_early_exits).collect()
    }
}

fn label_early_exits(mut branch: CaseBranch) -> CaseBranch {
    if retarget_switch_breaks(&mut branch.body) {
        let body = std::mem::take(&mut branch.body);
        branch.body = vec![Stmt::Labeled {
            label: SWITCH_EXIT_LABEL.to_owned(),
            body,
        }];
    }
    branch
}

/// Points the unlabeled breaks that leave the switch at [`SWITCH_EXIT_LABEL`].
/// Loops and nested switches own the breaks inside them.
fn retarget_switch_breaks(stmts: &mut [Stmt]) -> bool {
    let mut found = false;
    for stmt in stmts {
        match stmt {
            Stmt::Break { label } if label.is_none() => {
                *label = Some(SWITCH_EXIT_LABEL.to_owned());
                found = true;
            }
            Stmt::Block(body) | Stmt::Labeled { body, .. } => {
                found |= retarget_switch_breaks(body);
            }
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                found |= retarget_switch_breaks(then_branch);
                if let Some(branch) = else_branch {
                    found |= retarget_switch_breaks(branch);
                }
            }
            _ => {}
        }
    }
    found
}

fn closed_branch(labels: Vec<CaseLabel>) -> CaseBranch {
    CaseBranch {
        labels,
        closed: true,
        body: Vec::new(),
    }
}

struct Collected {
    stmts: Vec<Stmt>,
    closed: bool,
}

/// Normalizes a statement sequence and decides whether it closes.
///
/// Only the last statement (ignoring trailing comments) governs closure; earlier ones
/// are normalized and passed through. With `drop_trailing_break`, a closing unlabeled
/// `break` in tail position is removed, including inside a tail block or tail `if`.
/// Callers only ask for that when the whole sequence closes.
fn collect_tail(
    mut stmts: Vec<Stmt>,
    drop_trailing_break: bool,
    config: FlowConfig,
) -> Result<Collected, FlowError> {
    let tail_start = stmts
        .iter()
        .rposition(|stmt| !matches!(stmt, Stmt::Comment(_)))
        .map_or(stmts.len(), |idx| idx + 1);
    let trailing_comments = stmts.split_off(tail_start);

    let Some(last) = stmts.pop() else {
        return Ok(Collected {
            stmts: trailing_comments,
            closed: false,
        });
    };

    let mut out = normalize_body(stmts, config)?;
    let closed = match last {
        Stmt::Break { label: None } => {
            if !drop_trailing_break {
                out.push(Stmt::unlabeled_break());
            }
            true
        }
        last @ (Stmt::Break { .. } | Stmt::Return(_) | Stmt::Raise(_)) => {
            out.push(last);
            true
        }
        Stmt::Block(body) => {
            let inner = collect_tail(body, drop_trailing_break, config)?;
            out.push(Stmt::Block(inner.stmts));
            inner.closed
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let then_tail = collect_tail(then_branch, drop_trailing_break, config)?;
            let else_tail = else_branch
                .map(|branch| collect_tail(branch, drop_trailing_break, config))
                .transpose()?;
            let closed = if_closes(
                then_tail.closed,
                else_tail.as_ref().map(|tail| tail.closed),
                config.closure_mode,
            );
            if closed && else_tail.is_none() {
                tracing::warn!(
                    "treating `if` without `else` as closing; its false path falls through"
                );
            }
            out.push(Stmt::If {
                condition,
                then_branch: then_tail.stmts,
                else_branch: else_tail.map(|tail| tail.stmts),
            });
            closed
        }
        other => {
            out.push(normalize_stmt(other, config)?);
            false
        }
    };
    out.extend(trailing_comments);

    Ok(Collected { stmts: out, closed })
}

fn if_closes(then_closed: bool, else_closed: Option<bool>, mode: ClosureMode) -> bool {
    match (else_closed, mode) {
        (Some(else_closed), _) => then_closed && else_closed,
        (None, ClosureMode::Strict) => false,
        (None, ClosureMode::Compatible) => then_closed,
    }
}

/// Whether control is guaranteed not to fall off the end of `stmts`.
#[must_use]
pub fn closes(stmts: &[Stmt], mode: ClosureMode) -> bool {
    let last = stmts
        .iter()
        .rev()
        .find(|stmt| !matches!(stmt, Stmt::Comment(_)));
    match last {
        Some(Stmt::Break { .. } | Stmt::Return(_) | Stmt::Raise(_)) => true,
        Some(Stmt::Block(body)) => closes(body, mode),
        Some(Stmt::If {
            then_branch,
            else_branch,
            ..
        }) => if_closes(
            closes(then_branch, mode),
            else_branch.as_deref().map(|branch| closes(branch, mode)),
            mode,
        ),
        _ => false,
    }
}
