//! Completion evaluator.
//!
//! Decides document-level completion from the reconciled assignment set
//! restricted to the document's current reviewer list. Pure; the handler
//! layer applies the resulting transition and owns persistence.

use super::assignment::ResolvedAssignment;

/// What the document write path should do after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTransition {
    /// Cycle newly complete: schedule the next cycle and set the flags.
    Completed,
    /// Previously complete cycle no longer evaluates as complete.
    Reopened,
    /// No change; no document write occurs.
    Unchanged,
}

/// Completion holds iff the restricted reconciled set is non-empty and
/// every member's latest assignment is completed.
pub fn cycle_complete(current: &[&ResolvedAssignment]) -> bool {
    !current.is_empty() && current.iter().all(|a| a.is_completed())
}

/// Compares the evaluated state against the document's recorded flag.
pub fn evaluate_transition(
    already_completed: bool,
    current: &[&ResolvedAssignment],
) -> CompletionTransition {
    match (cycle_complete(current), already_completed) {
        (true, false) => CompletionTransition::Completed,
        (false, true) => CompletionTransition::Reopened,
        _ => CompletionTransition::Unchanged,
    }
}
