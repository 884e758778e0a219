//! The three finite state machines that drive the UI.
//!
//! Each machine enumerates its legal edges. The store only records states;
//! the dispatcher checks the edge before running a side effect, so an
//! impossible edge surfaces as [`TransitionError::InvalidEdge`].

use std::fmt;

use crate::error::TransitionError;

/// Names the machine an edge belongs to, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Machine {
    Validation,
    Loading,
    Polling,
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Machine::Validation => "validation",
            Machine::Loading => "loading",
            Machine::Polling => "polling",
        })
    }
}

/// Form validation of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    ValidatingForm,
    ValidatingUniqueness,
    Passed,
    Failed,
}

/// Lifecycle of the initial load of one submitted feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Requesting,
    Parsing,
    Finished,
    Failed,
}

/// Process-wide polling status, written only by the polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollingState {
    Idle,
    Updating,
    Updated,
}

/// Shared behaviour of the state machines.
pub trait StateMachine: Copy + Eq + fmt::Display {
    const MACHINE: Machine;

    /// Whether `from -> to` is one of the machine's edges. `None` is the
    /// state before the machine has ever been entered.
    fn allows(from: Option<Self>, to: Self) -> bool;

    fn check(from: Option<Self>, to: Self) -> Result<(), TransitionError> {
        if Self::allows(from, to) {
            Ok(())
        } else {
            Err(TransitionError::InvalidEdge {
                machine: Self::MACHINE,
                from: from.map_or_else(|| "none".to_string(), |s| s.to_string()),
                to: to.to_string(),
            })
        }
    }
}

impl StateMachine for ValidationState {
    const MACHINE: Machine = Machine::Validation;

    fn allows(from: Option<Self>, to: Self) -> bool {
        use ValidationState::*;
        matches!(
            (from, to),
            (None | Some(Passed) | Some(Failed), ValidatingForm)
                | (
                    Some(ValidatingForm),
                    ValidatingUniqueness | Passed | Failed
                )
                | (Some(ValidatingUniqueness), Passed | Failed)
        )
    }
}

impl StateMachine for LoadState {
    const MACHINE: Machine = Machine::Loading;

    fn allows(from: Option<Self>, to: Self) -> bool {
        use LoadState::*;
        matches!(
            (from, to),
            (None | Some(Finished) | Some(Failed), Requesting)
                | (Some(Requesting), Parsing | Failed)
                | (Some(Parsing), Finished | Failed)
        )
    }
}

impl StateMachine for PollingState {
    const MACHINE: Machine = Machine::Polling;

    fn allows(from: Option<Self>, to: Self) -> bool {
        use PollingState::*;
        matches!(
            (from, to),
            (None | Some(Idle) | Some(Updated), Updating) | (Some(Updating), Updated)
        )
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationState::ValidatingForm => "validating_form",
            ValidationState::ValidatingUniqueness => "validating_uniqueness",
            ValidationState::Passed => "passed",
            ValidationState::Failed => "failed",
        })
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadState::Requesting => "requesting",
            LoadState::Parsing => "parsing",
            LoadState::Finished => "finished",
            LoadState::Failed => "failed",
        })
    }
}

impl fmt::Display for PollingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PollingState::Idle => "idle",
            PollingState::Updating => "updating",
            PollingState::Updated => "updated",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_only_from_a_validating_state() {
        use ValidationState::*;
        assert!(ValidationState::allows(Some(ValidatingForm), Failed));
        assert!(ValidationState::allows(Some(ValidatingUniqueness), Failed));
        assert!(!ValidationState::allows(Some(Passed), Failed));
        assert!(!ValidationState::allows(None, Failed));
    }

    #[test]
    fn validation_restarts_after_terminal_states() {
        use ValidationState::*;
        for from in [None, Some(Passed), Some(Failed)] {
            assert!(ValidationState::allows(from, ValidatingForm));
        }
        assert!(!ValidationState::allows(Some(ValidatingUniqueness), ValidatingForm));
    }

    #[test]
    fn load_lifecycle_edges() {
        use LoadState::*;
        assert!(LoadState::allows(None, Requesting));
        assert!(LoadState::allows(Some(Requesting), Parsing));
        assert!(LoadState::allows(Some(Parsing), Finished));
        assert!(LoadState::allows(Some(Requesting), Failed));
        assert!(LoadState::allows(Some(Parsing), Failed));
        assert!(!LoadState::allows(Some(Requesting), Finished));
        assert!(!LoadState::allows(Some(Finished), Failed));
    }

    #[test]
    fn polling_edges() {
        use PollingState::*;
        assert!(PollingState::allows(None, Updating));
        assert!(PollingState::allows(Some(Updated), Updating));
        assert!(PollingState::allows(Some(Updating), Updated));
        assert!(!PollingState::allows(None, Updated));
        assert!(!PollingState::allows(Some(Updated), Updated));
    }

    #[test]
    fn check_reports_machine_and_states() {
        let err = LoadState::check(Some(LoadState::Finished), LoadState::Parsing).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidEdge {
                machine: Machine::Loading,
                from: "finished".into(),
                to: "parsing".into(),
            }
        );
    }

    #[test]
    fn check_names_the_initial_state_none() {
        let err = PollingState::check(None, PollingState::Updated).unwrap_err();
        assert!(err.to_string().contains("none -> updated"));
    }
}
