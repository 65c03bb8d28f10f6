// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Generic, pure state machine types. Transitions are deterministic
//! functions with no side effects: a transition either yields the next state
//! with an output, or an error and the old state stays as it was.
//!
//! # Mealy Machine
//!
//! Output depends on both current state and input:
//! ```text
//! (State, Input) → (State, Output)
//! ```
//!
//! The build wizard ([`build_wizard::BuildWizard`]) is the machine this
//! crate ships: its state is the current selection, its inputs are select /
//! remove / clear / reset, and its output names the steps a cascade cleared.
//!
//! # Example
//!
//! ```rust,ignore
//! use rack_assembly::state_machine::*;
//!
//! let wizard = BuildWizard::new();
//! let (wizard, output) = wizard.transition(&WizardInput::Select {
//!     component: case,
//!     owned: inventory.count(case.model()),
//! })?;
//! ```

pub mod build_wizard;

pub use build_wizard::{BuildWizard, WizardInput, WizardOutput};

use crate::domain::{Category, ModelId};

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// A step was used before the step it depends on was filled
    #[error("{step} cannot be selected before {requires}")]
    StepLocked { step: Category, requires: Category },

    /// A multi-select step has no room left on the motherboard
    #[error("Not enough {resource} on the motherboard ({used}/{capacity} used, {requested} more requested)")]
    CapacityExceeded {
        resource: &'static str,
        used: u32,
        requested: u32,
        capacity: u32,
    },

    /// Selecting would reserve more units of a model than are owned
    #[error("Only {owned} unit(s) of {model} owned")]
    InsufficientQuantity { model: ModelId, owned: u32 },

    /// Nothing at the given position
    #[error("No {step} selected at position {index}")]
    NothingToRemove { step: Category, index: usize },
}

/// Trait for finite state machines
///
/// Implement this trait to define a state machine with typed states,
/// inputs, and outputs.
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }

    /// Inputs that are valid from the current state, where they can be
    /// enumerated
    fn valid_inputs(&self) -> Vec<Self::Input>
    where
        Self::Input: Clone,
    {
        Vec::new()
    }
}

/// Trait for states with invariants
///
/// Every state reachable through [`StateMachine::transition`] must satisfy
/// its invariants.
pub trait StateInvariant {
    /// Check if state invariants hold
    fn check_invariants(&self) -> Result<(), String>;
}

/// Transition metadata
///
/// Records information about a state transition for auditing.
#[derive(Debug, Clone)]
pub struct Transition<S, I> {
    /// State before transition
    pub from: S,

    /// State after transition
    pub to: S,

    /// Input that triggered transition
    pub input: I,

    /// Timestamp of transition
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<S, I> Transition<S, I> {
    /// Create a new transition record
    pub fn new(from: S, to: S, input: I, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            from,
            to,
            input,
            timestamp,
        }
    }
}

/// State machine with history
///
/// Wraps a state machine and tracks transition history, so the last
/// transition can be undone.
#[derive(Debug, Clone)]
pub struct StateMachineWithHistory<FSM: StateMachine> {
    /// Current state
    pub current: FSM,

    /// Transition history
    pub history: Vec<Transition<FSM, FSM::Input>>,
}

impl<FSM: StateMachine> StateMachineWithHistory<FSM> {
    /// Create a new state machine with history tracking
    pub fn new(initial: FSM) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Transition with history recording
    ///
    /// The timestamp is a parameter so callers (and tests) control time.
    pub fn transition_with_history(
        &mut self,
        input: FSM::Input,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> TransitionResult<FSM::Output> {
        let from = self.current.clone();
        let (to, output) = self.current.transition(&input)?;

        self.history
            .push(Transition::new(from, to.clone(), input, timestamp));

        self.current = to;
        Ok(output)
    }

    /// Undo the most recent transition, returning its record
    pub fn rewind(&mut self) -> Option<Transition<FSM, FSM::Input>> {
        let last = self.history.pop()?;
        self.current = last.from.clone();
        Some(last)
    }

    /// Get transition history
    pub fn get_history(&self) -> &[Transition<FSM, FSM::Input>] {
        &self.history
    }

    /// Get current state
    pub fn current_state(&self) -> &FSM {
        &self.current
    }
}
