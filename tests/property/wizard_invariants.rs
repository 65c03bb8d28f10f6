// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Build Wizard
//!
//! Random input sequences, accepted or not, must never leave the wizard in
//! a state that breaks its invariants, and a rejected input must leave the
//! state untouched.

use proptest::prelude::*;

use crate::fixtures::FixtureCatalog;
use rack_assembly::state_machine::StateInvariant;
use rack_assembly::{BuildWizard, Category, StateMachine, WizardInput};

#[derive(Debug, Clone)]
enum Step {
    Select { index: usize, owned: u32 },
    Remove { category: usize, index: usize },
    Clear { category: usize },
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (0usize..12, 0u32..=3).prop_map(|(index, owned)| Step::Select { index, owned }),
        2 => (0usize..8, 0usize..3).prop_map(|(category, index)| Step::Remove { category, index }),
        1 => (0usize..8).prop_map(|category| Step::Clear { category }),
        1 => Just(Step::Reset),
    ]
}

fn to_input(parts: &FixtureCatalog, step: &Step) -> WizardInput {
    match *step {
        Step::Select { index, owned } => WizardInput::Select {
            component: parts.components()[index].clone(),
            owned,
        },
        Step::Remove { category, index } => WizardInput::Remove {
            step: Category::ALL[category],
            index,
        },
        Step::Clear { category } => WizardInput::Clear {
            step: Category::ALL[category],
        },
        Step::Reset => WizardInput::Reset,
    }
}

proptest! {
    /// Property: Every reachable state satisfies the wizard invariants
    #[test]
    fn prop_transitions_preserve_invariants(steps in prop::collection::vec(step(), 0..40)) {
        let parts = FixtureCatalog::new();
        let mut wizard = BuildWizard::new();

        for step in &steps {
            let input = to_input(&parts, step);
            match wizard.transition(&input) {
                Ok((next, _)) => {
                    prop_assert!(next.check_invariants().is_ok());
                    wizard = next;
                }
                Err(_) => prop_assert!(!wizard.can_transition(&input)),
            }
        }
    }

    /// Property: A selection never reserves more units of a model than owned
    #[test]
    fn prop_reservations_stay_within_owned(steps in prop::collection::vec(step(), 0..40)) {
        let parts = FixtureCatalog::new();
        let mut wizard = BuildWizard::new();

        for step in &steps {
            let input = to_input(&parts, step);
            if let Ok((next, _)) = wizard.transition(&input) {
                if let WizardInput::Select { component, owned } = &input {
                    prop_assert!(next.reserved(component) <= *owned);
                }
                wizard = next;
            }
        }
    }

    /// Property: Clearing a step empties it and every step depending on it
    #[test]
    fn prop_clear_empties_dependents(
        steps in prop::collection::vec(step(), 0..30),
        category in 0usize..8,
    ) {
        let parts = FixtureCatalog::new();
        let mut wizard = BuildWizard::new();
        for step in &steps {
            if let Ok((next, _)) = wizard.transition(&to_input(&parts, step)) {
                wizard = next;
            }
        }

        let cleared_step = Category::ALL[category];
        let (wizard, output) = wizard
            .transition(&WizardInput::Clear { step: cleared_step })
            .expect("clear always succeeds");

        prop_assert_eq!(wizard.selection().count(cleared_step), 0);
        for step in rack_assembly::state_machine::build_wizard::downstream(cleared_step) {
            prop_assert_eq!(wizard.selection().count(*step), 0);
        }
        for step in &output.cleared {
            prop_assert_eq!(wizard.selection().count(*step), 0);
        }
    }
}
