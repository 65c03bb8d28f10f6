// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Rack Allocation
//!
//! Whatever sequence of placements and removals is attempted, occupants
//! never overlap and never leave the rack.

use proptest::prelude::*;
use std::sync::Arc;

use crate::fixtures::case;
use rack_assembly::{Rack, RackError};

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum RackOp {
    Place { size_u: u32, start_u: u32 },
    Remove { unit: u32 },
    Upgrade { additional_u: u32 },
}

fn rack_op() -> impl Strategy<Value = RackOp> {
    prop_oneof![
        3 => (1u32..=4, 0u32..=14).prop_map(|(size_u, start_u)| RackOp::Place { size_u, start_u }),
        1 => (0u32..=14).prop_map(|unit| RackOp::Remove { unit }),
        1 => (0u32..=4).prop_map(|additional_u| RackOp::Upgrade { additional_u }),
    ]
}

fn rack_ops() -> impl Strategy<Value = Vec<RackOp>> {
    prop::collection::vec(rack_op(), 0..40)
}

fn apply(rack: &mut Rack, op: &RackOp) -> Option<Result<(), RackError>> {
    match *op {
        RackOp::Place { size_u, start_u } => {
            let model = format!("Case {size_u}U");
            Some(rack.add_case(Arc::new(case(&model, size_u)), start_u, None))
        }
        RackOp::Remove { unit } => {
            rack.remove_case(unit);
            None
        }
        RackOp::Upgrade { additional_u } => {
            rack.upgrade(additional_u);
            None
        }
    }
}

fn assert_consistent(rack: &Rack) -> Result<(), TestCaseError> {
    for occupant in rack.occupants() {
        prop_assert!(occupant.start_u >= 1);
        prop_assert!(occupant.end_u() <= rack.total_u());
    }
    for unit in 1..=rack.total_u() {
        let covering = rack
            .occupants()
            .iter()
            .filter(|occupant| occupant.covers(unit))
            .count();
        prop_assert!(covering <= 1, "unit {} covered {} times", unit, covering);
    }
    let used: u32 = rack.occupants().iter().map(|occupant| occupant.size_u()).sum();
    prop_assert_eq!(rack.available_u(), rack.total_u() - used);
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: Occupants never overlap and stay inside the rack
    #[test]
    fn prop_occupants_never_overlap(total_u in 1u32..=10, ops in rack_ops()) {
        let mut rack = Rack::new(total_u);
        for op in &ops {
            apply(&mut rack, op);
            assert_consistent(&rack)?;
        }
    }

    /// Property: can_place predicts add_case exactly
    #[test]
    fn prop_can_place_matches_add_case(total_u in 1u32..=10, ops in rack_ops()) {
        let mut rack = Rack::new(total_u);
        for op in &ops {
            let predicted = match *op {
                RackOp::Place { size_u, start_u } => Some(rack.can_place(size_u, start_u)),
                _ => None,
            };
            let before = rack.occupants().len();
            let outcome = apply(&mut rack, op);

            if let (Some(predicted), Some(outcome)) = (predicted, outcome) {
                prop_assert_eq!(&predicted, &outcome);
                let expected = if outcome.is_ok() { before + 1 } else { before };
                prop_assert_eq!(rack.occupants().len(), expected);
            }
        }
    }

    /// Property: Upgrading never moves or drops an occupant
    #[test]
    fn prop_upgrade_preserves_occupants(ops in rack_ops(), additional_u in 0u32..=8) {
        let mut rack = Rack::new(6);
        for op in &ops {
            apply(&mut rack, op);
        }
        let before: Vec<(u32, u32)> = rack
            .occupants()
            .iter()
            .map(|occupant| (occupant.start_u, occupant.size_u()))
            .collect();
        let total_before = rack.total_u();

        prop_assert_eq!(rack.upgrade(additional_u), total_before + additional_u);

        let after: Vec<(u32, u32)> = rack
            .occupants()
            .iter()
            .map(|occupant| (occupant.start_u, occupant.size_u()))
            .collect();
        prop_assert_eq!(before, after);
    }

    /// Property: first_fit finds a place exactly when a long enough free run exists
    #[test]
    fn prop_first_fit_agrees_with_free_runs(ops in rack_ops(), size_u in 1u32..=4) {
        let mut rack = Rack::new(8);
        for op in &ops {
            apply(&mut rack, op);
        }

        match rack.first_fit(size_u) {
            Some(start_u) => {
                prop_assert!(rack.can_place(size_u, start_u).is_ok());
                prop_assert!(rack.largest_free_run() >= size_u);
            }
            None => prop_assert!(rack.largest_free_run() < size_u),
        }
        prop_assert!(rack.largest_free_run() <= rack.available_u());
    }
}
