// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Compatibility Checker
//!
//! The checker is a pure function of the assembly and the power budget, so
//! these properties vary one dimension of a known-good build at a time.

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::fixtures::{power_supply, processor, FixtureCatalog};
use rack_assembly::{Assembly, Category, PowerBudget, Violation};

/// Which mandatory slots to empty, as a bit per slot
fn removal_mask() -> impl Strategy<Value = [bool; 6]> {
    prop::array::uniform6(any::<bool>())
}

fn strip(build: &mut Assembly, mask: [bool; 6]) -> BTreeSet<Category> {
    let slots = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Storage,
        Category::Psu,
        Category::Cooler,
    ];
    let mut removed = BTreeSet::new();
    for (category, remove) in slots.into_iter().zip(mask) {
        if remove {
            while build.uninstall(category, 0).is_some() {}
            removed.insert(category);
        }
    }
    removed
}

proptest! {
    /// Property: Missing violations name exactly the emptied mandatory slots
    #[test]
    fn prop_missing_matches_removed_slots(mask in removal_mask()) {
        let parts = FixtureCatalog::new();
        let mut build = parts.valid_build();
        let removed = strip(&mut build, mask);

        let missing: BTreeSet<Category> = build
            .check(&PowerBudget::default())
            .into_iter()
            .filter_map(|violation| match violation {
                Violation::Missing { category } => Some(category),
                _ => None,
            })
            .collect();

        prop_assert_eq!(missing, removed);
    }

    /// Property: Checking is deterministic
    #[test]
    fn prop_check_is_deterministic(mask in removal_mask(), wattage in 0u32..=1200) {
        let parts = FixtureCatalog::new();
        let mut build = parts.valid_build();
        strip(&mut build, mask);
        if build.psu.is_some() {
            build.psu = Some(Arc::new(power_supply("Variable PSU", wattage)));
        }
        let budget = PowerBudget::default();

        prop_assert_eq!(build.check(&budget), build.check(&budget));
    }

    /// Property: A power violation appears exactly when the PSU is below the margin
    #[test]
    fn prop_power_violation_iff_underpowered(
        wattage in 0u32..=1200,
        cpu_tdp in 35u32..=400,
        margin in 1.0f64..2.0,
    ) {
        let parts = FixtureCatalog::new();
        let mut build = parts.valid_build();
        build.psu = Some(Arc::new(power_supply("Variable PSU", wattage)));
        build.processors = vec![Arc::new(processor("Variable CPU", "AM5", cpu_tdp))];
        let budget = PowerBudget {
            safety_margin: margin,
            ..PowerBudget::default()
        };

        let required = build.required_power(&budget);
        let reported = build
            .check(&budget)
            .iter()
            .find_map(Violation::power_shortfall);

        if wattage < required {
            prop_assert_eq!(reported, Some(required - wattage));
        } else {
            prop_assert_eq!(reported, None);
        }
    }

    /// Property: Removing one part of a valid build only reports its absence
    #[test]
    fn prop_removing_one_part_only_reports_absence(pick in 0usize..8) {
        let parts = FixtureCatalog::new();
        let mut build = parts.valid_build();
        let category = build.components()[pick].category();
        prop_assert!(build.uninstall(category, 0).is_some());

        for violation in build.check(&PowerBudget::default()) {
            let expected = match &violation {
                Violation::Missing { category: missing } => *missing == category,
                Violation::NotEnoughCoolers { .. } => category == Category::Cooler,
                _ => false,
            };
            prop_assert!(expected, "unexpected violation {}", violation);
        }
    }

    /// Property: Required power never decreases as CPU TDP grows
    #[test]
    fn prop_required_power_is_monotonic(tdp in 1u32..=500, extra in 0u32..=200) {
        let parts = FixtureCatalog::new();
        let mut lower = parts.valid_build();
        lower.processors = vec![Arc::new(processor("Lower", "AM5", tdp))];
        let mut higher = parts.valid_build();
        higher.processors = vec![Arc::new(processor("Higher", "AM5", tdp + extra))];
        let budget = PowerBudget::default();

        prop_assert!(higher.required_power(&budget) >= lower.required_power(&budget));
    }
}
