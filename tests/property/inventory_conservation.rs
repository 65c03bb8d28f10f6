// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Inventory Bookkeeping
//!
//! The inventory must behave as a counted multiset: every add and remove is
//! reflected in the counts, nothing goes negative, and a model is listed
//! exactly while at least one unit is owned.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::fixtures::FixtureCatalog;
use rack_assembly::{Category, Inventory, ModelId};

#[derive(Debug, Clone)]
enum InventoryOp {
    Add { index: usize, quantity: u32 },
    Remove { index: usize },
}

fn inventory_op(models: usize) -> impl Strategy<Value = InventoryOp> {
    prop_oneof![
        (0..models, 0u32..=3).prop_map(|(index, quantity)| InventoryOp::Add { index, quantity }),
        (0..models).prop_map(|index| InventoryOp::Remove { index }),
    ]
}

fn inventory_ops(models: usize) -> impl Strategy<Value = Vec<InventoryOp>> {
    prop::collection::vec(inventory_op(models), 0..60)
}

const MODELS: usize = 12;

proptest! {
    /// Property: Counts match a reference multiset after any operation sequence
    #[test]
    fn prop_counts_match_reference(ops in inventory_ops(MODELS)) {
        let parts = FixtureCatalog::new();
        let components = parts.components();
        let mut inventory = Inventory::new();
        let mut reference: HashMap<ModelId, u32> = HashMap::new();

        for op in &ops {
            match *op {
                InventoryOp::Add { index, quantity } => {
                    let component = components[index].clone();
                    *reference.entry(component.model().clone()).or_default() += quantity;
                    inventory.add_many(component, quantity);
                }
                InventoryOp::Remove { index } => {
                    let model = components[index].model();
                    let owned = reference.get(model).copied().unwrap_or(0);
                    prop_assert_eq!(inventory.remove(model), owned > 0);
                    if owned > 0 {
                        reference.insert(model.clone(), owned - 1);
                    }
                }
            }
        }

        for component in &components {
            let expected = reference.get(component.model()).copied().unwrap_or(0);
            prop_assert_eq!(inventory.count(component.model()), expected);
            prop_assert_eq!(inventory.has(component.model()), expected > 0);
        }
        let total: u64 = reference.values().map(|count| u64::from(*count)).sum();
        prop_assert_eq!(inventory.total_units(), total);
    }

    /// Property: Listings hold only owned models, each in its own category
    #[test]
    fn prop_listings_hold_only_owned_models(ops in inventory_ops(MODELS)) {
        let parts = FixtureCatalog::new();
        let components = parts.components();
        let mut inventory = Inventory::new();
        for op in &ops {
            match *op {
                InventoryOp::Add { index, quantity } => {
                    inventory.add_many(components[index].clone(), quantity)
                }
                InventoryOp::Remove { index } => {
                    inventory.remove(components[index].model());
                }
            }
        }

        let mut listed = 0;
        for category in Category::ALL {
            for stock in inventory.items_by_category(category) {
                prop_assert!(stock.quantity > 0);
                prop_assert_eq!(stock.item.category(), category);
                prop_assert_eq!(stock.quantity, inventory.count(stock.item.model()));
                listed += 1;
            }
        }
        prop_assert_eq!(listed, inventory.len());
        prop_assert_eq!(inventory.is_empty(), inventory.total_units() == 0);
    }
}
