// Copyright (c) 2025 - Cowboy AI, Inc.
//! Player Inventory
//!
//! Counted multiset of owned components keyed by model identifier. Units of
//! one model are fungible: the inventory stores one shared definition per
//! model and a quantity next to it. Quantities are never written into the
//! component value; listings pair them up in a [`Stock`] instead, so a listed
//! item keeps the full predicate interface of its category.
//!
//! All operations are infallible. Removing something that is not owned is a
//! `false`, not an error.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{Category, Component, ModelId, Part};

/// A component paired with the number of units owned
#[derive(Debug, Clone, PartialEq)]
pub struct Stock<T = Component> {
    pub item: T,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
struct Entry {
    component: Component,
    quantity: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: BTreeMap<ModelId, Entry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit
    pub fn add(&mut self, component: Component) {
        self.add_many(component, 1);
    }

    /// Add `quantity` units; zero is a no-op
    ///
    /// The first addition of a model stores its definition. Later additions
    /// only count up.
    pub fn add_many(&mut self, component: Component, quantity: u32) {
        if quantity == 0 {
            return;
        }

        let model = component.model().clone();
        let entry = self
            .items
            .entry(model.clone())
            .or_insert(Entry {
                component,
                quantity: 0,
            });
        entry.quantity = entry.quantity.saturating_add(quantity);

        debug!(model = %model, quantity = entry.quantity, "Inventory add");
    }

    /// Remove one unit, deleting the entry when it reaches zero
    pub fn remove(&mut self, model: &ModelId) -> bool {
        let Some(entry) = self.items.get_mut(model) else {
            return false;
        };
        if entry.quantity == 0 {
            return false;
        }

        entry.quantity -= 1;
        if entry.quantity == 0 {
            self.items.remove(model);
        }
        debug!(model = %model, "Inventory remove");
        true
    }

    pub fn has(&self, model: &ModelId) -> bool {
        self.count(model) > 0
    }

    pub fn count(&self, model: &ModelId) -> u32 {
        self.items.get(model).map_or(0, |entry| entry.quantity)
    }

    /// Shared definition of an owned model
    pub fn get(&self, model: &ModelId) -> Option<&Component> {
        self.items.get(model).map(|entry| &entry.component)
    }

    /// Every distinct owned component of one category with its quantity
    pub fn items_by_category(&self, category: Category) -> Vec<Stock> {
        self.items
            .values()
            .filter(|entry| entry.component.category() == category)
            .map(|entry| Stock {
                item: entry.component.clone(),
                quantity: entry.quantity,
            })
            .collect()
    }

    /// Typed listing for one component record type
    pub fn stock_of<T: Part>(&self) -> Vec<Stock<Arc<T>>> {
        self.items
            .values()
            .filter_map(|entry| {
                T::from_component(&entry.component).map(|part| Stock {
                    item: Arc::clone(part),
                    quantity: entry.quantity,
                })
            })
            .collect()
    }

    /// Every entry, ordered by model id
    pub fn entries(&self) -> Vec<Stock> {
        self.items
            .values()
            .map(|entry| Stock {
                item: entry.component.clone(),
                quantity: entry.quantity,
            })
            .collect()
    }

    /// Number of distinct models owned
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all models
    pub fn total_units(&self) -> u64 {
        self.items.values().map(|entry| u64::from(entry.quantity)).sum()
    }
}
