// Copyright (c) 2025 - Cowboy AI, Inc.
//! Component Catalog
//!
//! Read-only registry of every purchasable component, keyed by model
//! identifier. A [`Catalog`] is built once (from values or a JSON document)
//! and passed by reference wherever model ids need to be turned back into
//! components, most notably when a saved game is restored.
//!
//! # JSON Layout
//!
//! ```json
//! {
//!   "cpu":         [{ "brand": "AMD", "model": "Ryzen 9 7950X", ... }],
//!   "motherboard": [...],
//!   "gpu": [...], "ram": [...], "psu": [...],
//!   "case": [...], "cooler": [...], "storage": [...]
//! }
//! ```
//!
//! Every section is optional. The plural names used by older data files
//! (`processors`, `graphics_cards`, ...) are accepted as aliases.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    Case, Category, Component, ComponentError, CpuCooler, GraphicsCard, ModelId, Motherboard,
    PowerSupply, Processor, RamKit, StorageDevice,
};

/// Catalog loading error
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog document is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog entry: {0}")]
    InvalidEntry(#[from] ComponentError),
}

/// Lookup seam between the engine and whatever holds component definitions
pub trait ComponentResolver {
    /// Find a component by model identifier
    fn resolve(&self, model: &ModelId) -> Option<Component>;

    /// Find a component by raw model string; malformed ids resolve to `None`
    fn resolve_str(&self, model: &str) -> Option<Component> {
        ModelId::new(model)
            .ok()
            .and_then(|model| self.resolve(&model))
    }
}

/// Read-only component registry
///
/// Iteration follows insertion order so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<ModelId, Component>,
    order: Vec<ModelId>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default, alias = "processors")]
    cpu: Vec<Processor>,
    #[serde(default, alias = "motherboards")]
    motherboard: Vec<Motherboard>,
    #[serde(default, alias = "graphics_cards", alias = "graphicsCards")]
    gpu: Vec<GraphicsCard>,
    #[serde(default, alias = "ram_modules", alias = "ramModules")]
    ram: Vec<RamKit>,
    #[serde(default, alias = "power_supplies", alias = "powerSupplies")]
    psu: Vec<PowerSupply>,
    #[serde(default, alias = "cases")]
    case: Vec<Case>,
    #[serde(default, alias = "cpu_coolers", alias = "cpuCoolers")]
    cooler: Vec<CpuCooler>,
    #[serde(default, alias = "storage_devices", alias = "storageDevices")]
    storage: Vec<StorageDevice>,
}

impl CatalogDocument {
    fn into_components(self) -> Vec<Component> {
        let mut components = Vec::new();
        components.extend(self.cpu.into_iter().map(Component::from));
        components.extend(self.motherboard.into_iter().map(Component::from));
        components.extend(self.gpu.into_iter().map(Component::from));
        components.extend(self.ram.into_iter().map(Component::from));
        components.extend(self.psu.into_iter().map(Component::from));
        components.extend(self.case.into_iter().map(Component::from));
        components.extend(self.cooler.into_iter().map(Component::from));
        components.extend(self.storage.into_iter().map(Component::from));
        components
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from component values
    ///
    /// Structurally invalid records (zero-unit cases, empty RAM kits) are
    /// rejected. Duplicate model ids are logged and the later entry wins.
    pub fn from_components<I>(components: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Component>,
    {
        let mut catalog = Self::new();
        for component in components {
            component.validate()?;
            catalog.insert(component);
        }
        debug!(components = catalog.len(), "Catalog built");
        Ok(catalog)
    }

    /// Parse a catalog JSON document
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_components(document.into_components())
    }

    /// Register a component, returning the entry it replaced
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        let model = component.model().clone();
        let previous = self.entries.insert(model.clone(), component);

        match &previous {
            Some(existing) => warn!(
                model = %model,
                category = existing.category().as_str(),
                "Duplicate model id in catalog, keeping the later entry"
            ),
            None => self.order.push(model),
        }
        previous
    }

    pub fn get(&self, model: &ModelId) -> Option<&Component> {
        self.entries.get(model)
    }

    pub fn contains(&self, model: &ModelId) -> bool {
        self.entries.contains_key(model)
    }

    /// All components of one category, in insertion order
    pub fn by_category(&self, category: Category) -> Vec<&Component> {
        self.iter()
            .filter(|component| component.category() == category)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.order.iter().filter_map(|model| self.entries.get(model))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ComponentResolver for Catalog {
    fn resolve(&self, model: &ModelId) -> Option<Component> {
        let found = self.get(model).cloned();
        if found.is_none() {
            debug!(model = %model, "Model not found in catalog");
        }
        found
    }
}
