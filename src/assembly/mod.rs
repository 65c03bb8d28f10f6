// Copyright (c) 2025 - Cowboy AI, Inc.
//! Server Assembly Aggregate
//!
//! An [`Assembly`] groups the components of one candidate or installed
//! server: one case, motherboard and power supply, plus any number of
//! processors, coolers, RAM kits, GPUs and storage devices. Components are
//! shared [`Arc`] references to catalog definitions.
//!
//! [`Assembly::check`] evaluates the compatibility rules in
//! [`invariants`] and returns the ordered list of [`Violation`]s. The check
//! is pure: running it twice on the same assembly gives the same list.

pub mod invariants;
pub mod manifest;
pub mod violations;

pub use manifest::{BuildManifest, UnresolvedModel};
pub use violations::Violation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::PowerBudget;
use crate::domain::{
    Case, Category, Component, CpuCooler, GraphicsCard, Motherboard, Part, PowerSupply,
    Processor, RamKit, StorageDevice,
};

/// Identifier of an installed server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssemblyId(Uuid);

impl AssemblyId {
    /// Time-ordered identifier
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AssemblyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssemblyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    pub case: Option<Arc<Case>>,
    pub motherboard: Option<Arc<Motherboard>>,
    pub psu: Option<Arc<PowerSupply>>,
    pub processors: Vec<Arc<Processor>>,
    pub coolers: Vec<Arc<CpuCooler>>,
    pub ram: Vec<Arc<RamKit>>,
    pub gpus: Vec<Arc<GraphicsCard>>,
    pub storage: Vec<Arc<StorageDevice>>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a component in the slot its category calls for
    ///
    /// Singular slots (case, motherboard, PSU) are replaced; list slots are
    /// appended to.
    pub fn install(&mut self, component: Component) -> &mut Self {
        match component {
            Component::Case(case) => self.case = Some(case),
            Component::Motherboard(board) => self.motherboard = Some(board),
            Component::Psu(psu) => self.psu = Some(psu),
            Component::Cpu(cpu) => self.processors.push(cpu),
            Component::Cooler(cooler) => self.coolers.push(cooler),
            Component::Ram(kit) => self.ram.push(kit),
            Component::Gpu(gpu) => self.gpus.push(gpu),
            Component::Storage(device) => self.storage.push(device),
        }
        self
    }

    /// Remove the `index`-th component of a category
    ///
    /// Singular slots ignore `index` other than requiring it to be 0.
    pub fn uninstall(&mut self, category: Category, index: usize) -> Option<Component> {
        fn take<T: Part>(list: &mut Vec<Arc<T>>, index: usize) -> Option<Component> {
            (index < list.len()).then(|| T::into_component(list.remove(index)))
        }

        fn take_single<T: Part>(slot: &mut Option<Arc<T>>, index: usize) -> Option<Component> {
            if index == 0 {
                slot.take().map(T::into_component)
            } else {
                None
            }
        }

        match category {
            Category::Case => take_single(&mut self.case, index),
            Category::Motherboard => take_single(&mut self.motherboard, index),
            Category::Psu => take_single(&mut self.psu, index),
            Category::Cpu => take(&mut self.processors, index),
            Category::Cooler => take(&mut self.coolers, index),
            Category::Ram => take(&mut self.ram, index),
            Category::Gpu => take(&mut self.gpus, index),
            Category::Storage => take(&mut self.storage, index),
        }
    }

    /// Number of components installed for a category
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Case => usize::from(self.case.is_some()),
            Category::Motherboard => usize::from(self.motherboard.is_some()),
            Category::Psu => usize::from(self.psu.is_some()),
            Category::Cpu => self.processors.len(),
            Category::Cooler => self.coolers.len(),
            Category::Ram => self.ram.len(),
            Category::Gpu => self.gpus.len(),
            Category::Storage => self.storage.len(),
        }
    }

    /// Components of one category in slot order
    pub fn components_of(&self, category: Category) -> Vec<Component> {
        fn wrap<T: Part>(parts: &[Arc<T>]) -> Vec<Component> {
            parts.iter().cloned().map(T::into_component).collect()
        }

        fn wrap_single<T: Part>(part: &Option<Arc<T>>) -> Vec<Component> {
            part.iter().cloned().map(T::into_component).collect()
        }

        match category {
            Category::Case => wrap_single(&self.case),
            Category::Motherboard => wrap_single(&self.motherboard),
            Category::Psu => wrap_single(&self.psu),
            Category::Cpu => wrap(&self.processors),
            Category::Cooler => wrap(&self.coolers),
            Category::Ram => wrap(&self.ram),
            Category::Gpu => wrap(&self.gpus),
            Category::Storage => wrap(&self.storage),
        }
    }

    /// Every installed component
    pub fn components(&self) -> Vec<Component> {
        Category::ALL
            .into_iter()
            .flat_map(|category| self.components_of(category))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL
            .into_iter()
            .all(|category| self.count(category) == 0)
    }

    /// Sum of every component's price
    pub fn total_price(&self) -> u64 {
        self.components()
            .iter()
            .map(|component| u64::from(component.price()))
            .sum()
    }

    /// Modules across all RAM kits
    pub fn ram_modules(&self) -> u32 {
        invariants::total_modules(&self.ram)
    }

    pub fn m2_devices(&self) -> usize {
        self.storage.iter().filter(|device| device.is_m2()).count()
    }

    pub fn sata_devices(&self) -> usize {
        self.storage.len() - self.m2_devices()
    }

    pub fn required_power(&self, budget: &PowerBudget) -> u32 {
        invariants::required_power(self, budget)
    }

    /// Evaluate every compatibility rule
    pub fn check(&self, budget: &PowerBudget) -> Vec<Violation> {
        invariants::check_assembly(self, budget)
    }

    pub fn is_compatible(&self, budget: &PowerBudget) -> bool {
        self.check(budget).is_empty()
    }
}
