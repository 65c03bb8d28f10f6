// Copyright (c) 2025 - Cowboy AI, Inc.
//! Build Wizard State Machine
//!
//! Dependency-ordered selection of the components for one server. The state
//! is the current selection (an [`Assembly`]); every transition is pure and
//! returns a new wizard.
//!
//! # State Machine Type
//!
//! This is a **Mealy Machine**: outputs depend on both state and input.
//!
//! # Steps and Prerequisites
//!
//! ```text
//! case ──┬── motherboard ──┬── cpu ── cooler
//!        │                 ├── ram*
//!        │                 ├── gpu*
//!        │                 └── storage*
//!        └── psu
//! ```
//!
//! Starred steps are multi-select. A step can only be filled once its
//! prerequisite is. Selecting or clearing an upstream step clears everything
//! downstream of it (case clears all; motherboard clears cpu, cooler, ram,
//! gpu and storage; cpu clears cooler).
//!
//! # Inputs
//!
//! - `Select`: fill a step (singular) or append to it (multi-select)
//! - `Remove`: drop one entry of a step
//! - `Clear`: empty a step
//! - `Reset`: start over
//!
//! Multi-select steps enforce motherboard capacity at selection time (RAM
//! slots, x16 slots, M.2 slots, SATA ports) with the same arithmetic the
//! compatibility checker uses, so an over-full build never reaches it.

use std::sync::Arc;
use tracing::debug;

use super::{StateInvariant, StateMachine, TransitionError, TransitionResult};
use crate::assembly::Assembly;
use crate::domain::{Category, Component, Motherboard};
use crate::inventory::{Inventory, Stock};

/// Wizard input
#[derive(Debug, Clone, PartialEq)]
pub enum WizardInput {
    /// Select a component; its category decides the step
    ///
    /// `owned` is the inventory count of that model at selection time.
    Select { component: Component, owned: u32 },

    /// Remove the entry at `index` of a step
    Remove { step: Category, index: usize },

    /// Empty a step (and everything downstream)
    Clear { step: Category },

    /// Drop the whole selection
    Reset,
}

/// Transition output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardOutput {
    /// Steps that lost their selection because of the cascade
    pub cleared: Vec<Category>,
}

/// Step the given step depends on
pub fn prerequisite(step: Category) -> Option<Category> {
    match step {
        Category::Case => None,
        Category::Motherboard | Category::Psu => Some(Category::Case),
        Category::Cpu | Category::Ram | Category::Gpu | Category::Storage => {
            Some(Category::Motherboard)
        }
        Category::Cooler => Some(Category::Cpu),
    }
}

/// Steps cleared when the given step changes
pub fn downstream(step: Category) -> &'static [Category] {
    match step {
        Category::Case => &[
            Category::Motherboard,
            Category::Cpu,
            Category::Cooler,
            Category::Ram,
            Category::Gpu,
            Category::Storage,
            Category::Psu,
        ],
        Category::Motherboard => &[
            Category::Cpu,
            Category::Cooler,
            Category::Ram,
            Category::Gpu,
            Category::Storage,
        ],
        Category::Cpu => &[Category::Cooler],
        _ => &[],
    }
}

pub fn is_multi_select(step: Category) -> bool {
    matches!(step, Category::Ram | Category::Gpu | Category::Storage)
}

/// Steps in display order
pub const STEPS: [Category; 8] = [
    Category::Case,
    Category::Motherboard,
    Category::Cpu,
    Category::Cooler,
    Category::Ram,
    Category::Gpu,
    Category::Storage,
    Category::Psu,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildWizard {
    selection: Assembly,
}

impl BuildWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The components selected so far
    pub fn selection(&self) -> &Assembly {
        &self.selection
    }

    pub fn into_selection(self) -> Assembly {
        self.selection
    }

    /// Whether a step's prerequisite is filled
    pub fn can_select(&self, step: Category) -> bool {
        prerequisite(step).map_or(true, |required| self.selection.count(required) > 0)
    }

    /// Steps that still need a selection before assembling
    ///
    /// Every step is required, multi-select steps need at least one entry.
    pub fn missing_steps(&self) -> Vec<Category> {
        STEPS
            .into_iter()
            .filter(|step| self.selection.count(*step) == 0)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_steps().is_empty()
    }

    /// Units of a model already reserved by the selection
    pub fn reserved(&self, component: &Component) -> u32 {
        self.selection
            .components_of(component.category())
            .iter()
            .filter(|selected| selected.model() == component.model())
            .count() as u32
    }

    /// Owned components that can be selected for a step right now
    ///
    /// Locked steps yield nothing. Quantities are what remains after the
    /// current selection's reservations; fully reserved models are left out.
    pub fn candidates(&self, step: Category, inventory: &Inventory) -> Vec<Stock> {
        if !self.can_select(step) {
            return Vec::new();
        }

        let case = self.selection.case.as_deref();
        let board = self.selection.motherboard.as_deref();
        let cpu = self.selection.processors.first().map(Arc::as_ref);

        inventory
            .items_by_category(step)
            .into_iter()
            .filter(|stock| match &stock.item {
                Component::Case(_) => true,
                Component::Motherboard(candidate) => {
                    case.map_or(false, |case| case.fits_motherboard(candidate))
                }
                Component::Cpu(candidate) => {
                    board.map_or(false, |board| candidate.socket == board.socket)
                }
                Component::Cooler(candidate) => match (cpu, case) {
                    (Some(cpu), Some(case)) => {
                        candidate.supports_socket(&cpu.socket) && case.fits_cooler(candidate)
                    }
                    _ => false,
                },
                Component::Ram(candidate) => {
                    board.map_or(false, |board| candidate.memory_type == board.memory_type)
                }
                Component::Gpu(candidate) => match (board, case) {
                    (Some(_), Some(case)) => case.fits_gpu_length(candidate),
                    _ => false,
                },
                Component::Storage(candidate) => board.map_or(false, |board| {
                    if candidate.is_m2() {
                        board.m2_slot_count() > 0
                    } else {
                        board.sata_ports > 0
                    }
                }),
                Component::Psu(candidate) => case.map_or(false, |case| case.fits_psu(candidate)),
            })
            .filter_map(|stock| {
                let replaced = if is_multi_select(step) {
                    0
                } else {
                    self.reserved(&stock.item)
                };
                let left = (stock.quantity + replaced).saturating_sub(self.reserved(&stock.item));
                (left > 0).then_some(Stock {
                    item: stock.item,
                    quantity: left,
                })
            })
            .collect()
    }

    fn select(&self, component: &Component, owned: u32) -> TransitionResult<(Self, WizardOutput)> {
        let step = component.category();
        self.ensure_unlocked(step)?;

        // A singular step being re-selected frees its current unit
        let freed = if is_multi_select(step) {
            0
        } else {
            self.reserved(component)
        };
        if self.reserved(component) - freed + 1 > owned {
            return Err(TransitionError::InsufficientQuantity {
                model: component.model().clone(),
                owned,
            });
        }

        let mut next = self.clone();
        if is_multi_select(step) {
            if let Some(board) = self.selection.motherboard.as_deref() {
                self.ensure_capacity(board, component)?;
            }
            next.selection.install(component.clone());
            debug!(step = step.as_str(), model = %component.model(), "Wizard append");
            return Ok((next, WizardOutput::default()));
        }

        let cleared = next.clear_downstream(step);
        next.clear_slot(step);
        next.selection.install(component.clone());
        debug!(step = step.as_str(), model = %component.model(), "Wizard select");
        Ok((next, WizardOutput { cleared }))
    }

    fn ensure_unlocked(&self, step: Category) -> TransitionResult<()> {
        match prerequisite(step) {
            Some(requires) if self.selection.count(requires) == 0 => {
                Err(TransitionError::StepLocked { step, requires })
            }
            _ => Ok(()),
        }
    }

    fn ensure_capacity(&self, board: &Motherboard, component: &Component) -> TransitionResult<()> {
        let exceeded = |resource, used: usize, requested: u32, capacity: usize| {
            if used as u64 + u64::from(requested) > capacity as u64 {
                Err(TransitionError::CapacityExceeded {
                    resource,
                    used: u32::try_from(used).unwrap_or(u32::MAX),
                    requested,
                    capacity: u32::try_from(capacity).unwrap_or(u32::MAX),
                })
            } else {
                Ok(())
            }
        };

        match component {
            Component::Ram(kit) => exceeded(
                "memory slots",
                self.selection.ram_modules() as usize,
                kit.modules,
                board.memory_slots as usize,
            ),
            Component::Gpu(_) => exceeded(
                "PCIe x16 slots",
                self.selection.gpus.len(),
                1,
                board.x16_slot_count(),
            ),
            Component::Storage(device) if device.is_m2() => exceeded(
                "M.2 slots",
                self.selection.m2_devices(),
                1,
                board.m2_slot_count(),
            ),
            Component::Storage(_) => exceeded(
                "SATA ports",
                self.selection.sata_devices(),
                1,
                board.sata_ports as usize,
            ),
            _ => Ok(()),
        }
    }

    fn clear_slot(&mut self, step: Category) {
        while self.selection.uninstall(step, 0).is_some() {}
    }

    /// Clear every downstream step, returning those that were non-empty
    fn clear_downstream(&mut self, step: Category) -> Vec<Category> {
        let mut cleared = Vec::new();
        for &dependent in downstream(step) {
            if self.selection.count(dependent) > 0 {
                self.clear_slot(dependent);
                cleared.push(dependent);
            }
        }
        cleared
    }

    fn remove(&self, step: Category, index: usize) -> TransitionResult<(Self, WizardOutput)> {
        let mut next = self.clone();
        if next.selection.uninstall(step, index).is_none() {
            return Err(TransitionError::NothingToRemove { step, index });
        }

        let cleared = if is_multi_select(step) {
            Vec::new()
        } else {
            next.clear_downstream(step)
        };
        Ok((next, WizardOutput { cleared }))
    }

    fn clear(&self, step: Category) -> (Self, WizardOutput) {
        let mut next = self.clone();
        let mut cleared = Vec::new();
        if next.selection.count(step) > 0 {
            next.clear_slot(step);
            cleared.push(step);
        }
        cleared.extend(next.clear_downstream(step));
        (next, WizardOutput { cleared })
    }
}

impl StateMachine for BuildWizard {
    type Input = WizardInput;
    type Output = WizardOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        match input {
            WizardInput::Select { component, owned } => self.select(component, *owned),
            WizardInput::Remove { step, index } => self.remove(*step, *index),
            WizardInput::Clear { step } => Ok(self.clear(*step)),
            WizardInput::Reset => {
                let cleared = STEPS
                    .into_iter()
                    .filter(|step| self.selection.count(*step) > 0)
                    .collect();
                Ok((Self::new(), WizardOutput { cleared }))
            }
        }
    }

    /// Reset, plus a clear for every filled step
    fn valid_inputs(&self) -> Vec<Self::Input> {
        let mut inputs = vec![WizardInput::Reset];
        inputs.extend(
            STEPS
                .into_iter()
                .filter(|step| self.selection.count(*step) > 0)
                .map(|step| WizardInput::Clear { step }),
        );
        inputs
    }
}

impl StateInvariant for BuildWizard {
    fn check_invariants(&self) -> Result<(), String> {
        for step in STEPS {
            let filled = self.selection.count(step);
            if filled > 0 && !self.can_select(step) {
                return Err(format!("{step} selected without its prerequisite"));
            }
            if !is_multi_select(step) && filled > 1 {
                return Err(format!("{step} holds {filled} selections"));
            }
        }

        if let Some(board) = self.selection.motherboard.as_deref() {
            let fits = self.selection.ram_modules() <= board.memory_slots
                && self.selection.gpus.len() <= board.x16_slot_count()
                && self.selection.m2_devices() <= board.m2_slot_count()
                && self.selection.sata_devices() <= board.sata_ports as usize;
            if !fits {
                return Err("selection exceeds motherboard capacity".to_string());
            }
        }
        Ok(())
    }
}
