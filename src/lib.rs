// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hardware compatibility and assembly engine
//!
//! Domain model, compatibility checker, rack allocator and inventory ledger
//! for a server-building economy game. Players buy components, assemble
//! them into servers through a dependency-ordered wizard, and mount the
//! servers in a rack of finite height.
//!
//! The core is synchronous and does no I/O: catalogs and snapshots come in
//! and go out as JSON strings or values.

pub mod assembly;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod inventory;
pub mod persistence;
pub mod rack;
pub mod service;
pub mod state_machine;

// Re-export commonly used types
pub use assembly::{Assembly, AssemblyId, BuildManifest, Violation};
pub use catalog::{Catalog, CatalogError, ComponentResolver};
pub use config::{EngineConfig, PowerBudget, RackConfig};
pub use domain::{Category, Component, ModelId, Part};
pub use errors::{EngineError, EngineResult};
pub use inventory::{Inventory, Stock};
pub use persistence::{RestoreWarning, Snapshot};
pub use rack::{Occupant, Rack, RackError, UnitView};
pub use service::{Datacenter, ServiceError};
pub use state_machine::{BuildWizard, StateMachine, WizardInput, WizardOutput};
