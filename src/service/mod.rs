// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer
//!
//! Application services that orchestrate the domain: the inventory, the
//! rack, the wallet and the compatibility checker are combined here into
//! player-level operations.
//!
//! # Architecture
//!
//! ```text
//! Caller (UI, CLI, tests)
//!     ↓
//! Service Layer (this module)
//!     ↓
//! Wizard → Assembly check → Inventory / Rack / Wallet
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use rack_assembly::service::Datacenter;
//!
//! let mut datacenter = Datacenter::new("player", EngineConfig::default());
//! datacenter.purchase(&cart)?;
//! let id = datacenter.assemble(&wizard, 1)?;
//! let returned = datacenter.dismantle(1)?;
//! ```

pub mod datacenter;

pub use datacenter::{Datacenter, ServiceError, ServiceResult};
