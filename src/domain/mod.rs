// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hardware Domain Models
//!
//! Immutable component records and the value objects they are built from.
//!
//! # Value Objects with Invariants
//!
//! - [`ModelId`] - Non-empty model identifier, unique across categories
//! - [`Category`] - Hardware component taxonomy
//! - [`Socket`], [`MemoryType`] - Trimmed, non-empty designations
//! - [`FormFactor`] - Board / case size class
//! - [`PcieVersion`] - Numerically ordered PCIe revision
//! - [`StorageKind`], [`StorageFormFactor`] - Drive technology and connector
//!
//! # Component Records
//!
//! [`Processor`], [`Motherboard`], [`GraphicsCard`], [`RamKit`],
//! [`PowerSupply`], [`Case`], [`CpuCooler`], [`StorageDevice`], unified by
//! [`Component`] and the [`Part`] trait.
//!
//! # Entities
//!
//! - [`Wallet`] - Player balance

pub mod category;
pub mod component;
pub mod values;
pub mod wallet;

pub use category::{Category, ModelId, ModelIdError};
pub use component::{
    Case, Component, ComponentError, CpuCooler, GraphicsCard, Motherboard, Part, PcieSlot,
    PowerSupply, Processor, RamKit, StorageDevice,
};
pub use values::{
    FormFactor, MemoryType, PcieVersion, Socket, StorageFormFactor, StorageKind, ValueError,
};
pub use wallet::{Wallet, WalletError};
