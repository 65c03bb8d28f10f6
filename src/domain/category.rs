// Copyright (c) 2025 - Cowboy AI, Inc.
//! Component Category and Model Identity
//!
//! Every hardware component belongs to exactly one category and is identified
//! by its model name. Model names are assumed globally unique across all
//! categories, so a bare [`ModelId`] is enough to find a component in the
//! catalog or the inventory.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Model identifier validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelIdError {
    #[error("Model identifier is empty")]
    Empty,

    #[error("Model identifier exceeds maximum length of 128 characters: {0}")]
    TooLong(usize),
}

/// Stable model identifier (e.g. "Ryzen 9 7950X")
///
/// Invariants:
/// - Non-empty after trimming
/// - At most 128 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    /// Maximum identifier length
    pub const MAX_LENGTH: usize = 128;

    /// Create a validated model identifier
    pub fn new(model: impl Into<String>) -> Result<Self, ModelIdError> {
        let model = model.into();
        let trimmed = model.trim();

        if trimmed.is_empty() {
            return Err(ModelIdError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(ModelIdError::TooLong(trimmed.len()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ModelId {
    type Error = ModelIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ModelId {
    type Error = ModelIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Hardware component category
///
/// The canonical string form matches the keys the selection wizard and the
/// save format use (`cpu`, `ram`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Central processing unit
    Cpu,
    /// Motherboard
    Motherboard,
    /// Graphics card
    Gpu,
    /// Memory kit
    Ram,
    /// Power supply unit
    Psu,
    /// Rack-mountable case
    Case,
    /// CPU cooler (air or AIO)
    Cooler,
    /// HDD, SATA SSD or NVMe drive
    Storage,
}

impl Category {
    /// All categories, in catalog order
    pub const ALL: [Category; 8] = [
        Self::Cpu,
        Self::Motherboard,
        Self::Gpu,
        Self::Ram,
        Self::Psu,
        Self::Case,
        Self::Cooler,
        Self::Storage,
    ];

    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Motherboard => "motherboard",
            Self::Gpu => "gpu",
            Self::Ram => "ram",
            Self::Psu => "psu",
            Self::Case => "case",
            Self::Cooler => "cooler",
            Self::Storage => "storage",
        }
    }

    /// Parse from string representation
    ///
    /// Accepts the canonical keys plus the plural catalog section names
    /// (`processors`, `motherboards`, ...). Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cpu" | "processor" | "processors" => Some(Self::Cpu),
            "motherboard" | "motherboards" | "mb" => Some(Self::Motherboard),
            "gpu" | "graphics_card" | "graphics_cards" | "graphicscards" => Some(Self::Gpu),
            "ram" | "memory" | "ram_modules" | "rammodules" => Some(Self::Ram),
            "psu" | "power_supply" | "power_supplies" | "powersupplies" => Some(Self::Psu),
            "case" | "cases" => Some(Self::Case),
            "cooler" | "cpu_cooler" | "cpu_coolers" | "cpucoolers" => Some(Self::Cooler),
            "storage" | "storage_devices" | "storagedevices" => Some(Self::Storage),
            _ => None,
        }
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cpu => "Processor",
            Self::Motherboard => "Motherboard",
            Self::Gpu => "Graphics Card",
            Self::Ram => "Memory",
            Self::Psu => "Power Supply",
            Self::Case => "Case",
            Self::Cooler => "CPU Cooler",
            Self::Storage => "Storage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
