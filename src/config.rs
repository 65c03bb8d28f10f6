// Copyright (c) 2025 - Cowboy AI, Inc.
//! Engine Configuration
//!
//! Power-budget constants and rack economics. Every field has a default, so
//! an empty JSON object or an empty environment yields the stock game rules.
//!
//! # Environment Overrides
//!
//! | Variable                             | Field                          |
//! |--------------------------------------|--------------------------------|
//! | `RACK_ASSEMBLY_SAFETY_MARGIN`        | `power.safety_margin`          |
//! | `RACK_ASSEMBLY_RAM_MODULE_WATTS`     | `power.ram_module_watts`       |
//! | `RACK_ASSEMBLY_M2_STORAGE_WATTS`     | `power.m2_storage_watts`       |
//! | `RACK_ASSEMBLY_OTHER_STORAGE_WATTS`  | `power.other_storage_watts`    |
//! | `RACK_ASSEMBLY_INITIAL_TOTAL_U`      | `rack.initial_total_u`         |
//! | `RACK_ASSEMBLY_UPGRADE_STEP_U`       | `rack.upgrade_step_u`          |
//! | `RACK_ASSEMBLY_UPGRADE_COST`         | `rack.upgrade_cost`            |
//! | `RACK_ASSEMBLY_STARTING_BALANCE`     | `starting_balance`             |

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Malformed configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static power arithmetic used by the compatibility checker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerBudget {
    /// Multiplier applied to the summed draw
    pub safety_margin: f64,
    /// Draw per installed RAM module
    pub ram_module_watts: u32,
    /// Draw per M.2 storage device
    pub m2_storage_watts: u32,
    /// Draw per SATA (non-M.2) storage device
    pub other_storage_watts: u32,
}

impl Default for PowerBudget {
    fn default() -> Self {
        Self {
            safety_margin: 1.2,
            ram_module_watts: 5,
            m2_storage_watts: 5,
            other_storage_watts: 8,
        }
    }
}

impl PowerBudget {
    /// Apply the safety margin to a raw draw, rounding to the nearest watt
    pub fn with_margin(&self, raw_watts: u32) -> u32 {
        (f64::from(raw_watts) * self.safety_margin).round() as u32
    }
}

/// Rack size and upgrade pricing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RackConfig {
    pub initial_total_u: u32,
    pub upgrade_step_u: u32,
    pub upgrade_cost: u64,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            initial_total_u: 2,
            upgrade_step_u: 2,
            upgrade_cost: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub power: PowerBudget,
    pub rack: RackConfig,
    pub starting_balance: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            power: PowerBudget::default(),
            rack: RackConfig::default(),
            starting_balance: 1000,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `RACK_ASSEMBLY_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        overlay(&lookup, "RACK_ASSEMBLY_SAFETY_MARGIN", &mut config.power.safety_margin)?;
        overlay(&lookup, "RACK_ASSEMBLY_RAM_MODULE_WATTS", &mut config.power.ram_module_watts)?;
        overlay(&lookup, "RACK_ASSEMBLY_M2_STORAGE_WATTS", &mut config.power.m2_storage_watts)?;
        overlay(
            &lookup,
            "RACK_ASSEMBLY_OTHER_STORAGE_WATTS",
            &mut config.power.other_storage_watts,
        )?;
        overlay(&lookup, "RACK_ASSEMBLY_INITIAL_TOTAL_U", &mut config.rack.initial_total_u)?;
        overlay(&lookup, "RACK_ASSEMBLY_UPGRADE_STEP_U", &mut config.rack.upgrade_step_u)?;
        overlay(&lookup, "RACK_ASSEMBLY_UPGRADE_COST", &mut config.rack.upgrade_cost)?;
        overlay(&lookup, "RACK_ASSEMBLY_STARTING_BALANCE", &mut config.starting_balance)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let margin = self.power.safety_margin;
        if !margin.is_finite() || margin <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "power.safety_margin".to_string(),
                value: margin.to_string(),
            });
        }
        Ok(())
    }
}

fn overlay<F, T>(lookup: &F, key: &str, field: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *field = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}
