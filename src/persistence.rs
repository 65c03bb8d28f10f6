// Copyright (c) 2025 - Cowboy AI, Inc.
//! Save / Restore Snapshot
//!
//! A [`Snapshot`] stores references only: model identifiers and quantities.
//! Restoring turns the ids back into components through a
//! [`ComponentResolver`], so a save always picks up the current catalog
//! definitions.
//!
//! Restore is tolerant. Unknown ids, ids of the wrong category and cases
//! that no longer fit are dropped with a `warn!` and reported as
//! [`RestoreWarning`]s; only a malformed document or a snapshot from a newer
//! format version is an error.
//!
//! Where the snapshot is kept is up to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

use crate::assembly::{Assembly, AssemblyId, BuildManifest};
use crate::catalog::ComponentResolver;
use crate::config::EngineConfig;
use crate::domain::{Category, Component, ModelId, Wallet};
use crate::inventory::Inventory;
use crate::rack::{Rack, RackError};
use crate::service::Datacenter;

/// Current snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Snapshot version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Snapshot document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub category: Category,
    pub model: ModelId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantRecord {
    /// Case model
    pub model: ModelId,
    pub start_u: u32,
    /// Server built in the case, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<BuildManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub balance: u64,
    /// Rack height; the configured initial height when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_u: Option<u32>,
    #[serde(default)]
    pub occupants: Vec<OccupantRecord>,
    #[serde(default)]
    pub inventory: Vec<InventoryRecord>,
}

/// Something dropped during restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreWarning {
    UnknownModel { category: Category, model: ModelId },
    CategoryMismatch { model: ModelId, expected: Category, found: Category },
    UnknownServerComponent { start_u: u32, category: Category, model: ModelId },
    PlacementRejected { model: ModelId, start_u: u32, error: RackError },
}

impl fmt::Display for RestoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModel { category, model } => {
                write!(f, "Unknown {} model {model}", category.as_str())
            }
            Self::CategoryMismatch {
                model,
                expected,
                found,
            } => write!(
                f,
                "{model} is a {} but was saved as {}",
                found.as_str(),
                expected.as_str()
            ),
            Self::UnknownServerComponent {
                start_u,
                category,
                model,
            } => write!(
                f,
                "Server at unit {start_u}: unknown {} model {model}",
                category.as_str()
            ),
            Self::PlacementRejected {
                model,
                start_u,
                error,
            } => write!(f, "Case {model} at unit {start_u} dropped: {error}"),
        }
    }
}

impl Snapshot {
    /// Capture a datacenter; the timestamp is a parameter
    pub fn capture(datacenter: &Datacenter, saved_at: DateTime<Utc>) -> Self {
        let occupants = datacenter
            .rack()
            .occupants()
            .iter()
            .map(|occupant| OccupantRecord {
                model: occupant.case.model.clone(),
                start_u: occupant.start_u,
                server: occupant
                    .assembly
                    .as_ref()
                    .and_then(|id| datacenter.server(id))
                    .map(BuildManifest::from_assembly),
            })
            .collect();

        let inventory = datacenter
            .inventory()
            .entries()
            .into_iter()
            .map(|stock| InventoryRecord {
                category: stock.item.category(),
                model: stock.item.model().clone(),
                quantity: stock.quantity,
            })
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Some(saved_at),
            player: datacenter.owner().to_string(),
            balance: datacenter.wallet().balance(),
            total_u: Some(datacenter.rack().total_u()),
            occupants,
            inventory,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild a datacenter, dropping whatever no longer resolves
    pub fn restore<R>(
        &self,
        resolver: &R,
        config: EngineConfig,
    ) -> Result<(Datacenter, Vec<RestoreWarning>), PersistenceError>
    where
        R: ComponentResolver + ?Sized,
    {
        if self.version > SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut warnings = Vec::new();

        let mut inventory = Inventory::new();
        for record in &self.inventory {
            if let Some(component) =
                resolve_as(resolver, record.category, &record.model, &mut warnings)
            {
                inventory.add_many(component, record.quantity);
            }
        }

        let mut rack = Rack::new(self.total_u.unwrap_or(config.rack.initial_total_u));
        let mut servers = BTreeMap::new();
        for record in &self.occupants {
            restore_occupant(
                record,
                resolver,
                &mut rack,
                &mut servers,
                &mut inventory,
                &mut warnings,
            );
        }

        for warning in &warnings {
            warn!(%warning, "Dropped during restore");
        }
        info!(
            player = %self.player,
            servers = servers.len(),
            models = inventory.len(),
            dropped = warnings.len(),
            "Snapshot restored"
        );

        let datacenter = Datacenter::from_parts(
            self.player.clone(),
            config,
            Wallet::new(self.balance),
            inventory,
            rack,
            servers,
        );
        Ok((datacenter, warnings))
    }
}

fn restore_occupant<R>(
    record: &OccupantRecord,
    resolver: &R,
    rack: &mut Rack,
    servers: &mut BTreeMap<AssemblyId, Assembly>,
    inventory: &mut Inventory,
    warnings: &mut Vec<RestoreWarning>,
) where
    R: ComponentResolver + ?Sized,
{
    let case = match resolve_as(resolver, Category::Case, &record.model, warnings) {
        Some(Component::Case(case)) => Some(case),
        _ => None,
    };

    // The occupant's own case is authoritative over the manifest's
    let assembly = record.server.as_ref().map(|manifest| {
        let manifest = BuildManifest {
            case: None,
            ..manifest.clone()
        };
        let (mut assembly, unresolved) = manifest.resolve(resolver);
        warnings.extend(unresolved.into_iter().map(|missing| {
            RestoreWarning::UnknownServerComponent {
                start_u: record.start_u,
                category: missing.category,
                model: missing.model,
            }
        }));
        assembly.case = case.clone();
        assembly
    });

    let Some(case) = case else {
        // Without a case nothing can be mounted; keep the parts that resolved
        for component in assembly.iter().flat_map(Assembly::components) {
            inventory.add(component);
        }
        return;
    };

    let id = assembly.as_ref().map(|_| AssemblyId::new());
    if let Err(error) = rack.add_case(case.clone(), record.start_u, id) {
        warnings.push(RestoreWarning::PlacementRejected {
            model: record.model.clone(),
            start_u: record.start_u,
            error,
        });
        // Nothing is lost: the parts go back on the shelf
        match &assembly {
            Some(assembly) => {
                for component in assembly.components() {
                    inventory.add(component);
                }
            }
            None => inventory.add(Component::Case(case)),
        }
        return;
    }

    if let (Some(id), Some(assembly)) = (id, assembly) {
        servers.insert(id, assembly);
    }
}

fn resolve_as<R>(
    resolver: &R,
    category: Category,
    model: &ModelId,
    warnings: &mut Vec<RestoreWarning>,
) -> Option<Component>
where
    R: ComponentResolver + ?Sized,
{
    match resolver.resolve(model) {
        Some(component) if component.category() == category => Some(component),
        Some(component) => {
            warnings.push(RestoreWarning::CategoryMismatch {
                model: model.clone(),
                expected: category,
                found: component.category(),
            });
            None
        }
        None => {
            warnings.push(RestoreWarning::UnknownModel {
                category,
                model: model.clone(),
            });
            None
        }
    }
}
