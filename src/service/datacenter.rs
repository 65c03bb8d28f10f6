// Copyright (c) 2025 - Cowboy AI, Inc.
//! Datacenter Service
//!
//! Player-scoped orchestrator owning the wallet, the inventory, the rack and
//! the installed servers. Every operation is a transaction: it validates
//! first and only mutates once nothing can fail any more, so an error always
//! leaves the datacenter as it was.
//!
//! # Operations
//!
//! ```text
//! purchase      cart ─debit─▶ wallet, items ─▶ inventory
//! assemble      wizard selection ─check─▶ inventory ─▶ rack + server map
//! dismantle     rack unit ─▶ server map ─▶ components back to inventory
//! upgrade_rack  wallet ─debit─▶ rack.total_u += step
//! ```

use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

use crate::assembly::{Assembly, AssemblyId, Violation};
use crate::config::EngineConfig;
use crate::domain::{Category, Component, ModelId, Wallet, WalletError};
use crate::inventory::{Inventory, Stock};
use crate::rack::{Occupant, Rack, RackError};
use crate::state_machine::BuildWizard;

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service layer errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Rack error: {0}")]
    Rack(#[from] RackError),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Cart total exceeds any possible balance")]
    CartTooExpensive,

    #[error("Build is incomplete, missing: {}", format_steps(.missing))]
    IncompleteBuild { missing: Vec<Category> },

    #[error("Build rejected with {} compatibility violation(s)", .violations.len())]
    AssemblyRejected { violations: Vec<Violation> },

    #[error("{model} is not in the inventory (need {needed}, have {owned})")]
    MissingFromInventory {
        model: ModelId,
        needed: u32,
        owned: u32,
    },

    #[error("No case installed at unit {unit}")]
    EmptySlot { unit: u32 },
}

fn format_steps(steps: &[Category]) -> String {
    steps
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything a player owns
#[derive(Debug, Clone)]
pub struct Datacenter {
    owner: String,
    config: EngineConfig,
    wallet: Wallet,
    inventory: Inventory,
    rack: Rack,
    servers: BTreeMap<AssemblyId, Assembly>,
}

impl Datacenter {
    /// Fresh datacenter with the configured starting balance and rack size
    pub fn new(owner: impl Into<String>, config: EngineConfig) -> Self {
        let wallet = Wallet::new(config.starting_balance);
        let rack = Rack::new(config.rack.initial_total_u);
        Self::from_parts(owner, config, wallet, Inventory::new(), rack, BTreeMap::new())
    }

    /// Reassemble a datacenter from restored parts
    pub fn from_parts(
        owner: impl Into<String>,
        config: EngineConfig,
        wallet: Wallet,
        inventory: Inventory,
        rack: Rack,
        servers: BTreeMap<AssemblyId, Assembly>,
    ) -> Self {
        Self {
            owner: owner.into(),
            config,
            wallet,
            inventory,
            rack,
            servers,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn servers(&self) -> &BTreeMap<AssemblyId, Assembly> {
        &self.servers
    }

    pub fn server(&self, id: &AssemblyId) -> Option<&Assembly> {
        self.servers.get(id)
    }

    /// Occupant covering `unit` together with the server built in it
    pub fn server_at(&self, unit: u32) -> Option<(&Occupant, Option<&Assembly>)> {
        let occupant = self.rack.case_at(unit)?;
        let server = occupant.assembly.as_ref().and_then(|id| self.servers.get(id));
        Some((occupant, server))
    }

    /// Add money, e.g. rent collected from clients
    pub fn credit(&mut self, amount: u64) -> ServiceResult<u64> {
        Ok(self.wallet.credit(amount)?)
    }

    /// Buy every line of a cart, returning the new balance
    ///
    /// The whole cart is paid in one debit; nothing is added if the player
    /// cannot afford it.
    pub fn purchase(&mut self, cart: &[Stock]) -> ServiceResult<u64> {
        let units: u64 = cart.iter().map(|line| u64::from(line.quantity)).sum();
        if units == 0 {
            return Err(ServiceError::EmptyCart);
        }

        let total = cart
            .iter()
            .try_fold(0u64, |total, line| {
                u64::from(line.item.price())
                    .checked_mul(u64::from(line.quantity))
                    .and_then(|cost| total.checked_add(cost))
            })
            .ok_or(ServiceError::CartTooExpensive)?;
        if total > 0 {
            self.wallet.debit(total)?;
        }

        for line in cart {
            self.inventory.add_many(line.item.clone(), line.quantity);
        }

        info!(units, total, balance = self.wallet.balance(), "Purchase completed");
        Ok(self.wallet.balance())
    }

    /// Turn a completed wizard selection into an installed server
    ///
    /// Checks, in order: completeness, compatibility, rack placement and
    /// inventory stock. Only then are the components taken out of the
    /// inventory and the case placed at `start_u`.
    pub fn assemble(&mut self, wizard: &BuildWizard, start_u: u32) -> ServiceResult<AssemblyId> {
        let missing = wizard.missing_steps();
        if !missing.is_empty() {
            return Err(ServiceError::IncompleteBuild { missing });
        }

        let assembly = wizard.selection().clone();
        let violations = assembly.check(&self.config.power);
        if !violations.is_empty() {
            return Err(ServiceError::AssemblyRejected { violations });
        }

        let case = assembly
            .case
            .clone()
            .ok_or(ServiceError::IncompleteBuild {
                missing: vec![Category::Case],
            })?;
        self.rack.can_place(case.size_u, start_u)?;

        let components = assembly.components();
        self.ensure_stock(&components)?;

        for component in &components {
            let removed = self.inventory.remove(component.model());
            debug_assert!(removed, "stock was checked before removal");
        }

        let id = AssemblyId::new();
        self.rack.add_case(case, start_u, Some(id))?;
        info!(
            server = %id,
            start_u,
            components = components.len(),
            price = assembly.total_price(),
            "Server assembled"
        );
        self.servers.insert(id, assembly);
        Ok(id)
    }

    fn ensure_stock(&self, components: &[Component]) -> ServiceResult<()> {
        let mut needed: HashMap<&ModelId, u32> = HashMap::new();
        for component in components {
            *needed.entry(component.model()).or_default() += 1;
        }

        for (model, needed) in needed {
            let owned = self.inventory.count(model);
            if owned < needed {
                return Err(ServiceError::MissingFromInventory {
                    model: model.clone(),
                    needed,
                    owned,
                });
            }
        }
        Ok(())
    }

    /// Take apart the server covering `unit`, returning its components to
    /// the inventory
    ///
    /// A case placed without a server record returns just the case.
    pub fn dismantle(&mut self, unit: u32) -> ServiceResult<Vec<Component>> {
        let occupant = self
            .rack
            .remove_case(unit)
            .ok_or(ServiceError::EmptySlot { unit })?;

        let returned = match occupant.assembly.and_then(|id| self.servers.remove(&id)) {
            Some(assembly) => assembly.components(),
            None => {
                warn!(unit, case = %occupant.case.model, "No server record for case, returning the case only");
                vec![Component::Case(occupant.case)]
            }
        };

        for component in &returned {
            self.inventory.add(component.clone());
        }

        info!(unit, components = returned.len(), "Server dismantled");
        Ok(returned)
    }

    /// Buy more rack space, returning the new rack height
    pub fn upgrade_rack(&mut self) -> ServiceResult<u32> {
        let cost = self.config.rack.upgrade_cost;
        if cost > 0 {
            self.wallet.debit(cost)?;
        }
        let total_u = self.rack.upgrade(self.config.rack.upgrade_step_u);
        info!(total_u, cost, "Rack upgraded");
        Ok(total_u)
    }
}
