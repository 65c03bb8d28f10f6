// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for engine operations
//!
//! Each layer owns its error enum next to the code that raises it.
//! [`EngineError`] gathers them for callers that drive several layers at
//! once, such as the command-line checker.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::domain::{ComponentError, ModelIdError, ValueError, WalletError};
use crate::persistence::PersistenceError;
use crate::rack::RackError;
use crate::service::ServiceError;
use crate::state_machine::TransitionError;

/// Errors that can occur in engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Rack(#[from] RackError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error("Invalid model identifier: {0}")]
    ModelId(#[from] ModelIdError),

    #[error("Invalid value: {0}")]
    Value(#[from] ValueError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
