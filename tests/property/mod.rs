// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify
//! the invariants of the assembly engine.

mod checker_properties;
mod inventory_conservation;
mod rack_allocation;
mod wizard_invariants;
