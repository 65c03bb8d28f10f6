// Copyright (c) 2025 - Cowboy AI, Inc.
//! Build Compatibility Checker
//!
//! Checks a server build against a component catalog and prints every
//! compatibility violation plus the total price.
//!
//! Run with: cargo run --bin build-check -- <catalog.json> <build.json>
//!
//! The build file lists model ids per slot:
//!
//! ```json
//! { "case": "RM21", "motherboard": "B650 Tomahawk", "cpu": ["Ryzen 5 7600"],
//!   "cooler": ["NH-U12S"], "ram": ["Fury 32"], "storage": ["990 Pro"],
//!   "psu": "RM750" }
//! ```
//!
//! Exit status is 0 for a compatible build, 1 for an incompatible one.
//! Power-budget constants can be overridden with `RACK_ASSEMBLY_*`
//! environment variables; logging follows `RUST_LOG`.

use anyhow::{bail, Context, Result};
use rack_assembly::{BuildManifest, Catalog, EngineConfig};
use std::process::ExitCode;
use tracing::{debug, info, warn};

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(catalog_path), Some(build_path)) = (args.next(), args.next()) else {
        bail!("usage: build-check <catalog.json> <build.json>");
    };

    let config = EngineConfig::from_env().context("Failed to load configuration")?;
    debug!(power = ?config.power, "Power budget loaded");

    let catalog_json = std::fs::read_to_string(&catalog_path)
        .with_context(|| format!("Failed to read catalog {catalog_path}"))?;
    let catalog = Catalog::from_json_str(&catalog_json)
        .with_context(|| format!("Failed to load catalog {catalog_path}"))?;
    info!(components = catalog.len(), "Catalog loaded");

    let build_json = std::fs::read_to_string(&build_path)
        .with_context(|| format!("Failed to read build {build_path}"))?;
    let manifest: BuildManifest = serde_json::from_str(&build_json)
        .with_context(|| format!("Failed to parse build {build_path}"))?;

    let (assembly, unresolved) = manifest.resolve(&catalog);
    for missing in &unresolved {
        warn!(
            category = missing.category.as_str(),
            model = %missing.model,
            "Model not in catalog, skipped"
        );
    }

    let violations = assembly.check(&config.power);
    println!("Total price: {}", assembly.total_price());
    println!(
        "Required power: {}W",
        assembly.required_power(&config.power)
    );

    if violations.is_empty() {
        println!("Build is compatible");
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} violation(s):", violations.len());
    for violation in &violations {
        println!("  - {violation}");
    }
    Ok(ExitCode::from(1))
}
