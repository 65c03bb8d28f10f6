// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for rack-assembly
//!
//! Deterministic hardware shared by the integration and property tests.
//!
//! # Design Principles
//! - All test data is deterministic (no `Utc::now()`)
//! - Fixtures are the only place that constructs component records
//! - Every fixture returns a fresh value; sharing is explicit through
//!   [`FixtureCatalog`]

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::sync::Arc;

use rack_assembly::domain::{
    Case, Component, CpuCooler, FormFactor, GraphicsCard, MemoryType, ModelId, Motherboard,
    PcieSlot, PowerSupply, Processor, RamKit, Socket, StorageDevice, StorageFormFactor,
    StorageKind,
};
use rack_assembly::{Assembly, Catalog, Inventory};

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn model(id: &str) -> ModelId {
    ModelId::new(id).expect("Invalid model id in test fixture")
}

fn socket(id: &str) -> Socket {
    Socket::new(id).expect("Invalid socket in test fixture")
}

fn memory(id: &str) -> MemoryType {
    MemoryType::new(id).expect("Invalid memory type in test fixture")
}

// ============================================================================
// Component Builders
// ============================================================================

pub fn processor(id: &str, socket_id: &str, tdp: u32) -> Processor {
    Processor {
        brand: "AMD".to_string(),
        model: model(id),
        socket: socket(socket_id),
        memory_support: vec![memory("DDR5")],
        tdp,
        memory_speed: Some(6000),
        cores: Some(16),
        threads: Some(32),
        base_clock_ghz: Some(4.5),
        boost_clock_ghz: Some(5.7),
        cache_l3_mb: Some(64),
        price: 550,
    }
}

pub fn motherboard(id: &str, socket_id: &str) -> Motherboard {
    Motherboard {
        brand: "ASUS".to_string(),
        model: model(id),
        chipset: Some("X670E".to_string()),
        socket: socket(socket_id),
        cpu_sockets: 1,
        form_factor: FormFactor::Atx,
        memory_type: memory("DDR5"),
        memory_slots: 4,
        max_memory_gb: Some(192),
        memory_speed: 6400,
        pcie_version: "5.0".parse().expect("Invalid PCIe version in test fixture"),
        pcie_slots: vec![PcieSlot::new("x16"), PcieSlot::new("x16"), PcieSlot::new("x1")],
        sata_ports: 4,
        m2_slots: vec!["M.2_1 (PCIe 5.0)".to_string(), "M.2_2 (PCIe 4.0)".to_string()],
        price: 480,
    }
}

pub fn ram_kit(id: &str, modules: u32) -> RamKit {
    RamKit {
        brand: "Kingston".to_string(),
        model: model(id),
        memory_type: memory("DDR5"),
        modules,
        capacity_gb: 16,
        speed: 6000,
        height: Some(34),
        price: 110,
    }
}

pub fn graphics_card(id: &str, tdp: u32, length: u32) -> GraphicsCard {
    GraphicsCard {
        brand: "NVIDIA".to_string(),
        model: model(id),
        length,
        width_slots: 2.5,
        tdp,
        recommended_psu: 550,
        pcie_version: "4.0".parse().expect("Invalid PCIe version in test fixture"),
        vram_gb: Some(8),
        price: 300,
    }
}

pub fn power_supply(id: &str, wattage: u32) -> PowerSupply {
    PowerSupply {
        brand: "Corsair".to_string(),
        model: model(id),
        wattage,
        efficiency: Some("80+ Gold".to_string()),
        length: Some(160),
        price: 150,
    }
}

pub fn case(id: &str, size_u: u32) -> Case {
    Case {
        brand: "SilverStone".to_string(),
        model: model(id),
        form_factor: FormFactor::Atx,
        supported_motherboards: Vec::new(),
        gpu_max_length: Some(320),
        gpu_max_width_slots: None,
        cpu_cooler_max_height: Some(160),
        psu_max_length: Some(180),
        max_ram_height: Case::DEFAULT_MAX_RAM_HEIGHT,
        size_u,
        price: 150,
    }
}

pub fn cooler(id: &str, sockets: &[&str], tdp: u32, height: u32) -> CpuCooler {
    CpuCooler {
        brand: "Noctua".to_string(),
        model: model(id),
        kind: Some("Air".to_string()),
        sockets: sockets.iter().map(|s| socket(s)).collect(),
        tdp,
        height,
        price: 70,
    }
}

pub fn storage(id: &str, form_factor: StorageFormFactor) -> StorageDevice {
    let kind = if form_factor.is_m2() {
        StorageKind::Nvme
    } else {
        StorageKind::Hdd
    };
    StorageDevice {
        brand: "Samsung".to_string(),
        model: model(id),
        kind,
        form_factor,
        capacity_gb: 2000,
        price: 160,
    }
}

// ============================================================================
// Shared Catalog
// ============================================================================

/// One shared definition per model, the way a loaded catalog hands them out
pub struct FixtureCatalog {
    pub case: Arc<Case>,
    pub small_case: Arc<Case>,
    pub am5_board: Arc<Motherboard>,
    pub lga_board: Arc<Motherboard>,
    pub cpu: Arc<Processor>,
    pub cooler: Arc<CpuCooler>,
    pub ram: Arc<RamKit>,
    pub gpu: Arc<GraphicsCard>,
    pub long_gpu: Arc<GraphicsCard>,
    pub psu: Arc<PowerSupply>,
    pub nvme: Arc<StorageDevice>,
    pub hdd: Arc<StorageDevice>,
}

impl FixtureCatalog {
    pub fn new() -> Self {
        let mut small_case = case("SC813 1U", 1);
        small_case.cpu_cooler_max_height = Some(40);
        small_case.gpu_max_length = Some(200);

        Self {
            case: Arc::new(case("RM21-308", 2)),
            small_case: Arc::new(small_case),
            am5_board: Arc::new(motherboard("ProArt X670E", "AM5")),
            lga_board: Arc::new(motherboard("ROG Maximus Z790", "LGA1700")),
            cpu: Arc::new(processor("Ryzen 9 7950X", "AM5", 170)),
            cooler: Arc::new(cooler("NH-U12S", &["AM5", "AM4"], 220, 158)),
            ram: Arc::new(ram_kit("Fury Beast 32", 2)),
            gpu: Arc::new(graphics_card("RTX 4060", 115, 240)),
            long_gpu: Arc::new(graphics_card("RTX 4090", 450, 336)),
            psu: Arc::new(power_supply("RM1000x", 1000)),
            nvme: Arc::new(storage("990 Pro", StorageFormFactor::M2)),
            hdd: Arc::new(storage("IronWolf 8TB", StorageFormFactor::ThreePointFive)),
        }
    }

    pub fn components(&self) -> Vec<Component> {
        vec![
            Component::Case(self.case.clone()),
            Component::Case(self.small_case.clone()),
            Component::Motherboard(self.am5_board.clone()),
            Component::Motherboard(self.lga_board.clone()),
            Component::Cpu(self.cpu.clone()),
            Component::Cooler(self.cooler.clone()),
            Component::Ram(self.ram.clone()),
            Component::Gpu(self.gpu.clone()),
            Component::Gpu(self.long_gpu.clone()),
            Component::Psu(self.psu.clone()),
            Component::Storage(self.nvme.clone()),
            Component::Storage(self.hdd.clone()),
        ]
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::from_components(self.components()).expect("Invalid fixture catalog")
    }

    /// Inventory holding `quantity` units of every fixture model
    pub fn stocked_inventory(&self, quantity: u32) -> Inventory {
        let mut inventory = Inventory::new();
        for component in self.components() {
            inventory.add_many(component, quantity);
        }
        inventory
    }

    /// AM5 / DDR5 build with an adequate PSU and cooler
    pub fn valid_build(&self) -> Assembly {
        Assembly {
            case: Some(self.case.clone()),
            motherboard: Some(self.am5_board.clone()),
            psu: Some(self.psu.clone()),
            processors: vec![self.cpu.clone()],
            coolers: vec![self.cooler.clone()],
            ram: vec![self.ram.clone()],
            gpus: vec![self.gpu.clone()],
            storage: vec![self.nvme.clone()],
        }
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new()
    }
}
