// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Compatibility Invariants
//!
//! Each function checks one group of rules and returns the violations it
//! finds, in a fixed order. [`check_assembly`] concatenates them:
//!
//! 1. Mandatory components (processors, motherboard, RAM, storage, PSU, coolers)
//! 2. Processors against the motherboard (count, socket, memory type)
//! 3. Coolers against processors (count, socket, TDP)
//! 4. RAM against the motherboard and every processor
//! 5. GPUs against the motherboard (PCIe version, x16 slots)
//! 6. Power budget
//! 7. Storage against the motherboard (M.2 slots, SATA ports)
//! 8. Physical fit inside the case
//!
//! All functions are pure. Pairwise rules only run when both sides exist,
//! so a missing motherboard yields one `Missing` violation rather than a
//! cascade of mismatches.
//!
//! Coolers pair with processors by position: cooler N cools CPU N.

use std::sync::Arc;

use super::{Assembly, Violation};
use crate::config::PowerBudget;
use crate::domain::{
    Case, Category, CpuCooler, GraphicsCard, Motherboard, Processor, RamKit, StorageDevice,
};

/// Run every rule group in order
pub fn check_assembly(assembly: &Assembly, budget: &PowerBudget) -> Vec<Violation> {
    let mut violations = check_required(assembly);

    if let Some(board) = assembly.motherboard.as_deref() {
        violations.extend(check_processors(board, &assembly.processors));
    }
    violations.extend(check_coolers(&assembly.processors, &assembly.coolers));
    violations.extend(check_memory(
        assembly.motherboard.as_deref(),
        &assembly.processors,
        &assembly.ram,
    ));
    if let Some(board) = assembly.motherboard.as_deref() {
        violations.extend(check_graphics(board, &assembly.gpus));
    }
    if let Some(psu) = assembly.psu.as_deref() {
        let required = required_power(assembly, budget);
        if psu.wattage < required {
            violations.push(Violation::InsufficientPower {
                required,
                available: psu.wattage,
            });
        }
    }
    if let Some(board) = assembly.motherboard.as_deref() {
        violations.extend(check_storage(board, &assembly.storage));
    }
    if let Some(case) = assembly.case.as_deref() {
        violations.extend(check_case_fit(
            case,
            &assembly.gpus,
            &assembly.ram,
            &assembly.coolers,
        ));
    }

    violations
}

/// Presence of every mandatory component; the case is optional here
pub fn check_required(assembly: &Assembly) -> Vec<Violation> {
    let checks = [
        (Category::Cpu, assembly.processors.is_empty()),
        (Category::Motherboard, assembly.motherboard.is_none()),
        (Category::Ram, assembly.ram.is_empty()),
        (Category::Storage, assembly.storage.is_empty()),
        (Category::Psu, assembly.psu.is_none()),
        (Category::Cooler, assembly.coolers.is_empty()),
    ];

    checks
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(category, _)| Violation::Missing { category })
        .collect()
}

/// Processor count, then socket and memory type for each processor
pub fn check_processors(board: &Motherboard, processors: &[Arc<Processor>]) -> Vec<Violation> {
    let mut violations = Vec::new();

    if processors.len() > board.cpu_sockets as usize {
        violations.push(Violation::TooManyProcessors {
            processors: processors.len(),
            sockets: board.cpu_sockets,
        });
    }

    for (index, cpu) in processors.iter().enumerate() {
        if cpu.socket != board.socket {
            violations.push(Violation::SocketMismatch {
                cpu: index + 1,
                cpu_socket: cpu.socket.clone(),
                board_socket: board.socket.clone(),
            });
        }
        if !cpu.supports_memory(&board.memory_type) {
            violations.push(Violation::CpuMemoryMismatch {
                cpu: index + 1,
                supported: cpu.memory_support_label(),
                board: board.memory_type.clone(),
            });
        }
    }

    violations
}

/// Cooler count, then socket and TDP for each positional pair
pub fn check_coolers(processors: &[Arc<Processor>], coolers: &[Arc<CpuCooler>]) -> Vec<Violation> {
    let mut violations = Vec::new();
    if processors.is_empty() {
        return violations;
    }

    if coolers.len() < processors.len() {
        violations.push(Violation::NotEnoughCoolers {
            coolers: coolers.len(),
            processors: processors.len(),
        });
    }

    for (index, (cpu, cooler)) in processors.iter().zip(coolers).enumerate() {
        if !cooler.supports_socket(&cpu.socket) {
            violations.push(Violation::CoolerSocketMismatch {
                cooler: index + 1,
                cpu: index + 1,
            });
        }
        if !cooler.is_sufficient_for_tdp(cpu.tdp) {
            violations.push(Violation::CoolerTdpInsufficient {
                cooler: index + 1,
                cpu: index + 1,
                rating: cooler.tdp,
                required: cpu.tdp,
            });
        }
    }

    violations
}

/// Total module count against board slots, then per kit: board type, each
/// processor (type, speed), board speed
pub fn check_memory(
    board: Option<&Motherboard>,
    processors: &[Arc<Processor>],
    kits: &[Arc<RamKit>],
) -> Vec<Violation> {
    let mut violations = Vec::new();
    if kits.is_empty() {
        return violations;
    }

    if let Some(board) = board {
        let modules = total_modules(kits);
        if modules > board.memory_slots {
            violations.push(Violation::RamSlotOverflow {
                modules,
                slots: board.memory_slots,
            });
        }
    }

    for kit in kits {
        if let Some(board) = board {
            if kit.memory_type != board.memory_type {
                violations.push(Violation::RamBoardType {
                    kit: kit.model.clone(),
                    kit_type: kit.memory_type.clone(),
                    board_type: board.memory_type.clone(),
                });
            }
        }

        for (index, cpu) in processors.iter().enumerate() {
            if !cpu.supports_memory(&kit.memory_type) {
                violations.push(Violation::RamCpuType {
                    kit: kit.model.clone(),
                    cpu: index + 1,
                });
            }
            if let Some(max) = cpu.memory_speed.filter(|max| kit.speed > *max) {
                violations.push(Violation::RamCpuSpeed {
                    kit: kit.model.clone(),
                    cpu: index + 1,
                    speed: kit.speed,
                    max,
                });
            }
        }

        if let Some(board) = board.filter(|board| kit.speed > board.memory_speed) {
            violations.push(Violation::RamBoardSpeed {
                kit: kit.model.clone(),
                speed: kit.speed,
                max: board.memory_speed,
            });
        }
    }

    violations
}

/// PCIe version per GPU, then the x16 slot count
pub fn check_graphics(board: &Motherboard, gpus: &[Arc<GraphicsCard>]) -> Vec<Violation> {
    let mut violations = Vec::new();
    if gpus.is_empty() {
        return violations;
    }

    for (index, gpu) in gpus.iter().enumerate() {
        if gpu.pcie_version > board.pcie_version {
            violations.push(Violation::GpuPcieTooNew {
                gpu: index + 1,
                gpu_version: gpu.pcie_version,
                board_version: board.pcie_version,
            });
        }
    }

    let slots = board.x16_slot_count();
    if gpus.len() > slots {
        violations.push(Violation::NotEnoughX16Slots {
            gpus: gpus.len(),
            slots,
        });
    }

    violations
}

/// Required PSU wattage, margin applied
pub fn required_power(assembly: &Assembly, budget: &PowerBudget) -> u32 {
    let cpu = assembly
        .processors
        .iter()
        .fold(0u32, |total, cpu| total.saturating_add(cpu.tdp));
    let gpu = assembly
        .gpus
        .iter()
        .fold(0u32, |total, gpu| total.saturating_add(gpu.tdp));
    let ram = budget
        .ram_module_watts
        .saturating_mul(total_modules(&assembly.ram));
    let storage: u32 = assembly
        .storage
        .iter()
        .map(|device| {
            if device.is_m2() {
                budget.m2_storage_watts
            } else {
                budget.other_storage_watts
            }
        })
        .fold(0u32, |total, watts| total.saturating_add(watts));

    budget.with_margin(cpu.saturating_add(gpu).saturating_add(ram).saturating_add(storage))
}

/// M.2 devices against M.2 slots, everything else against SATA ports
pub fn check_storage(board: &Motherboard, devices: &[Arc<StorageDevice>]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let m2 = devices.iter().filter(|device| device.is_m2()).count();
    let sata = devices.len() - m2;

    if m2 > board.m2_slot_count() {
        violations.push(Violation::TooManyM2Devices {
            devices: m2,
            slots: board.m2_slot_count(),
        });
    }
    if sata > board.sata_ports as usize {
        violations.push(Violation::TooManySataDevices {
            devices: sata,
            ports: board.sata_ports,
        });
    }

    violations
}

/// GPU length, RAM height and cooler height against the case limits
pub fn check_case_fit(
    case: &Case,
    gpus: &[Arc<GraphicsCard>],
    kits: &[Arc<RamKit>],
    coolers: &[Arc<CpuCooler>],
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (index, gpu) in gpus.iter().enumerate() {
        if !case.fits_gpu_length(gpu) {
            violations.push(Violation::GpuTooLong {
                gpu: index + 1,
                length: gpu.length,
                max: case.gpu_max_length.unwrap_or_default(),
            });
        }
    }

    for kit in kits.iter().filter(|kit| !case.fits_ram(kit)) {
        violations.push(Violation::RamTooTall {
            kit: kit.model.clone(),
            height: kit.height.unwrap_or_default(),
            max: case.max_ram_height,
        });
    }

    for (index, cooler) in coolers.iter().enumerate() {
        if !case.fits_cooler(cooler) {
            violations.push(Violation::CoolerTooTall {
                cooler: index + 1,
                height: cooler.height,
                max: case.cpu_cooler_max_height.unwrap_or_default(),
            });
        }
    }

    violations
}

pub(crate) fn total_modules(kits: &[Arc<RamKit>]) -> u32 {
    kits.iter().fold(0, |total, kit| total.saturating_add(kit.modules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemoryType, ModelId, PcieSlot, Socket, StorageFormFactor, StorageKind};

    fn board(slots: u32) -> Motherboard {
        Motherboard {
            brand: "MSI".to_string(),
            model: ModelId::new("B650 Tomahawk").unwrap(),
            chipset: Some("B650".to_string()),
            socket: Socket::new("AM5").unwrap(),
            cpu_sockets: 1,
            form_factor: crate::domain::FormFactor::Atx,
            memory_type: MemoryType::new("DDR5").unwrap(),
            memory_slots: slots,
            max_memory_gb: None,
            memory_speed: 6000,
            pcie_version: "4.0".parse().unwrap(),
            pcie_slots: vec![PcieSlot::new("x16"), PcieSlot::new("x1")],
            sata_ports: 1,
            m2_slots: vec!["M.2_1".to_string()],
            price: 200,
        }
    }

    fn kit(model: &str, modules: u32, speed: u32) -> Arc<RamKit> {
        Arc::new(RamKit {
            brand: "Corsair".to_string(),
            model: ModelId::new(model).unwrap(),
            memory_type: MemoryType::new("DDR5").unwrap(),
            modules,
            capacity_gb: 16,
            speed,
            height: None,
            price: 100,
        })
    }

    fn drive(form_factor: StorageFormFactor) -> Arc<StorageDevice> {
        Arc::new(StorageDevice {
            brand: "WD".to_string(),
            model: ModelId::new("Drive").unwrap(),
            kind: StorageKind::Ssd,
            form_factor,
            capacity_gb: 1000,
            price: 80,
        })
    }

    #[test]
    fn test_required_reports_each_missing_category_in_order() {
        let violations = check_required(&Assembly::new());
        let categories: Vec<_> = violations
            .iter()
            .map(|v| match v {
                Violation::Missing { category } => *category,
                other => panic!("unexpected {other:?}"),
            })
            .collect();

        assert_eq!(
            categories,
            vec![
                Category::Cpu,
                Category::Motherboard,
                Category::Ram,
                Category::Storage,
                Category::Psu,
                Category::Cooler
            ]
        );
    }

    #[test]
    fn test_memory_overflow_and_board_speed() {
        let kits = vec![kit("A", 2, 5600), kit("B", 2, 5600), kit("C", 2, 6400)];
        let violations = check_memory(Some(&board(4)), &[], &kits);

        assert_eq!(
            violations,
            vec![
                Violation::RamSlotOverflow {
                    modules: 6,
                    slots: 4
                },
                Violation::RamBoardSpeed {
                    kit: ModelId::new("C").unwrap(),
                    speed: 6400,
                    max: 6000
                },
            ]
        );
    }

    #[test]
    fn test_storage_split_by_form_factor() {
        let devices = vec![
            drive(StorageFormFactor::M2),
            drive(StorageFormFactor::M2),
            drive(StorageFormFactor::TwoPointFive),
        ];
        let violations = check_storage(&board(4), &devices);
        assert_eq!(
            violations,
            vec![Violation::TooManyM2Devices {
                devices: 2,
                slots: 1
            }]
        );
    }

    #[test]
    fn test_required_power_uses_budget_constants() {
        let mut assembly = Assembly::new();
        assembly.ram.push(kit("A", 2, 5600));
        assembly.storage.push(drive(StorageFormFactor::M2));
        assembly.storage.push(drive(StorageFormFactor::ThreePointFive));

        // (10 + 5 + 8) * 1.2 = 27.6
        assert_eq!(required_power(&assembly, &PowerBudget::default()), 28);
    }

    #[test]
    fn test_required_power_saturates_on_huge_kits() {
        let mut assembly = Assembly::new();
        assembly.ram.push(kit("A", u32::MAX, 5600));
        assembly.ram.push(kit("B", 2, 5600));

        assert_eq!(total_modules(&assembly.ram), u32::MAX);
        assert_eq!(required_power(&assembly, &PowerBudget::default()), u32::MAX);
    }

    #[test]
    fn test_case_fit_reports_tall_ram_and_ignores_gpu_width() {
        let case: Case = serde_json::from_value(serde_json::json!({
            "brand": "Supermicro",
            "model": "SC815",
            "form_factor": "ATX",
            "gpu_max_length": 280,
            "gpu_max_width_slots": 2.0,
            "max_ram_height": 32,
            "size_u": 1
        }))
        .unwrap();
        let wide: GraphicsCard = serde_json::from_value(serde_json::json!({
            "brand": "NVIDIA",
            "model": "RTX 4070",
            "length": 267,
            "width_slots": 2.5,
            "tdp": 200,
            "recommended_psu": 650,
            "pcie_version": "4.0"
        }))
        .unwrap();
        let mut tall = (*kit("Dominator", 2, 5600)).clone();
        tall.height = Some(56);
        let low = kit("Vengeance LP", 2, 5600);

        let violations = check_case_fit(&case, &[Arc::new(wide)], &[Arc::new(tall), low], &[]);

        assert_eq!(
            violations,
            vec![Violation::RamTooTall {
                kit: ModelId::new("Dominator").unwrap(),
                height: 56,
                max: 32
            }]
        );
    }
}
