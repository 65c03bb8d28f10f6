// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compatibility Violations
//!
//! Violations are values, not errors: the checker returns every one it finds
//! and an empty list means the configuration is valid. Positional indices
//! (`cpu`, `cooler`, `gpu`) are 1-based, matching how builds are shown to
//! players ("CPU #1").

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Category, MemoryType, ModelId, PcieVersion, Socket};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A mandatory component is absent
    Missing { category: Category },

    TooManyProcessors { processors: usize, sockets: u32 },
    SocketMismatch { cpu: usize, cpu_socket: Socket, board_socket: Socket },
    CpuMemoryMismatch { cpu: usize, supported: String, board: MemoryType },

    NotEnoughCoolers { coolers: usize, processors: usize },
    CoolerSocketMismatch { cooler: usize, cpu: usize },
    CoolerTdpInsufficient { cooler: usize, cpu: usize, rating: u32, required: u32 },

    RamSlotOverflow { modules: u32, slots: u32 },
    RamBoardType { kit: ModelId, kit_type: MemoryType, board_type: MemoryType },
    RamCpuType { kit: ModelId, cpu: usize },
    RamCpuSpeed { kit: ModelId, cpu: usize, speed: u32, max: u32 },
    RamBoardSpeed { kit: ModelId, speed: u32, max: u32 },

    GpuPcieTooNew { gpu: usize, gpu_version: PcieVersion, board_version: PcieVersion },
    NotEnoughX16Slots { gpus: usize, slots: usize },

    InsufficientPower { required: u32, available: u32 },

    TooManyM2Devices { devices: usize, slots: usize },
    TooManySataDevices { devices: usize, ports: u32 },

    GpuTooLong { gpu: usize, length: u32, max: u32 },
    RamTooTall { kit: ModelId, height: u32, max: u32 },
    CoolerTooTall { cooler: usize, height: u32, max: u32 },
}

impl Violation {
    /// Watts missing for a power violation
    pub fn power_shortfall(&self) -> Option<u32> {
        match self {
            Self::InsufficientPower {
                required,
                available,
            } => Some(required.saturating_sub(*available)),
            _ => None,
        }
    }

    pub fn is_missing_component(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { category } => write!(f, "Missing: {}", category.display_name()),

            Self::TooManyProcessors { processors, sockets } => write!(
                f,
                "CPU ↔ Motherboard: too many processors ({processors}) for the board ({sockets} sockets)"
            ),
            Self::SocketMismatch {
                cpu,
                cpu_socket,
                board_socket,
            } => write!(
                f,
                "CPU #{cpu} ↔ Motherboard: socket mismatch ({cpu_socket} vs {board_socket})"
            ),
            Self::CpuMemoryMismatch {
                cpu,
                supported,
                board,
            } => write!(
                f,
                "CPU #{cpu} ↔ Motherboard: incompatible memory type ({supported} vs {board})"
            ),

            Self::NotEnoughCoolers {
                coolers,
                processors,
            } => write!(
                f,
                "Cooling: not enough coolers ({coolers}) for the processors ({processors})"
            ),
            Self::CoolerSocketMismatch { cooler, cpu } => {
                write!(f, "Cooler #{cooler} ↔ CPU #{cpu}: incompatible socket")
            }
            Self::CoolerTdpInsufficient {
                cooler,
                cpu,
                rating,
                required,
            } => write!(
                f,
                "Cooler #{cooler} ↔ CPU #{cpu}: insufficient TDP ({rating}W < {required}W)"
            ),

            Self::RamSlotOverflow { modules, slots } => write!(
                f,
                "RAM ↔ Motherboard: too many modules installed ({modules} for {slots} slots)"
            ),
            Self::RamBoardType {
                kit,
                kit_type,
                board_type,
            } => write!(
                f,
                "RAM {kit}: type incompatible with motherboard ({kit_type} vs {board_type})"
            ),
            Self::RamCpuType { kit, cpu } => {
                write!(f, "RAM {kit}: type incompatible with CPU #{cpu}")
            }
            Self::RamCpuSpeed {
                kit,
                cpu,
                speed,
                max,
            } => write!(
                f,
                "RAM {kit}: speed too high for CPU #{cpu} ({speed}MHz > {max}MHz)"
            ),
            Self::RamBoardSpeed { kit, speed, max } => write!(
                f,
                "RAM {kit}: speed too high for the motherboard ({speed}MHz > {max}MHz)"
            ),

            Self::GpuPcieTooNew {
                gpu,
                gpu_version,
                board_version,
            } => write!(
                f,
                "GPU #{gpu} ↔ Motherboard: board PCIe too old ({board_version} < {gpu_version})"
            ),
            Self::NotEnoughX16Slots { gpus, slots } => write!(
                f,
                "GPU ↔ Motherboard: not enough PCIe x16 slots ({slots} available, {gpus} required)"
            ),

            Self::InsufficientPower {
                required,
                available,
            } => write!(
                f,
                "PSU: insufficient power (≥{required}W minimum, {available}W available)"
            ),

            Self::TooManyM2Devices { devices, slots } => write!(
                f,
                "Storage: too many M.2 drives for the available slots ({devices} > {slots})"
            ),
            Self::TooManySataDevices { devices, ports } => write!(
                f,
                "Storage: too many SATA drives for the available ports ({devices} > {ports})"
            ),

            Self::GpuTooLong { gpu, length, max } => write!(
                f,
                "GPU #{gpu} ↔ Case: card too long ({length}mm > {max}mm)"
            ),
            Self::RamTooTall { kit, height, max } => {
                write!(f, "RAM {kit}: too tall for the case ({height}mm > {max}mm)")
            }
            Self::CoolerTooTall {
                cooler,
                height,
                max,
            } => write!(
                f,
                "Cooler #{cooler} ↔ Case: too tall ({height}mm > {max}mm)"
            ),
        }
    }
}
