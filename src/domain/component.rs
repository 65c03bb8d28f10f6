// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hardware Component Value Records
//!
//! One immutable record type per category, each carrying the predicates the
//! compatibility checker and the build wizard rely on. Records are created
//! once when the catalog loads and are shared through [`Arc`] from then on:
//! every owned unit and every assembly that uses a model points at the same
//! definition.
//!
//! [`Component`] is the category-tagged union handed around by the catalog
//! and the inventory. Because each variant holds the typed record, a
//! component pulled out of the inventory still exposes the full predicate
//! interface of its category ([`Component::as_part`]).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::{Category, FormFactor, MemoryType, ModelId, PcieVersion, Socket, StorageFormFactor, StorageKind};

/// Structural problem in a component record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error("{model}: {field} must be at least 1")]
    ZeroQuantity { model: ModelId, field: &'static str },
}

/// Central processing unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    pub brand: String,
    pub model: ModelId,
    pub socket: Socket,

    /// Memory generations the integrated controller supports
    #[serde(deserialize_with = "memory_support")]
    pub memory_support: Vec<MemoryType>,

    /// Thermal design power in watts
    pub tdp: u32,

    /// Maximum supported memory speed in MHz, if the vendor states one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_speed: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_clock_ghz: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_clock_ghz: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_l3_mb: Option<u32>,

    #[serde(default)]
    pub price: u32,
}

impl Processor {
    pub fn supports_memory(&self, memory_type: &MemoryType) -> bool {
        self.memory_support.contains(memory_type)
    }

    /// Slash-joined support list, as printed in violation messages
    pub fn memory_support_label(&self) -> String {
        self.memory_support
            .iter()
            .map(MemoryType::as_str)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// A single PCIe expansion slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcieSlot {
    /// Electrical/mechanical width, e.g. `x16`
    #[serde(rename = "type")]
    pub kind: String,
}

impl PcieSlot {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn is_x16(&self) -> bool {
        self.kind.trim().eq_ignore_ascii_case("x16")
    }
}

/// Motherboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motherboard {
    pub brand: String,
    pub model: ModelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chipset: Option<String>,
    pub socket: Socket,

    /// Number of CPU sockets on the board
    #[serde(default = "one")]
    pub cpu_sockets: u32,

    pub form_factor: FormFactor,
    pub memory_type: MemoryType,
    pub memory_slots: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory_gb: Option<u32>,

    /// Maximum memory speed in MHz
    pub memory_speed: u32,

    pub pcie_version: PcieVersion,
    #[serde(default)]
    pub pcie_slots: Vec<PcieSlot>,

    #[serde(default)]
    pub sata_ports: u32,
    /// M.2 slot identifiers (e.g. `M.2_1 (PCIe 5.0)`)
    #[serde(default)]
    pub m2_slots: Vec<String>,

    #[serde(default)]
    pub price: u32,
}

impl Motherboard {
    pub fn x16_slot_count(&self) -> usize {
        self.pcie_slots.iter().filter(|slot| slot.is_x16()).count()
    }

    pub fn m2_slot_count(&self) -> usize {
        self.m2_slots.len()
    }

    /// Socket and memory-controller match for a processor
    pub fn accepts_processor(&self, cpu: &Processor) -> bool {
        cpu.socket == self.socket && cpu.supports_memory(&self.memory_type)
    }
}

/// Graphics card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsCard {
    pub brand: String,
    pub model: ModelId,

    /// Card length in mm
    pub length: u32,
    /// Card thickness in expansion slots (2.5 is common)
    pub width_slots: f32,

    pub tdp: u32,
    pub recommended_psu: u32,
    pub pcie_version: PcieVersion,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vram_gb: Option<u32>,

    #[serde(default)]
    pub price: u32,
}

impl GraphicsCard {
    pub fn fits_in(&self, max_length: u32, max_width_slots: f32) -> bool {
        self.length <= max_length && self.width_slots <= max_width_slots
    }

    pub fn is_psu_sufficient(&self, psu_wattage: u32) -> bool {
        psu_wattage >= self.recommended_psu
    }
}

/// Memory kit (one or more identical modules sold together)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamKit {
    pub brand: String,
    pub model: ModelId,
    #[serde(rename = "type")]
    pub memory_type: MemoryType,

    /// Modules in the kit; each one takes a memory slot
    #[serde(default = "one")]
    pub modules: u32,

    /// Capacity of each module in GB
    pub capacity_gb: u32,

    /// Speed in MHz
    pub speed: u32,

    /// Module height in mm, when the vendor states one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default)]
    pub price: u32,
}

impl RamKit {
    pub fn total_capacity_gb(&self) -> u32 {
        self.capacity_gb * self.modules
    }

    pub fn is_compatible_with_motherboard(&self, motherboard: &Motherboard) -> bool {
        self.memory_type == motherboard.memory_type
            && self.speed <= motherboard.memory_speed
            && self.modules <= motherboard.memory_slots
    }
}

/// Power supply unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSupply {
    pub brand: String,
    pub model: ModelId,
    pub wattage: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<String>,

    /// Physical length in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(default)]
    pub price: u32,
}

impl PowerSupply {
    pub fn is_enough_for_gpu(&self, gpu: &GraphicsCard) -> bool {
        gpu.is_psu_sufficient(self.wattage)
    }

    /// A unit with no stated length fits anywhere
    pub fn fits_length(&self, max_length: u32) -> bool {
        self.length.map_or(true, |length| length <= max_length)
    }
}

/// Rack-mountable case
///
/// Absent limits are unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub brand: String,
    pub model: ModelId,
    pub form_factor: FormFactor,

    /// Explicit board support list; derived from `form_factor` when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_motherboards: Vec<FormFactor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_max_width_slots: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_cooler_max_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psu_max_length: Option<u32>,

    #[serde(default = "default_max_ram_height")]
    pub max_ram_height: u32,

    /// Height in rack units
    #[serde(default = "default_size_u")]
    pub size_u: u32,

    #[serde(default)]
    pub price: u32,
}

impl Case {
    pub const DEFAULT_MAX_RAM_HEIGHT: u32 = 60;
    pub const DEFAULT_SIZE_U: u32 = 2;

    /// Board form factors this case accepts
    pub fn supported_boards(&self) -> Vec<FormFactor> {
        if self.supported_motherboards.is_empty() {
            self.form_factor.accepted_boards()
        } else {
            self.supported_motherboards.clone()
        }
    }

    pub fn fits_motherboard(&self, motherboard: &Motherboard) -> bool {
        self.supported_boards().contains(&motherboard.form_factor)
    }

    pub fn fits_gpu(&self, gpu: &GraphicsCard) -> bool {
        self.fits_gpu_length(gpu)
            && self
                .gpu_max_width_slots
                .map_or(true, |max| gpu.width_slots <= max)
    }

    pub fn fits_gpu_length(&self, gpu: &GraphicsCard) -> bool {
        self.gpu_max_length.map_or(true, |max| gpu.length <= max)
    }

    pub fn fits_psu(&self, psu: &PowerSupply) -> bool {
        self.psu_max_length.map_or(true, |max| psu.fits_length(max))
    }

    pub fn fits_cooler(&self, cooler: &CpuCooler) -> bool {
        self.cpu_cooler_max_height
            .map_or(true, |max| cooler.height <= max)
    }

    pub fn fits_ram(&self, kit: &RamKit) -> bool {
        kit.height.map_or(true, |height| height <= self.max_ram_height)
    }
}

/// CPU cooler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuCooler {
    pub brand: String,
    pub model: ModelId,

    /// `Air`, `AIO`, ...
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub sockets: Vec<Socket>,

    /// Heat it can dissipate, in watts
    pub tdp: u32,

    /// Height in mm
    pub height: u32,

    #[serde(default)]
    pub price: u32,
}

impl CpuCooler {
    pub fn supports_socket(&self, socket: &Socket) -> bool {
        self.sockets.contains(socket)
    }

    pub fn is_sufficient_for_tdp(&self, cpu_tdp: u32) -> bool {
        self.tdp >= cpu_tdp
    }
}

/// HDD, SATA SSD or NVMe drive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageDevice {
    pub brand: String,
    pub model: ModelId,
    #[serde(rename = "type")]
    pub kind: StorageKind,
    pub form_factor: StorageFormFactor,
    #[serde(default)]
    pub capacity_gb: u32,
    #[serde(default)]
    pub price: u32,
}

impl StorageDevice {
    pub fn is_m2(&self) -> bool {
        self.form_factor.is_m2()
    }
}

/// Typed access shared by every component record
pub trait Part: Sized {
    const CATEGORY: Category;

    fn model(&self) -> &ModelId;
    fn brand(&self) -> &str;
    fn price(&self) -> u32;

    /// Borrow the typed record out of a [`Component`] of the same category
    fn from_component(component: &Component) -> Option<&Arc<Self>>;

    /// Wrap a shared record into a [`Component`]
    fn into_component(part: Arc<Self>) -> Component;
}

macro_rules! impl_part {
    ($ty:ty, $variant:ident) => {
        impl Part for $ty {
            const CATEGORY: Category = Category::$variant;

            fn model(&self) -> &ModelId {
                &self.model
            }

            fn brand(&self) -> &str {
                &self.brand
            }

            fn price(&self) -> u32 {
                self.price
            }

            fn from_component(component: &Component) -> Option<&Arc<Self>> {
                match component {
                    Component::$variant(part) => Some(part),
                    _ => None,
                }
            }

            fn into_component(part: Arc<Self>) -> Component {
                Component::$variant(part)
            }
        }

        impl From<$ty> for Component {
            fn from(part: $ty) -> Self {
                Component::$variant(Arc::new(part))
            }
        }
    };
}

/// Any catalog component, tagged by category
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Cpu(Arc<Processor>),
    Motherboard(Arc<Motherboard>),
    Gpu(Arc<GraphicsCard>),
    Ram(Arc<RamKit>),
    Psu(Arc<PowerSupply>),
    Case(Arc<Case>),
    Cooler(Arc<CpuCooler>),
    Storage(Arc<StorageDevice>),
}

impl_part!(Processor, Cpu);
impl_part!(Motherboard, Motherboard);
impl_part!(GraphicsCard, Gpu);
impl_part!(RamKit, Ram);
impl_part!(PowerSupply, Psu);
impl_part!(Case, Case);
impl_part!(CpuCooler, Cooler);
impl_part!(StorageDevice, Storage);

impl Component {
    pub fn category(&self) -> Category {
        match self {
            Self::Cpu(_) => Category::Cpu,
            Self::Motherboard(_) => Category::Motherboard,
            Self::Gpu(_) => Category::Gpu,
            Self::Ram(_) => Category::Ram,
            Self::Psu(_) => Category::Psu,
            Self::Case(_) => Category::Case,
            Self::Cooler(_) => Category::Cooler,
            Self::Storage(_) => Category::Storage,
        }
    }

    pub fn model(&self) -> &ModelId {
        match self {
            Self::Cpu(p) => p.model(),
            Self::Motherboard(p) => p.model(),
            Self::Gpu(p) => p.model(),
            Self::Ram(p) => p.model(),
            Self::Psu(p) => p.model(),
            Self::Case(p) => p.model(),
            Self::Cooler(p) => p.model(),
            Self::Storage(p) => p.model(),
        }
    }

    pub fn brand(&self) -> &str {
        match self {
            Self::Cpu(p) => p.brand(),
            Self::Motherboard(p) => p.brand(),
            Self::Gpu(p) => p.brand(),
            Self::Ram(p) => p.brand(),
            Self::Psu(p) => p.brand(),
            Self::Case(p) => p.brand(),
            Self::Cooler(p) => p.brand(),
            Self::Storage(p) => p.brand(),
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            Self::Cpu(p) => p.price(),
            Self::Motherboard(p) => p.price(),
            Self::Gpu(p) => p.price(),
            Self::Ram(p) => p.price(),
            Self::Psu(p) => p.price(),
            Self::Case(p) => p.price(),
            Self::Cooler(p) => p.price(),
            Self::Storage(p) => p.price(),
        }
    }

    /// Typed view of this component, `None` if the category differs
    pub fn as_part<T: Part>(&self) -> Option<&Arc<T>> {
        T::from_component(self)
    }

    /// True when both values point at the same shared definition
    pub fn shares_definition(&self, other: &Component) -> bool {
        match (self, other) {
            (Self::Cpu(a), Self::Cpu(b)) => Arc::ptr_eq(a, b),
            (Self::Motherboard(a), Self::Motherboard(b)) => Arc::ptr_eq(a, b),
            (Self::Gpu(a), Self::Gpu(b)) => Arc::ptr_eq(a, b),
            (Self::Ram(a), Self::Ram(b)) => Arc::ptr_eq(a, b),
            (Self::Psu(a), Self::Psu(b)) => Arc::ptr_eq(a, b),
            (Self::Case(a), Self::Case(b)) => Arc::ptr_eq(a, b),
            (Self::Cooler(a), Self::Cooler(b)) => Arc::ptr_eq(a, b),
            (Self::Storage(a), Self::Storage(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Structural checks applied when the catalog loads
    pub fn validate(&self) -> Result<(), ComponentError> {
        let zero = |field| ComponentError::ZeroQuantity {
            model: self.model().clone(),
            field,
        };

        match self {
            Self::Case(case) if case.size_u == 0 => Err(zero("size_u")),
            Self::Ram(kit) if kit.modules == 0 => Err(zero("modules")),
            Self::Motherboard(mb) if mb.cpu_sockets == 0 => Err(zero("cpu_sockets")),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand(), self.model())
    }
}

fn one() -> u32 {
    1
}

fn default_max_ram_height() -> u32 {
    Case::DEFAULT_MAX_RAM_HEIGHT
}

fn default_size_u() -> u32 {
    Case::DEFAULT_SIZE_U
}

/// Accept `"DDR4/DDR5"` as well as `["DDR4", "DDR5"]`
fn memory_support<'de, D>(deserializer: D) -> Result<Vec<MemoryType>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Joined(String),
        List(Vec<MemoryType>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Joined(joined) => MemoryType::parse_list(&joined),
        Raw::List(list) => list,
    })
}
