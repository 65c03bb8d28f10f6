// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hardware Value Objects
//!
//! Small validated values shared by several component categories:
//!
//! - [`Socket`] - CPU socket designation (e.g. `AM5`, `LGA1700`)
//! - [`MemoryType`] - Memory generation (e.g. `DDR5`)
//! - [`FormFactor`] - Motherboard / case size class
//! - [`PcieVersion`] - PCI Express revision, ordered numerically
//! - [`StorageKind`] / [`StorageFormFactor`] - Drive technology and connector

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Value object validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Empty value for {0}")]
    Empty(&'static str),

    #[error("Invalid PCIe version: {0}")]
    InvalidPcieVersion(String),

    #[error("Unknown form factor: {0}")]
    UnknownFormFactor(String),

    #[error("Unknown storage form factor: {0}")]
    UnknownStorageFormFactor(String),

    #[error("Unknown storage kind: {0}")]
    UnknownStorageKind(String),
}

/// CPU socket designation
///
/// Compared exactly after trimming; `AM5` and `am5` are different sockets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Socket(String);

impl Socket {
    pub fn new(socket: impl Into<String>) -> Result<Self, ValueError> {
        let socket = socket.into();
        let trimmed = socket.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty("socket"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Socket {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Socket> for String {
    fn from(socket: Socket) -> Self {
        socket.0
    }
}

/// Memory generation (DDR2 ... DDR5)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemoryType(String);

impl MemoryType {
    pub fn new(memory_type: impl Into<String>) -> Result<Self, ValueError> {
        let memory_type = memory_type.into();
        let trimmed = memory_type.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty("memory type"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parse a slash-separated support list such as `"DDR4/DDR5"`
    ///
    /// Empty segments are skipped.
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split('/')
            .filter_map(|segment| Self::new(segment).ok())
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MemoryType {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemoryType> for String {
    fn from(memory_type: MemoryType) -> Self {
        memory_type.0
    }
}

/// Motherboard / case form factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormFactor {
    #[serde(rename = "E-ATX", alias = "EATX")]
    EAtx,
    #[serde(rename = "ATX")]
    Atx,
    #[serde(rename = "Micro-ATX", alias = "mATX", alias = "MicroATX")]
    MicroAtx,
    #[serde(rename = "Mini-ITX", alias = "ITX", alias = "MiniITX")]
    MiniItx,
}

impl FormFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EAtx => "E-ATX",
            Self::Atx => "ATX",
            Self::MicroAtx => "Micro-ATX",
            Self::MiniItx => "Mini-ITX",
        }
    }

    /// Board form factors a case of this form factor accepts
    ///
    /// A case fits its own size class and every smaller one.
    pub fn accepted_boards(&self) -> Vec<FormFactor> {
        match self {
            Self::EAtx => vec![Self::EAtx, Self::Atx, Self::MicroAtx, Self::MiniItx],
            Self::Atx => vec![Self::Atx, Self::MicroAtx, Self::MiniItx],
            Self::MicroAtx => vec![Self::MicroAtx, Self::MiniItx],
            Self::MiniItx => vec![Self::MiniItx],
        }
    }
}

impl FromStr for FormFactor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "-").as_str() {
            "e-atx" | "eatx" => Ok(Self::EAtx),
            "atx" => Ok(Self::Atx),
            "micro-atx" | "microatx" | "matx" => Ok(Self::MicroAtx),
            "mini-itx" | "miniitx" | "itx" => Ok(Self::MiniItx),
            _ => Err(ValueError::UnknownFormFactor(s.to_string())),
        }
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// PCI Express revision
///
/// Ordered numerically by (major, minor), so `10.0 > 5.0` even though the
/// string forms would sort the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PcieVersion {
    major: u8,
    minor: u8,
}

impl PcieVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u8 {
        self.major
    }

    pub fn minor(&self) -> u8 {
        self.minor
    }
}

impl FromStr for PcieVersion {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let raw = raw
            .strip_prefix("PCIe")
            .or_else(|| raw.strip_prefix("pcie"))
            .unwrap_or(raw)
            .trim();

        let invalid = || ValueError::InvalidPcieVersion(s.to_string());
        let (major, minor) = match raw.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (raw, "0"),
        };

        let major = major.parse::<u8>().map_err(|_| invalid())?;
        let minor = minor.parse::<u8>().map_err(|_| invalid())?;
        Ok(Self { major, minor })
    }
}

impl fmt::Display for PcieVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Serialize for PcieVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PcieVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Catalog files carry both "4.0" and 4.0
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => format!("{number:.1}"),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Drive technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "NVMe", alias = "NVME")]
    Nvme,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hdd => "HDD",
            Self::Ssd => "SSD",
            Self::Nvme => "NVMe",
        };
        write!(f, "{label}")
    }
}

/// Drive physical / connector form factor
///
/// Only M.2 devices consume M.2 slots; every other device consumes a SATA
/// port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StorageFormFactor {
    /// 3.5" drive bay
    ThreePointFive,
    /// 2.5" drive bay
    TwoPointFive,
    /// M.2 slot (any length)
    M2,
}

impl StorageFormFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThreePointFive => "3.5",
            Self::TwoPointFive => "2.5",
            Self::M2 => "M.2",
        }
    }

    pub fn is_m2(&self) -> bool {
        matches!(self, Self::M2)
    }
}

impl FromStr for StorageFormFactor {
    type Err = ValueError;

    /// Accepts `3.5`, `3.5"`, `2.5`, `M.2`, `M.2 2280`, `M2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().trim_end_matches('"').to_uppercase();
        if normalised.starts_with("M.2") || normalised.starts_with("M2") {
            Ok(Self::M2)
        } else if normalised.starts_with("3.5") {
            Ok(Self::ThreePointFive)
        } else if normalised.starts_with("2.5") {
            Ok(Self::TwoPointFive)
        } else {
            Err(ValueError::UnknownStorageFormFactor(s.to_string()))
        }
    }
}

impl TryFrom<String> for StorageFormFactor {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StorageFormFactor> for String {
    fn from(form_factor: StorageFormFactor) -> Self {
        form_factor.as_str().to_string()
    }
}

impl fmt::Display for StorageFormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
