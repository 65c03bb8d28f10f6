// Copyright (c) 2025 - Cowboy AI, Inc.
//! Build Manifest
//!
//! Model-id form of an [`Assembly`], used by save files and the command-line
//! checker. Resolving a manifest through a [`ComponentResolver`] never fails:
//! ids that are unknown, or that name a component of the wrong category, are
//! skipped and reported back.

use serde::{Deserialize, Serialize};

use super::Assembly;
use crate::catalog::ComponentResolver;
use crate::domain::{Category, ModelId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<ModelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motherboard: Option<ModelId>,
    #[serde(default, alias = "processors", skip_serializing_if = "Vec::is_empty")]
    pub cpu: Vec<ModelId>,
    #[serde(default, alias = "coolers", skip_serializing_if = "Vec::is_empty")]
    pub cooler: Vec<ModelId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ram: Vec<ModelId>,
    #[serde(default, alias = "gpus", skip_serializing_if = "Vec::is_empty")]
    pub gpu: Vec<ModelId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage: Vec<ModelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psu: Option<ModelId>,
}

/// A manifest entry that could not be turned into a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedModel {
    pub category: Category,
    pub model: ModelId,
}

impl BuildManifest {
    pub fn from_assembly(assembly: &Assembly) -> Self {
        let ids = |category| {
            assembly
                .components_of(category)
                .iter()
                .map(|component| component.model().clone())
                .collect::<Vec<_>>()
        };

        Self {
            case: ids(Category::Case).into_iter().next(),
            motherboard: ids(Category::Motherboard).into_iter().next(),
            cpu: ids(Category::Cpu),
            cooler: ids(Category::Cooler),
            ram: ids(Category::Ram),
            gpu: ids(Category::Gpu),
            storage: ids(Category::Storage),
            psu: ids(Category::Psu).into_iter().next(),
        }
    }

    /// Every (slot category, model) pair, in install order
    pub fn entries(&self) -> Vec<(Category, &ModelId)> {
        let mut entries = Vec::new();
        entries.extend(self.case.iter().map(|id| (Category::Case, id)));
        entries.extend(self.motherboard.iter().map(|id| (Category::Motherboard, id)));
        entries.extend(self.cpu.iter().map(|id| (Category::Cpu, id)));
        entries.extend(self.cooler.iter().map(|id| (Category::Cooler, id)));
        entries.extend(self.ram.iter().map(|id| (Category::Ram, id)));
        entries.extend(self.gpu.iter().map(|id| (Category::Gpu, id)));
        entries.extend(self.storage.iter().map(|id| (Category::Storage, id)));
        entries.extend(self.psu.iter().map(|id| (Category::Psu, id)));
        entries
    }

    /// Rebuild the assembly, skipping entries that do not resolve
    pub fn resolve<R>(&self, resolver: &R) -> (Assembly, Vec<UnresolvedModel>)
    where
        R: ComponentResolver + ?Sized,
    {
        let mut assembly = Assembly::new();
        let mut unresolved = Vec::new();

        for (category, model) in self.entries() {
            match resolver.resolve(model) {
                Some(component) if component.category() == category => {
                    assembly.install(component);
                }
                _ => unresolved.push(UnresolvedModel {
                    category,
                    model: model.clone(),
                }),
            }
        }

        (assembly, unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    const CATALOG: &str = r#"{
        "case": [{ "brand": "NZXT", "model": "H210", "form_factor": "Mini-ITX" }],
        "psu": [{ "brand": "Corsair", "model": "SF750", "wattage": 750 }]
    }"#;

    #[test]
    fn test_resolve_skips_unknown_and_miscategorised_ids() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        let manifest: BuildManifest = serde_json::from_str(
            r#"{ "case": "H210", "psu": "SF750", "ram": ["H210"], "gpu": ["Voodoo 5"] }"#,
        )
        .unwrap();

        let (assembly, unresolved) = manifest.resolve(&catalog);

        assert!(assembly.case.is_some());
        assert!(assembly.psu.is_some());
        assert!(assembly.ram.is_empty());
        assert_eq!(
            unresolved
                .iter()
                .map(|u| (u.category, u.model.as_str()))
                .collect::<Vec<_>>(),
            vec![(Category::Ram, "H210"), (Category::Gpu, "Voodoo 5")]
        );
    }

    #[test]
    fn test_from_assembly_lists_model_ids() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        let manifest: BuildManifest =
            serde_json::from_str(r#"{ "case": "H210", "psu": "SF750" }"#).unwrap();
        let (assembly, _) = manifest.resolve(&catalog);

        assert_eq!(BuildManifest::from_assembly(&assembly), manifest);
    }
}
