use crate::error::{CodeModelError, Result};
use crate::index::CodeUnitIndex;
use crate::types::UnitDeclaration;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A full snapshot of resolved declarations.
///
/// Units are kept in ordinal order, so `units()[i]` is the unit whose
/// ordinal in `index()` is `i`.
#[derive(Debug, Clone, Default)]
pub struct SourceModel {
    units: Vec<UnitDeclaration>,
    index: CodeUnitIndex,
}

#[derive(Deserialize)]
struct Snapshot {
    units: Vec<UnitDeclaration>,
}

impl SourceModel {
    /// Sort units by name and collapse duplicates (the later declaration wins).
    pub fn from_units(units: Vec<UnitDeclaration>) -> Self {
        let mut by_name: BTreeMap<String, UnitDeclaration> = BTreeMap::new();
        for unit in units {
            if let Some(previous) = by_name.insert(unit.name.clone(), unit) {
                log::warn!("Duplicate code unit {}, keeping the later declaration", previous.name);
            }
        }

        let index = CodeUnitIndex::from_names(by_name.keys().cloned());
        let units = by_name.into_values().collect();
        Self { units, index }
    }

    /// Parse a JSON snapshot (`{"units": [...]}`)
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)?;
        if let Some(position) = snapshot.units.iter().position(|u| u.name.trim().is_empty()) {
            return Err(CodeModelError::EmptyUnitName { position });
        }
        Ok(Self::from_units(snapshot.units))
    }

    /// Read and parse a JSON snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let model = Self::from_json_slice(&bytes)?;
        log::info!("Loaded {} code units from {}", model.len(), path.display());
        Ok(model)
    }

    pub fn index(&self) -> &CodeUnitIndex {
        &self.index
    }

    pub fn units(&self) -> &[UnitDeclaration] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
