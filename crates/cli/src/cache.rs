use anyhow::{Context, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use trace_code_model::CodeUnitIndex;

const CACHE_FILE: &str = "matrices.json";

/// Relation and similarity matrices of one snapshot, persisted as JSON
#[derive(Clone, Debug)]
pub struct MatrixCache {
    path: PathBuf,
}

/// Matrices restored from a cache hit
#[derive(Clone, Debug, PartialEq)]
pub struct CachedMatrices {
    pub calls: Array2<f64>,
    pub references: Array2<f64>,
    pub semantic: Array2<f64>,
}

#[derive(Serialize, Deserialize, Debug)]
struct CacheEnvelope {
    fingerprint: String,
    units: Vec<String>,
    calls: StoredMatrix,
    references: StoredMatrix,
    semantic: StoredMatrix,
}

/// Row-major square matrix; non-finite entries are stored as `null`
#[derive(Serialize, Deserialize, Debug)]
struct StoredMatrix {
    size: usize,
    values: Vec<Option<f64>>,
}

impl StoredMatrix {
    fn from_array(values: &Array2<f64>) -> Self {
        Self {
            size: values.nrows(),
            values: values
                .iter()
                .map(|&value| value.is_finite().then_some(value))
                .collect(),
        }
    }

    fn into_array(self) -> Option<Array2<f64>> {
        let values = self
            .values
            .into_iter()
            .map(|value| value.unwrap_or(f64::NAN))
            .collect();
        Array2::from_shape_vec((self.size, self.size), values).ok()
    }
}

impl CacheEnvelope {
    fn into_matrices(self) -> Option<CachedMatrices> {
        Some(CachedMatrices {
            calls: self.calls.into_array()?,
            references: self.references.into_array()?,
            semantic: self.semantic.into_array()?,
        })
    }
}

impl CachedMatrices {
    fn has_size(&self, size: usize) -> bool {
        [&self.calls, &self.references, &self.semantic]
            .iter()
            .all(|matrix| matrix.nrows() == size)
    }
}

impl MatrixCache {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(CACHE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Matrices stored for this fingerprint and unit list, if any.
    ///
    /// A missing, unreadable or stale cache is a miss, never an error.
    pub fn load(&self, fingerprint: &str, index: &CodeUnitIndex) -> Option<CachedMatrices> {
        if !self.path.exists() {
            return None;
        }

        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("Failed to read matrix cache {}: {err}", self.path.display());
                return None;
            }
        };

        let envelope: CacheEnvelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(err) => {
                log::warn!("Matrix cache corrupted ({}): {err}", self.path.display());
                return None;
            }
        };

        if envelope.fingerprint != fingerprint {
            log::debug!("Matrix cache stale (fingerprint mismatch)");
            return None;
        }
        if envelope.units != index.names() {
            log::debug!("Matrix cache stale (unit list mismatch)");
            return None;
        }

        let size = index.len();
        match envelope.into_matrices() {
            Some(matrices) if matrices.has_size(size) => {
                log::info!("Loaded matrices for {} units from {}", size, self.path.display());
                Some(matrices)
            }
            _ => {
                log::warn!("Matrix cache has inconsistent shapes ({})", self.path.display());
                None
            }
        }
    }

    /// Write the matrices, creating the cache directory when needed
    pub fn store(
        &self,
        fingerprint: &str,
        index: &CodeUnitIndex,
        calls: &Array2<f64>,
        references: &Array2<f64>,
        semantic: &Array2<f64>,
    ) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create cache dir {}", dir.display()))?;
        }

        let envelope = CacheEnvelope {
            fingerprint: fingerprint.to_string(),
            units: index.names().to_vec(),
            calls: StoredMatrix::from_array(calls),
            references: StoredMatrix::from_array(references),
            semantic: StoredMatrix::from_array(semantic),
        };
        let bytes = serde_json::to_vec(&envelope)?;
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("Cannot write matrix cache {}", self.path.display()))?;

        log::debug!("Stored matrices in {}", self.path.display());
        Ok(())
    }
}

/// SHA-256 over every input that shapes the matrices, as lowercase hex
pub fn fingerprint(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    to_lower_hex(&hasher.finalize())
}

fn to_lower_hex(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(LUT[(byte >> 4) as usize] as char);
        out.push(LUT[(byte & 0x0f) as usize] as char);
    }
    out
}
