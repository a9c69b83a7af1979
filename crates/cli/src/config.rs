use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trace_classifier::ClassifierConfig;

pub const DEFAULT_CACHE_DIR: &str = ".utility-traces/cache";

/// Settings read from a TOML file; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub thresholds: ClassifierConfig,
    pub lexicon: LexiconSection,
    pub cache: CacheSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconSection {
    /// Keyword list, one entry per line. The built-in Java list when absent.
    pub keywords: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    pub dir: PathBuf,
    pub enabled: bool,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
            enabled: true,
        }
    }
}

/// Values given on the command line; each one wins over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub keywords: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub no_cache: bool,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    /// Read a config file. A relative keyword path is taken relative to the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("Cannot parse config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.lexicon.keywords = config.lexicon.keywords.take().map(|keywords| {
                if keywords.is_relative() {
                    base.join(keywords)
                } else {
                    keywords
                }
            });
        }
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Optional file, then command-line overrides on top
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config
            .thresholds
            .validate()
            .context("Invalid classifier thresholds")?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(alpha) = overrides.alpha {
            self.thresholds.alpha = alpha;
        }
        if let Some(beta) = overrides.beta {
            self.thresholds.beta = beta;
        }
        if let Some(keywords) = overrides.keywords {
            self.lexicon.keywords = Some(keywords);
        }
        if let Some(dir) = overrides.cache_dir {
            self.cache.dir = dir;
        }
        if overrides.no_cache {
            self.cache.enabled = false;
        }
    }
}
