//! Shroud configuration
//!
//! Key locations and circuit shape for the transfer prover and `keygen`.
//!
//! Lookup order for the file:
//! 1. path in `SHROUD_CONFIG`
//! 2. `./shroud.toml`
//! 3. `~/.shroud/shroud.toml`
//!
//! `SHROUD_*` variables are applied on top of whatever file was found.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

static GLOBAL: OnceLock<ShroudConfig> = OnceLock::new();

const FILE_NAME: &str = "shroud.toml";
const HOME_DIR_NAME: &str = ".shroud";

const DEFAULT_PROVING_KEY: &str = "./keys/transfer.pk";
const DEFAULT_VERIFYING_KEY: &str = "./keys/transfer.vk";

/// Contents of shroud.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShroudConfig {
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub circuit: CircuitConfig,
}

/// `[keys]`: where the Groth16 keys live and how setup randomness is seeded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub proving_key_path: String,
    pub verifying_key_path: String,
    /// Deterministic setup seed. Only meant for test deployments.
    pub setup_seed: Option<u64>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            proving_key_path: DEFAULT_PROVING_KEY.to_string(),
            verifying_key_path: DEFAULT_VERIFYING_KEY.to_string(),
            setup_seed: None,
        }
    }
}

/// `[circuit]`: shape options. Changing any of these changes the keys.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CircuitConfig {
    /// Require each new note's rho to equal Hash(nullifiers.., index)
    pub bind_output_rho: bool,
}

/// Parsed value of `var`. `None` when unset or unparseable.
fn parse_env<T: std::str::FromStr>(var: &str) -> Option<T> {
    let raw = env::var(var).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}: cannot parse {:?}", var, raw);
            None
        }
    }
}

/// "1"/"true" and "0"/"false", case-insensitive
fn flag_from_env(var: &str) -> Option<bool> {
    let raw = env::var(var).ok()?;
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => {
            log::warn!("Ignoring {}: expected true or false, got {:?}", var, raw);
            None
        }
    }
}

impl ShroudConfig {
    /// Locate and read the config file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if let Some(path) = Self::locate() {
            log::info!("Reading config from {}", path.display());
            Self::parse_file(&path)?
        } else {
            log::info!("No shroud.toml found, using defaults");
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Read an explicit file, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::parse_file(path)?;
        config.apply_env();
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    fn locate() -> Option<PathBuf> {
        let explicit = env::var_os("SHROUD_CONFIG").map(PathBuf::from);
        let candidates = [explicit, Some(PathBuf::from(FILE_NAME)), Self::default_config_path()];
        candidates.into_iter().flatten().find(|p| p.exists())
    }

    fn apply_env(&mut self) {
        if let Some(path) = parse_env("SHROUD_PROVING_KEY") {
            self.keys.proving_key_path = path;
        }
        if let Some(path) = parse_env("SHROUD_VERIFYING_KEY") {
            self.keys.verifying_key_path = path;
        }
        if let Some(seed) = parse_env::<u64>("SHROUD_SETUP_SEED") {
            self.keys.setup_seed = Some(seed);
        }

        if let Some(bind) = flag_from_env("SHROUD_BIND_OUTPUT_RHO") {
            self.circuit.bind_output_rho = bind;
        }
    }

    /// ~/.shroud/shroud.toml
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(HOME_DIR_NAME).join(FILE_NAME))
    }

    /// Sample shroud.toml with every field spelled out
    pub fn generate_sample() -> String {
        let sample = Self {
            keys: KeysConfig {
                setup_seed: Some(0),
                ..KeysConfig::default()
            },
            circuit: CircuitConfig::default(),
        };
        toml::to_string_pretty(&sample).unwrap_or_default()
    }

    /// Process-wide config, loaded on first use. Load failures fall back to
    /// defaults with a warning.
    pub fn global() -> &'static ShroudConfig {
        GLOBAL.get_or_init(|| match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Config load failed ({:#}), using defaults", e);
                Self::default()
            }
        })
    }

    /// Install the process-wide config. Hands `config` back if one is
    /// already installed.
    pub fn set_global(config: ShroudConfig) -> Result<(), ShroudConfig> {
        GLOBAL.set(config)
    }
}
