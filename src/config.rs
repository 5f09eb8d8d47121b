use crate::branch::{Branch, BranchMode};
use crate::policy::{create_policy_from_name, CreatePolicy, CREATE_POLICY_NAMES};
use crate::upstream::UpstreamRef;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub type ConfigRef = Arc<RwLock<Config>>;

/// Default reserve applied to branches without their own value: 4 GiB.
pub const DEFAULT_MIN_FREE_SPACE: u64 = 4 * 1024 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Option not found")]
    NotFound,
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Read-only option")]
    ReadOnly,
}

impl ConfigError {
    pub fn errno(&self) -> i32 {
        match self {
            ConfigError::NotFound => 61,        // ENOATTR
            ConfigError::InvalidValue(_) => 22, // EINVAL
            ConfigError::ReadOnly => 30,        // EROFS
        }
    }
}

/// One `PATH[=MODE[,MINFREESPACE]]` entry from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchSpec {
    pub path: PathBuf,
    pub mode: BranchMode,
    pub min_free_space: Option<u64>,
}

impl BranchSpec {
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let Some(eq_pos) = spec.find('=') else {
            return Ok(Self {
                path: PathBuf::from(spec),
                mode: BranchMode::ReadWrite,
                min_free_space: None,
            });
        };

        let path = &spec[..eq_pos];
        let mode_part = &spec[eq_pos + 1..];

        let (mode_str, min_free_space) = match mode_part.find(',') {
            Some(comma_pos) => (
                &mode_part[..comma_pos],
                Some(parse_size(&mode_part[comma_pos + 1..])?),
            ),
            None => (mode_part, None),
        };

        let mode = match mode_str.to_uppercase().as_str() {
            "RO" => BranchMode::ReadOnly,
            "NC" => BranchMode::NoCreate,
            "RW" => BranchMode::ReadWrite,
            _ => {
                tracing::warn!("Unknown branch mode '{}', defaulting to RW", mode_str);
                BranchMode::ReadWrite
            }
        };

        Ok(Self {
            path: PathBuf::from(path),
            mode,
            min_free_space,
        })
    }
}

/// Parse a byte count with an optional K/M/G/T suffix (powers of 1024).
pub fn parse_size(value: &str) -> Result<u64, ConfigError> {
    let value = value.trim();
    let invalid = || ConfigError::InvalidValue(format!("Invalid size: {}", value));

    let (digits, multiplier) = match value.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => {
            let shift = match c.to_ascii_uppercase() {
                'K' => 10,
                'M' => 20,
                'G' => 30,
                'T' => 40,
                _ => return Err(invalid()),
            };
            (&value[..value.len() - 1], 1u64 << shift)
        }
        _ => (value, 1),
    };

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(invalid)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub create_policy: String,
    pub min_free_space: u64,
    pub branches: Vec<BranchSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_policy: "efs".to_string(),
            min_free_space: DEFAULT_MIN_FREE_SPACE,
            branches: Vec::new(),
        }
    }
}

impl Config {
    pub fn set_create_policy(&mut self, name: &str) -> Result<(), ConfigError> {
        if create_policy_from_name(name).is_none() {
            return Err(ConfigError::InvalidValue(format!(
                "Unknown create policy: {}. Valid options: {}",
                name,
                CREATE_POLICY_NAMES.join(", ")
            )));
        }
        self.create_policy = name.to_string();
        Ok(())
    }

    /// Resolve the configured create policy.
    pub fn create_policy(&self) -> Result<Box<dyn CreatePolicy>, ConfigError> {
        create_policy_from_name(&self.create_policy).ok_or_else(|| {
            ConfigError::InvalidValue(format!("Unknown create policy: {}", self.create_policy))
        })
    }

    /// Build the upstream set, filling in the global reserve where a branch has none.
    pub fn build_upstreams(&self) -> Vec<UpstreamRef> {
        self.branches
            .iter()
            .map(|spec| {
                let min_free_space = spec.min_free_space.unwrap_or(self.min_free_space);
                Arc::new(Branch::with_min_free_space(
                    spec.path.clone(),
                    spec.mode,
                    min_free_space,
                )) as UpstreamRef
            })
            .collect()
    }
}

pub fn create_config() -> ConfigRef {
    Arc::new(RwLock::new(Config::default()))
}
