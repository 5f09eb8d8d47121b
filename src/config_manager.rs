use crate::config::{parse_size, ConfigError, ConfigRef};
use std::collections::HashMap;

const OPTION_PREFIX: &str = "user.unionfs.";

/// Trait for configuration options that can be get/set at runtime
pub trait ConfigOption: Send + Sync {
    /// Get the option name (e.g., "func.create")
    fn name(&self) -> &str;

    /// Get the current value as a string
    fn get_value(&self) -> String;

    /// Set the value from a string
    fn set_value(&self, value: &str) -> Result<(), ConfigError>;

    /// Check if this option is read-only
    fn is_readonly(&self) -> bool {
        false
    }

    /// Get help text for this option
    fn help(&self) -> &str;
}

/// String-keyed access to the shared [`crate::config::Config`].
pub struct ConfigManager {
    options: HashMap<String, Box<dyn ConfigOption>>,
}

impl ConfigManager {
    pub fn new(config: ConfigRef) -> Self {
        let registered: Vec<Box<dyn ConfigOption>> = vec![
            Box::new(CreatePolicyOption { config: config.clone() }),
            Box::new(MinFreeSpaceOption { config }),
            Box::new(ReadOnlyOption {
                name: "version",
                value: env!("CARGO_PKG_VERSION").to_string(),
                help: "unionfs-efs version",
            }),
        ];

        let options = registered
            .into_iter()
            .map(|option| (option.name().to_string(), option))
            .collect();

        Self { options }
    }

    /// Get all available option names with the "user.unionfs." prefix
    pub fn list_options(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .options
            .keys()
            .map(|k| format!("{}{}", OPTION_PREFIX, k))
            .collect();
        names.sort();
        names
    }

    pub fn get_option(&self, name: &str) -> Result<String, ConfigError> {
        let name = name.strip_prefix(OPTION_PREFIX).unwrap_or(name);
        self.options
            .get(name)
            .map(|option| option.get_value())
            .ok_or(ConfigError::NotFound)
    }

    pub fn set_option(&self, name: &str, value: &str) -> Result<(), ConfigError> {
        let name = name.strip_prefix(OPTION_PREFIX).unwrap_or(name);
        let option = self.options.get(name).ok_or(ConfigError::NotFound)?;
        if option.is_readonly() {
            return Err(ConfigError::ReadOnly);
        }
        option.set_value(value)?;
        tracing::info!(option = %name, value = %value, "Configuration option updated");
        Ok(())
    }

    pub fn help(&self, name: &str) -> Result<&str, ConfigError> {
        let name = name.strip_prefix(OPTION_PREFIX).unwrap_or(name);
        self.options
            .get(name)
            .map(|option| option.help())
            .ok_or(ConfigError::NotFound)
    }
}

struct CreatePolicyOption {
    config: ConfigRef,
}

impl ConfigOption for CreatePolicyOption {
    fn name(&self) -> &str {
        "func.create"
    }

    fn get_value(&self) -> String {
        self.config.read().create_policy.clone()
    }

    fn set_value(&self, value: &str) -> Result<(), ConfigError> {
        self.config.write().set_create_policy(value)
    }

    fn help(&self) -> &str {
        "Create policy: efs (enough free space), lfs (least free space)"
    }
}

struct MinFreeSpaceOption {
    config: ConfigRef,
}

impl ConfigOption for MinFreeSpaceOption {
    fn name(&self) -> &str {
        "minfreespace"
    }

    fn get_value(&self) -> String {
        self.config.read().min_free_space.to_string()
    }

    fn set_value(&self, value: &str) -> Result<(), ConfigError> {
        let bytes = parse_size(value)?;
        self.config.write().min_free_space = bytes;
        Ok(())
    }

    fn help(&self) -> &str {
        "Default minimum free space for branches without their own (bytes, or K/M/G/T)"
    }
}

/// Read-only option that returns a fixed value
struct ReadOnlyOption {
    name: &'static str,
    value: String,
    help: &'static str,
}

impl ConfigOption for ReadOnlyOption {
    fn name(&self) -> &str {
        self.name
    }

    fn get_value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&self, _value: &str) -> Result<(), ConfigError> {
        Err(ConfigError::ReadOnly)
    }

    fn is_readonly(&self) -> bool {
        true
    }

    fn help(&self) -> &str {
        self.help
    }
}
