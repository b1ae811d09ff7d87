use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_bool, env_or_default, server::ServerConfig};
use domain_users::UserField;

pub use core_config::Environment;

/// User directory settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Load the two demo users at startup
    pub seed_demo_users: bool,
    /// Fields that must be non-empty on create and full replace
    pub required_fields: Vec<UserField>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            seed_demo_users: true,
            required_fields: UserField::DEFAULT_REQUIRED.to_vec(),
        }
    }
}

impl FromEnv for DirectoryConfig {
    /// - SEED_DEMO_USERS: defaults to true
    /// - USER_REQUIRED_FIELDS: comma-separated, defaults to "name,email"
    fn from_env() -> Result<Self, ConfigError> {
        let seed_demo_users = env_bool("SEED_DEMO_USERS", true)?;
        let required_fields = env_or_default("USER_REQUIRED_FIELDS", "name,email")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<UserField>().map_err(|_| ConfigError::ParseError {
                    key: "USER_REQUIRED_FIELDS".to_string(),
                    details: format!("unknown user field '{}'", s),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            seed_demo_users,
            required_fields,
        })
    }
}

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub directory: DirectoryConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            directory: DirectoryConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: app_info!(),
            server: ServerConfig::default(),
            directory: DirectoryConfig::default(),
            environment: Environment::Development,
        }
    }
}
