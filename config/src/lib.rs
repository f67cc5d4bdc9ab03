//! # Configuration Management for ClauseKit
//!
//! This crate provides the configuration structures for the expression
//! compiler: which dialect to render, which table alias qualifies bare field
//! identifiers, whether values are inlined or bound, and pagination defaults.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{AppConfig, BindMode, CompilerConfig, PaginationConfig};
//!
//! let config = AppConfig {
//!     compiler: CompilerConfig::new("mysql".to_string(), "p".to_string(), BindMode::Inline, 64),
//!     pagination: PaginationConfig::new(20, 500),
//! };
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [compiler]
//! dialect = "mysql"
//! default_table_alias = "p"
//! bind_mode = "parameterized"
//! max_nesting_depth = 64
//!
//! [pagination]
//! default_num_per_page = 20
//! max_num_per_page = 500
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from clausekit.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;
use type_mapping::{is_reserved_keyword, MAX_IDENTIFIER_LENGTH};

const DEFAULT_CONFIG_PATH: &str = "./clausekit.toml";
const CONFIG_PATH_ENV: &str = "CLAUSEKIT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How values reach the compiled fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    /// Values are quoted and interpolated into the SQL text
    #[default]
    Inline,
    /// Values are replaced by placeholders and returned alongside the text
    Parameterized,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub compiler: CompilerConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Expression compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub dialect: String,
    /// Alias that qualifies unqualified field identifiers; empty leaves them bare
    pub default_table_alias: String,
    pub bind_mode: BindMode,
    pub max_nesting_depth: usize,
}

/// Pagination defaults applied to declarative input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_num_per_page: u64,
    /// Upper bound for a requested page size, 0 disables the cap
    pub max_num_per_page: u64,
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = {
            // A missing .env file is fine, the variable may come from the process
            match dotenvy::dotenv() {
                Ok(_) => {}
                Err(err) if err.not_found() => {}
                Err(err) => return Err(err.into()),
            }

            if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
                Self::from_file(&config_path)
            } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
                Self::from_file(DEFAULT_CONFIG_PATH)
            } else {
                Err(ConfigError::Invalid(format!(
                    "Config path must be specified in .env file as {} or in {} file",
                    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
                )))
            }
        }?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler.dialect.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Compiler dialect cannot be empty".to_string(),
            ));
        }
        if self.compiler.max_nesting_depth == 0 {
            return Err(ConfigError::Invalid(
                "Compiler max_nesting_depth must be greater than 0".to_string(),
            ));
        }
        validate_table_alias(&self.compiler.default_table_alias)?;

        if self.pagination.max_num_per_page > 0
            && self.pagination.default_num_per_page > self.pagination.max_num_per_page
        {
            return Err(ConfigError::Invalid(
                "Pagination default_num_per_page cannot be greater than max_num_per_page"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

/// An empty alias is allowed; anything else must be a single plain identifier
fn validate_table_alias(alias: &str) -> Result<(), ConfigError> {
    let Some(first_char) = alias.chars().next() else {
        return Ok(());
    };

    let problem = if alias.len() > MAX_IDENTIFIER_LENGTH {
        Some(format!("is longer than {} characters", MAX_IDENTIFIER_LENGTH))
    } else if !first_char.is_ascii_alphabetic() && first_char != '_' {
        Some("must start with a letter or underscore".to_string())
    } else if !alias.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some("may only contain alphanumeric characters and underscores".to_string())
    } else if is_reserved_keyword(alias) {
        Some("is a reserved SQL keyword".to_string())
    } else {
        None
    };

    match problem {
        Some(problem) => Err(ConfigError::Invalid(format!(
            "Compiler default_table_alias '{}' {}",
            alias, problem
        ))),
        None => Ok(()),
    }
}

impl CompilerConfig {
    /// Create a new compiler configuration
    pub fn new(
        dialect: String,
        default_table_alias: String,
        bind_mode: BindMode,
        max_nesting_depth: usize,
    ) -> Self {
        Self {
            dialect,
            default_table_alias,
            bind_mode,
            max_nesting_depth,
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new("mysql".to_string(), String::new(), BindMode::Inline, 64)
    }
}

impl PaginationConfig {
    /// Create a new pagination configuration
    pub fn new(default_num_per_page: u64, max_num_per_page: u64) -> Self {
        Self {
            default_num_per_page,
            max_num_per_page,
        }
    }

    /// Page size for a request, falling back to the default and honouring the cap
    pub fn effective_num_per_page(&self, requested: Option<u64>) -> u64 {
        let num = requested.unwrap_or(self.default_num_per_page);
        if self.max_num_per_page > 0 {
            num.min(self.max_num_per_page)
        } else {
            num
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(20, 0)
    }
}
