//! # Config Module
//!
//! Resource limits for the [`Engine`](crate::Engine) facade.
//!
//! Both limits are off by default: the engine imposes no bound unless one
//! is configured. Configuration is TOML:
//!
//! ```toml
//! max_depth = 64
//! max_criteria = 8
//! ```

use crate::types::NestError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits applied by the engine before any traversal starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum nesting depth of an input (a flat sequence has depth 1).
    pub max_depth: Option<usize>,
    /// Maximum number of criteria in one call.
    pub max_criteria: Option<usize>,
}

impl EngineConfig {
    /// Create an unlimited configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Set the criteria limit.
    #[must_use]
    pub fn with_max_criteria(mut self, limit: usize) -> Self {
        self.max_criteria = Some(limit);
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, NestError> {
        toml::from_str(text).map_err(|e| NestError::ConfigError(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            NestError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
