//! Interpreter configuration

use crate::error::ConfigError;
use crate::memory::DEFAULT_MEMORY_LIMIT;
use serde::{Deserialize, Serialize};
use tinyevm_primitives::Gas;

/// Limits applied to a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionConfig {
    /// Gas available to the run
    #[serde(default = "default_gas_limit")]
    pub gas_limit: Gas,
    /// Maximum number of executed instructions
    #[serde(default = "default_step_limit")]
    pub step_limit: usize,
    /// Highest addressable memory byte (exclusive)
    #[serde(default = "default_memory_limit")]
    pub memory_limit: usize,
}

fn default_gas_limit() -> Gas {
    1000
}

fn default_step_limit() -> usize {
    256
}

fn default_memory_limit() -> usize {
    DEFAULT_MEMORY_LIMIT
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            gas_limit: default_gas_limit(),
            step_limit: default_step_limit(),
            memory_limit: default_memory_limit(),
        }
    }
}

impl ExecutionConfig {
    /// Load from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let config: Self = serde_json::from_value(serde_json::Value::Object(fields))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every run fail immediately
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gas_limit == 0 {
            return Err(ConfigError::ZeroGasLimit);
        }
        if self.step_limit == 0 {
            return Err(ConfigError::ZeroStepLimit);
        }
        Ok(())
    }

    /// Replace the gas limit
    pub fn with_gas_limit(mut self, gas_limit: Gas) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Replace the step ceiling
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Replace the memory ceiling
    pub fn with_memory_limit(mut self, memory_limit: usize) -> Self {
        self.memory_limit = memory_limit;
        self
    }
}
