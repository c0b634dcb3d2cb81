use std::env;
use std::time::Duration;

use crate::constants::*;

/// Exponential backoff applied to every remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Wait after the failed attempt with the given zero-based index
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt_index).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
        }
    }
}

/// Fixed-interval polling used to confirm a write became visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_CONFIRM_MAX_ATTEMPTS,
            interval: Duration::from_millis(DEFAULT_CONFIRM_INTERVAL_MS),
        }
    }
}

/// Client configuration, injected into the client at construction
#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the deployed document store contract
    pub contract_address: String,
    pub retry: RetryPolicy,
    pub confirm: ConfirmPolicy,
    pub environment: String,
}

impl Config {
    /// Configuration with default retry and confirmation policies
    pub fn new(contract_address: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            retry: RetryPolicy::default(),
            confirm: ConfirmPolicy::default(),
            environment: "development".to_string(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let contract_address = lookup("DOCUSTORE_CONTRACT_ADDRESS")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ERR_MISSING_CONTRACT_ADDRESS)?;

        let max_attempts = lookup("RETRY_MAX_ATTEMPTS")
            .unwrap_or_else(|| DEFAULT_RETRY_MAX_ATTEMPTS.to_string())
            .parse()
            .map_err(|_| "Invalid RETRY_MAX_ATTEMPTS")?;

        let base_delay_ms: u64 = lookup("RETRY_BASE_DELAY_MS")
            .unwrap_or_else(|| DEFAULT_RETRY_BASE_DELAY_MS.to_string())
            .parse()
            .map_err(|_| "Invalid RETRY_BASE_DELAY_MS")?;

        let confirm_attempts = lookup("CONFIRM_MAX_ATTEMPTS")
            .unwrap_or_else(|| DEFAULT_CONFIRM_MAX_ATTEMPTS.to_string())
            .parse()
            .map_err(|_| "Invalid CONFIRM_MAX_ATTEMPTS")?;

        let confirm_interval_ms: u64 = lookup("CONFIRM_INTERVAL_MS")
            .unwrap_or_else(|| DEFAULT_CONFIRM_INTERVAL_MS.to_string())
            .parse()
            .map_err(|_| "Invalid CONFIRM_INTERVAL_MS")?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let config = Config {
            contract_address: contract_address.trim().to_string(),
            retry: RetryPolicy {
                max_attempts,
                base_delay: Duration::from_millis(base_delay_ms),
            },
            confirm: ConfirmPolicy {
                max_attempts: confirm_attempts,
                interval: Duration::from_millis(confirm_interval_ms),
            },
            environment,
        };
        config.validate()?;

        Ok(config)
    }

    /// Reject values the client cannot operate with
    pub fn validate(&self) -> Result<(), String> {
        if self.contract_address.trim().is_empty() {
            return Err(ERR_MISSING_CONTRACT_ADDRESS.to_string());
        }
        if self.retry.max_attempts == 0 {
            return Err("RETRY_MAX_ATTEMPTS must be at least 1".to_string());
        }
        if self.confirm.max_attempts == 0 {
            return Err("CONFIRM_MAX_ATTEMPTS must be at least 1".to_string());
        }
        Ok(())
    }
}
