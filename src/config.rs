use std::env;
use std::fs;

use anyhow::Context;
use dotenvy::dotenv;

use crate::model::deduction::DeductionConfig;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    // Rate limiting
    pub rate_compute_per_min: u32,

    pub api_prefix: String,

    /// Optional JSON snapshot of the statutory deduction configuration.
    /// Absent, the built-in India defaults are used.
    pub deduction_config_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),

            rate_compute_per_min: env::var("RATE_COMPUTE_PER_MIN")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            deduction_config_path: env::var("DEDUCTION_CONFIG_PATH").ok(),
        }
    }

    /// Reads and validates the statutory configuration snapshot the
    /// server will hand to every computation. Slab tables that do not
    /// partition `[0, ∞)` are rejected at startup rather than at
    /// payroll time.
    pub fn load_deduction_snapshot(&self) -> anyhow::Result<DeductionConfig> {
        let snapshot = match &self.deduction_config_path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read deduction config at {path}"))?;
                serde_json::from_str::<DeductionConfig>(&raw)
                    .with_context(|| format!("invalid deduction config at {path}"))?
            }
            None => DeductionConfig::india_defaults(),
        };
        snapshot
            .validate()
            .context("deduction config failed slab validation")?;
        Ok(snapshot)
    }
}
