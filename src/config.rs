use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::Endpoint;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchdogConfig {
    pub services: Vec<ServiceConfig>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    pub name: String,
    pub prod_url: String,
    pub dev_url: String,
}

fn default_poll_interval_ms() -> u64 { 5000 }
fn default_probe_timeout_ms() -> u64 { 5000 }
fn default_api_port() -> u16 { 3000 }

impl WatchdogConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path))
    }

    pub fn prod_endpoints(&self) -> Vec<Endpoint> {
        self.services
            .iter()
            .map(|s| Endpoint { name: s.name.clone(), url: s.prod_url.clone() })
            .collect()
    }

    pub fn dev_endpoints(&self) -> Vec<Endpoint> {
        self.services
            .iter()
            .map(|s| Endpoint { name: s.name.clone(), url: s.dev_url.clone() })
            .collect()
    }
}
