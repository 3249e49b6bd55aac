//! Configuration handling for the simulation binary.
//!
//! Reads an optional YAML config file and applies environment variable
//! overrides on top of built-in defaults.

use anyhow::Result;
use ndn_control::{ControllerConfig, DEFAULT_REFRESH_DEBOUNCE};
use ndn_forwarder::{ForwarderConfig, DEFAULT_CS_CAPACITY, DEFAULT_LATENCY_SLOWDOWN};
use ndn_routing::{RouteDefaults, DEFAULT_MAX_ROUTES};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Default link latency in milliseconds for edges without one
    pub default_latency_ms: u32,
    /// Default link loss percentage for edges without one
    pub default_loss_pct: f32,
    /// Content Store capacity per node, in packets
    pub content_store_size: usize,
    /// Multiplier turning link latency into wall-clock transit time
    pub latency_slowdown: u32,
    /// Route refresh debounce window in milliseconds
    pub debounce_ms: u64,
    /// Alternative paths computed per destination
    pub max_routes: usize,
    /// Seed the built-in demo topology on an empty store
    pub seed_demo_topology: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            default_latency_ms: RouteDefaults::default().latency_ms,
            default_loss_pct: RouteDefaults::default().loss_pct,
            content_store_size: DEFAULT_CS_CAPACITY,
            latency_slowdown: DEFAULT_LATENCY_SLOWDOWN,
            debounce_ms: DEFAULT_REFRESH_DEBOUNCE.as_millis() as u64,
            max_routes: DEFAULT_MAX_ROUTES,
            seed_demo_topology: true,
        }
    }
}

/// Root configuration structure (matches the YAML structure)
#[derive(Debug, Deserialize)]
struct RootConfig {
    simulation: Option<SimConfig>,
}

impl SimConfig {
    /// Load configuration from file and environment variables
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config = Self::default();

        if let Ok(content) = std::fs::read_to_string(&config_path) {
            match serde_yaml::from_str::<RootConfig>(&content) {
                Ok(root) => {
                    if let Some(simulation) = root.simulation {
                        config = simulation;
                    }
                    info!("Loaded configuration from {:?}", config_path.as_ref());
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {:?} ({}), using defaults",
                        config_path.as_ref(),
                        e
                    );
                }
            }
        } else {
            warn!(
                "Config file {:?} not found, using defaults",
                config_path.as_ref()
            );
        }

        config.apply_environment_overrides();

        info!(
            "Final simulation configuration: latency={}ms loss={}% cs={} slowdown={}x debounce={}ms routes={}",
            config.default_latency_ms,
            config.default_loss_pct,
            config.content_store_size,
            config.latency_slowdown,
            config.debounce_ms,
            config.max_routes
        );

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_environment_overrides(&mut self) {
        if let Ok(value) = std::env::var("NDNSIM_DEFAULT_LATENCY_MS") {
            if let Ok(latency) = value.parse::<u32>() {
                self.default_latency_ms = latency;
                info!("Default latency overridden by environment: {}", latency);
            }
        }

        if let Ok(value) = std::env::var("NDNSIM_LATENCY_SLOWDOWN") {
            if let Ok(slowdown) = value.parse::<u32>() {
                self.latency_slowdown = slowdown;
                info!("Latency slowdown overridden by environment: {}", slowdown);
            }
        }

        if let Ok(value) = std::env::var("NDNSIM_CONTENT_STORE_SIZE") {
            if let Ok(size) = value.parse::<usize>() {
                self.content_store_size = size;
                info!("Content store size overridden by environment: {}", size);
            }
        }

        if let Ok(value) = std::env::var("NDNSIM_DEBOUNCE_MS") {
            if let Ok(debounce) = value.parse::<u64>() {
                self.debounce_ms = debounce;
                info!("Refresh debounce overridden by environment: {} ms", debounce);
            }
        }
    }

    /// Translate into the controller's configuration
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            forwarder: ForwarderConfig {
                defaults: RouteDefaults {
                    latency_ms: self.default_latency_ms,
                    loss_pct: self.default_loss_pct,
                },
                content_store_size: self.content_store_size,
                latency_slowdown: self.latency_slowdown,
            },
            debounce: Duration::from_millis(self.debounce_ms),
            max_routes: self.max_routes,
            seed_demo_topology: self.seed_demo_topology,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.default_latency_ms, 10);
        assert_eq!(config.content_store_size, 500);
        assert_eq!(config.latency_slowdown, 10);
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.max_routes, 3);
    }

    #[test]
    fn test_load_from_file() {
        let yaml_content = r#"
simulation:
  default_latency_ms: 25
  default_loss_pct: 1.5
  content_store_size: 100
  latency_slowdown: 2
  debounce_ms: 250
  max_routes: 5
  seed_demo_topology: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = SimConfig::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config.default_latency_ms, 25);
        assert_eq!(config.content_store_size, 100);
        assert_eq!(config.latency_slowdown, 2);
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.max_routes, 5);
        assert!(!config.seed_demo_topology);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = SimConfig::load_from_file("/nonexistent/config.yaml").unwrap();
        assert_eq!(config.default_latency_ms, SimConfig::default().default_latency_ms);
    }
}
