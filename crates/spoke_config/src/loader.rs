//! Configuration file loading and validation.

use crate::error::LoadError;
use crate::resolve::resolve_device;
use crate::types::SpokeConfig;
use spoke_common::ConfigError;
use spoke_graph::ComputeGraph;
use std::path::Path;

/// Name of the configuration file in a project directory.
pub const CONFIG_FILE: &str = "spoke.toml";

/// Loads and validates a `spoke.toml` configuration from a project directory.
///
/// Reads `<project_dir>/spoke.toml`, parses it, and validates it.
pub fn load_config(project_dir: &Path) -> Result<SpokeConfig, LoadError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `spoke.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<SpokeConfig, LoadError> {
    let config: SpokeConfig =
        toml::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that the configuration describes a buildable device, graph and
/// feature layout.
pub fn validate_config(config: &SpokeConfig) -> Result<(), LoadError> {
    resolve_device(config)?;

    let features = &config.features;
    if features.device == 0 || features.device % 3 != 0 {
        return Err(ConfigError::FeatureSize {
            what: "device",
            size: features.device,
            multiple: 3,
        }
        .into());
    }
    if features.graph == 0 || features.graph % 4 != 0 {
        return Err(ConfigError::FeatureSize {
            what: "graph",
            size: features.graph,
            multiple: 4,
        }
        .into());
    }

    if let Some(graph) = &config.graph {
        if graph.src.is_empty() {
            return Err(LoadError::MissingField("graph.src".to_string()));
        }
        ComputeGraph::from_edges(&graph.src, &graph.dst)?;
    }
    Ok(())
}
