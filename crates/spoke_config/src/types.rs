//! Configuration types deserialized from `spoke.toml`.
//!
//! Every section is optional; an empty file describes the default 4x4x3 grid
//! device with a fresh random graph per episode.

use serde::{Deserialize, Serialize};

/// The top-level configuration parsed from `spoke.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpokeConfig {
    /// Device extents and connectivity.
    #[serde(default)]
    pub device: DeviceConfig,
    /// Observation feature widths.
    #[serde(default)]
    pub features: FeatureConfig,
    /// A fixed compute graph. Absent means a random graph per episode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphConfig>,
    /// Episode settings.
    #[serde(default)]
    pub env: EnvConfig,
}

/// The `[device]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Number of tile rows.
    pub rows: u32,
    /// Number of tile columns.
    pub cols: u32,
    /// Number of spokes per tile.
    pub spokes: u32,
    /// Whether a linear device uses cross connections.
    pub cross_connections: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            spokes: 3,
            cross_connections: false,
        }
    }
}

/// The `[features]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Width of each device coordinate's encoding. Multiple of 3.
    pub device: usize,
    /// Width of each node's feature row. Multiple of 4.
    pub graph: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            device: 48,
            graph: 32,
        }
    }
}

/// The `[graph]` section: parallel edge lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Edge sources.
    pub src: Vec<u32>,
    /// Edge destinations.
    pub dst: Vec<u32>,
}

/// The `[env]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Seed of the episode rng.
    pub seed: u64,
}
