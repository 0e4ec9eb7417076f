//! Resolution of a parsed configuration into simulator objects.

use crate::types::SpokeConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spoke_common::ConfigError;
use spoke_sim::{GraphSource, PlacementEnv};
use spoke_topology::Topology;

/// Builds the device described by `[device]`.
pub fn resolve_device(config: &SpokeConfig) -> Result<Topology, ConfigError> {
    let d = &config.device;
    Topology::new(d.rows, d.cols, d.spokes, d.cross_connections)
}

/// The graph source described by `[graph]`.
pub fn resolve_graph(config: &SpokeConfig) -> GraphSource {
    match &config.graph {
        Some(g) => GraphSource::Fixed {
            src: g.src.clone(),
            dst: g.dst.clone(),
        },
        None => GraphSource::Random,
    }
}

/// Builds a placement environment seeded from `[env]`.
pub fn build_env(config: &SpokeConfig) -> Result<PlacementEnv, ConfigError> {
    PlacementEnv::new(
        resolve_graph(config),
        resolve_device(config)?,
        config.features.device,
        config.features.graph,
        StdRng::seed_from_u64(config.env.seed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;
    use spoke_topology::Connectivity;

    #[test]
    fn default_device() {
        let topo = resolve_device(&SpokeConfig::default()).unwrap();
        assert_eq!(topo.extents(), [4, 4, 3]);
        assert_eq!(topo.connectivity(), Connectivity::Grid);
    }

    #[test]
    fn cross_connected_device() {
        let config = load_config_from_str("[device]\nrows = 1\ncols = 6\ncross_connections = true\n")
            .unwrap();
        let topo = resolve_device(&config).unwrap();
        assert_eq!(topo.connectivity(), Connectivity::LinearCrossConnected);
    }

    #[test]
    fn graph_source_selection() {
        assert_eq!(resolve_graph(&SpokeConfig::default()), GraphSource::Random);
        let config = load_config_from_str("[graph]\nsrc = [0]\ndst = [1]\n").unwrap();
        assert_eq!(
            resolve_graph(&config),
            GraphSource::Fixed {
                src: vec![0],
                dst: vec![1]
            }
        );
    }

    #[test]
    fn env_from_config() {
        let config = load_config_from_str(
            "[features]\ndevice = 12\ngraph = 8\n[graph]\nsrc = [0, 1]\ndst = [1, 2]\n",
        )
        .unwrap();
        let env = build_env(&config).unwrap();
        let obs = env.obs();
        assert_eq!(obs.graph.node_count(), 3);
        assert_eq!(obs.node_features.cols(), 8);
        assert_eq!(obs.device_encoding.cols(), 12);
        assert_eq!(obs.device_encoding.rows(), 48);
    }
}
