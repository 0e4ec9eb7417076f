//! Parsing and validation of `spoke.toml` configuration files.
//!
//! This crate reads the project configuration file and produces a strongly-typed
//! [`SpokeConfig`], then resolves it into a [`Topology`](spoke_topology::Topology),
//! a [`GraphSource`](spoke_sim::GraphSource), and a ready-to-run
//! [`PlacementEnv`](spoke_sim::PlacementEnv).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::LoadError;
pub use loader::{load_config, load_config_from_str, validate_config, CONFIG_FILE};
pub use resolve::{build_env, resolve_device, resolve_graph};
pub use types::*;
