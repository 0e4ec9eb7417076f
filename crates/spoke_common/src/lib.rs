//! Shared foundational types used across the Spoke placement simulator.
//!
//! This crate provides the error taxonomy shared by every stage (topology
//! construction, graph construction, simulation input validation), the dense
//! [`NodeId`] newtype, and dense feature matrices with sinusoidal positional
//! encoding used to build observation vectors.

#![warn(missing_docs)]

pub mod encoding;
pub mod error;
pub mod ids;

pub use encoding::{positional_encoding, FeatureMatrix, ENCODING_BASE};
pub use error::{ConfigError, ValidationError};
pub use ids::NodeId;
