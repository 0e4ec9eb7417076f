//! Device topology model for the Spoke placement simulator.
//!
//! A device is a grid of tiles (`rows` x `cols`), each with `spokes`
//! parallel resources. This crate describes that shape as an immutable
//! [`Topology`], enumerates its [`Coordinate`]s in a fixed row-major order,
//! and computes the physical distance and communication latency between two
//! coordinates under one of two [`Connectivity`] modes.
//!
//! # Usage
//!
//! ```
//! use spoke_topology::{Coordinate, Topology};
//!
//! let topo = Topology::new(4, 4, 3, false).unwrap();
//! assert_eq!(topo.size(), 48);
//! let a = topo.unravel(0).unwrap();
//! let b = Coordinate::new(1, 2, 0);
//! assert_eq!(topo.distance(a, b), 3);
//! assert_eq!(topo.latency(a, b), 7);
//! ```

#![warn(missing_docs)]

pub mod coordinate;
pub mod topology;

pub use coordinate::{Coordinate, Placement};
pub use topology::{Connectivity, Topology};
