//! `spoke topology` — inspect the configured device.
//!
//! Prints every coordinate with its flat index, and with `--latency-from`
//! the distance and latency from one coordinate to each of the others.

use spoke_topology::{Coordinate, Topology};

use crate::pipeline::load_project;
use crate::{GlobalArgs, TopologyArgs};

/// Runs the `spoke topology` command.
pub fn run(args: &TopologyArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_project(global)?;
    let topology = spoke_config::resolve_device(&config)?;

    let origin = match args.latency_from {
        Some(flat) => Some(topology.unravel(flat).ok_or_else(|| {
            format!(
                "--latency-from {flat} is outside the {} coordinates of the device",
                topology.size()
            )
        })?),
        None => None,
    };

    if !global.quiet {
        eprintln!(
            "     Device {topology}, {} coordinates, max_dist {}",
            topology.size(),
            topology.max_dist()
        );
    }
    print!("{}", format_coordinates(&topology, origin));
    Ok(0)
}

fn format_coordinates(topology: &Topology, origin: Option<Coordinate>) -> String {
    let mut out = match origin {
        Some(o) => format!("{:>5}  {:<10}  {:>8}  {:>7}   (from {o})\n", "flat", "coordinate", "distance", "latency"),
        None => format!("{:>5}  {:<10}\n", "flat", "coordinate"),
    };
    for (flat, c) in topology.coordinates().enumerate() {
        match origin {
            Some(o) => out.push_str(&format!(
                "{:>5}  {:<10}  {:>8}  {:>7}\n",
                flat,
                c.to_string(),
                topology.distance(o, c),
                topology.latency(o, c)
            )),
            None => out.push_str(&format!("{:>5}  {:<10}\n", flat, c.to_string())),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn global(dir: &TempDir) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.path().display().to_string()),
        }
    }

    #[test]
    fn enumerates_row_major() {
        let topo = Topology::new(2, 2, 3, false).unwrap();
        let text = format_coordinates(&topo, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[1].contains("(0, 0, 0)"));
        assert!(lines[4].trim_start().starts_with('3') && lines[4].contains("(0, 1, 0)"));
        assert!(lines[12].contains("(1, 1, 2)"));
    }

    #[test]
    fn latency_column() {
        let topo = Topology::new(1, 4, 2, true).unwrap();
        let origin = topo.unravel(0);
        let text = format_coordinates(&topo, origin);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("(from (0, 0, 0))"));
        // same tile: distance 0, latency -2 under cross connections
        let same_tile: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(same_tile[same_tile.len() - 2..], ["0", "-2"]);
        // three tiles away: latency 4
        let far: Vec<&str> = lines[7].split_whitespace().collect();
        assert_eq!(far[far.len() - 2..], ["3", "4"]);
    }

    #[test]
    fn runs_against_project() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("spoke.toml"), "[device]\nrows = 2\n").unwrap();
        let args = TopologyArgs {
            latency_from: Some(5),
        };
        assert_eq!(run(&args, &global(&tmp)).unwrap(), 0);
    }

    #[test]
    fn latency_origin_out_of_range() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("spoke.toml"), "").unwrap();
        let args = TopologyArgs {
            latency_from: Some(48),
        };
        let err = run(&args, &global(&tmp)).unwrap_err();
        assert!(err.to_string().contains("outside the 48 coordinates"));
    }
}
