//! `spoke init` — project scaffolding command.
//!
//! Creates a project directory with a `spoke.toml` describing the default
//! 4x4x3 grid device and the ten-node example graph.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use spoke_config::CONFIG_FILE;

use crate::GlobalArgs;

const TEMPLATE: &str = r#"# Device extents. Cross connections need rows = 1 or cols = 1.
[device]
rows = 4
cols = 4
spokes = 3
cross_connections = false

# Observation widths: device a multiple of 3, graph a multiple of 4.
[features]
device = 48
graph = 32

# Fixed compute graph as parallel edge lists.
# Remove this section to draw a random graph each episode.
[graph]
src = [0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8]
dst = [1, 2, 3, 4, 5, 6, 7, 7, 8, 8, 9]

[env]
seed = 0
"#;

/// Runs the `spoke init` command.
///
/// If `name` is `Some`, creates a new subdirectory with that name.
/// Otherwise initializes in the current working directory.
/// Returns exit code 0 on success.
pub fn run(name: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = match &name {
        Some(n) => {
            let dir = PathBuf::from(n);
            if dir.exists() {
                return Err(format!("directory '{n}' already exists").into());
            }
            fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };

    if project_dir.join(CONFIG_FILE).exists() {
        return Err(format!("{CONFIG_FILE} already exists in {}", project_dir.display()).into());
    }

    let project_name = project_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("spoke_project");

    if !global.quiet {
        eprintln!("  Creating new Spoke project `{project_name}`");
    }

    write_config(&project_dir)?;

    if !global.quiet {
        eprintln!("     Created {}", project_dir.join(CONFIG_FILE).display());
    }

    Ok(0)
}

/// Writes the template `spoke.toml`.
fn write_config(root: &Path) -> io::Result<()> {
    fs::write(root.join(CONFIG_FILE), TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        }
    }

    #[test]
    fn init_creates_config() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("device_a");
        let code = run(Some(project_dir.to_str().unwrap().to_string()), &quiet()).unwrap();
        assert_eq!(code, 0);
        assert!(project_dir.join("spoke.toml").is_file());
    }

    #[test]
    fn template_is_valid_config() {
        let config = spoke_config::load_config_from_str(TEMPLATE).unwrap();
        assert_eq!(config.device.rows, 4);
        let graph = config.graph.unwrap();
        assert_eq!(graph.src.len(), 11);
        assert_eq!(graph.dst[10], 9);
    }

    #[test]
    fn init_existing_dir_error() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("exists");
        fs::create_dir_all(&project_dir).unwrap();
        let result = run(Some(project_dir.to_str().unwrap().to_string()), &quiet());
        assert!(result.is_err());
    }

    #[test]
    fn write_config_in_existing_dir() {
        let tmp = TempDir::new().unwrap();
        write_config(tmp.path()).unwrap();
        let config = spoke_config::load_config(tmp.path()).unwrap();
        assert_eq!(config.features.graph, 32);
    }
}
