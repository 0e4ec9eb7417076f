//! Shared helpers for CLI commands: project root resolution, configuration
//! loading, and diagnostic rendering.

use std::path::{Path, PathBuf};

use spoke_config::{SpokeConfig, CONFIG_FILE};
use spoke_diagnostics::{Diagnostic, DiagnosticRenderer, TerminalRenderer};

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `spoke.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `spoke.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Finds and loads the project's configuration.
pub fn load_project(global: &GlobalArgs) -> Result<SpokeConfig, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = spoke_config::load_config(&project_dir)?;
    if global.verbose {
        eprintln!("     Loaded {}", project_dir.join(CONFIG_FILE).display());
    }
    Ok(config)
}

/// Renders diagnostics to stderr using the terminal renderer.
///
/// Returns the number of diagnostics rendered.
pub fn render_diagnostics(diagnostics: &[Diagnostic], color: bool) -> usize {
    let renderer = TerminalRenderer::new(color);
    for diag in diagnostics {
        eprint!("{}", renderer.render(diag));
    }
    diagnostics.len()
}
