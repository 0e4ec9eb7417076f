//! Diagnostic rendering backends for human-readable output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[T001]: spoke conflict at node 7
///   --> node 7
///    = note: inputs arrive at t=13, which maps to spoke 1; the node is on spoke 0
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let label = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return label;
        }
        let ansi = match diag.severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Note => "36",
        };
        format!("\x1b[1;{ansi}m{label}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);

        if let Some(node) = diag.node {
            out.push_str(&format!("  --> node {node}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use spoke_common::NodeId;

    #[test]
    fn render_warning_with_node_and_notes() {
        let diag = Diagnostic::warning(DiagnosticCode::new(Category::Timing, 1), "spoke conflict")
            .at_node(NodeId::from_raw(7))
            .with_note("arrival 13 maps to spoke 1")
            .with_help("move node 7 to spoke 1");

        let output = TerminalRenderer::new(false).render(&diag);

        assert!(output.starts_with("warning[T001]: spoke conflict\n"));
        assert!(output.contains("--> node 7"));
        assert!(output.contains("= note: arrival 13 maps to spoke 1"));
        assert!(output.contains("= help: move node 7 to spoke 1"));
    }

    #[test]
    fn render_without_node() {
        let diag = Diagnostic::note(DiagnosticCode::new(Category::Timing, 2), "all nodes ready");
        let output = TerminalRenderer::new(false).render(&diag);
        assert_eq!(output, "note[T002]: all nodes ready\n");
    }

    #[test]
    fn render_colored_header() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 1), "bad input");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;31merror[E001]\x1b[0m: bad input"));
    }
}
