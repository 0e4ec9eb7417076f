//! Outcome diagnostics.
//!
//! Turns a finished [`Simulation`] into structured diagnostics on a
//! [`DiagnosticSink`]. Nothing here affects readiness or rewards.

use crate::assignment::Assignment;
use crate::readiness::Readiness;
use crate::simulate::Simulation;
use spoke_common::NodeId;
use spoke_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use spoke_topology::{Placement, Topology};

/// A placed node whose inputs arrive on a different spoke.
pub const SPOKE_CONFLICT: DiagnosticCode = DiagnosticCode {
    category: Category::Timing,
    number: 1,
};

/// Every node became ready.
pub const ALL_READY: DiagnosticCode = DiagnosticCode {
    category: Category::Timing,
    number: 2,
};

/// A placed node waits on a predecessor that never became ready.
pub const BLOCKED_NODE: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 1,
};

/// Some nodes were left unplaced.
pub const UNPLACED_NODES: DiagnosticCode = DiagnosticCode {
    category: Category::Placement,
    number: 1,
};

/// Emits one diagnostic per notable node outcome, plus run-level summaries.
///
/// `assignment` must be the assignment `simulation` was computed from.
pub fn report_outcome(
    simulation: &Simulation,
    assignment: &Assignment,
    topology: &Topology,
    sink: &DiagnosticSink,
) {
    let spokes = i64::from(topology.spokes());
    let mut unplaced = 0usize;

    let nodes = (0u32..).map(NodeId::from_raw);
    for (node, state) in nodes.zip(simulation.readiness.iter()) {
        match (state, assignment.get(node)) {
            (Readiness::Infeasible, Placement::Placed(c)) => {
                let arrival = simulation.arrival(node).unwrap_or_default();
                let reached = arrival.rem_euclid(spokes);
                sink.emit(
                    Diagnostic::warning(SPOKE_CONFLICT, format!("spoke conflict at node {node}"))
                        .at_node(node)
                        .with_note(format!(
                            "inputs arrive at t={arrival}, which maps to spoke {reached}; the node is on spoke {}",
                            c.spoke
                        ))
                        .with_help(format!(
                            "move the node to spoke {reached} at ({}, {})",
                            c.row, c.col
                        )),
                );
            }
            (Readiness::Unplaced, Placement::Placed(_)) => {
                sink.emit(
                    Diagnostic::warning(
                        BLOCKED_NODE,
                        format!("node {node} is placed but blocked by an unready predecessor"),
                    )
                    .at_node(node),
                );
            }
            (Readiness::Unplaced, Placement::Unplaced) => unplaced += 1,
            _ => {}
        }
    }

    if unplaced > 0 {
        sink.emit(Diagnostic::note(
            UNPLACED_NODES,
            format!(
                "{unplaced} of {} nodes left unplaced",
                simulation.readiness.len()
            ),
        ));
    }

    if simulation.readiness.all_ready() {
        let times: Vec<String> = simulation
            .readiness
            .iter()
            .filter_map(Readiness::time)
            .map(|t| t.to_string())
            .collect();
        let mut diag = Diagnostic::note(ALL_READY, "all nodes ready")
            .with_note(format!("ready times: [{}]", times.join(", ")));
        if let Some(makespan) = simulation.readiness.makespan() {
            diag = diag.with_note(format!("makespan: {makespan}"));
        }
        sink.emit(diag);
    }
}
