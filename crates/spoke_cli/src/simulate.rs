//! `spoke simulate` — score one assignment.
//!
//! 1. Find project root and load `spoke.toml`
//! 2. Build the episode environment (device, graph, features)
//! 3. Step it once with the given flat coordinate indices
//! 4. Print per-node readiness and reward, then the outcome diagnostics

use spoke_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
use spoke_graph::ComputeGraph;
use spoke_sim::{PlacementEnv, Simulation};

use crate::pipeline::{load_project, render_diagnostics};
use crate::{GlobalArgs, ReportFormat, SimulateArgs};

/// The simulator rejected the assignment.
pub const INVALID_ASSIGNMENT: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 1,
};

/// The project could not be loaded into an environment.
pub const INVALID_PROJECT: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 2,
};

/// Runs the `spoke simulate` command.
///
/// Returns exit code 0 once the simulation completes, whatever the node
/// outcomes. Malformed input or configuration is reported as an error
/// diagnostic and exits with 1.
pub fn run(args: &SimulateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let env = simulate_project(&args.assignment, global, &sink);
    let finished = env
        .as_ref()
        .and_then(|env| Some((env, env.last_simulation()?)));
    let diagnostics = sink.take_all();

    match args.format {
        ReportFormat::Text => {
            if let Some((env, sim)) = finished {
                print!("{}", format_table(env.graph(), sim));
            }
            if !global.quiet || sink.has_errors() {
                render_diagnostics(&diagnostics, global.color);
            }
            if let (false, Some((_, sim))) = (global.quiet, finished) {
                let warnings = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Warning)
                    .count();
                eprintln!(
                    "   Result: {} of {} node(s) ready, {} warning(s), total reward {:.3}",
                    sim.readiness.count(|r| r.is_ready()),
                    sim.readiness.len(),
                    warnings,
                    sim.rewards.total()
                );
            }
        }
        ReportFormat::Json => match finished {
            Some((env, sim)) => println!("{}", to_json(env.graph(), sim, &diagnostics)?),
            None => println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "diagnostics": diagnostics }))?
            ),
        },
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// Loads the project, builds its environment and steps it once.
///
/// Failures are emitted as error diagnostics; the environment is returned
/// only when the step completed.
fn simulate_project(
    assignment: &[i64],
    global: &GlobalArgs,
    sink: &DiagnosticSink,
) -> Option<PlacementEnv> {
    let loaded = load_project(global).and_then(|config| Ok(spoke_config::build_env(&config)?));
    let mut env = match loaded {
        Ok(env) => env,
        Err(err) => {
            sink.emit(Diagnostic::error(INVALID_PROJECT, err.to_string()));
            return None;
        }
    };

    if global.verbose {
        let graph = env.graph();
        eprintln!("     Device {}", env.topology());
        eprintln!(
            "      Graph {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
    }

    if let Err(err) = env.step(assignment, sink) {
        sink.emit(
            Diagnostic::error(INVALID_ASSIGNMENT, err.to_string()).with_help(format!(
                "pass {} comma-separated flat indices, -1 to leave a node unplaced",
                env.graph().node_count()
            )),
        );
        return None;
    }
    Some(env)
}

/// One line per node: id, placement, readiness, reward.
fn format_table(graph: &ComputeGraph, sim: &Simulation) -> String {
    let mut out = format!("{:>4}  {:<10}  {:<10}  {:>8}\n", "node", "placement", "state", "reward");
    for node in graph.nodes() {
        out.push_str(&format!(
            "{:>4}  {:<10}  {:<10}  {:>8.3}\n",
            node.as_raw(),
            graph.placement(node).to_string(),
            sim.readiness.get(node).to_string(),
            sim.rewards.get(node)
        ));
    }
    out
}

fn to_json(
    graph: &ComputeGraph,
    sim: &Simulation,
    diagnostics: &[Diagnostic],
) -> Result<String, serde_json::Error> {
    let nodes: Vec<serde_json::Value> = graph
        .nodes()
        .map(|node| {
            serde_json::json!({
                "node": node,
                "placement": graph.placement(node),
                "readiness": sim.readiness.get(node),
                "arrival": sim.arrival(node),
                "reward": sim.rewards.get(node),
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "nodes": nodes,
        "total_reward": sim.rewards.total(),
        "makespan": sim.readiness.makespan(),
        "diagnostics": diagnostics,
    }))
}
