//! Pure step function over a circuit graph
//!
//! `step(graph, mode)` returns a new graph whose output mapping reflects one
//! synchronous evaluation pass. Gates and wires are never touched.
//!
//! # Modes
//!
//! - `Sequential`: gates are visited in insertion order and read from the
//!   working copy of the output mapping. A source that has not been visited
//!   yet this pass contributes its previous-step value, so forward and cyclic
//!   references settle one tick late. Never fails.
//! - `Topological`: gates are visited in dependency order and always read
//!   this pass's values. A combinational cycle is an error.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::gate::{Gate, GateId, Signal};
use crate::graph::Graph;

/// Evaluation order used by a step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    /// Insertion order with one-step-stale forward references
    #[default]
    Sequential,
    /// Dependency order; cycles are rejected
    Topological,
}

/// Run one evaluation pass.
pub fn step(graph: &Graph, mode: EvalMode) -> Result<Graph, EvalError> {
    let order: Vec<usize> = match mode {
        EvalMode::Sequential => (0..graph.gates().len()).collect(),
        EvalMode::Topological => topological_order(graph)?,
    };

    let mut values = graph.values().clone();
    for index in order {
        let gate = &graph.gates()[index];
        let inputs = gather_inputs(graph, gate, &values);
        let result = gate.kind.apply(&inputs);
        values.insert(gate.id.clone(), vec![result; gate.outputs]);
    }

    Ok(graph.with_values(values))
}

/// Build the input vector of a gate from the current values.
///
/// Later wires onto the same pin overwrite earlier ones.
fn gather_inputs(
    graph: &Graph,
    gate: &Gate,
    values: &HashMap<GateId, Vec<Signal>>,
) -> Vec<Signal> {
    let mut inputs = vec![Signal::Low; gate.inputs];
    for wire in graph.wires().iter().filter(|w| w.to.gate == gate.id) {
        let value = values
            .get(&wire.from.gate)
            .and_then(|v| v.get(wire.from.pin))
            .copied()
            .unwrap_or_default();
        if let Some(slot) = inputs.get_mut(wire.to.pin) {
            *slot = value;
        }
    }
    inputs
}

/// Kahn's algorithm over gate indices, ties broken by insertion order.
fn topological_order(graph: &Graph) -> Result<Vec<usize>, EvalError> {
    let gates = graph.gates();
    let index: HashMap<&GateId, usize> = gates.iter().enumerate().map(|(i, g)| (&g.id, i)).collect();

    let mut in_degree = vec![0usize; gates.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); gates.len()];
    for wire in graph.wires() {
        let (Some(&from), Some(&to)) = (index.get(&wire.from.gate), index.get(&wire.to.gate)) else {
            continue;
        };
        successors[from].push(to);
        in_degree[to] += 1;
    }

    let mut ready: VecDeque<usize> = (0..gates.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(gates.len());

    while let Some(i) = ready.pop_front() {
        order.push(i);
        let mut unlocked = Vec::new();
        for &next in &successors[i] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                unlocked.push(next);
            }
        }
        unlocked.sort_unstable();
        ready.extend(unlocked);
    }

    if order.len() < gates.len() {
        let gates = (0..gates.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| gates[i].id.clone())
            .collect();
        return Err(EvalError::CombinationalCycle { gates });
    }

    Ok(order)
}
