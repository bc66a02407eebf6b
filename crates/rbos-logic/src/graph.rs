//! Circuit graph: gates, wires and current output values
//!
//! A `Graph` is validated whenever it is built, so every wire endpoint names a
//! placed gate and an in-range pin. Cycles are allowed; how they evaluate is
//! up to the evaluator mode.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, PinDirection};
use crate::gate::{Gate, GateId, Signal};

/// One end of a wire: a gate and a pin index on it
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinRef {
    pub gate: GateId,
    pub pin: usize,
}

impl PinRef {
    pub fn new(gate: impl Into<GateId>, pin: usize) -> Self {
        Self {
            gate: gate.into(),
            pin,
        }
    }
}

/// Directed connection from an output pin to an input pin
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire {
    /// Source gate output pin
    pub from: PinRef,
    /// Destination gate input pin
    pub to: PinRef,
}

impl Wire {
    pub fn new(from: PinRef, to: PinRef) -> Self {
        Self { from, to }
    }
}

/// Serialized form of a graph
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub gates: Vec<Gate>,
    #[serde(default)]
    pub wires: Vec<Wire>,
    #[serde(default)]
    pub values: HashMap<GateId, Vec<Signal>>,
}

/// Gates, wires and the current output vector of each gate
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphDocument", into = "GraphDocument")]
pub struct Graph {
    gates: Vec<Gate>,
    wires: Vec<Wire>,
    values: HashMap<GateId, Vec<Signal>>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from its parts, rejecting the first violation found
    pub fn from_parts(
        gates: Vec<Gate>,
        wires: Vec<Wire>,
        values: HashMap<GateId, Vec<Signal>>,
    ) -> Result<Self, GraphError> {
        let graph = Self {
            gates,
            wires,
            values,
        };
        match graph.validate().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(graph),
        }
    }

    /// Place a gate
    pub fn add_gate(&mut self, gate: Gate) -> Result<(), GraphError> {
        if self.gate(&gate.id).is_some() {
            return Err(GraphError::DuplicateGate(gate.id));
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Add a wire between two placed gates
    pub fn connect(&mut self, wire: Wire) -> Result<(), GraphError> {
        self.check_wire(&wire)?;
        self.wires.push(wire);
        Ok(())
    }

    /// Gates in insertion order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Wires in insertion order
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Look up a gate by id
    pub fn gate(&self, id: &GateId) -> Option<&Gate> {
        self.gates.iter().find(|g| &g.id == id)
    }

    /// Current output vector of a gate, if one has been recorded
    pub fn outputs(&self, id: &GateId) -> Option<&[Signal]> {
        self.values.get(id).map(Vec::as_slice)
    }

    /// Value of one output pin, reading unrecorded values as low
    pub fn output(&self, pin: &PinRef) -> Signal {
        self.values
            .get(&pin.gate)
            .and_then(|v| v.get(pin.pin))
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite the recorded outputs of a gate
    pub fn set_outputs(&mut self, id: &GateId, outputs: Vec<Signal>) -> Result<(), GraphError> {
        if self.gate(id).is_none() {
            return Err(GraphError::UnknownGate(id.clone()));
        }
        self.values.insert(id.clone(), outputs);
        Ok(())
    }

    /// All recorded output vectors
    pub fn values(&self) -> &HashMap<GateId, Vec<Signal>> {
        &self.values
    }

    /// Replace the whole output mapping, keeping gates and wires
    pub(crate) fn with_values(&self, values: HashMap<GateId, Vec<Signal>>) -> Self {
        Self {
            gates: self.gates.clone(),
            wires: self.wires.clone(),
            values,
        }
    }

    /// Check every graph invariant.
    ///
    /// Returns all violations (empty if the graph is well formed).
    pub fn validate(&self) -> Vec<GraphError> {
        let mut violations = Vec::new();

        let mut seen = HashSet::new();
        for gate in &self.gates {
            if !seen.insert(&gate.id) {
                violations.push(GraphError::DuplicateGate(gate.id.clone()));
            }
        }

        for wire in &self.wires {
            if let Err(err) = self.check_wire(wire) {
                violations.push(err);
            }
        }

        for id in self.values.keys() {
            if self.gate(id).is_none() {
                violations.push(GraphError::UnknownGate(id.clone()));
            }
        }

        violations
    }

    fn check_wire(&self, wire: &Wire) -> Result<(), GraphError> {
        let source = self
            .gate(&wire.from.gate)
            .ok_or_else(|| GraphError::UnknownGate(wire.from.gate.clone()))?;
        if wire.from.pin >= source.outputs {
            return Err(GraphError::PinOutOfRange {
                gate: source.id.clone(),
                direction: PinDirection::Output,
                pin: wire.from.pin,
                arity: source.outputs,
            });
        }

        let dest = self
            .gate(&wire.to.gate)
            .ok_or_else(|| GraphError::UnknownGate(wire.to.gate.clone()))?;
        if wire.to.pin >= dest.inputs {
            return Err(GraphError::PinOutOfRange {
                gate: dest.id.clone(),
                direction: PinDirection::Input,
                pin: wire.to.pin,
                arity: dest.inputs,
            });
        }

        Ok(())
    }
}

impl TryFrom<GraphDocument> for Graph {
    type Error = GraphError;

    fn try_from(doc: GraphDocument) -> Result<Self, Self::Error> {
        Graph::from_parts(doc.gates, doc.wires, doc.values)
    }
}

impl From<Graph> for GraphDocument {
    fn from(graph: Graph) -> Self {
        Self {
            gates: graph.gates,
            wires: graph.wires,
            values: graph.values,
        }
    }
}
