//! Error types for the logic engine.

use crate::gate::GateId;

/// Errors raised while building or validating a graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A gate with this id is already placed.
    #[error("duplicate gate id: {0}")]
    DuplicateGate(GateId),

    /// A wire endpoint references a gate that does not exist.
    #[error("wire references unknown gate: {0}")]
    UnknownGate(GateId),

    /// A wire endpoint names a pin beyond the gate's declared arity.
    #[error("pin {pin} out of range for {direction} of gate {gate} (arity {arity})")]
    PinOutOfRange {
        gate: GateId,
        direction: PinDirection,
        pin: usize,
        arity: usize,
    },
}

/// Which side of a gate a pin belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinDirection {
    Input,
    Output,
}

impl std::fmt::Display for PinDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinDirection::Input => f.write_str("inputs"),
            PinDirection::Output => f.write_str("outputs"),
        }
    }
}

/// A stored signal value other than 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("signal must be 0 or 1, got {0}")]
pub struct InvalidSignal(pub u8);

/// Errors raised by a single evaluation step.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Topological evaluation found gates that feed back into themselves.
    #[error("combinational cycle through gates {}", join_ids(.gates))]
    CombinationalCycle { gates: Vec<GateId> },
}

/// Errors surfaced by the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),

    /// `start` was called outside a tokio runtime.
    #[error("no tokio runtime available to drive the tick loop")]
    NoRuntime,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),
}

fn join_ids(ids: &[GateId]) -> String {
    ids.iter()
        .map(GateId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_gates() {
        let err = EvalError::CombinationalCycle {
            gates: vec![GateId::from("a"), GateId::from("b")],
        };
        assert_eq!(err.to_string(), "combinational cycle through gates a, b");
    }

    #[test]
    fn test_pin_out_of_range_message() {
        let err = GraphError::PinOutOfRange {
            gate: GateId::from("g1"),
            direction: PinDirection::Input,
            pin: 3,
            arity: 2,
        };
        assert_eq!(
            err.to_string(),
            "pin 3 out of range for inputs of gate g1 (arity 2)"
        );
    }
}
