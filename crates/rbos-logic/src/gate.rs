//! Gates, gate kinds and binary signals

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidSignal;

/// A binary signal value carried on a wire
///
/// Serialized as the integers `0` and `1`; any other integer fails to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Signal {
    #[default]
    Low,
    High,
}

impl Signal {
    /// Check if the signal is high
    #[inline]
    pub fn is_high(self) -> bool {
        self == Signal::High
    }
}

impl std::ops::Not for Signal {
    type Output = Signal;
    #[inline]
    fn not(self) -> Signal {
        match self {
            Signal::Low => Signal::High,
            Signal::High => Signal::Low,
        }
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        if value {
            Signal::High
        } else {
            Signal::Low
        }
    }
}

impl TryFrom<u8> for Signal {
    type Error = InvalidSignal;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Signal::Low),
            1 => Ok(Signal::High),
            other => Err(InvalidSignal(other)),
        }
    }
}

impl From<Signal> for u8 {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Low => 0,
            Signal::High => 1,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Unique gate identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(pub String);

impl GateId {
    /// Create a gate id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Gate truth function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    /// Placeholder for user-defined blocks; always evaluates low
    Custom,
}

impl GateKind {
    /// Apply the truth function to an input vector.
    ///
    /// Empty inputs follow the fold semantics: AND is vacuously high, OR and
    /// XOR are low. NOT reads its first input, treating a missing one as low.
    pub fn apply(self, inputs: &[Signal]) -> Signal {
        match self {
            GateKind::And => Signal::from(inputs.iter().all(|s| s.is_high())),
            GateKind::Or => Signal::from(inputs.iter().any(|s| s.is_high())),
            GateKind::Not => !inputs.first().copied().unwrap_or_default(),
            GateKind::Nand => !GateKind::And.apply(inputs),
            GateKind::Nor => !GateKind::Or.apply(inputs),
            GateKind::Xor => Signal::from(inputs.iter().fold(false, |acc, s| acc ^ s.is_high())),
            GateKind::Xnor => !GateKind::Xor.apply(inputs),
            GateKind::Custom => Signal::Low,
        }
    }

    /// Default input arity used by the constructors
    pub fn default_inputs(self) -> usize {
        match self {
            GateKind::Not => 1,
            _ => 2,
        }
    }
}

/// A gate placed in a circuit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Unique identifier
    pub id: GateId,
    /// Truth function
    pub kind: GateKind,
    /// Declared input arity
    pub inputs: usize,
    /// Declared output arity
    #[serde(default = "default_outputs")]
    pub outputs: usize,
}

fn default_outputs() -> usize {
    1
}

impl Gate {
    /// Create a gate with explicit arities
    pub fn new(id: impl Into<GateId>, kind: GateKind, inputs: usize, outputs: usize) -> Self {
        Self {
            id: id.into(),
            kind,
            inputs,
            outputs,
        }
    }

    /// Create a gate with the kind's default input arity and one output
    pub fn with_kind(id: impl Into<GateId>, kind: GateKind) -> Self {
        Self::new(id, kind, kind.default_inputs(), 1)
    }
}

impl From<String> for GateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Signal::{High, Low};

    #[test]
    fn test_and_gate() {
        assert_eq!(GateKind::And.apply(&[High, High]), High);
        assert_eq!(GateKind::And.apply(&[High, Low]), Low);
    }

    #[test]
    fn test_xor_is_parity() {
        assert_eq!(GateKind::Xor.apply(&[High, High, Low]), Low);
        assert_eq!(GateKind::Xor.apply(&[High, High, High]), High);
        assert_eq!(GateKind::Xnor.apply(&[High, Low]), Low);
    }

    #[test]
    fn test_zero_input_defaults() {
        assert_eq!(GateKind::And.apply(&[]), High);
        assert_eq!(GateKind::Or.apply(&[]), Low);
        assert_eq!(GateKind::Nand.apply(&[]), Low);
        assert_eq!(GateKind::Nor.apply(&[]), High);
        assert_eq!(GateKind::Xor.apply(&[]), Low);
        assert_eq!(GateKind::Not.apply(&[]), High);
    }

    #[test]
    fn test_not_reads_first_input() {
        assert_eq!(GateKind::Not.apply(&[High]), Low);
        assert_eq!(GateKind::Not.apply(&[Low, High]), High);
    }

    #[test]
    fn test_custom_is_always_low() {
        assert_eq!(GateKind::Custom.apply(&[High, High]), Low);
    }

    #[test]
    fn test_signal_serializes_as_integer() {
        let json = serde_json::to_string(&vec![High, Low]).unwrap();
        assert_eq!(json, "[1,0]");
        let parsed: Vec<Signal> = serde_json::from_str("[0,1,1]").unwrap();
        assert_eq!(parsed, vec![Low, High, High]);
    }

    #[test]
    fn test_signal_rejects_non_binary() {
        assert_eq!(Signal::try_from(7u8), Err(InvalidSignal(7)));
        let err = serde_json::from_str::<Vec<Signal>>("[0,7]").unwrap_err();
        assert!(err.to_string().contains("must be 0 or 1"));
    }

    #[test]
    fn test_gate_kind_names() {
        let kind: GateKind = serde_json::from_str("\"XNOR\"").unwrap();
        assert_eq!(kind, GateKind::Xnor);
    }
}
