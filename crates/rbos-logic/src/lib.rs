//! RedByte OS Logic - gate graph simulation
//!
//! This crate holds the simulation core behind the logic-gate application.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │    Graph     │────▶│  evaluator::step │────▶│   LogicEngine    │
//! │ gates, wires │     │  pure, one pass  │     │ timer + observers│
//! │ output values│     └──────────────────┘     └──────────────────┘
//! └──────────────┘                                       │
//!                                                        ▼
//!                                               UI layer (set_graph,
//!                                               subscribe, watch)
//! ```
//!
//! # Module Organization
//!
//! - `gate` - signals, gate kinds and truth functions
//! - `graph` - validated circuit graph
//! - `evaluator` - `step(graph, mode)` in sequential or topological order
//! - `engine` - `LogicEngine` handle driving steps on a tokio interval
//! - `config` - `EngineConfig` loaded from TOML
//! - `error` - error types

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod graph;

pub use config::{EngineConfig, DEFAULT_INTERVAL_MS};
pub use engine::{LogicEngine, Observer};
pub use error::{ConfigError, EngineError, EvalError, GraphError, InvalidSignal, PinDirection};
pub use evaluator::{step, EvalMode};
pub use gate::{Gate, GateId, GateKind, Signal};
pub use graph::{Graph, GraphDocument, PinRef, Wire};
