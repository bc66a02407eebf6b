//! Circuit runner for RedByte OS
//!
//! Loads a circuit document (TOML or JSON), drives it on a `LogicEngine` for a
//! number of ticks and prints every gate's outputs.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use rbos_logic::{EngineConfig, EvalMode, Graph, LogicEngine};

#[derive(Parser, Debug)]
#[command(name = "circuit-runner")]
#[command(about = "Run a logic circuit on the RedByte OS engine and print gate outputs")]
struct Args {
    /// Circuit file (.toml or .json)
    #[arg(long)]
    circuit: PathBuf,

    /// Number of ticks to run
    #[arg(long, default_value_t = 10)]
    ticks: u64,

    /// Tick period; 0 runs ticks back to back without the timer loop
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Evaluation order
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Engine config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print outputs after every tick instead of only at the end
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Sequential,
    Topological,
}

impl From<ModeArg> for EvalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => EvalMode::Sequential,
            ModeArg::Topological => EvalMode::Topological,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("circuit_runner=info,rbos_logic=info")
                }),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(interval_ms) = args.interval_ms {
        config.interval_ms = interval_ms;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }

    let graph = load_circuit(&args.circuit)?;
    tracing::info!(
        gates = graph.gates().len(),
        wires = graph.wires().len(),
        mode = ?config.mode,
        "circuit loaded"
    );

    // Surface cycle errors before the timer loop starts swallowing them
    if let Err(err) = rbos_logic::step(&graph, config.mode) {
        tracing::error!(%err, "circuit cannot be evaluated");
        return Err(err.into());
    }

    let engine = LogicEngine::with_config(graph, config.clone());

    if config.interval_ms == 0 {
        for _ in 0..args.ticks {
            engine.tick()?;
            if args.trace {
                print_outputs(&engine);
            }
        }
    } else {
        run_timed(&engine, args.ticks, args.trace).await?;
    }

    if !args.trace {
        print_outputs(&engine);
    }
    Ok(())
}

/// Drive the engine's own tick loop until `ticks` steps have run
async fn run_timed(engine: &LogicEngine, ticks: u64, trace: bool) -> Result<(), Box<dyn Error>> {
    let mut changes = engine.watch();
    let start = engine.generation();
    engine.start_default()?;

    while engine.generation() - start < ticks {
        let waited = tokio::time::timeout(Duration::from_secs(5), changes.changed()).await;
        match waited {
            Ok(Ok(())) => {
                if trace {
                    print_outputs(engine);
                }
            }
            Ok(Err(_)) | Err(_) => {
                engine.stop();
                return Err("engine stopped producing ticks".into());
            }
        }
    }

    engine.stop();
    Ok(())
}

fn load_circuit(path: &Path) -> Result<Graph, Box<dyn Error>> {
    let source = std::fs::read_to_string(path)?;
    let graph = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&source)?,
        _ => toml::from_str(&source)?,
    };
    Ok(graph)
}

fn print_outputs(engine: &LogicEngine) {
    engine.with_graph(|graph| {
        println!("-- generation {}", engine.generation());
        for gate in graph.gates() {
            let values: Vec<String> = graph
                .outputs(&gate.id)
                .unwrap_or_default()
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{:>12} {:?} [{}]", gate.id, gate.kind, values.join(", "));
        }
    });
}
