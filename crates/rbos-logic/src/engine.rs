//! Timer-driven logic engine
//!
//! `LogicEngine` owns one graph and replaces it after every evaluation step.
//! It is a cheap cloneable handle: construct one explicitly and pass it to
//! whatever needs it.
//!
//! Every mutation (`set_graph` or `tick`) bumps a generation counter visible
//! through `watch()` and then calls the registered observers synchronously,
//! outside the graph lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::evaluator::{self, EvalMode};
use crate::graph::Graph;

/// Zero-argument change callback
pub type Observer = Arc<dyn Fn() + Send + Sync>;

/// Handle to a shared logic engine
#[derive(Clone)]
pub struct LogicEngine {
    inner: Arc<Inner>,
}

struct Inner {
    graph: Mutex<Graph>,
    config: EngineConfig,
    observers: Mutex<Vec<Observer>>,
    generation: watch::Sender<u64>,
    runner: Mutex<Option<Runner>>,
}

/// Running tick loop
struct Runner {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Default for LogicEngine {
    fn default() -> Self {
        Self::new(Graph::new())
    }
}

impl LogicEngine {
    /// Create an engine with the default configuration
    pub fn new(graph: Graph) -> Self {
        Self::with_config(graph, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(graph: Graph, config: EngineConfig) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                graph: Mutex::new(graph),
                config,
                observers: Mutex::new(Vec::new()),
                generation,
                runner: Mutex::new(None),
            }),
        }
    }

    /// Evaluation mode used by `tick`
    pub fn mode(&self) -> EvalMode {
        self.inner.config.mode
    }

    /// Snapshot of the held graph
    pub fn graph(&self) -> Graph {
        lock(&self.inner.graph).clone()
    }

    /// Read the held graph without cloning it
    pub fn with_graph<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        f(&lock(&self.inner.graph))
    }

    /// Replace the held graph wholesale
    pub fn set_graph(&self, graph: Graph) {
        *lock(&self.inner.graph) = graph;
        self.notify();
    }

    /// Register an observer.
    ///
    /// Returns false if this exact observer is already registered.
    pub fn subscribe(&self, observer: &Observer) -> bool {
        let mut observers = lock(&self.inner.observers);
        if observers.iter().any(|o| same_observer(o, observer)) {
            return false;
        }
        observers.push(Arc::clone(observer));
        true
    }

    /// Deregister an observer. Returns false if it was not registered.
    pub fn unsubscribe(&self, observer: &Observer) -> bool {
        let mut observers = lock(&self.inner.observers);
        let before = observers.len();
        observers.retain(|o| !same_observer(o, observer));
        observers.len() != before
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        lock(&self.inner.observers).len()
    }

    /// Channel that observes the mutation counter
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.inner.generation.subscribe()
    }

    /// Number of mutations so far
    pub fn generation(&self) -> u64 {
        *self.inner.generation.borrow()
    }

    /// Run exactly one evaluation pass and replace the held graph.
    ///
    /// On error the held graph is left unchanged and observers are not called.
    pub fn tick(&self) -> Result<(), EngineError> {
        {
            let mut graph = lock(&self.inner.graph);
            let next = evaluator::step(&graph, self.inner.config.mode)?;
            *graph = next;
        }
        self.notify();
        Ok(())
    }

    /// Start the tick loop at the configured interval
    pub fn start_default(&self) -> Result<(), EngineError> {
        self.start(self.inner.config.interval())
    }

    /// Start a repeating tick loop on the current tokio runtime.
    ///
    /// Calling this while the loop is already running does nothing.
    pub fn start(&self, interval: Duration) -> Result<(), EngineError> {
        let mut runner = lock(&self.inner.runner);
        if runner.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            debug!("tick loop already running");
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::NoRuntime)?;
        let period = interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let (stop, mut stopped) = oneshot::channel();
        let weak = Arc::downgrade(&self.inner);
        let handle = runtime.spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        let Some(inner) = weak.upgrade() else { break };
                        let engine = LogicEngine { inner };
                        if let Err(err) = engine.tick() {
                            warn!(%err, "tick failed");
                        }
                    }
                }
            }
            debug!("tick loop exited");
        });

        info!(interval_ms = period.as_millis() as u64, mode = ?self.inner.config.mode, "logic engine started");
        *runner = Some(Runner { stop, handle });
        Ok(())
    }

    /// Halt the tick loop. A tick in flight completes; no further tick runs.
    pub fn stop(&self) {
        if let Some(runner) = lock(&self.inner.runner).take() {
            let _ = runner.stop.send(());
            info!("logic engine stopped");
        }
    }

    /// Check if the tick loop is running
    pub fn is_running(&self) -> bool {
        lock(&self.inner.runner)
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    fn notify(&self) {
        self.inner.generation.send_modify(|g| *g += 1);
        let observers: Vec<Observer> = lock(&self.inner.observers).clone();
        debug!(generation = self.generation(), observers = observers.len(), "graph updated");
        for observer in observers {
            observer();
        }
    }
}

fn same_observer(a: &Observer, b: &Observer) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{Gate, GateId, GateKind, Signal};
    use crate::graph::{PinRef, Wire};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Observer) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let observer: Observer = Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, observer)
    }

    fn oscillator() -> Graph {
        let mut graph = Graph::new();
        graph.add_gate(Gate::with_kind("n", GateKind::Not)).unwrap();
        graph.connect(Wire::new(PinRef::new("n", 0), PinRef::new("n", 0))).unwrap();
        graph
    }

    #[test]
    fn test_set_graph_notifies() {
        let engine = LogicEngine::default();
        let (count, observer) = counter();
        engine.subscribe(&observer);

        engine.set_graph(oscillator());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.graph().gates().len(), 1);
    }

    #[test]
    fn test_duplicate_subscribe_is_idempotent() {
        let engine = LogicEngine::default();
        let (count, observer) = counter();
        assert!(engine.subscribe(&observer));
        assert!(!engine.subscribe(&observer));
        assert_eq!(engine.observer_count(), 1);

        engine.tick().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let engine = LogicEngine::default();
        let (count, observer) = counter();
        engine.subscribe(&observer);
        assert!(engine.unsubscribe(&observer));
        assert!(!engine.unsubscribe(&observer));

        engine.tick().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_tick_replaces_graph() {
        let engine = LogicEngine::new(oscillator());
        engine.tick().unwrap();
        assert_eq!(engine.graph().outputs(&GateId::from("n")), Some(&[Signal::High][..]));
        engine.tick().unwrap();
        assert_eq!(engine.graph().outputs(&GateId::from("n")), Some(&[Signal::Low][..]));
    }

    #[test]
    fn test_failed_tick_keeps_graph() {
        let config = EngineConfig {
            mode: EvalMode::Topological,
            ..Default::default()
        };
        let engine = LogicEngine::with_config(oscillator(), config);
        let (count, observer) = counter();
        engine.subscribe(&observer);

        assert!(engine.tick().is_err());
        assert!(engine.graph().outputs(&GateId::from("n")).is_none());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_start_without_runtime() {
        let engine = LogicEngine::default();
        assert!(matches!(
            engine.start(Duration::from_millis(10)),
            Err(EngineError::NoRuntime)
        ));
        assert!(!engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_ticks_on_interval() {
        let engine = LogicEngine::new(oscillator());
        let (count, observer) = counter();
        engine.subscribe(&observer);

        engine.start(Duration::from_millis(100)).unwrap();
        assert!(engine.is_running());
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        engine.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_runs_one_loop() {
        let engine = LogicEngine::default();
        let (count, observer) = counter();
        engine.subscribe(&observer);

        engine.start(Duration::from_millis(100)).unwrap();
        engine.start(Duration::from_millis(100)).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        engine.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_loop() {
        let engine = LogicEngine::default();
        let (count, observer) = counter();
        engine.subscribe(&observer);

        engine.start_default().unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        engine.stop();
        assert!(!engine.is_running());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        engine.start_default().unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        engine.stop();
    }

    #[tokio::test]
    async fn test_watch_sees_mutations() {
        let engine = LogicEngine::default();
        let mut rx = engine.watch();
        engine.set_graph(oscillator());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
    }
}
