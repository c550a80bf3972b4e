//! Execution context for ManipuRust operations.
//!
//! Operations are mode-agnostic: they ask the ambient context whether the
//! process is running eagerly (compute now, on concrete data) or deferred
//! (record an operation node into the context's graph and return a
//! placeholder). The ambient context is thread-local: graph construction is
//! a single-threaded activity, and each thread builds against its own graph.

use std::cell::RefCell;
use std::sync::{Arc, RwLock};

use crate::graph::Graph;

/// Execution context carrying the mode flag and the ambient graph.
pub struct Context {
    /// Eager execution mode: kernels run immediately against concrete data.
    eager: bool,
    /// The graph populated by operations while this context is deferred.
    graph: Arc<RwLock<Graph>>,
}

impl Context {
    /// Create an eager (immediate-execution) context.
    pub fn eager() -> Self {
        Self {
            eager: true,
            graph: Arc::new(RwLock::new(Graph::new())),
        }
    }

    /// Create a deferred (graph-construction) context with a fresh graph.
    pub fn deferred() -> Self {
        Self {
            eager: false,
            graph: Arc::new(RwLock::new(Graph::new())),
        }
    }

    /// Check if eager execution is enabled.
    pub fn is_eager(&self) -> bool {
        self.eager
    }

    /// The graph this context records into (shared handle).
    pub fn graph(&self) -> Arc<RwLock<Graph>> {
        Arc::clone(&self.graph)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::eager()
    }
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Arc<Context>> = RefCell::new(Arc::new(Context::eager()));
}

/// Get the current ambient context for this thread.
pub fn get_context() -> Arc<Context> {
    THREAD_CONTEXT.with(|ctx| Arc::clone(&ctx.borrow()))
}

/// Replace the ambient context for this thread.
pub fn set_context(context: Arc<Context>) {
    THREAD_CONTEXT.with(|ctx| *ctx.borrow_mut() = context);
}

/// Scope guard that switches the ambient context into deferred graph
/// construction and restores the previous context on drop.
///
/// ```
/// use manipurust_core::context::{get_context, GraphScope};
///
/// assert!(get_context().is_eager());
/// {
///     let scope = GraphScope::new();
///     assert!(!get_context().is_eager());
///     let _graph = scope.graph();
/// }
/// assert!(get_context().is_eager());
/// ```
pub struct GraphScope {
    previous: Arc<Context>,
    context: Arc<Context>,
}

impl GraphScope {
    /// Enter deferred mode with a fresh graph.
    pub fn new() -> Self {
        let previous = get_context();
        let context = Arc::new(Context::deferred());
        log::trace!("entering deferred graph scope");
        set_context(Arc::clone(&context));
        Self { previous, context }
    }

    /// The graph being recorded by this scope.
    pub fn graph(&self) -> Arc<RwLock<Graph>> {
        self.context.graph()
    }
}

impl Default for GraphScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for GraphScope {
    fn drop(&mut self) {
        log::trace!("leaving deferred graph scope");
        set_context(Arc::clone(&self.previous));
    }
}
