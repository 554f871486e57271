//! # Sistema de Despacho
//! src/dispatch/mod.rs
//!
//! El núcleo concurrente del servidor: la cola de trabajo thread-safe, el
//! dispatcher (lado productor) y el pool de workers (lado consumidor).
//!
//! La cola es el único punto de sincronización entre el thread que acepta
//! conexiones y los workers; ningún otro estado mutable cruza esa frontera.

pub mod dispatcher;
pub mod queue;
pub mod types;
pub mod worker;

pub use dispatcher::{DispatchError, Dispatcher};
pub use queue::{PushError, WorkQueue};
pub use types::{RequestContext, WorkItem};
pub use worker::WorkerPool;
