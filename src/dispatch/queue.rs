//! # Cola de Trabajo
//! src/dispatch/queue.rs
//!
//! Implementa la cola FIFO thread-safe entre el dispatcher y los workers.
//! Es la traducción idiomática del patrón mutex + condition variable:
//! `Mutex<VecDeque>` más dos `Condvar` (no-vacía para consumidores,
//! no-llena para productores bajo la política Block).
//!
//! Invariantes:
//! - pop es exclusivo: un item es visible para exactamente un worker
//! - FIFO: el orden de servicio respeta el orden de encolado
//! - shutdown despierta a todos los bloqueados; los items ya encolados se
//!   drenan antes de que los workers observen `None`

use crate::config::QueuePolicy;
use crate::dispatch::types::WorkItem;
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

/// Error al encolar un item
///
/// Devuelve el item para que el dispatcher pueda responder sobre su
/// conexión (el request nunca se descarta en silencio).
pub enum PushError {
    /// La cola está llena (política Reject)
    Full(WorkItem),
    /// La cola fue apagada
    Shutdown(WorkItem),
}

impl PushError {
    /// Recupera el item rechazado
    pub fn into_item(self) -> WorkItem {
        match self {
            PushError::Full(item) | PushError::Shutdown(item) => item,
        }
    }
}

impl std::fmt::Debug for PushError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushError::Full(item) => write!(f, "PushError::Full({:?})", item),
            PushError::Shutdown(item) => write!(f, "PushError::Shutdown({:?})", item),
        }
    }
}

impl std::fmt::Display for PushError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushError::Full(_) => write!(f, "work queue is full"),
            PushError::Shutdown(_) => write!(f, "work queue is shut down"),
        }
    }
}

/// Estado interno protegido por el mutex
struct QueueState {
    items: VecDeque<WorkItem>,
    shutdown: bool,
}

/// Cola FIFO thread-safe con capacidad acotada
pub struct WorkQueue {
    state: Arc<Mutex<QueueState>>,

    /// Despierta consumidores cuando llega un item
    not_empty: Arc<Condvar>,

    /// Despierta productores cuando se libera espacio (política Block)
    not_full: Arc<Condvar>,

    /// Capacidad máxima de la cola
    capacity: usize,

    /// Política cuando la cola está llena
    policy: QueuePolicy,
}

impl WorkQueue {
    /// Crea una nueva cola con capacidad y política de desborde
    pub fn new(capacity: usize, policy: QueuePolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity.min(1024)),
                shutdown: false,
            })),
            not_empty: Arc::new(Condvar::new()),
            not_full: Arc::new(Condvar::new()),
            capacity,
            policy,
        }
    }

    /// Encola un item al final de la cola
    ///
    /// Con política `Reject` retorna `Err(PushError::Full)` si no hay
    /// espacio; con política `Block` espera hasta que lo haya. En ambos
    /// casos despierta al menos un consumidor bloqueado.
    pub fn push(&self, item: WorkItem) -> Result<(), PushError> {
        let mut state = self.state.lock().unwrap();

        if state.shutdown {
            return Err(PushError::Shutdown(item));
        }

        while state.items.len() >= self.capacity {
            match self.policy {
                QueuePolicy::Reject => return Err(PushError::Full(item)),
                QueuePolicy::Block => {
                    state = self.not_full.wait(state).unwrap();
                    if state.shutdown {
                        return Err(PushError::Shutdown(item));
                    }
                }
            }
        }

        state.items.push_back(item);
        self.not_empty.notify_one();

        Ok(())
    }

    /// Desencola el item más antiguo
    ///
    /// Bloquea hasta que haya un item disponible. Retorna `None` solo
    /// cuando la cola fue apagada y ya no quedan items por drenar.
    pub fn pop(&self) -> Option<WorkItem> {
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(item) = state.items.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }

            if state.shutdown {
                return None;
            }

            state = self.not_empty.wait(state).unwrap();
        }
    }

    /// Apaga la cola: despierta a todos los bloqueados
    ///
    /// Idempotente. Los items ya encolados siguen siendo drenables.
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap();
        state.shutdown = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Verifica si la cola fue apagada
    pub fn is_shutdown(&self) -> bool {
        self.state.lock().unwrap().shutdown
    }

    /// Retorna el tamaño actual de la cola (advisory)
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    /// Verifica si la cola está vacía (advisory)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retorna la capacidad máxima
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Clone for WorkQueue {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            not_empty: Arc::clone(&self.not_empty),
            not_full: Arc::clone(&self.not_full),
            capacity: self.capacity,
            policy: self.policy,
        }
    }
}
