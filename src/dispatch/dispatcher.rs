//! # Dispatcher
//! src/dispatch/dispatcher.rs
//!
//! El lado productor del sistema: recibe cada request decodificado por la
//! capa de escucha, lo empaqueta en un `WorkItem` y lo entrega a la cola.
//! Nunca toca I/O de contenido; su único punto de bloqueo es el lock de la
//! cola (y la espera por espacio bajo la política Block).
//!
//! Un request jamás se descarta en silencio: si la cola lo rechaza, el
//! cliente recibe un header ERROR best-effort antes de cerrar la conexión.

use crate::dispatch::queue::{PushError, WorkQueue};
use crate::dispatch::types::{RequestContext, WorkItem};
use crate::metrics::MetricsCollector;
use crate::protocol::{self, GfStatus};

/// Errores reportados al caller del dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// La cola está llena y la política es Reject; el cliente ya recibió
    /// un header ERROR best-effort
    QueueFull,
    /// El servidor está en proceso de apagado
    ShuttingDown,
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::QueueFull => write!(f, "work queue is full, request rejected"),
            DispatchError::ShuttingDown => write!(f, "server is shutting down"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Lado productor de la cola de trabajo
pub struct Dispatcher {
    queue: WorkQueue,
    metrics: MetricsCollector,
}

impl Dispatcher {
    /// Crea un dispatcher sobre la cola compartida
    pub fn new(queue: WorkQueue, metrics: MetricsCollector) -> Self {
        Self { queue, metrics }
    }

    /// Entrega un request a la cola de trabajo
    ///
    /// Retorna inmediatamente (sin bloquear en I/O de contenido) para que
    /// la capa de escucha pueda seguir aceptando conexiones.
    pub fn dispatch(&self, ctx: RequestContext, path: String) -> Result<(), DispatchError> {
        let item = WorkItem::new(path, ctx);

        match self.queue.push(item) {
            Ok(()) => Ok(()),
            Err(err) => {
                let error = match err {
                    PushError::Full(_) => DispatchError::QueueFull,
                    PushError::Shutdown(_) => DispatchError::ShuttingDown,
                };

                // Respuesta best-effort: el cliente no queda colgado
                let mut item = err.into_item();
                let _ = protocol::send_header(item.ctx.connection(), GfStatus::Error, 0);
                self.metrics.record_rejection();

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueuePolicy;
    use crate::protocol::Connection;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Conexión de prueba que acumula lo escrito
    #[derive(Clone)]
    struct RecordingConn {
        written: Arc<Mutex<Vec<u8>>>,
    }

    impl RecordingConn {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let written = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    written: Arc::clone(&written),
                },
                written,
            )
        }
    }

    impl Connection for RecordingConn {
        fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    fn ctx(conn: RecordingConn) -> RequestContext {
        RequestContext::new(Box::new(conn), "test")
    }

    #[test]
    fn test_dispatch_enqueues_item() {
        let queue = WorkQueue::new(16, QueuePolicy::Reject);
        let dispatcher = Dispatcher::new(queue.clone(), MetricsCollector::new());

        let (conn, _) = RecordingConn::new();
        dispatcher.dispatch(ctx(conn), "/a.txt".to_string()).unwrap();

        let item = queue.pop().unwrap();
        assert_eq!(item.path, "/a.txt");
    }

    #[test]
    fn test_dispatch_preserves_arrival_order() {
        let queue = WorkQueue::new(16, QueuePolicy::Reject);
        let dispatcher = Dispatcher::new(queue.clone(), MetricsCollector::new());

        for i in 0..5 {
            let (conn, _) = RecordingConn::new();
            dispatcher.dispatch(ctx(conn), format!("/{}", i)).unwrap();
        }

        for i in 0..5 {
            assert_eq!(queue.pop().unwrap().path, format!("/{}", i));
        }
    }

    #[test]
    fn test_dispatch_rejects_when_full() {
        let queue = WorkQueue::new(1, QueuePolicy::Reject);
        let metrics = MetricsCollector::new();
        let dispatcher = Dispatcher::new(queue.clone(), metrics.clone());

        let (conn1, _) = RecordingConn::new();
        dispatcher.dispatch(ctx(conn1), "/ok".to_string()).unwrap();

        let (conn2, written) = RecordingConn::new();
        let result = dispatcher.dispatch(ctx(conn2), "/busy".to_string());

        assert_eq!(result, Err(DispatchError::QueueFull));

        // El cliente rechazado recibe un header ERROR, nunca queda colgado
        assert_eq!(&*written.lock().unwrap(), b"GETFILE ERROR 0\r\n\r\n");
        assert_eq!(metrics.snapshot().queue_rejections, 1);
    }

    #[test]
    fn test_dispatch_after_shutdown() {
        let queue = WorkQueue::new(16, QueuePolicy::Reject);
        let dispatcher = Dispatcher::new(queue.clone(), MetricsCollector::new());
        queue.shutdown();

        let (conn, written) = RecordingConn::new();
        let result = dispatcher.dispatch(ctx(conn), "/late".to_string());

        assert_eq!(result, Err(DispatchError::ShuttingDown));
        assert_eq!(&*written.lock().unwrap(), b"GETFILE ERROR 0\r\n\r\n");
    }
}
