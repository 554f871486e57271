//! # Pool de Workers
//! src/dispatch/worker.rs
//!
//! El lado consumidor del sistema: N workers de vida larga que drenan la
//! cola, resuelven el contenido y transmiten la respuesta en chunks.
//!
//! Cada worker es dueño exclusivo del handle de contenido, del buffer de
//! lectura y del estado de respuesta de su request actual; lo único
//! compartido es la cola. Un worker lento no bloquea a los demás.
//!
//! Máquina de estados por request:
//! RECEIVED -> RESOLVING -> HEADER_SENT -> [STREAMING -> COMPLETE | ABORTED]

use crate::content::{ContentError, ContentSource};
use crate::dispatch::queue::WorkQueue;
use crate::dispatch::types::WorkItem;
use crate::metrics::MetricsCollector;
use crate::protocol::{self, GfStatus};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Resultado terminal del procesamiento de un request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// Payload completo transmitido
    Complete { bytes_sent: u64 },
    /// La clave no existe; el cliente recibió FILE_NOT_FOUND
    NotFound,
    /// El contenido no pudo resolverse; el cliente recibió ERROR
    ResolutionFailed,
    /// Fallo de transmisión a mitad del streaming; request abandonado
    Aborted { bytes_sent: u64 },
}

impl ServeOutcome {
    /// Etiqueta para métricas
    pub fn label(&self) -> &'static str {
        match self {
            ServeOutcome::Complete { .. } => "OK",
            ServeOutcome::NotFound => "FILE_NOT_FOUND",
            ServeOutcome::ResolutionFailed => "ERROR",
            ServeOutcome::Aborted { .. } => "ABORTED",
        }
    }
}

/// Pool de workers de tamaño fijo sobre una cola compartida
pub struct WorkerPool {
    queue: WorkQueue,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Crea los N workers del pool
    ///
    /// La imposibilidad de crear un thread es fatal para el arranque:
    /// se propaga al caller, no hay modo degradado.
    pub fn spawn(
        nthreads: usize,
        chunk_size: usize,
        queue: WorkQueue,
        source: Arc<dyn ContentSource>,
        metrics: MetricsCollector,
    ) -> io::Result<Self> {
        let mut handles = Vec::with_capacity(nthreads);

        for i in 0..nthreads {
            let queue = queue.clone();
            let source = Arc::clone(&source);
            let metrics = metrics.clone();
            let name = format!("worker-{}", i);

            let handle = thread::Builder::new().name(name.clone()).spawn(move || {
                worker_loop(&name, queue, source, chunk_size, metrics);
            })?;

            handles.push(handle);
        }

        Ok(Self { queue, handles })
    }

    /// Cantidad de workers vivos
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Apaga la cola y espera a que todos los workers terminen
    ///
    /// Idempotente: una segunda llamada no hace nada. Los workers
    /// bloqueados en una cola vacía despiertan de inmediato.
    pub fn shutdown(&mut self) {
        self.queue.shutdown();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Loop principal de cada worker
fn worker_loop(
    name: &str,
    queue: WorkQueue,
    source: Arc<dyn ContentSource>,
    chunk_size: usize,
    metrics: MetricsCollector,
) {
    println!("🔧 Worker {} started", name);

    while let Some(mut item) = queue.pop() {
        metrics.worker_busy();

        let outcome = serve_request(&mut item, source.as_ref(), chunk_size, &metrics);
        metrics.record_request(outcome.label(), item.enqueued_at.elapsed());

        match outcome {
            ServeOutcome::Complete { bytes_sent } => {
                println!(
                    "✅ Worker {} completed {} ({} bytes)",
                    name, item.path, bytes_sent
                );
            }
            ServeOutcome::NotFound => {
                println!("🔍 Worker {} no content for {}", name, item.path);
            }
            ServeOutcome::ResolutionFailed => {
                println!("❌ Worker {} failed to resolve {}", name, item.path);
            }
            ServeOutcome::Aborted { bytes_sent } => {
                println!(
                    "⚠️  Worker {} aborted {} after {} bytes",
                    name, item.path, bytes_sent
                );
            }
        }

        metrics.worker_idle();
        // El drop del item cierra la conexión con el cliente
    }

    println!("🛑 Worker {} stopped", name);
}

/// Atiende un request completo: resolución, header y streaming del payload
///
/// El handle de contenido se libera en todos los caminos de salida (éxito,
/// not-found, error de metadata y aborto a mitad del stream) porque es un
/// local propio de esta función.
fn serve_request(
    item: &mut WorkItem,
    source: &dyn ContentSource,
    chunk_size: usize,
    metrics: &MetricsCollector,
) -> ServeOutcome {
    // RESOLVING: abrir el contenido por clave
    let mut handle = match source.open(&item.path) {
        Ok(handle) => handle,
        Err(ContentError::NotFound) => {
            let _ = protocol::send_header(item.ctx.connection(), GfStatus::FileNotFound, 0);
            return ServeOutcome::NotFound;
        }
        Err(ContentError::Io(_)) => {
            let _ = protocol::send_header(item.ctx.connection(), GfStatus::Error, 0);
            return ServeOutcome::ResolutionFailed;
        }
    };

    // Metadata: sin tamaño no hay header OK posible
    let size = match handle.size() {
        Ok(size) => size,
        Err(_) => {
            let _ = protocol::send_header(item.ctx.connection(), GfStatus::Error, 0);
            return ServeOutcome::ResolutionFailed;
        }
    };

    // HEADER_SENT(OK): el header precede estrictamente al payload
    if protocol::send_header(item.ctx.connection(), GfStatus::Ok, size).is_err() {
        return ServeOutcome::Aborted { bytes_sent: 0 };
    }

    // STREAMING: leer chunks avanzando por lo efectivamente leído
    let mut buffer = vec![0u8; chunk_size];
    let mut offset: u64 = 0;

    loop {
        let read = match handle.read_chunk(offset, &mut buffer) {
            Ok(0) => break, // fin del contenido
            Ok(n) => n,
            Err(_) => return ServeOutcome::Aborted { bytes_sent: offset },
        };

        if protocol::send_chunk(item.ctx.connection(), &buffer[..read]).is_err() {
            // Error de envío: terminal, sin reintentos
            return ServeOutcome::Aborted { bytes_sent: offset };
        }

        metrics.record_chunk(read);
        offset += read as u64;
    }

    ServeOutcome::Complete { bytes_sent: offset }
}
