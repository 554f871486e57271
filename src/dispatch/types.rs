//! # Tipos del Sistema de Despacho
//! src/dispatch/types.rs
//!
//! Define la unidad de trabajo pendiente y el contexto opaco de la conexión
//! que la originó.

use crate::protocol::Connection;
use std::time::Instant;

/// Contexto opaco de la conexión que originó un request
///
/// Es dueño del lado de escritura de la conexión; al hacer drop se cierra
/// la conexión con el cliente. El worker lo toma prestado durante el
/// procesamiento y lo descarta al completar la respuesta.
pub struct RequestContext {
    conn: Box<dyn Connection>,
    peer: String,
}

impl RequestContext {
    /// Crea un contexto a partir de una conexión y una etiqueta del peer
    pub fn new(conn: Box<dyn Connection>, peer: impl Into<String>) -> Self {
        Self {
            conn,
            peer: peer.into(),
        }
    }

    /// Etiqueta del peer (para logging)
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Acceso a la conexión para escribir la respuesta
    pub fn connection(&mut self) -> &mut dyn Connection {
        self.conn.as_mut()
    }
}

/// Unidad de trabajo pendiente en la cola
///
/// Creado por el dispatcher al llegar el request; destruido por el worker
/// después de enviar la respuesta completa (éxito o error).
pub struct WorkItem {
    /// Clave de contenido pedida por el cliente, inmutable una vez encolada
    pub path: String,

    /// Contexto de la conexión originante
    pub ctx: RequestContext,

    /// Momento en que el request entró a la cola (para latencias)
    pub enqueued_at: Instant,
}

impl WorkItem {
    /// Crea un nuevo item de trabajo
    pub fn new(path: String, ctx: RequestContext) -> Self {
        Self {
            path,
            ctx,
            enqueued_at: Instant::now(),
        }
    }
}

impl std::fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkItem")
            .field("path", &self.path)
            .field("peer", &self.ctx.peer)
            .finish()
    }
}
