//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que acepta conexiones y despacha cada
//! request al pool de workers. El loop de accept nunca bloquea en I/O de
//! contenido: decodifica el request, arma el contexto y lo entrega al
//! dispatcher, que retorna de inmediato.

use crate::config::Config;
use crate::content::FileStore;
use crate::dispatch::{Dispatcher, RequestContext, WorkQueue, WorkerPool};
use crate::metrics::MetricsCollector;
use crate::protocol::{self, GfStatus, TERMINATOR};
use crate::server::request::parse_request;
use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

/// Tamaño máximo del request entrante
const MAX_REQUEST_BYTES: usize = 4096;

/// Servidor Getfile concurrente con pool de workers y métricas
pub struct Server {
    config: Config,
    dispatcher: Dispatcher,
    pool: WorkerPool,
    metrics: MetricsCollector,
    listener: Option<TcpListener>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("config", &self.config)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

impl Server {
    /// Construye el servidor: carga el mapeo de contenido y crea el pool
    ///
    /// Cualquier fallo aquí es fatal para el arranque; no hay modo
    /// degradado.
    pub fn new(config: Config) -> Result<Self, String> {
        config.validate()?;

        let store = FileStore::from_mapping_file(&config.content_map).map_err(|e| {
            format!("cannot load content map '{}': {}", config.content_map, e)
        })?;

        println!("📁 Content map loaded: {} keys", store.len());

        let queue = WorkQueue::new(config.queue_capacity, config.queue_policy);
        let metrics = MetricsCollector::new();

        let pool = WorkerPool::spawn(
            config.nthreads,
            config.chunk_size,
            queue.clone(),
            Arc::new(store),
            metrics.clone(),
        )
        .map_err(|e| format!("cannot spawn worker pool: {}", e))?;

        let dispatcher = Dispatcher::new(queue, metrics.clone());

        Ok(Self {
            config,
            dispatcher,
            pool,
            metrics,
            listener: None,
        })
    }

    /// Hace bind del socket de escucha
    pub fn bind(&mut self) -> std::io::Result<()> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", address);

        self.listener = Some(listener);
        Ok(())
    }

    /// Dirección real del socket (útil con puerto 0 en tests)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Acceso al collector de métricas
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Arranca el servidor: bind (si hace falta) + loop de accept
    pub fn run(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        self.serve_forever()
    }

    /// Loop de accept: una iteración por conexión entrante
    pub fn serve_forever(&mut self) -> std::io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotConnected, "not bound"))?;

        println!("[*] Pool de {} workers listo\n", self.config.nthreads);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    self.handle_connection(stream);
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Apaga el pool de workers (idempotente)
    pub fn shutdown(&mut self) {
        self.pool.shutdown();
    }

    /// Lee y decodifica un request, y lo entrega al dispatcher
    fn handle_connection(&self, mut stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        if self.config.write_timeout_ms > 0 {
            let timeout = Duration::from_millis(self.config.write_timeout_ms);
            let _ = stream.set_write_timeout(Some(timeout));
        }

        let raw = match read_request(&mut stream) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("   ❌ Error leyendo request de {}: {}", peer, e);
                return;
            }
        };

        if raw.is_empty() {
            // El peer cerró sin enviar nada
            return;
        }

        match parse_request(&raw) {
            Ok(path) => {
                println!("   ✅ {} GET {}", peer, path);
                let ctx = RequestContext::new(Box::new(stream), peer.clone());

                // El dispatcher ya respondió ERROR si rechazó el request
                if let Err(e) = self.dispatcher.dispatch(ctx, path) {
                    eprintln!("   🚦 Request de {} rechazado: {}", peer, e);
                }
            }
            Err(e) => {
                println!("   ❌ Request inválido de {}: {}", peer, e);
                let _ = protocol::send_header(&mut stream, GfStatus::Error, 0);
            }
        }
    }
}

/// Lee del socket hasta encontrar el terminador del request
fn read_request(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut raw = Vec::new();
    let mut buffer = [0u8; 1024];

    loop {
        let n = stream.read(&mut buffer)?;
        if n == 0 {
            return Ok(raw);
        }

        raw.extend_from_slice(&buffer[..n]);

        if contains_terminator(&raw) || raw.len() >= MAX_REQUEST_BYTES {
            return Ok(raw);
        }
    }
}

fn contains_terminator(raw: &[u8]) -> bool {
    raw.windows(TERMINATOR.len())
        .any(|w| w == TERMINATOR.as_bytes())
}
