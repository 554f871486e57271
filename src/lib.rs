//! # Getfile Server
//! src/lib.rs
//!
//! Servidor de archivos Getfile concurrente implementado desde cero para
//! demostrar conceptos de sistemas operativos: concurrencia, sincronización,
//! productores/consumidores y manejo de recursos.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `protocol`: Codificación del protocolo Getfile (header estado + longitud)
//! - `content`: Resolución de claves a archivos de contenido
//! - `dispatch`: Cola de trabajo, dispatcher y pool de workers
//! - `server`: Lógica del servidor TCP y decodificación de requests
//! - `metrics`: Recolección de métricas y observabilidad
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use gf_server::server::Server;
//! use gf_server::config::Config;
//!
//! let config = Config::default();
//! let mut server = Server::new(config).expect("Error al iniciar servidor");
//! server.run().expect("Error fatal del servidor");
//! ```

pub mod config;
pub mod content;
pub mod dispatch;
pub mod metrics;
pub mod protocol;
pub mod server;
