//! # Capa de Escucha
//! src/server/mod.rs
//!
//! El servidor TCP: acepta conexiones, decodifica el request Getfile y
//! entrega cada request al dispatcher. Es dueño del socket de escucha y
//! del ciclo de vida de las conexiones.

pub mod request;
pub mod tcp;

pub use request::{parse_request, RequestError};
pub use tcp::Server;
