//! # Protocolo Getfile
//! src/protocol/mod.rs
//!
//! Implementa la capa de framing del protocolo Getfile: un header ASCII
//! `GETFILE <STATUS> <length>\r\n\r\n` seguido (solo en OK) de exactamente
//! `length` bytes de payload.
//!
//! El header siempre son los primeros bytes escritos para un request; el
//! payload se transmite en chunks por el worker que atiende el request.

pub mod framer;
pub mod header;
pub mod status;

pub use framer::{send_chunk, send_header, Connection};
pub use header::{Header, HeaderError};
pub use status::GfStatus;

/// Marcador del protocolo al inicio de cada request y response
pub const SCHEME: &str = "GETFILE";

/// Terminador del header y del request
pub const TERMINATOR: &str = "\r\n\r\n";
