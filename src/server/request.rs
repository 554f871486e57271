//! # Decodificación del Request
//! src/server/request.rs
//!
//! Parsea la línea de request del protocolo Getfile:
//!
//! ```text
//! GETFILE GET <path>\r\n\r\n
//! ```
//!
//! El path debe empezar con `/`. Cualquier desviación produce un error y
//! el cliente recibe un header ERROR.

use crate::protocol::{SCHEME, TERMINATOR};

/// Errores al decodificar un request entrante
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// No termina en `\r\n\r\n`
    MissingTerminator,
    /// No empieza con el marcador GETFILE
    BadScheme,
    /// El verbo no es GET
    BadVerb,
    /// Path ausente o que no empieza con `/`
    BadPath,
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::MissingTerminator => write!(f, "request missing terminator"),
            RequestError::BadScheme => write!(f, "request does not start with {}", SCHEME),
            RequestError::BadVerb => write!(f, "unsupported request verb"),
            RequestError::BadPath => write!(f, "missing or invalid path"),
        }
    }
}

impl std::error::Error for RequestError {}

/// Decodifica el request y retorna la clave de contenido pedida
pub fn parse_request(raw: &[u8]) -> Result<String, RequestError> {
    let text = String::from_utf8_lossy(raw);
    let end = text
        .find(TERMINATOR)
        .ok_or(RequestError::MissingTerminator)?;

    let line = &text[..end];
    let mut parts = line.split_ascii_whitespace();

    if parts.next() != Some(SCHEME) {
        return Err(RequestError::BadScheme);
    }

    if parts.next() != Some("GET") {
        return Err(RequestError::BadVerb);
    }

    let path = parts.next().ok_or(RequestError::BadPath)?;
    if !path.starts_with('/') || parts.next().is_some() {
        return Err(RequestError::BadPath);
    }

    Ok(path.to_string())
}
