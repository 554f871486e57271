//! # Header del Protocolo
//! src/protocol/header.rs
//!
//! Codifica y parsea el header de respuesta Getfile:
//!
//! ```text
//! GETFILE <STATUS> <length>\r\n\r\n
//! ```
//!
//! La longitud declarada es 0 salvo que el estado sea OK. El parseo lo usan
//! los tests y cualquier tooling cliente; el servidor solo codifica.

use crate::protocol::{GfStatus, SCHEME, TERMINATOR};

/// Header de respuesta: estado + longitud declarada del payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub status: GfStatus,
    pub length: u64,
}

/// Errores al parsear un header recibido
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// No termina en `\r\n\r\n`
    MissingTerminator,
    /// No empieza con el marcador GETFILE
    BadScheme,
    /// Token de estado desconocido
    BadStatus(String),
    /// Longitud ausente o no numérica
    BadLength,
}

impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderError::MissingTerminator => write!(f, "header missing \\r\\n\\r\\n terminator"),
            HeaderError::BadScheme => write!(f, "header does not start with {}", SCHEME),
            HeaderError::BadStatus(token) => write!(f, "unknown status token: {}", token),
            HeaderError::BadLength => write!(f, "missing or invalid length field"),
        }
    }
}

impl std::error::Error for HeaderError {}

impl Header {
    /// Crea un header para un estado de error (longitud 0)
    pub fn failure(status: GfStatus) -> Self {
        Self { status, length: 0 }
    }

    /// Crea un header OK con la longitud declarada del payload
    pub fn ok(length: u64) -> Self {
        Self {
            status: GfStatus::Ok,
            length,
        }
    }

    /// Codifica el header a sus bytes en el wire
    ///
    /// # Ejemplo
    /// ```
    /// use gf_server::protocol::Header;
    /// let bytes = Header::ok(2500).encode();
    /// assert_eq!(bytes, b"GETFILE OK 2500\r\n\r\n");
    /// ```
    pub fn encode(&self) -> Vec<u8> {
        format!("{} {} {}{}", SCHEME, self.status, self.length, TERMINATOR).into_bytes()
    }

    /// Parsea un header desde los primeros bytes de una respuesta
    ///
    /// Retorna el header y el número de bytes que consumió, para que el
    /// caller sepa dónde empieza el payload.
    pub fn parse(raw: &[u8]) -> Result<(Self, usize), HeaderError> {
        let text = String::from_utf8_lossy(raw);
        let end = text
            .find(TERMINATOR)
            .ok_or(HeaderError::MissingTerminator)?;

        let line = &text[..end];
        let mut parts = line.split_ascii_whitespace();

        if parts.next() != Some(SCHEME) {
            return Err(HeaderError::BadScheme);
        }

        let status_token = parts.next().ok_or(HeaderError::BadLength)?;
        let status = GfStatus::parse(status_token)
            .ok_or_else(|| HeaderError::BadStatus(status_token.to_string()))?;

        let length = parts
            .next()
            .ok_or(HeaderError::BadLength)?
            .parse::<u64>()
            .map_err(|_| HeaderError::BadLength)?;

        Ok((Self { status, length }, end + TERMINATOR.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ok() {
        let header = Header::ok(2500);
        assert_eq!(header.encode(), b"GETFILE OK 2500\r\n\r\n");
    }

    #[test]
    fn test_encode_not_found() {
        let header = Header::failure(GfStatus::FileNotFound);
        assert_eq!(header.encode(), b"GETFILE FILE_NOT_FOUND 0\r\n\r\n");
    }

    #[test]
    fn test_encode_error() {
        let header = Header::failure(GfStatus::Error);
        assert_eq!(header.encode(), b"GETFILE ERROR 0\r\n\r\n");
    }

    #[test]
    fn test_parse_ok() {
        let raw = b"GETFILE OK 2500\r\n\r\npayload...";
        let (header, consumed) = Header::parse(raw).unwrap();
        assert_eq!(header.status, GfStatus::Ok);
        assert_eq!(header.length, 2500);
        assert_eq!(&raw[consumed..], b"payload...");
    }

    #[test]
    fn test_parse_not_found() {
        let (header, _) = Header::parse(b"GETFILE FILE_NOT_FOUND 0\r\n\r\n").unwrap();
        assert_eq!(header.status, GfStatus::FileNotFound);
        assert_eq!(header.length, 0);
    }

    #[test]
    fn test_parse_missing_terminator() {
        let result = Header::parse(b"GETFILE OK 2500");
        assert_eq!(result, Err(HeaderError::MissingTerminator));
    }

    #[test]
    fn test_parse_bad_scheme() {
        let result = Header::parse(b"HTTP OK 10\r\n\r\n");
        assert_eq!(result, Err(HeaderError::BadScheme));
    }

    #[test]
    fn test_parse_bad_status() {
        let result = Header::parse(b"GETFILE MAYBE 10\r\n\r\n");
        assert_eq!(result, Err(HeaderError::BadStatus("MAYBE".to_string())));
    }

    #[test]
    fn test_parse_bad_length() {
        assert_eq!(
            Header::parse(b"GETFILE OK abc\r\n\r\n"),
            Err(HeaderError::BadLength)
        );
        assert_eq!(
            Header::parse(b"GETFILE OK\r\n\r\n"),
            Err(HeaderError::BadLength)
        );
    }

    #[test]
    fn test_encode_parse_roundtrip() {
        let header = Header::ok(987654);
        let (parsed, consumed) = Header::parse(&header.encode()).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(consumed, header.encode().len());
    }
}
