//! # Códigos de Estado Getfile
//! src/protocol/status.rs
//!
//! Este módulo define los códigos de estado del protocolo Getfile.
//! A diferencia de HTTP, el vocabulario es mínimo:
//!
//! - **OK**: el contenido existe y el payload sigue al header
//! - **FILE_NOT_FOUND**: la clave no existe en el mapeo de contenido
//! - **ERROR**: fallo genérico del servidor (ej: metadata no disponible)

/// Representa los códigos de estado que soporta el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GfStatus {
    /// El contenido fue resuelto; el header declara la longitud del payload
    Ok,

    /// La clave no existe en el resolver; longitud 0, sin payload
    FileNotFound,

    /// Error del servidor al resolver el contenido; longitud 0, sin payload
    Error,
}

impl GfStatus {
    /// Retorna el token del estado tal como viaja en el wire
    ///
    /// # Ejemplo
    /// ```
    /// use gf_server::protocol::GfStatus;
    /// assert_eq!(GfStatus::Ok.as_str(), "OK");
    /// assert_eq!(GfStatus::FileNotFound.as_str(), "FILE_NOT_FOUND");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            GfStatus::Ok => "OK",
            GfStatus::FileNotFound => "FILE_NOT_FOUND",
            GfStatus::Error => "ERROR",
        }
    }

    /// Parsea un token del wire a su estado
    ///
    /// # Ejemplo
    /// ```
    /// use gf_server::protocol::GfStatus;
    /// assert_eq!(GfStatus::parse("OK"), Some(GfStatus::Ok));
    /// assert_eq!(GfStatus::parse("BOGUS"), None);
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "OK" => Some(GfStatus::Ok),
            "FILE_NOT_FOUND" => Some(GfStatus::FileNotFound),
            "ERROR" => Some(GfStatus::Error),
            _ => None,
        }
    }

    /// Verifica si el estado indica éxito (lleva payload)
    pub fn is_success(&self) -> bool {
        matches!(self, GfStatus::Ok)
    }
}

impl std::fmt::Display for GfStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tokens() {
        assert_eq!(GfStatus::Ok.as_str(), "OK");
        assert_eq!(GfStatus::FileNotFound.as_str(), "FILE_NOT_FOUND");
        assert_eq!(GfStatus::Error.as_str(), "ERROR");
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in [GfStatus::Ok, GfStatus::FileNotFound, GfStatus::Error] {
            assert_eq!(GfStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(GfStatus::parse("NOT_A_STATUS"), None);
        assert_eq!(GfStatus::parse(""), None);
        assert_eq!(GfStatus::parse("ok"), None); // case sensitive
    }

    #[test]
    fn test_is_success() {
        assert!(GfStatus::Ok.is_success());
        assert!(!GfStatus::FileNotFound.is_success());
        assert!(!GfStatus::Error.is_success());
    }

    #[test]
    fn test_display() {
        assert_eq!(GfStatus::Ok.to_string(), "OK");
        assert_eq!(GfStatus::FileNotFound.to_string(), "FILE_NOT_FOUND");
    }
}
