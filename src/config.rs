//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor Getfile con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./gf_server --port 19121 \
//!   --nthreads 5 \
//!   --content content.txt \
//!   --chunk-size 1024
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! GF_PORT=19121 GF_HOST=0.0.0.0 ./gf_server
//! ```

use clap::Parser;

/// Política de la cola de trabajo cuando está llena
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum QueuePolicy {
    /// Bloquear al dispatcher hasta que haya espacio (backpressure)
    Block,
    /// Rechazar el request con un header ERROR (server busy)
    Reject,
}

/// Configuración del servidor Getfile
#[derive(Debug, Clone, Parser)]
#[command(name = "gf_server")]
#[command(about = "Servidor Getfile concurrente con pool de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "19121", env = "GF_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "GF_HOST")]
    pub host: String,

    /// Número de worker threads que atienden la cola
    #[arg(short = 't', long = "nthreads", default_value = "5", env = "GF_NTHREADS")]
    pub nthreads: usize,

    /// Archivo de mapeo clave -> archivo de contenido
    #[arg(short = 'm', long = "content", default_value = "content.txt", env = "GF_CONTENT")]
    pub content_map: String,

    /// Tamaño de chunk (bytes) para el streaming del payload
    #[arg(long = "chunk-size", default_value = "1024", env = "GF_CHUNK_SIZE")]
    pub chunk_size: usize,

    /// Capacidad máxima de la cola de trabajo
    #[arg(long = "queue-capacity", default_value = "128", env = "GF_QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    /// Política cuando la cola está llena
    #[arg(long = "queue-policy", value_enum, default_value = "reject", env = "GF_QUEUE_POLICY")]
    pub queue_policy: QueuePolicy,

    /// Timeout de escritura al cliente en milisegundos (0 = deshabilitado)
    #[arg(long = "write-timeout-ms", default_value = "0", env = "GF_WRITE_TIMEOUT_MS")]
    pub write_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use gf_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:19121");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.nthreads == 0 {
            return Err("nthreads must be >= 1".to_string());
        }

        if self.chunk_size == 0 {
            return Err("chunk size must be >= 1".to_string());
        }

        if self.queue_capacity == 0 {
            return Err("queue capacity must be >= 1".to_string());
        }

        if self.content_map.is_empty() {
            return Err("content map path must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════╗");
        println!("║        Getfile Server Configuration          ║");
        println!("╚══════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:        {}", self.address());
        println!("   Content map:    {}", self.content_map);
        println!();
        println!("👷 Worker Pool & Queue:");
        println!("   Workers:        {}", self.nthreads);
        println!("   Queue capacity: {}", self.queue_capacity);
        println!("   Queue policy:   {:?}", self.queue_policy);
        println!("   Chunk size:     {} bytes", self.chunk_size);
        println!();
        println!("🚦 Hardening:");
        if self.write_timeout_ms > 0 {
            println!("   Write timeout:  {} ms", self.write_timeout_ms);
        } else {
            println!("   Write timeout:  disabled");
        }
        println!();
        println!("═══════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 19121,
            host: "127.0.0.1".to_string(),
            nthreads: 5,
            content_map: "content.txt".to_string(),
            chunk_size: 1024,
            queue_capacity: 128,
            queue_policy: QueuePolicy::Reject,
            write_timeout_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 19121);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.nthreads, 5);
        assert_eq!(config.content_map, "content.txt");
        assert_eq!(config.chunk_size, 1024);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:19121");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    // ==================== Workers Validation ====================

    #[test]
    fn test_validate_invalid_nthreads() {
        let mut config = Config::default();
        config.nthreads = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("nthreads"));
    }

    // ==================== Queue Validation ====================

    #[test]
    fn test_validate_invalid_queue_capacity() {
        let mut config = Config::default();
        config.queue_capacity = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("queue capacity"));
    }

    // ==================== Chunk Size Validation ====================

    #[test]
    fn test_validate_invalid_chunk_size() {
        let mut config = Config::default();
        config.chunk_size = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("chunk size"));
    }

    #[test]
    fn test_validate_empty_content_map() {
        let mut config = Config::default();
        config.content_map = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("content map"));
    }

    // ==================== Custom Values ====================

    #[test]
    fn test_config_custom_values() {
        let mut config = Config::default();
        config.port = 3000;
        config.host = "0.0.0.0".to_string();
        config.nthreads = 8;
        config.queue_capacity = 256;
        config.queue_policy = QueuePolicy::Block;

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.nthreads, 8);
        assert_eq!(config.queue_capacity, 256);
        assert_eq!(config.queue_policy, QueuePolicy::Block);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_default_write_timeout_disabled() {
        let config = Config::default();
        assert_eq!(config.write_timeout_ms, 0);
    }

    // ==================== Print Summary ====================

    #[test]
    fn test_config_print_summary() {
        let config = Config::default();
        // Should not panic
        config.print_summary();
    }

    #[test]
    fn test_config_print_summary_custom() {
        let mut config = Config::default();
        config.port = 9000;
        config.nthreads = 8;
        config.write_timeout_ms = 2000;
        // Should not panic
        config.print_summary();
    }
}
