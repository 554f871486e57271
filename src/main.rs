//! # Getfile Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor Getfile.
//!
//! Parsea la configuración desde CLI/env, valida, construye el servidor
//! (content store + cola + pool de workers) y entra al loop de accept.

use gf_server::config::Config;
use gf_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Getfile Server");
    println!("=================================\n");

    // Crear configuración desde CLI args y variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Construir el servidor; cualquier fallo de arranque es fatal
    let mut server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error fatal de arranque: {}", e);
            std::process::exit(1);
        }
    };

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
