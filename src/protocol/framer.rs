//! # Framer del Protocolo
//! src/protocol/framer.rs
//!
//! Primitivas de escritura hacia el cliente. El trait `Connection` abstrae
//! la conexión para poder sustituirla en tests (ej: un sink que escribe de
//! a un byte para simular short writes).
//!
//! Garantías:
//! - `send_header` escribe el header completo antes de retornar Ok.
//! - `send_chunk` reintenta short writes hasta transmitir el chunk completo
//!   o hasta que ocurra un error de envío (terminal para el request).

use crate::protocol::{GfStatus, Header};
use std::io;
use std::net::TcpStream;

/// Abstracción del lado de escritura de una conexión de cliente
///
/// `send` puede escribir menos bytes de los pedidos; el caller debe
/// reintentar con el resto. Un retorno de 0 se trata como conexión cerrada.
pub trait Connection: Send {
    fn send(&mut self, buf: &[u8]) -> io::Result<usize>;
}

impl Connection for TcpStream {
    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        use std::io::Write;
        self.write(buf)
    }
}

/// Escribe `buf` completo sobre la conexión, reintentando short writes
fn send_all(conn: &mut dyn Connection, buf: &[u8]) -> io::Result<()> {
    let mut sent = 0;
    while sent < buf.len() {
        match conn.send(&buf[sent..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "connection closed mid-write",
                ));
            }
            Ok(n) => sent += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Escribe el header `(status, length)` sobre la conexión
///
/// Debe llamarse exactamente una vez por request, antes de cualquier byte
/// de payload.
pub fn send_header(conn: &mut dyn Connection, status: GfStatus, length: u64) -> io::Result<()> {
    let header = Header { status, length };
    send_all(conn, &header.encode())
}

/// Escribe un chunk de payload completo sobre la conexión
pub fn send_chunk(conn: &mut dyn Connection, chunk: &[u8]) -> io::Result<()> {
    send_all(conn, chunk)
}
