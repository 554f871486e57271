//! # Resolución de Contenido
//! src/content/mod.rs
//!
//! Resuelve claves de contenido a streams de bytes. El trait `ContentSource`
//! es la frontera con el core: los workers solo conocen open/size/read_chunk
//! y el cierre implícito al hacer drop del handle.

pub mod store;

pub use store::{ContentError, ContentHandle, ContentSource, FileStore};
