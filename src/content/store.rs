//! # Content Store
//! src/content/store.rs
//!
//! Implementa el resolver de claves a archivos basado en un archivo de
//! mapeo con líneas `<clave> <ruta>`. Líneas vacías y comentarios con `#`
//! se ignoran.
//!
//! El handle devuelto por `open` es propiedad exclusiva del worker que
//! atiende el request; el cierre del archivo ocurre al hacer drop del
//! handle, en todos los caminos de salida.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Errores del resolver de contenido
#[derive(Debug)]
pub enum ContentError {
    /// La clave no existe en el mapeo
    NotFound,
    /// Error de I/O al abrir, medir o leer el contenido
    Io(io::Error),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::NotFound => write!(f, "content key not found"),
            ContentError::Io(e) => write!(f, "content I/O error: {}", e),
        }
    }
}

impl std::error::Error for ContentError {}

impl From<io::Error> for ContentError {
    fn from(e: io::Error) -> Self {
        ContentError::Io(e)
    }
}

/// Handle abierto sobre el contenido de una clave
///
/// El cierre del recurso subyacente ocurre en el drop.
pub trait ContentHandle: Send {
    /// Tamaño total del contenido en bytes
    fn size(&mut self) -> Result<u64, ContentError>;

    /// Lee hasta `buf.len()` bytes desde `offset`
    ///
    /// Retorna la cantidad de bytes leídos; 0 señala fin del contenido.
    /// Una lectura corta es válida: el caller avanza el offset por lo
    /// efectivamente leído.
    fn read_chunk(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, ContentError>;
}

/// Resolver de claves a handles de contenido
pub trait ContentSource: Send + Sync {
    fn open(&self, key: &str) -> Result<Box<dyn ContentHandle>, ContentError>;
}

/// Store de contenido respaldado por archivos locales
pub struct FileStore {
    mapping: HashMap<String, PathBuf>,
}

impl FileStore {
    /// Carga el mapeo desde el archivo de configuración
    ///
    /// Formato: una línea por entrada, `<clave> <ruta>`. Las claves deben
    /// empezar con `/` (son los paths que pide el cliente).
    pub fn from_mapping_file(path: &str) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut mapping = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            if let (Some(key), Some(target)) = (parts.next(), parts.next()) {
                mapping.insert(key.to_string(), PathBuf::from(target));
            }
        }

        Ok(Self { mapping })
    }

    /// Construye un store directamente desde pares clave/ruta
    pub fn from_entries<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: AsRef<Path>,
    {
        let mapping = entries
            .into_iter()
            .map(|(k, p)| (k.into(), p.as_ref().to_path_buf()))
            .collect();
        Self { mapping }
    }

    /// Cantidad de claves registradas
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Verifica si el mapeo está vacío
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl ContentSource for FileStore {
    fn open(&self, key: &str) -> Result<Box<dyn ContentHandle>, ContentError> {
        let target = self.mapping.get(key).ok_or(ContentError::NotFound)?;
        let file = File::open(target)?;
        Ok(Box::new(FileHandle { file }))
    }
}

/// Handle sobre un archivo local
struct FileHandle {
    file: File,
}

impl ContentHandle for FileHandle {
    fn size(&mut self) -> Result<u64, ContentError> {
        let meta = self.file.metadata()?;
        Ok(meta.len())
    }

    fn read_chunk(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, ContentError> {
        self.file.seek(SeekFrom::Start(offset))?;
        let n = self.file.read(buf)?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("gf_store_test_{}_{}", std::process::id(), name));
        path
    }

    fn write_file(path: &Path, contents: &[u8]) {
        let mut f = File::create(path).unwrap();
        f.write_all(contents).unwrap();
    }

    #[test]
    fn test_mapping_file_parsing() {
        let content_path = temp_path("a.txt");
        write_file(&content_path, b"hello");

        let map_path = temp_path("map1.txt");
        let map_body = format!(
            "# mapeo de prueba\n\n/a.txt {}\n/alias.txt {}\n",
            content_path.display(),
            content_path.display()
        );
        write_file(&map_path, map_body.as_bytes());

        let store = FileStore::from_mapping_file(map_path.to_str().unwrap()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.open("/a.txt").is_ok());
        assert!(store.open("/alias.txt").is_ok());

        let _ = std::fs::remove_file(&content_path);
        let _ = std::fs::remove_file(&map_path);
    }

    #[test]
    fn test_mapping_file_missing() {
        let result = FileStore::from_mapping_file("/nonexistent/mapping.txt");
        assert!(result.is_err());
    }

    #[test]
    fn test_open_not_found() {
        let store = FileStore::from_entries(Vec::<(String, PathBuf)>::new());
        match store.open("/missing.txt") {
            Err(ContentError::NotFound) => {}
            other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_open_mapped_but_unreadable() {
        // La clave existe pero el archivo destino no: error de I/O, no NotFound
        let store = FileStore::from_entries([("/ghost.txt", "/nonexistent/ghost.dat")]);
        match store.open("/ghost.txt") {
            Err(ContentError::Io(_)) => {}
            other => panic!("Expected Io error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_size_and_read_chunk() {
        let content_path = temp_path("sized.txt");
        write_file(&content_path, b"0123456789");

        let store = FileStore::from_entries([("/sized.txt", &content_path)]);
        let mut handle = store.open("/sized.txt").unwrap();

        assert_eq!(handle.size().unwrap(), 10);

        let mut buf = [0u8; 4];
        assert_eq!(handle.read_chunk(0, &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"0123");

        assert_eq!(handle.read_chunk(4, &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"4567");

        // Lectura corta al final del archivo
        assert_eq!(handle.read_chunk(8, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"89");

        // EOF
        assert_eq!(handle.read_chunk(10, &mut buf).unwrap(), 0);

        let _ = std::fs::remove_file(&content_path);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ContentError::NotFound.to_string(), "content key not found");
        let io_err = ContentError::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(io_err.to_string().contains("boom"));
    }
}
