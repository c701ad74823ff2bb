//! # Buffer Incremental de la Conexión
//! src/server/connection.rs
//!
//! Este módulo convierte una secuencia de lecturas de tamaño arbitrario
//! en un stream ordenado del que se pueden extraer líneas completas.
//!
//! El socket no garantiza nada sobre los límites de cada `read`: una
//! línea puede llegar en varios fragmentos, o un fragmento puede traer
//! el final de una línea más el comienzo de la siguiente. El buffer
//! acumula bytes hasta que aparece el delimitador buscado y conserva
//! intacto todo lo que venga después de él.
//!
//! ## Ejemplo
//!
//! ```
//! use std::io::Cursor;
//! use server_lite::server::Connection;
//!
//! let source = Cursor::new(b"GET / HTTP/1.1\r\nHost: x\r\n".to_vec());
//! let mut conn = Connection::new(source, 7);
//!
//! assert_eq!(conn.read_line().unwrap(), b"GET / HTTP/1.1");
//! assert_eq!(conn.read_line().unwrap(), b"Host: x");
//! ```

use std::io::Read;

/// Secuencia CRLF que termina cada línea del protocolo
pub const CRLF: &[u8] = b"\r\n";

/// Errores al leer del stream de la conexión
#[derive(Debug)]
pub enum ConnectionError {
    /// El peer cerró la conexión antes de que apareciera el delimitador
    Closed,

    /// Error de I/O del socket subyacente
    Io(std::io::Error),
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionError::Closed => write!(f, "Connection closed before delimiter"),
            ConnectionError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectionError::Closed => None,
            ConnectionError::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConnectionError {
    fn from(e: std::io::Error) -> Self {
        ConnectionError::Io(e)
    }
}

/// Buffer de bytes sobre una fuente bloqueante
///
/// Cada conexión aceptada es dueña exclusiva de un `Connection`: un
/// acumulador que solo crece entre extracciones y solo se encoge cuando
/// una extracción consume el prefijo hasta el delimitador.
pub struct Connection<R: Read> {
    /// Fuente bloqueante de bytes (el socket en producción)
    source: R,

    /// Bytes recibidos y todavía no consumidos
    buffer: Vec<u8>,

    /// Bytes máximos por cada read a la fuente
    ///
    /// El valor por defecto del servidor es deliberadamente pequeño para
    /// que la entrega parcial sea el caso común, pero cualquier valor
    /// >= 1 produce el mismo resultado observable.
    chunk_size: usize,
}

impl<R: Read> Connection<R> {
    /// Crea un buffer nuevo sobre `source`
    ///
    /// `chunk_size` debe ser >= 1 (la configuración lo valida).
    pub fn new(source: R, chunk_size: usize) -> Self {
        debug_assert!(chunk_size >= 1, "chunk_size must be >= 1");
        Self {
            source,
            buffer: Vec::new(),
            chunk_size,
        }
    }

    /// Lee una línea terminada en CRLF, sin el terminador
    ///
    /// Una línea vacía (solo `\r\n`) retorna un slice vacío.
    pub fn read_line(&mut self) -> Result<Vec<u8>, ConnectionError> {
        self.read_until(CRLF)
    }

    /// Extrae los bytes que preceden a la primera ocurrencia de `delimiter`
    ///
    /// Mientras el delimitador no esté en el buffer, lee más bytes de la
    /// fuente. Una vez presente, parte el buffer en la *primera*
    /// ocurrencia: retorna el prefijo y conserva todo lo que siga al
    /// delimitador para la próxima llamada. Ningún byte se pierde ni se
    /// duplica entre llamadas.
    pub fn read_until(&mut self, delimiter: &[u8]) -> Result<Vec<u8>, ConnectionError> {
        loop {
            if let Some(pos) = find_first(&self.buffer, delimiter) {
                // Partir en la primera ocurrencia: el sufijo (después del
                // delimitador) pasa a ser el nuevo buffer
                let rest = self.buffer.split_off(pos + delimiter.len());
                let mut prefix = std::mem::replace(&mut self.buffer, rest);
                prefix.truncate(pos);
                return Ok(prefix);
            }

            self.fill_from_source()?;
        }
    }

    /// Lee un chunk acotado de la fuente y lo agrega al buffer
    ///
    /// Un read de 0 bytes significa fin de stream: si llegamos aquí es
    /// porque todavía buscamos un delimitador, así que es un error.
    fn fill_from_source(&mut self) -> Result<(), ConnectionError> {
        let mut chunk = vec![0u8; self.chunk_size];
        let bytes_read = self.source.read(&mut chunk)?;

        if bytes_read == 0 {
            return Err(ConnectionError::Closed);
        }

        self.buffer.extend_from_slice(&chunk[..bytes_read]);
        Ok(())
    }

    /// Bytes recibidos que todavía no fueron consumidos por `read_until`
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }
}

/// Busca la primera ocurrencia de `needle` dentro de `haystack`
fn find_first(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
