//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo produce un [`Request`] a partir del buffer incremental
//! de la conexión. El parser es estrictamente lineal y de un solo uso:
//! lee la request line, luego los headers hasta la línea vacía, y
//! entrega exactamente un request. No hay backtracking ni re-entrada.
//!
//! ## Formato
//!
//! ```text
//! GET /foo.txt HTTP/1.1\r\n
//! Host: 127.0.0.1:9000\r\n
//! User-Agent: curl/7.64.1\r\n
//! \r\n
//! ```
//!
//! ## Semántica de los splits (heredada del diseño original)
//!
//! - La request line se parte en espacios con un **límite de 3 campos**:
//!   solo los dos primeros espacios son separadores; todo lo que siga al
//!   segundo espacio queda verbatim en el token de versión.
//! - Cada header se parte en el **primer** `:`; el valor puede contener
//!   más `:` sin problema. El whitespace que sigue al `:` se descarta.
//! - Clave de header duplicada: la última ocurrencia gana.

use std::collections::HashMap;
use std::io::Read;

use crate::server::connection::{Connection, ConnectionError};

/// Representa un request HTTP parseado
///
/// Inmutable una vez construido; se descarta al enviar la respuesta.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP como token crudo (ej: "GET")
    ///
    /// No se valida contra una lista de métodos: el diseño original
    /// acepta cualquier token.
    method: String,

    /// Path crudo del request (ej: "/foo.txt")
    ///
    /// No se decodifica ni se sanitiza: `..` atraviesa directorios.
    /// Vulnerabilidad conocida y deliberada del diseño original.
    path: String,

    /// Token de versión (ej: "HTTP/1.1")
    version: String,

    /// Headers HTTP (ej: {"Host": "127.0.0.1:9000"})
    ///
    /// Claves case-sensitive; en claves duplicadas la última gana.
    headers: HashMap<String, String>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug)]
pub enum ParseError {
    /// La request line no tiene los 3 tokens esperados
    MalformedRequestLine(String),

    /// Un header sin `:`
    MalformedHeaderLine(String),

    /// El peer cerró el socket antes de completar el request
    ConnectionClosed,

    /// Error de I/O del socket subyacente
    Io(std::io::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedRequestLine(line) => {
                write!(f, "Malformed request line: {:?}", line)
            }
            ParseError::MalformedHeaderLine(line) => {
                write!(f, "Malformed header line: {:?}", line)
            }
            ParseError::ConnectionClosed => {
                write!(f, "Connection closed before request was complete")
            }
            ParseError::Io(e) => write!(f, "I/O error while reading request: {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConnectionError> for ParseError {
    fn from(e: ConnectionError) -> Self {
        match e {
            ConnectionError::Closed => ParseError::ConnectionClosed,
            ConnectionError::Io(e) => ParseError::Io(e),
        }
    }
}

impl Request {
    /// Lee y parsea un request completo desde la conexión
    ///
    /// Orquesta las dos etapas: request line y headers. La línea vacía
    /// que termina los headers también se consume.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use std::io::Cursor;
    /// use server_lite::http::Request;
    /// use server_lite::server::Connection;
    ///
    /// let raw = b"GET /foo.txt HTTP/1.1\r\nHost: x\r\n\r\n".to_vec();
    /// let mut conn = Connection::new(Cursor::new(raw), 7);
    /// let request = Request::read_from(&mut conn).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path(), "/foo.txt");
    /// ```
    pub fn read_from<R: Read>(conn: &mut Connection<R>) -> Result<Self, ParseError> {
        // 1. Request line (primera línea)
        let line = decode_line(conn.read_line()?, ParseError::MalformedRequestLine)?;
        let (method, path, version) = Self::parse_request_line(&line)?;

        // 2. Headers (hasta la línea vacía)
        let headers = Self::read_headers(conn)?;

        Ok(Request {
            method,
            path,
            version,
            headers,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /foo.txt HTTP/1.1`, split por espacio con límite de
    /// 3 campos. `GET /a b.txt HTTP/1.1` produce path `/a` y versión
    /// `b.txt HTTP/1.1`: un path con espacios no es representable.
    fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
        let mut parts = line.splitn(3, ' ');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(method), Some(path), Some(version)) => Ok((
                method.to_string(),
                path.to_string(),
                version.to_string(),
            )),
            _ => Err(ParseError::MalformedRequestLine(line.to_string())),
        }
    }

    /// Lee headers hasta la línea vacía que los termina
    ///
    /// Cada header se parte en el primer `:` (máximo 2 campos); el valor
    /// conserva cualquier `:` posterior. Una línea sin `:` es un error.
    fn read_headers<R: Read>(
        conn: &mut Connection<R>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        loop {
            let raw = conn.read_line()?;

            // La línea vacía marca el fin de los headers
            if raw.is_empty() {
                break;
            }

            let line = decode_line(raw, ParseError::MalformedHeaderLine)?;

            match line.find(':') {
                Some(colon_pos) => {
                    let name = line[..colon_pos].to_string();
                    let value = line[colon_pos + 1..].trim_start().to_string();
                    // Clave duplicada: la última escritura gana
                    headers.insert(name, value);
                }
                None => return Err(ParseError::MalformedHeaderLine(line)),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path crudo del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene el token de versión
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (clave case-sensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }
}

/// Decodifica una línea como UTF-8, mapeando el fallo al error de la etapa
fn decode_line(
    raw: Vec<u8>,
    to_error: fn(String) -> ParseError,
) -> Result<String, ParseError> {
    String::from_utf8(raw).map_err(|e| {
        to_error(String::from_utf8_lossy(e.as_bytes()).into_owned())
    })
}
