//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas y
//! convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <body en bytes>
//! ```
//!
//! El único header que se emite es `Content-Length`; se calcula siempre
//! a partir del body (0 incluido).

use super::StatusCode;

/// Representa una respuesta HTTP completa
///
/// Es un valor transitorio: se construye, se serializa con
/// [`to_bytes`](Response::to_bytes) y se descarta.
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 400, 404)
    status: StatusCode,

    /// Cuerpo de la respuesta (puede ser vacío)
    ///
    /// Son bytes crudos: el contenido literal de un archivo o el stdout
    /// capturado de un programa.
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene body.
    ///
    /// # Ejemplo
    /// ```
    /// use server_lite::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::NotFound);
    /// assert!(response.body().is_empty());
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// # Ejemplo
    /// ```
    /// use server_lite::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_body_bytes(b"hola".to_vec());
    /// assert_eq!(response.body(), b"hola");
    /// ```
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Crea una respuesta de error con un mensaje de texto plano
    ///
    /// # Ejemplo
    /// ```
    /// use server_lite::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::BadRequest, "Invalid request");
    /// assert_eq!(response.status(), StatusCode::BadRequest);
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status).with_body(message)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Header: `Content-Length: <n>\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        // Formato: HTTP/1.1 200 OK\r\n
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Content-Length (siempre presente, incluso con body vacío)
        let header_line = format!("Content-Length: {}\r\n", self.body.len());
        result.extend_from_slice(header_line.as_bytes());

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
