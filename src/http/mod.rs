//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que habla el
//! servidor, sin usar librerías de alto nivel. Incluye:
//!
//! - Parsing incremental de requests (request line + headers)
//! - Construcción de responses HTTP
//! - Manejo de status codes
//!
//! ### Formato de Request
//!
//! ```text
//! GET /foo.txt HTTP/1.1\r\n
//! Host: 127.0.0.1:9000\r\n
//! User-Agent: curl/7.64.1\r\n
//! \r\n
//! ```
//!
//! No se lee ningún body: el servidor solo atiende requests de
//! línea + headers.
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hola\n
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
