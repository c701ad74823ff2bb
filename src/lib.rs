//! # server-lite
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero para demostrar
//! el parsing incremental de un stream de bytes: los datos llegan del
//! socket en fragmentos de tamaño arbitrario y el parser debe
//! reconstruir líneas terminadas en CRLF sin asumir que los límites
//! de cada lectura coinciden con los límites de línea.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Tipos del protocolo (Request, Response, StatusCode) y el parser
//! - `server`: Buffer incremental de la conexión, socket TCP y ciclo accept
//! - `fs`: Proveedor de recursos (filesystem + ejecución de subprocesos)
//! - `dispatch`: Resolución de un Request a una Response
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use server_lite::config::Config;
//! use server_lite::server::Server;
//!
//! let config = Config::default();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod dispatch;
pub mod fs;
pub mod http;
pub mod server;
