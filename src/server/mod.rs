//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el lado TCP del servidor:
//! 1. Construye el socket de escucha (SO_REUSEADDR + backlog configurado)
//! 2. Acepta conexiones entrantes, una a la vez
//! 3. Lee y parsea el request con el buffer incremental
//! 4. Despacha y envía la response
//!
//! El modelo es estrictamente secuencial y bloqueante: no hay threads
//! ni event loop, igual que el diseño original.

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{Connection, ConnectionError};
pub use tcp::{handle_connection, Server};
