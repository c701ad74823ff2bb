//! # Dispatch de Requests
//! src/dispatch/mod.rs
//!
//! Este módulo resuelve un [`Request`] a una [`Response`] consultando
//! el proveedor de recursos.
//!
//! ## Algoritmo de resolución
//!
//! ```text
//! path resuelto = base_dir ++ path crudo del request
//!
//! no existe           → 404, body vacío
//! existe y ejecutable → 200, body = stdout del subproceso
//! existe y plano      → 200, body = bytes del archivo
//! ```
//!
//! La concatenación es cruda, sin normalización ni rechazo de `..`:
//! es el baseline deliberadamente inseguro del diseño original
//! (ej: `GET /../../etc/passwd` funciona).

use std::io;

use crate::fs::ResourceProvider;
use crate::http::{Request, Response, StatusCode};

/// Errores al resolver un recurso
///
/// Son fatales para el request, nunca para el proceso: el ciclo de
/// accept sigue atendiendo conexiones.
#[derive(Debug)]
pub enum DispatchError {
    /// El recurso ejecutable no se pudo correr
    ExecutionFailed { path: String, source: io::Error },

    /// El recurso existe pero no se pudo leer
    ReadFailed { path: String, source: io::Error },
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::ExecutionFailed { path, source } => {
                write!(f, "Failed to execute resource {:?}: {}", path, source)
            }
            DispatchError::ReadFailed { path, source } => {
                write!(f, "Failed to read resource {:?}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::ExecutionFailed { source, .. } => Some(source),
            DispatchError::ReadFailed { source, .. } => Some(source),
        }
    }
}

/// Resuelve requests contra un directorio base usando un proveedor
pub struct Dispatcher<P: ResourceProvider> {
    /// Directorio que se antepone al path crudo del request
    base_dir: String,

    /// Colaborador filesystem/subprocesos
    provider: P,
}

impl<P: ResourceProvider> Dispatcher<P> {
    /// Crea un dispatcher sobre `base_dir`
    pub fn new(base_dir: String, provider: P) -> Self {
        Self { base_dir, provider }
    }

    /// Resuelve un request a una respuesta
    ///
    /// El único camino no-exitoso definido es el 404; los fallos del
    /// proveedor se propagan como [`DispatchError`].
    pub fn dispatch(&self, request: &Request) -> Result<Response, DispatchError> {
        // Concatenación cruda: sin normalizar, sin rechazar traversal
        let path = format!("{}{}", self.base_dir, request.path());

        if !self.provider.exists(&path) {
            return Ok(Response::new(StatusCode::NotFound));
        }

        let content = if self.provider.is_executable(&path) {
            // Estilo CGI: servir el stdout del programa
            self.provider
                .execute_capturing_stdout(&path)
                .map_err(|source| DispatchError::ExecutionFailed {
                    path: path.clone(),
                    source,
                })?
        } else {
            self.provider
                .read_all(&path)
                .map_err(|source| DispatchError::ReadFailed {
                    path: path.clone(),
                    source,
                })?
        };

        Ok(Response::new(StatusCode::Ok).with_body_bytes(content))
    }
}
