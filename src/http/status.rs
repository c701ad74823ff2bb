//! # Códigos de Estado HTTP
//!
//! Este módulo define los códigos de estado que puede emitir el servidor.
//! El protocolo original solo define dos caminos: 200 para un recurso
//! resuelto y 404 para un recurso inexistente. El 400 es la representación
//! elegida para los fallos de parsing (el diseño original los dejaba sin
//! definir).

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - El recurso existe y se resolvió
    Ok = 200,

    /// 400 Bad Request - Request line o header malformado
    BadRequest = 400,

    /// 404 Not Found - El path no resuelve a ningún recurso
    NotFound = 404,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use server_lite::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// Se conservan las frases en mayúsculas del protocolo original
    /// ("NOT FOUND", no "Not Found").
    ///
    /// # Ejemplo
    /// ```
    /// use server_lite::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "NOT FOUND");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "BAD REQUEST",
            StatusCode::NotFound => "NOT FOUND",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formatea el código de estado para mostrarlo
    ///
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
