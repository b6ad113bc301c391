//! # Códigos de Estado HTTP
//!
//! Los códigos que el servidor puede emitir. La status line en el cable
//! siempre es `HTTP/1.1 <código> <frase>`.

/// Versión que se anuncia en todas las respuestas
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 201 Created - Archivo escrito (POST /files/...)
    Created = 201,

    /// 404 Not Found - Ruta o recurso no encontrado, o request inválido
    NotFound = 404,

    /// 413 Payload Too Large - El request supera el tamaño máximo configurado
    PayloadTooLarge = 413,

    /// 503 Service Unavailable - Todos los workers ocupados y la cola llena
    ServiceUnavailable = 503,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::StatusCode;
    /// assert_eq!(StatusCode::Created.as_u16(), 201);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NotFound => "Not Found",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Status line completa, sin el `\r\n` final
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.status_line(), "HTTP/1.1 200 OK");
    /// ```
    pub fn status_line(&self) -> String {
        format!("{} {}", HTTP_VERSION, self)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
