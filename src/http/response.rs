//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! de forma programática. La serialización al cable la hace
//! [`ResponseWriter`](super::writer::ResponseWriter).
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 3\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! abc
//! ```
//!
//! Los headers se guardan en un `BTreeMap`: no hay duplicados y el orden
//! en el cable es siempre el mismo para la misma respuesta.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use minihttp::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("Hello");
//!
//! assert_eq!(response.header("Content-Type"), Some("text/plain"));
//! assert_eq!(response.body(), b"Hello");
//! ```

use super::StatusCode;
use std::collections::BTreeMap;

/// Header de tipo de contenido
pub const CONTENT_TYPE: &str = "Content-Type";

/// Header de longitud del body
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Header de codificación del body
pub const CONTENT_ENCODING: &str = "Content-Encoding";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers HTTP, claves únicas
    headers: BTreeMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok);
    /// assert!(response.body().is_empty());
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    /// Respuesta 404 vacía, usada para cualquier "no match"
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
            .with_header(CONTENT_TYPE, "text/html")
            .with_header(CONTENT_LENGTH, "0")
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::{Response, StatusCode};
    ///
    /// let mut response = Response::new(StatusCode::Ok);
    /// response.add_header("Content-Type", "text/plain");
    /// assert_eq!(response.header("Content-Type"), Some("text/plain"));
    /// ```
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// No toca `Content-Length`: el writer lo completa si falta.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para respuestas binarias (archivos, gzip, etc.)
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Reemplaza el body de una respuesta existente
    ///
    /// Es lo que usan los handlers registrados:
    ///
    /// ```
    /// use minihttp::http::{Response, StatusCode};
    ///
    /// let mut response = Response::new(StatusCode::Ok);
    /// response.set_body("Hello World!");
    /// assert_eq!(response.body(), b"Hello World!");
    /// ```
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Cambia el código de estado
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Verifica si el header ya fue establecido
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
