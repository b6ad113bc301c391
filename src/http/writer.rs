//! # Escritura de Respuestas
//! src/http/writer.rs
//!
//! Completa los headers por defecto y escribe la respuesta en la conexión
//! como una secuencia de escrituras discretas:
//!
//! 1. status line + `\r\n`
//! 2. cada header `name: value` + `\r\n`
//! 3. línea vacía `\r\n`
//! 4. body crudo

use super::response::{Response, CONTENT_LENGTH, CONTENT_TYPE};
use std::io::{self, Write};

/// Content-Type usado cuando el handler no puso uno
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Serializa `Response`s sobre cualquier `Write`
pub struct ResponseWriter;

impl ResponseWriter {
    /// Agrega `Content-Type` y `Content-Length` solo si faltan
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::{Response, StatusCode, ResponseWriter};
    ///
    /// let mut response = Response::new(StatusCode::Ok).with_body("hello");
    /// ResponseWriter::finalize(&mut response);
    ///
    /// assert_eq!(response.header("Content-Type"), Some("text/html"));
    /// assert_eq!(response.header("Content-Length"), Some("5"));
    /// ```
    pub fn finalize(response: &mut Response) {
        if !response.has_header(CONTENT_TYPE) {
            response.add_header(CONTENT_TYPE, DEFAULT_CONTENT_TYPE);
        }
        if !response.has_header(CONTENT_LENGTH) {
            let length = response.body().len().to_string();
            response.add_header(CONTENT_LENGTH, &length);
        }
    }

    /// Finaliza y escribe la respuesta completa
    ///
    /// Los errores de escritura (cliente que se fue, etc.) se propagan
    /// al supervisor de la conexión.
    pub fn write_to<W: Write>(response: &mut Response, out: &mut W) -> io::Result<()> {
        Self::finalize(response);

        out.write_all(response.status().status_line().as_bytes())?;
        out.write_all(b"\r\n")?;

        for (name, value) in response.headers() {
            out.write_all(format!("{}: {}", name, value).as_bytes())?;
            out.write_all(b"\r\n")?;
        }

        out.write_all(b"\r\n")?;
        out.write_all(response.body())?;
        out.flush()
    }
}
