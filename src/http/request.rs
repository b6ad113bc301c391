//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Convierte el buffer crudo leído de la conexión en un `Request`.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hola!
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path VERSION`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: bytes crudos, sin decodificar
//!
//! Los nombres de los headers se comparan tal cual vienen (sensibles a
//! mayúsculas): `user-agent` y `User-Agent` son headers distintos.

use super::tokenizer::{self, CRLF, HEADER_END, HEADER_SEPARATOR, SPACE};
use std::collections::HashMap;
use thiserror::Error;

/// Métodos HTTP reconocidos por el parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// HEAD - Como GET pero solo headers
    HEAD,

    PUT,
    DELETE,
    PATCH,
    OPTIONS,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es reconocido
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "HEAD" => Ok(Method::HEAD),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "PATCH" => Ok(Method::PATCH),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::HEAD => "HEAD",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::OPTIONS => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representa un request HTTP parseado
///
/// Se crea una vez por conexión y no se modifica después.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path exacto de la petición, siempre empieza con `/`
    path: String,

    /// Versión HTTP tal como vino (solo informativa)
    version: String,

    /// Headers HTTP (ej: {"Host": "localhost:4221"})
    headers: HashMap<String, String>,

    /// Body crudo
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// El bloque de headers no es UTF-8 válido
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// Formato inválido de la request line
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// Método HTTP no reconocido
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Header sin separador `": "`
    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),
}

impl Request {
    /// Parsea un request desde bytes
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Bytes recibidos de la conexión
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Request malformado
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // 1. Separar bloque de headers y body en la primera frontera \r\n\r\n
        let (head, body) = match tokenizer::find_bytes(buffer, HEADER_END) {
            Some(pos) => (&buffer[..pos], &buffer[pos + HEADER_END.len()..]),
            None => (buffer, &[][..]),
        };

        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidEncoding)?;

        if head.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // 2. La primera línea es la request line, el resto son headers
        let lines = tokenizer::split(head, CRLF);
        let (method, path, version) = Self::parse_request_line(lines[0])?;
        let headers = Self::parse_headers(&lines[1..])?;

        Ok(Request {
            method,
            path,
            version,
            headers,
            body: body.to_vec(),
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`, separada por espacios simples
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts = tokenizer::split(line, SPACE);

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        let [method, path, version] = parts[..] else {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        };

        let method = Method::from_str(method)?;

        if !path.starts_with('/') {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        Ok((method, path.to_string(), version.to_string()))
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header se parte en el primer `": "`. Si un nombre se repite,
    /// el último valor reemplaza al anterior.
    fn parse_headers(lines: &[&str]) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.is_empty() {
                continue;
            }

            match tokenizer::split_once(line, HEADER_SEPARATOR) {
                Some((name, value)) => {
                    headers.insert(name.to_string(), value.to_string());
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (comparación exacta)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
