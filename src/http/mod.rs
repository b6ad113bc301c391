//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que usa el servidor,
//! sin librerías de alto nivel. Incluye:
//!
//! - Partición de strings y buffers (`tokenizer`)
//! - Lectura incremental y acotada de requests (`reader`)
//! - Parsing de requests (`request`)
//! - Construcción y escritura de responses (`response`, `writer`)
//! - Compresión gzip negociada (`encoding`)
//!
//! Una conexión transporta exactamente un request: no hay keep-alive,
//! chunked transfer encoding ni pipelining.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 3\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! abc
//! ```

pub mod encoding;
pub mod reader;
pub mod request;
pub mod response;
pub mod status;
pub mod tokenizer;
pub mod writer;

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use reader::{ReadError, RequestReader};
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
pub use writer::ResponseWriter;
