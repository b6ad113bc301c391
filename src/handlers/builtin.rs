//! # Handlers Built-in
//!
//! - `GET /`: 200 con body vacío
//! - `GET /echo/<texto>`: devuelve `<texto>`, comprimido con gzip si el
//!   cliente lo acepta
//! - `GET /user-agent`: devuelve el header `User-Agent` tal cual

use crate::http::encoding::{self, ACCEPT_ENCODING, GZIP};
use crate::http::response::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE};
use crate::http::{Request, Response, StatusCode};
use log::warn;

/// Prefijo de la ruta de eco
pub const ECHO_PREFIX: &str = "/echo/";

/// Prefijo de la ruta que devuelve el User-Agent
pub const USER_AGENT_PREFIX: &str = "/user-agent";

const USER_AGENT: &str = "User-Agent";

/// Handler para `GET /`
pub fn root_handler(_req: &Request) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para `GET /echo/<texto>`
///
/// El texto después de `/echo/` se devuelve literal como `text/plain`.
/// Si `Accept-Encoding` incluye el token `gzip`, el body va comprimido y
/// `Content-Length` es el largo comprimido.
///
/// # Ejemplo
/// ```
/// use minihttp::handlers::echo_handler;
/// use minihttp::http::Request;
///
/// let request = Request::parse(b"GET /echo/abc HTTP/1.1\r\n\r\n").unwrap();
/// let response = echo_handler(&request);
///
/// assert_eq!(response.body(), b"abc");
/// assert_eq!(response.header("Content-Length"), Some("3"));
/// ```
pub fn echo_handler(req: &Request) -> Response {
    let text = req.path().strip_prefix(ECHO_PREFIX).unwrap_or_default();
    let mut body = text.as_bytes().to_vec();
    let mut response = Response::new(StatusCode::Ok).with_header(CONTENT_TYPE, "text/plain");

    if encoding::accepts_gzip(req.header(ACCEPT_ENCODING)) {
        match encoding::gzip(&body) {
            Ok(compressed) => {
                body = compressed;
                response.add_header(CONTENT_ENCODING, GZIP);
            }
            Err(e) => {
                // Se responde sin comprimir antes que mandar un body roto
                warn!("echo: {}, respondiendo sin comprimir", e);
            }
        }
    }

    response.add_header(CONTENT_LENGTH, &body.len().to_string());
    response.with_body_bytes(body)
}

/// Handler para `GET /user-agent`
///
/// El header se busca con mayúsculas exactas: `user-agent` no cuenta.
/// Sin header, el body queda vacío.
pub fn user_agent_handler(req: &Request) -> Response {
    let agent = req.header(USER_AGENT).unwrap_or_default();

    Response::new(StatusCode::Ok)
        .with_header(CONTENT_TYPE, "text/plain")
        .with_header(CONTENT_LENGTH, &agent.len().to_string())
        .with_body(agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn parse(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    #[test]
    fn test_root() {
        let response = root_handler(&parse(b"GET / HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_echo_plain() {
        let response = echo_handler(&parse(b"GET /echo/hello HTTP/1.1\r\n\r\n"));

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"hello");
        assert_eq!(response.header("Content-Length"), Some("5"));
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Encoding"), None);
    }

    #[test]
    fn test_echo_identity_is_plain() {
        let response = echo_handler(&parse(b"GET /echo/hello HTTP/1.1\r\nAccept-Encoding: identity\r\n\r\n"));

        assert_eq!(response.body(), b"hello");
        assert_eq!(response.header("Content-Encoding"), None);
    }

    #[test]
    fn test_echo_gzip() {
        let response = echo_handler(&parse(
            b"GET /echo/hello HTTP/1.1\r\nAccept-Encoding: deflate, gzip\r\n\r\n",
        ));

        assert_eq!(response.header("Content-Encoding"), Some("gzip"));
        assert_eq!(
            response.header("Content-Length"),
            Some(response.body().len().to_string().as_str())
        );

        let mut inflated = String::new();
        GzDecoder::new(response.body()).read_to_string(&mut inflated).unwrap();
        assert_eq!(inflated, "hello");
    }

    #[test]
    fn test_echo_empty_text() {
        let response = echo_handler(&parse(b"GET /echo/ HTTP/1.1\r\n\r\n"));

        assert!(response.body().is_empty());
        assert_eq!(response.header("Content-Length"), Some("0"));
    }

    #[test]
    fn test_user_agent() {
        let response = user_agent_handler(&parse(b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-agent/1.0\r\n\r\n"));

        assert_eq!(response.body(), b"test-agent/1.0");
        assert_eq!(response.header("Content-Length"), Some("14"));
    }

    #[test]
    fn test_user_agent_is_case_sensitive() {
        let response = user_agent_handler(&parse(b"GET /user-agent HTTP/1.1\r\nuser-agent: test-agent/1.0\r\n\r\n"));

        assert!(response.body().is_empty());
        assert_eq!(response.header("Content-Length"), Some("0"));
    }
}
