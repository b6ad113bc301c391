//! # Lectura Incremental de Requests
//! src/http/reader.rs
//!
//! Lee de la conexión hasta tener el bloque de headers completo (frontera
//! `\r\n\r\n`) y, si hay `Content-Length`, hasta tener ese número de bytes
//! de body. Todo está acotado por `max_size`: un request más grande falla
//! con `ReadError::TooLarge` en vez de truncarse.

use super::response::CONTENT_LENGTH;
use super::tokenizer::{self, CRLF, HEADER_END, HEADER_SEPARATOR};
use std::io::{self, Read};
use thiserror::Error;

/// Tamaño de cada lectura del socket
pub const CHUNK_SIZE: usize = 1024;

/// Errores al leer un request de la conexión
#[derive(Debug, Error)]
pub enum ReadError {
    /// Error de I/O (incluye timeouts de lectura)
    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),

    /// El request supera el máximo permitido
    #[error("request exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Lector de un único request por conexión
pub struct RequestReader {
    max_size: usize,
}

impl RequestReader {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// Lee un request completo
    ///
    /// # Retorna
    ///
    /// * `Ok(Some(bytes))` - Request leído (posiblemente incompleto si el
    ///   cliente cerró antes de tiempo; el parser decide)
    /// * `Ok(None)` - El cliente cerró sin mandar nada
    /// * `Err(ReadError)` - I/O o tamaño excedido
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::RequestReader;
    ///
    /// let raw: &[u8] = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc";
    /// let bytes = RequestReader::new(1024).read_request(&mut &raw[..]).unwrap();
    /// assert_eq!(bytes.as_deref(), Some(raw));
    /// ```
    pub fn read_request<R: Read>(&self, source: &mut R) -> Result<Option<Vec<u8>>, ReadError> {
        let mut buffer = Vec::with_capacity(CHUNK_SIZE);
        let mut chunk = [0u8; CHUNK_SIZE];
        // Tamaño total esperado, conocido una vez que llega el bloque de headers
        let mut expected: Option<usize> = None;

        loop {
            if let Some(total) = expected {
                if buffer.len() >= total {
                    break;
                }
            }

            let bytes_read = match source.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadError::Io(e)),
            };

            if bytes_read == 0 {
                // El cliente cerró su lado de la conexión
                if buffer.is_empty() {
                    return Ok(None);
                }
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if expected.is_none() {
                if let Some(pos) = tokenizer::find_bytes(&buffer, HEADER_END) {
                    let head_len = pos + HEADER_END.len();
                    let body_len = declared_length(&buffer[..pos]);
                    expected = Some(head_len.saturating_add(body_len));
                }
            }

            let limit_reached = match expected {
                Some(total) => total > self.max_size,
                None => buffer.len() > self.max_size,
            };
            if limit_reached {
                return Err(ReadError::TooLarge { limit: self.max_size });
            }
        }

        Ok(Some(buffer))
    }
}

/// Extrae `Content-Length` del bloque de headers
///
/// Un header ausente o no numérico cuenta como 0; el handler que necesite
/// el valor lo valida por su cuenta.
fn declared_length(head: &[u8]) -> usize {
    let Ok(head) = std::str::from_utf8(head) else {
        return 0;
    };

    tokenizer::split(head, CRLF)
        .into_iter()
        .skip(1)
        .filter_map(|line| tokenizer::split_once(line, HEADER_SEPARATOR))
        .filter(|(name, _)| *name == CONTENT_LENGTH)
        .last()
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fuente que entrega los datos en pedazos, como un socket lento
    struct Trickle {
        pieces: Vec<Vec<u8>>,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pieces.is_empty() {
                return Ok(0);
            }
            let piece = self.pieces.remove(0);
            buf[..piece.len()].copy_from_slice(&piece);
            Ok(piece.len())
        }
    }

    #[test]
    fn test_reads_simple_get() {
        let raw: &[u8] = b"GET / HTTP/1.1\r\n\r\n";
        let bytes = RequestReader::new(1024).read_request(&mut &raw[..]).unwrap();

        assert_eq!(bytes.unwrap(), raw);
    }

    #[test]
    fn test_reassembles_split_request() {
        let mut source = Trickle {
            pieces: vec![
                b"POST /files/x HTTP/1.1\r\nCon".to_vec(),
                b"tent-Length: 10\r\n\r\n01234".to_vec(),
                b"56789".to_vec(),
            ],
        };

        let bytes = RequestReader::new(4096).read_request(&mut source).unwrap().unwrap();

        assert!(bytes.ends_with(b"\r\n\r\n0123456789"));
    }

    #[test]
    fn test_body_larger_than_one_chunk() {
        let body = vec![b'z'; CHUNK_SIZE * 3];
        let mut raw = format!("POST /files/big HTTP/1.1\r\nContent-Length: {}\r\n\r\n", body.len()).into_bytes();
        raw.extend_from_slice(&body);

        let bytes = RequestReader::new(1 << 20).read_request(&mut &raw[..]).unwrap().unwrap();

        assert_eq!(bytes, raw);
    }

    #[test]
    fn test_peer_closed_without_data() {
        let raw: &[u8] = b"";
        let result = RequestReader::new(1024).read_request(&mut &raw[..]).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_eof_before_full_body_returns_partial() {
        let raw: &[u8] = b"POST /files/x HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc";
        let bytes = RequestReader::new(1024).read_request(&mut &raw[..]).unwrap().unwrap();

        assert_eq!(bytes, raw);
    }

    #[test]
    fn test_declared_body_too_large() {
        let raw: &[u8] = b"POST /files/x HTTP/1.1\r\nContent-Length: 5000\r\n\r\nabc";
        let result = RequestReader::new(1024).read_request(&mut &raw[..]);

        assert!(matches!(result, Err(ReadError::TooLarge { limit: 1024 })));
    }

    #[test]
    fn test_endless_headers_too_large() {
        let raw = vec![b'a'; 5000];
        let result = RequestReader::new(1024).read_request(&mut &raw[..]);

        assert!(matches!(result, Err(ReadError::TooLarge { .. })));
    }

    #[test]
    fn test_declared_length_parsing() {
        assert_eq!(declared_length(b"POST / HTTP/1.1\r\nContent-Length: 42"), 42);
        assert_eq!(declared_length(b"POST / HTTP/1.1\r\nContent-Length: abc"), 0);
        assert_eq!(declared_length(b"POST / HTTP/1.1\r\ncontent-length: 42"), 0);
        assert_eq!(declared_length(b"GET / HTTP/1.1"), 0);
    }
}
