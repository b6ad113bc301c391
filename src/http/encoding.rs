//! # Codificación de Contenido (gzip)
//! src/http/encoding.rs
//!
//! Negociación mínima sobre `Accept-Encoding`: la lista se parte en `", "`
//! y se elige gzip si alguno de los tokens es exactamente `gzip`. No hay
//! pesos `q=`; el orden de la lista no importa.

use super::tokenizer::{self, LIST_SEPARATOR};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use thiserror::Error;

/// Header con la lista de codificaciones que acepta el cliente
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";

/// Único token soportado
pub const GZIP: &str = "gzip";

/// Falla del stream de compresión
#[derive(Debug, Error)]
#[error("gzip compression failed: {0}")]
pub struct EncodingError(#[from] std::io::Error);

/// Indica si el valor de `Accept-Encoding` incluye `gzip`
///
/// # Ejemplo
/// ```
/// use minihttp::http::encoding::accepts_gzip;
///
/// assert!(accepts_gzip(Some("deflate, gzip")));
/// assert!(!accepts_gzip(Some("identity")));
/// assert!(!accepts_gzip(None));
/// ```
pub fn accepts_gzip(accept_encoding: Option<&str>) -> bool {
    match accept_encoding {
        Some(value) => tokenizer::split(value, LIST_SEPARATOR)
            .iter()
            .any(|token| *token == GZIP),
        None => false,
    }
}

/// Comprime bytes con formato gzip y nivel máximo de compresión
pub fn gzip(data: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_accepts_gzip_single() {
        assert!(accepts_gzip(Some("gzip")));
    }

    #[test]
    fn test_accepts_gzip_not_first() {
        assert!(accepts_gzip(Some("encoding-1, gzip, encoding-2")));
    }

    #[test]
    fn test_rejects_other_encodings() {
        assert!(!accepts_gzip(Some("identity")));
        assert!(!accepts_gzip(Some("deflate, br")));
        assert!(!accepts_gzip(Some("")));
    }

    #[test]
    fn test_token_must_match_exactly() {
        // Sin espacio después de la coma el token es "deflate,gzip"
        assert!(!accepts_gzip(Some("deflate,gzip")));
        assert!(!accepts_gzip(Some("GZIP")));
        assert!(!accepts_gzip(Some("gzip;q=1.0")));
    }

    #[test]
    fn test_gzip_inflates_back() {
        let compressed = gzip(b"hello").unwrap();

        // Magic number de gzip
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut decoder = GzDecoder::new(&compressed[..]);
        let mut inflated = String::new();
        decoder.read_to_string(&mut inflated).unwrap();
        assert_eq!(inflated, "hello");
    }

    #[test]
    fn test_gzip_empty_input() {
        let compressed = gzip(b"").unwrap();

        let mut decoder = GzDecoder::new(&compressed[..]);
        let mut inflated = Vec::new();
        decoder.read_to_end(&mut inflated).unwrap();
        assert!(inflated.is_empty());
    }
}
