//! # Tokenizer
//! src/http/tokenizer.rs
//!
//! Funciones de partición sobre las que se construye todo el parsing.
//! No hay soporte de comillas ni de escapes: el delimitador se busca
//! literalmente, de izquierda a derecha.

/// Delimitador por defecto (un espacio)
pub const SPACE: &str = " ";

/// Separador entre líneas HTTP
pub const CRLF: &str = "\r\n";

/// Separador entre nombre y valor de un header
pub const HEADER_SEPARATOR: &str = ": ";

/// Separador entre tokens de `Accept-Encoding`
pub const LIST_SEPARATOR: &str = ", ";

/// Frontera entre el bloque de headers y el body
pub const HEADER_END: &[u8] = b"\r\n\r\n";

/// Parte un string en cada ocurrencia del delimitador
///
/// El resto que queda después de la última ocurrencia se agrega como
/// último elemento, así que un input vacío produce `[""]`.
///
/// # Ejemplo
/// ```
/// use minihttp::http::tokenizer::split;
///
/// assert_eq!(split("GET / HTTP/1.1", " "), vec!["GET", "/", "HTTP/1.1"]);
/// assert_eq!(split("", " "), vec![""]);
/// ```
pub fn split<'a>(input: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![input];
    }

    let mut parts = Vec::new();
    let mut rest = input;

    while let Some(pos) = rest.find(delimiter) {
        parts.push(&rest[..pos]);
        rest = &rest[pos + delimiter.len()..];
    }
    parts.push(rest);

    parts
}

/// Parte un string solo en la primera ocurrencia del delimitador
///
/// Retorna `None` si el delimitador no aparece.
///
/// # Ejemplo
/// ```
/// use minihttp::http::tokenizer::split_once;
///
/// assert_eq!(split_once("Host: a: b", ": "), Some(("Host", "a: b")));
/// assert_eq!(split_once("Host", ": "), None);
/// ```
pub fn split_once<'a>(input: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let pos = input.find(delimiter)?;
    Some((&input[..pos], &input[pos + delimiter.len()..]))
}

/// Busca la primera posición de `needle` dentro de un buffer de bytes
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
