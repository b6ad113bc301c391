//! # Archivos Estáticos
//! src/handlers/files.rs
//!
//! - `GET /files/<nombre>`: lee el archivo completo del directorio configurado
//! - `POST /files/<nombre>`: crea (o trunca) el archivo con los primeros
//!   `Content-Length` bytes del body
//!
//! Cualquier falla (archivo inexistente, sin permisos, largo inválido,
//! nombre que escapa del directorio) se responde con 404.

use crate::http::response::{CONTENT_LENGTH, CONTENT_TYPE};
use crate::http::{Request, Response, StatusCode};
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Prefijo de las rutas de archivos
pub const FILES_PREFIX: &str = "/files/";

/// Errores del manejo de archivos
#[derive(Debug, Error)]
pub enum FileError {
    /// No se pudo abrir, leer o escribir el archivo
    #[error("file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// `Content-Length` ausente o no numérico
    #[error("invalid Content-Length: {0:?}")]
    InvalidLength(Option<String>),

    /// El nombre está vacío o sale del directorio raíz
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
}

/// Acceso a archivos dentro de un directorio raíz
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Crea un store sobre `root`
    ///
    /// Un `root` vacío significa el directorio de trabajo actual.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directorio raíz
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resuelve un nombre relativo dentro del directorio raíz
    ///
    /// Se rechazan nombres vacíos y cualquier componente `..`, raíz o
    /// prefijo de unidad: el resultado nunca sale de `root`.
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::handlers::FileStore;
    ///
    /// let store = FileStore::new("/tmp/data");
    /// assert!(store.resolve("a/b.txt").is_ok());
    /// assert!(store.resolve("../etc/passwd").is_err());
    /// ```
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        let relative = Path::new(name);

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if name.is_empty() || escapes {
            return Err(FileError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// Lee el archivo completo
    pub fn read(&self, name: &str) -> Result<Vec<u8>, FileError> {
        let path = self.resolve(name)?;
        Ok(fs::read(path)?)
    }

    /// Crea o trunca el archivo y escribe `data`
    pub fn write(&self, name: &str, data: &[u8]) -> Result<(), FileError> {
        let path = self.resolve(name)?;
        let mut file = File::create(path)?;
        file.write_all(data)?;
        file.flush()?;
        Ok(())
    }

    /// Handler para `GET /files/<nombre>`
    pub fn read_handler(&self, req: &Request) -> Response {
        let name = file_name(req);

        match self.read(name) {
            Ok(contents) => {
                debug!("files: leídos {} bytes de {:?}", contents.len(), name);
                Response::new(StatusCode::Ok)
                    .with_header(CONTENT_TYPE, "application/octet-stream")
                    .with_header(CONTENT_LENGTH, &contents.len().to_string())
                    .with_body_bytes(contents)
            }
            Err(e) => {
                debug!("files: GET {:?}: {}", name, e);
                Response::not_found()
            }
        }
    }

    /// Handler para `POST /files/<nombre>`
    ///
    /// Escribe `min(Content-Length, largo del body)` bytes.
    pub fn write_handler(&self, req: &Request) -> Response {
        let name = file_name(req);

        let result = declared_length(req).and_then(|length| {
            let body = req.body();
            let data = &body[..length.min(body.len())];
            self.write(name, data).map(|_| data.len())
        });

        match result {
            Ok(written) => {
                debug!("files: escritos {} bytes en {:?}", written, name);
                Response::new(StatusCode::Created)
            }
            Err(e) => {
                warn!("files: POST {:?}: {}", name, e);
                Response::not_found()
            }
        }
    }
}

/// Nombre del archivo: lo que sigue a `/files/` en el path
fn file_name(req: &Request) -> &str {
    req.path().strip_prefix(FILES_PREFIX).unwrap_or_default()
}

/// Parsea `Content-Length` como largo sin signo
fn declared_length(req: &Request) -> Result<usize, FileError> {
    let value = req.header(CONTENT_LENGTH);

    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .ok_or_else(|| FileError::InvalidLength(value.map(str::to_string)))
}
