//! # Dispatcher
//! src/router/dispatcher.rs
//!
//! Resuelve un request a una respuesta. Orden de prioridad, gana el primero:
//!
//! 1. rutas registradas en el `Router`
//! 2. `GET /` exacto
//! 3. `GET /echo/...`
//! 4. `GET /user-agent...`
//! 5. `GET|POST /files/...`
//! 6. 404
//!
//! Un request que no se pudo parsear también termina en 404.

use super::Router;
use crate::handlers::builtin::{self, ECHO_PREFIX, USER_AGENT_PREFIX};
use crate::handlers::files::{FileStore, FILES_PREFIX};
use crate::http::{Method, Request, Response};
use log::{debug, info};

/// Combina la tabla de rutas con los handlers built-in
///
/// Se comparte entre workers detrás de un `Arc`; nada se modifica
/// después de construirlo.
pub struct Dispatcher {
    router: Router,
    files: FileStore,
}

impl Dispatcher {
    pub fn new(router: Router, files: FileStore) -> Self {
        Self { router, files }
    }

    /// Parsea los bytes crudos y despacha
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::router::{Dispatcher, Router};
    /// use minihttp::handlers::FileStore;
    /// use minihttp::http::StatusCode;
    ///
    /// let dispatcher = Dispatcher::new(Router::new(), FileStore::new(""));
    ///
    /// let response = dispatcher.handle(b"GET /echo/abc HTTP/1.1\r\n\r\n");
    /// assert_eq!(response.status(), StatusCode::Ok);
    ///
    /// let response = dispatcher.handle(b"garbage");
    /// assert_eq!(response.status(), StatusCode::NotFound);
    /// ```
    pub fn handle(&self, raw: &[u8]) -> Response {
        match Request::parse(raw) {
            Ok(request) => {
                info!("{} {}", request.method(), request.path());
                self.dispatch(&request)
            }
            Err(e) => {
                info!("request inválido: {}", e);
                Response::not_found()
            }
        }
    }

    /// Despacha un request ya parseado
    pub fn dispatch(&self, request: &Request) -> Response {
        if let Some(response) = self.router.route(request) {
            debug!("ruta registrada: {} {}", request.method(), request.path());
            return response;
        }

        let path = request.path();

        match request.method() {
            Method::GET if path == "/" => builtin::root_handler(request),
            Method::GET if path.starts_with(ECHO_PREFIX) => builtin::echo_handler(request),
            Method::GET if path.starts_with(USER_AGENT_PREFIX) => builtin::user_agent_handler(request),
            Method::GET if path.starts_with(FILES_PREFIX) => self.files.read_handler(request),
            Method::POST if path.starts_with(FILES_PREFIX) => self.files.write_handler(request),
            _ => Response::not_found(),
        }
    }
}
