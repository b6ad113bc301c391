//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Tabla de rutas registradas por la aplicación: `(método, path exacto)`
//! → handler. Se llena antes de arrancar el servidor y después solo se lee.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Dispatcher → Router (rutas registradas)
//!                      ↘ handlers built-in (/, /echo/, /user-agent, /files/)
//!                      ↘ 404
//! ```
//!
//! El match es exacto: sin comodines, sin normalizar la barra final y sin
//! quitar query strings (`/a?x=1` nunca coincide con `/a`).

pub mod dispatcher;

pub use dispatcher::Dispatcher;

use crate::http::{Method, Request, Response, StatusCode};
use std::collections::HashMap;

/// Un handler recibe el Request y completa la Response que se le pasa
///
/// Cualquier closure `Fn(&Request, &mut Response)` que sea `Send + Sync`
/// sirve como handler, incluso si captura contexto:
///
/// ```
/// use minihttp::router::Router;
/// use minihttp::http::{Request, Response};
///
/// let greeting = String::from("Hello World!");
/// let mut router = Router::new();
/// router.get("/", move |_req: &Request, res: &mut Response| res.set_body(greeting.as_str()));
/// ```
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request, response: &mut Response);
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut Response) + Send + Sync,
{
    fn handle(&self, request: &Request, response: &mut Response) {
        self(request, response)
    }
}

/// Tabla de rutas `(método, path)` → handler
pub struct Router {
    routes: HashMap<(Method, String), Box<dyn Handler>>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registra una ruta con su handler
    ///
    /// Registrar dos veces el mismo `(método, path)` reemplaza el handler.
    pub fn register<H>(&mut self, method: Method, path: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.routes.insert((method, path.to_string()), Box::new(handler));
    }

    /// Atajo para `register(Method::GET, ...)`
    pub fn get<H: Handler + 'static>(&mut self, path: &str, handler: H) {
        self.register(Method::GET, path, handler);
    }

    /// Atajo para `register(Method::POST, ...)`
    pub fn post<H: Handler + 'static>(&mut self, path: &str, handler: H) {
        self.register(Method::POST, path, handler);
    }

    /// Cantidad de rutas registradas
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Busca y ejecuta el handler registrado para el request
    ///
    /// El handler arranca con `200 OK` para GET y `201 Created` para POST;
    /// puede cambiarlo con `set_status`. Retorna `None` si no hay ruta.
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::router::Router;
    /// use minihttp::http::{Request, Response, StatusCode};
    ///
    /// let mut router = Router::new();
    /// router.post("/b", |req: &Request, res: &mut Response| res.set_body(req.body().to_vec()));
    ///
    /// let request = Request::parse(b"POST /b HTTP/1.1\r\n\r\nhola").unwrap();
    /// let response = router.route(&request).unwrap();
    /// assert_eq!(response.status(), StatusCode::Created);
    /// assert_eq!(response.body(), b"hola");
    /// ```
    pub fn route(&self, request: &Request) -> Option<Response> {
        let key = (request.method(), request.path().to_string());
        let handler = self.routes.get(&key)?;

        let status = match request.method() {
            Method::POST => StatusCode::Created,
            _ => StatusCode::Ok,
        };
        let mut response = Response::new(status);
        handler.handle(request, &mut response);

        Some(response)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_handler(_req: &Request, res: &mut Response) {
        res.set_body("hello");
    }

    fn parse(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new();
        assert!(router.is_empty());
    }

    #[test]
    fn test_register_route() {
        let mut router = Router::new();
        router.get("/hello", hello_handler);
        router.post("/hello", hello_handler);

        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_route_found() {
        let mut router = Router::new();
        router.get("/hello", hello_handler);

        let response = router.route(&parse(b"GET /hello HTTP/1.1\r\n\r\n")).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"hello");
    }

    #[test]
    fn test_route_not_found() {
        let router = Router::new();
        assert!(router.route(&parse(b"GET /nonexistent HTTP/1.1\r\n\r\n")).is_none());
    }

    #[test]
    fn test_method_must_match() {
        let mut router = Router::new();
        router.get("/hello", hello_handler);

        assert!(router.route(&parse(b"POST /hello HTTP/1.1\r\n\r\n")).is_none());
        assert!(router.route(&parse(b"PUT /hello HTTP/1.1\r\n\r\n")).is_none());
    }

    #[test]
    fn test_exact_path_only() {
        let mut router = Router::new();
        router.get("/hello", hello_handler);

        assert!(router.route(&parse(b"GET /hello/ HTTP/1.1\r\n\r\n")).is_none());
        assert!(router.route(&parse(b"GET /hello?x=1 HTTP/1.1\r\n\r\n")).is_none());
        assert!(router.route(&parse(b"GET /Hello HTTP/1.1\r\n\r\n")).is_none());
    }

    #[test]
    fn test_post_defaults_to_created() {
        let mut router = Router::new();
        router.post("/b", |req: &Request, res: &mut Response| res.set_body(req.body().to_vec()));

        let response = router.route(&parse(b"POST /b HTTP/1.1\r\n\r\npayload")).unwrap();

        assert_eq!(response.status(), StatusCode::Created);
        assert_eq!(response.body(), b"payload");
    }

    #[test]
    fn test_handler_can_override_status() {
        let mut router = Router::new();
        router.get("/gone", |_req: &Request, res: &mut Response| res.set_status(StatusCode::NotFound));

        let response = router.route(&parse(b"GET /gone HTTP/1.1\r\n\r\n")).unwrap();
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_closure_captures_context() {
        let greeting = String::from("Hello World!");
        let mut router = Router::new();
        router.get("/", move |_req: &Request, res: &mut Response| res.set_body(greeting.clone()));

        let response = router.route(&parse(b"GET / HTTP/1.1\r\n\r\n")).unwrap();
        assert_eq!(response.body(), b"Hello World!");
    }

    #[test]
    fn test_register_replaces_handler() {
        let mut router = Router::new();
        router.get("/x", |_req: &Request, res: &mut Response| res.set_body("first"));
        router.get("/x", |_req: &Request, res: &mut Response| res.set_body("second"));

        let response = router.route(&parse(b"GET /x HTTP/1.1\r\n\r\n")).unwrap();
        assert_eq!(router.len(), 1);
        assert_eq!(response.body(), b"second");
    }
}
