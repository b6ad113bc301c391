//! # minihttp
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo: un request por conexión, rutas registradas
//! por la aplicación más un conjunto fijo de rutas built-in.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Tokenizer, lectura, parsing y escritura del protocolo
//! - `router`: Tabla de rutas registradas y dispatcher
//! - `handlers`: Rutas built-in (`/`, `/echo/`, `/user-agent`, `/files/`)
//! - `server`: Loop de `accept`, pool de workers y shutdown
//! - `config`: Configuración por CLI y variables de entorno
//! - `logger`: Inicialización del logging
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use minihttp::config::Config;
//! use minihttp::http::{Request, Response};
//! use minihttp::router::Router;
//! use minihttp::server::Server;
//!
//! let mut router = Router::new();
//! router.get("/hello", |_req: &Request, res: &mut Response| res.set_body("Hello!"));
//!
//! let server = Server::bind(Config::default(), router).expect("bind");
//! server.run().expect("Error al correr el servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod logger;
pub mod router;
pub mod server;
