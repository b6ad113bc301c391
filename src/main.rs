//! # minihttp - Entry Point
//! src/main.rs
//!
//! Lee la configuración (CLI + entorno), inicializa el logging y arranca
//! el servidor con las rutas built-in.

use log::{error, info};
use minihttp::config::Config;
use minihttp::logger;
use minihttp::router::Router;
use minihttp::server::Server;

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("Configuración inválida: {}", e);
        std::process::exit(2);
    }

    if let Err(e) = logger::init_logger(&config.log_level) {
        eprintln!("No se pudo inicializar el logger: {}", e);
    }

    config.print_summary();

    let server = match Server::bind(config, Router::new()) {
        Ok(server) => server,
        Err(e) => {
            error!("No se pudo abrir el listener: {}", e);
            std::process::exit(1);
        }
    };

    info!("Listo para recibir conexiones");

    if let Err(e) = server.run() {
        error!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
