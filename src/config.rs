//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración explícita que se construye una vez al arrancar y se pasa
//! a quien la necesita. Soporta argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./minihttp --port 4221 --directory /tmp/files/ \
//!   --mode pool --workers 8 --max-queued 128
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=4221 FILES_DIR=/tmp/files ./minihttp
//! ```

use clap::{Parser, ValueEnum};

/// Cómo se atienden las conexiones aceptadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServeMode {
    /// Una conexión a la vez, en el mismo thread que hace `accept`
    Sequential,

    /// Pool acotado de workers
    Pool,
}

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "minihttp")]
#[command(about = "Servidor HTTP/1.1 mínimo con eco, gzip y archivos estáticos")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz de /files/ (vacío = directorio actual)
    #[arg(long, default_value = "", env = "FILES_DIR")]
    pub directory: String,

    /// Modo de atención de conexiones
    #[arg(long, value_enum, default_value = "pool", env = "SERVE_MODE")]
    pub mode: ServeMode,

    // === Workers ===

    /// Número de workers del pool
    #[arg(long, default_value = "4", env = "WORKERS")]
    pub workers: usize,

    /// Conexiones que pueden esperar worker antes de responder 503 (0 = sin límite)
    #[arg(long = "max-queued", default_value = "64", env = "MAX_QUEUED")]
    pub max_queued: usize,

    // === Límites ===

    /// Tamaño máximo de un request (headers + body) en bytes
    #[arg(long = "max-request-size", default_value = "1048576", env = "MAX_REQUEST_SIZE")]
    pub max_request_size: usize,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    // === Logging ===

    /// Nivel de log: off, error, warn, info, debug, trace
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use minihttp::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.mode == ServeMode::Pool && self.workers == 0 {
            return Err("Workers must be >= 1 in pool mode".to_string());
        }

        if self.max_request_size == 0 {
            return Err("Max request size must be > 0".to_string());
        }

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(format!("Unknown log level: {}", self.log_level));
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        let directory = if self.directory.is_empty() { "." } else { &self.directory };

        println!("╔══════════════════════════════════════════════╗");
        println!("║         minihttp Server Configuration        ║");
        println!("╚══════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   Files dir:    {}", directory);
        println!();
        println!("👷 Connections:");
        match self.mode {
            ServeMode::Sequential => println!("   Mode:         sequential"),
            ServeMode::Pool => {
                println!("   Mode:         pool");
                println!("   Workers:      {}", self.workers);
                println!("   Max queued:   {}", self.max_queued);
            }
        }
        println!();
        println!("🚦 Limits:");
        println!("   Max request:  {} bytes", self.max_request_size);
        if self.read_timeout_ms > 0 {
            println!("   Read timeout: {} ms", self.read_timeout_ms);
        } else {
            println!("   Read timeout: disabled");
        }
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "127.0.0.1".to_string(),
            directory: String::new(),
            mode: ServeMode::Pool,
            workers: 4,
            max_queued: 64,
            max_request_size: 1024 * 1024,
            read_timeout_ms: 5_000,
            log_level: "info".to_string(),
        }
    }
}
