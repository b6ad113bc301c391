//! # Logging
//! src/logger.rs
//!
//! Inicializa `simplelog` hacia stderr. Se llama una sola vez desde `main`;
//! el resto del crate usa solo las macros de `log`.

use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Convierte el nivel configurado; un valor desconocido cae en `Info`
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Inicializa el logger de terminal
pub fn init_logger(level: &str) -> Result<(), SetLoggerError> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Debug)
        .build();

    TermLogger::init(parse_level(level), config, TerminalMode::Stderr, ColorChoice::Auto)
}
