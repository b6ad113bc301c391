//! # Handlers del Servidor
//!
//! Las rutas fijas que el servidor atiende cuando ninguna ruta registrada
//! coincide.
//!
//! ## Categorías
//!
//! - **builtin**: `/`, `/echo/<texto>`, `/user-agent`
//! - **files**: `/files/<nombre>` (lectura con GET, escritura con POST)

pub mod builtin;
pub mod files;

// Re-exportar funciones útiles
pub use builtin::{echo_handler, root_handler, user_agent_handler};
pub use files::{FileError, FileStore};
