//! Observability module
//!
//! Logging setup and the panic safety net.

pub mod logging;
pub mod panic;

pub use logging::{LogFormat, init_logging};
pub use panic::install_panic_hook;
