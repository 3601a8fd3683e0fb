//! Settings handling
//!
//! Loading and validation of the JSON settings document.

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{load, load_from_str};
pub use settings::{DEFAULT_SETTINGS_FILE, SETTINGS_ENV_VAR, Settings};
pub use validation::{DEFAULT_REQUIRED_KEYS, KeySource, RequiredKeys, validate};
