pub mod config;
pub mod error;

pub use config::{AppConfig, RuntimeMode, DEFAULT_APP_PORT, DEV_ENV_FILE};
pub use error::QuillError;
