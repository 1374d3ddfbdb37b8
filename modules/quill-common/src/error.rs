use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuillError {
    #[error("{0} environment variable is required")]
    MissingEnv(String),

    #[error("{key} has an invalid value: {value:?}")]
    InvalidEnv { key: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
