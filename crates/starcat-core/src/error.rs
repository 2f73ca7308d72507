use thiserror::Error;

use starcat_parser::ParserError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tier configuration could not be read: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Tier configuration could not be written: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
