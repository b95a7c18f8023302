use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Grid is full: no empty cell in {width}x{height}")]
    GridFull { width: i32, height: i32 },

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
