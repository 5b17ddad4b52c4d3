//! Error types for the viewer's fallible edges (configuration, models, scripts).
//!
//! The camera math itself never fails; everything here comes from I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("model '{0}' contains no geometry")]
    EmptyModel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
