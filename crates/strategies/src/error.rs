// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid strategy settings: {0}")]
    InvalidSettings(#[from] toml::de::Error),
}

impl From<core_types::Error> for Error {
    fn from(err: core_types::Error) -> Self {
        match err {
            core_types::Error::InvalidInput(msg) => Error::InvalidInput(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
