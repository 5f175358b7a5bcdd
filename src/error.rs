use std::io;

use http::status::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError as UrlParseError;

use serde_json::Error as JsonError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum MenuError {
    #[error("Menu configuration error: {0}")]
    Config(String),
    #[error("Menu item '{name}' already exists under '{parent}'")]
    DuplicateName { parent: String, name: String },
    #[error("File System error: {0}")]
    Io(String),
    #[error("Unable to resolve link '{target}' of menu item '{name}': {reason}")]
    LinkResolution {
        name: String,
        target: String,
        reason: String,
    },
    #[error("Menu item not found: {0}")]
    NotFound(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl MenuError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MenuError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MenuError::DuplicateName { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            MenuError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MenuError::LinkResolution { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            MenuError::NotFound(_) => StatusCode::NOT_FOUND,
            MenuError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failure reported by a [`crate::link::LinkResolver`].
///
/// Inside URL resolution both variants collapse to "no URL". Inside the active-state refresh
/// they become [`MenuError::LinkResolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum LinkError {
    #[error("Invalid link: {0}")]
    InvalidLink(String),
    #[error("Link could only be generated in degraded form: {0}")]
    Degraded(String),
}

impl From<toml::de::Error> for MenuError {
    fn from(src: toml::de::Error) -> MenuError {
        MenuError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<JsonError> for MenuError {
    fn from(src: JsonError) -> MenuError {
        MenuError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<UrlParseError> for MenuError {
    fn from(src: UrlParseError) -> MenuError {
        MenuError::Config(format!("Invalid URL: {src}"))
    }
}

impl From<io::Error> for MenuError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => MenuError::NotFound(format!("{x}")),
            _ => MenuError::Io(format!("IOError: {}", x.kind())),
        }
    }
}
