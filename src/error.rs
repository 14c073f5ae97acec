// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Every failure in the view is contained locally: callers degrade to a
//! placeholder or a null metadata value instead of propagating a panic across
//! the frame boundary. The variants below exist so that the degrading code
//! can log *what* went wrong before falling back.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// The inbound gallery payload could not be decoded.
    #[error("Payload Error: {0}")]
    Payload(String),

    /// A message could not be posted to, or decoded from, the host frame.
    #[error("Transport Error: {0}")]
    Transport(String),

    /// The host node has no field to receive the selection.
    #[error("Missing host binding: {0}")]
    MissingBinding(String),

    #[error("Clipboard Error: {0}")]
    Clipboard(String),

    #[error("HTTP Error: {0}")]
    Http(String),
}

impl Error {
    /// Returns the i18n message key used when this error is shown inline.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Payload(_) => "error-payload",
            Error::Transport(_) => "error-transport",
            Error::MissingBinding(_) => "error-missing-binding",
            Error::Clipboard(_) => "notice-copy-failed",
            Error::Http(_) => "error-http",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Payload(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn json_error_maps_to_payload_variant() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: Error = parse.expect_err("invalid json must fail").into();
        assert!(matches!(err, Error::Payload(_)));
        assert_eq!(err.i18n_key(), "error-payload");
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn missing_binding_mentions_node() {
        let err = Error::MissingBinding("node 12".into());
        assert!(err.to_string().contains("node 12"));
    }
}
