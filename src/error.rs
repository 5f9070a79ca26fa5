use std::io;
use thiserror::Error;

type FallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while opening an image container.
///
/// Per-tag decoding faults are reported separately as [`DecodeError`] and
/// never abort the decoding of a whole file.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse failed; {0}")]
    ParseFailed(FallbackError),

    #[error("unrecognized file format")]
    UnrecognizedFileFormat,
}

use Error::*;

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        ParseFailed(value.into())
    }
}

impl From<String> for Error {
    fn from(src: String) -> Error {
        ParseFailed(src.into())
    }
}

impl From<&str> for Error {
    fn from(src: &str) -> Error {
        src.to_string().into()
    }
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for crate::Error {
    fn from(e: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        convert_parse_error(e, "")
    }
}

pub(crate) fn convert_parse_error(e: nom::Err<nom::error::Error<&[u8]>>, message: &str) -> Error {
    let s = match e {
        nom::Err::Incomplete(_) => format!("{e}; {message}"),
        nom::Err::Error(e) => format!("{}; {message}", e.code.description()),
        nom::Err::Failure(e) => format!("{}; {message}", e.code.description()),
    };

    s.into()
}

/// A fault while decoding the payload of a single property item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("payload is empty")]
    EmptyPayload,

    #[error("payload is too short; need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },

    #[error("data is invalid: {0}")]
    InvalidData(String),
}

impl DecodeError {
    pub(crate) fn ensure_len(data: &[u8], needed: usize) -> Result<(), DecodeError> {
        if data.is_empty() {
            Err(DecodeError::EmptyPayload)
        } else if data.len() < needed {
            Err(DecodeError::TooShort {
                needed,
                actual: data.len(),
            })
        } else {
            Ok(())
        }
    }
}
