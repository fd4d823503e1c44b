//! Error taxonomy for every client operation

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all client operations
/// Implements Clone so results can be stored and compared in tests
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error
{   /// No credential available, or credentials unusable as headers
    #[error("Configuration error: {0}")]
    Configuration(String)
  , /// A local precondition on the call parameters failed
    #[error("Validation error: {0}")]
    Validation(String)
  , /// The remote service answered with a non-success status
    #[error("{0}")]
    Api(ApiError)
  , /// A tagged union carried a discriminant this client cannot interpret
    #[error("Decode error: {0}")]
    Decode(String)
  , /// The HTTP exchange itself failed
    #[error("HTTP error: {0}")]
    Http(String)
  , /// A body that should have been JSON was not
    #[error("Parse error: {0}")]
    Parse(String)
  , /// A local upload could not be read
    #[error("IO error: {0}")]
    Io(String)
}

impl Error
{   pub(crate) fn validation(msg: impl Into<String>) -> Self
    {   Error::Validation(msg.into())
    }

    pub(crate) fn decode(msg: impl Into<String>) -> Self
    {   Error::Decode(msg.into())
    }

    /// HTTP status of a remote failure, if this is one
    pub fn status(&self) -> Option<u16>
    {   match self
        {   Error::Api(api) => Some(api.status)
          , _ => None
        }
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::Parse(e.to_string())
    }
}

/// `code` is a string for most failures but some endpoints send a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode
{   Text(String)
  , Number(i64)
}

/// Remote failure payload, carried verbatim
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ApiError
{   pub status: u16
  , pub code: Option<ErrorCode>
  , pub message: String
  , pub param: Option<String>
  , pub kind: String
}

/// Wire shape of an error response: `{"error": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope
{   pub error: ErrorBody
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody
{   #[serde(default)]
    pub code: Option<ErrorCode>
  , pub message: String
  , #[serde(default)]
    pub param: Option<String>
  , #[serde(rename = "type", default)]
    pub kind: String
}

impl ErrorEnvelope
{   pub(crate) fn into_error(self, status: u16) -> Error
    {   Error::Api(ApiError
        {   status
          , code: self.error.code
          , message: self.error.message
          , param: self.error.param
          , kind: self.error.kind
        })
    }
}
