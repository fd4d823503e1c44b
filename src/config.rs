//! Credentials and endpoint configuration for the client

use serde::{Deserialize, Serialize};
use log::debug;

pub const DEFAULT_API_BASE: &str
  = "https://api.openai.com/v1";

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ORGANIZATION_ENV: &str = "OPENAI_ORGANIZATION";

/// Client configuration
///
/// Read-only once handed to a client. Missing credentials are
/// only reported when a call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig
{   /// Bearer token
    pub api_key: Option<String>
  , /// Sent as `OpenAI-Organization` when present
    pub organization: Option<String>
  , /// API base URL, without a trailing slash
    #[serde(default = "default_api_base")]
    pub api_base: String
}

fn default_api_base() -> String
{   DEFAULT_API_BASE.to_string()
}

impl Default for ClientConfig
{   fn default() -> Self
    {   ClientConfig
        {   api_key: None
          , organization: None
          , api_base: default_api_base()
        }
    }
}

impl ClientConfig
{   /// Explicit values first, process environment second
    pub fn resolve(
      api_key: Option<String>
    , organization: Option<String>
    ) -> Self
    {   Self::resolve_with(
          api_key,
          organization,
          |name| std::env::var(name).ok()
        )
    }

    /// Same as [`ClientConfig::resolve`] with a custom variable lookup
    pub fn resolve_with<F>(
      api_key: Option<String>
    , organization: Option<String>
    , lookup: F
    ) -> Self
    where F: Fn(&str) -> Option<String>
    {   let api_key = api_key.or_else(|| {
          debug!("No explicit api key, reading {}", API_KEY_ENV);
          lookup(API_KEY_ENV)
        });
        let organization = organization
          .or_else(|| lookup(ORGANIZATION_ENV));

        ClientConfig
        {   api_key
          , organization
          , api_base: default_api_base()
        }
    }

    /// Point the client at another deployment of the API
    pub fn with_api_base(mut self, api_base: impl Into<String>)
      -> Self
    {   self.api_base = api_base.into()
          .trim_end_matches('/')
          .to_string();
        self
    }
}
