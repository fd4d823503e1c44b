//! Records shared by several endpoint groups

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::request::ApiRequest;

/// Free-form key/value pairs attached to assistants, threads,
/// messages and runs
pub type Metadata = BTreeMap<String, String>;

/// Body of the calls that only change metadata
#[derive(Debug, Clone, Serialize)]
pub(crate) struct MetadataWire<'a>
{   #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a Metadata>
}

pub type LogitBias = BTreeMap<String, f64>;

/// Assistants, threads, messages and runs are a beta surface
pub(crate) fn beta(request: ApiRequest) -> ApiRequest
{   request.header("OpenAI-Beta", "assistants=v1")
}

/// A single value or a list of them, as several wire fields allow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T>
{   One(T)
  , Many(Vec<T>)
}

impl From<&str> for OneOrMany<String>
{   fn from(value: &str) -> Self
    {   OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String>
{   fn from(value: String) -> Self
    {   OneOrMany::One(value)
    }
}

impl From<Vec<String>> for OneOrMany<String>
{   fn from(values: Vec<String>) -> Self
    {   OneOrMany::Many(values)
    }
}

// ===== Usage =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageWire
{   pub prompt_tokens: u32
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub completion_tokens: Option<u32>
  , pub total_tokens: u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage
{   pub prompt_tokens: u32
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub completion_tokens: Option<u32>
  , pub total_tokens: u32
}

impl From<UsageWire> for Usage
{   fn from(raw: UsageWire) -> Self
    {   Usage
        {   prompt_tokens: raw.prompt_tokens
          , completion_tokens: raw.completion_tokens
          , total_tokens: raw.total_tokens
        }
    }
}

// ===== Log probabilities =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogProbsWire
{   pub tokens: Vec<String>
  , pub token_logprobs: Vec<Option<f64>>
  , pub text_offset: Vec<u32>
  , #[serde(default)]
    pub top_logprobs: Vec<Option<HashMap<String, f64>>>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogProbs
{   pub tokens: Vec<String>
  , pub token_logprobs: Vec<Option<f64>>
  , pub text_offset: Vec<u32>
  , pub top_logprobs: Vec<Option<HashMap<String, f64>>>
}

impl From<LogProbsWire> for LogProbs
{   fn from(raw: LogProbsWire) -> Self
    {   LogProbs
        {   tokens: raw.tokens
          , token_logprobs: raw.token_logprobs
          , text_offset: raw.text_offset
          , top_logprobs: raw.top_logprobs
        }
    }
}

// ===== Deletion =====

/// Acknowledgement of a delete; identical in both forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted
{   pub id: String
  , pub object: String
  , pub deleted: bool
}

// ===== Pagination =====

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageWire<T>
{   pub data: Vec<T>
  , #[serde(default)]
    pub first_id: Option<String>
  , #[serde(default)]
    pub last_id: Option<String>
  , #[serde(default)]
    pub has_more: bool
}

/// One page of a cursor paginated list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T>
{   pub data: Vec<T>
  , pub first_id: Option<String>
  , pub last_id: Option<String>
  , pub has_more: bool
}

impl<W> PageWire<W>
{   pub(crate) fn convert<A, F>(self, f: F) -> Result<Page<A>>
    where F: FnMut(W) -> Result<A>
    {   Ok(Page
        {   data: self.data.into_iter().map(f).collect::<Result<_>>()?
          , first_id: self.first_id
          , last_id: self.last_id
          , has_more: self.has_more
        })
    }

    pub(crate) fn map<A, F>(self, f: F) -> Page<A>
    where F: FnMut(W) -> A
    {   Page
        {   data: self.data.into_iter().map(f).collect()
          , first_id: self.first_id
          , last_id: self.last_id
          , has_more: self.has_more
        }
    }
}

/// Plain `{"data": [...]}` lists without cursors
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListWire<T>
{   pub data: Vec<T>
}
