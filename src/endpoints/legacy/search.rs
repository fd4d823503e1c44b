use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::ListWire;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::validate;

/// Rank `documents`, or the documents of an uploaded `file`, against
/// `query`; exactly one of the two sources is allowed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest
{   pub query: String
  , pub documents: Option<Vec<String>>
  , pub file: Option<String>
  , pub max_rerank: Option<u32>
  , pub return_metadata: Option<bool>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequestWire
{   pub query: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rerank: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub return_metadata: Option<bool>
}

impl SearchRequest
{   pub fn validate(&self) -> Result<()>
    {   validate::exactly_one(
          ("documents", &self.documents),
          ("file", &self.file)
        )
    }

    pub fn to_wire(&self) -> SearchRequestWire
    {   SearchRequestWire
        {   query: self.query.clone()
          , documents: self.documents.clone()
          , file: self.file.clone()
          , max_rerank: self.max_rerank
          , return_metadata: self.return_metadata
        }
    }
}

/// Score of one document; `document` is its index in the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult
{   pub document: u32
  , pub score: f64
}

impl OpenAi
{   pub async fn create_search(
      &self
    , engine_id: &str
    , request: &SearchRequest
    ) -> Result<Vec<SearchResult>>
    {   request.validate()?;
        let list: ListWire<SearchResult> = self
          .call(
            ApiRequest::post(format!("/engines/{}/search", engine_id))
              .json(&request.to_wire())?
          )
          .await?;
        Ok(list.data)
    }
}
