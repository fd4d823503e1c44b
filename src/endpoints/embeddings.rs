use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{Usage, UsageWire};
use crate::error::Result;
use crate::request::ApiRequest;

/// Text or pre-tokenized input; serialized the same in both forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput
{   Text(String)
  , Texts(Vec<String>)
  , Tokens(Vec<Vec<u32>>)
}

impl From<&str> for EmbeddingInput
{   fn from(text: &str) -> Self
    {   EmbeddingInput::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRequest
{   pub model: String
  , pub input: EmbeddingInput
  , pub user: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingRequestWire
{   pub model: String
  , pub input: EmbeddingInput
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>
}

impl EmbeddingRequest
{   pub fn new(
      model: impl Into<String>
    , input: impl Into<EmbeddingInput>
    ) -> Self
    {   EmbeddingRequest
        {   model: model.into()
          , input: input.into()
          , user: None
        }
    }

    pub fn to_wire(&self) -> EmbeddingRequestWire
    {   EmbeddingRequestWire
        {   model: self.model.clone()
          , input: self.input.clone()
          , user: self.user.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddingsWire
{   pub object: String
  , pub model: String
  , pub data: Vec<Embedding>
  , pub usage: UsageWire
}

/// One vector; field names agree in both forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding
{   pub index: u32
  , pub object: String
  , pub embedding: Vec<f64>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embeddings
{   pub object: String
  , pub model: String
  , pub data: Vec<Embedding>
  , pub usage: Usage
}

impl From<EmbeddingsWire> for Embeddings
{   fn from(raw: EmbeddingsWire) -> Self
    {   Embeddings
        {   object: raw.object
          , model: raw.model
          , data: raw.data
          , usage: raw.usage.into()
        }
    }
}

impl OpenAi
{   pub async fn create_embeddings(&self, request: &EmbeddingRequest)
      -> Result<Embeddings>
    {   let raw: EmbeddingsWire = self
          .call(
            ApiRequest::post("/embeddings").json(&request.to_wire())?
          )
          .await?;
        Ok(raw.into())
    }
}
