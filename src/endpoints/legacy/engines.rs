use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::completions::{Completion, CompletionWire};
use crate::endpoints::shared::{ListWire, LogitBias, OneOrMany};
use crate::error::Result;
use crate::request::ApiRequest;
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineWire
{   pub id: String
  , pub object: String
  , #[serde(default)]
    pub owner: Option<String>
  , #[serde(default)]
    pub ready: bool
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engine
{   pub id: String
  , pub object: String
  , pub owner: Option<String>
  , pub ready: bool
}

impl From<EngineWire> for Engine
{   fn from(raw: EngineWire) -> Self
    {   Engine
        {   id: raw.id
          , object: raw.object
          , owner: raw.owner
          , ready: raw.ready
        }
    }
}

/// Completion against an engine; the engine is named in the path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineCompletionRequest
{   pub prompt: Option<OneOrMany<String>>
  , pub max_tokens: Option<u32>
  , pub temperature: Option<f64>
  , pub top_p: Option<f64>
  , pub count: Option<u32>
  , pub logprobs: Option<u32>
  , pub echo: Option<bool>
  , pub stop: Option<OneOrMany<String>>
  , /// Between 0 and 1
    pub presence_penalty: Option<f64>
  , /// Between 0 and 1
    pub frequency_penalty: Option<f64>
  , pub best_of: Option<u32>
  , pub logit_bias: Option<LogitBias>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineCompletionRequestWire
{   #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<OneOrMany<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub echo: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<OneOrMany<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub best_of: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<LogitBias>
}

impl EngineCompletionRequest
{   pub fn validate(&self) -> Result<()>
    {   validate::penalties(
          self.presence_penalty,
          self.frequency_penalty,
          &validate::LEGACY_PENALTY_RANGE
        )
    }

    pub fn to_wire(&self) -> EngineCompletionRequestWire
    {   EngineCompletionRequestWire
        {   prompt: self.prompt.clone()
          , max_tokens: self.max_tokens
          , temperature: self.temperature
          , top_p: self.top_p
          , n: self.count
          , logprobs: self.logprobs
          , echo: self.echo
          , stop: self.stop.clone()
          , presence_penalty: self.presence_penalty
          , frequency_penalty: self.frequency_penalty
          , best_of: self.best_of
          , logit_bias: self.logit_bias.clone()
        }
    }
}

impl OpenAi
{   pub async fn list_engines(&self) -> Result<Vec<Engine>>
    {   let list: ListWire<EngineWire>
          = self.call(ApiRequest::get("/engines")).await?;
        Ok(list.data.into_iter().map(Engine::from).collect())
    }

    pub async fn get_engine(&self, engine_id: &str) -> Result<Engine>
    {   let raw: EngineWire = self
          .call(ApiRequest::get(format!("/engines/{}", engine_id)))
          .await?;
        Ok(raw.into())
    }

    pub async fn create_engine_completion(
      &self
    , engine_id: &str
    , request: &EngineCompletionRequest
    ) -> Result<Completion>
    {   request.validate()?;
        let raw: CompletionWire = self
          .call(
            ApiRequest::post(format!("/engines/{}/completions", engine_id))
              .json(&request.to_wire())?
          )
          .await?;
        Ok(raw.into())
    }
}
