//! Text completions against the model based surface

use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{
  LogProbs, LogProbsWire, LogitBias, OneOrMany, Usage, UsageWire
};
use crate::error::Result;
use crate::request::ApiRequest;
use crate::validate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest
{   pub model: String
  , pub prompt: Option<OneOrMany<String>>
  , pub suffix: Option<String>
  , pub max_tokens: Option<u32>
  , pub temperature: Option<f64>
  , pub top_p: Option<f64>
  , /// How many completions to generate for each prompt
    pub count: Option<u32>
  , pub logprobs: Option<u32>
  , pub echo: Option<bool>
  , pub stop: Option<OneOrMany<String>>
  , /// Between -2.0 and 2.0
    pub presence_penalty: Option<f64>
  , /// Between -2.0 and 2.0
    pub frequency_penalty: Option<f64>
  , pub best_of: Option<u32>
  , pub logit_bias: Option<LogitBias>
  , pub user: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequestWire
{   pub model: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<OneOrMany<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>
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
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>
}

impl CompletionRequest
{   pub fn new(model: impl Into<String>) -> Self
    {   CompletionRequest
        {   model: model.into()
          , ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()>
    {   validate::penalties(
          self.presence_penalty,
          self.frequency_penalty,
          &validate::PENALTY_RANGE
        )
    }

    pub fn to_wire(&self) -> CompletionRequestWire
    {   CompletionRequestWire
        {   model: self.model.clone()
          , prompt: self.prompt.clone()
          , suffix: self.suffix.clone()
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
          , user: self.user.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionWire
{   pub id: String
  , #[serde(default)]
    pub object: String
  , pub created: i64
  , pub model: String
  , pub choices: Vec<CompletionChoiceWire>
  , #[serde(default)]
    pub usage: Option<UsageWire>
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionChoiceWire
{   pub text: String
  , pub index: u32
  , #[serde(default)]
    pub logprobs: Option<LogProbsWire>
  , pub finish_reason: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion
{   pub id: String
  , pub object: String
  , pub created: i64
  , pub model: String
  , pub choices: Vec<CompletionChoice>
  , pub usage: Option<Usage>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionChoice
{   pub text: String
  , pub index: u32
  , pub logprobs: Option<LogProbs>
  , pub finish_reason: Option<String>
}

impl From<CompletionChoiceWire> for CompletionChoice
{   fn from(raw: CompletionChoiceWire) -> Self
    {   CompletionChoice
        {   text: raw.text
          , index: raw.index
          , logprobs: raw.logprobs.map(LogProbs::from)
          , finish_reason: raw.finish_reason
        }
    }
}

impl From<CompletionWire> for Completion
{   fn from(raw: CompletionWire) -> Self
    {   Completion
        {   id: raw.id
          , object: raw.object
          , created: raw.created
          , model: raw.model
          , choices: raw.choices.into_iter()
              .map(CompletionChoice::from)
              .collect()
          , usage: raw.usage.map(Usage::from)
        }
    }
}

impl OpenAi
{   pub async fn create_completion(
      &self
    , request: &CompletionRequest
    ) -> Result<Completion>
    {   request.validate()?;
        let raw: CompletionWire = self
          .call(ApiRequest::post("/completions").json(&request.to_wire())?)
          .await?;
        Ok(raw.into())
    }
}
