//! Chat completions with function calling
//!
//! Function call arguments are structured JSON on the application side
//! and a JSON encoded string on the wire.

use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{
  LogProbs, LogProbsWire, LogitBias, OneOrMany, Usage, UsageWire
};
use crate::error::{Error, Result};
use crate::request::ApiRequest;
use crate::tagged::{FunctionDef, Role};
use crate::validate;

// ===== Messages =====

/// A function invocation produced by, or replayed to, the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall
{   pub name: String
  , pub arguments: serde_json::Value
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCallWire
{   pub name: String
  , /// JSON encoded arguments
    pub arguments: String
}

impl From<&FunctionCall> for FunctionCallWire
{   fn from(call: &FunctionCall) -> Self
    {   FunctionCallWire
        {   name: call.name.clone()
          , arguments: call.arguments.to_string()
        }
    }
}

impl TryFrom<FunctionCallWire> for FunctionCall
{   type Error = Error;

    fn try_from(raw: FunctionCallWire) -> Result<Self>
    {   let arguments = serde_json::from_str(&raw.arguments)
          .map_err(|e| Error::Parse(format!(
            "arguments of function {} are not JSON: {}",
            raw.name, e
          )))?;
        Ok(FunctionCall
        {   name: raw.name
          , arguments
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage
{   pub role: Role
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub function_call: Option<FunctionCall>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageWire
{   pub role: String
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub function_call: Option<FunctionCallWire>
}

impl ChatMessage
{   fn with_role(role: Role, content: impl Into<String>) -> Self
    {   ChatMessage
        {   role
          , content: Some(content.into())
          , name: None
          , function_call: None
        }
    }

    pub fn system(content: impl Into<String>) -> Self
    {   Self::with_role(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self
    {   Self::with_role(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self
    {   Self::with_role(Role::Assistant, content)
    }

    /// The result of a function call, fed back to the model
    pub fn function(
      name: impl Into<String>
    , content: impl Into<String>
    ) -> Self
    {   ChatMessage
        {   name: Some(name.into())
          , ..Self::with_role(Role::Function, content)
        }
    }
}

impl From<&ChatMessage> for ChatMessageWire
{   fn from(message: &ChatMessage) -> Self
    {   ChatMessageWire
        {   role: message.role.as_wire().to_string()
          , content: message.content.clone()
          , name: message.name.clone()
          , function_call: message.function_call.as_ref()
              .map(FunctionCallWire::from)
        }
    }
}

impl TryFrom<ChatMessageWire> for ChatMessage
{   type Error = Error;

    fn try_from(raw: ChatMessageWire) -> Result<Self>
    {   Ok(ChatMessage
        {   role: Role::from_wire(&raw.role)
          , content: raw.content
          , name: raw.name
          , function_call: raw.function_call
              .map(FunctionCall::try_from)
              .transpose()?
        })
    }
}

// ===== Request =====

/// How the model picks a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionCallChoice
{   Auto
  , None
  , Named(String)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionCallChoiceWire
{   Mode(String)
  , Named
    {   name: String
    }
}

impl From<&FunctionCallChoice> for FunctionCallChoiceWire
{   fn from(choice: &FunctionCallChoice) -> Self
    {   match choice
        {   FunctionCallChoice::Auto => {
              FunctionCallChoiceWire::Mode("auto".to_string())
            }
          , FunctionCallChoice::None => {
              FunctionCallChoiceWire::Mode("none".to_string())
            }
          , FunctionCallChoice::Named(name) => {
              FunctionCallChoiceWire::Named { name: name.clone() }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub functions: Option<Vec<FunctionDef>>
  , pub function_call: Option<FunctionCallChoice>
  , pub temperature: Option<f64>
  , pub top_p: Option<f64>
  , /// How many choices to generate
    pub count: Option<u32>
  , pub stop: Option<OneOrMany<String>>
  , pub max_tokens: Option<u32>
  , /// Between -2.0 and 2.0
    pub presence_penalty: Option<f64>
  , /// Between -2.0 and 2.0
    pub frequency_penalty: Option<f64>
  , pub logit_bias: Option<LogitBias>
  , pub user: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequestWire
{   pub model: String
  , pub messages: Vec<ChatMessageWire>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionDef>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCallChoiceWire>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<OneOrMany<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<LogitBias>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>
}

impl ChatRequest
{   pub fn new(
      model: impl Into<String>
    , messages: Vec<ChatMessage>
    ) -> Self
    {   ChatRequest
        {   model: model.into()
          , messages
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

    pub fn to_wire(&self) -> ChatRequestWire
    {   ChatRequestWire
        {   model: self.model.clone()
          , messages: self.messages.iter()
              .map(ChatMessageWire::from)
              .collect()
          , functions: self.functions.clone()
          , function_call: self.function_call.as_ref()
              .map(FunctionCallChoiceWire::from)
          , temperature: self.temperature
          , top_p: self.top_p
          , n: self.count
          , stop: self.stop.clone()
          , max_tokens: self.max_tokens
          , presence_penalty: self.presence_penalty
          , frequency_penalty: self.frequency_penalty
          , logit_bias: self.logit_bias.clone()
          , user: self.user.clone()
        }
    }
}

// ===== Response =====

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatCompletionWire
{   pub id: String
  , pub object: String
  , pub created: i64
  , #[serde(default)]
    pub model: String
  , pub choices: Vec<ChatChoiceWire>
  , pub usage: UsageWire
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatChoiceWire
{   pub message: ChatMessageWire
  , pub index: u32
  , #[serde(default)]
    pub logprobs: Option<LogProbsWire>
  , pub finish_reason: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatCompletion
{   pub id: String
  , pub object: String
  , pub created: i64
  , pub model: String
  , pub choices: Vec<ChatChoice>
  , pub usage: Usage
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatChoice
{   pub message: ChatMessage
  , pub index: u32
  , pub logprobs: Option<LogProbs>
  , pub finish_reason: Option<String>
}

impl TryFrom<ChatCompletionWire> for ChatCompletion
{   type Error = Error;

    fn try_from(raw: ChatCompletionWire) -> Result<Self>
    {   let choices: Vec<ChatChoice> = raw.choices.into_iter()
          .map(|choice| -> Result<ChatChoice> {
            Ok(ChatChoice
            {   message: ChatMessage::try_from(choice.message)?
              , index: choice.index
              , logprobs: choice.logprobs.map(LogProbs::from)
              , finish_reason: choice.finish_reason
            })
          })
          .collect::<Result<_>>()?;

        Ok(ChatCompletion
        {   id: raw.id
          , object: raw.object
          , created: raw.created
          , model: raw.model
          , choices
          , usage: raw.usage.into()
        })
    }
}

impl OpenAi
{   pub async fn create_chat_completion(
      &self
    , request: &ChatRequest
    ) -> Result<ChatCompletion>
    {   request.validate()?;
        let raw: ChatCompletionWire = self
          .call(
            ApiRequest::post("/chat/completions")
              .json(&request.to_wire())?
          )
          .await?;
        raw.try_into()
    }
}
