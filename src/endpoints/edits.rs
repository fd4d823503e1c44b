use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{LogProbs, LogProbsWire, Usage, UsageWire};
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRequest
{   pub model: String
  , /// Text to use as a starting point
    pub input: Option<String>
  , pub instruction: String
  , pub count: Option<u32>
  , pub temperature: Option<f64>
  , pub top_p: Option<f64>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditRequestWire
{   pub model: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>
  , pub instruction: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>
}

impl EditRequest
{   pub fn to_wire(&self) -> EditRequestWire
    {   EditRequestWire
        {   model: self.model.clone()
          , input: self.input.clone()
          , instruction: self.instruction.clone()
          , n: self.count
          , temperature: self.temperature
          , top_p: self.top_p
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditWire
{   pub object: String
  , pub created: i64
  , pub choices: Vec<EditChoiceWire>
  , pub usage: UsageWire
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditChoiceWire
{   pub text: String
  , pub index: u32
  , #[serde(default)]
    pub logprobs: Option<LogProbsWire>
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edit
{   pub object: String
  , pub created: i64
  , pub choices: Vec<EditChoice>
  , pub usage: Usage
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditChoice
{   pub text: String
  , pub index: u32
  , pub logprobs: Option<LogProbs>
  , pub finish_reason: Option<String>
}

impl From<EditWire> for Edit
{   fn from(raw: EditWire) -> Self
    {   Edit
        {   object: raw.object
          , created: raw.created
          , choices: raw.choices.into_iter()
              .map(|c| EditChoice
              {   text: c.text
                , index: c.index
                , logprobs: c.logprobs.map(LogProbs::from)
                , finish_reason: c.finish_reason
              })
              .collect()
          , usage: raw.usage.into()
        }
    }
}

impl OpenAi
{   pub async fn create_edit(&self, request: &EditRequest)
      -> Result<Edit>
    {   let raw: EditWire = self
          .call(ApiRequest::post("/edits").json(&request.to_wire())?)
          .await?;
        Ok(raw.into())
    }
}
