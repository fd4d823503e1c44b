use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::OneOrMany;
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct ModerationRequest
{   pub input: OneOrMany<String>
  , pub model: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationRequestWire
{   pub input: OneOrMany<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>
}

impl ModerationRequest
{   pub fn new(input: impl Into<OneOrMany<String>>) -> Self
    {   ModerationRequest
        {   input: input.into()
          , model: None
        }
    }

    pub fn to_wire(&self) -> ModerationRequestWire
    {   ModerationRequestWire
        {   input: self.input.clone()
          , model: self.model.clone()
        }
    }
}

/// Category keys are spelled the same in both forms
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Categories<T>
{   pub hate: T
  , #[serde(rename = "hate/threatening")]
    pub hate_threatening: T
  , #[serde(rename = "self-harm")]
    pub self_harm: T
  , pub sexual: T
  , #[serde(rename = "sexual/minors")]
    pub sexual_minors: T
  , pub violence: T
  , #[serde(rename = "violence/graphic")]
    pub violence_graphic: T
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModerationsWire
{   pub id: String
  , pub model: String
  , pub results: Vec<ModerationWire>
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModerationWire
{   pub flagged: bool
  , pub categories: Categories<bool>
  , pub category_scores: Categories<f64>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moderations
{   pub id: String
  , pub model: String
  , pub results: Vec<Moderation>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moderation
{   pub flagged: bool
  , pub categories: Categories<bool>
  , pub category_scores: Categories<f64>
}

impl From<ModerationsWire> for Moderations
{   fn from(raw: ModerationsWire) -> Self
    {   Moderations
        {   id: raw.id
          , model: raw.model
          , results: raw.results.into_iter()
              .map(|r| Moderation
              {   flagged: r.flagged
                , categories: r.categories
                , category_scores: r.category_scores
              })
              .collect()
        }
    }
}

impl OpenAi
{   pub async fn create_moderation(&self, request: &ModerationRequest)
      -> Result<Moderations>
    {   let raw: ModerationsWire = self
          .call(
            ApiRequest::post("/moderations").json(&request.to_wire())?
          )
          .await?;
        Ok(raw.into())
    }
}
