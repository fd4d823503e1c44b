use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::LogitBias;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::validate;

/// `(text, label)`; sent as a two element array
pub type LabeledExample = (String, String);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationRequest
{   pub query: String
  , /// Exclusive with `file`
    pub examples: Option<Vec<LabeledExample>>
  , pub file: Option<String>
  , pub labels: Option<Vec<String>>
  , pub search_model: Option<String>
  , pub temperature: Option<f64>
  , pub logprobs: Option<u32>
  , pub max_examples: Option<u32>
  , pub logit_bias: Option<LogitBias>
  , pub return_prompt: Option<bool>
  , pub return_metadata: Option<bool>
  , pub expand: Option<Vec<String>>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRequestWire
{   pub model: String
  , pub query: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<LabeledExample>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub search_model: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_examples: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<LogitBias>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub return_prompt: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub return_metadata: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>
}

impl ClassificationRequest
{   pub fn validate(&self) -> Result<()>
    {   validate::exactly_one(
          ("examples", &self.examples),
          ("file", &self.file)
        )
    }

    /// The engine becomes the `model` of the body
    pub fn to_wire(&self, engine_id: &str) -> ClassificationRequestWire
    {   ClassificationRequestWire
        {   model: engine_id.to_string()
          , query: self.query.clone()
          , examples: self.examples.clone()
          , file: self.file.clone()
          , labels: self.labels.clone()
          , search_model: self.search_model.clone()
          , temperature: self.temperature
          , logprobs: self.logprobs
          , max_examples: self.max_examples
          , logit_bias: self.logit_bias.clone()
          , return_prompt: self.return_prompt
          , return_metadata: self.return_metadata
          , expand: self.expand.clone()
        }
    }
}

/// Same field names in both forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedExample
{   pub document: u32
  , pub label: String
  , pub text: String
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassificationWire
{   pub completion: String
  , pub label: String
  , pub model: String
  , pub search_model: String
  , #[serde(default)]
    pub selected_examples: Vec<SelectedExample>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification
{   pub completion: String
  , pub label: String
  , pub model: String
  , pub search_model: String
  , pub selected_examples: Vec<SelectedExample>
}

impl From<ClassificationWire> for Classification
{   fn from(raw: ClassificationWire) -> Self
    {   Classification
        {   completion: raw.completion
          , label: raw.label
          , model: raw.model
          , search_model: raw.search_model
          , selected_examples: raw.selected_examples
        }
    }
}

impl OpenAi
{   pub async fn create_classification(
      &self
    , engine_id: &str
    , request: &ClassificationRequest
    ) -> Result<Classification>
    {   request.validate()?;
        let raw: ClassificationWire = self
          .call(
            ApiRequest::post("/classifications")
              .json(&request.to_wire(engine_id))?
          )
          .await?;
        Ok(raw.into())
    }
}
