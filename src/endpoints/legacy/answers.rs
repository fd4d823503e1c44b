use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{LogitBias, OneOrMany};
use crate::error::Result;
use crate::request::ApiRequest;
use crate::validate;

/// Answer `question` from `documents` or an uploaded `file`, guided by
/// example question/answer pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerRequest
{   pub question: String
  , /// `(question, answer)` pairs
    pub examples: Vec<(String, String)>
  , pub examples_context: String
  , pub documents: Option<Vec<String>>
  , pub file: Option<String>
  , pub search_model: Option<String>
  , pub max_rerank: Option<u32>
  , pub temperature: Option<f64>
  , pub logprobs: Option<u32>
  , pub max_tokens: Option<u32>
  , pub logit_bias: Option<LogitBias>
  , pub stop: Option<OneOrMany<String>>
  , pub count: Option<u32>
  , pub return_prompt: Option<bool>
  , pub return_metadata: Option<bool>
  , pub expand: Option<Vec<String>>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRequestWire
{   pub model: String
  , pub question: String
  , pub examples: Vec<(String, String)>
  , pub examples_context: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub search_model: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rerank: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<LogitBias>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<OneOrMany<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub return_prompt: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub return_metadata: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>
}

impl AnswerRequest
{   pub fn validate(&self) -> Result<()>
    {   validate::exactly_one(
          ("documents", &self.documents),
          ("file", &self.file)
        )
    }

    pub fn to_wire(&self, engine_id: &str) -> AnswerRequestWire
    {   AnswerRequestWire
        {   model: engine_id.to_string()
          , question: self.question.clone()
          , examples: self.examples.clone()
          , examples_context: self.examples_context.clone()
          , documents: self.documents.clone()
          , file: self.file.clone()
          , search_model: self.search_model.clone()
          , max_rerank: self.max_rerank
          , temperature: self.temperature
          , logprobs: self.logprobs
          , max_tokens: self.max_tokens
          , logit_bias: self.logit_bias.clone()
          , stop: self.stop.clone()
          , n: self.count
          , return_prompt: self.return_prompt
          , return_metadata: self.return_metadata
          , expand: self.expand.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDocument
{   pub document: u32
  , pub text: String
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerWire
{   pub answers: Vec<String>
  , pub completion: String
  , pub model: String
  , pub search_model: String
  , #[serde(default)]
    pub selected_documents: Vec<SelectedDocument>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer
{   pub answers: Vec<String>
  , pub completion: String
  , pub model: String
  , pub search_model: String
  , pub selected_documents: Vec<SelectedDocument>
}

impl From<AnswerWire> for Answer
{   fn from(raw: AnswerWire) -> Self
    {   Answer
        {   answers: raw.answers
          , completion: raw.completion
          , model: raw.model
          , search_model: raw.search_model
          , selected_documents: raw.selected_documents
        }
    }
}

impl OpenAi
{   pub async fn create_answer(
      &self
    , engine_id: &str
    , request: &AnswerRequest
    ) -> Result<Answer>
    {   request.validate()?;
        let raw: AnswerWire = self
          .call(
            ApiRequest::post("/answers").json(&request.to_wire(engine_id))?
          )
          .await?;
        Ok(raw.into())
    }
}
