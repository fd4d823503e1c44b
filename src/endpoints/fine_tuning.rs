//! Fine-tuning jobs (`/fine_tuning/jobs`)

use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{Page, PageWire};
use crate::error::Result;
use crate::request::ApiRequest;
use crate::tagged::FineTuningStatus;

/// `n_epochs` is a number or the string `auto`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Epochs
{   Count(u32)
  , Mode(String)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperparametersWire
{   #[serde(skip_serializing_if = "Option::is_none", default)]
    pub n_epochs: Option<Epochs>
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hyperparameters
{   pub n_epochs: Option<Epochs>
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FineTuningJobRequest
{   pub training_file: String
  , pub validation_file: Option<String>
  , pub model: String
  , pub hyperparameters: Option<Hyperparameters>
  , pub suffix: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FineTuningJobRequestWire
{   pub training_file: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>
  , pub model: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperparameters: Option<HyperparametersWire>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>
}

impl FineTuningJobRequest
{   pub fn new(
      model: impl Into<String>
    , training_file: impl Into<String>
    ) -> Self
    {   FineTuningJobRequest
        {   model: model.into()
          , training_file: training_file.into()
          , ..Default::default()
        }
    }

    pub fn to_wire(&self) -> FineTuningJobRequestWire
    {   FineTuningJobRequestWire
        {   training_file: self.training_file.clone()
          , validation_file: self.validation_file.clone()
          , model: self.model.clone()
          , hyperparameters: self.hyperparameters.as_ref()
              .map(|h| HyperparametersWire
              {   n_epochs: h.n_epochs.clone()
              })
          , suffix: self.suffix.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FineTuningJobWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , #[serde(default)]
    pub finished_at: Option<i64>
  , pub model: String
  , pub fine_tuned_model: Option<String>
  , pub organization_id: String
  , pub status: String
  , pub hyperparameters: HyperparametersWire
  , pub training_file: String
  , pub validation_file: Option<String>
  , pub result_files: Vec<String>
  , pub trained_tokens: Option<u64>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FineTuningJob
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub finished_at: Option<i64>
  , pub model: String
  , pub fine_tuned_model: Option<String>
  , pub organization_id: String
  , pub status: FineTuningStatus
  , pub hyperparameters: Hyperparameters
  , pub training_file: String
  , pub validation_file: Option<String>
  , pub result_files: Vec<String>
  , pub trained_tokens: Option<u64>
}

impl From<FineTuningJobWire> for FineTuningJob
{   fn from(raw: FineTuningJobWire) -> Self
    {   FineTuningJob
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , finished_at: raw.finished_at
          , model: raw.model
          , fine_tuned_model: raw.fine_tuned_model
          , organization_id: raw.organization_id
          , status: FineTuningStatus::from_wire(&raw.status)
          , hyperparameters: Hyperparameters
            {   n_epochs: raw.hyperparameters.n_epochs
            }
          , training_file: raw.training_file
          , validation_file: raw.validation_file
          , result_files: raw.result_files
          , trained_tokens: raw.trained_tokens
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricsWire
{   pub step: u64
  , pub train_loss: f64
  , pub train_mean_token_accuracy: Option<f64>
  , #[serde(default)]
    pub valid_loss: Option<f64>
  , #[serde(default)]
    pub valid_mean_token_accuracy: Option<f64>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics
{   pub step: u64
  , pub train_loss: f64
  , pub train_mean_token_accuracy: Option<f64>
  , pub valid_loss: Option<f64>
  , pub valid_mean_token_accuracy: Option<f64>
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FineTuningEventWire
{   pub object: String
  , pub id: String
  , pub created_at: i64
  , pub level: String
  , pub message: String
  , #[serde(default)]
    pub data: Option<MetricsWire>
  , #[serde(rename = "type", default)]
    pub kind: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FineTuningEvent
{   pub object: String
  , pub id: String
  , pub created_at: i64
  , pub level: String
  , pub message: String
  , pub data: Option<Metrics>
  , /// `message` or `metrics`
    #[serde(rename = "type")]
    pub kind: Option<String>
}

impl From<FineTuningEventWire> for FineTuningEvent
{   fn from(raw: FineTuningEventWire) -> Self
    {   FineTuningEvent
        {   object: raw.object
          , id: raw.id
          , created_at: raw.created_at
          , level: raw.level
          , message: raw.message
          , data: raw.data.map(|d| Metrics
            {   step: d.step
              , train_loss: d.train_loss
              , train_mean_token_accuracy: d.train_mean_token_accuracy
              , valid_loss: d.valid_loss
              , valid_mean_token_accuracy: d.valid_mean_token_accuracy
            })
          , kind: raw.kind
        }
    }
}

impl OpenAi
{   pub async fn create_fine_tuning_job(
      &self
    , request: &FineTuningJobRequest
    ) -> Result<FineTuningJob>
    {   let raw: FineTuningJobWire = self
          .call(
            ApiRequest::post("/fine_tuning/jobs")
              .json(&request.to_wire())?
          )
          .await?;
        Ok(raw.into())
    }

    pub async fn list_fine_tuning_jobs(
      &self
    , after: Option<&str>
    , limit: Option<u32>
    ) -> Result<Page<FineTuningJob>>
    {   let page: PageWire<FineTuningJobWire> = self
          .call(
            ApiRequest::get("/fine_tuning/jobs")
              .query("after", after)
              .query("limit", limit)
          )
          .await?;
        Ok(page.map(FineTuningJob::from))
    }

    pub async fn get_fine_tuning_job(&self, job_id: &str)
      -> Result<FineTuningJob>
    {   let raw: FineTuningJobWire = self
          .call(ApiRequest::get(format!("/fine_tuning/jobs/{}", job_id)))
          .await?;
        Ok(raw.into())
    }

    pub async fn cancel_fine_tuning_job(&self, job_id: &str)
      -> Result<FineTuningJob>
    {   let raw: FineTuningJobWire = self
          .call(ApiRequest::post(
            format!("/fine_tuning/jobs/{}/cancel", job_id)
          ))
          .await?;
        Ok(raw.into())
    }

    pub async fn list_fine_tuning_events(
      &self
    , job_id: &str
    , after: Option<&str>
    , limit: Option<u32>
    ) -> Result<Page<FineTuningEvent>>
    {   let page: PageWire<FineTuningEventWire> = self
          .call(
            ApiRequest::get(format!("/fine_tuning/jobs/{}/events", job_id))
              .query("after", after)
              .query("limit", limit)
          )
          .await?;
        Ok(page.map(FineTuningEvent::from))
    }
}
