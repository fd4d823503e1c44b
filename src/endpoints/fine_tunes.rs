//! The first generation fine-tuning surface (`/fine-tunes`)

use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::files::{FileObject, FileWire};
use crate::endpoints::shared::ListWire;
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FineTuneRequest
{   /// ID of an uploaded training file
    pub training_file: String
  , pub validation_file: Option<String>
  , /// Base model, e.g. `curie`
    pub model: Option<String>
  , pub epochs: Option<u32>
  , pub batch_size: Option<u32>
  , pub learning_rate: Option<f64>
  , pub loss_weight: Option<f64>
  , pub compute_classification_metrics: Option<bool>
  , pub classification_classes: Option<u32>
  , pub classification_positive_class: Option<String>
  , pub classification_betas: Option<Vec<f64>>
  , /// Up to 40 characters added to the model name
    pub suffix: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FineTuneRequestWire
{   pub training_file: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_file: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub n_epochs: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate_multiplier: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_loss_weight: Option<f64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_classification_metrics: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_n_classes: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_positive_class: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_betas: Option<Vec<f64>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>
}

impl FineTuneRequest
{   pub fn new(training_file: impl Into<String>) -> Self
    {   FineTuneRequest
        {   training_file: training_file.into()
          , ..Default::default()
        }
    }

    pub fn to_wire(&self) -> FineTuneRequestWire
    {   FineTuneRequestWire
        {   training_file: self.training_file.clone()
          , validation_file: self.validation_file.clone()
          , model: self.model.clone()
          , n_epochs: self.epochs
          , batch_size: self.batch_size
          , learning_rate_multiplier: self.learning_rate
          , prompt_loss_weight: self.loss_weight
          , compute_classification_metrics:
              self.compute_classification_metrics
          , classification_n_classes: self.classification_classes
          , classification_positive_class:
              self.classification_positive_class.clone()
          , classification_betas: self.classification_betas.clone()
          , suffix: self.suffix.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FineTuneEventWire
{   pub object: String
  , pub created_at: i64
  , pub level: String
  , pub message: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FineTuneEvent
{   pub object: String
  , pub created_at: i64
  , pub level: String
  , pub message: String
}

impl From<FineTuneEventWire> for FineTuneEvent
{   fn from(raw: FineTuneEventWire) -> Self
    {   FineTuneEvent
        {   object: raw.object
          , created_at: raw.created_at
          , level: raw.level
          , message: raw.message
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FineTuneWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub updated_at: i64
  , pub model: String
  , pub fine_tuned_model: Option<String>
  , pub organization_id: String
  , #[serde(default)]
    pub status: Option<String>
  , pub hyperparams: serde_json::Map<String, serde_json::Value>
  , pub training_files: Vec<FileWire>
  , pub validation_files: Vec<FileWire>
  , pub result_files: Vec<FileWire>
  , #[serde(default)]
    pub events: Vec<FineTuneEventWire>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FineTune
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub updated_at: i64
  , pub model: String
  , pub fine_tuned_model: Option<String>
  , pub organization_id: String
  , pub status: Option<String>
  , pub hyperparams: serde_json::Map<String, serde_json::Value>
  , pub training_files: Vec<FileObject>
  , pub validation_files: Vec<FileObject>
  , pub result_files: Vec<FileObject>
  , pub events: Vec<FineTuneEvent>
}

fn files(raw: Vec<FileWire>) -> Vec<FileObject>
{   raw.into_iter().map(FileObject::from).collect()
}

impl From<FineTuneWire> for FineTune
{   fn from(raw: FineTuneWire) -> Self
    {   FineTune
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , updated_at: raw.updated_at
          , model: raw.model
          , fine_tuned_model: raw.fine_tuned_model
          , organization_id: raw.organization_id
          , status: raw.status
          , hyperparams: raw.hyperparams
          , training_files: files(raw.training_files)
          , validation_files: files(raw.validation_files)
          , result_files: files(raw.result_files)
          , events: raw.events.into_iter()
              .map(FineTuneEvent::from)
              .collect()
        }
    }
}

impl OpenAi
{   pub async fn create_fine_tune(&self, request: &FineTuneRequest)
      -> Result<FineTune>
    {   let raw: FineTuneWire = self
          .call(ApiRequest::post("/fine-tunes").json(&request.to_wire())?)
          .await?;
        Ok(raw.into())
    }

    pub async fn list_fine_tunes(&self) -> Result<Vec<FineTune>>
    {   let list: ListWire<FineTuneWire>
          = self.call(ApiRequest::get("/fine-tunes")).await?;
        Ok(list.data.into_iter().map(FineTune::from).collect())
    }

    pub async fn get_fine_tune(&self, fine_tune_id: &str)
      -> Result<FineTune>
    {   let raw: FineTuneWire = self
          .call(ApiRequest::get(format!("/fine-tunes/{}", fine_tune_id)))
          .await?;
        Ok(raw.into())
    }

    pub async fn cancel_fine_tune(&self, fine_tune_id: &str)
      -> Result<FineTune>
    {   let raw: FineTuneWire = self
          .call(ApiRequest::post(
            format!("/fine-tunes/{}/cancel", fine_tune_id)
          ))
          .await?;
        Ok(raw.into())
    }

    pub async fn list_fine_tune_events(&self, fine_tune_id: &str)
      -> Result<Vec<FineTuneEvent>>
    {   let list: ListWire<FineTuneEventWire> = self
          .call(ApiRequest::get(
            format!("/fine-tunes/{}/events", fine_tune_id)
          ))
          .await?;
        Ok(list.data.into_iter().map(FineTuneEvent::from).collect())
    }
}
