use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{Deleted, ListWire};
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelWire
{   pub id: String
  , pub object: String
  , pub created: i64
  , pub owned_by: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model
{   /// The unique identifier for the model
    pub id: String
  , pub object: String
  , pub created: i64
  , /// Organization that owns the model
    pub owned_by: String
}

impl From<ModelWire> for Model
{   fn from(raw: ModelWire) -> Self
    {   Model
        {   id: raw.id
          , object: raw.object
          , created: raw.created
          , owned_by: raw.owned_by
        }
    }
}

impl OpenAi
{   pub async fn list_models(&self) -> Result<Vec<Model>>
    {   let list: ListWire<ModelWire>
          = self.call(ApiRequest::get("/models")).await?;
        debug!("Retrieved {} models", list.data.len());
        Ok(list.data.into_iter().map(Model::from).collect())
    }

    pub async fn get_model(&self, model_id: &str) -> Result<Model>
    {   let raw: ModelWire = self
          .call(ApiRequest::get(format!("/models/{}", model_id)))
          .await?;
        Ok(raw.into())
    }

    /// Delete a fine-tuned model owned by the organization
    pub async fn delete_model(&self, model_id: &str) -> Result<Deleted>
    {   self.call(ApiRequest::delete(format!("/models/{}", model_id)))
          .await
    }
}
