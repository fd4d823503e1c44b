//! Assistants and the files attached to them

use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{beta, Deleted, Metadata, Page, PageWire};
use crate::error::{Error, Result};
use crate::request::{ApiRequest, ListQuery};
use crate::tagged::{tools_from_wire, tools_to_wire, Tool, ToolWire};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub name: Option<String>
  , pub description: Option<String>
  , pub model: String
  , pub instructions: Option<String>
  , #[serde(default)]
    pub tools: Vec<ToolWire>
  , #[serde(default)]
    pub file_ids: Vec<String>
  , #[serde(default)]
    pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assistant
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub name: Option<String>
  , pub description: Option<String>
  , pub model: String
  , /// System instructions, up to 32768 characters
    pub instructions: Option<String>
  , pub tools: Vec<Tool>
  , pub file_ids: Vec<String>
  , pub metadata: Option<Metadata>
}

impl TryFrom<AssistantWire> for Assistant
{   type Error = Error;

    fn try_from(raw: AssistantWire) -> Result<Self>
    {   Ok(Assistant
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , name: raw.name
          , description: raw.description
          , model: raw.model
          , instructions: raw.instructions
          , tools: tools_from_wire(raw.tools)?
          , file_ids: raw.file_ids
          , metadata: raw.metadata
        })
    }
}

/// Parameters to create an assistant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantRequest
{   pub model: String
  , pub name: Option<String>
  , pub description: Option<String>
  , pub instructions: Option<String>
  , pub tools: Option<Vec<Tool>>
  , pub file_ids: Option<Vec<String>>
  , pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantRequestWire
{   pub model: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolWire>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>
}

impl AssistantRequest
{   pub fn new(model: impl Into<String>) -> Self
    {   AssistantRequest
        {   model: model.into()
          , ..Default::default()
        }
    }

    pub fn to_wire(&self) -> AssistantRequestWire
    {   AssistantRequestWire
        {   model: self.model.clone()
          , name: self.name.clone()
          , description: self.description.clone()
          , instructions: self.instructions.clone()
          , tools: self.tools.as_deref().map(tools_to_wire)
          , file_ids: self.file_ids.clone()
          , metadata: self.metadata.clone()
        }
    }
}

/// Changes to an existing assistant; unset fields stay as they are
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantModifyRequest
{   pub model: Option<String>
  , pub name: Option<String>
  , pub description: Option<String>
  , pub instructions: Option<String>
  , pub tools: Option<Vec<Tool>>
  , pub file_ids: Option<Vec<String>>
  , pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantModifyRequestWire
{   #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolWire>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>
}

impl AssistantModifyRequest
{   pub fn to_wire(&self) -> AssistantModifyRequestWire
    {   AssistantModifyRequestWire
        {   model: self.model.clone()
          , name: self.name.clone()
          , description: self.description.clone()
          , instructions: self.instructions.clone()
          , tools: self.tools.as_deref().map(tools_to_wire)
          , file_ids: self.file_ids.clone()
          , metadata: self.metadata.clone()
        }
    }
}

// ===== Assistant files =====

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssistantFileWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub assistant_id: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantFile
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub assistant_id: String
}

impl From<AssistantFileWire> for AssistantFile
{   fn from(raw: AssistantFileWire) -> Self
    {   AssistantFile
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , assistant_id: raw.assistant_id
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct AssistantFileRequestWire<'a>
{   file_id: &'a str
}

impl OpenAi
{   pub async fn create_assistant(&self, request: &AssistantRequest)
      -> Result<Assistant>
    {   debug!("Creating assistant on {}", request.model);
        let raw: AssistantWire = self
          .call(beta(ApiRequest::post("/assistants").json(&request.to_wire())?))
          .await?;
        raw.try_into()
    }

    pub async fn get_assistant(&self, assistant_id: &str)
      -> Result<Assistant>
    {   let raw: AssistantWire = self
          .call(beta(ApiRequest::get(
            format!("/assistants/{}", assistant_id)
          )))
          .await?;
        raw.try_into()
    }

    pub async fn modify_assistant(
      &self
    , assistant_id: &str
    , request: &AssistantModifyRequest
    ) -> Result<Assistant>
    {   let raw: AssistantWire = self
          .call(beta(
            ApiRequest::post(format!("/assistants/{}", assistant_id))
              .json(&request.to_wire())?
          ))
          .await?;
        raw.try_into()
    }

    pub async fn delete_assistant(&self, assistant_id: &str)
      -> Result<Deleted>
    {   self.call(beta(ApiRequest::delete(
          format!("/assistants/{}", assistant_id)
        ))).await
    }

    pub async fn list_assistants(&self, query: &ListQuery)
      -> Result<Page<Assistant>>
    {   let page: PageWire<AssistantWire> = self
          .call(beta(ApiRequest::get("/assistants").list_query(query)))
          .await?;
        page.convert(Assistant::try_from)
    }

    /// Attach an uploaded file (purpose `assistants`) to an assistant
    pub async fn create_assistant_file(
      &self
    , assistant_id: &str
    , file_id: &str
    ) -> Result<AssistantFile>
    {   let raw: AssistantFileWire = self
          .call(beta(
            ApiRequest::post(format!("/assistants/{}/files", assistant_id))
              .json(&AssistantFileRequestWire { file_id })?
          ))
          .await?;
        Ok(raw.into())
    }

    pub async fn get_assistant_file(
      &self
    , assistant_id: &str
    , file_id: &str
    ) -> Result<AssistantFile>
    {   let raw: AssistantFileWire = self
          .call(beta(ApiRequest::get(
            format!("/assistants/{}/files/{}", assistant_id, file_id)
          )))
          .await?;
        Ok(raw.into())
    }

    pub async fn delete_assistant_file(
      &self
    , assistant_id: &str
    , file_id: &str
    ) -> Result<Deleted>
    {   self.call(beta(ApiRequest::delete(
          format!("/assistants/{}/files/{}", assistant_id, file_id)
        ))).await
    }

    pub async fn list_assistant_files(
      &self
    , assistant_id: &str
    , query: &ListQuery
    ) -> Result<Page<AssistantFile>>
    {   let page: PageWire<AssistantFileWire> = self
          .call(beta(
            ApiRequest::get(format!("/assistants/{}/files", assistant_id))
              .list_query(query)
          ))
          .await?;
        Ok(page.map(AssistantFile::from))
    }
}
