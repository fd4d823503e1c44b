use bytes::Bytes;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{Deleted, ListWire};
use crate::error::Result;
use crate::request::{ApiRequest, MultipartForm, Upload};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWire
{   pub id: String
  , #[serde(default)]
    pub object: String
  , pub bytes: u64
  , pub created_at: i64
  , pub filename: String
  , pub purpose: String
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>
}

/// An uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileObject
{   pub id: String
  , pub object: String
  , /// Size in bytes
    pub bytes: u64
  , pub created_at: i64
  , pub filename: String
  , pub purpose: String
  , pub format: Option<String>
  , pub status: Option<String>
  , pub status_details: Option<String>
}

impl From<FileWire> for FileObject
{   fn from(raw: FileWire) -> Self
    {   FileObject
        {   id: raw.id
          , object: raw.object
          , bytes: raw.bytes
          , created_at: raw.created_at
          , filename: raw.filename
          , purpose: raw.purpose
          , format: raw.format
          , status: raw.status
          , status_details: raw.status_details
        }
    }
}

impl OpenAi
{   /// List files, optionally only those with `purpose`
    pub async fn list_files(&self, purpose: Option<&str>)
      -> Result<Vec<FileObject>>
    {   let list: ListWire<FileWire> = self
          .call(ApiRequest::get("/files").query("purpose", purpose))
          .await?;
        Ok(list.data.into_iter().map(FileObject::from).collect())
    }

    /// Upload a file; `purpose` is e.g. `fine-tune` or `assistants`
    pub async fn upload_file(
      &self
    , file: Upload
    , purpose: &str
    ) -> Result<FileObject>
    {   let part = file.into_part("file").await?;
        debug!("Uploading file for purpose {}", purpose);

        let form = MultipartForm::new()
          .part(part)
          .text("purpose", purpose);

        let raw: FileWire = self
          .call(ApiRequest::post("/files").multipart(form))
          .await?;
        Ok(raw.into())
    }

    pub async fn get_file(&self, file_id: &str) -> Result<FileObject>
    {   let raw: FileWire = self
          .call(ApiRequest::get(format!("/files/{}", file_id)))
          .await?;
        Ok(raw.into())
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<Deleted>
    {   self.call(ApiRequest::delete(format!("/files/{}", file_id)))
          .await
    }

    /// Raw content of a file
    pub async fn get_file_content(&self, file_id: &str)
      -> Result<Bytes>
    {   self.call_binary(
          ApiRequest::get(format!("/files/{}/content", file_id))
        ).await
    }
}
