use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::messages::{MessageRequest, MessageRequestWire};
use crate::endpoints::shared::{beta, Deleted, Metadata};
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThreadWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , #[serde(default)]
    pub metadata: Option<Metadata>
}

/// A conversation holding messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub metadata: Option<Metadata>
}

impl From<ThreadWire> for Thread
{   fn from(raw: ThreadWire) -> Self
    {   Thread
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , metadata: raw.metadata
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadRequest
{   /// Messages to start the thread with
    pub messages: Option<Vec<MessageRequest>>
  , pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadRequestWire
{   #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<MessageRequestWire>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>
}

impl ThreadRequest
{   pub fn to_wire(&self) -> ThreadRequestWire
    {   ThreadRequestWire
        {   messages: self.messages.as_ref().map(|messages| {
              messages.iter().map(MessageRequest::to_wire).collect()
            })
          , metadata: self.metadata.clone()
        }
    }
}

impl OpenAi
{   pub async fn create_thread(&self, request: &ThreadRequest)
      -> Result<Thread>
    {   let raw: ThreadWire = self
          .call(beta(ApiRequest::post("/threads").json(&request.to_wire())?))
          .await?;
        Ok(raw.into())
    }

    pub async fn get_thread(&self, thread_id: &str) -> Result<Thread>
    {   let raw: ThreadWire = self
          .call(beta(ApiRequest::get(format!("/threads/{}", thread_id))))
          .await?;
        Ok(raw.into())
    }

    /// Replace the metadata of a thread
    pub async fn modify_thread(
      &self
    , thread_id: &str
    , metadata: Option<Metadata>
    ) -> Result<Thread>
    {   let body = ThreadRequestWire { messages: None, metadata };
        let raw: ThreadWire = self
          .call(beta(
            ApiRequest::post(format!("/threads/{}", thread_id)).json(&body)?
          ))
          .await?;
        Ok(raw.into())
    }

    pub async fn delete_thread(&self, thread_id: &str) -> Result<Deleted>
    {   self.call(beta(ApiRequest::delete(format!("/threads/{}", thread_id))))
          .await
    }
}
