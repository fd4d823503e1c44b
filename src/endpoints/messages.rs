//! Messages of a thread
//!
//! Message content is a closed union: an `image_file` or `text` block,
//! where text carries `file_citation` / `file_path` annotations. Any
//! other `type` on the wire fails the whole decode.

use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::shared::{
  beta, Metadata, MetadataWire, Page, PageWire,
};
use crate::error::{Error, Result};
use crate::request::{ApiRequest, ListQuery};
use crate::tagged::Role;

// ===== Content =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRefWire
{   pub file_id: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCitationWire
{   pub file_id: String
  , pub quote: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationWire
{   #[serde(rename = "type")]
    pub kind: String
  , pub text: String
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_citation: Option<FileCitationWire>
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_path: Option<FileRefWire>
  , pub start_index: u32
  , pub end_index: u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextWire
{   pub value: String
  , #[serde(default)]
    pub annotations: Vec<AnnotationWire>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentWire
{   #[serde(rename = "type")]
    pub kind: String
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_file: Option<FileRefWire>
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<TextWire>
}

/// A span of message text pointing at a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Annotation
{   #[serde(rename_all = "camelCase")]
    FileCitation
    {   text: String
      , file_id: String
      , quote: String
      , start_index: u32
      , end_index: u32
    }
  , #[serde(rename_all = "camelCase")]
    FilePath
    {   text: String
      , file_id: String
      , start_index: u32
      , end_index: u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent
{   #[serde(rename_all = "camelCase")]
    ImageFile
    {   file_id: String
    }
  , Text
    {   value: String
      , annotations: Vec<Annotation>
    }
}

fn missing(kind: &str, field: &str) -> Error
{   Error::decode(format!("{} block without {}", kind, field))
}

impl TryFrom<AnnotationWire> for Annotation
{   type Error = Error;

    fn try_from(raw: AnnotationWire) -> Result<Self>
    {   match raw.kind.as_str()
        {   "file_citation" => {
              let citation = raw.file_citation
                .ok_or_else(|| missing("file_citation", "file_citation"))?;
              Ok(Annotation::FileCitation
              {   text: raw.text
                , file_id: citation.file_id
                , quote: citation.quote
                , start_index: raw.start_index
                , end_index: raw.end_index
              })
            }
          , "file_path" => {
              let path = raw.file_path
                .ok_or_else(|| missing("file_path", "file_path"))?;
              Ok(Annotation::FilePath
              {   text: raw.text
                , file_id: path.file_id
                , start_index: raw.start_index
                , end_index: raw.end_index
              })
            }
          , other => Err(Error::decode(format!(
              "unknown annotation type: {}", other
            )))
        }
    }
}

impl From<&Annotation> for AnnotationWire
{   fn from(annotation: &Annotation) -> Self
    {   match annotation
        {   Annotation::FileCitation
            { text, file_id, quote, start_index, end_index } => AnnotationWire
            {   kind: "file_citation".to_string()
              , text: text.clone()
              , file_citation: Some(FileCitationWire
                {   file_id: file_id.clone()
                  , quote: quote.clone()
                })
              , file_path: None
              , start_index: *start_index
              , end_index: *end_index
            }
          , Annotation::FilePath
            { text, file_id, start_index, end_index } => AnnotationWire
            {   kind: "file_path".to_string()
              , text: text.clone()
              , file_citation: None
              , file_path: Some(FileRefWire { file_id: file_id.clone() })
              , start_index: *start_index
              , end_index: *end_index
            }
        }
    }
}

impl TryFrom<ContentWire> for MessageContent
{   type Error = Error;

    fn try_from(raw: ContentWire) -> Result<Self>
    {   match raw.kind.as_str()
        {   "image_file" => {
              let image = raw.image_file
                .ok_or_else(|| missing("image_file", "image_file"))?;
              Ok(MessageContent::ImageFile { file_id: image.file_id })
            }
          , "text" => {
              let text = raw.text.ok_or_else(|| missing("text", "text"))?;
              Ok(MessageContent::Text
              {   value: text.value
                , annotations: text.annotations.into_iter()
                    .map(Annotation::try_from)
                    .collect::<Result<_>>()?
              })
            }
          , other => Err(Error::decode(format!(
              "unknown message content type: {}", other
            )))
        }
    }
}

impl From<&MessageContent> for ContentWire
{   fn from(content: &MessageContent) -> Self
    {   match content
        {   MessageContent::ImageFile { file_id } => ContentWire
            {   kind: "image_file".to_string()
              , image_file: Some(FileRefWire { file_id: file_id.clone() })
              , text: None
            }
          , MessageContent::Text { value, annotations } => ContentWire
            {   kind: "text".to_string()
              , image_file: None
              , text: Some(TextWire
                {   value: value.clone()
                  , annotations: annotations.iter()
                      .map(AnnotationWire::from)
                      .collect()
                })
            }
        }
    }
}

// ===== Message =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub thread_id: String
  , pub role: String
  , pub content: Vec<ContentWire>
  , pub assistant_id: Option<String>
  , pub run_id: Option<String>
  , #[serde(default)]
    pub file_ids: Vec<String>
  , #[serde(default)]
    pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub thread_id: String
  , pub role: Role
  , pub content: Vec<MessageContent>
  , pub assistant_id: Option<String>
  , pub run_id: Option<String>
  , pub file_ids: Vec<String>
  , pub metadata: Option<Metadata>
}

impl TryFrom<MessageWire> for Message
{   type Error = Error;

    fn try_from(raw: MessageWire) -> Result<Self>
    {   Ok(Message
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , thread_id: raw.thread_id
          , role: Role::from_wire(&raw.role)
          , content: raw.content.into_iter()
              .map(MessageContent::try_from)
              .collect::<Result<_>>()?
          , assistant_id: raw.assistant_id
          , run_id: raw.run_id
          , file_ids: raw.file_ids
          , metadata: raw.metadata
        })
    }
}

impl From<&Message> for MessageWire
{   fn from(message: &Message) -> Self
    {   MessageWire
        {   id: message.id.clone()
          , object: message.object.clone()
          , created_at: message.created_at
          , thread_id: message.thread_id.clone()
          , role: message.role.as_wire().to_string()
          , content: message.content.iter().map(ContentWire::from).collect()
          , assistant_id: message.assistant_id.clone()
          , run_id: message.run_id.clone()
          , file_ids: message.file_ids.clone()
          , metadata: message.metadata.clone()
        }
    }
}

/// A new message; only the `user` role is accepted by the service
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRequest
{   pub role: Role
  , pub content: String
  , pub file_ids: Option<Vec<String>>
  , pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRequestWire
{   pub role: String
  , pub content: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>
}

impl MessageRequest
{   pub fn user(content: impl Into<String>) -> Self
    {   MessageRequest
        {   role: Role::User
          , content: content.into()
          , file_ids: None
          , metadata: None
        }
    }

    pub fn to_wire(&self) -> MessageRequestWire
    {   MessageRequestWire
        {   role: self.role.as_wire().to_string()
          , content: self.content.clone()
          , file_ids: self.file_ids.clone()
          , metadata: self.metadata.clone()
        }
    }
}

// ===== Message files =====

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageFileWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub message_id: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFile
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub message_id: String
}

impl From<MessageFileWire> for MessageFile
{   fn from(raw: MessageFileWire) -> Self
    {   MessageFile
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , message_id: raw.message_id
        }
    }
}

impl OpenAi
{   pub async fn create_message(
      &self
    , thread_id: &str
    , request: &MessageRequest
    ) -> Result<Message>
    {   let raw: MessageWire = self
          .call(beta(
            ApiRequest::post(format!("/threads/{}/messages", thread_id))
              .json(&request.to_wire())?
          ))
          .await?;
        raw.try_into()
    }

    pub async fn get_message(&self, thread_id: &str, message_id: &str)
      -> Result<Message>
    {   let raw: MessageWire = self
          .call(beta(ApiRequest::get(
            format!("/threads/{}/messages/{}", thread_id, message_id)
          )))
          .await?;
        raw.try_into()
    }

    /// Only the metadata of a message can change
    pub async fn modify_message(
      &self
    , thread_id: &str
    , message_id: &str
    , metadata: Option<&Metadata>
    ) -> Result<Message>
    {   let raw: MessageWire = self
          .call(beta(
            ApiRequest::post(
              format!("/threads/{}/messages/{}", thread_id, message_id)
            )
            .json(&MetadataWire { metadata })?
          ))
          .await?;
        raw.try_into()
    }

    pub async fn list_messages(&self, thread_id: &str, query: &ListQuery)
      -> Result<Page<Message>>
    {   let page: PageWire<MessageWire> = self
          .call(beta(
            ApiRequest::get(format!("/threads/{}/messages", thread_id))
              .list_query(query)
          ))
          .await?;
        page.convert(Message::try_from)
    }

    pub async fn get_message_file(
      &self
    , thread_id: &str
    , message_id: &str
    , file_id: &str
    ) -> Result<MessageFile>
    {   let raw: MessageFileWire = self
          .call(beta(ApiRequest::get(format!(
            "/threads/{}/messages/{}/files/{}",
            thread_id, message_id, file_id
          ))))
          .await?;
        Ok(raw.into())
    }

    pub async fn list_message_files(
      &self
    , thread_id: &str
    , message_id: &str
    , query: &ListQuery
    ) -> Result<Page<MessageFile>>
    {   let page: PageWire<MessageFileWire> = self
          .call(beta(
            ApiRequest::get(format!(
              "/threads/{}/messages/{}/files",
              thread_id, message_id
            ))
            .list_query(query)
          ))
          .await?;
        Ok(page.map(MessageFile::from))
    }
}
