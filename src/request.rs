//! Input contract of the transport invoker
//!
//! Endpoint mappers describe a call as an [`ApiRequest`]; the client
//! turns it into one HTTP round trip.

use std::path::PathBuf;

use bytes::Bytes;
use log::debug;
use reqwest::Method;
use serde::Serialize;

use crate::error::{Error, Result};

/// One call against the API, relative to the configured base URL
#[derive(Debug, Clone)]
pub struct ApiRequest
{   pub method: Method
  , pub path: String
  , /// Caller supplied headers, these win over the defaults
    pub headers: Vec<(String, String)>
  , /// Absent values are dropped when the URL is built
    pub query: Vec<(String, Option<String>)>
  , pub body: Option<RequestBody>
  , /// Return the body as bytes instead of decoding JSON
    pub binary: bool
}

/// Request body variants accepted by the invoker
#[derive(Debug, Clone)]
pub enum RequestBody
{   /// Encoded to JSON by the invoker
    Json(serde_json::Value)
  , /// Sent as is
    Text(String)
  , Multipart(MultipartForm)
}

/// Successful result of an invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Payload
{   Json(serde_json::Value)
  , Binary(Bytes)
}

impl ApiRequest
{   /// A GET request for `path`
    pub fn new(path: impl Into<String>) -> Self
    {   ApiRequest
        {   method: Method::GET
          , path: path.into()
          , headers: vec![]
          , query: vec![]
          , body: None
          , binary: false
        }
    }

    pub fn get(path: impl Into<String>) -> Self
    {   Self::new(path)
    }

    pub fn post(path: impl Into<String>) -> Self
    {   Self::new(path).method(Method::POST)
    }

    pub fn delete(path: impl Into<String>) -> Self
    {   Self::new(path).method(Method::DELETE)
    }

    pub fn method(mut self, method: Method) -> Self
    {   self.method = method;
        self
    }

    pub fn header(
      mut self
    , name: impl Into<String>
    , value: impl Into<String>
    ) -> Self
    {   self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds `key` to the query string only when `value` is present
    pub fn query<V: ToString>(
      mut self
    , key: &str
    , value: Option<V>
    ) -> Self
    {   self.query.push((
          key.to_string(),
          value.map(|v| v.to_string())
        ));
        self
    }

    pub fn list_query(self, list: &ListQuery) -> Self
    {   self.query("limit", list.limit)
          .query("order", list.order.map(|o| o.as_str()))
          .query("after", list.after.as_deref())
          .query("before", list.before.as_deref())
    }

    /// Serializes `body` now so the invoker only handles values
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self>
    {   let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn text(mut self, body: impl Into<String>) -> Self
    {   self.body = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self
    {   self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn binary(mut self) -> Self
    {   self.binary = true;
        self
    }
}

// ===== Pagination =====

/// Sort order on `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order
{   Asc
  , Desc
}

impl Order
{   pub fn as_str(&self) -> &'static str
    {   match self
        {   Order::Asc => "asc"
          , Order::Desc => "desc"
        }
    }
}

/// Cursor options shared by every list operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery
{   pub limit: Option<u32>
  , pub order: Option<Order>
  , pub after: Option<String>
  , pub before: Option<String>
}

// ===== Multipart =====

/// Transport independent multipart form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm
{   pub parts: Vec<FormPart>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart
{   pub name: String
  , pub value: PartValue
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue
{   Text(String)
  , File
    {   filename: String
      , bytes: Vec<u8>
    }
}

impl MultipartForm
{   pub fn new() -> Self
    {   Self::default()
    }

    pub fn text(
      mut self
    , name: &str
    , value: impl Into<String>
    ) -> Self
    {   self.parts.push(FormPart
        {   name: name.to_string()
          , value: PartValue::Text(value.into())
        });
        self
    }

    /// Adds a text part only when `value` is present
    pub fn text_opt<V: ToString>(
      self
    , name: &str
    , value: Option<V>
    ) -> Self
    {   match value
        {   Some(v) => self.text(name, v.to_string())
          , None => self
        }
    }

    pub fn part(mut self, part: FormPart) -> Self
    {   self.parts.push(part);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PartValue>
    {   self.parts.iter()
          .find(|p| p.name == name)
          .map(|p| &p.value)
    }
}

// ===== Binary input =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource
{   Bytes(Vec<u8>)
  , Path(PathBuf)
}

/// Binary input for upload style endpoints
///
/// Every part needs a filename: the explicit one, else the final
/// component of the local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload
{   pub source: UploadSource
  , pub filename: Option<String>
}

impl Upload
{   pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self
    {   Upload
        {   source: UploadSource::Bytes(bytes.into())
          , filename: None
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self
    {   Upload
        {   source: UploadSource::Path(path.into())
          , filename: None
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self
    {   self.filename = Some(filename.into());
        self
    }

    pub fn resolve_filename(&self) -> Result<String>
    {   if let Some(name) = &self.filename
        {   return Ok(name.clone());
        }

        match &self.source
        {   UploadSource::Path(path) => path.file_name()
              .map(|n| n.to_string_lossy().into_owned())
              .ok_or_else(|| Error::validation(format!(
                "cannot derive a filename from {}",
                path.display()
              )))
          , UploadSource::Bytes(_) => Err(Error::validation(
              "a filename is required when uploading raw bytes"
            ))
        }
    }

    /// Resolves the filename, then loads the bytes
    pub(crate) async fn into_part(self, field: &str)
      -> Result<FormPart>
    {   let filename = self.resolve_filename()?;
        let bytes = match self.source
        {   UploadSource::Bytes(bytes) => bytes
          , UploadSource::Path(path) => {
              debug!("Reading upload from {}", path.display());
              tokio::fs::read(&path).await.map_err(|e| {
                Error::Io(format!("{}: {}", path.display(), e))
              })?
            }
        };

        Ok(FormPart
        {   name: field.to_string()
          , value: PartValue::File { filename, bytes }
        })
    }
}
