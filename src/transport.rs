//! HTTP transport seam
//!
//! The client prepares a complete [`HttpRequest`] and hands it to a
//! [`Transport`]. The default one is backed by reqwest; tests plug in
//! a recording fake.

use async_trait::async_trait;
use bytes::Bytes;
use log::{error, trace};
use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::error::{Error, Result};
use crate::request::{MultipartForm, PartValue};

/// Fully prepared request: absolute URL, final headers, encoded body
#[derive(Debug, Clone)]
pub struct HttpRequest
{   pub method: Method
  , pub url: String
  , pub headers: HeaderMap
  , pub body: Option<HttpBody>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBody
{   Text(String)
  , Multipart(MultipartForm)
}

/// Raw outcome of one round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse
{   pub status: u16
  , pub body: Bytes
}

impl HttpResponse
{   pub fn is_success(&self) -> bool
    {   (200..300).contains(&self.status)
    }
}

/// Performs exactly one HTTP round trip
#[async_trait]
pub trait Transport: Send + Sync
{   async fn execute(&self, request: HttpRequest)
      -> Result<HttpResponse>;
}

/// Default transport over a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport
{   http_client: reqwest::Client
}

impl ReqwestTransport
{   pub fn new() -> Self
    {   Self::default()
    }

    pub fn with_client(http_client: reqwest::Client) -> Self
    {   ReqwestTransport { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport
{   async fn execute(&self, request: HttpRequest)
      -> Result<HttpResponse>
    {   let mut builder = self.http_client
          .request(request.method, &request.url)
          .headers(request.headers);

        builder = match request.body
        {   Some(HttpBody::Text(text)) => builder.body(text)
          , Some(HttpBody::Multipart(form)) => {
              builder.multipart(into_reqwest_form(form)?)
            }
          , None => builder
        };

        let response = builder
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::Http(e.to_string())
          })?;

        let status = response.status().as_u16();
        trace!("Response status: {}", status);

        let body = response.bytes().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          Error::Http(e.to_string())
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn into_reqwest_form(form: MultipartForm)
  -> Result<reqwest::multipart::Form>
{   let mut out = reqwest::multipart::Form::new();
    for part in form.parts
    {   out = match part.value
        {   PartValue::Text(text) => out.text(part.name, text)
          , PartValue::File { filename, bytes } => {
              let mime = mime_guess::from_path(&filename)
                .first_or_octet_stream();
              let file_part = reqwest::multipart::Part::bytes(bytes)
                .file_name(filename)
                .mime_str(mime.as_ref())
                .map_err(|e| Error::Http(e.to_string()))?;
              out.part(part.name, file_part)
            }
        };
    }
    Ok(out)
}
