use std::sync::Arc;

use bytes::Bytes;
use log::{debug, error, trace};
use reqwest::header::{
  HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE
};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorEnvelope, Result};
use crate::request::{ApiRequest, Payload, RequestBody};
use crate::transport::{
  HttpBody, HttpRequest, ReqwestTransport, Transport
};

const ORGANIZATION_HEADER: &str = "openai-organization";

/// Typed client for the API
///
/// Holds nothing but read-only configuration and a transport, so a
/// single instance can serve concurrent calls. Every endpoint
/// operation is an `impl OpenAi` block in its own module under
/// [`crate::endpoints`].
#[derive(Clone)]
pub struct OpenAi
{   config: ClientConfig
  , transport: Arc<dyn Transport>
}

impl std::fmt::Debug for OpenAi
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.debug_struct("OpenAi")
          .field("api_base", &self.config.api_base)
          .field("organization", &self.config.organization)
          .finish_non_exhaustive()
    }
}

impl OpenAi
{   /// Create a client over the default reqwest transport
    pub fn new(config: ClientConfig) -> Self
    {   Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with credentials taken from the environment
    pub fn from_env() -> Self
    {   Self::new(ClientConfig::resolve(None, None))
    }

    pub fn with_transport(
      config: ClientConfig
    , transport: Arc<dyn Transport>
    ) -> Self
    {   debug!("Creating OpenAi client for {}", config.api_base);
        OpenAi { config, transport }
    }

    pub fn config(&self) -> &ClientConfig
    {   &self.config
    }

    /// Perform one round trip and normalize its outcome
    ///
    /// Non-success statuses are decoded into [`Error::Api`]; an error
    /// body that is not the expected JSON is reported as
    /// [`Error::Parse`].
    pub async fn invoke(&self, request: ApiRequest) -> Result<Payload>
    {   debug!("{} {}", request.method, request.path);
        let binary = request.binary;
        let http_request = self.prepare(request)?;

        let response = self.transport.execute(http_request).await?;
        trace!("Response status: {}", response.status);

        if !response.is_success()
        {   let envelope: ErrorEnvelope
              = serde_json::from_slice(&response.body).map_err(|e| {
                error!(
                  "Unreadable error body for status {}: {}",
                  response.status, e
                );
                Error::Parse(format!(
                  "status {} with unreadable error body: {}",
                  response.status, e
                ))
              })?;
            debug!("API error: {}", envelope.error.message);
            return Err(envelope.into_error(response.status));
        }

        if binary
        {   return Ok(Payload::Binary(response.body));
        }

        let value = serde_json::from_slice(&response.body)?;
        Ok(Payload::Json(value))
    }

    /// Invoke and decode the JSON body as `T`
    pub(crate) async fn call<T: DeserializeOwned>(
      &self
    , request: ApiRequest
    ) -> Result<T>
    {   match self.invoke(request).await?
        {   Payload::Json(value) => Ok(serde_json::from_value(value)?)
          , Payload::Binary(_) => Err(Error::Parse(
              "expected a JSON body".to_string()
            ))
        }
    }

    /// Invoke in binary mode and return the body untouched
    pub(crate) async fn call_binary(&self, request: ApiRequest)
      -> Result<Bytes>
    {   match self.invoke(request.binary()).await?
        {   Payload::Binary(bytes) => Ok(bytes)
          , Payload::Json(value) => Ok(Bytes::from(value.to_string()))
        }
    }

    fn prepare(&self, request: ApiRequest) -> Result<HttpRequest>
    {   let api_key = self.config.api_key.as_deref()
          .ok_or_else(|| Error::Configuration(format!(
            "no API key given and {} is not set",
            crate::config::API_KEY_ENV
          )))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers
        {   headers.insert(header_name(name)?, header_value(value)?);
        }

        if !headers.contains_key(AUTHORIZATION)
        {   headers.insert(
              AUTHORIZATION,
              header_value(&format!("Bearer {}", api_key))?
            );
        }

        if let Some(org) = &self.config.organization
        {   if !headers.contains_key(ORGANIZATION_HEADER)
            {   headers.insert(
                  HeaderName::from_static(ORGANIZATION_HEADER),
                  header_value(org)?
                );
            }
        }

        let body = match request.body
        {   Some(RequestBody::Json(value)) => {
              if !headers.contains_key(CONTENT_TYPE)
              {   headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/json")
                  );
              }
              let text = value.to_string();
              trace!("Request body: {}", text);
              Some(HttpBody::Text(text))
            }
          , Some(RequestBody::Text(text)) => Some(HttpBody::Text(text))
          , Some(RequestBody::Multipart(form)) => {
              Some(HttpBody::Multipart(form))
            }
          , None => None
        };

        Ok(HttpRequest
        {   method: request.method
          , url: self.url(&request.path, &request.query)
          , headers
          , body
        })
    }

    fn url(
      &self
    , path: &str
    , query: &[(String, Option<String>)]
    ) -> String
    {   let mut url = format!("{}{}", self.config.api_base, path);

        let mut serializer
          = url::form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in query
        {   if let Some(value) = value
            {   serializer.append_pair(key, value);
                any = true;
            }
        }

        if any
        {   url.push('?');
            url.push_str(&serializer.finish());
        }
        url
    }
}

fn header_name(name: &str) -> Result<HeaderName>
{   HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
      Error::Configuration(format!("invalid header {}: {}", name, e))
    })
}

fn header_value(value: &str) -> Result<HeaderValue>
{   HeaderValue::from_str(value).map_err(|e| {
      Error::Configuration(format!("invalid header value: {}", e))
    })
}
