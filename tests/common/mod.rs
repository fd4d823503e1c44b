#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use openai_typed::transport::HttpBody;
use openai_typed::{
  ClientConfig, HttpRequest, HttpResponse, OpenAi, Result, Transport
};

/// Answers every request with one canned response and records what
/// it was asked to send
pub struct FakeTransport
{   status: u16
  , body: Bytes
  , requests: Mutex<Vec<HttpRequest>>
}

impl FakeTransport
{   pub fn new(status: u16, body: impl Into<Bytes>) -> Arc<Self>
    {   Arc::new(FakeTransport
        {   status
          , body: body.into()
          , requests: Mutex::new(vec![])
        })
    }

    pub fn json(status: u16, body: Value) -> Arc<Self>
    {   Self::new(status, body.to_string())
    }

    pub fn calls(&self) -> usize
    {   self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> HttpRequest
    {   self.requests.lock().unwrap()
          .last()
          .cloned()
          .expect("no request was sent")
    }

    /// Body of the last request, parsed as JSON
    pub fn last_json(&self) -> Value
    {   match self.last().body
        {   Some(HttpBody::Text(text)) => {
              serde_json::from_str(&text).expect("body is not JSON")
            }
          , other => panic!("expected a JSON body, got {:?}", other)
        }
    }

    pub fn last_header(&self, name: &str) -> Option<String>
    {   self.last().headers
          .get(name)
          .map(|v| v.to_str().unwrap().to_string())
    }
}

#[async_trait]
impl Transport for FakeTransport
{   async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>
    {   self.requests.lock().unwrap().push(request);
        Ok(HttpResponse
        {   status: self.status
          , body: self.body.clone()
        })
    }
}

pub fn init_logger()
{   let _ = env_logger::builder().is_test(true).try_init();
}

pub fn config() -> ClientConfig
{   ClientConfig
    {   api_key: Some("sk-test".to_string())
      , organization: Some("org-test".to_string())
      , ..Default::default()
    }
}

/// Client over `transport` with a test key and organization
pub fn client(transport: Arc<FakeTransport>) -> OpenAi
{   init_logger();
    OpenAi::with_transport(config(), transport)
}
