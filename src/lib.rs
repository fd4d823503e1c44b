//! Typed async client for the OpenAI HTTP API
//!
//! Callers work with camelCase application structs; each endpoint module
//! translates them to the snake_case wire form, performs one HTTP round
//! trip through a [`Transport`] and translates the answer back.
//!
//! ```no_run
//! use openai_typed::{ChatMessage, ChatRequest, OpenAi};
//!
//! # async fn demo() -> openai_typed::Result<()> {
//! let client = OpenAi::from_env();
//! let request = ChatRequest::new(
//!   "gpt-3.5-turbo",
//!   vec![ChatMessage::user("Hello!")]
//! );
//! let reply = client.create_chat_completion(&request).await?;
//! println!("{:?}", reply.choices[0].message.content);
//! # Ok(())
//! # }
//! ```
//!
//! Application field names use plain camelCase throughout, identifier
//! suffixes included: `file_ids` becomes `fileIds`, `thread_id` becomes
//! `threadId`.
//!
//! Without an explicit key the client reads `OPENAI_API_KEY` (and
//! `OPENAI_ORGANIZATION`) once, when it is built.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod tagged;
pub mod transport;
pub mod validate;

pub use client::OpenAi;
pub use config::ClientConfig;
pub use endpoints::*;
pub use error::{ApiError, Error, ErrorCode, Result};
pub use request::{ApiRequest, ListQuery, MultipartForm, Order, Payload, Upload};
pub use tagged::{
  FineTuningStatus, FunctionDef, LastError, LastErrorCode, Role, RunStatus,
  RunStepKind, RunStepStatus, Tool,
};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
