//! One module per endpoint group
//!
//! Each module holds the wire structs (suffix `Wire`, snake_case as the
//! service sends them), the application structs (camelCase when
//! serialized), the conversions between them and the `OpenAi` methods
//! that issue the calls.

pub mod assistants;
pub mod audio;
pub mod chat;
pub mod completions;
pub mod edits;
pub mod embeddings;
pub mod files;
pub mod fine_tunes;
pub mod fine_tuning;
pub mod images;
pub mod legacy;
pub mod messages;
pub mod models;
pub mod moderations;
pub mod runs;
pub mod shared;
pub mod threads;

pub use assistants::{
  Assistant, AssistantFile, AssistantModifyRequest, AssistantRequest,
};
pub use audio::{
  Segment, SpeechRequest, Transcript, TranscriptFormat,
  TranscriptionRequest, TranslationRequest,
};
pub use chat::{
  ChatChoice, ChatCompletion, ChatMessage, ChatRequest, FunctionCall,
  FunctionCallChoice,
};
pub use completions::{Completion, CompletionChoice, CompletionRequest};
pub use edits::{Edit, EditChoice, EditRequest};
pub use embeddings::{Embedding, EmbeddingInput, EmbeddingRequest, Embeddings};
pub use files::FileObject;
pub use fine_tunes::{FineTune, FineTuneEvent, FineTuneRequest};
pub use fine_tuning::{
  Epochs, FineTuningEvent, FineTuningJob, FineTuningJobRequest,
  Hyperparameters, Metrics,
};
pub use images::{
  GeneratedImage, ImageData, ImageEditRequest, ImageFormat, ImageRequest,
  ImageVariationRequest, Images,
};
pub use messages::{
  Annotation, Message, MessageContent, MessageFile, MessageRequest,
};
pub use models::Model;
pub use moderations::{Categories, Moderation, ModerationRequest, Moderations};
pub use runs::{
  CodeOutput, RequiredAction, RequiredToolCall, RequestedFunction, Run,
  RunRequest, RunStep, StepDetails, StepToolCall, SubmitToolOutputsAction,
  ToolOutput,
};
pub use shared::{Deleted, LogProbs, LogitBias, Metadata, OneOrMany, Page, Usage};
pub use threads::{Thread, ThreadRequest};
