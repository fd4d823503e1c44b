//! Engine based endpoints
//!
//! The first version of the API addressed models as engines. These
//! calls keep their own penalty range (`[0, 1]`) and the
//! documents-or-file inputs of search, classifications and answers.

pub mod answers;
pub mod classifications;
pub mod engines;
pub mod search;

pub use answers::{Answer, AnswerRequest, SelectedDocument};
pub use classifications::{
  Classification, ClassificationRequest, LabeledExample, SelectedExample,
};
pub use engines::{Engine, EngineCompletionRequest};
pub use search::{SearchRequest, SearchResult};
