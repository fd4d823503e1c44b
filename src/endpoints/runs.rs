//! Runs of an assistant on a thread, and the steps they take
//!
//! Run and step statuses are open vocabularies. Step details, the tool
//! calls inside them and code interpreter outputs are closed unions;
//! an unknown `type` in any of them fails the decode.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::endpoints::messages::FileRefWire;
use crate::endpoints::shared::{
  beta, Metadata, MetadataWire, Page, PageWire,
};
use crate::endpoints::threads::{ThreadRequest, ThreadRequestWire};
use crate::error::{Error, Result};
use crate::request::{ApiRequest, ListQuery};
use crate::tagged::{
  tools_from_wire, tools_to_wire, LastError, LastErrorWire,
  RequiredActionKind, RunStatus, RunStepKind, RunStepStatus, Tool,
  ToolCallKind, ToolWire,
};

// ===== Required action =====

/// Function invocation requested by the model; `arguments` is the
/// JSON text exactly as generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedFunction
{   pub name: String
  , pub arguments: String
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequiredToolCallWire
{   pub id: String
  , #[serde(rename = "type")]
    pub kind: String
  , pub function: RequestedFunction
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitToolOutputsActionWire
{   pub tool_calls: Vec<RequiredToolCallWire>
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequiredActionWire
{   #[serde(rename = "type")]
    pub kind: String
  , #[serde(default)]
    pub submit_tool_outputs: Option<SubmitToolOutputsActionWire>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredToolCall
{   pub id: String
  , #[serde(rename = "type")]
    pub kind: ToolCallKind
  , pub function: RequestedFunction
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitToolOutputsAction
{   pub tool_calls: Vec<RequiredToolCall>
}

/// What a run in `requiresAction` waits for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredAction
{   #[serde(rename = "type")]
    pub kind: RequiredActionKind
  , pub submit_tool_outputs: Option<SubmitToolOutputsAction>
}

impl From<RequiredActionWire> for RequiredAction
{   fn from(raw: RequiredActionWire) -> Self
    {   RequiredAction
        {   kind: RequiredActionKind::from_wire(&raw.kind)
          , submit_tool_outputs: raw.submit_tool_outputs
              .map(|action| SubmitToolOutputsAction
              {   tool_calls: action.tool_calls.into_iter()
                    .map(|call| RequiredToolCall
                    {   id: call.id
                      , kind: ToolCallKind::from_wire(&call.kind)
                      , function: call.function
                    })
                    .collect()
              })
        }
    }
}

// ===== Run =====

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub thread_id: String
  , pub assistant_id: String
  , pub status: String
  , #[serde(default)]
    pub required_action: Option<RequiredActionWire>
  , #[serde(default)]
    pub last_error: Option<LastErrorWire>
  , #[serde(default)]
    pub expires_at: Option<i64>
  , #[serde(default)]
    pub started_at: Option<i64>
  , #[serde(default)]
    pub cancelled_at: Option<i64>
  , #[serde(default)]
    pub failed_at: Option<i64>
  , #[serde(default)]
    pub completed_at: Option<i64>
  , pub model: String
  , #[serde(default)]
    pub instructions: Option<String>
  , #[serde(default)]
    pub tools: Vec<ToolWire>
  , #[serde(default)]
    pub file_ids: Vec<String>
  , #[serde(default)]
    pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub thread_id: String
  , pub assistant_id: String
  , pub status: RunStatus
  , pub required_action: Option<RequiredAction>
  , pub last_error: Option<LastError>
  , pub expires_at: Option<i64>
  , pub started_at: Option<i64>
  , pub cancelled_at: Option<i64>
  , pub failed_at: Option<i64>
  , pub completed_at: Option<i64>
  , pub model: String
  , pub instructions: Option<String>
  , pub tools: Vec<Tool>
  , pub file_ids: Vec<String>
  , pub metadata: Option<Metadata>
}

impl TryFrom<RunWire> for Run
{   type Error = Error;

    fn try_from(raw: RunWire) -> Result<Self>
    {   Ok(Run
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , thread_id: raw.thread_id
          , assistant_id: raw.assistant_id
          , status: RunStatus::from_wire(&raw.status)
          , required_action: raw.required_action.map(RequiredAction::from)
          , last_error: raw.last_error.map(LastError::from)
          , expires_at: raw.expires_at
          , started_at: raw.started_at
          , cancelled_at: raw.cancelled_at
          , failed_at: raw.failed_at
          , completed_at: raw.completed_at
          , model: raw.model
          , instructions: raw.instructions
          , tools: tools_from_wire(raw.tools)?
          , file_ids: raw.file_ids
          , metadata: raw.metadata
        })
    }
}

/// Overrides for one run; absent values fall back to the assistant's
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunRequest
{   pub assistant_id: String
  , pub model: Option<String>
  , pub instructions: Option<String>
  , pub tools: Option<Vec<Tool>>
  , pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRequestWire
{   pub assistant_id: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolWire>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>
}

impl RunRequest
{   pub fn new(assistant_id: impl Into<String>) -> Self
    {   RunRequest
        {   assistant_id: assistant_id.into()
          , ..Default::default()
        }
    }

    pub fn to_wire(&self) -> RunRequestWire
    {   RunRequestWire
        {   assistant_id: self.assistant_id.clone()
          , model: self.model.clone()
          , instructions: self.instructions.clone()
          , tools: self.tools.as_deref().map(tools_to_wire)
          , metadata: self.metadata.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadRunRequestWire
{   #[serde(flatten)]
    pub run: RunRequestWire
  , pub thread: ThreadRequestWire
}

/// Output of one tool call, answered to a `requiresAction` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput
{   pub tool_call_id: String
  , pub output: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutputWire
{   pub tool_call_id: String
  , pub output: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitToolOutputsWire
{   pub tool_outputs: Vec<ToolOutputWire>
}

// ===== Run steps =====

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeOutputWire
{   #[serde(rename = "type")]
    pub kind: String
  , #[serde(default)]
    pub logs: Option<String>
  , #[serde(default)]
    pub image: Option<FileRefWire>
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeInterpreterCallWire
{   pub input: String
  , #[serde(default)]
    pub outputs: Vec<CodeOutputWire>
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionCallStepWire
{   pub name: String
  , pub arguments: String
  , #[serde(default)]
    pub output: Option<String>
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepToolCallWire
{   pub id: String
  , #[serde(rename = "type")]
    pub kind: String
  , #[serde(default)]
    pub code_interpreter: Option<CodeInterpreterCallWire>
  , #[serde(default)]
    pub function: Option<FunctionCallStepWire>
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageCreationWire
{   pub message_id: String
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepDetailsWire
{   #[serde(rename = "type")]
    pub kind: String
  , #[serde(default)]
    pub message_creation: Option<MessageCreationWire>
  , #[serde(default)]
    pub tool_calls: Option<Vec<StepToolCallWire>>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CodeOutput
{   Logs
    {   logs: String
    }
  , #[serde(rename_all = "camelCase")]
    Image
    {   file_id: String
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StepToolCall
{   CodeInterpreter
    {   id: String
      , input: String
      , outputs: Vec<CodeOutput>
    }
  , Retrieval
    {   id: String
    }
  , Function
    {   id: String
      , name: String
      , arguments: String
      , output: Option<String>
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StepDetails
{   #[serde(rename_all = "camelCase")]
    MessageCreation
    {   message_id: String
    }
  , #[serde(rename_all = "camelCase")]
    ToolCalls
    {   tool_calls: Vec<StepToolCall>
    }
}

impl TryFrom<CodeOutputWire> for CodeOutput
{   type Error = Error;

    fn try_from(raw: CodeOutputWire) -> Result<Self>
    {   match raw.kind.as_str()
        {   "logs" => raw.logs
              .map(|logs| CodeOutput::Logs { logs })
              .ok_or_else(|| Error::decode("logs output without logs"))
          , "image" => raw.image
              .map(|image| CodeOutput::Image { file_id: image.file_id })
              .ok_or_else(|| Error::decode("image output without image"))
          , other => Err(Error::decode(format!(
              "unknown code interpreter output type: {}", other
            )))
        }
    }
}

impl TryFrom<StepToolCallWire> for StepToolCall
{   type Error = Error;

    fn try_from(raw: StepToolCallWire) -> Result<Self>
    {   match raw.kind.as_str()
        {   "code_interpreter" => {
              let call = raw.code_interpreter.ok_or_else(|| {
                Error::decode("code_interpreter call without details")
              })?;
              Ok(StepToolCall::CodeInterpreter
              {   id: raw.id
                , input: call.input
                , outputs: call.outputs.into_iter()
                    .map(CodeOutput::try_from)
                    .collect::<Result<_>>()?
              })
            }
          , "retrieval" => Ok(StepToolCall::Retrieval { id: raw.id })
          , "function" => {
              let call = raw.function.ok_or_else(|| {
                Error::decode("function call without details")
              })?;
              Ok(StepToolCall::Function
              {   id: raw.id
                , name: call.name
                , arguments: call.arguments
                , output: call.output
              })
            }
          , other => Err(Error::decode(format!(
              "unknown tool call type: {}", other
            )))
        }
    }
}

impl TryFrom<StepDetailsWire> for StepDetails
{   type Error = Error;

    fn try_from(raw: StepDetailsWire) -> Result<Self>
    {   match raw.kind.as_str()
        {   "message_creation" => raw.message_creation
              .map(|m| StepDetails::MessageCreation
              {   message_id: m.message_id
              })
              .ok_or_else(|| Error::decode(
                "message_creation step without message_creation"
              ))
          , "tool_calls" => {
              let calls = raw.tool_calls.ok_or_else(|| Error::decode(
                "tool_calls step without tool_calls"
              ))?;
              Ok(StepDetails::ToolCalls
              {   tool_calls: calls.into_iter()
                    .map(StepToolCall::try_from)
                    .collect::<Result<_>>()?
              })
            }
          , other => Err(Error::decode(format!(
              "unknown step details type: {}", other
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunStepWire
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub assistant_id: String
  , pub thread_id: String
  , pub run_id: String
  , #[serde(rename = "type")]
    pub kind: String
  , pub status: String
  , pub step_details: StepDetailsWire
  , #[serde(default)]
    pub last_error: Option<LastErrorWire>
  , #[serde(default)]
    pub expires_at: Option<i64>
  , #[serde(default)]
    pub cancelled_at: Option<i64>
  , #[serde(default)]
    pub failed_at: Option<i64>
  , #[serde(default)]
    pub completed_at: Option<i64>
  , #[serde(default)]
    pub metadata: Option<Metadata>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStep
{   pub id: String
  , pub object: String
  , pub created_at: i64
  , pub assistant_id: String
  , pub thread_id: String
  , pub run_id: String
  , #[serde(rename = "type")]
    pub kind: RunStepKind
  , pub status: RunStepStatus
  , pub step_details: StepDetails
  , pub last_error: Option<LastError>
  , pub expires_at: Option<i64>
  , pub cancelled_at: Option<i64>
  , pub failed_at: Option<i64>
  , pub completed_at: Option<i64>
  , pub metadata: Option<Metadata>
}

impl TryFrom<RunStepWire> for RunStep
{   type Error = Error;

    fn try_from(raw: RunStepWire) -> Result<Self>
    {   Ok(RunStep
        {   id: raw.id
          , object: raw.object
          , created_at: raw.created_at
          , assistant_id: raw.assistant_id
          , thread_id: raw.thread_id
          , run_id: raw.run_id
          , kind: RunStepKind::from_wire(&raw.kind)
          , status: RunStepStatus::from_wire(&raw.status)
          , step_details: raw.step_details.try_into()?
          , last_error: raw.last_error.map(LastError::from)
          , expires_at: raw.expires_at
          , cancelled_at: raw.cancelled_at
          , failed_at: raw.failed_at
          , completed_at: raw.completed_at
          , metadata: raw.metadata
        })
    }
}

fn run_path(thread_id: &str, run_id: &str) -> String
{   format!("/threads/{}/runs/{}", thread_id, run_id)
}

impl OpenAi
{   pub async fn create_run(&self, thread_id: &str, request: &RunRequest)
      -> Result<Run>
    {   debug!(
          "Starting run of {} on thread {}",
          request.assistant_id, thread_id
        );
        let raw: RunWire = self
          .call(beta(
            ApiRequest::post(format!("/threads/{}/runs", thread_id))
              .json(&request.to_wire())?
          ))
          .await?;
        raw.try_into()
    }

    pub async fn get_run(&self, thread_id: &str, run_id: &str)
      -> Result<Run>
    {   let raw: RunWire = self
          .call(beta(ApiRequest::get(run_path(thread_id, run_id))))
          .await?;
        raw.try_into()
    }

    /// Only the metadata of a run can change
    pub async fn modify_run(
      &self
    , thread_id: &str
    , run_id: &str
    , metadata: Option<&Metadata>
    ) -> Result<Run>
    {   let raw: RunWire = self
          .call(beta(
            ApiRequest::post(run_path(thread_id, run_id))
              .json(&MetadataWire { metadata })?
          ))
          .await?;
        raw.try_into()
    }

    pub async fn list_runs(&self, thread_id: &str, query: &ListQuery)
      -> Result<Page<Run>>
    {   let page: PageWire<RunWire> = self
          .call(beta(
            ApiRequest::get(format!("/threads/{}/runs", thread_id))
              .list_query(query)
          ))
          .await?;
        page.convert(Run::try_from)
    }

    pub async fn cancel_run(&self, thread_id: &str, run_id: &str)
      -> Result<Run>
    {   let raw: RunWire = self
          .call(beta(ApiRequest::post(
            format!("{}/cancel", run_path(thread_id, run_id))
          )))
          .await?;
        raw.try_into()
    }

    /// Answer every tool call of a run waiting in `requiresAction`
    pub async fn submit_tool_outputs(
      &self
    , thread_id: &str
    , run_id: &str
    , outputs: &[ToolOutput]
    ) -> Result<Run>
    {   let body = SubmitToolOutputsWire
        {   tool_outputs: outputs.iter()
              .map(|o| ToolOutputWire
              {   tool_call_id: o.tool_call_id.clone()
                , output: o.output.clone()
              })
              .collect()
        };
        let raw: RunWire = self
          .call(beta(
            ApiRequest::post(format!(
              "{}/submit_tool_outputs",
              run_path(thread_id, run_id)
            ))
            .json(&body)?
          ))
          .await?;
        raw.try_into()
    }

    /// Create a thread and start a run on it in one call
    pub async fn create_thread_and_run(
      &self
    , thread: &ThreadRequest
    , run: &RunRequest
    ) -> Result<Run>
    {   let body = ThreadRunRequestWire
        {   run: run.to_wire()
          , thread: thread.to_wire()
        };
        let raw: RunWire = self
          .call(beta(ApiRequest::post("/threads/runs").json(&body)?))
          .await?;
        raw.try_into()
    }

    pub async fn get_run_step(
      &self
    , thread_id: &str
    , run_id: &str
    , step_id: &str
    ) -> Result<RunStep>
    {   let raw: RunStepWire = self
          .call(beta(ApiRequest::get(
            format!("{}/steps/{}", run_path(thread_id, run_id), step_id)
          )))
          .await?;
        raw.try_into()
    }

    pub async fn list_run_steps(
      &self
    , thread_id: &str
    , run_id: &str
    , query: &ListQuery
    ) -> Result<Page<RunStep>>
    {   let page: PageWire<RunStepWire> = self
          .call(beta(
            ApiRequest::get(format!("{}/steps", run_path(thread_id, run_id)))
              .list_query(query)
          ))
          .await?;
        page.convert(RunStep::try_from)
    }
}
