//! Discriminated unions shared across endpoints
//!
//! Two policies live here. Status and error code vocabularies are
//! open: known wire values are renamed, anything else passes through
//! untouched as `Other`. The tool union is closed: a wire `type` that
//! is not known fails the decode.
//!
//! An `Other` value that reads like a known application spelling
//! (wire `"inProgress"`, say) serializes as `{"other": "inProgress"}`
//! so it deserializes back to `Other` and not to the known variant.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Serialized shape of an open tag
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OpenTagRepr
{   Plain(String)
  , Other
    {   other: String
    }
}

/// Declares an open-ended tag with its wire and application spelling
macro_rules! open_tag
{   (
      $(#[$meta:meta])*
      $name:ident
      { $( $variant:ident = $wire:literal / $app:literal ),* $(,)? }
    ) => {
      $(#[$meta])*
      #[derive(Debug, Clone, PartialEq, Eq, Hash)]
      pub enum $name
      {   $( $variant, )*
          /// A value this client does not know, kept verbatim
          Other(String)
      }

      impl $name
      {   pub fn from_wire(value: &str) -> Self
          {   match value
              {   $( $wire => $name::$variant, )*
                  other => $name::Other(other.to_string())
              }
          }

          pub fn as_wire(&self) -> &str
          {   match self
              {   $( $name::$variant => $wire, )*
                  $name::Other(value) => value
              }
          }

          pub fn from_app(value: &str) -> Self
          {   match value
              {   $( $app => $name::$variant, )*
                  other => $name::Other(other.to_string())
              }
          }

          pub fn as_app(&self) -> &str
          {   match self
              {   $( $name::$variant => $app, )*
                  $name::Other(value) => value
              }
          }
      }

      impl Serialize for $name
      {   fn serialize<S>(&self, serializer: S)
            -> std::result::Result<S::Ok, S::Error>
          where S: serde::Serializer
          {   match self
              {   $name::Other(value)
                    if !matches!($name::from_app(value), $name::Other(_)) =>
                  {   OpenTagRepr::Other { other: value.clone() }
                        .serialize(serializer)
                  }
                , _ => serializer.serialize_str(self.as_app())
              }
          }
      }

      impl<'de> Deserialize<'de> for $name
      {   fn deserialize<D>(deserializer: D)
            -> std::result::Result<Self, D::Error>
          where D: serde::Deserializer<'de>
          {   match OpenTagRepr::deserialize(deserializer)?
              {   OpenTagRepr::Plain(value) => Ok($name::from_app(&value))
                , OpenTagRepr::Other { other } => Ok($name::Other(other))
              }
          }
      }
    };
}

open_tag!
{   /// Lifecycle of a run
    RunStatus
    {   Queued = "queued" / "queued"
      , InProgress = "in_progress" / "inProgress"
      , RequiresAction = "requires_action" / "requiresAction"
      , Cancelling = "cancelling" / "cancelling"
      , Cancelled = "cancelled" / "cancelled"
      , Failed = "failed" / "failed"
      , Completed = "completed" / "completed"
      , Expired = "expired" / "expired"
    }
}

open_tag!
{   /// Lifecycle of a run step
    RunStepStatus
    {   InProgress = "in_progress" / "inProgress"
      , Cancelled = "cancelled" / "cancelled"
      , Failed = "failed" / "failed"
      , Completed = "completed" / "completed"
      , Expired = "expired" / "expired"
    }
}

open_tag!
{   RunStepKind
    {   MessageCreation = "message_creation" / "messageCreation"
      , ToolCalls = "tool_calls" / "toolCalls"
    }
}

open_tag!
{   RequiredActionKind
    {   SubmitToolOutputs = "submit_tool_outputs" / "submitToolOutputs"
    }
}

open_tag!
{   /// Kind of a tool call the run waits on
    ToolCallKind
    {   Function = "function" / "function"
    }
}

open_tag!
{   LastErrorCode
    {   ServerError = "server_error" / "serverError"
      , RateLimitExceeded = "rate_limit_exceeded" / "rateLimitExceeded"
    }
}

open_tag!
{   /// Author of a chat or thread message
    Role
    {   System = "system" / "system"
      , User = "user" / "user"
      , Assistant = "assistant" / "assistant"
      , Function = "function" / "function"
    }
}

open_tag!
{   FineTuningStatus
    {   ValidatingFiles = "validating_files" / "validatingFiles"
      , Created = "created" / "created"
      , Pending = "pending" / "pending"
      , Queued = "queued" / "queued"
      , Running = "running" / "running"
      , Succeeded = "succeeded" / "succeeded"
      , Failed = "failed" / "failed"
      , Cancelled = "cancelled" / "cancelled"
    }
}

// ===== Error attached to runs and run steps =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastError
{   pub code: LastErrorCode
  , pub message: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastErrorWire
{   pub code: String
  , pub message: String
}

impl From<LastErrorWire> for LastError
{   fn from(raw: LastErrorWire) -> Self
    {   LastError
        {   code: LastErrorCode::from_wire(&raw.code)
          , message: raw.message
        }
    }
}

impl From<&LastError> for LastErrorWire
{   fn from(error: &LastError) -> Self
    {   LastErrorWire
        {   code: error.code.as_wire().to_string()
          , message: error.message.clone()
        }
    }
}

// ===== Tools =====

/// A function the model may call
///
/// Field names agree in both forms, so one type serves both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionDef
{   pub name: String
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>
  , /// JSON Schema of the arguments
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parameters: Option<serde_json::Value>
}

/// Tool enabled on an assistant or a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Tool
{   CodeInterpreter
  , Retrieval
  , Function
    {   function: FunctionDef
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolWire
{   #[serde(rename = "type")]
    pub kind: String
  , #[serde(skip_serializing_if = "Option::is_none", default)]
    pub function: Option<FunctionDef>
}

impl From<&Tool> for ToolWire
{   fn from(tool: &Tool) -> Self
    {   match tool
        {   Tool::CodeInterpreter => ToolWire
            {   kind: "code_interpreter".to_string()
              , function: None
            }
          , Tool::Retrieval => ToolWire
            {   kind: "retrieval".to_string()
              , function: None
            }
          , Tool::Function { function } => ToolWire
            {   kind: "function".to_string()
              , function: Some(function.clone())
            }
        }
    }
}

impl TryFrom<ToolWire> for Tool
{   type Error = Error;

    fn try_from(raw: ToolWire) -> Result<Self>
    {   match raw.kind.as_str()
        {   "code_interpreter" => Ok(Tool::CodeInterpreter)
          , "retrieval" => Ok(Tool::Retrieval)
          , "function" => raw.function
              .map(|function| Tool::Function { function })
              .ok_or_else(|| Error::decode(
                "function tool without a function definition"
              ))
          , other => Err(Error::decode(format!(
              "unknown tool type: {}", other
            )))
        }
    }
}

pub(crate) fn tools_to_wire(tools: &[Tool]) -> Vec<ToolWire>
{   tools.iter().map(ToolWire::from).collect()
}

pub(crate) fn tools_from_wire(tools: Vec<ToolWire>) -> Result<Vec<Tool>>
{   tools.into_iter().map(Tool::try_from).collect()
}
