//! Speech to text and text to speech

use std::ops::RangeInclusive;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::error::{Error, Result};
use crate::request::{ApiRequest, MultipartForm, Upload};
use crate::validate;

const AUDIO_TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Output format of transcriptions and translations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat
{   Json
  , Text
  , Srt
  , VerboseJson
  , Vtt
}

impl TranscriptFormat
{   pub fn as_wire(&self) -> &'static str
    {   match self
        {   TranscriptFormat::Json => "json"
          , TranscriptFormat::Text => "text"
          , TranscriptFormat::Srt => "srt"
          , TranscriptFormat::VerboseJson => "verbose_json"
          , TranscriptFormat::Vtt => "vtt"
        }
    }

    fn is_json(&self) -> bool
    {   matches!(self, TranscriptFormat::Json | TranscriptFormat::VerboseJson)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest
{   pub file: Upload
  , pub model: String
  , /// Guides style or continues a previous segment
    pub prompt: Option<String>
  , pub response_format: Option<TranscriptFormat>
  , /// Between 0 and 1
    pub temperature: Option<f64>
  , /// ISO-639-1 code of the spoken language
    pub language: Option<String>
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest
{   pub file: Upload
  , pub model: String
  , pub prompt: Option<String>
  , pub response_format: Option<TranscriptFormat>
  , pub temperature: Option<f64>
}

impl TranscriptionRequest
{   pub fn new(file: Upload, model: impl Into<String>) -> Self
    {   TranscriptionRequest
        {   file
          , model: model.into()
          , prompt: None
          , response_format: None
          , temperature: None
          , language: None
        }
    }

    pub async fn to_form(&self) -> Result<MultipartForm>
    {   validate::in_range(
          "temperature",
          self.temperature,
          &AUDIO_TEMPERATURE_RANGE
        )?;
        Ok(MultipartForm::new()
          .part(self.file.clone().into_part("file").await?)
          .text("model", self.model.clone())
          .text_opt("prompt", self.prompt.as_deref())
          .text_opt(
            "response_format",
            self.response_format.map(|f| f.as_wire())
          )
          .text_opt("temperature", self.temperature)
          .text_opt("language", self.language.as_deref()))
    }
}

impl TranslationRequest
{   pub fn new(file: Upload, model: impl Into<String>) -> Self
    {   TranslationRequest
        {   file
          , model: model.into()
          , prompt: None
          , response_format: None
          , temperature: None
        }
    }

    pub async fn to_form(&self) -> Result<MultipartForm>
    {   validate::in_range(
          "temperature",
          self.temperature,
          &AUDIO_TEMPERATURE_RANGE
        )?;
        Ok(MultipartForm::new()
          .part(self.file.clone().into_part("file").await?)
          .text("model", self.model.clone())
          .text_opt("prompt", self.prompt.as_deref())
          .text_opt(
            "response_format",
            self.response_format.map(|f| f.as_wire())
          )
          .text_opt("temperature", self.temperature))
    }
}

// ===== Transcript =====

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscriptWire
{   pub text: String
  , #[serde(default)]
    pub language: Option<String>
  , #[serde(default)]
    pub duration: Option<f64>
  , #[serde(default)]
    pub segments: Option<Vec<SegmentWire>>
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SegmentWire
{   pub id: u32
  , pub seek: u32
  , pub start: f64
  , pub end: f64
  , pub text: String
  , #[serde(default)]
    pub tokens: Vec<u32>
  , pub temperature: f64
  , pub avg_logprob: f64
  , pub compression_ratio: f64
  , pub no_speech_prob: f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript
{   pub text: String
  , pub language: Option<String>
  , pub duration: Option<f64>
  , pub segments: Option<Vec<Segment>>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment
{   pub id: u32
  , pub seek: u32
  , pub start: f64
  , pub end: f64
  , pub text: String
  , pub tokens: Vec<u32>
  , pub temperature: f64
  , pub avg_logprob: f64
  , pub compression_ratio: f64
  , pub no_speech_prob: f64
}

impl From<SegmentWire> for Segment
{   fn from(raw: SegmentWire) -> Self
    {   Segment
        {   id: raw.id
          , seek: raw.seek
          , start: raw.start
          , end: raw.end
          , text: raw.text
          , tokens: raw.tokens
          , temperature: raw.temperature
          , avg_logprob: raw.avg_logprob
          , compression_ratio: raw.compression_ratio
          , no_speech_prob: raw.no_speech_prob
        }
    }
}

impl From<TranscriptWire> for Transcript
{   fn from(raw: TranscriptWire) -> Self
    {   Transcript
        {   text: raw.text
          , language: raw.language
          , duration: raw.duration
          , segments: raw.segments
              .map(|s| s.into_iter().map(Segment::from).collect())
        }
    }
}

// ===== Speech =====

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeechRequest
{   pub model: String
  , pub input: String
  , pub voice: String
  , /// `mp3`, `opus`, `aac` or `flac`
    pub response_format: Option<String>
  , /// Between 0.25 and 4.0
    pub speed: Option<f64>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequestWire
{   pub model: String
  , pub input: String
  , pub voice: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>
}

impl SpeechRequest
{   pub fn validate(&self) -> Result<()>
    {   validate::in_range(
          "speed",
          self.speed,
          &validate::SPEECH_SPEED_RANGE
        )
    }

    pub fn to_wire(&self) -> SpeechRequestWire
    {   SpeechRequestWire
        {   model: self.model.clone()
          , input: self.input.clone()
          , voice: self.voice.clone()
          , response_format: self.response_format.clone()
          , speed: self.speed
        }
    }
}

impl OpenAi
{   pub async fn create_transcription(
      &self
    , request: &TranscriptionRequest
    ) -> Result<Transcript>
    {   let form = request.to_form().await?;
        self.transcript(
          ApiRequest::post("/audio/transcriptions").multipart(form),
          request.response_format
        ).await
    }

    pub async fn create_translation(
      &self
    , request: &TranslationRequest
    ) -> Result<Transcript>
    {   let form = request.to_form().await?;
        self.transcript(
          ApiRequest::post("/audio/translations").multipart(form),
          request.response_format
        ).await
    }

    /// Synthesized audio, returned as the raw bytes of the file
    pub async fn create_speech(&self, request: &SpeechRequest)
      -> Result<Bytes>
    {   request.validate()?;
        self.call_binary(
          ApiRequest::post("/audio/speech").json(&request.to_wire())?
        ).await
    }

    /// Text formats answer with a plain body instead of JSON
    async fn transcript(
      &self
    , request: ApiRequest
    , format: Option<TranscriptFormat>
    ) -> Result<Transcript>
    {   match format
        {   Some(f) if !f.is_json() => {
              let bytes = self.call_binary(request).await?;
              let text = String::from_utf8(bytes.to_vec())
                .map_err(|e| Error::Parse(e.to_string()))?;
              Ok(Transcript
              {   text
                , language: None
                , duration: None
                , segments: None
              })
            }
          , _ => {
              let raw: TranscriptWire = self.call(request).await?;
              Ok(raw.into())
            }
        }
    }
}
