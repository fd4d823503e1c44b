//! Image generation, edits and variations
//!
//! Generation takes a JSON body; edits and variations upload images
//! as multipart forms.

use serde::{Deserialize, Serialize};

use crate::client::OpenAi;
use crate::error::{Error, Result};
use crate::request::{ApiRequest, MultipartForm, Upload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat
{   Url
  , Base64Json
}

impl ImageFormat
{   pub fn as_wire(&self) -> &'static str
    {   match self
        {   ImageFormat::Url => "url"
          , ImageFormat::Base64Json => "b64_json"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageRequest
{   pub prompt: String
  , pub model: Option<String>
  , pub count: Option<u32>
  , pub quality: Option<String>
  , /// e.g. `1024x1024`
    pub size: Option<String>
  , pub style: Option<String>
  , pub response_format: Option<ImageFormat>
  , pub user: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRequestWire
{   pub prompt: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<&'static str>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>
}

impl ImageRequest
{   pub fn new(prompt: impl Into<String>) -> Self
    {   ImageRequest
        {   prompt: prompt.into()
          , ..Default::default()
        }
    }

    pub fn to_wire(&self) -> ImageRequestWire
    {   ImageRequestWire
        {   prompt: self.prompt.clone()
          , model: self.model.clone()
          , n: self.count
          , quality: self.quality.clone()
          , size: self.size.clone()
          , style: self.style.clone()
          , response_format: self.response_format.map(|f| f.as_wire())
          , user: self.user.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageEditRequest
{   pub image: Upload
  , /// Transparent areas mark where `image` should be edited
    pub mask: Option<Upload>
  , pub prompt: String
  , pub model: Option<String>
  , pub count: Option<u32>
  , pub size: Option<String>
  , pub response_format: Option<ImageFormat>
  , pub user: Option<String>
}

impl ImageEditRequest
{   pub fn new(image: Upload, prompt: impl Into<String>) -> Self
    {   ImageEditRequest
        {   image
          , mask: None
          , prompt: prompt.into()
          , model: None
          , count: None
          , size: None
          , response_format: None
          , user: None
        }
    }

    /// Filenames are checked before anything is read
    pub async fn to_form(&self) -> Result<MultipartForm>
    {   self.image.resolve_filename()?;
        if let Some(mask) = &self.mask
        {   mask.resolve_filename()?;
        }

        let mut form = MultipartForm::new()
          .part(self.image.clone().into_part("image").await?);
        if let Some(mask) = &self.mask
        {   form = form.part(mask.clone().into_part("mask").await?);
        }

        Ok(form
          .text("prompt", self.prompt.clone())
          .text_opt("model", self.model.as_deref())
          .text_opt("n", self.count)
          .text_opt("size", self.size.as_deref())
          .text_opt(
            "response_format",
            self.response_format.map(|f| f.as_wire())
          )
          .text_opt("user", self.user.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageVariationRequest
{   pub image: Upload
  , pub model: Option<String>
  , pub count: Option<u32>
  , pub size: Option<String>
  , pub response_format: Option<ImageFormat>
  , pub user: Option<String>
}

impl ImageVariationRequest
{   pub fn new(image: Upload) -> Self
    {   ImageVariationRequest
        {   image
          , model: None
          , count: None
          , size: None
          , response_format: None
          , user: None
        }
    }

    pub async fn to_form(&self) -> Result<MultipartForm>
    {   Ok(MultipartForm::new()
          .part(self.image.clone().into_part("image").await?)
          .text_opt("model", self.model.as_deref())
          .text_opt("n", self.count)
          .text_opt("size", self.size.as_deref())
          .text_opt(
            "response_format",
            self.response_format.map(|f| f.as_wire())
          )
          .text_opt("user", self.user.as_deref()))
    }
}

// ===== Response =====

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImagesWire
{   pub created: i64
  , pub data: Vec<ImageWire>
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageWire
{   #[serde(default)]
    pub url: Option<String>
  , #[serde(default)]
    pub b64_json: Option<String>
  , #[serde(default)]
    pub revised_prompt: Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ImageData
{   Url(String)
  , Base64(String)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage
{   pub image: ImageData
  , pub revised_prompt: Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Images
{   pub created: i64
  , pub data: Vec<GeneratedImage>
}

impl TryFrom<ImageWire> for GeneratedImage
{   type Error = Error;

    fn try_from(raw: ImageWire) -> Result<Self>
    {   let image = match (raw.url, raw.b64_json)
        {   (Some(url), _) => ImageData::Url(url)
          , (None, Some(b64)) => ImageData::Base64(b64)
          , (None, None) => return Err(Error::decode(
              "image result carries neither url nor b64_json"
            ))
        };
        Ok(GeneratedImage
        {   image
          , revised_prompt: raw.revised_prompt
        })
    }
}

impl TryFrom<ImagesWire> for Images
{   type Error = Error;

    fn try_from(raw: ImagesWire) -> Result<Self>
    {   Ok(Images
        {   created: raw.created
          , data: raw.data.into_iter()
              .map(GeneratedImage::try_from)
              .collect::<Result<_>>()?
        })
    }
}

impl OpenAi
{   pub async fn create_image(&self, request: &ImageRequest)
      -> Result<Images>
    {   let raw: ImagesWire = self
          .call(
            ApiRequest::post("/images/generations")
              .json(&request.to_wire())?
          )
          .await?;
        raw.try_into()
    }

    pub async fn create_image_edit(&self, request: &ImageEditRequest)
      -> Result<Images>
    {   let form = request.to_form().await?;
        let raw: ImagesWire = self
          .call(ApiRequest::post("/images/edits").multipart(form))
          .await?;
        raw.try_into()
    }

    pub async fn create_image_variation(
      &self
    , request: &ImageVariationRequest
    ) -> Result<Images>
    {   let form = request.to_form().await?;
        let raw: ImagesWire = self
          .call(ApiRequest::post("/images/variations").multipart(form))
          .await?;
        raw.try_into()
    }
}
