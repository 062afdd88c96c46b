//! Format-conversion session.
//!
//! Independent of the region session: it shares only the loaded image and
//! builds the request for the external conversion backend.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use wm_core::ImageInfo;

pub const DEFAULT_QUALITY: u8 = 85;
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 9;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("quality must be 1-100, got {0}")]
    QualityOutOfRange(u8),

    #[error("compression level must be 0-9, got {0}")]
    CompressionOutOfRange(u8),

    #[error("no image loaded")]
    NoImage,

    #[error("missing image data")]
    EmptyImageData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    #[default]
    #[serde(rename = "jpg")]
    Jpeg,
    Png,
    Webp,
}

impl TargetFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    /// Lossy formats take a quality, PNG takes a compression level.
    pub fn is_lossy(&self) -> bool {
        !matches!(self, Self::Png)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            _ => Err(ConvertError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// JSON payload for the conversion command. Only the parameters relevant to
/// `target_format` are set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertRequest {
    pub image_data: String,
    pub target_format: TargetFormat,
    pub quality: Option<u8>,
    pub compression_level: Option<u8>,
    pub quantize: bool,
}

impl ConvertRequest {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversionSession {
    source: Option<ImageInfo>,
    format: TargetFormat,
    quality: Option<u8>,
    compression_level: Option<u8>,
    quantize: bool,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the session at a newly loaded image. Settings are kept.
    pub fn set_source(&mut self, image: Option<ImageInfo>) {
        self.source = image;
    }

    pub fn source(&self) -> Option<ImageInfo> {
        self.source
    }

    pub fn format(&self) -> TargetFormat {
        self.format
    }

    pub fn set_format(&mut self, format: TargetFormat) {
        self.format = format;
    }

    pub fn set_quality(&mut self, quality: u8) -> Result<(), ConvertError> {
        if !(1..=100).contains(&quality) {
            return Err(ConvertError::QualityOutOfRange(quality));
        }
        self.quality = Some(quality);
        Ok(())
    }

    pub fn set_compression_level(&mut self, level: u8) -> Result<(), ConvertError> {
        if level > 9 {
            return Err(ConvertError::CompressionOutOfRange(level));
        }
        self.compression_level = Some(level);
        Ok(())
    }

    /// Palette quantization; only honoured for PNG.
    pub fn set_quantize(&mut self, quantize: bool) {
        self.quantize = quantize;
    }

    pub fn request(&self, image_data: impl Into<String>) -> Result<ConvertRequest, ConvertError> {
        if self.source.is_none() {
            return Err(ConvertError::NoImage);
        }
        let image_data = image_data.into();
        if image_data.is_empty() {
            return Err(ConvertError::EmptyImageData);
        }
        let lossy = self.format.is_lossy();
        let request = ConvertRequest {
            image_data,
            target_format: self.format,
            quality: lossy.then(|| self.quality.unwrap_or(DEFAULT_QUALITY)),
            compression_level: (!lossy)
                .then(|| self.compression_level.unwrap_or(DEFAULT_COMPRESSION_LEVEL)),
            quantize: !lossy && self.quantize,
        };
        log::debug!(
            "conversion request: {} q={:?} c={:?}",
            request.target_format,
            request.quality,
            request.compression_level
        );
        Ok(request)
    }
}
