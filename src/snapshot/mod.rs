//! Snapshot data types and the data-URL wire encoding.
//!
//! A [`Snapshot`] is one captured tab image belonging to the current session.
//! Its position in the session list is its ordinal; insertion order is
//! document order on export. The persisted form of a snapshot is a data URL
//! (`data:image/png;base64,...`), which is also the transport encoding the
//! capture host hands back.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SnapError};

/// Encoding of a captured tab image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Lossless PNG (the capture default).
    Png,
    /// JPEG, as offered by the host capture API.
    Jpeg,
}

impl ImageFormat {
    /// MIME type used in the data-URL encoding.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Resolve a MIME type back to a format.
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime {
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            other => Err(SnapError::Persistence(format!(
                "unsupported image MIME type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// One captured image in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Image encoding.
    pub format: ImageFormat,
    /// Raw encoded image bytes.
    pub bytes: Vec<u8>,
}

impl Snapshot {
    /// Create a snapshot from raw encoded image bytes.
    #[must_use]
    pub fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Decode a snapshot from its data-URL wire form.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let (format, bytes) = data_url::decode(url)?;
        Ok(Self { format, bytes })
    }

    /// Encode the snapshot as a data URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        data_url::encode(self.format, &self.bytes)
    }

    /// Size of the encoded image in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

// The persisted session list is a flat array of data-URL strings, so a
// snapshot serializes as its data URL rather than as a struct.
impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Self::from_data_url(&url).map_err(serde::de::Error::custom)
    }
}

/// Data-URL encode/decode helpers for captured images.
pub mod data_url {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;

    use super::ImageFormat;
    use crate::error::{Result, SnapError};

    /// Encode image bytes as `data:<mime>;base64,<payload>`.
    #[must_use]
    pub fn encode(format: ImageFormat, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", format.mime(), BASE64.encode(bytes))
    }

    /// Decode a data URL into its format and raw bytes.
    pub fn decode(url: &str) -> Result<(ImageFormat, Vec<u8>)> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| SnapError::Persistence(format!("not a data URL: '{url}'")))?;

        let (mime, payload) = rest.split_once(";base64,").ok_or_else(|| {
            SnapError::Persistence("data URL is missing a base64 payload".to_string())
        })?;

        let format = ImageFormat::from_mime(mime)?;
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| SnapError::Persistence(format!("invalid base64 payload: {e}")))?;

        Ok((format, bytes))
    }
}
