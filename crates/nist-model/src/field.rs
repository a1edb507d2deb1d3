use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// The atomic typed payload of a field: text or an opaque image blob.
///
/// Values are immutable once constructed; equality and hashing are by
/// content only. Image payloads are never interpreted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Image(Vec<u8>),
}

impl FieldValue {
    /// Create a text field value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create an image field value from raw bytes.
    pub fn image(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Image(bytes.into())
    }

    /// Borrow the text content, failing if this is an image field.
    pub fn as_text(&self) -> Result<&str> {
        match self {
            Self::Text(s) => Ok(s),
            Self::Image(_) => Err(ModelError::TypeMismatch {
                requested: "text",
                actual: "image",
            }),
        }
    }

    /// Borrow the image bytes, failing if this is a text field.
    pub fn as_image(&self) -> Result<&[u8]> {
        match self {
            Self::Image(bytes) => Ok(bytes),
            Self::Text(_) => Err(ModelError::TypeMismatch {
                requested: "image",
                actual: "text",
            }),
        }
    }

    /// Parse the text content as a decimal integer.
    pub fn as_int(&self) -> Result<i64> {
        let text = self.as_text()?;
        text.trim()
            .parse()
            .map_err(|_| ModelError::NotNumeric {
                value: text.to_string(),
            })
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(s) => s.len(),
            Self::Image(bytes) => bytes.len(),
        }
    }

    /// True when the content is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for the text variant.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// True for the image variant.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}
