//! Rewrite options
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! default_mime_type = "image/png"
//! strict_binary_chunk = true
//! overwrite = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::relocate::is_valid_mime_type;

/// MIME type assumed for images that do not declare one
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Options for rewriting GLB containers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineOptions {
    /// MIME type used when an image entry has no `mimeType`
    pub default_mime_type: String,
    /// Validate the BIN chunk's own header against the container.
    ///
    /// When disabled, the 8-byte header is skipped unchecked and image reads
    /// are only bounded by the end of the container.
    pub strict_binary_chunk: bool,
    /// Allow file helpers to replace an existing output file
    pub overwrite: bool,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            default_mime_type: DEFAULT_MIME_TYPE.to_string(),
            strict_binary_chunk: true,
            overwrite: false,
        }
    }
}

impl InlineOptions {
    /// Set the fallback MIME type
    #[must_use]
    pub fn with_default_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.default_mime_type = mime_type.into();
        self
    }

    /// Skip validation of the BIN chunk header
    #[must_use]
    pub fn lenient_binary_chunk(mut self) -> Self {
        self.strict_binary_chunk = false;
        self
    }

    /// Allow replacing existing output files
    #[must_use]
    pub fn overwrite_existing(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Parse options from TOML text.
    ///
    /// Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: Self = toml::from_str(source).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded options from {}", path.as_ref().display());
        Self::from_toml_str(&source)
    }

    /// Check values that end up in output documents.
    pub(crate) fn validate(&self) -> Result<()> {
        let mime = self.default_mime_type.as_str();
        if !is_valid_mime_type(mime) {
            return Err(Error::InvalidOptions {
                message: format!("default_mime_type '{mime}' is not a valid MIME type"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let options = InlineOptions::default();
        assert_eq!(options.default_mime_type, "image/png");
        assert!(options.strict_binary_chunk);
        assert!(!options.overwrite);
    }

    #[test]
    fn test_from_toml_partial() {
        let options = InlineOptions::from_toml_str("default_mime_type = \"image/jpeg\"\n").unwrap();
        assert_eq!(options.default_mime_type, "image/jpeg");
        assert!(options.strict_binary_chunk);
    }

    #[test]
    fn test_from_toml_full() {
        let options = InlineOptions::from_toml_str(
            "default_mime_type = \"image/webp\"\nstrict_binary_chunk = false\noverwrite = true\n",
        )
        .unwrap();
        assert_eq!(
            options,
            InlineOptions::default()
                .with_default_mime_type("image/webp")
                .lenient_binary_chunk()
                .overwrite_existing()
        );
    }

    #[test]
    fn test_rejects_bad_mime() {
        let err = InlineOptions::from_toml_str("default_mime_type = \"png;base64\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = InlineOptions::from_toml_str("strict_binary_chunk = \"yes\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
