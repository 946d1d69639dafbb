//! Normalized representation of a fetched article or image.
//!
//! A `Summary` is built once per successful fetch and never edited in place.
//! The only post-fetch change, attaching extended image metadata, goes through
//! [`Summary::with_metadata`] which consumes the base value and returns a new one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single extended-metadata field as served by the Commons `extmetadata` API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataValue {
    pub value: String,
}

impl MetadataValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Artist / credit / license block for an image.
///
/// Every field is optional on the wire; caption cards require them all and
/// treat a gap as incomplete metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(rename = "Artist", default)]
    pub artist: Option<MetadataValue>,
    #[serde(rename = "Credit", default)]
    pub credit: Option<MetadataValue>,
    #[serde(rename = "LicenseShortName", default)]
    pub license_short_name: Option<MetadataValue>,
}

impl ImageMetadata {
    pub fn artist(&self) -> Option<&str> {
        self.artist.as_ref().map(|v| v.value.as_str())
    }

    pub fn credit(&self) -> Option<&str> {
        self.credit.as_ref().map(|v| v.value.as_str())
    }

    pub fn license_short_name(&self) -> Option<&str> {
        self.license_short_name.as_ref().map(|v| v.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    title: String,
    normalized_title: String,
    pub language_code: String,
    pub description: Option<String>,
    pub extract_html: Option<String>,
    pub thumbnail_url: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Uploader or author of the item.
    pub attribution_user: Option<String>,
    image_metadata: Option<ImageMetadata>,
}

impl Summary {
    pub fn new(title: impl Into<String>, language_code: impl Into<String>) -> Self {
        let title = title.into();
        let normalized_title = normalize_title(&title);
        Self {
            title,
            normalized_title,
            language_code: language_code.into(),
            description: None,
            extract_html: None,
            thumbnail_url: None,
            timestamp: None,
            attribution_user: None,
            image_metadata: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_extract_html(mut self, extract_html: impl Into<String>) -> Self {
        self.extract_html = Some(extract_html.into());
        self
    }

    pub fn with_thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_attribution_user(mut self, user: impl Into<String>) -> Self {
        self.attribution_user = Some(user.into());
        self
    }

    /// Merge step for the caption path: returns a new summary carrying `metadata`.
    pub fn with_metadata(mut self, metadata: ImageMetadata) -> Self {
        self.image_metadata = Some(metadata);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Display form of the title. Always derived from [`Summary::title`].
    pub fn normalized_title(&self) -> &str {
        &self.normalized_title
    }

    pub fn image_metadata(&self) -> Option<&ImageMetadata> {
        self.image_metadata.as_ref()
    }

    /// The same item seen from another language, with its description dropped.
    ///
    /// Used for caption translation targets: same image, no caption yet.
    pub fn retargeted(&self, language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            description: None,
            image_metadata: None,
            ..self.clone()
        }
    }
}

/// Underscores become spaces; surrounding whitespace is trimmed.
pub fn normalize_title(title: &str) -> String {
    title.replace('_', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_title_is_derived() {
        let s = Summary::new("Ada_Lovelace ", "en");
        assert_eq!(s.title(), "Ada_Lovelace ");
        assert_eq!(s.normalized_title(), "Ada Lovelace");
    }

    #[test]
    fn test_with_metadata_returns_new_value() {
        let base = Summary::new("File:Cat.jpg", "en").with_description("A cat");
        let meta = ImageMetadata {
            artist: Some(MetadataValue::new("Jane")),
            credit: Some(MetadataValue::new("Own work")),
            license_short_name: Some(MetadataValue::new("CC BY-SA 4.0")),
        };
        let merged = base.clone().with_metadata(meta.clone());

        assert!(base.image_metadata().is_none());
        assert_eq!(merged.image_metadata(), Some(&meta));
        assert_eq!(merged.description.as_deref(), Some("A cat"));
    }

    #[test]
    fn test_retargeted_drops_caption() {
        let source = Summary::new("File:Cat.jpg", "en")
            .with_description("A cat")
            .with_thumbnail_url("https://upload.example/cat.jpg");
        let target = source.retargeted("de");

        assert_eq!(target.language_code, "de");
        assert_eq!(target.description, None);
        assert_eq!(target.thumbnail_url, source.thumbnail_url);
        assert_eq!(target.normalized_title(), "File:Cat.jpg");
    }

    #[test]
    fn test_extmetadata_deserialize() {
        let json = r#"{
            "Artist": {"value": "<a href=\"/wiki/User:Jane\">Jane</a>", "source": "commons-desc-page"},
            "Credit": {"value": "Own work"},
            "ImageDescription": {"value": "ignored"}
        }"#;
        let meta: ImageMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.artist(), Some("<a href=\"/wiki/User:Jane\">Jane</a>"));
        assert_eq!(meta.credit(), Some("Own work"));
        assert_eq!(meta.license_short_name(), None);
    }
}
