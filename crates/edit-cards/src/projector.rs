//! CardState → render-ready view model.
//!
//! `project` is a pure function of `(state, params, contribution)`; it never
//! touches the summaries it reads and keeps no counters, so projecting the same
//! input twice yields the same view.

use chrono::{DateTime, Utc};
use edit_proto::{CardParams, ImageMetadata, Summary};
use serde::Serialize;

use crate::card::CardState;
use crate::error::CardError;
use crate::l10n::TextDirection;
use crate::text::{capitalize, html_to_text, strip_markup};

pub const ARTICLE_EXTRACT_MAX_LINE_WITH_IMAGE: u32 = 5;
pub const ARTICLE_EXTRACT_MAX_LINE_WITHOUT_IMAGE: u32 = 12;

/// What a host renderer draws for one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CardView {
    Loading,
    Content(CardViewModel),
    Error(ErrorView),
}

impl CardView {
    /// `loading`, `content` or `error`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Content(_) => "content",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardViewModel {
    pub title: String,
    /// `None` hides the subtitle row.
    pub subtitle: Option<String>,
    /// `None` hides the extract (caption cards).
    pub body: Option<String>,
    pub body_max_lines: u32,
    pub image_visible: bool,
    pub image_url: Option<String>,
    /// Caption cards only; fixed order author/artist, date, source, license.
    pub metadata_rows: Vec<MetadataRow>,
    pub direction: TextDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    pub label: MetadataLabel,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataLabel {
    Author,
    Artist,
    Date,
    Source,
    License,
}

impl MetadataLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Artist => "artist",
            Self::Date => "date",
            Self::Source => "source",
            Self::License => "license",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub kind: &'static str,
    pub message: String,
    /// The host should offer a retry action.
    pub retryable: bool,
}

impl From<&CardError> for ErrorView {
    fn from(err: &CardError) -> Self {
        let kind = match err {
            CardError::Transport(_) => "transport",
            CardError::EmptyResult(_) => "empty_result",
            CardError::IncompleteMetadata(_) => "incomplete_metadata",
            CardError::UnsupportedEditType(_) => "unsupported_edit_type",
        };
        Self {
            kind,
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

pub fn project(state: &CardState, params: &CardParams, contribution: &str) -> CardView {
    match state {
        CardState::Loading => CardView::Loading,
        CardState::Error(err) => CardView::Error(ErrorView::from(err)),
        CardState::Content { source, .. } => {
            let projected = if params.edit_type.is_caption() {
                project_caption(source, params, contribution)
            } else {
                Ok(project_description(source, params, contribution))
            };
            match projected {
                Ok(model) => CardView::Content(model),
                Err(err) => CardView::Error(ErrorView::from(&err)),
            }
        }
    }
}

/// Translate cards always show a capitalized subtitle. Add cards show a
/// non-empty contribution there verbatim.
fn subtitle(source: &Summary, params: &CardParams, contribution: &str) -> Option<String> {
    if params.edit_type.is_translation() {
        let text = if contribution.is_empty() {
            source.description.as_deref().unwrap_or_default()
        } else {
            contribution
        };
        return Some(capitalize(text));
    }
    (!contribution.is_empty()).then(|| contribution.to_string())
}

fn project_description(source: &Summary, params: &CardParams, contribution: &str) -> CardViewModel {
    let thumbnail = source
        .thumbnail_url
        .as_deref()
        .filter(|url| !url.trim().is_empty());

    let mut body_max_lines = if thumbnail.is_some() {
        ARTICLE_EXTRACT_MAX_LINE_WITH_IMAGE
    } else {
        ARTICLE_EXTRACT_MAX_LINE_WITHOUT_IMAGE
    };
    if !contribution.is_empty() {
        body_max_lines = body_max_lines.saturating_sub(1);
    }

    CardViewModel {
        title: source.normalized_title().to_string(),
        subtitle: subtitle(source, params, contribution),
        body: Some(html_to_text(source.extract_html.as_deref().unwrap_or_default())),
        body_max_lines,
        image_visible: thumbnail.is_some(),
        image_url: thumbnail.map(str::to_string),
        metadata_rows: Vec::new(),
        direction: TextDirection::for_language(&params.lang_from),
    }
}

fn project_caption(
    source: &Summary,
    params: &CardParams,
    contribution: &str,
) -> Result<CardViewModel, CardError> {
    if let Some(field) = missing_caption_field(source) {
        return Err(CardError::IncompleteMetadata(field));
    }
    let metadata = source.image_metadata();

    let (author_label, author) = match attribution_user(source) {
        Some(user) => (MetadataLabel::Author, user),
        None => (
            MetadataLabel::Artist,
            metadata.and_then(ImageMetadata::artist).unwrap_or_default(),
        ),
    };
    let date = source.timestamp.map(format_date).unwrap_or_default();

    let metadata_rows = [
        (author_label, author),
        (MetadataLabel::Date, date.as_str()),
        (
            MetadataLabel::Source,
            metadata.and_then(ImageMetadata::credit).unwrap_or_default(),
        ),
        (
            MetadataLabel::License,
            metadata
                .and_then(ImageMetadata::license_short_name)
                .unwrap_or_default(),
        ),
    ]
    .into_iter()
    .map(|(label, value)| MetadataRow {
        label,
        value: strip_markup(value),
    })
    .collect();

    Ok(CardViewModel {
        title: source.normalized_title().to_string(),
        subtitle: subtitle(source, params, contribution),
        body: None,
        body_max_lines: 0,
        image_visible: true,
        image_url: source.thumbnail_url.clone(),
        metadata_rows,
        direction: TextDirection::for_language(&params.lang_from),
    })
}

fn attribution_user(source: &Summary) -> Option<&str> {
    source
        .attribution_user
        .as_deref()
        .filter(|user| !user.is_empty())
}

/// First required caption field that is absent, if any.
pub fn missing_caption_field(source: &Summary) -> Option<&'static str> {
    let metadata = source.image_metadata();
    if attribution_user(source).is_none() && metadata.and_then(|m| m.artist()).is_none() {
        return Some("artist");
    }
    if source.timestamp.is_none() {
        return Some("date");
    }
    if metadata.and_then(|m| m.credit()).is_none() {
        return Some("credit");
    }
    if metadata.and_then(|m| m.license_short_name()).is_none() {
        return Some("license");
    }
    None
}

/// `Jan 5, 2019`
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}
