//! Edit type → fetch plan.
//!
//! `plan_for` is a pure, exhaustive mapping; `FetchPlan::execute` runs the
//! plan against a provider and yields either a complete source/target pair or
//! a single error. Partial results never escape.

use edit_proto::{EditType, Summary};

use crate::error::CardError;
use crate::projector::missing_caption_field;
use crate::provider::ItemProvider;

/// Which provider calls to issue for one card, and how to combine them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// One call; the card has no target.
    MissingDescription { lang: String },
    /// One call replying `(target, source)`.
    DescriptionTranslation { lang_from: String, lang_to: String },
    /// Caption lookup, then a dependent metadata lookup for the same image.
    CaptionTranslation { lang_from: String, lang_to: String },
    /// No fetch strategy is defined for this edit type.
    Unsupported(EditType),
}

/// Result of a fully successful plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub source: Summary,
    pub target: Option<Summary>,
}

pub fn plan_for(edit_type: EditType, lang_from: &str, lang_to: &str) -> FetchPlan {
    match edit_type {
        EditType::AddDescription => FetchPlan::MissingDescription {
            lang: lang_from.to_string(),
        },
        EditType::TranslateDescription => FetchPlan::DescriptionTranslation {
            lang_from: lang_from.to_string(),
            lang_to: lang_to.to_string(),
        },
        EditType::TranslateCaption => FetchPlan::CaptionTranslation {
            lang_from: lang_from.to_string(),
            lang_to: lang_to.to_string(),
        },
        EditType::AddCaption => FetchPlan::Unsupported(edit_type),
    }
}

impl FetchPlan {
    pub async fn execute<P: ItemProvider>(&self, provider: &P) -> Result<Fetched, CardError> {
        match self {
            Self::MissingDescription { lang } => {
                let source = provider.next_missing_description(lang).await?;
                Ok(Fetched {
                    source,
                    target: None,
                })
            }

            Self::DescriptionTranslation { lang_from, lang_to } => {
                // The provider replies target-language item first.
                let (target, source) = provider
                    .next_missing_description_pair(lang_from, lang_to)
                    .await?;
                Ok(Fetched {
                    source,
                    target: Some(target),
                })
            }

            Self::CaptionTranslation { lang_from, lang_to } => {
                let (image, caption) = provider.next_missing_caption(lang_from, lang_to).await?;
                let target = image.retargeted(lang_to.as_str());
                let source = image.with_description(caption);

                let metadata = provider
                    .image_extended_metadata(lang_from, source.title())
                    .await?;
                let source = match metadata {
                    Some(metadata) => source.with_metadata(metadata),
                    None => source,
                };

                if let Some(field) = missing_caption_field(&source) {
                    return Err(CardError::IncompleteMetadata(field));
                }

                Ok(Fetched {
                    source,
                    target: Some(target),
                })
            }

            Self::Unsupported(edit_type) => Err(CardError::UnsupportedEditType(*edit_type)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_for_each_edit_type() {
        assert_eq!(
            plan_for(EditType::AddDescription, "en", "de"),
            FetchPlan::MissingDescription {
                lang: "en".to_string()
            }
        );
        assert_eq!(
            plan_for(EditType::TranslateDescription, "en", "de"),
            FetchPlan::DescriptionTranslation {
                lang_from: "en".to_string(),
                lang_to: "de".to_string()
            }
        );
        assert_eq!(
            plan_for(EditType::TranslateCaption, "fr", "es"),
            FetchPlan::CaptionTranslation {
                lang_from: "fr".to_string(),
                lang_to: "es".to_string()
            }
        );
        assert_eq!(
            plan_for(EditType::AddCaption, "en", "de"),
            FetchPlan::Unsupported(EditType::AddCaption)
        );
    }
}
