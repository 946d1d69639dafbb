use serde::{Deserialize, Serialize};

/// The kind of micro-task a card presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditType {
    TranslateDescription,
    AddDescription,
    TranslateCaption,
    AddCaption,
}

impl EditType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TranslateDescription => "translate_description",
            Self::AddDescription => "add_description",
            Self::TranslateCaption => "translate_caption",
            Self::AddCaption => "add_caption",
        }
    }

    /// Translate-type edits carry a target-language summary.
    pub fn is_translation(&self) -> bool {
        matches!(self, Self::TranslateDescription | Self::TranslateCaption)
    }

    /// Caption edits render image metadata rows instead of an extract.
    pub fn is_caption(&self) -> bool {
        matches!(self, Self::TranslateCaption | Self::AddCaption)
    }
}

impl std::fmt::Display for EditType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a card needs to know about its task, injected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardParams {
    pub edit_type: EditType,
    pub lang_from: String,
    pub lang_to: String,
}

impl CardParams {
    pub fn new(
        edit_type: EditType,
        lang_from: impl Into<String>,
        lang_to: impl Into<String>,
    ) -> Self {
        Self {
            edit_type,
            lang_from: lang_from.into(),
            lang_to: lang_to.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_type_classes() {
        assert!(EditType::TranslateDescription.is_translation());
        assert!(EditType::TranslateCaption.is_translation());
        assert!(!EditType::AddDescription.is_translation());
        assert!(!EditType::AddCaption.is_translation());

        assert!(EditType::AddCaption.is_caption());
        assert!(!EditType::TranslateDescription.is_caption());
    }

    #[test]
    fn test_edit_type_serde_matches_label() {
        for t in [
            EditType::TranslateDescription,
            EditType::AddDescription,
            EditType::TranslateCaption,
            EditType::AddCaption,
        ] {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.label()));
        }
    }
}
