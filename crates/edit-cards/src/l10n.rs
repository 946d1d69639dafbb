use serde::Serialize;

/// Languages written right-to-left, by wiki language code.
const RTL_LANGUAGES: &[&str] = &[
    "ar", "arc", "arz", "azb", "bcc", "bqi", "ckb", "dv", "fa", "glk", "he", "khw", "ks", "lrc",
    "mzn", "pnb", "ps", "sd", "ug", "ur", "yi",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn for_language(code: &str) -> Self {
        // Variants like "fa-af" share the base language's direction
        let base = code.split('-').next().unwrap_or(code);
        if RTL_LANGUAGES.contains(&base) {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_for_language() {
        assert_eq!(TextDirection::for_language("en"), TextDirection::Ltr);
        assert_eq!(TextDirection::for_language("he"), TextDirection::Rtl);
        assert_eq!(TextDirection::for_language("ar"), TextDirection::Rtl);
        assert_eq!(TextDirection::for_language("fa-af"), TextDirection::Rtl);
        assert_eq!(TextDirection::for_language("zh-hans"), TextDirection::Ltr);
    }
}
