//! Error types for the provider and the card lifecycle.

use edit_proto::EditType;

/// Failure reported by an [`ItemProvider`](crate::provider::ItemProvider).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Connection, TLS, timeout or body read failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    /// A configured endpoint could not be turned into a request URL.
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),

    /// The reply could not be understood.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The service found no qualifying item.
    #[error("No item found: {0}")]
    NoItem(String),
}

impl ProviderError {
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    pub fn no_item<S: Into<String>>(msg: S) -> Self {
        Self::NoItem(msg.into())
    }
}

/// Why a card ended up in the error state.
///
/// Kept as plain data (`Clone`) since it lives inside `CardState`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    /// Network or service failure, including undecodable replies.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider had no item lacking the requested field.
    #[error("Nothing left to edit: {0}")]
    EmptyResult(String),

    /// A caption card is missing one of its required image fields.
    #[error("Incomplete image metadata: missing {0}")]
    IncompleteMetadata(&'static str),

    /// No fetch strategy exists for this edit type.
    #[error("Unsupported edit type: {0}")]
    UnsupportedEditType(EditType),
}

impl CardError {
    /// Whether re-running the same fetch could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::EmptyResult(_))
    }
}

impl From<ProviderError> for CardError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NoItem(msg) => Self::EmptyResult(msg),
            other => Self::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_classification() {
        let empty: CardError = ProviderError::no_item("no article in en").into();
        assert_eq!(empty, CardError::EmptyResult("no article in en".to_string()));

        let status: CardError = ProviderError::Status {
            service: "recommendation API",
            status: 503,
        }
        .into();
        assert_eq!(
            status,
            CardError::Transport("recommendation API returned status 503".to_string())
        );

        let decode: CardError = ProviderError::decode("missing field `title`").into();
        assert!(matches!(decode, CardError::Transport(_)));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CardError::UnsupportedEditType(EditType::AddCaption).to_string(),
            "Unsupported edit type: add_caption"
        );
        assert_eq!(
            CardError::IncompleteMetadata("credit").to_string(),
            "Incomplete image metadata: missing credit"
        );
        assert!(!CardError::UnsupportedEditType(EditType::AddCaption).is_retryable());
    }
}
