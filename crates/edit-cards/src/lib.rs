//! Suggested-edit cards: fetch the next item lacking a description or caption,
//! track the card's loading/content/error lifecycle, and project it into a
//! render-ready view.

pub mod card;
pub mod error;
pub mod l10n;
pub mod projector;
pub mod provider;
pub mod strategy;
pub mod text;

pub use card::{Card, CardState};
pub use error::{CardError, ProviderError};
pub use projector::{project, CardView, CardViewModel, ErrorView, MetadataLabel, MetadataRow};
pub use provider::{HttpProvider, ItemProvider};
pub use strategy::{plan_for, FetchPlan, Fetched};
