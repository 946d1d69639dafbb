//! Shared types for suggested-edit cards.
//!
//! Everything here is UI-free so a deck host can depend on it without pulling
//! in the HTTP provider or the card state machine.

pub mod config;
pub mod edit_type;
pub mod platform;
pub mod summary;

pub use edit_type::{CardParams, EditType};
pub use summary::{ImageMetadata, MetadataValue, Summary};
