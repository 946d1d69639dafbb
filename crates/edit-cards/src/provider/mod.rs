//! Source of "next item lacking X" and per-image metadata.
//!
//! The card state machine only sees the [`ItemProvider`] trait; the Wikimedia
//! implementation lives in [`api`]. Every call is a single-shot request that
//! may fail. Timeouts belong to the implementation and surface as ordinary
//! errors.

use std::future::Future;

use edit_proto::{ImageMetadata, Summary};

use crate::error::ProviderError;

pub mod api;

pub use api::HttpProvider;

pub trait ItemProvider {
    /// Next article on the `lang` wiki that has no description.
    fn next_missing_description(
        &self,
        lang: &str,
    ) -> impl Future<Output = Result<Summary, ProviderError>> + Send;

    /// Next article lacking a description in `lang_to` that has one in
    /// `lang_from`.
    ///
    /// Replies `(item in lang_to, item in lang_from)`: target first.
    fn next_missing_description_pair(
        &self,
        lang_from: &str,
        lang_to: &str,
    ) -> impl Future<Output = Result<(Summary, Summary), ProviderError>> + Send;

    /// Next image with a caption in `lang_from` but none in `lang_to`.
    ///
    /// Replies `(image, caption in lang_from)`. The image summary carries
    /// thumbnail, timestamp and uploader but no description.
    fn next_missing_caption(
        &self,
        lang_from: &str,
        lang_to: &str,
    ) -> impl Future<Output = Result<(Summary, String), ProviderError>> + Send;

    /// Artist / credit / license for `image_title`, looked up through the `lang`
    /// wiki. `None` when the page carries no image info at all.
    fn image_extended_metadata(
        &self,
        lang: &str,
        image_title: &str,
    ) -> impl Future<Output = Result<Option<ImageMetadata>, ProviderError>> + Send;
}
