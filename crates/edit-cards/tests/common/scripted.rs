//! Scripted in-memory provider shared by the integration tests.
//!
//! Each provider method pops its next reply from a queue; an empty queue is a
//! "no item" reply. `hold_next_call` parks the next call of any method until
//! the returned gate is notified, so tests can overlap two fetches
//! deterministically.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use edit_cards::{ItemProvider, ProviderError};
use edit_proto::{ImageMetadata, MetadataValue, Summary};
use tokio::sync::Notify;

type Reply<T> = Result<T, ProviderError>;

#[derive(Default)]
pub struct ScriptedProvider {
    descriptions: Mutex<VecDeque<Reply<Summary>>>,
    pairs: Mutex<VecDeque<Reply<(Summary, Summary)>>>,
    captions: Mutex<VecDeque<Reply<(Summary, String)>>>,
    metadata: Mutex<VecDeque<Reply<Option<ImageMetadata>>>>,
    calls: Mutex<Vec<String>>,
    gate: Mutex<Option<Arc<Notify>>>,
    /// Signalled when a held call is parked.
    pub entered: Notify,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_description(&self, reply: Reply<Summary>) -> &Self {
        self.descriptions.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_pair(&self, reply: Reply<(Summary, Summary)>) -> &Self {
        self.pairs.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_caption(&self, reply: Reply<(Summary, String)>) -> &Self {
        self.captions.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_metadata(&self, reply: Reply<Option<ImageMetadata>>) -> &Self {
        self.metadata.lock().unwrap().push_back(reply);
        self
    }

    /// Park the next provider call until the returned gate is notified.
    pub fn hold_next_call(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn reply<T>(&self, call: String, queue: &Mutex<VecDeque<Reply<T>>>) -> Reply<T> {
        self.calls.lock().unwrap().push(call.clone());
        let reply = queue.lock().unwrap().pop_front();

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            self.entered.notify_one();
            gate.notified().await;
        }

        reply.unwrap_or_else(|| Err(ProviderError::no_item(format!("{}: nothing scripted", call))))
    }
}

impl ItemProvider for ScriptedProvider {
    async fn next_missing_description(&self, lang: &str) -> Result<Summary, ProviderError> {
        self.reply(format!("description({})", lang), &self.descriptions)
            .await
    }

    async fn next_missing_description_pair(
        &self,
        lang_from: &str,
        lang_to: &str,
    ) -> Result<(Summary, Summary), ProviderError> {
        self.reply(format!("pair({},{})", lang_from, lang_to), &self.pairs)
            .await
    }

    async fn next_missing_caption(
        &self,
        lang_from: &str,
        lang_to: &str,
    ) -> Result<(Summary, String), ProviderError> {
        self.reply(format!("caption({},{})", lang_from, lang_to), &self.captions)
            .await
    }

    async fn image_extended_metadata(
        &self,
        lang: &str,
        image_title: &str,
    ) -> Result<Option<ImageMetadata>, ProviderError> {
        self.reply(format!("metadata({},{})", lang, image_title), &self.metadata)
            .await
    }
}

pub fn full_metadata() -> ImageMetadata {
    ImageMetadata {
        artist: Some(MetadataValue::new("<a href=\"/wiki/User:Jane\">Jane Doe</a>")),
        credit: Some(MetadataValue::new("Own work")),
        license_short_name: Some(MetadataValue::new("CC BY-SA 4.0")),
    }
}

/// An image as the caption lookup returns it: no description yet.
pub fn image(title: &str, lang: &str) -> Summary {
    use chrono::TimeZone;
    Summary::new(title, lang)
        .with_thumbnail_url(format!("https://upload.example/{}", title))
        .with_timestamp(
            chrono::Utc
                .with_ymd_and_hms(2019, 4, 1, 12, 0, 0)
                .unwrap(),
        )
}
