//! Card lifecycle: Loading → Content | Error, with retry.
//!
//! Each `start`/`retry` bumps the card's generation, aborts the previous fetch
//! task and spawns a new one. Finished tasks report through an mpsc channel
//! tagged with the generation they were started under; the owner folds those
//! reports into `CardState` with [`Card::update_state`] (non-blocking, for a
//! render loop) or [`Card::next_transition`] (awaiting). Reports from an older
//! generation are dropped, so a superseded fetch can never overwrite state.
//! A task that exits without reporting (a panicking provider) settles the card
//! into `Error` instead of leaving it loading.
//!
//! State lives on the `Card` value itself and survives host pause/resume.
//! Only [`Card::teardown`] (or dropping the card) releases the in-flight task.

use std::sync::Arc;

use edit_proto::{CardParams, Summary};
use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info};

use crate::error::CardError;
use crate::projector::{self, CardView};
use crate::provider::ItemProvider;
use crate::strategy::{self, Fetched};


/// Exactly one of these holds at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum CardState {
    Loading,
    /// `target` is present only for translate-type edits.
    Content {
        source: Summary,
        target: Option<Summary>,
    },
    Error(CardError),
}

impl CardState {
    /// `loading`, `content` or `error`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Content { .. } => "content",
            Self::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn source(&self) -> Option<&Summary> {
        match self {
            Self::Content { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<&Summary> {
        match self {
            Self::Content { target, .. } => target.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CardError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Completion report from a fetch task.
#[derive(Debug)]
struct FetchOutcome {
    generation: u64,
    result: Result<Fetched, CardError>,
}

/// Whichever of the report channel and the task handle woke first.
enum TaskEvent {
    Reported(Option<FetchOutcome>),
    Exited(Result<(), JoinError>),
}

pub struct Card<P> {
    provider: Arc<P>,
    params: CardParams,
    state: CardState,
    /// User-authored text; survives refetches of this card.
    contribution: String,
    /// Bumped by every start; outcomes from older generations are ignored.
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    outcome_rx: mpsc::Receiver<FetchOutcome>,
}

impl<P> Card<P>
where
    P: ItemProvider + Send + Sync + 'static,
{
    /// A new card in `Loading`; nothing is fetched until [`Card::start`].
    pub fn new(provider: Arc<P>, params: CardParams) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(8);
        Self {
            provider,
            params,
            state: CardState::Loading,
            contribution: String::new(),
            generation: 0,
            in_flight: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Enter `Loading`, cancel any in-flight fetch and run the fetch plan for
    /// this card's edit type. Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.cancel_in_flight();
        self.generation += 1;
        self.state = CardState::Loading;

        let plan = strategy::plan_for(
            self.params.edit_type,
            &self.params.lang_from,
            &self.params.lang_to,
        );
        info!(
            "Card fetch #{} started: {} {}→{}",
            self.generation, self.params.edit_type, self.params.lang_from, self.params.lang_to
        );

        let generation = self.generation;
        let provider = Arc::clone(&self.provider);
        let outcome_tx = self.outcome_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = plan.execute(provider.as_ref()).await;
            // Receiver gone means the card was dropped; nothing to report to.
            let _ = outcome_tx.send(FetchOutcome { generation, result }).await;
        }));
    }

    /// Re-run the fetch after an error (or at any time). Same as `start`.
    pub fn retry(&mut self) {
        info!("Card retry requested (after {})", self.state.name());
        self.start();
    }

    /// Fold any finished fetches into the state without blocking.
    ///
    /// Returns `true` if the state changed.
    pub fn update_state(&mut self) -> bool {
        // Checked before draining: a task reports before it finishes.
        let exited = self
            .in_flight
            .as_ref()
            .is_some_and(JoinHandle::is_finished);

        let mut changed = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            changed |= self.apply(outcome);
        }

        if exited {
            if let Some(handle) = self.in_flight.take() {
                let joined = handle.now_or_never().unwrap_or(Ok(()));
                self.fail_lost_fetch(joined);
                changed = true;
            }
        }
        changed
    }

    /// Wait until the current fetch settles into `Content` or `Error`.
    ///
    /// Returns immediately when no fetch is in flight.
    pub async fn next_transition(&mut self) -> &CardState {
        while let Some(handle) = self.in_flight.as_mut() {
            let event = tokio::select! {
                outcome = self.outcome_rx.recv() => TaskEvent::Reported(outcome),
                joined = handle => TaskEvent::Exited(joined),
            };
            match event {
                TaskEvent::Reported(Some(outcome)) => {
                    self.apply(outcome);
                }
                // The card holds a sender, so the channel stays open.
                TaskEvent::Reported(None) => break,
                TaskEvent::Exited(joined) => {
                    while let Ok(outcome) = self.outcome_rx.try_recv() {
                        self.apply(outcome);
                    }
                    if self.in_flight.take().is_some() {
                        self.fail_lost_fetch(joined);
                    }
                }
            }
        }
        &self.state
    }

    /// The current fetch task is gone without having reported.
    fn fail_lost_fetch(&mut self, joined: Result<(), JoinError>) {
        let reason = match joined {
            Ok(()) => "fetch task ended without a result".to_string(),
            Err(err) if err.is_panic() => "fetch task panicked".to_string(),
            Err(err) => format!("fetch task failed: {}", err),
        };
        error!("Card fetch #{} lost: {}", self.generation, reason);
        self.state = CardState::Error(CardError::Transport(reason));
    }

    fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                "Discarding stale card fetch #{} (current #{})",
                outcome.generation, self.generation
            );
            return false;
        }

        self.in_flight = None;
        self.state = match outcome.result {
            Ok(Fetched { source, target }) => {
                info!("Card content ready: {}", source.normalized_title());
                CardState::Content { source, target }
            }
            Err(err) => {
                error!("Card fetch #{} failed: {}", outcome.generation, err);
                CardState::Error(err)
            }
        };
        true
    }
}

impl<P> Card<P> {
    pub fn state(&self) -> &CardState {
        &self.state
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> CardState {
        self.state.clone()
    }

    pub fn params(&self) -> &CardParams {
        &self.params
    }

    /// Attach the user's text. Empty input is ignored; a contribution once set
    /// is only ever replaced, never cleared. Does not refetch.
    pub fn set_contribution(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.contribution = text;
        }
    }

    pub fn contribution(&self) -> &str {
        &self.contribution
    }

    /// Title of the source item, available once content has loaded. Hosts use
    /// it to open the page when the card is selected.
    pub fn source_title(&self) -> Option<&str> {
        self.state.source().map(Summary::title)
    }

    /// Target-language summary for translate cards.
    pub fn target(&self) -> Option<&Summary> {
        self.state.target()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Render-ready view of the current state and contribution.
    pub fn view(&self) -> CardView {
        projector::project(&self.state, &self.params, &self.contribution)
    }

    /// Terminal release of the in-flight fetch. State is kept as-is and any
    /// report already queued is invalidated.
    pub fn teardown(&mut self) {
        if self.in_flight.is_some() {
            info!("Card torn down with a fetch in flight");
        }
        self.cancel_in_flight();
        self.generation += 1;
        while self.outcome_rx.try_recv().is_ok() {}
    }

    /// Advisory: the task is aborted at its next await point; if its report is
    /// already queued, the generation check discards it.
    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl<P> Drop for Card<P> {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
