//! Generation-tokened loader for the article list.
//!
//! Every request gets the next generation number. A completion is applied
//! only while the controller is still loading that generation, so a
//! superseded request can finish at any time without touching the
//! published result. All transitions take `&mut self`; completions reach
//! the controller through a channel and are applied by
//! [`LoaderController::on_fetch_complete`].

use crate::api::dates::{self, TimeWindow};
use crate::api::{Article, Connectivity, FetchCompletion, FetchJob, Transport, build_url, parse_articles};
use crate::config::SessionState;
use crate::error::LoadError;
use chrono::{DateTime, FixedOffset, Local, Weekday};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The result currently presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadResult {
    #[default]
    Empty,
    Loading,
    Success(Vec<Article>),
    Failure(LoadError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    Loading { generation: u64 },
    Settled { generation: u64, result: LoadResult },
}

type Clock = Box<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

static EMPTY: LoadResult = LoadResult::Empty;
static LOADING: LoadResult = LoadResult::Loading;

pub struct LoaderController {
    transport: Arc<dyn Transport>,
    connectivity: Arc<dyn Connectivity>,
    template: String,
    week_start: Weekday,
    clock: Clock,
    generation: u64,
    activated: bool,
    window: TimeWindow,
    state: LoaderState,
    in_flight: Option<FetchJob>,
    last_url: Option<String>,
    last_skipped: usize,
    completions_tx: mpsc::UnboundedSender<FetchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<FetchCompletion>,
    published: watch::Sender<LoadResult>,
}

impl LoaderController {
    pub fn new(
        session: SessionState,
        template: String,
        week_start: Weekday,
        transport: Arc<dyn Transport>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (published, _) = watch::channel(LoadResult::Empty);
        Self {
            transport,
            connectivity,
            template,
            week_start,
            clock: Box::new(|| Local::now().fixed_offset()),
            generation: 0,
            activated: session.has_activated_once,
            window: session.selected_window,
            state: LoaderState::Idle,
            in_flight: None,
            last_url: None,
            last_skipped: 0,
            completions_tx,
            completions_rx,
            published,
        }
    }

    /// Replaces the wall clock used to resolve time windows.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadResult> {
        self.published.subscribe()
    }

    pub fn state(&self) -> &LoaderState {
        &self.state
    }

    pub fn result(&self) -> &LoadResult {
        match &self.state {
            LoaderState::Idle => &EMPTY,
            LoaderState::Loading { .. } => &LOADING,
            LoaderState::Settled { result, .. } => result,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected_window(&self) -> TimeWindow {
        self.window
    }

    pub fn has_activated(&self) -> bool {
        self.activated
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    /// Entries dropped from the last applied response.
    pub fn last_skipped(&self) -> usize {
        self.last_skipped
    }

    pub fn session_state(&self) -> SessionState {
        SessionState {
            selected_window: self.window,
            has_activated_once: self.activated,
        }
    }

    /// Loads `window`, checking connectivity first.
    ///
    /// The first request of a session initializes the loader; later ones
    /// restart it.
    pub fn request(&mut self, window: TimeWindow) {
        if !self.connectivity.is_network_reachable() {
            self.window = window;
            self.on_network_unavailable();
        } else if self.activated {
            self.select_window(window);
        } else {
            self.activate_first_time(window);
        }
    }

    /// Reloads the current window.
    pub fn refresh(&mut self) {
        self.request(self.window);
    }

    /// Starts the first fetch at generation 0. Ignored after the first activation.
    pub fn activate_first_time(&mut self, window: TimeWindow) -> bool {
        if self.activated {
            warn!(window = %window, "loader already activated; ignoring first-time activation");
            return false;
        }
        self.activated = true;
        self.window = window;
        self.start_fetch();
        true
    }

    /// Supersedes whatever is in flight with a fetch for `window`.
    pub fn select_window(&mut self, window: TimeWindow) {
        self.generation += 1;
        self.cancel_in_flight();
        self.activated = true;
        self.window = window;
        self.start_fetch();
    }

    pub fn on_network_unavailable(&mut self) {
        self.cancel_in_flight();
        info!(generation = self.generation, "network unreachable; not starting a fetch");
        self.settle(LoadResult::Failure(LoadError::NetworkUnreachable));
    }

    /// Applies a completion if it belongs to the generation being loaded.
    ///
    /// Returns whether the published result changed.
    pub fn on_fetch_complete(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { generation, outcome } = completion;
        let loading_this = matches!(self.state, LoaderState::Loading { generation: g } if g == generation);
        if generation != self.generation || !loading_this {
            debug!(generation, current = self.generation, "discarding stale fetch result");
            return false;
        }

        let result = match outcome {
            Ok(body) => match parse_articles(&body) {
                Ok(parsed) => {
                    self.last_skipped = parsed.skipped;
                    if parsed.skipped > 0 {
                        warn!(generation, skipped = parsed.skipped, "some search results were malformed");
                    }
                    LoadResult::Success(parsed.articles)
                }
                Err(e) => {
                    warn!(generation, error = %e, "could not parse search response");
                    LoadResult::Failure(e.into())
                }
            },
            Err(e) => match LoadError::from_fetch(e) {
                Some(kind) => {
                    warn!(generation, error = %kind, "fetch failed");
                    LoadResult::Failure(kind)
                }
                None => {
                    debug!(generation, "ignoring cancelled fetch");
                    return false;
                }
            },
        };

        self.in_flight = None;
        self.settle(result);
        true
    }

    /// Clears the published result without touching the generation.
    pub fn on_reset(&mut self) {
        self.cancel_in_flight();
        self.settle(LoadResult::Empty);
    }

    /// Applies every completion already delivered. Returns how many changed the result.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            if self.on_fetch_complete(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next completion and applies it.
    pub async fn next_completion(&mut self) -> Option<bool> {
        let completion = self.completions_rx.recv().await?;
        Some(self.on_fetch_complete(completion))
    }

    fn start_fetch(&mut self) {
        let now = (self.clock)();
        let from = dates::resolve(self.window, &now, self.week_start);
        let url = build_url(&self.template, from);
        info!(generation = self.generation, window = %self.window, from = %from, "loading articles");

        let job = FetchJob::start(
            Arc::clone(&self.transport),
            self.generation,
            url.clone(),
            self.completions_tx.clone(),
        );
        self.in_flight = Some(job);
        self.last_url = Some(url);
        self.state = LoaderState::Loading {
            generation: self.generation,
        };
        self.published.send_replace(LoadResult::Loading);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(job) = self.in_flight.take() {
            debug!(generation = job.id(), finished = job.is_finished(), "cancelling in-flight fetch");
            job.cancel();
        }
    }

    fn settle(&mut self, result: LoadResult) {
        self.state = LoaderState::Settled {
            generation: self.generation,
            result: result.clone(),
        };
        self.published.send_replace(result);
    }
}

impl Drop for LoaderController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
