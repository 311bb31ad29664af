mod filter;
pub mod loader;
mod sort;

pub use loader::{LoadResult, LoaderController, LoaderState};
pub use sort::compare_article_column;

use crate::api::{AlwaysReachable, Article, Connectivity, HttpTransport, TcpProbe, TimeWindow, Transport};
use crate::config::Config;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(&mut self) {
        *self = match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

pub struct App {
    pub config: Config,
    pub loader: LoaderController,
    /// Latest result published by the loader.
    pub result: LoadResult,
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub status_message: Option<String>,
    pub search_query: String,
    pub search_active: bool,
    pub sort_column: Option<usize>,
    pub sort_direction: SortDirection,
    updates: watch::Receiver<LoadResult>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_secs))?;
        let probe_timeout = Duration::from_millis(config.connectivity_timeout_ms);
        let connectivity: Arc<dyn Connectivity> =
            match TcpProbe::for_endpoint(&config.query.endpoint, probe_timeout) {
                Some(probe) => Arc::new(probe),
                None => {
                    warn!(endpoint = %config.query.endpoint, "endpoint has no host; skipping connectivity checks");
                    Arc::new(AlwaysReachable)
                }
            };
        Ok(Self::with_collaborators(config, Arc::new(transport), connectivity))
    }

    pub fn with_collaborators(
        config: Config,
        transport: Arc<dyn Transport>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        let loader = LoaderController::new(
            config.session,
            config.query.template(),
            config.week_start,
            transport,
            connectivity,
        );
        Self::with_loader(config, loader)
    }

    pub fn with_loader(config: Config, loader: LoaderController) -> Self {
        let updates = loader.subscribe();
        Self {
            config,
            loader,
            result: LoadResult::Empty,
            selected_index: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status_message: None,
            search_query: String::new(),
            search_active: false,
            sort_column: None,
            sort_direction: SortDirection::Ascending,
            updates,
        }
    }

    pub fn selected_window(&self) -> TimeWindow {
        self.loader.selected_window()
    }

    /// First load of the session, for the window restored from config.
    pub fn start(&mut self) {
        let window = self.config.session.selected_window;
        info!(window = %window, "starting session");
        self.loader.request(window);
        self.after_request();
    }

    pub fn select_window(&mut self, window: TimeWindow) {
        self.loader.request(window);
        self.after_request();
    }

    pub fn next_window(&mut self) {
        self.select_window(self.selected_window().next());
    }

    pub fn prev_window(&mut self) {
        self.select_window(self.selected_window().prev());
    }

    pub fn refresh(&mut self) {
        self.loader.refresh();
        self.after_request();
    }

    fn after_request(&mut self) {
        self.config.session = self.loader.session_state();
        self.status_message = None;
        self.sync_result();
    }

    /// Applies finished fetches and picks up the newest published result.
    pub fn tick(&mut self) -> bool {
        self.loader.poll_completions();
        self.sync_result()
    }

    fn sync_result(&mut self) -> bool {
        if !self.updates.has_changed().unwrap_or(false) {
            return false;
        }
        self.result = self.updates.borrow_and_update().clone();
        self.selected_index = 0;
        if let LoadResult::Success(_) = self.result {
            let skipped = self.loader.last_skipped();
            if skipped > 0 {
                self.status_message = Some(format!("{} malformed entries skipped", skipped));
            }
        }
        true
    }

    pub fn articles(&self) -> &[Article] {
        match &self.result {
            LoadResult::Success(articles) => articles,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        self.result == LoadResult::Loading
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.get_filtered_articles().len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn cycle_sort_column(&mut self) {
        self.sort_column = match self.sort_column {
            None => Some(0),
            Some(i) if i + 1 >= sort::ARTICLE_SORTABLE_COLUMNS => None,
            Some(i) => Some(i + 1),
        };
        self.selected_index = 0;
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction.toggle();
        self.selected_index = 0;
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.get_filtered_articles().get(self.selected_index).copied()
    }

    /// Hands the selected article's URL to the system browser.
    pub fn open_selected(&mut self) {
        let Some(url) = self.selected_article().map(|a| a.url.clone()) else {
            return;
        };
        match open::that_detached(&url) {
            Ok(()) => {
                info!(url = %url, "opened article");
                self.status_message = Some("Opened in browser".to_string());
            }
            Err(e) => {
                warn!(url = %url, error = %e, "could not open article");
                self.status_message = Some(format!("Could not open browser: {}", e));
            }
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn close_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Tears down the view: clears the published result and cancels any fetch.
    pub fn shutdown(&mut self) {
        self.config.session = self.loader.session_state();
        self.loader.on_reset();
        self.sync_result();
    }
}
