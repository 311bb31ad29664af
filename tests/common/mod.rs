#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use world_news::api::{Article, Connectivity, Transport};
use world_news::app::{App, LoadResult, LoaderController};
use world_news::config::{Config, SessionState};
use world_news::error::FetchError;

pub type Reply = Result<Vec<u8>, FetchError>;

/// Transport whose responses are released by the test.
///
/// Each expected response is matched to the first request whose URL
/// contains its fragment (usually `from-date=...`).
#[derive(Default)]
pub struct ScriptedTransport {
    urls: Mutex<Vec<String>>,
    pending: Mutex<Vec<(String, oneshot::Receiver<Reply>)>>,
}

impl ScriptedTransport {
    /// Registers a response slot; send on the returned handle to release it.
    pub fn expect(&self, url_fragment: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .unwrap()
            .push((url_fragment.to_string(), rx));
        tx
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Reply> {
        self.urls.lock().unwrap().push(url.to_string());
        let slot = {
            let mut pending = self.pending.lock().unwrap();
            pending
                .iter()
                .position(|(fragment, _)| url.contains(fragment.as_str()))
                .map(|i| pending.remove(i).1)
        };
        Box::pin(async move {
            match slot {
                Some(rx) => rx.await.unwrap_or(Err(FetchError::Cancelled)),
                None => Err(FetchError::Transport("unexpected request".into())),
            }
        })
    }
}

/// Connectivity the test can switch on and off.
pub struct Switch(AtomicBool);

impl Switch {
    pub fn online() -> Arc<Self> {
        Arc::new(Switch(AtomicBool::new(true)))
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Switch(AtomicBool::new(false)))
    }

    pub fn set(&self, reachable: bool) {
        self.0.store(reachable, Ordering::SeqCst);
    }
}

impl Connectivity for Switch {
    fn is_network_reachable(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub const TEMPLATE: &str =
    "https://content.guardianapis.com/search?section=world&order-by=oldest&format=json&api-key=test";

pub fn june_15() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2023, 6, 15, 10, 0, 0).unwrap().fixed_offset()
}

pub fn make_loader(
    session: SessionState,
    transport: Arc<ScriptedTransport>,
    connectivity: Arc<Switch>,
) -> LoaderController {
    LoaderController::new(
        session,
        TEMPLATE.to_string(),
        chrono::Weekday::Mon,
        transport,
        connectivity,
    )
    .with_clock(june_15)
}

pub fn test_app(transport: Arc<ScriptedTransport>, connectivity: Arc<Switch>) -> App {
    let config = Config::test_config();
    let loader = make_loader(config.session, transport, connectivity);
    App::with_loader(config, loader)
}

pub fn make_article(title: &str, section: &str, published_at: &str) -> Article {
    Article {
        title: title.to_string(),
        section: section.to_string(),
        published_at: published_at.to_string(),
        url: format!("https://www.theguardian.com/world/{}", title.to_lowercase().replace(' ', "-")),
    }
}

/// A search response body holding `titles`, one result each.
pub fn response_body(titles: &[&str]) -> Vec<u8> {
    let results: Vec<serde_json::Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            serde_json::json!({
                "webTitle": title,
                "sectionName": "World news",
                "webPublicationDate": format!("2023-06-{:02}T09:00:00Z", i + 1),
                "webUrl": format!("https://www.theguardian.com/world/{}", i),
            })
        })
        .collect();
    serde_json::to_vec(&serde_json::json!({
        "response": { "status": "ok", "total": results.len(), "results": results }
    }))
    .unwrap()
}

/// App showing four settled articles, in response order.
pub fn seeded_app() -> App {
    let mut app = test_app(Arc::new(ScriptedTransport::default()), Switch::online());
    app.result = LoadResult::Success(vec![
        make_article("Ceasefire talks resume", "World news", "2023-06-14T08:00:00Z"),
        make_article("Floods hit coastal towns", "Environment", "2023-06-12T17:30:00Z"),
        make_article("Election results delayed", "World news", "2023-06-13T06:15:00Z"),
        make_article("Aid convoy reaches border", "Global development", "2023-06-15T09:45:00Z"),
    ]);
    app
}
