use crate::error::FetchError;
use futures::future::BoxFuture;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("world-news/", env!("CARGO_PKG_VERSION"));

/// Fetches a URL and returns the response body.
pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        Box::pin(self.fetch(url))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::NetworkUnreachable
    } else if let Some(status) = e.status() {
        FetchError::HttpStatus(status.as_u16())
    } else {
        FetchError::Transport(e.to_string())
    }
}

/// Outcome of a finished fetch job, tagged with the job's generation.
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: u64,
    pub outcome: Result<Vec<u8>, FetchError>,
}

/// One in-flight request.
///
/// The request runs on its own tokio task and reports through the
/// completion channel. A cancelled job never reports.
pub struct FetchJob {
    id: u64,
    url: String,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl FetchJob {
    /// Spawns the request and returns immediately. Must be called inside a tokio runtime.
    pub fn start(
        transport: Arc<dyn Transport>,
        generation: u64,
        url: String,
        completions: mpsc::UnboundedSender<FetchCompletion>,
    ) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let task_url = url.clone();
        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = task_token.cancelled() => {
                    debug!(generation, "fetch job cancelled");
                    return;
                }
                outcome = transport.get(&task_url) => outcome,
            };
            if task_token.is_cancelled() {
                debug!(generation, "dropping result of cancelled fetch job");
                return;
            }
            if completions.send(FetchCompletion { generation, outcome }).is_err() {
                warn!(generation, "loader dropped before fetch job completed");
            }
        });
        debug!(generation, url = %url, "fetch job started");
        Self { id: generation, url, token, task }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Signals cancellation. Idempotent and non-blocking.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
