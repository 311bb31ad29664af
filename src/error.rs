use thiserror::Error;

/// Failure of a single fetch job, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network unreachable")]
    NetworkUnreachable,

    #[error("request timed out")]
    Timeout,

    #[error("server responded with HTTP {0}")]
    HttpStatus(u16),

    /// The job was superseded. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Body was not JSON, or lacked `response.results`.
    #[error("response did not contain a result list")]
    MalformedRoot,
}

/// Error kinds that reach the presentation layer through `LoadResult::Failure`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("network unreachable")]
    NetworkUnreachable,

    #[error("request timed out")]
    Timeout,

    #[error("server responded with HTTP {0}")]
    HttpStatus(u16),

    #[error("response did not contain a result list")]
    MalformedRoot,

    #[error("transport error: {0}")]
    Transport(String),
}

impl LoadError {
    /// Maps a fetch failure to its user-facing kind. `Cancelled` has none.
    pub fn from_fetch(err: FetchError) -> Option<Self> {
        match err {
            FetchError::NetworkUnreachable => Some(LoadError::NetworkUnreachable),
            FetchError::Timeout => Some(LoadError::Timeout),
            FetchError::HttpStatus(code) => Some(LoadError::HttpStatus(code)),
            FetchError::Transport(msg) => Some(LoadError::Transport(msg)),
            FetchError::Cancelled => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            LoadError::NetworkUnreachable => "No internet connection.".to_string(),
            LoadError::Timeout => "The news server took too long to respond.".to_string(),
            LoadError::HttpStatus(code) => format!("The news server returned an error (HTTP {}).", code),
            LoadError::MalformedRoot => "The news server sent an unexpected response.".to_string(),
            LoadError::Transport(msg) => format!("Could not load news: {}", msg),
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MalformedRoot => LoadError::MalformedRoot,
        }
    }
}
