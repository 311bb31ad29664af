use crate::error::ParseError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

/// A news article from the content search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub section: String,
    /// ISO-8601 UTC instant as delivered, e.g. `2023-05-01T09:00:00Z`.
    pub published_at: String,
    pub url: String,
}

impl Article {
    pub fn published_date(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.published_at, "%Y-%m-%dT%H:%M:%SZ")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Articles from one response, plus the number of entries that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArticles {
    pub articles: Vec<Article>,
    pub skipped: usize,
}

// Search API response structures
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "webTitle")]
    web_title: String,
    #[serde(rename = "sectionName")]
    section_name: String,
    #[serde(rename = "webPublicationDate")]
    web_publication_date: String,
    #[serde(rename = "webUrl")]
    web_url: String,
}

impl From<SearchResult> for Article {
    fn from(r: SearchResult) -> Self {
        Article {
            title: r.web_title,
            section: r.section_name,
            published_at: r.web_publication_date,
            url: r.web_url,
        }
    }
}

/// Parses a search response body, keeping the order of `response.results`.
///
/// Entries missing any required field are skipped and counted. A body
/// without a result list at all is `MalformedRoot`; an empty list is a
/// valid, empty success.
pub fn parse_articles(body: &[u8]) -> Result<ParsedArticles, ParseError> {
    let envelope: SearchEnvelope =
        serde_json::from_slice(body).map_err(|_| ParseError::MalformedRoot)?;

    let results = match envelope.response.results {
        Some(results) => results,
        None => {
            warn!(
                status = envelope.response.status.as_deref().unwrap_or("-"),
                message = envelope.response.message.as_deref().unwrap_or("-"),
                "search response has no results list"
            );
            return Err(ParseError::MalformedRoot);
        }
    };

    let total = results.len();
    let mut parsed = ParsedArticles::default();
    for (index, value) in results.into_iter().enumerate() {
        match serde_json::from_value::<SearchResult>(value) {
            Ok(result) => parsed.articles.push(result.into()),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed search result");
                parsed.skipped += 1;
            }
        }
    }
    debug!(total, kept = parsed.articles.len(), skipped = parsed.skipped, "parsed search response");
    Ok(parsed)
}
