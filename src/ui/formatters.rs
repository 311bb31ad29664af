use crate::api::Article;

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let end = s
            .char_indices()
            .nth(max_len.saturating_sub(3))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}

/// Publication date as `Jun. 01, 2023`, or the raw value if it does not parse.
pub fn format_publication_date(article: &Article) -> String {
    match article.published_date() {
        Some(date) => date.format("%b. %d, %Y").to_string(),
        None => article.published_at.clone(),
    }
}
