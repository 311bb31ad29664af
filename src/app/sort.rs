use crate::api::Article;
use std::cmp::Ordering;

/// Columns: 0=Published, 1=Section, 2=Headline
pub(crate) const ARTICLE_SORTABLE_COLUMNS: usize = 3;

pub fn compare_article_column(col: usize, a: &Article, b: &Article) -> Ordering {
    match col {
        // Unparseable dates sort first, then by the raw string.
        0 => a
            .published_date()
            .cmp(&b.published_date())
            .then_with(|| a.published_at.cmp(&b.published_at)),
        1 => a.section.cmp(&b.section),
        2 => a.title.cmp(&b.title),
        _ => Ordering::Equal,
    }
}
