use super::sort::compare_article_column;
use super::{App, InputMode, SortDirection};
use crate::api::Article;

impl App {
    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.input_buffer.clear();
    }

    pub fn confirm_search(&mut self) {
        if !self.input_buffer.trim().is_empty() {
            self.search_query = self.input_buffer.trim().to_uppercase();
            self.search_active = true;
            self.selected_index = 0;
        } else {
            self.clear_filter();
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    pub fn cancel_search(&mut self) {
        self.clear_filter();
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    pub fn clear_filter(&mut self) {
        self.search_query.clear();
        self.search_active = false;
        self.selected_index = 0;
    }

    /// Articles matching the search (title or section), in the chosen order.
    ///
    /// Without a sort column the response order is kept.
    pub fn get_filtered_articles(&self) -> Vec<&Article> {
        let mut items: Vec<&Article> = self.articles().iter().collect();
        if self.search_active {
            items.retain(|a| {
                a.title.to_uppercase().contains(&self.search_query)
                    || a.section.to_uppercase().contains(&self.search_query)
            });
        }
        if let Some(col) = self.sort_column {
            let dir = self.sort_direction;
            items.sort_by(|a, b| {
                let ord = compare_article_column(col, a, b);
                match dir {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        items
    }
}
