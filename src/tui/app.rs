use crate::error::CorruptIndex;
use crate::index::reader::SearchIndex;
use crate::query::{MatchRecord, SearchSession};
use std::time::Instant;

/// Result cap per keystroke; the status line shows a trailing '+' when hit
const MAX_RESULTS: usize = 100;

/// Application state
pub struct App<'a> {
    /// Incremental session; reuses the previous keystroke's trie descent
    session: SearchSession<'a>,
    pub query: String,
    pub results: Vec<MatchRecord>,
    pub selected: usize,
    pub status_message: String,
    pub symbol_count: u16,
    pub data_size: usize,
    /// Set when a search reports index corruption. Further input is
    /// ignored; the condition must be fixed upstream.
    pub corrupt: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(index: &'a SearchIndex) -> Result<Self, CorruptIndex> {
        let mut app = Self {
            session: index.session()?,
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            status_message: String::new(),
            symbol_count: index.symbol_count(),
            data_size: index.data_size(),
            corrupt: None,
        };
        app.idle_status();
        Ok(app)
    }

    fn idle_status(&mut self) {
        self.status_message = format!(
            "{} symbols ({:.1} kB)",
            self.symbol_count,
            self.data_size as f64 / 1024.0
        );
    }

    pub fn push_char(&mut self, c: char) {
        if self.corrupt.is_some() {
            return;
        }
        self.query.push(c);
        self.run_search();
    }

    pub fn pop_char(&mut self) {
        if self.corrupt.is_some() {
            return;
        }
        self.query.pop();
        self.run_search();
    }

    pub fn delete_word(&mut self) {
        if self.corrupt.is_some() {
            return;
        }
        let trimmed = self.query.trim_end();
        let cut = trimmed.rfind(' ').map(|i| i + 1).unwrap_or(0);
        self.query.truncate(cut);
        self.run_search();
    }

    pub fn clear_query(&mut self) {
        if self.corrupt.is_some() {
            return;
        }
        self.query.clear();
        self.run_search();
    }

    pub fn run_search(&mut self) {
        if self.corrupt.is_some() {
            return;
        }
        if self.query.trim().is_empty() {
            self.results.clear();
            self.selected = 0;
            self.idle_status();
            return;
        }

        let started = Instant::now();
        match self.session.search(&self.query, MAX_RESULTS) {
            Ok(results) => {
                let ms = started.elapsed().as_secs_f64() * 1000.0;
                let more = if results.len() >= MAX_RESULTS { "+" } else { "" };
                self.status_message =
                    format!("{}{} results ({:.1} ms)", results.len(), more, ms);
                self.results = results;
                self.selected = 0;
            }
            Err(err) => {
                self.results.clear();
                self.selected = 0;
                self.corrupt = Some(err.to_string());
                self.status_message = format!("Search disabled, index corrupt: {}", err);
            }
        }
    }

    pub fn selected_result(&self) -> Option<&MatchRecord> {
        self.results.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_page_down(&mut self) {
        self.selected = (self.selected + 10).min(self.results.len().saturating_sub(1));
    }

    pub fn select_page_up(&mut self) {
        self.selected = self.selected.saturating_sub(10);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.results.len().saturating_sub(1);
    }
}
