//! Fuzzy-filtered list with a clamped selection.

use std::ops::Range;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Items filtered by a query, best match first.
///
/// An empty query shows every item in its original order. The selection
/// always points into the filtered items and goes back to the top whenever
/// the query changes.
#[derive(Debug, Clone)]
pub struct FuzzyList<T> {
    items: Vec<T>,
    haystacks: Vec<String>,
    filtered: Vec<usize>,
    selected: usize,
    query: String,
}

impl<T> FuzzyList<T> {
    /// Build a list, `key` gives the text each item is matched against.
    pub fn new(items: Vec<T>, key: impl Fn(&T) -> String) -> Self {
        let haystacks = items.iter().map(key).collect();
        let filtered = (0..items.len()).collect();
        Self {
            items,
            haystacks,
            filtered,
            selected: 0,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Filter with a new query. Returns false if the query did not change.
    pub fn set_query(&mut self, query: &str) -> bool {
        if query == self.query {
            return false;
        }
        self.query = query.to_string();
        self.filtered = self.rank(query);
        self.selected = 0;
        true
    }

    /// Show a fixed subset (indices into all items) instead of fuzzy
    /// matches, selecting `selected` within it.
    pub fn show_only(&mut self, query: &str, indices: Vec<usize>, selected: usize) {
        self.query = query.to_string();
        self.filtered = indices.into_iter().filter(|&i| i < self.items.len()).collect();
        self.selected = selected.min(self.filtered.len().saturating_sub(1));
    }

    fn rank(&self, query: &str) -> Vec<usize> {
        if query.is_empty() {
            return (0..self.items.len()).collect();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(usize, i64)> = self
            .haystacks
            .iter()
            .enumerate()
            .filter_map(|(idx, text)| matcher.fuzzy_match(text, query).map(|score| (idx, score)))
            .collect();
        // Stable: equal scores keep their original order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }

    /// Number of items, unfiltered.
    pub fn total_len(&self) -> usize {
        self.items.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Filtered items, in rank order.
    pub fn filtered(&self) -> impl Iterator<Item = &T> {
        self.filtered.iter().map(|&idx| &self.items[idx])
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Currently selected item, `None` when nothing matches.
    pub fn selected(&self) -> Option<&T> {
        self.filtered
            .get(self.selected)
            .and_then(|&idx| self.items.get(idx))
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    /// Range of filtered positions visible in a viewport of `height` rows,
    /// scrolled so the selection stays on screen.
    pub fn viewport(&self, height: usize) -> Range<usize> {
        let len = self.filtered.len();
        if len <= height {
            return 0..len;
        }
        let start = if self.selected >= height {
            self.selected + 1 - height
        } else {
            0
        };
        start..(start + height).min(len)
    }

    /// Filtered items inside the viewport, with their filtered position.
    pub fn visible(&self, height: usize) -> impl Iterator<Item = (usize, &T)> {
        self.viewport(height)
            .map(move |pos| (pos, &self.items[self.filtered[pos]]))
    }
}
