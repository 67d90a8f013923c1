//! Quick-fill suggestions for the scope and subject stages
//!
//! Both builders are pure and run off the UI thread at startup. Their output is
//! wrapped in a [`SuggestionSet`], which the wizard rotates through with Tab.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Sort direction for path-segment suggestions (by character length)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeOrder {
    Ascending,
    /// Longest, most specific candidates first
    #[default]
    Descending,
}

/// Every directory prefix of every path, plus each file's bare leaf name.
///
/// `"a/b/c"` yields `a`, `a/b`, `a/b/c` and `c`. Duplicates keep their first
/// occurrence; the result is then stably sorted by length.
pub fn path_segments<S: AsRef<str>>(paths: &[S], order: ScopeOrder) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut segments = Vec::new();
    let mut insert = |candidate: String, segments: &mut Vec<String>| {
        if seen.insert(candidate.clone()) {
            segments.push(candidate);
        }
    };

    let mut visited_paths: HashSet<&str> = HashSet::new();
    for path in paths {
        let path = path.as_ref().trim();
        if path.is_empty() || !visited_paths.insert(path) {
            continue;
        }

        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let mut joined = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                joined.push('/');
            }
            joined.push_str(part);
            insert(joined.clone(), &mut segments);
        }
        if let Some(leaf) = parts.last() {
            insert((*leaf).to_string(), &mut segments);
        }
    }

    match order {
        ScopeOrder::Ascending => segments.sort_by_key(|s| s.chars().count()),
        ScopeOrder::Descending => {
            segments.sort_by_key(|s| std::cmp::Reverse(s.chars().count()))
        }
    }
    segments
}

/// Deduplicated candidates from `git log` subject lines.
///
/// Unless `find_all` is set, each line is read as `prefix: message` or
/// `prefix(scope): message`; lines without a colon are dropped and the
/// trimmed text after the first colon is the candidate. With `find_all` the
/// whole line is used. First-seen order is kept.
pub fn historical_messages<S: AsRef<str>>(lines: &[S], find_all: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut messages = Vec::new();

    for line in lines {
        let line = line.as_ref();
        let candidate = if find_all {
            line
        } else {
            match line.split_once(':') {
                Some((_, rest)) => rest.trim(),
                None => continue,
            }
        };
        if candidate.trim().is_empty() {
            continue;
        }
        if seen.insert(candidate.to_string()) {
            messages.push(candidate.to_string());
        }
    }
    messages
}

/// Immutable candidates plus a cursor that wraps around
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSet {
    items: Vec<String>,
    cursor: usize,
}

impl SuggestionSet {
    pub fn new(items: Vec<String>) -> Self {
        Self { items, cursor: 0 }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the candidate the next cycle will return
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return the candidate under the cursor and advance, wrapping to the
    /// first candidate after the last. `None` when there is nothing to cycle.
    pub fn cycle(&mut self) -> Option<&str> {
        if self.items.is_empty() {
            return None;
        }
        let current = self.cursor;
        self.cursor = (self.cursor + 1) % self.items.len();
        Some(self.items[current].as_str())
    }
}
