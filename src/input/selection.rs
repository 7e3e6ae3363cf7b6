//! Line selection
//!
//! Narrows the input down to the lines to show: optional shuffle, substring
//! search, then a start offset and a count, always in that order.

use memchr::memmem;
use rand::Rng;
use rand::seq::SliceRandom;

use super::reader::Line;

/// Which lines to keep, and in what order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub randomize: bool,
    pub search: Option<String>,
    pub start: usize,
    pub number: Option<usize>,
}

/// Result of applying a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected {
    pub lines: Vec<Line>,
    /// Lines left after the search, before start/number
    pub matched: usize,
}

impl Selection {
    pub fn apply(&self, lines: Vec<Line>) -> Selected {
        self.apply_with_rng(lines, &mut rand::thread_rng())
    }

    pub fn apply_with_rng<R: Rng + ?Sized>(&self, mut lines: Vec<Line>, rng: &mut R) -> Selected {
        if self.randomize {
            lines.shuffle(rng);
        }
        if let Some(needle) = self.search.as_deref() {
            let finder = memmem::Finder::new(needle.as_bytes());
            lines.retain(|line| finder.find(line.text.as_bytes()).is_some());
        }
        let matched = lines.len();

        let lines = lines
            .into_iter()
            .skip(self.start)
            .take(self.number.unwrap_or(usize::MAX))
            .collect();
        Selected { lines, matched }
    }
}
