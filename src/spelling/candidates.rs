//! Candidate generation from the vocabulary trie.
//!
//! The baseline strategy, [`CandidateStrategy::FullTrie`], walks the entire
//! trie from the root whatever the input word is, so correction becomes
//! "nearest word in the whole dictionary by edit distance". The bounded
//! strategies restrict the walk and change correction results accordingly.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spelling::trie::{TrieIndex, TrieNode};

/// Candidate words, deduplicated and iterated in ascending order.
pub type CandidateSet = BTreeSet<String>;

/// How candidates are drawn from the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CandidateStrategy {
    /// Every word in the trie.
    #[default]
    FullTrie,
    /// Words whose length (in chars) is within `radius` of the input's.
    LengthWindow {
        /// Maximum length difference.
        radius: usize,
    },
    /// Words within `max_distance` edits of the input, found by pruning the
    /// trie walk with one Levenshtein row per node.
    ///
    /// The bound applies to the lowercased input. The corrector then scores
    /// candidates against the word as written, so the reported distance of a
    /// capitalized word can exceed `max_distance` (`"Helo"` picks `"hello"`
    /// under a bound of 1 and reports distance 2).
    EditBound {
        /// Maximum edit distance.
        max_distance: usize,
    },
}

impl fmt::Display for CandidateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateStrategy::FullTrie => write!(f, "full-trie"),
            CandidateStrategy::LengthWindow { radius } => write!(f, "length-window(±{radius})"),
            CandidateStrategy::EditBound { max_distance } => {
                write!(f, "edit-bound(≤{max_distance})")
            }
        }
    }
}

/// Enumerates correction candidates for a word.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateGenerator {
    strategy: CandidateStrategy,
}

impl CandidateGenerator {
    /// Create a generator using `strategy`.
    pub fn new(strategy: CandidateStrategy) -> Self {
        CandidateGenerator { strategy }
    }

    /// The strategy in use.
    pub fn strategy(&self) -> CandidateStrategy {
        self.strategy
    }

    /// Generate candidates for `word` (expected to be lowercased already).
    pub fn generate(&self, trie: &TrieIndex, word: &str) -> CandidateSet {
        let mut candidates = CandidateSet::new();

        match self.strategy {
            CandidateStrategy::FullTrie => {
                TrieIndex::enumerate_from(trie.root(), &mut String::new(), &mut |w| {
                    candidates.insert(w.to_string());
                });
            }
            CandidateStrategy::LengthWindow { radius } => {
                let target = word.chars().count();
                let min_len = target.saturating_sub(radius);
                let max_len = target.saturating_add(radius);
                collect_length_window(trie.root(), min_len, max_len, &mut candidates);
            }
            CandidateStrategy::EditBound { max_distance } => {
                let chars: Vec<char> = word.chars().collect();

                if trie.root().is_end_of_word() && chars.len() <= max_distance {
                    candidates.insert(String::new());
                }
                collect_edit_bound(trie.root(), &chars, max_distance, &mut candidates);
            }
        }

        candidates
    }
}

/// Candidates for `word` under the baseline full-trie strategy.
pub fn candidates(trie: &TrieIndex, word: &str) -> CandidateSet {
    CandidateGenerator::default().generate(trie, word)
}

fn collect_length_window(root: &TrieNode, min_len: usize, max_len: usize, out: &mut CandidateSet) {
    if root.is_end_of_word() && min_len == 0 {
        out.insert(String::new());
    }
    if max_len == 0 {
        return;
    }

    let mut path = String::new();
    let mut stack = vec![root.children()];
    while let Some(siblings) = stack.last_mut() {
        let Some((ch, child)) = siblings.next() else {
            stack.pop();
            if !stack.is_empty() {
                path.pop();
            }
            continue;
        };

        // Length in chars of the word spelled at `child`.
        let depth = stack.len();
        path.push(ch);
        if child.is_end_of_word() && depth >= min_len {
            out.insert(path.clone());
        }
        if depth < max_len {
            stack.push(child.children());
        } else {
            path.pop();
        }
    }
}

fn collect_edit_bound(root: &TrieNode, word: &[char], max_distance: usize, out: &mut CandidateSet) {
    let columns = word.len() + 1;
    let first_row: Vec<usize> = (0..columns).collect();

    let mut path = String::new();
    let mut stack = vec![(root.children(), first_row)];
    while let Some((siblings, prev_row)) = stack.last_mut() {
        let Some((ch, child)) = siblings.next() else {
            stack.pop();
            if !stack.is_empty() {
                path.pop();
            }
            continue;
        };

        let row = next_row(prev_row, word, ch);
        path.push(ch);
        if child.is_end_of_word() && row[columns - 1] <= max_distance {
            out.insert(path.clone());
        }
        // Every word below `child` extends this row, which can only grow.
        if row.iter().min().is_some_and(|&m| m <= max_distance) {
            stack.push((child.children(), row));
        } else {
            path.pop();
        }
    }
}

/// Levenshtein row for `ch` appended to the path that produced `prev_row`.
fn next_row(prev_row: &[usize], word: &[char], ch: char) -> Vec<usize> {
    let mut row = Vec::with_capacity(prev_row.len());
    row.push(prev_row[0] + 1);

    for j in 1..prev_row.len() {
        let insertion = row[j - 1] + 1;
        let deletion = prev_row[j] + 1;
        let substitution = prev_row[j - 1] + usize::from(word[j - 1] != ch);
        row.push(insertion.min(deletion).min(substitution));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::levenshtein::levenshtein_distance;

    const WORDS: &[&str] = &[
        "a", "abc", "bat", "cat", "hello", "help", "helper", "world", "word", "wordy", "sword",
        "zebra",
    ];

    fn trie() -> TrieIndex {
        TrieIndex::from_words(WORDS)
    }

    #[test]
    fn test_full_trie_returns_whole_vocabulary() {
        let trie = trie();
        let expected: CandidateSet = WORDS.iter().map(|w| w.to_string()).collect();

        for word in ["", "helo", "xyz", "completelyunrelated"] {
            assert_eq!(candidates(&trie, word), expected);
        }
    }

    #[test]
    fn test_full_trie_empty_only_for_empty_trie() {
        assert!(candidates(&TrieIndex::new(), "anything").is_empty());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let trie = trie();
        let generator = CandidateGenerator::new(CandidateStrategy::EditBound { max_distance: 2 });
        let first: Vec<String> = generator.generate(&trie, "wrold").into_iter().collect();
        let second: Vec<String> = generator.generate(&trie, "wrold").into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_window_matches_brute_force() {
        let trie = trie();
        for radius in 0..4 {
            let generator = CandidateGenerator::new(CandidateStrategy::LengthWindow { radius });
            for word in ["", "a", "helo", "wrold", "hellooo"] {
                let target = word.chars().count();
                let expected: CandidateSet = WORDS
                    .iter()
                    .filter(|w| w.chars().count().abs_diff(target) <= radius)
                    .map(|w| w.to_string())
                    .collect();
                assert_eq!(
                    generator.generate(&trie, word),
                    expected,
                    "{word} ±{radius}"
                );
            }
        }
    }

    #[test]
    fn test_edit_bound_matches_brute_force() {
        let trie = trie();
        for max_distance in 0..4 {
            let generator =
                CandidateGenerator::new(CandidateStrategy::EditBound { max_distance });
            for word in ["", "a", "helo", "wrold", "swrd", "hello"] {
                let expected: CandidateSet = WORDS
                    .iter()
                    .filter(|w| levenshtein_distance(word, w) <= max_distance)
                    .map(|w| w.to_string())
                    .collect();
                assert_eq!(
                    generator.generate(&trie, word),
                    expected,
                    "{word} ≤{max_distance}"
                );
            }
        }
    }

    #[test]
    fn test_edit_bound_can_be_empty() {
        let trie = TrieIndex::from_words(["abc"]);
        let generator = CandidateGenerator::new(CandidateStrategy::EditBound { max_distance: 1 });
        assert!(generator.generate(&trie, "xyz").is_empty());
    }

    #[test]
    fn test_strategy_display_and_serde() {
        assert_eq!(CandidateStrategy::FullTrie.to_string(), "full-trie");
        assert_eq!(
            CandidateStrategy::LengthWindow { radius: 1 }.to_string(),
            "length-window(±1)"
        );

        let json = serde_json::to_string(&CandidateStrategy::EditBound { max_distance: 2 })
            .unwrap();
        assert_eq!(json, r#"{"type":"edit_bound","max_distance":2}"#);

        let parsed: CandidateStrategy = serde_json::from_str(r#"{"type":"full_trie"}"#).unwrap();
        assert_eq!(parsed, CandidateStrategy::FullTrie);
    }

    #[test]
    fn test_bounded_strategies_with_very_long_entry() {
        let long_word = "a".repeat(10_000);
        let trie = TrieIndex::from_words([long_word.as_str(), "hello", "help"]);

        let generator = CandidateGenerator::new(CandidateStrategy::LengthWindow { radius: 1 });
        let expected: CandidateSet = ["hello", "help"].iter().map(|w| w.to_string()).collect();
        assert_eq!(generator.generate(&trie, "helo"), expected);

        let generator = CandidateGenerator::new(CandidateStrategy::LengthWindow { radius: 10_000 });
        assert!(generator.generate(&trie, "helo").contains(&long_word));

        let generator = CandidateGenerator::new(CandidateStrategy::EditBound { max_distance: 2 });
        assert_eq!(generator.generate(&trie, "helo"), expected);
        assert!(generator.generate(&trie, "aaa").is_empty());
    }
}
