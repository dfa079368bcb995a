//! Reference vocabulary and the collaborators that supply it.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use log::debug;

use crate::error::{Result, SpellError};

/// Normalize a raw vocabulary entry.
///
/// Surrounding whitespace and every ASCII punctuation character are removed and
/// the rest is lowercased. Returns `None` when nothing is left.
///
/// ```
/// use triespell::spelling::vocabulary::normalize_word;
///
/// assert_eq!(normalize_word("Don't!"), Some("dont".to_string()));
/// assert_eq!(normalize_word("--"), None);
/// ```
pub fn normalize_word(raw: &str) -> Option<String> {
    let normalized: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .to_lowercase();

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// A set of lowercase, punctuation-free words.
///
/// The vocabulary is built once from a raw word list and is immutable
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: AHashSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Vocabulary {
            words: AHashSet::new(),
        }
    }

    /// Build a vocabulary from raw entries, normalizing each one.
    ///
    /// Duplicates (including ones that only differ in case or punctuation)
    /// collapse into a single entry.
    pub fn from_words<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = raw
            .into_iter()
            .filter_map(|word| normalize_word(word.as_ref()))
            .collect();
        Vocabulary { words }
    }

    /// Load a vocabulary with one raw entry per line from a buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = AHashSet::new();
        let mut lines = 0usize;

        for line in reader.lines() {
            let line = line.map_err(|e| {
                SpellError::vocabulary_source(format!("failed to read line {}: {e}", lines + 1))
            })?;
            lines += 1;
            if let Some(word) = normalize_word(&line) {
                words.insert(word);
            }
        }

        debug!("read {} lines into {} vocabulary words", lines, words.len());
        Ok(Vocabulary { words })
    }

    /// Load a vocabulary from a text file with one raw entry per line.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SpellError::vocabulary_source(format!("cannot open {}: {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Check whether an already-normalized word is in the vocabulary.
    ///
    /// Lookups are exact; callers lowercase their input first.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// All words in ascending order.
    pub fn sorted_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.iter().collect();
        words.sort_unstable();
        words
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Vocabulary::from_words(iter)
    }
}

/// A collaborator that produces a vocabulary.
///
/// Fetch failures are reported as [`SpellError::VocabularySource`] and are
/// handled by the caller; the correction core only ever sees a loaded
/// [`Vocabulary`].
pub trait VocabularySource {
    /// Load and normalize the vocabulary.
    fn load(&self) -> Result<Vocabulary>;
}

/// Reads a word list file with one entry per line.
#[derive(Debug, Clone)]
pub struct FileVocabularySource {
    path: PathBuf,
}

impl FileVocabularySource {
    /// Create a source for the given file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileVocabularySource { path: path.into() }
    }

    /// Path of the word list.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VocabularySource for FileVocabularySource {
    fn load(&self) -> Result<Vocabulary> {
        Vocabulary::load_from_file(&self.path)
    }
}

/// Reads a word list from any buffered reader, once.
pub struct ReaderVocabularySource<R> {
    reader: RefCell<Option<R>>,
}

impl<R: BufRead> ReaderVocabularySource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        ReaderVocabularySource {
            reader: RefCell::new(Some(reader)),
        }
    }
}

impl<R: BufRead> VocabularySource for ReaderVocabularySource<R> {
    fn load(&self) -> Result<Vocabulary> {
        let reader = self
            .reader
            .borrow_mut()
            .take()
            .ok_or_else(|| SpellError::vocabulary_source("reader already consumed"))?;
        Vocabulary::from_reader(reader)
    }
}

impl VocabularySource for Vec<String> {
    fn load(&self) -> Result<Vocabulary> {
        Ok(Vocabulary::from_words(self))
    }
}

impl VocabularySource for [&str] {
    fn load(&self) -> Result<Vocabulary> {
        Ok(Vocabulary::from_words(self))
    }
}
