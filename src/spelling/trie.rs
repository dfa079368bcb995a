//! Prefix tree over the vocabulary.
//!
//! Children are kept in a `BTreeMap`, so every depth-first walk visits siblings
//! in ascending character order and enumerates words lexicographically. The
//! candidate generator relies on this for its deterministic tie-break.
//!
//! Vocabulary entries can be arbitrarily long, so no walk over the tree
//! recurses per character: traversals keep an explicit stack and dropping a
//! node flattens its subtree first.

use std::collections::BTreeMap;
use std::fmt;
use std::mem;

use crate::spelling::vocabulary::Vocabulary;

/// One character position in the shared-prefix structure.
#[derive(Default)]
pub struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    end_of_word: bool,
}

impl TrieNode {
    /// Create an empty node.
    pub fn new() -> Self {
        TrieNode {
            children: BTreeMap::new(),
            end_of_word: false,
        }
    }

    /// Get the child for `ch`, creating it if absent.
    pub fn get_or_create_child(&mut self, ch: char) -> &mut TrieNode {
        self.children.entry(ch).or_default()
    }

    /// Get the child for `ch` without modifying the node.
    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// Children in ascending character order.
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(&ch, node)| (ch, node))
    }

    /// Whether the path from the root to this node spells a vocabulary word.
    pub fn is_end_of_word(&self) -> bool {
        self.end_of_word
    }

    fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(mem::take(&mut node.children).into_values());
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field("end_of_word", &self.end_of_word)
            .finish()
    }
}

/// The vocabulary trie: a root node plus build and query operations.
///
/// Built once per correction session and read-only afterwards, so it can be
/// shared across threads by reference.
#[derive(Debug, Default)]
pub struct TrieIndex {
    root: TrieNode,
    word_count: usize,
}

impl TrieIndex {
    /// Create an empty trie (a root with no children).
    pub fn new() -> Self {
        TrieIndex {
            root: TrieNode::new(),
            word_count: 0,
        }
    }

    /// Build a trie holding every word of the vocabulary.
    pub fn build(vocabulary: &Vocabulary) -> Self {
        Self::from_words(vocabulary.iter())
    }

    /// Build a trie from already-normalized words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = TrieIndex::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Insert a word, creating one node per character as needed.
    ///
    /// Returns `true` if the word was not already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.get_or_create_child(ch);
        }

        let is_new = !node.end_of_word;
        node.end_of_word = true;
        if is_new {
            self.word_count += 1;
        }
        is_new
    }

    /// The root node.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Walk `prefix` from the root and return the node it ends on.
    pub fn find_node(&self, prefix: &str) -> Option<&TrieNode> {
        prefix
            .chars()
            .try_fold(&self.root, |node, ch| node.child(ch))
    }

    /// Check whether `word` was inserted as a complete word.
    pub fn contains(&self, word: &str) -> bool {
        self.find_node(word).is_some_and(TrieNode::is_end_of_word)
    }

    /// Depth-first enumeration below `node`.
    ///
    /// `prefix` is the path already leading to `node`; `visit` receives the
    /// full path of every end-of-word node in lexicographic order.
    pub fn enumerate_from<F>(node: &TrieNode, prefix: &mut String, visit: &mut F)
    where
        F: FnMut(&str),
    {
        if node.end_of_word {
            visit(prefix);
        }

        // One sibling iterator per open level; each level below the first
        // owns the last char of `prefix`.
        let mut stack = vec![node.children()];
        while let Some(siblings) = stack.last_mut() {
            match siblings.next() {
                Some((ch, child)) => {
                    prefix.push(ch);
                    if child.end_of_word {
                        visit(prefix);
                    }
                    stack.push(child.children());
                }
                None => {
                    stack.pop();
                    if !stack.is_empty() {
                        prefix.pop();
                    }
                }
            }
        }
    }

    /// Every stored word, in lexicographic order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.word_count);
        Self::enumerate_from(&self.root, &mut String::new(), &mut |word| {
            words.push(word.to_string())
        });
        words
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether no word has been inserted.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }
}
