use std::collections::BTreeSet;
use std::fs;
use std::io::Cursor;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use triespell::analysis::tokenizer::tokenize;
use triespell::error::{Result, SpellError};
use triespell::spelling::{
    CandidateGenerator, CandidateStrategy, CorrectorConfig, FileVocabularySource,
    ReaderVocabularySource, SpellingCorrector, TrieIndex, Vocabulary, VocabularySource, correct,
    correct_text,
};
use triespell::util::levenshtein::levenshtein_distance;

const WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "hello", "world", "spelling",
    "corrector", "trie", "index", "word", "words", "work", "worm",
];

fn random_word(rng: &mut StdRng, max_len: usize) -> String {
    let len = rng.random_range(0..=max_len);
    (0..len)
        .map(|_| (b'a' + rng.random_range(0..6u8)) as char)
        .collect()
}

#[test]
fn end_to_end_corrects_every_token() {
    let vocabulary = Vocabulary::from_words(["hello", "world"]);
    assert_eq!(correct_text("helo wrold", &vocabulary), "hello world");

    let corrector = SpellingCorrector::new(vocabulary);
    assert_eq!(corrector.correct_text("helo wrold"), "hello world");
}

#[test]
fn vocabulary_words_are_returned_unchanged() {
    let vocabulary = Vocabulary::from_words(WORDS);
    let trie = TrieIndex::build(&vocabulary);

    for word in WORDS {
        assert_eq!(correct(word, &vocabulary, &trie), *word);
    }
}

#[test]
fn correction_is_idempotent() {
    let corrector = SpellingCorrector::new(Vocabulary::from_words(WORDS));
    let texts = [
        "teh quikc brwn fox jumsp ovr the lazzy dgo",
        "Helo, wrold! This is a speling corector.",
        "",
        "!!! ???",
    ];

    for text in texts {
        let once = corrector.correct_text(text);
        let twice = corrector.correct_text(&once);
        assert_eq!(once, twice, "not idempotent for {text:?}");
    }
}

#[test]
fn distance_is_symmetric_on_sampled_pairs() {
    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(levenshtein_distance("", ""), 0);

    for _ in 0..500 {
        let a = random_word(&mut rng, 8);
        let b = random_word(&mut rng, 8);
        let distance = levenshtein_distance(&a, &b);
        assert_eq!(distance, levenshtein_distance(&b, &a), "{a:?} vs {b:?}");
        assert!(distance <= a.chars().count().max(b.chars().count()));
    }
}

#[test]
fn trie_enumeration_round_trips() {
    let mut rng = StdRng::seed_from_u64(7);
    let inserted: BTreeSet<String> = (0..300)
        .map(|_| random_word(&mut rng, 6))
        .filter(|w| !w.is_empty())
        .collect();

    let trie = TrieIndex::from_words(&inserted);
    let enumerated: BTreeSet<String> = trie.words().into_iter().collect();

    assert_eq!(enumerated, inserted);
    assert_eq!(trie.len(), inserted.len());
}

#[test]
fn bounded_strategies_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(1234);
    let vocabulary: Vec<String> = (0..200)
        .map(|_| random_word(&mut rng, 7))
        .filter(|w| !w.is_empty())
        .collect();
    let trie = TrieIndex::from_words(&vocabulary);

    for _ in 0..50 {
        let word = random_word(&mut rng, 7);
        let word_len = word.chars().count();

        for k in 0..3 {
            let generator = CandidateGenerator::new(CandidateStrategy::EditBound { max_distance: k });
            let expected: BTreeSet<String> = vocabulary
                .iter()
                .filter(|w| levenshtein_distance(w, &word) <= k)
                .cloned()
                .collect();
            assert_eq!(generator.generate(&trie, &word), expected);

            let generator = CandidateGenerator::new(CandidateStrategy::LengthWindow { radius: k });
            let expected: BTreeSet<String> = vocabulary
                .iter()
                .filter(|w| w.chars().count().abs_diff(word_len) <= k)
                .cloned()
                .collect();
            assert_eq!(generator.generate(&trie, &word), expected);
        }
    }
}

#[test]
fn no_candidate_policy_depends_on_strategy() {
    let vocabulary = Vocabulary::from_words(["abc"]);

    let full = SpellingCorrector::new(vocabulary.clone());
    assert_eq!(full.correct_word("xyz"), "abc");

    let bounded = SpellingCorrector::with_config(
        vocabulary,
        CorrectorConfig::default().with_strategy(CandidateStrategy::EditBound { max_distance: 1 }),
    );
    assert_eq!(bounded.correct_word("xyz"), "xyz");
}

#[test]
fn layout_preservation_keeps_punctuation() {
    let config = CorrectorConfig::default().with_preserve_layout(true);
    let corrector = SpellingCorrector::with_config(Vocabulary::from_words(["hello", "world"]), config);

    assert_eq!(corrector.correct_text("Helo, wrold!"), "hello, world!");
    assert_eq!(
        corrector.correct_text("  Hello,\n\twrold  "),
        "  Hello,\n\tworld  "
    );
}

#[test]
fn batch_matches_sequential_correction() {
    let corrector = SpellingCorrector::new(Vocabulary::from_words(WORDS));
    let mut rng = StdRng::seed_from_u64(99);
    let documents: Vec<String> = (0..32)
        .map(|_| {
            (0..20)
                .map(|_| {
                    let word = WORDS[rng.random_range(0..WORDS.len())];
                    if rng.random_bool(0.3) {
                        word.chars().rev().collect()
                    } else {
                        word.to_string()
                    }
                })
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect();

    let sequential: Vec<String> = documents
        .iter()
        .map(|d| corrector.correct_text(d))
        .collect();
    assert_eq!(corrector.correct_batch(&documents), sequential);
}

#[test]
fn tokenizer_splits_on_word_boundaries() {
    let tokens = tokenize("Hello, wrold!");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "wrold"]);
}

#[test]
fn vocabulary_file_is_normalized() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("words.txt");
    fs::write(&path, "Hello\nDon't!\n  world  \n...\n\nhello\n")?;

    let vocabulary = FileVocabularySource::new(&path).load()?;
    assert_eq!(vocabulary.sorted_words(), vec!["dont", "hello", "world"]);

    let corrector = SpellingCorrector::from_source(
        &FileVocabularySource::new(&path),
        CorrectorConfig::default(),
    )?;
    assert_eq!(corrector.correct_text("Dnot wrld"), "dont world");
    Ok(())
}

#[test]
fn vocabulary_sources_report_failures() {
    let dir = TempDir::new().unwrap();
    let missing = FileVocabularySource::new(dir.path().join("missing.txt"));
    assert!(matches!(missing.load(), Err(SpellError::VocabularySource(_))));

    let reader = ReaderVocabularySource::new(Cursor::new("alpha\nbeta\n"));
    assert_eq!(reader.load().unwrap().len(), 2);
    assert!(matches!(reader.load(), Err(SpellError::VocabularySource(_))));
}

#[test]
fn very_long_vocabulary_line_is_handled() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("words.txt");
    let long_line = "a".repeat(100_000);
    fs::write(&path, format!("{long_line}\nhello\nworld\n"))?;

    let corrector = SpellingCorrector::from_source(
        &FileVocabularySource::new(&path),
        CorrectorConfig::default(),
    )?;
    assert_eq!(corrector.vocabulary().len(), 3);
    assert_eq!(corrector.correct_text("helo wrold"), "hello world");
    assert!(corrector.trie().contains(&long_line));
    Ok(())
}
