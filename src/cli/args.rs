//! Command line argument parsing for the triespell CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::spelling::CandidateStrategy;

/// Triespell - a trie-backed spelling corrector
#[derive(Parser, Debug, Clone)]
#[command(name = "triespell")]
#[command(about = "Correct misspelled words against a reference vocabulary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TriespellArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TriespellArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct one document
    Correct(CorrectArgs),

    /// Correct many documents in parallel
    Batch(BatchArgs),

    /// Show per-word correction diagnostics
    Word(WordArgs),

    /// Print the tokens of a document with their offsets
    Tokenize(TokenizeArgs),

    /// Print the edit distance between two strings
    Distance(DistanceArgs),

    /// Show vocabulary and trie statistics
    Stats(StatsArgs),
}

/// Candidate strategy options shared by the correcting commands
#[derive(Parser, Debug, Clone)]
pub struct StrategyOptions {
    /// Candidate strategy
    #[arg(short, long)]
    pub strategy: Option<StrategyArg>,

    /// Length radius for the `length` strategy
    #[arg(long, default_value = "2")]
    pub radius: usize,

    /// Maximum edit distance for the `edit` strategy
    #[arg(long, default_value = "2")]
    pub max_distance: usize,

    /// Keep the original text between words
    #[arg(long)]
    pub preserve_layout: bool,

    /// Corrector configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

impl StrategyOptions {
    /// The strategy requested on the command line, if any.
    pub fn candidate_strategy(&self) -> Option<CandidateStrategy> {
        self.strategy.map(|strategy| match strategy {
            StrategyArg::Full => CandidateStrategy::FullTrie,
            StrategyArg::Length => CandidateStrategy::LengthWindow {
                radius: self.radius,
            },
            StrategyArg::Edit => CandidateStrategy::EditBound {
                max_distance: self.max_distance,
            },
        })
    }
}

/// Arguments for correcting a document
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Vocabulary file, one word per line
    #[arg(long, value_name = "VOCABULARY_FILE")]
    pub vocabulary: PathBuf,

    /// Document to correct (default: stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Where to write the corrected document (default: stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub strategy: StrategyOptions,

    /// Print per-token diagnostics instead of the corrected text
    #[arg(long)]
    pub report: bool,
}

/// Arguments for batch correction
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Vocabulary file, one word per line
    #[arg(long, value_name = "VOCABULARY_FILE")]
    pub vocabulary: PathBuf,

    /// Documents to correct
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the corrected documents (default: next to each input)
    #[arg(long, value_name = "DIRECTORY")]
    pub out_dir: Option<PathBuf>,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub strategy: StrategyOptions,
}

/// Arguments for word diagnostics
#[derive(Parser, Debug, Clone)]
pub struct WordArgs {
    /// Vocabulary file, one word per line
    #[arg(long, value_name = "VOCABULARY_FILE")]
    pub vocabulary: PathBuf,

    /// Words to correct
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    #[command(flatten)]
    pub strategy: StrategyOptions,
}

/// Arguments for tokenizing
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Document to tokenize (default: stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

/// Arguments for edit distance
#[derive(Parser, Debug, Clone)]
pub struct DistanceArgs {
    /// First string
    #[arg(value_name = "A")]
    pub a: String,

    /// Second string
    #[arg(value_name = "B")]
    pub b: String,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Vocabulary file, one word per line
    #[arg(long, value_name = "VOCABULARY_FILE")]
    pub vocabulary: PathBuf,
}

/// Candidate strategies selectable from the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyArg {
    /// Every vocabulary word
    Full,
    /// Words of similar length
    Length,
    /// Words within an edit distance
    Edit,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_correct_command() {
        let args = TriespellArgs::try_parse_from([
            "triespell",
            "correct",
            "--vocabulary",
            "words.txt",
            "input.txt",
            "-o",
            "output.txt",
            "--preserve-layout",
        ])
        .unwrap();

        if let Command::Correct(correct_args) = args.command {
            assert_eq!(correct_args.vocabulary, PathBuf::from("words.txt"));
            assert_eq!(correct_args.input, Some(PathBuf::from("input.txt")));
            assert_eq!(correct_args.output, Some(PathBuf::from("output.txt")));
            assert!(correct_args.strategy.preserve_layout);
            assert!(!correct_args.report);
            assert_eq!(correct_args.strategy.candidate_strategy(), None);
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_correct_reads_stdin_by_default() {
        let args =
            TriespellArgs::try_parse_from(["triespell", "correct", "--vocabulary", "words.txt"])
                .unwrap();

        if let Command::Correct(correct_args) = args.command {
            assert!(correct_args.input.is_none());
            assert!(correct_args.output.is_none());
        } else {
            panic!("Expected Correct command");
        }
    }

    #[test]
    fn test_strategy_flags() {
        let args = TriespellArgs::try_parse_from([
            "triespell",
            "correct",
            "--vocabulary",
            "words.txt",
            "--strategy",
            "edit",
            "--max-distance",
            "1",
        ])
        .unwrap();

        if let Command::Correct(correct_args) = args.command {
            assert_eq!(
                correct_args.strategy.candidate_strategy(),
                Some(CandidateStrategy::EditBound { max_distance: 1 })
            );
        } else {
            panic!("Expected Correct command");
        }

        let args = TriespellArgs::try_parse_from([
            "triespell",
            "word",
            "--vocabulary",
            "words.txt",
            "--strategy",
            "length",
            "--radius",
            "0",
            "helo",
        ])
        .unwrap();

        if let Command::Word(word_args) = args.command {
            assert_eq!(word_args.words, vec!["helo".to_string()]);
            assert_eq!(
                word_args.strategy.candidate_strategy(),
                Some(CandidateStrategy::LengthWindow { radius: 0 })
            );
        } else {
            panic!("Expected Word command");
        }
    }

    #[test]
    fn test_batch_command() {
        let args = TriespellArgs::try_parse_from([
            "triespell",
            "batch",
            "--vocabulary",
            "words.txt",
            "a.txt",
            "b.txt",
            "--out-dir",
            "out",
            "--threads",
            "4",
        ])
        .unwrap();

        if let Command::Batch(batch_args) = args.command {
            assert_eq!(
                batch_args.inputs,
                vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
            );
            assert_eq!(batch_args.out_dir, Some(PathBuf::from("out")));
            assert_eq!(batch_args.threads, Some(4));
        } else {
            panic!("Expected Batch command");
        }
    }

    #[test]
    fn test_batch_requires_inputs() {
        let result =
            TriespellArgs::try_parse_from(["triespell", "batch", "--vocabulary", "words.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_distance_command() {
        let args = TriespellArgs::try_parse_from(["triespell", "distance", "kitten", "sitting"])
            .unwrap();

        if let Command::Distance(distance_args) = args.command {
            assert_eq!(distance_args.a, "kitten");
            assert_eq!(distance_args.b, "sitting");
        } else {
            panic!("Expected Distance command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = TriespellArgs::try_parse_from(["triespell", "tokenize"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = TriespellArgs::try_parse_from(["triespell", "-v", "tokenize"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = TriespellArgs::try_parse_from(["triespell", "-vvv", "tokenize"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args =
            TriespellArgs::try_parse_from(["triespell", "-vv", "--quiet", "tokenize"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            TriespellArgs::try_parse_from(["triespell", "--format", "json", "--pretty", "tokenize"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);

        let result = TriespellArgs::try_parse_from(["triespell", "--format", "yaml", "tokenize"]);
        assert!(result.is_err());
    }
}
