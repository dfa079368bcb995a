//! Command implementations for the triespell CLI.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use ahash::AHashMap;
use log::{info, warn};
use rayon::ThreadPoolBuilder;

use crate::analysis::tokenizer::tokenize;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SpellError};
use crate::spelling::{
    CorrectorConfig, FileVocabularySource, SpellingCorrector, Vocabulary, VocabularySource,
};
use crate::util::levenshtein::{levenshtein_distance, levenshtein_ratio};

/// Execute a CLI command.
pub fn execute_command(args: TriespellArgs) -> Result<()> {
    match &args.command {
        Command::Correct(correct_args) => correct_document(correct_args.clone(), &args),
        Command::Batch(batch_args) => correct_batch(batch_args.clone(), &args),
        Command::Word(word_args) => correct_words(word_args.clone(), &args),
        Command::Tokenize(tokenize_args) => tokenize_document(tokenize_args.clone(), &args),
        Command::Distance(distance_args) => show_distance(distance_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Correct one document.
fn correct_document(args: CorrectArgs, cli_args: &TriespellArgs) -> Result<()> {
    let corrector = build_corrector(&args.vocabulary, &args.strategy)?;
    let text = read_document(args.input.as_deref())?;

    let start_time = Instant::now();
    let report = corrector.correct_text_detailed(&text);
    info!(
        "corrected {} of {} tokens in {:?}",
        report.corrected,
        report.tokens,
        start_time.elapsed()
    );

    if args.report || cli_args.output_format == OutputFormat::Json {
        if let Some(output) = &args.output {
            write_document(Some(output.as_path()), &report.text)?;
        }
        output_result("Correction report", &report, cli_args)
    } else {
        write_document(args.output.as_deref(), &report.text)
    }
}

/// Correct many documents on a dedicated thread pool.
fn correct_batch(args: BatchArgs, cli_args: &TriespellArgs) -> Result<()> {
    let outputs = batch_output_paths(&args.inputs, args.out_dir.as_deref())?;
    let corrector = build_corrector(&args.vocabulary, &args.strategy)?;

    let documents = args
        .inputs
        .iter()
        .map(|input| read_document(Some(input.as_path())))
        .collect::<Result<Vec<String>>>()?;

    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| SpellError::other(format!("cannot start thread pool: {e}")))?;

    let start_time = Instant::now();
    let corrected = pool.install(|| corrector.correct_batch(&documents));
    let duration = start_time.elapsed();
    info!(
        "corrected {} documents on {} threads in {:?}",
        documents.len(),
        threads,
        duration
    );

    if let Some(out_dir) = &args.out_dir {
        fs::create_dir_all(out_dir)?;
    }

    let mut results = Vec::with_capacity(corrected.len());
    for ((input, output), text) in args.inputs.iter().zip(outputs).zip(&corrected) {
        write_document(Some(output.as_path()), text)?;
        results.push(BatchDocument {
            input: input.to_string_lossy().to_string(),
            output: output.to_string_lossy().to_string(),
            bytes: text.len(),
        });
    }

    output_result(
        "Batch correction complete",
        &BatchResult {
            documents: results,
            threads,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Show per-word diagnostics.
fn correct_words(args: WordArgs, cli_args: &TriespellArgs) -> Result<()> {
    let corrector = build_corrector(&args.vocabulary, &args.strategy)?;

    let words = args
        .words
        .iter()
        .map(|word| corrector.correct_word_detailed(word))
        .collect();

    output_result("Word corrections", &WordReport { words }, cli_args)
}

/// Print the tokens of a document.
fn tokenize_document(args: TokenizeArgs, cli_args: &TriespellArgs) -> Result<()> {
    let text = read_document(args.input.as_deref())?;
    let tokens = tokenize(&text);

    output_result("Tokens", &TokenList { tokens }, cli_args)
}

/// Print the edit distance between two strings.
fn show_distance(args: DistanceArgs, cli_args: &TriespellArgs) -> Result<()> {
    let distance = levenshtein_distance(&args.a, &args.b);
    let ratio = levenshtein_ratio(&args.a, &args.b);

    output_result(
        "Edit distance",
        &DistanceResult {
            a: args.a,
            b: args.b,
            distance,
            ratio,
        },
        cli_args,
    )
}

/// Show vocabulary and trie statistics.
fn show_stats(args: StatsArgs, cli_args: &TriespellArgs) -> Result<()> {
    let vocabulary = load_vocabulary(&args.vocabulary)?;
    let corrector = SpellingCorrector::new(vocabulary);

    output_result("Vocabulary statistics", &corrector.stats(), cli_args)
}

/// Load a vocabulary file.
fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let vocabulary = FileVocabularySource::new(path).load()?;
    if vocabulary.is_empty() {
        warn!(
            "vocabulary {} is empty, no word will be corrected",
            path.display()
        );
    } else {
        info!(
            "loaded {} words from {}",
            vocabulary.len(),
            path.display()
        );
    }
    Ok(vocabulary)
}

/// Build the corrector configuration: the config file, if any, then the
/// command line overrides.
pub fn build_config(options: &StrategyOptions) -> Result<CorrectorConfig> {
    let mut config = match &options.config {
        Some(path) => CorrectorConfig::load_from_file(path)?,
        None => CorrectorConfig::default(),
    };

    if let Some(strategy) = options.candidate_strategy() {
        config = config.with_strategy(strategy);
    }
    if options.preserve_layout {
        config = config.with_preserve_layout(true);
    }

    Ok(config)
}

fn build_corrector(vocabulary: &Path, options: &StrategyOptions) -> Result<SpellingCorrector> {
    let config = build_config(options)?;
    let vocabulary = load_vocabulary(vocabulary)?;
    Ok(SpellingCorrector::with_config(vocabulary, config))
}

/// Read a document from a file, or from stdin when no path is given.
pub fn read_document(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            SpellError::document_source(format!("cannot read {}: {e}", path.display()))
        }),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| SpellError::document_source(format!("cannot read stdin: {e}")))?;
            Ok(text)
        }
    }
}

/// Write a document to a file, or to stdout when no path is given.
pub fn write_document(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text).map_err(|e| {
            SpellError::document_source(format!("cannot write {}: {e}", path.display()))
        }),
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            out.flush()?;
            Ok(())
        }
    }
}

/// Path of the corrected copy of `input`: `<stem>.corrected.txt`, in
/// `out_dir` or next to the input.
pub fn corrected_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    let file_name = format!("{stem}.corrected.txt");

    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Output path of every batch input, in input order.
///
/// Fails when two inputs would be written to the same file, such as
/// `a/notes.txt` and `b/notes.txt` under one `--out-dir`.
pub fn batch_output_paths(inputs: &[PathBuf], out_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut seen: AHashMap<PathBuf, &Path> = AHashMap::with_capacity(inputs.len());
    let mut outputs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let output = corrected_path(input, out_dir);
        let key: PathBuf = output
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        if let Some(previous) = seen.insert(key, input.as_path()) {
            return Err(SpellError::invalid_argument(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                output.display()
            )));
        }
        outputs.push(output);
    }

    Ok(outputs)
}
