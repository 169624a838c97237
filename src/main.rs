use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use aska::eval::{self, EvalReport};
use aska::{
    CoreNlpClientBuilder, MatchOutcome, MatcherConfig, PageMatcher, PageMatcherBuilder,
    SearchBudget, WikipediaClientBuilder,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// aska - find the Wikipedia pages most likely to answer a question
#[derive(Parser)]
#[command(name = "aska")]
#[command(about = "Decompose questions into noun phrases and search Wikipedia titles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Match a single question and print its candidate titles
    Match(MatchCommand),
    /// Read questions from stdin, one per line
    Repl(ReplCommand),
    /// Score the matcher against a labelled corpus
    Eval(EvalCommand),
}

#[derive(Parser)]
struct MatchCommand {
    /// The question to match
    #[arg(value_name = "QUESTION")]
    question: String,

    /// Total number of candidate titles (overrides ASKA_N_SEARCHES)
    #[arg(short = 'n', long, value_name = "N")]
    searches: Option<usize>,
}

#[derive(Parser)]
struct ReplCommand {
    /// Total number of candidate titles (overrides ASKA_N_SEARCHES)
    #[arg(short = 'n', long, value_name = "N")]
    searches: Option<usize>,
}

#[derive(Parser)]
struct EvalCommand {
    /// Path to a JSON corpus of {question, label} entries
    #[arg(short, long, value_name = "PATH")]
    corpus: Option<PathBuf>,

    /// Total number of candidate titles (overrides ASKA_N_SEARCHES)
    #[arg(short = 'n', long, value_name = "N")]
    searches: Option<usize>,
}

fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Match(cmd) => handle_match(cmd),
        Commands::Repl(cmd) => handle_repl(cmd),
        Commands::Eval(cmd) => handle_eval(cmd),
    };

    if let Err(e) = result {
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// User errors are bad arguments; everything else is a backend failure.
fn is_user_error(error: &anyhow::Error) -> bool {
    let error_msg = error.to_string();
    error_msg.contains("cannot be empty") || error_msg.contains("must be positive")
}

/// Applies a `--searches` override on top of the environment config.
fn resolve_budget(config: &MatcherConfig, searches: Option<usize>) -> Result<SearchBudget> {
    match searches {
        None => Ok(config.budget),
        Some(n) => SearchBudget::from_count(n)
            .ok_or_else(|| anyhow::anyhow!("--searches must be positive, got {n}")),
    }
}

fn build_matcher(config: &MatcherConfig) -> Result<PageMatcher> {
    let corenlp = Arc::new(
        CoreNlpClientBuilder::new()
            .build()
            .context("Failed to create CoreNLP client")?,
    );
    let wikipedia = Arc::new(
        WikipediaClientBuilder::new()
            .build()
            .context("Failed to create Wikipedia client")?,
    );

    info!(corenlp = corenlp.base_url(), wikipedia = wikipedia.base_url(), "backends configured");

    let matcher = PageMatcherBuilder::new()
        .entity_tagger(corenlp.clone())
        .pos_tagger(corenlp)
        .phrase_oracle(wikipedia.clone())
        .title_search(wikipedia)
        .noun_filter(config.noun_filter())
        .build()?;
    Ok(matcher)
}

fn handle_match(cmd: &MatchCommand) -> Result<()> {
    if cmd.question.trim().is_empty() {
        anyhow::bail!("Question cannot be empty");
    }

    let config = MatcherConfig::from_env();
    let budget = resolve_budget(&config, cmd.searches)?;
    let matcher = build_matcher(&config)?;

    let outcome = matcher
        .match_query(&cmd.question, budget)
        .context("Failed to match question")?;

    let mut stdout = io::stdout().lock();
    write_outcome(&mut stdout, &outcome)?;
    Ok(())
}

fn handle_repl(cmd: &ReplCommand) -> Result<()> {
    let config = MatcherConfig::from_env();
    let budget = resolve_budget(&config, cmd.searches)?;
    let matcher = build_matcher(&config)?;

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    run_repl(&matcher, budget, stdin, &mut stdout)
}

/// Matches one question per input line until EOF or `exit`.
///
/// A failed question is reported on stderr and the loop keeps going.
fn run_repl<R: BufRead, W: Write>(
    matcher: &PageMatcher,
    budget: SearchBudget,
    input: R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Enter a question (or 'exit' to quit).")?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let question = line.trim();

        if question == "exit" {
            break;
        }
        if question.is_empty() {
            continue;
        }

        match matcher.match_query(question, budget) {
            Ok(outcome) => write_outcome(output, &outcome)?,
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    Ok(())
}

fn handle_eval(cmd: &EvalCommand) -> Result<()> {
    let config = MatcherConfig::from_env();
    let budget = resolve_budget(&config, cmd.searches)?;
    let matcher = build_matcher(&config)?;

    let entries = eval::load_corpus(cmd.corpus.clone())?;
    let report = eval::evaluate(&matcher, &entries, budget).context("Evaluation aborted")?;

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &report)?;
    Ok(())
}

fn write_outcome<W: Write>(output: &mut W, outcome: &MatchOutcome) -> io::Result<()> {
    writeln!(output, "Tokens: {}", outcome.tokens.join(", "))?;
    writeln!(output, "Chunks: {}", outcome.chunks.join(", "))?;
    writeln!(output, "Searches:")?;
    for (rank, title) in outcome.candidates.titles().iter().enumerate() {
        writeln!(output, "  {}. {}", rank + 1, title)?;
    }
    Ok(())
}

fn write_report<W: Write>(output: &mut W, report: &EvalReport) -> io::Result<()> {
    for failure in &report.failures {
        writeln!(output, "MISS: {}", failure.question)?;
        writeln!(output, "  label:    {}", failure.label)?;
        writeln!(output, "  chunks:   {}", failure.chunks.join(", "))?;
        writeln!(output, "  searches: {}", failure.searches.join(", "))?;
    }
    writeln!(
        output,
        "Accuracy: {}/{} ({:.1}%)",
        report.hits,
        report.total,
        report.accuracy() * 100.0
    )
}
