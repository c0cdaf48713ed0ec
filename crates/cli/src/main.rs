use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use context_chunker::{
    ChunkOutcome, Chunker, ChunkerConfig, ChunkingStats, GrammarTable, Snippet, TreeSitterProvider,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chunk-inspect")]
#[command(about = "Split a source file into structure-aware chunks and print them", long_about = None)]
#[command(version)]
struct Cli {
    /// File to chunk (`-` reads stdin; pass --path to name it)
    file: PathBuf,

    /// Path used for grammar lookup and snippet labels (defaults to FILE)
    #[arg(long)]
    path: Option<String>,

    /// Chunker configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extension to grammar table (TOML, `[grammars]` section)
    #[arg(long)]
    grammars: Option<PathBuf>,

    /// Built-in size preset, ignored when --config is given
    #[arg(long, value_enum, default_value = "default")]
    preset: Preset,

    /// Override the tree walk chunk limit
    #[arg(long)]
    max_chars: Option<usize>,

    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Print only the summary, not the chunk contents
    #[arg(long)]
    stats_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Default,
    Embeddings,
    Llm,
}

impl Preset {
    fn config(self) -> ChunkerConfig {
        match self {
            Self::Default => ChunkerConfig::default(),
            Self::Embeddings => ChunkerConfig::for_embeddings(),
            Self::Llm => ChunkerConfig::for_llm_context(),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    file: &'a str,
    language: Option<&'a str>,
    fallback: Option<String>,
    stats: &'a ChunkingStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    snippets: Option<&'a [Snippet]>,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // stdout is reserved for the JSON document
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let chunker = build_chunker(&cli)?;
    let source = read_source(&cli.file)?;
    let label = cli
        .path
        .clone()
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let outcome = chunker.chunk_with_outcome(&source, &label);
    let language = chunker.grammar_for(&label);
    let stats = ChunkingStats::from_snippets(outcome.snippets());
    log::info!("{label}: {} chunks", stats.total_chunks);

    if cli.json {
        print_json(&cli, &label, language, &outcome, &stats)
    } else {
        print_text(&cli, &label, language, &outcome, &stats);
        Ok(())
    }
}

fn build_chunker(cli: &Cli) -> Result<Chunker<TreeSitterProvider>> {
    let mut config = match &cli.config {
        Some(path) => ChunkerConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => cli.preset.config(),
    };
    if let Some(max_chars) = cli.max_chars {
        config.max_chars = max_chars;
    }

    let grammars = match &cli.grammars {
        Some(path) => GrammarTable::from_path(path)
            .with_context(|| format!("Failed to load grammar table {}", path.display()))?,
        None => GrammarTable::builtin().context("Bundled grammar table is invalid")?,
    };
    log::debug!("{} grammar mappings loaded", grammars.len());

    Chunker::new(config, grammars, TreeSitterProvider::new()).context("Invalid chunker settings")
}

fn read_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn print_json(
    cli: &Cli,
    label: &str,
    language: Option<&str>,
    outcome: &ChunkOutcome,
    stats: &ChunkingStats,
) -> Result<()> {
    let report = Report {
        file: label,
        language,
        fallback: outcome.fallback_reason().map(ToString::to_string),
        stats,
        snippets: (!cli.stats_only).then(|| outcome.snippets()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(
    cli: &Cli,
    label: &str,
    language: Option<&str>,
    outcome: &ChunkOutcome,
    stats: &ChunkingStats,
) {
    println!("File: {label}");
    println!("Language: {}", language.unwrap_or("none"));
    if let Some(reason) = outcome.fallback_reason() {
        println!("Fallback: {reason}");
    }
    println!();

    if !cli.stats_only {
        let total = outcome.snippets().len();
        for (i, snippet) in outcome.snippets().iter().enumerate() {
            println!(
                "--- Chunk {}/{} | Lines: {}-{} ({} lines) ---",
                i + 1,
                total,
                snippet.start_line + 1,
                snippet.end_line,
                snippet.line_count()
            );
            println!("{}", snippet.content);
            println!();
        }
    }

    println!("{stats}");
}
