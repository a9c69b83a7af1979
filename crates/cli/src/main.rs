use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use trace_cli::{
    classify_matrices, fingerprint, render_text, run_analysis, AppConfig, ConfigOverrides,
    MatrixCache,
};
use trace_code_model::SourceModel;
use trace_semantic::Lexicon;

#[derive(Parser)]
#[command(name = "utility-traces")]
#[command(about = "Detect utility classes from structural and semantic relations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every code unit of a resolved snapshot
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Resolved source model snapshot (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keyword list, one word per line (built-in Java keywords by default)
    #[arg(long)]
    keywords: Option<PathBuf>,

    /// FDR threshold
    #[arg(long)]
    alpha: Option<f64>,

    /// CS threshold
    #[arg(long)]
    beta: Option<f64>,

    /// Directory for cached matrices
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Always rebuild the matrices and leave the cache untouched
    #[arg(long)]
    no_cache: bool,

    /// Print FDR and CS for every unit
    #[arg(long)]
    scores: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Analyze(args) => analyze(args),
    }
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let config = AppConfig::resolve(
        args.config.as_deref(),
        ConfigOverrides {
            alpha: args.alpha,
            beta: args.beta,
            keywords: args.keywords,
            cache_dir: args.cache_dir,
            no_cache: args.no_cache,
        },
    )?;

    let snapshot = std::fs::read(&args.model)
        .with_context(|| format!("Cannot read snapshot {}", args.model.display()))?;
    let model = SourceModel::from_json_slice(&snapshot)
        .with_context(|| format!("Cannot parse snapshot {}", args.model.display()))?;
    log::info!("Loaded {} code units from {}", model.len(), args.model.display());

    let (lexicon, keyword_bytes) = load_lexicon(config.lexicon.keywords.as_deref())?;
    let key = fingerprint(&[snapshot.as_slice(), keyword_bytes.as_slice()]);
    let cache = config
        .cache
        .enabled
        .then(|| MatrixCache::new(&config.cache.dir));

    let cached = cache
        .as_ref()
        .and_then(|cache| cache.load(&key, model.index()));

    let report = match cached {
        Some(matrices) => classify_matrices(
            model.index(),
            &matrices.calls,
            &matrices.references,
            &matrices.semantic,
            &config.thresholds,
        )?,
        None => {
            let analysis = run_analysis(&model, &lexicon, &config.thresholds)?;
            if !analysis.diagnostics().is_empty() {
                log::info!(
                    "{} expressions could not be resolved (use --verbose to list them)",
                    analysis.diagnostics().len()
                );
            }
            if let Some(cache) = &cache {
                if let Err(err) = cache.store(
                    &key,
                    analysis.index(),
                    analysis.graph.calls.values(),
                    analysis.graph.references.values(),
                    analysis.similarity.values(),
                ) {
                    log::warn!("Failed to write matrix cache: {err:#}");
                }
            }
            analysis.report
        }
    };

    let output = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        render_text(&report, args.scores)
    };
    print_stdout(&output)
}

/// The lexicon plus the raw keyword bytes that feed the cache fingerprint
fn load_lexicon(keywords: Option<&Path>) -> Result<(Lexicon, Vec<u8>)> {
    match keywords {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Cannot read keyword list {}", path.display()))?;
            let lexicon = Lexicon::with_keyword_file(path)?;
            Ok((lexicon, bytes))
        }
        None => Ok((Lexicon::java(), Vec::new())),
    }
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}
