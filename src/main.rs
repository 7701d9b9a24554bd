use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;

use doc_analyst::config::{Settings, DEFAULT_CONFIG_FILE};
use doc_analyst::encoder::{self, EncoderKind};
use doc_analyst::extract::{DocumentSource, FileExtractor, TextExtractor};
use doc_analyst::{output, parser, Analyzer, ChallengeInput};

#[derive(Parser)]
#[command(name = "doc_analyst", about = "Persona-driven section ranking over a document collection")]
struct Cli {
    /// Settings file (missing file = built-in defaults)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank sections and passages of the documents listed in an input JSON
    Analyze {
        /// Challenge input file (documents, persona, job_to_be_done)
        input: PathBuf,
        /// Output path (default: <output_file> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Text encoder used for scoring
        #[arg(short, long, value_enum)]
        encoder: Option<EncoderKind>,
        /// Folder next to the input that holds the documents
        #[arg(long)]
        pdf_dir: Option<String>,
    },
    /// Print the sections detected in one document, without scoring
    Sections {
        document: PathBuf,
        /// Max sections to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load_from(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_level.as_str().into()),
        )
        .init();

    init_worker_pool(settings.workers)?;

    let t0 = Instant::now();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            encoder,
            pdf_dir,
        } => {
            if let Some(kind) = encoder {
                settings.encoder = kind;
            }
            if let Some(dir) = pdf_dir {
                settings.pdf_dir = dir;
            }
            analyze(&settings, &input, output)
        }
        Commands::Sections { document, limit } => print_sections(&document, limit),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn analyze(settings: &Settings, input_path: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let input = ChallengeInput::load(input_path)
        .with_context(|| format!("reading input {}", input_path.display()))?;
    let base_dir = input_path.parent().unwrap_or_else(|| Path::new("."));
    let sources = input.document_sources(&base_dir.join(&settings.pdf_dir));
    let output_path = output.unwrap_or_else(|| base_dir.join(&settings.output_file));

    if let Some(description) = input.description() {
        println!("Collection: {}", description);
    }
    println!("Persona:    {}", input.persona.role);
    println!("Job:        {}", input.job_to_be_done.task);

    let t_load = Instant::now();
    let encoder = encoder::from_settings(settings).context("loading encoder")?;
    println!(
        "Encoder '{}' ready in {:.1}s",
        encoder.name(),
        t_load.elapsed().as_secs_f64()
    );

    if sources.is_empty() {
        println!("No documents listed in input; writing an empty result.");
    } else {
        println!("Analyzing {} documents...", sources.len());
    }

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .context("progress template")?
            .progress_chars("#>-"),
    );

    let analyzer = Analyzer::new(encoder).with_progress(pb);
    let result = analyzer.analyze(&sources, &input.persona.role, &input.job_to_be_done.task)?;

    println!();
    println!("{:>4} | {:<40} | {:<32} | {:>4}", "Rank", "Section", "Document", "Page");
    println!("{}", "-".repeat(90));
    for s in &result.extracted_sections {
        println!(
            "{:>4} | {:<40} | {:<32} | {:>4}",
            s.importance_rank,
            truncate(&s.section_title, 40),
            truncate(&s.document, 32),
            s.page_number
        );
    }

    let covered = result
        .extracted_sections
        .iter()
        .map(|s| s.document.as_str())
        .unique()
        .join(", ");
    println!(
        "\n{} sections, {} passages from: {}",
        result.extracted_sections.len(),
        result.sub_section_analysis.len(),
        if covered.is_empty() { "-" } else { covered.as_str() }
    );

    output::write_json(&output_path, &result)
        .with_context(|| format!("writing {}", output_path.display()))?;
    println!("Wrote {}", output_path.display());
    Ok(())
}

fn print_sections(path: &Path, limit: usize) -> anyhow::Result<()> {
    let source = DocumentSource::from_path(path);
    let pages = FileExtractor.pages(&source)?;
    let sections = parser::segment(&source.name, &pages);
    if sections.is_empty() {
        println!("No sections detected in {} ({} pages).", source.name, pages.len());
        return Ok(());
    }

    println!("{:>3} | {:>4} | {:<48} | {:>6}", "#", "Page", "Title", "Chars");
    println!("{}", "-".repeat(72));
    for (i, s) in sections.iter().take(limit).enumerate() {
        println!(
            "{:>3} | {:>4} | {:<48} | {:>6}",
            i + 1,
            s.page,
            truncate(&s.title, 48),
            s.body.chars().count()
        );
    }

    println!("\n{} sections across {} pages", sections.len(), pages.len());
    Ok(())
}

#[cfg(feature = "rayon")]
fn init_worker_pool(workers: Option<usize>) -> anyhow::Result<()> {
    if let Some(workers) = workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("configuring worker pool")?;
    }
    Ok(())
}

#[cfg(not(feature = "rayon"))]
fn init_worker_pool(_workers: Option<usize>) -> anyhow::Result<()> {
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
