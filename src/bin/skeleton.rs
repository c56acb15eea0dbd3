use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "skeleton", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a recorded render tree and emit skeleton placeholders as JSON.
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Input snapshot JSON (`{ "root": <node> }`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Analysis options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file (TTF/OTF) used to shape text. Without it widths are estimated from
    /// `--advance-em`.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Average glyph advance as a fraction of the font size, used when no font is given.
    #[arg(long, default_value_t = 0.5)]
    advance_em: f64,

    /// Only emit items that still paint something after merging.
    #[arg(long)]
    visible_only: bool,

    /// Log per-node diagnostics and pipeline steps to stderr.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn make_measure(args: &AnalyzeArgs) -> anyhow::Result<Box<dyn skeleton_layout::TextMeasure>> {
    let Some(font) = &args.font else {
        return Ok(Box::new(skeleton_layout::AdvanceMeasure::new(
            args.advance_em,
        )?));
    };
    let bytes = std::fs::read(font).with_context(|| format!("read font '{}'", font.display()))?;
    let measure = skeleton_layout::ParleyMeasure::from_font_bytes(&bytes)
        .with_context(|| format!("load font '{}'", font.display()))?;
    tracing::debug!(family = measure.family_name(), "measuring text with font");
    Ok(Box::new(measure))
}

fn write_json(out: Option<&Path>, value: &serde_json::Value) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write skeleton JSON")?;
            w.flush()
                .with_context(|| format!("flush '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write skeleton JSON")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    init_logging(args.verbose);

    let mut host = skeleton_layout::MemoryHost::from_path(&args.in_path)?;
    let opts = match &args.config {
        Some(path) => skeleton_layout::AnalyzeOptions::from_path(path)?,
        None => skeleton_layout::AnalyzeOptions::default(),
    };
    let mut measure = make_measure(&args)?;

    let root = host.root();
    let mut skeleton = skeleton_layout::analyze(&mut host, measure.as_mut(), root, &opts)?;
    if args.visible_only {
        skeleton.items.retain(|item| item.is_visible());
    }
    if !skeleton.diagnostics.is_empty() {
        eprintln!(
            "{} node(s) could not be fully analyzed",
            skeleton.diagnostics.len()
        );
    }

    let value = serde_json::to_value(&skeleton).with_context(|| "serialize skeleton")?;
    write_json(args.out.as_deref(), &value)
}
