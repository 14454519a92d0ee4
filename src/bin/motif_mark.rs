use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use motif_mark::cli::Report;
use motif_mark::config::{fasta_stem, Config};
use motif_mark::graph::*;
use motif_mark::{read_motif_file, Motifs};

#[derive(Parser)]
#[command(
    name = "motif-mark",
    about = "Draw motif occurrences along the exons and introns of transcripts"
)]
struct Cli {
    /// FASTA file of transcripts, with exons in uppercase and introns in lowercase
    #[arg(short = 'f', long = "fasta")]
    fasta: Option<PathBuf>,

    /// Motif list, one motif per line (IUPAC codes allowed)
    #[arg(short = 'm', long = "motifs")]
    motifs: Option<PathBuf>,

    /// Path to a YAML configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Directory for the diagram
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// Also write the layouts as JSON lines (gzipped if the path ends in .gz)
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Also write a table of all occurrences (gzipped if the path ends in .gz)
    #[arg(long = "tsv")]
    tsv: Option<PathBuf>,

    /// Do not draw the SVG diagram
    #[arg(long = "no-svg")]
    no_svg: bool,

    /// Do not rasterize the diagram to PNG
    #[arg(long = "no-png")]
    no_png: bool,

    /// Fail on invalid motifs instead of dropping them
    #[arg(long = "strict")]
    strict: bool,

    /// Print every layout to standard error
    #[arg(long = "dbg")]
    dbg: bool,

    /// Log progress (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Only report warnings and errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(fasta) = &self.fasta {
            config.fasta = Some(fasta.clone());
        }
        if let Some(motifs) = &self.motifs {
            config.motifs = Some(motifs.clone());
        }
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        if let Some(json) = &self.json {
            config.json = Some(json.clone());
        }
        if let Some(tsv) = &self.tsv {
            config.tsv = Some(tsv.clone());
        }
        if self.no_svg {
            config.svg = false;
        }
        if self.no_png {
            config.png = false;
        }
        if self.strict {
            config.strict = true;
        }
    }
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Cli::parse();

    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    args.apply(&mut config);

    let fasta = config
        .fasta
        .clone()
        .context("no FASTA file given, use --fasta or set `fasta` in the config")?;
    let motif_file = config
        .motifs
        .clone()
        .context("no motif file given, use --motifs or set `motifs` in the config")?;
    let svg_path = config.svg.then(|| config.svg_path(&fasta));
    let png_path = config.png.then(|| config.png_path(&fasta));

    let report = Report::new(args.quiet);
    report.inputs(&fasta, &motif_file, args.config.as_deref(), config.strict);

    // ── Motifs ───────────────────────────────────────────
    let raw_motifs = read_motif_file(&motif_file)?;
    let (motifs, dropped) = if config.strict {
        let motifs = Motifs::from_strs(&raw_motifs)
            .with_context(|| format!("invalid motif in {}", motif_file.display()))?;
        (motifs, 0)
    } else {
        let (motifs, errors) = Motifs::compile_each(&raw_motifs);
        for e in &errors {
            log::warn!("Dropping motif: {e}");
        }
        (motifs, errors.len())
    };
    let colors = Arc::new(ColorTable::with_palette(&motifs, &config.palette()?));
    report.motifs(&colors, dropped);

    // ── Scan ─────────────────────────────────────────────
    let title = fasta_stem(&fasta);
    let summary = {
        let mut graph = Graph::new();
        graph
            .add(InputFastaOp::from_file(fasta.to_string_lossy())?)
            .add(ScanMotifsOp::new(&motifs))
            .add(AssignLanesOp::new())
            .add(LayoutOp::new(Arc::clone(&colors)));

        if args.dbg {
            graph.add(DbgOp::new());
        }
        if let Some(json) = &config.json {
            graph.add(OutputJsonOp::from_file(json.to_string_lossy())?);
        }
        if let Some(tsv) = &config.tsv {
            graph.add(OutputTsvOp::from_file(tsv.to_string_lossy())?);
        }
        let diagrams = [
            (&svg_path, DiagramFormat::Svg),
            (&png_path, DiagramFormat::Png),
        ];
        for (path, format) in diagrams {
            let Some(path) = path else { continue };
            graph.add(OutputDiagramOp::from_file(
                path.to_string_lossy(),
                format,
                &title,
                Arc::clone(&colors),
                config.render,
            )?);
        }

        graph.run()?
    };

    let outputs = [&svg_path, &png_path, &config.json, &config.tsv]
        .into_iter()
        .flatten()
        .map(|p| p.as_path())
        .collect::<Vec<_>>();
    report.finished(&summary, &outputs, start.elapsed());

    Ok(())
}
