use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use motif_chop::pipeline::{self, ChopConfig};

#[derive(Parser, Debug)]
#[command(
    name = "motif-chop",
    author,
    version,
    about = "Trim aligned reads to a window around a motif, output FASTQ",
    arg_required_else_help = true
)]
struct Cli {
    /// Coordinate-sorted, indexed BAM (.bai/.csi next to it)
    #[arg(long = "bam", visible_alias = "alignments")]
    alignments: PathBuf,
    /// Reference FASTA file
    #[arg(long = "ref")]
    reference: PathBuf,
    /// Target contig name in reference
    #[arg(long)]
    contig: String,
    /// Motif sequence to locate
    #[arg(long)]
    motif: String,
    /// Window size in bp centered on motif
    #[arg(long)]
    window: usize,
    /// Output FASTQ filename
    #[arg(long)]
    out: PathBuf,
    /// Output JSON summary log
    #[arg(long, default_value = "chop_report.json")]
    log: PathBuf,
    /// Allowed edit distance for approximate motif search (0 disables it)
    #[arg(long = "max-distance", default_value_t = 0)]
    max_distance: u32,
    /// Worker threads for projection; extra threads also decode BGZF
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    threads: usize,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = ChopConfig {
        alignments: cli.alignments,
        reference: cli.reference,
        contig: cli.contig,
        motif: cli.motif,
        window: cli.window,
        out: cli.out,
        log: cli.log,
        max_distance: cli.max_distance,
        threads: cli.threads,
    };
    info!("contig={} motif={} window={}", config.contig, config.motif, config.window);

    let report = pipeline::run(&config)?;
    println!(
        "Done. {}/{} reads kept. FASTQ written to {}",
        report.reads_kept,
        report.reads_examined,
        config.out.display()
    );
    Ok(())
}
