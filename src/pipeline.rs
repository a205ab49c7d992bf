//! 流程驱动：定位 motif → 计算窗口 → 取重叠比对 → 覆盖过滤 → 投影裁剪 → 输出。
//!
//! 所有致命错误都在写任何输出文件之前抛出；逐条 read 的跳过只影响计数。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::align::{fully_spans, project, Alignment, AlignmentSource, TrimmedRecord};
use crate::error::{ChopError, Result};
use crate::io::bam::IndexedBam;
use crate::io::fasta::Reference;
use crate::io::fastq::FastqWriter;
use crate::io::SequenceSource;
use crate::motif::{self, MotifHit, SearchMode, Strand};
use crate::window::{compute_window, Window};

/// 一次运行的全部参数，由 CLI 构造后显式传入
#[derive(Debug, Clone)]
pub struct ChopConfig {
    /// 坐标排序、带索引的 BAM
    pub alignments: PathBuf,
    /// 参考 FASTA
    pub reference: PathBuf,
    pub contig: String,
    pub motif: String,
    /// 窗口长度（bp）
    pub window: usize,
    /// 输出 FASTQ
    pub out: PathBuf,
    /// 输出 JSON 汇总
    pub log: PathBuf,
    /// 近似搜索允许的最大编辑距离，0 表示关闭
    pub max_distance: u32,
    pub threads: usize,
}

impl ChopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.motif.is_empty() {
            return Err(ChopError::InvalidMotif("motif is empty".to_string()));
        }
        if self.window == 0 {
            return Err(ChopError::InvalidConfig("window size must be positive".to_string()));
        }
        if self.threads == 0 {
            return Err(ChopError::InvalidConfig("threads must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// JSON 汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub contig: String,
    pub motif: String,
    pub mode: SearchMode,
    pub motif_position: usize,
    pub strand: Strand,
    pub edit_distance: u32,
    pub window_start: usize,
    pub window_end: usize,
    pub reads_examined: usize,
    pub reads_kept: usize,
    pub generated_at: String,
}

/// 定位结果：唯一命中与其窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub hit: MotifHit,
    pub window: Window,
}

#[derive(Debug, Clone)]
pub struct ChopOutcome {
    pub target: Target,
    pub records: Vec<TrimmedRecord>,
    pub reads_examined: usize,
}

impl ChopOutcome {
    pub fn reads_kept(&self) -> usize {
        self.records.len()
    }

    pub fn report(&self, contig: &str, motif: &str) -> Report {
        let hit = &self.target.hit;
        Report {
            contig: contig.to_string(),
            motif: motif.to_string(),
            mode: hit.mode,
            motif_position: hit.position,
            strand: hit.strand,
            edit_distance: hit.edit_distance,
            window_start: self.target.window.start,
            window_end: self.target.window.end,
            reads_examined: self.reads_examined,
            reads_kept: self.reads_kept(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// 在 contig 上定位 motif，并以 `position + motif.len() / 2` 为中点计算窗口。
pub fn resolve_target<S: SequenceSource + ?Sized>(
    sequences: &S,
    contig: &str,
    motif: &str,
    window_size: usize,
    max_distance: u32,
) -> Result<Target> {
    let seq = sequences.sequence(contig)?;
    let hit = motif::locate(seq, motif.as_bytes(), max_distance)?;
    info!(
        "motif hit: mode={} position={} strand={} edit_distance={}",
        hit.mode, hit.position, hit.strand, hit.edit_distance
    );
    let midpoint = hit.position + motif.len() / 2;
    let window = compute_window(midpoint, window_size, seq.len())?;
    info!("window: [{}, {}) on {}", window.start, window.end, contig);
    Ok(Target { hit, window })
}

/// 保留完整跨越窗口且能投影的 read，输出顺序与输入一致。
pub fn trim_records<R: Alignment + Sync>(candidates: &[R], window: &Window) -> Vec<TrimmedRecord> {
    candidates
        .par_iter()
        .filter_map(|aln| {
            if !fully_spans(aln, window) {
                debug!("skip {}: does not span window", aln.query_name());
                return None;
            }
            let rec = project(aln, window);
            if rec.is_none() {
                debug!("skip {}: window boundary not mapped to read", aln.query_name());
            }
            rec
        })
        .collect()
}

/// 取与窗口重叠的比对并裁剪。返回 (保留记录, 检查的比对数)。
pub fn collect_records<A>(alignments: &mut A, contig: &str, window: &Window) -> Result<(Vec<TrimmedRecord>, usize)>
where
    A: AlignmentSource + ?Sized,
    A::Record: Sync,
{
    let candidates = alignments.overlapping(contig, window.start, window.end)?;
    Ok((trim_records(&candidates, window), candidates.len()))
}

/// 核心流程，不涉及文件。
pub fn chop<S, A>(
    sequences: &S,
    alignments: &mut A,
    contig: &str,
    motif: &str,
    window_size: usize,
    max_distance: u32,
) -> Result<ChopOutcome>
where
    S: SequenceSource + ?Sized,
    A: AlignmentSource + ?Sized,
    A::Record: Sync,
{
    let target = resolve_target(sequences, contig, motif, window_size, max_distance)?;
    let (records, reads_examined) = collect_records(alignments, contig, &target.window)?;
    Ok(ChopOutcome { target, records, reads_examined })
}

/// 读文件、跑流程、写 FASTQ 和 JSON 汇总。两个输出要么都写，要么都不写。
pub fn run(config: &ChopConfig) -> anyhow::Result<Report> {
    config.validate()?;

    info!("reference: {}", config.reference.display());
    let reference = Reference::from_path(&config.reference)
        .with_context(|| format!("cannot open reference FASTA '{}'", config.reference.display()))?;
    let contig_len = reference.length(&config.contig)?;
    debug!("contig {} length {}", config.contig, contig_len);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .context("cannot build thread pool")?;

    let target = resolve_target(
        &reference,
        &config.contig,
        &config.motif,
        config.window,
        config.max_distance,
    )?;

    info!("alignments: {}", config.alignments.display());
    let mut bam = IndexedBam::from_path(&config.alignments)
        .with_context(|| format!("cannot open indexed BAM '{}'", config.alignments.display()))?;
    bam.set_threads(config.threads - 1)?;

    // htslib 读取器留在当前线程，只有裁剪进线程池
    let candidates = bam.overlapping(&config.contig, target.window.start, target.window.end)?;
    let records = pool.install(|| trim_records(&candidates, &target.window));
    let outcome = ChopOutcome {
        target,
        records,
        reads_examined: candidates.len(),
    };
    info!("{}/{} reads kept", outcome.reads_kept(), outcome.reads_examined);

    let out = File::create(&config.out)
        .with_context(|| format!("cannot create output FASTQ '{}'", config.out.display()))?;
    let report_file = match File::create(&config.log) {
        Ok(file) => file,
        Err(e) => {
            drop(out);
            if let Err(rm) = std::fs::remove_file(&config.out) {
                warn!("cannot remove '{}': {}", config.out.display(), rm);
            }
            return Err(anyhow::Error::new(e)
                .context(format!("cannot create report '{}'", config.log.display())));
        }
    };

    let mut writer = FastqWriter::new(BufWriter::new(out));
    writer.write_all(&outcome.records)?;
    writer.finish()?;

    let report = outcome.report(&config.contig, &config.motif);
    let mut report_writer = BufWriter::new(report_file);
    serde_json::to_writer_pretty(&mut report_writer, &report)
        .with_context(|| format!("cannot write report '{}'", config.log.display()))?;
    report_writer.write_all(b"\n")?;
    report_writer.flush()?;

    Ok(report)
}
