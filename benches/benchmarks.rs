use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rust_htslib::bam::record::{Cigar, CigarString};
use rust_htslib::bam::Record;

use motif_chop::align::{project, Alignment};
use motif_chop::io::bam::BamAlignment;
use motif_chop::motif::{self, approx};
use motif_chop::util::dna;
use motif_chop::window::compute_window;

fn make_reference(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = 42;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

fn bench_exact_scan(c: &mut Criterion) {
    let reference = make_reference(100_000);
    let motif = reference[50_000..50_020].to_vec();
    let motif_rc = dna::revcomp(&motif);

    c.bench_function("exact_scan_100k_20bp", |b| {
        b.iter(|| {
            black_box(motif::find_exact(black_box(&reference), &motif, &motif_rc));
        })
    });
}

fn bench_infix_search(c: &mut Criterion) {
    let reference = make_reference(100_000);
    let mut motif = reference[50_000..50_020].to_vec();
    motif[10] = b'N';

    c.bench_function("infix_search_100k_20bp_k2", |b| {
        let mut buf = approx::InfixBuffer::new();
        b.iter(|| {
            black_box(approx::infix_search_with_buf(black_box(&motif), &reference, 2, &mut buf));
        })
    });
}

fn bench_project(c: &mut Criterion) {
    let seq = make_reference(10_000);
    let cigar = CigarString(vec![
        Cigar::Match(4000),
        Cigar::Ins(5),
        Cigar::Match(3000),
        Cigar::Del(7),
        Cigar::Match(2995),
    ]);
    let mut record = Record::new();
    record.set(b"bench", Some(&cigar), &seq, &vec![30; seq.len()]);
    let read = BamAlignment::from_record(&record);
    let window = compute_window(5_000, 500, read.reference_end()).unwrap();

    c.bench_function("project_10kb_read_500bp_window", |b| {
        b.iter(|| {
            black_box(project(black_box(&read), &window));
        })
    });
}

criterion_group!(benches, bench_exact_scan, bench_infix_search, bench_project);
criterion_main!(benches);
