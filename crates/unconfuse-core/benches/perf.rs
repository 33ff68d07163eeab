//! Performance benchmarks for unconfuse-core.
//!
//! Everything is linear in code points with an O(log n) lookup per code
//! point, so the interesting cases are clean ASCII (the common fast path),
//! confusable-heavy text and long inputs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use unconfuse_core::{ConfusablesTable, Engine, NormalizationForm, Settings};

const CLEAN: &str = "The quick brown fox leaps over a lazy dog. 23456789";
const SPOOFED: &str = "\u{0397}ello W\u{03BF}rld! p\u{0430}yp\u{0430}l g\u{0456}thub.com \u{FB01}le \u{2167}";

fn bench_lookup(c: &mut Criterion) {
    let table = ConfusablesTable::builtin();
    let samples = ['a', '\u{0430}', '\u{1D400}', '\u{4E2D}', '\u{FB01}'];
    c.bench_function("table_lookup", |b| {
        b.iter(|| {
            for ch in samples {
                black_box(table.lookup(black_box(ch)));
            }
        })
    });
}

fn bench_detection(c: &mut Criterion) {
    let engine = Engine::global();
    c.bench_function("contains_confusables_clean", |b| {
        b.iter(|| black_box(engine.contains_confusables(black_box(CLEAN))))
    });
    c.bench_function("contains_confusables_spoofed", |b| {
        b.iter(|| black_box(engine.contains_confusables(black_box(SPOOFED))))
    });
}

fn bench_replacement(c: &mut Criterion) {
    let engine = Engine::global();
    let mut group = c.benchmark_group("normalize_confusables");
    for repeat in [1usize, 16, 256] {
        let text = SPOOFED.repeat(repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            b.iter(|| black_box(engine.normalize_confusables(text.as_str())))
        });
    }
    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let engine = Engine::global();
    let text = format!("{SPOOFED} caf\u{E9}\u{200B} \u{FF21}\u{FF22}");
    let mut group = c.benchmark_group("normalize");
    for form in NormalizationForm::ALL {
        group.bench_function(form.as_str(), |b| {
            b.iter(|| black_box(engine.normalize(text.as_str(), form, true)))
        });
    }
    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let engine = Engine::global();
    let settings = Settings {
        normalization: Some(NormalizationForm::Nfkc),
        ..Settings::default()
    };
    c.bench_function("sanitize_nfkc", |b| {
        b.iter(|| black_box(engine.sanitize(black_box(SPOOFED), &settings)))
    });
}

criterion_group!(
    benches,
    bench_lookup,
    bench_detection,
    bench_replacement,
    bench_normalization,
    bench_sanitize
);
criterion_main!(benches);
