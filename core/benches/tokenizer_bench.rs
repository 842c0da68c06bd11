use criterion::{criterion_group, criterion_main, Criterion};
use termdex_core::tokenizer::tokenize;
use termdex_core::{build_index, Document};

const REVIEW: &str = "Bought this for my daughter's birthday and she loves it. The battery \
    lasts for days, the screen is bright and sharp, and setup took only a few minutes. \
    Shipping was quick. Would definitely recommend to anyone looking for a reliable tablet!";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_review", |b| b.iter(|| tokenize(&[REVIEW])));
}

fn bench_build(c: &mut Criterion) {
    let docs: Vec<Document> =
        (0..1_000).map(|i| Document::new(i, format!("{REVIEW} item{i}"))).collect();
    c.bench_function("build_index_1k", |b| b.iter(|| build_index(&docs)));
}

criterion_group!(benches, bench_tokenize, bench_build);
criterion_main!(benches);
