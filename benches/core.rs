use bimtext::checker::dictionary::{CustomWords, Dictionary};
use bimtext::checker::terms::TechnicalTerms;
use bimtext::{build_highlight, replace_all, SpellChecker};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_keynote_text(words: usize) -> String {
    let pool = ["FLOOR", "DRAIN", "roof", "drains,", "TYP.", "see", "teh", "GYP", "BD", "subdrainage"];
    let mut content = String::with_capacity(words * 8);
    for i in 0..words {
        content.push_str(pool[i % pool.len()]);
        content.push(' ');
    }
    content
}

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_all");

    for size in [10, 100, 1000] {
        let content = create_keynote_text(size);

        group.bench_with_input(BenchmarkId::new("case_sensitive", size), &content, |b, content| {
            b.iter(|| black_box(replace_all(content, "DRAIN", "PIPE", true)))
        });

        group.bench_with_input(BenchmarkId::new("case_insensitive", size), &content, |b, content| {
            b.iter(|| black_box(replace_all(content, "drain", "PIPE", false)))
        });
    }

    group.finish();
}

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_highlight");

    for size in [10, 100, 1000] {
        let content = create_keynote_text(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| black_box(build_highlight(content, "drain", "PIPE", false)))
        });
    }

    group.finish();
}

fn bench_spelling(c: &mut Criterion) {
    let dictionary = Dictionary::from_words(["floor", "drain", "roof", "drains", "see", "subdrainage"])
        .expect("valid word set");
    let checker = SpellChecker::from_parts(dictionary, CustomWords::default(), TechnicalTerms::default());
    let mut group = c.benchmark_group("find_issues");

    for size in [10, 100, 1000] {
        let content = create_keynote_text(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &content, |b, content| {
            b.iter(|| black_box(checker.find_issues(content)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_replace, bench_highlight, bench_spelling);
criterion_main!(benches);
