use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datatable::*;

fn make_records(size: usize) -> Vec<Record> {
    (0..size)
        .map(|i| {
            Record::new()
                .with("id", i as i64)
                .with("name", format!("User {}", (i * 7919) % size))
                .with("email", format!("user{}@example.org", i))
                .with("score", (i % 97) as f64 * 1.5)
        })
        .collect()
}

fn bench_sort_by_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_by_name");

    for size in [100, 1000, 10000].iter() {
        let records = make_records(*size);
        let config = SortConfig::ascending("name");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| sort::sort(black_box(&records), Some(&config), Collation::CaseInsensitive));
        });
    }
    group.finish();
}

fn bench_sort_numeric(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_numeric");

    for size in [100, 1000, 10000].iter() {
        let records = make_records(*size);
        let config = SortConfig::descending("score");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| sort::sort(black_box(&records), Some(&config), Collation::CaseInsensitive));
        });
    }
    group.finish();
}

fn bench_filter_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_search");

    for size in [100, 1000, 10000].iter() {
        let records = make_records(*size);
        let ordered: Vec<usize> = (0..*size).collect();
        let term = SearchTerm::new("USER1");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filter::filter(black_box(&records), &ordered, &term));
        });
    }
    group.finish();
}

fn bench_engine_search_keystrokes(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_search_keystrokes");

    for size in [100, 1000, 10000].iter() {
        let mut engine = ViewEngine::with_records(EngineConfig::default(), make_records(*size));
        engine.set_sort_key("name");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                for term in ["u", "us", "use", "user", "user4", ""] {
                    engine.set_search(black_box(term));
                }
                engine.view().visible_records.len()
            });
        });
    }
    group.finish();
}

fn bench_engine_page_flips(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_page_flips");

    for size in [100, 1000, 10000].iter() {
        let mut engine = ViewEngine::with_records(EngineConfig::default(), make_records(*size));
        engine.set_sort_key("score");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                // Page changes reuse the cached sort and filter
                while engine.next_page().is_ok() {}
                engine.set_page(1).unwrap();
                engine.view().visible_records.len()
            });
        });
    }
    group.finish();
}

fn bench_derive_view_from_scratch(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_view_from_scratch");

    for size in [100, 1000, 10000].iter() {
        let records = make_records(*size);
        let control = ControlState::default().with_sort_key("name").with_search("7");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| derive_view(black_box(&records), &control, Collation::CaseInsensitive).total_matches);
        });
    }
    group.finish();
}

fn bench_load_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_json");

    for size in [100, 1000, 10000].iter() {
        let json = serde_json::to_string(&make_records(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| SourceBuffer::from_json_str(black_box(&json)).unwrap().len());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sort_by_name,
    bench_sort_numeric,
    bench_filter_search,
    bench_engine_search_keystrokes,
    bench_engine_page_flips,
    bench_derive_view_from_scratch,
    bench_load_json,
);

criterion_main!(benches);
