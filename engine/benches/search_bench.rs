use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use search_engine::{DocumentStatus, ExecutionPolicy, SearchServer};

fn build_server(documents: i32) -> SearchServer {
    let mut server = SearchServer::from_stop_words_text("and with in").unwrap();
    let mut seed: u64 = 7;
    for id in 0..documents {
        let words: Vec<String> = (0..40)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                format!("w{}", (seed >> 40) % 5000)
            })
            .collect();
        server.add_document(id, &words.join(" "), DocumentStatus::Actual, &[id % 10]).unwrap();
    }
    server
}

fn bench_find_top_documents(c: &mut Criterion) {
    let server = build_server(10_000);
    let query: String = (0..200).map(|i| if i % 10 == 0 { format!("-w{i} ") } else { format!("w{i} ") }).collect();

    let mut group = c.benchmark_group("find_top_documents");
    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{policy:?}")), &policy, |b, &policy| {
            b.iter(|| server.find_top_documents_with_policy(policy, &query, DocumentStatus::Actual.predicate()))
        });
    }
    group.finish();
}

fn bench_remove_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_document");
    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{policy:?}")), &policy, |b, &policy| {
            b.iter_batched(
                || build_server(500),
                |mut server| {
                    for id in 0..500 {
                        server.remove_document_with_policy(policy, id);
                    }
                    server
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_find_top_documents, bench_remove_document);
criterion_main!(benches);
