//! Question ordering and renaming benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use arbitrate::{question_order, sorted_keys, ProjectMeta, Session};

/// Shuffled survey-style question identifiers.
fn generate_question_ids(count: usize, rng: &mut StdRng) -> Vec<String> {
    let mut ids: Vec<String> = (0..count)
        .map(|i| match i % 4 {
            0 => format!("Q{} How many participants were there?", i),
            1 => format!("Q{}_{} Which actors were involved?", i / 10, i % 10),
            2 => format!("Q{}_{}_TEXT Other (please specify)", i / 10, i % 10),
            _ => format!("Q{}_{} Describe the event...", rng.gen_range(1..200), i % 100),
        })
        .collect();
    ids.shuffle(rng);
    ids
}

/// A coder export with `cases` rows and `questions` columns.
fn generate_coder_csv(cases: usize, questions: usize, coder: &str) -> String {
    let mut data = String::from("Case,Coder");
    for q in 0..questions {
        data.push_str(&format!(",Q{} Question {}", q + 1, q + 1));
    }
    data.push('\n');

    for case in 0..cases {
        data.push_str(&format!("{},{}", case, coder));
        for q in 0..questions {
            data.push_str(&format!(",{}", (case + q) % 5));
        }
        data.push('\n');
    }
    data
}

fn bench_question_order(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let ids = generate_question_ids(1_000, &mut rng);

    let mut group = c.benchmark_group("question_order");
    group.throughput(Throughput::Elements(ids.len() as u64));
    group.bench_function("parse", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(question_order(id));
            }
        })
    });
    group.finish();
}

fn bench_sorted_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_keys");

    for count in [100, 1_000, 5_000].iter() {
        let mut rng = StdRng::seed_from_u64(11);
        let row: IndexMap<String, String> = generate_question_ids(*count, &mut rng)
            .into_iter()
            .map(|id| (id, String::new()))
            .collect();

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("questions", count), &row, |b, row| {
            b.iter(|| black_box(sorted_keys(row, 0)))
        });
    }

    group.finish();
}

fn bench_rename(c: &mut Criterion) {
    let mut group = c.benchmark_group("rename");

    for cases in [100, 1_000].iter() {
        let first = generate_coder_csv(*cases, 50, "alice");
        let second = generate_coder_csv(*cases, 50, "bob");

        group.bench_with_input(BenchmarkId::new("cases", cases), cases, |b, _| {
            b.iter_with_setup(
                || {
                    let mut session = Session::new().with_project(
                        ProjectMeta::new()
                            .with_case_id_key("Case")
                            .with_coder_id_key("Coder"),
                    );
                    session.import_coder_data(&first).unwrap();
                    session.import_coder_data(&second).unwrap();
                    session
                },
                |mut session| black_box(session.add_mapping("Q25 Question 25", "Q25_1 Question")),
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_question_order, bench_sorted_keys, bench_rename);
criterion_main!(benches);
