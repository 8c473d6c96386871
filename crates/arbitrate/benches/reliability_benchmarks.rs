//! Reliability and export benchmarks.
//!
//! Measures agreement computation, merged export, and project save/load over
//! double-coded datasets of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use arbitrate::{ProjectMeta, Session};

const ANSWERS: [&str; 5] = ["Yes", "No", "Unclear", "", "Not applicable"];

/// Coder export where roughly one answer in eight is drawn at random instead
/// of from the shared pattern.
fn generate_coder_csv(cases: usize, questions: usize, coder: &str, rng: &mut StdRng) -> String {
    let mut data = String::from("Case,Coder");
    for q in 0..questions {
        data.push_str(&format!(",Q{}_{} Question text", q / 10 + 1, q % 10));
    }
    data.push('\n');

    for case in 0..cases {
        data.push_str(&format!("{},{}", case, coder));
        for q in 0..questions {
            let answer = if rng.gen_ratio(1, 8) {
                ANSWERS[rng.gen_range(0..ANSWERS.len())]
            } else {
                ANSWERS[(case + q) % ANSWERS.len()]
            };
            data.push(',');
            data.push_str(answer);
        }
        data.push('\n');
    }
    data
}

fn double_coded_session(cases: usize, questions: usize) -> Session {
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = Session::new().with_project(
        ProjectMeta::new()
            .with_name("Bench")
            .with_case_id_key("Case")
            .with_coder_id_key("Coder"),
    );
    session
        .import_coder_data(&generate_coder_csv(cases, questions, "alice", &mut rng))
        .unwrap();
    session
        .import_coder_data(&generate_coder_csv(cases, questions, "bob", &mut rng))
        .unwrap();
    session
}

fn bench_reliability(c: &mut Criterion) {
    let mut group = c.benchmark_group("reliability");

    for cases in [100, 1_000, 5_000].iter() {
        let session = double_coded_session(*cases, 40);

        group.throughput(Throughput::Elements(*cases as u64));
        group.bench_with_input(BenchmarkId::new("cases", cases), &session, |b, session| {
            b.iter(|| black_box(session.reliability().unwrap()))
        });
    }

    group.finish();
}

fn bench_auto_resolve_and_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_resolve_export");

    for cases in [100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::new("cases", cases), cases, |b, &cases| {
            b.iter_with_setup(
                || double_coded_session(cases, 40),
                |mut session| {
                    for id in 0..cases {
                        session.open_case(&id.to_string()).unwrap().auto_resolve().unwrap();
                    }
                    black_box(session.export_data(false))
                },
            )
        });
    }

    group.finish();
}

fn bench_save_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("save_load");

    for cases in [100, 1_000].iter() {
        let mut session = double_coded_session(*cases, 40);
        for id in 0..*cases {
            session.open_case(&id.to_string()).unwrap().auto_resolve().unwrap();
        }
        let text = session.save_document().unwrap();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("save", cases), cases, |b, _| {
            b.iter(|| black_box(session.save_document().unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("load", cases), &text, |b, text| {
            b.iter(|| {
                let mut restored = Session::new();
                restored.load_document(text).unwrap();
                black_box(restored)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_reliability,
    bench_auto_resolve_and_export,
    bench_save_load,
);
criterion_main!(benches);
