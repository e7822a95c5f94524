// Precomputation benchmarks over synthetic evaluation sheets
use budgetsim::{HierarchyNode, Precomputer, Project, SimilarityConfig, SimilarityScorer, TinySegmenter, YearlyFinancial};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

const PHRASES: [&str; 8] = [
    "市道の舗装補修を実施する",
    "橋梁の点検と補修を行う",
    "観光客誘致のためのプロモーション活動",
    "高齢者の見守り支援を行う",
    "子育て世帯への相談窓口を運営する",
    "漁港施設の維持管理を行う",
    "防災訓練と避難所の整備を進める",
    "図書館の蔵書を充実させる",
];

fn generate_project(id: usize) -> Project {
    Project {
        id: format!("P{id:04}"),
        name: format!("事業{id}"),
        policy: HierarchyNode::new(format!("POL{}", id % 6), ""),
        measure: HierarchyNode::new(format!("MES{}", id % 20), ""),
        basic_project: HierarchyNode::new(format!("BP{}", id % 60), ""),
        department: format!("部{}", id % 9),
        category: ["一般", "政策事業", "施設管理", "補助金等"][id % 4].to_string(),
        overview: PHRASES[id % PHRASES.len()].to_string(),
        target: PHRASES[(id * 3 + 1) % PHRASES.len()].to_string(),
        intent: PHRASES[(id * 5 + 2) % PHRASES.len()].to_string(),
        financials: vec![YearlyFinancial {
            grand_total: ((id * 7919) % 500_000) as f64,
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("precompute");
    group.sample_size(10);

    for size in [100, 400].iter() {
        let corpus: Vec<Project> = (0..*size).map(generate_project).collect();

        group.bench_with_input(BenchmarkId::new("sequential", size), &corpus, |b, corpus| {
            let pre = Precomputer::new(SimilarityConfig {
                parallel: false,
                ..Default::default()
            });
            b.iter(|| black_box(pre.run(corpus)));
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &corpus, |b, corpus| {
            let pre = Precomputer::new(SimilarityConfig::default());
            b.iter(|| black_box(pre.run(corpus)));
        });
    }

    group.finish();
}

fn benchmark_top_similar(c: &mut Criterion) {
    let corpus: Vec<Project> = (0..1000).map(generate_project).collect();
    let scorer = SimilarityScorer::for_corpus(&corpus, Arc::new(TinySegmenter), &SimilarityConfig::default());

    c.bench_function("top_similar_1000", |b| {
        b.iter(|| black_box(scorer.top_similar(&corpus[0], &corpus, 5)));
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_top_similar);
criterion_main!(benches);
