// Integration tests for budgetsim
use budgetsim::scoring::{attribute_similarity, financial_similarity, hierarchy_similarity};
use budgetsim::{
    Error, Evaluation, HierarchyNode, IndexFile, Precomputer, Project, ProjectRepository, ProjectStore,
    SimilarityConfig, SimilarityIndex, SimilarityIndexReader, SimilarityScorer, SimilarityWeights,
    TinySegmenter, WeightError, YearlyFinancial,
};
use std::sync::Arc;

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    (policy, measure, basic): (&str, &str, &str),
    department: &str,
    category: &str,
    texts: [&str; 3],
    grand_total: f64,
    future_direction: &str,
) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        year: 2024,
        policy: HierarchyNode::new(policy, format!("{policy}名")),
        measure: HierarchyNode::new(measure, format!("{measure}名")),
        basic_project: HierarchyNode::new(basic, format!("{basic}名")),
        department: department.to_string(),
        category: category.to_string(),
        overview: texts[0].to_string(),
        target: texts[1].to_string(),
        intent: texts[2].to_string(),
        financials: vec![YearlyFinancial {
            year: 2024,
            total_cost: grand_total * 0.9,
            grand_total,
            ..Default::default()
        }],
        evaluation: Evaluation {
            direction: future_direction.to_string(),
            future_direction: future_direction.to_string(),
            comments: vec![],
        },
        ..Default::default()
    }
}

fn road() -> Project {
    project(
        "P001",
        "道路維持管理事業",
        ("POL1", "MES1", "BP1"),
        "建設部",
        "一般",
        ["市道の舗装補修や除草作業を実施する", "市内全域の市道", "安全な道路環境を維持する"],
        55_000.0,
        "現状維持",
    )
}

fn bridge() -> Project {
    project(
        "P002",
        "橋梁維持管理事業",
        ("POL1", "MES1", "BP2"),
        "建設部",
        "一般",
        ["橋梁の点検と補修を実施する", "市内の全橋梁", "安全な橋梁環境を維持する"],
        50_000.0,
        "現状維持",
    )
}

fn tourism() -> Project {
    project(
        "P003",
        "観光振興事業",
        ("POL2", "MES2", "BP3"),
        "商工観光部",
        "政策事業",
        ["観光客誘致のためのプロモーション活動", "国内外の観光客", "観光客数を増加させる"],
        12_000.0,
        "拡大",
    )
}

fn corpus() -> Vec<Project> {
    vec![road(), bridge(), tourism()]
}

fn scorer(corpus: &[Project]) -> SimilarityScorer {
    SimilarityScorer::for_corpus(corpus, Arc::new(TinySegmenter), &SimilarityConfig::default())
}

#[test]
fn test_road_bridge_tourism_scenario() {
    let corpus = corpus();
    let (road, bridge, tourism) = (&corpus[0], &corpus[1], &corpus[2]);

    assert_eq!(hierarchy_similarity(road, bridge), 0.7);
    assert_eq!(hierarchy_similarity(road, tourism), 0.0);
    assert!(financial_similarity(road, bridge, 23.0) > 0.8);
    assert!((attribute_similarity(road, bridge) - 1.0).abs() < 1e-12);
    assert_eq!(attribute_similarity(road, tourism), 0.0);

    let ranked = scorer(&corpus).top_similar(road, &corpus, 2);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].target_id, "P002");
    assert_eq!(ranked[1].target_id, "P003");
    assert!(ranked[0].score >= ranked[1].score);
}

#[test]
fn test_self_similarity_near_max() {
    let corpus = corpus();
    let scorer = scorer(&corpus);
    for p in &corpus {
        let axes = scorer.axis_scores(p, p);
        assert_eq!(axes.hierarchy, 1.0);
        assert_eq!(axes.financial, 1.0);
        assert!((axes.attribute - 1.0).abs() < 1e-12);
        assert!(scorer.score(p, p) > 0.95, "self score of {} too low", p.id);
    }
}

#[test]
fn test_pairwise_scores_bounded() {
    let corpus = corpus();
    let scorer = scorer(&corpus);
    for a in &corpus {
        for b in &corpus {
            let axes = scorer.axis_scores(a, b);
            for value in [axes.hierarchy, axes.text, axes.financial, axes.attribute, scorer.score(a, b)] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}

#[test]
fn test_attribute_department_and_category_only() {
    let a = road();
    let mut b = bridge();
    b.evaluation.future_direction = "拡大".into();
    assert!((attribute_similarity(&a, &b) - 0.7).abs() < 1e-12);
}

#[test]
fn test_missing_financials_degrade_to_zero() {
    let a = road();
    let mut b = bridge();
    b.financials.clear();
    assert_eq!(financial_similarity(&a, &b, 23.0), 0.0);

    let corpus = vec![a, b];
    let score = scorer(&corpus).score(&corpus[0], &corpus[1]);
    assert!((0.0..=1.0).contains(&score));
}

#[test]
fn test_top_similar_caps_at_corpus_size() {
    let corpus = vec![road(), bridge()];
    let ranked = scorer(&corpus).top_similar(&corpus[0], &corpus, 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].target_id, "P002");
}

#[test]
fn test_invalid_custom_weights_rejected() {
    assert!(matches!(
        SimilarityWeights::new(0.5, 0.5, 0.5, -0.5),
        Err(WeightError::Negative(_))
    ));
    assert!(matches!(
        SimilarityWeights::new(0.1, 0.1, 0.1, 0.1),
        Err(WeightError::BadSum(_))
    ));
}

#[test]
fn test_pipeline_to_reader_roundtrip() {
    let corpus = corpus();
    let index = Precomputer::new(SimilarityConfig::default()).run(&corpus);
    assert_eq!(index.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let file = IndexFile::new(dir.path().join("similarities.json"));
    file.save(&index).unwrap();
    let reloaded = file.load().unwrap();

    for p in &corpus {
        assert_eq!(reloaded.get(&p.id), index.get(&p.id));
    }
    assert_eq!(reloaded, index);

    // second generation of the file is byte-identical
    let first = std::fs::read_to_string(file.path()).unwrap();
    file.save(&reloaded).unwrap();
    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), first);

    let reader = SimilarityIndexReader::new(ProjectStore::new(corpus), reloaded).unwrap();
    let similar = reader.get_similar("P001", 5).unwrap();
    assert_eq!(similar.len(), 2);
    assert_eq!(similar[0].id, "P002");
    assert_eq!(similar[0].name, "橋梁維持管理事業");
    assert_eq!(similar[0].department, "建設部");
    assert_eq!(similar[0].total_cost, 50_000.0);
}

#[test]
fn test_reader_detects_corpus_drift() {
    let corpus = corpus();
    let index = Precomputer::new(SimilarityConfig::default()).run(&corpus);

    // bridge removed from the live corpus after precomputation
    let shrunk = ProjectStore::new(vec![road(), tourism()]);
    assert!(matches!(
        SimilarityIndexReader::new(&shrunk, index.clone()),
        Err(Error::StaleIndex { .. })
    ));

    // a new project added after precomputation is readable but not indexed
    let mut grown = corpus.clone();
    let mut extra = road();
    extra.id = "P004".into();
    grown.push(extra);
    let store = ProjectStore::new(grown);
    assert_eq!(store.len(), 4);

    let reader = SimilarityIndexReader::new(store, index).unwrap();
    assert!(matches!(reader.get_similar("P004", 5), Err(Error::NotIndexed(_))));
}

#[test]
fn test_empty_corpus_produces_empty_index() {
    let index = Precomputer::default().run(&[]);
    assert!(index.is_empty());

    let json = index.to_json_pretty().unwrap();
    let reloaded = SimilarityIndex::from_json(&json).unwrap();
    assert!(reloaded.is_empty());
}
