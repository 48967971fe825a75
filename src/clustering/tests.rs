use std::collections::HashSet;

use crate::clustering::{assemble, partition, partition_in_order, ClusterEngine, EngineConfig};
use crate::document::{Document, Metadata};
use crate::error::SiftError;
use crate::vector::{SimilarityMatrix, TfIdfVectorizer};

fn doc(id: &str, text: &str) -> Document {
    Document::with_id(id, text, Metadata::default())
}

fn engine(threshold: f64) -> ClusterEngine {
    ClusterEngine::new(EngineConfig::new().with_threshold(threshold)).unwrap()
}

/// Pads a sentence past the admission length by repetition.
fn article(sentence: &str) -> String {
    let mut text = String::new();
    while text.chars().count() < 300 {
        text.push_str(sentence);
        text.push(' ');
    }
    text
}

fn newsroom() -> Vec<Document> {
    vec![
        doc("rates-1", "Central bank raises interest rates to curb inflation"),
        doc("storm-1", "Hurricane makes landfall, coastal towns evacuated"),
        doc("rates-2", "Inflation fears push central bank to raise interest rates"),
        doc("cup-1", "Underdogs win the cup final after penalty shootout"),
        doc("storm-2", "Coastal towns evacuated as hurricane nears landfall"),
        doc("rates-3", "Mortgage costs climb after interest rates rise"),
        doc("cup-2", "Penalty shootout decides cup final as underdogs celebrate"),
        doc("lone", "Museum unveils restored medieval tapestry collection"),
    ]
}

fn assert_total_partition(documents: &[Document], clustering: &crate::clustering::Clustering) {
    let mut seen = HashSet::new();
    for cluster in clustering {
        for id in cluster.member_ids() {
            assert!(seen.insert(id.to_string()), "{} appears twice", id);
        }
    }
    let expected: HashSet<String> = documents.iter().map(|d| d.id().to_string()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_identical_documents_share_a_cluster() {
    let text = "Parliament approves new climate legislation after lengthy debate";
    let clustering = engine(0.5)
        .cluster(vec![doc("a", text), doc("b", text)])
        .unwrap();

    assert_eq!(clustering.len(), 1);
    assert_eq!(clustering.clusters()[0].len(), 2);
}

#[test]
fn test_disjoint_vocabularies_stay_apart() {
    let clustering = engine(0.5)
        .cluster(vec![
            doc("a", "volcano eruption ash cloud flights grounded"),
            doc("b", "orchestra premieres symphony concert hall"),
        ])
        .unwrap();

    assert_eq!(clustering.len(), 2);
    assert!(clustering.iter().all(|c| c.is_singleton()));
}

#[test]
fn test_transitive_grouping_through_shared_neighbour() {
    let documents = vec![doc("A", "a"), doc("B", "b"), doc("C", "c")];
    let ids: Vec<String> = documents.iter().map(|d| d.id().to_string()).collect();
    // (A,B), (A,C), (B,C)
    let matrix = SimilarityMatrix::from_upper_triangle(3, vec![0.6, 0.1, 0.6]).unwrap();

    let mut forest = partition(&ids, &matrix, 0.5).unwrap();
    let clustering = assemble(&mut forest, documents).unwrap();

    assert_eq!(clustering.len(), 1);
    let members: Vec<&str> = clustering.clusters()[0].member_ids().collect();
    assert_eq!(members, vec!["A", "B", "C"]);
}

#[test]
fn test_empty_batch_is_empty_corpus() {
    assert!(matches!(
        engine(0.5).cluster(Vec::new()),
        Err(SiftError::EmptyCorpus(_))
    ));
}

#[test]
fn test_stop_word_batch_is_empty_corpus() {
    let result = engine(0.5).cluster(vec![doc("a", "the and of"), doc("b", "it was them")]);
    assert!(matches!(result, Err(SiftError::EmptyCorpus(_))));
}

#[test]
fn test_short_document_never_clustered() {
    let story = article("Wildfire crews contain the blaze north of the city overnight.");
    let documents = vec![
        doc("long-1", &story),
        doc("short", "Wildfire crews contain the blaze."),
        doc("long-2", &story),
    ];

    let (clustering, report) = engine(0.5).admit_and_cluster(documents).unwrap();
    assert_eq!(report.too_short, 1);
    assert!(clustering.cluster_of("short").is_none());
    assert!(clustering.iter().all(|c| !c.contains("short")));
    assert_eq!(clustering.document_count(), 2);
}

#[test]
fn test_advertisement_document_never_clustered() {
    let story = article("Election officials certify the final vote count in the state.");
    let advert = format!("{} Ad {}", story, story);
    let documents = vec![doc("story", &story), doc("advert", &advert)];

    let (clustering, report) = engine(0.5).admit_and_cluster(documents).unwrap();
    assert_eq!(report.advertisement, 1);
    assert!(clustering.cluster_of("advert").is_none());
    assert_eq!(clustering.len(), 1);
}

#[test]
fn test_everything_rejected_is_empty_corpus() {
    let result = engine(0.5).admit_and_cluster(vec![doc("a", "short"), doc("b", "tiny")]);
    assert!(matches!(result, Err(SiftError::EmptyCorpus(_))));
}

#[test]
fn test_single_document_is_singleton() {
    let clustering = engine(0.5)
        .cluster(vec![doc("only", "Space agency launches lunar probe")])
        .unwrap();
    assert_eq!(clustering.len(), 1);
    assert_eq!(clustering.clusters()[0].representative, "only");
}

#[test]
fn test_duplicate_ids_rejected() {
    let result = engine(0.5).cluster(vec![
        doc("same", "first story about trains"),
        doc("same", "second story about planes"),
    ]);
    assert!(matches!(result, Err(SiftError::InvariantViolation(_))));
}

#[test]
fn test_invalid_threshold_rejected_before_clustering() {
    let result = ClusterEngine::new(EngineConfig::new().with_threshold(1.5));
    assert!(matches!(result, Err(SiftError::Config(_))));
}

#[test]
fn test_newsroom_topics() {
    let documents = newsroom();
    let clustering = engine(0.3).cluster(documents.clone()).unwrap();
    assert_total_partition(&documents, &clustering);

    let storm = clustering.cluster_of("storm-1").unwrap();
    assert!(storm.contains("storm-2"));
    assert!(!storm.contains("rates-1"));

    let cup = clustering.cluster_of("cup-1").unwrap();
    assert!(cup.contains("cup-2"));

    assert!(clustering.cluster_of("rates-1").unwrap().contains("rates-2"));
    assert!(clustering.cluster_of("lone").unwrap().is_singleton());
}

#[test]
fn test_partition_totality_across_thresholds() {
    let documents = newsroom();
    for threshold in [0.0, 0.1, 0.25, 0.5, 0.75, 1.0] {
        let clustering = engine(threshold).cluster(documents.clone()).unwrap();
        assert_total_partition(&documents, &clustering);
    }
}

#[test]
fn test_threshold_monotonicity() {
    let documents = newsroom();
    let thresholds = [1.0, 0.8, 0.6, 0.4, 0.2, 0.1, 0.0];

    let runs: Vec<_> = thresholds
        .iter()
        .map(|&t| engine(t).cluster(documents.clone()).unwrap())
        .collect();

    for pair in runs.windows(2) {
        let (stricter, looser) = (&pair[0], &pair[1]);
        assert!(looser.len() <= stricter.len());

        // Every stricter cluster sits wholly inside one looser cluster
        for cluster in stricter {
            let first = cluster.members[0].id();
            let container = looser.cluster_of(first).unwrap();
            assert!(cluster.member_ids().all(|id| container.contains(id)));
        }
    }

    // Threshold zero merges everything
    assert_eq!(runs.last().unwrap().len(), 1);
}

#[test]
fn test_find_is_idempotent_after_unions() {
    let documents = newsroom();
    let texts: Vec<&str> = documents.iter().map(Document::text).collect();
    let (_, vectors) = TfIdfVectorizer::fit_transform(&texts).unwrap();
    let matrix = SimilarityMatrix::build(&vectors);
    let ids: Vec<String> = documents.iter().map(|d| d.id().to_string()).collect();

    let mut forest = partition(&ids, &matrix, 0.3).unwrap();
    for id in &ids {
        let root = forest.find(id).unwrap();
        assert_eq!(forest.find(&root).unwrap(), root);
    }
}

#[test]
fn test_pair_order_does_not_change_partition() {
    let documents = newsroom();
    let texts: Vec<&str> = documents.iter().map(Document::text).collect();
    let (_, vectors) = TfIdfVectorizer::fit_transform(&texts).unwrap();
    let matrix = SimilarityMatrix::build(&vectors);
    let ids: Vec<String> = documents.iter().map(|d| d.id().to_string()).collect();

    let forward: Vec<(usize, usize)> = matrix.pairs().map(|(i, j, _)| (i, j)).collect();
    let backward: Vec<(usize, usize)> = forward.iter().rev().map(|&(i, j)| (j, i)).collect();
    let mut by_column = forward.clone();
    by_column.sort_by_key(|&(i, j)| (j, i));

    let mut partitions = Vec::new();
    for order in [forward, backward, by_column] {
        let mut forest = partition_in_order(&ids, &matrix, 0.3, order).unwrap();
        let clustering = assemble(&mut forest, documents.clone()).unwrap();
        partitions.push(clustering.partition());
    }

    assert_eq!(partitions[0], partitions[1]);
    assert_eq!(partitions[0], partitions[2]);
}

#[test]
fn test_independent_batches_on_threads() {
    let engine = engine(0.3);
    let batch = newsroom();
    let expected = engine.cluster(batch.clone()).unwrap().partition();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let batch = batch.clone();
                let engine = &engine;
                scope.spawn(move || engine.cluster(batch).unwrap().partition())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_clustering_serializes_members_in_order() {
    let text = "Scientists map the deepest ocean trench with new sonar";
    let clustering = engine(0.5)
        .cluster(vec![doc("x", text), doc("y", text)])
        .unwrap();

    let json = serde_json::to_value(&clustering).unwrap();
    let members = &json["clusters"][0]["members"];
    assert_eq!(members[0]["id"], "x");
    assert_eq!(members[1]["id"], "y");
    assert_eq!(json["clusters"][0]["representative"], "x");
}
