//! Export/import through the public API.

use hyperlsh::{IndexParams, IndexSnapshot, LshError, LshIndex, RngSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Document {
    title: String,
    tags: Vec<String>,
}

fn document(i: usize) -> Document {
    Document {
        title: format!("doc-{i}"),
        tags: vec![format!("group-{}", i % 3)],
    }
}

fn populated_index(count: usize) -> LshIndex<Document> {
    let params = IndexParams::new(24).with_tables(6).with_projections(10);
    let mut index = LshIndex::with_params(params, &mut RngSource::seeded(21)).unwrap();
    let mut rng = StdRng::seed_from_u64(22);
    for i in 0..count {
        let vector = (0..24).map(|_| rng.random_range(-1.0..1.0)).collect();
        index.add(vector, document(i)).unwrap();
    }
    index
}

#[test]
fn test_imported_index_answers_identically() {
    let original = populated_index(300);
    let restored = LshIndex::<Document>::import(&original.export().unwrap()).unwrap();

    assert_eq!(restored.size(), original.size());
    assert_eq!(restored.params(), original.params());
    assert_eq!(restored.stats(), original.stats());

    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..50 {
        let query: Vec<f32> = (0..24).map(|_| rng.random_range(-1.0..1.0)).collect();
        let expected = original.search_with_stats(&query, 5).unwrap();
        let actual = restored.search_with_stats(&query, 5).unwrap();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_import_bytes_matches_import() {
    let original = populated_index(20);
    let bytes = original.export_bytes().unwrap();
    let restored = LshIndex::<Document>::import_bytes(&bytes).unwrap();
    assert_eq!(restored.export().unwrap(), original.export().unwrap());
}

#[test]
fn test_restored_index_accepts_new_items() {
    let original = populated_index(10);
    let mut restored = LshIndex::<Document>::import(&original.export().unwrap()).unwrap();

    let id = restored.add(vec![0.25; 24], document(99)).unwrap();
    assert_eq!(id.get(), 10);
    let hits = restored.search(&[0.25; 24], 1).unwrap();
    assert_eq!(hits[0].metadata, &document(99));
}

#[test]
fn test_truncated_blob_is_parse_error() {
    let json = populated_index(5).export().unwrap();
    let truncated = &json[..json.len() / 2];
    let err = LshIndex::<Document>::import(truncated).unwrap_err();
    assert!(matches!(err, LshError::ParseError { .. }));
}

#[test]
fn test_inconsistent_projection_is_corrupt() {
    let json = populated_index(5).export().unwrap();
    let mut snapshot: IndexSnapshot<Document> = serde_json::from_str(&json).unwrap();
    snapshot.projections[2][4].pop();

    let tampered = serde_json::to_string(&snapshot).unwrap();
    let err = LshIndex::<Document>::import(&tampered).unwrap_err();
    assert!(matches!(err, LshError::CorruptIndex { .. }));
    assert_eq!(err.status_code(), "CORRUPT_INDEX");
}

#[test]
fn test_declared_dimension_mismatch_is_corrupt() {
    let json = populated_index(5).export().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["dimension"] = serde_json::json!(25);

    let err = LshIndex::<Document>::import(&value.to_string()).unwrap_err();
    assert!(matches!(err, LshError::CorruptIndex { .. }));
}
