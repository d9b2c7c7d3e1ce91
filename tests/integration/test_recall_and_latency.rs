//! Recall against brute force and query cost as the index grows.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use hyperlsh::index::euclidean_distance;
use hyperlsh::{IndexParams, LshIndex, RngSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn unit_vectors(count: usize, dimension: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    (0..count)
        .map(|_| {
            let v: Vec<f32> = (0..dimension).map(|_| rng.random_range(-1.0..1.0)).collect();
            let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            v.into_iter().map(|x| x / norm).collect()
        })
        .collect()
}

/// Vectors scattered tightly around a few centers so near neighbors exist.
fn clustered_vectors(count: usize, dimension: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    let centers = unit_vectors(20, dimension, rng);
    (0..count)
        .map(|i| {
            centers[i % centers.len()]
                .iter()
                .map(|c| c + rng.random_range(-0.15..0.15))
                .collect()
        })
        .collect()
}

fn brute_force_top_k(data: &[Vec<f32>], query: &[f32], k: usize) -> HashSet<usize> {
    let mut scored: Vec<(usize, f32)> = data
        .iter()
        .enumerate()
        .map(|(i, v)| (i, euclidean_distance(query, v)))
        .collect();
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.into_iter().take(k).map(|(i, _)| i).collect()
}

fn recall(index: &LshIndex<usize>, data: &[Vec<f32>], queries: &[Vec<f32>], k: usize) -> f64 {
    let mut found = 0;
    for query in queries {
        let truth = brute_force_top_k(data, query, k);
        found += index
            .search(query, k)
            .unwrap()
            .iter()
            .filter(|hit| truth.contains(hit.metadata))
            .count();
    }
    found as f64 / (queries.len() * k) as f64
}

fn build(data: &[Vec<f32>], tables: usize, seed: u64) -> LshIndex<usize> {
    let params = IndexParams::new(data[0].len())
        .with_tables(tables)
        .with_projections(10);
    let mut index = LshIndex::with_params(params, &mut RngSource::seeded(seed)).unwrap();
    for (i, vector) in data.iter().enumerate() {
        index.add(vector.clone(), i).unwrap();
    }
    index
}

#[test]
fn test_recall_does_not_decrease_with_more_tables() {
    let mut rng = StdRng::seed_from_u64(31);
    let data = clustered_vectors(2_000, 32, &mut rng);
    let queries = clustered_vectors(50, 32, &mut rng);

    for trial in 0..3u64 {
        // Same seed: the smaller index's tables are a prefix of the larger one's.
        let seed = 100 + trial;
        let recalls: Vec<f64> = [1, 4, 16]
            .into_iter()
            .map(|tables| recall(&build(&data, tables, seed), &data, &queries, 10))
            .collect();

        println!("trial {trial}: recall by L = {recalls:?}");
        assert!(recalls.windows(2).all(|w| w[0] <= w[1]), "{recalls:?}");
    }
}

#[test]
fn test_more_tables_examine_more_candidates() {
    let mut rng = StdRng::seed_from_u64(32);
    let data = clustered_vectors(1_000, 16, &mut rng);
    let query = &clustered_vectors(1, 16, &mut rng)[0];

    let few_index = build(&data, 2, 7);
    let many_index = build(&data, 12, 7);
    let few = few_index.search_with_stats(query, 5).unwrap();
    let many = many_index.search_with_stats(query, 5).unwrap();
    assert!(many.candidates_examined >= few.candidates_examined);
    assert!(many.tables_hit >= few.tables_hit);
}

fn mean_query_time(index: &LshIndex<usize>, queries: &[Vec<f32>]) -> Duration {
    let start = Instant::now();
    for query in queries {
        std::hint::black_box(index.search(query, 5).unwrap());
    }
    start.elapsed() / queries.len() as u32
}

/// Per-query work in multiply-adds: hashing through every table plus one
/// distance per candidate.
fn mean_query_work(index: &LshIndex<usize>, queries: &[Vec<f32>]) -> f64 {
    let hashing = index.num_tables() * index.num_projections() * index.dimension();
    let ranking: usize = queries
        .iter()
        .map(|query| index.search_with_stats(query, 5).unwrap().candidates_examined)
        .sum::<usize>()
        * index.dimension();
    (hashing * queries.len() + ranking) as f64 / queries.len() as f64
}

#[test]
fn test_query_cost_stays_flat_as_index_grows() {
    let mut rng = StdRng::seed_from_u64(33);
    let data = unit_vectors(10_000, 128, &mut rng);
    let queries = unit_vectors(100, 128, &mut rng);

    // 16 hyperplanes per table keep buckets small for unrelated vectors.
    let params = IndexParams::new(128).with_projections(16);
    let mut index: LshIndex<usize> =
        LshIndex::with_params(params, &mut RngSource::seeded(34)).unwrap();
    for (i, vector) in data[..1_000].iter().enumerate() {
        index.add(vector.clone(), i).unwrap();
    }
    let small_work = mean_query_work(&index, &queries);
    let small_time = mean_query_time(&index, &queries);

    for (i, vector) in data.iter().enumerate().skip(1_000) {
        index.add(vector.clone(), i).unwrap();
    }
    let large_work = mean_query_work(&index, &queries);
    let large_time = mean_query_time(&index, &queries);

    let stats = index.stats();
    let hashing = (index.num_tables() * index.num_projections() * index.dimension()) as f64;
    let mean_candidates = (large_work - hashing) / index.dimension() as f64;
    println!(
        "mean query: {small_time:?} at 1k, {large_time:?} at 10k; \
         {mean_candidates:.1} candidates at 10k, max bucket {}",
        stats.max_bucket_size
    );

    // Ten times the items must not mean anywhere near ten times the work.
    let work_ratio = large_work / small_work;
    assert!(work_ratio < 3.0, "work ratio {work_ratio:.2} tracks index size");
    assert!(mean_candidates < stats.items as f64 / 100.0);
}
