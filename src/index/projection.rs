//! Random hyperplane generation for the LSH family.
//!
//! Each hash bit is defined by a random unit vector. Components are drawn
//! from a standard normal distribution, which makes the direction uniform on
//! the unit sphere, and then the vector is scaled to length one.
//!
//! Tables are generated one after another from the same source, so two
//! indexes built from identically seeded sources share their leading tables.

use std::f64::consts::PI;

use crate::index::random::RandomSource;

/// Draws one standard normal sample using the Box-Muller transform.
pub fn gaussian(source: &mut dyn RandomSource) -> f64 {
    // 1 - u maps [0, 1) onto (0, 1] so the logarithm stays finite.
    let u1 = 1.0 - source.next_uniform();
    let u2 = source.next_uniform();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Generates one unit-length projection of the given dimension.
pub fn random_unit_vector(dimension: usize, source: &mut dyn RandomSource) -> Vec<f32> {
    let raw: Vec<f64> = (0..dimension).map(|_| gaussian(source)).collect();
    let norm = raw.iter().map(|x| x * x).sum::<f64>().sqrt();
    raw.iter().map(|x| (x / norm) as f32).collect()
}

/// Generates the projections for every table, shaped `[num_tables][num_projections][dimension]`.
pub fn generate_projections(
    dimension: usize,
    num_tables: usize,
    num_projections: usize,
    source: &mut dyn RandomSource,
) -> Vec<Vec<Vec<f32>>> {
    (0..num_tables)
        .map(|_| {
            (0..num_projections)
                .map(|_| random_unit_vector(dimension, source))
                .collect()
        })
        .collect()
}
