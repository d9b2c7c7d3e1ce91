//! Closed-form collision probabilities for choosing L and K.
//!
//! For random hyperplanes, two vectors separated by angle `θ` agree on a
//! single bit with probability `p = 1 - θ/π`. They share a whole table's
//! bucket with probability `p^K` and at least one bucket across L tables
//! with probability `1 - (1 - p^K)^L`.

use std::f64::consts::PI;

/// Angle in radians between two vectors; `π/2` if either is zero.
pub fn angle_between(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vectors must have same dimension");

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return PI / 2.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0).acos()
}

/// Probability that one hyperplane bit agrees for vectors at angle `theta`.
pub fn bit_collision_probability(theta: f64) -> f64 {
    (1.0 - theta / PI).clamp(0.0, 1.0)
}

/// Probability that two vectors at angle `theta` share a bucket in one table.
pub fn table_collision_probability(theta: f64, num_projections: usize) -> f64 {
    bit_collision_probability(theta).powi(num_projections as i32)
}

/// Probability that two vectors at angle `theta` share a bucket in at least one of `num_tables` tables.
pub fn candidate_probability(theta: f64, num_projections: usize, num_tables: usize) -> f64 {
    let miss = 1.0 - table_collision_probability(theta, num_projections);
    1.0 - miss.powi(num_tables as i32)
}
