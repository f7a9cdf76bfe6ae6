use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::{MAX_ITERATIONS, N_INIT, RANDOM_SEED, TOLERANCE};
use crate::scoring::ClusteringError;

/// Result of a k-means fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster index of each sample, in input order.
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    /// Sum of squared distances from each sample to its centroid.
    pub inertia: f64,
    /// Lloyd iterations run by the winning restart.
    pub iterations: usize
}

/// Lloyd's k-means with greedy k-means++ seeding and multiple restarts.
///
/// Every restart draws from one `StdRng` seeded with `seed`, so a fit is fully
/// reproducible for the same input order.
#[derive(Debug, Clone)]
pub struct KMeans {
    n_clusters: usize,
    n_init: usize,
    max_iterations: usize,
    tolerance: f64,
    seed: u64
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            n_init: N_INIT,
            max_iterations: MAX_ITERATIONS,
            tolerance: TOLERANCE,
            seed: RANDOM_SEED
        }
    }

    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Partitions `data` into `n_clusters` groups, keeping the restart with
    /// the lowest inertia (the earliest one on ties).
    ///
    /// # Errors
    /// Returns `ClusteringError` for empty input, zero clusters, more clusters
    /// than samples, or rows of differing width.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<Clustering, ClusteringError> {
        self.validate(data)?;

        let threshold = self.tolerance * mean_variance(data);
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut best = self.run_once(data, threshold, &mut rng);

        for restart in 1..self.n_init {
            let candidate = self.run_once(data, threshold, &mut rng);

            debug!("k-means restart [{restart}] inertia [{}] after [{}] iterations", candidate.inertia, candidate.iterations);

            if candidate.inertia < best.inertia {
                best = candidate;
            }
        }

        Ok(best)
    }

    fn validate(&self, data: &[Vec<f64>]) -> Result<(), ClusteringError> {
        if data.is_empty() {
            return Err(ClusteringError::NoSamples);
        }

        if self.n_clusters == 0 {
            return Err(ClusteringError::NoClusters);
        }

        if self.n_clusters > data.len() {
            return Err(ClusteringError::TooManyClusters { clusters: self.n_clusters, samples: data.len() });
        }

        let expected = data[0].len();

        if let Some((index, row)) = data.iter().enumerate().find(|(_, row)| row.len() != expected) {
            return Err(ClusteringError::RaggedRows { index, expected, found: row.len() });
        }

        Ok(())
    }

    fn run_once(&self, data: &[Vec<f64>], threshold: f64, rng: &mut StdRng) -> Clustering {
        let mut centroids = self.initial_centroids(data, rng);
        let mut previous_labels: Option<Vec<usize>> = None;
        let mut iterations = 0;

        for iteration in 1..=self.max_iterations {
            iterations = iteration;

            let (labels, _) = assign(data, &centroids);

            if previous_labels.as_ref() == Some(&labels) {
                break;
            }

            let updated = update_centroids(data, &labels, &centroids);
            let shift: f64 = centroids.iter().zip(&updated).map(|(old, new)| squared_distance(old, new)).sum();

            centroids = updated;
            previous_labels = Some(labels);

            if shift <= threshold {
                break;
            }
        }

        let (labels, inertia) = assign(data, &centroids);

        Clustering {
            labels,
            centroids,
            inertia,
            iterations
        }
    }

    /// Greedy k-means++: each new centroid is the best of several candidates
    /// sampled proportionally to squared distance from the existing centroids.
    fn initial_centroids(&self, data: &[Vec<f64>], rng: &mut StdRng) -> Vec<Vec<f64>> {
        let trials = 2 + (self.n_clusters as f64).ln().floor() as usize;
        let first = rng.gen_range(0..data.len());

        let mut centroids = vec![data[first].clone()];
        let mut closest: Vec<f64> = data.iter().map(|point| squared_distance(point, &centroids[0])).collect();
        let mut potential: f64 = closest.iter().sum();

        while centroids.len() < self.n_clusters {
            let mut best: Option<(usize, f64, Vec<f64>)> = None;

            for _ in 0..trials {
                let candidate = if potential > 0.0 {
                    sample_weighted(&closest, potential, rng)
                } else {
                    rng.gen_range(0..data.len())
                };

                let distances: Vec<f64> = data.iter()
                    .zip(&closest)
                    .map(|(point, current)| squared_distance(point, &data[candidate]).min(*current))
                    .collect();

                let candidate_potential: f64 = distances.iter().sum();

                if best.as_ref().is_none_or(|(_, best_potential, _)| candidate_potential < *best_potential) {
                    best = Some((candidate, candidate_potential, distances));
                }
            }

            let Some((index, candidate_potential, distances)) = best else {
                break;
            };

            centroids.push(data[index].clone());
            closest = distances;
            potential = candidate_potential;
        }

        centroids
    }
}

fn sample_weighted(weights: &[f64], total: f64, rng: &mut StdRng) -> usize {
    let target = rng.r#gen::<f64>() * total;
    let mut cumulative = 0.0;

    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;

        if cumulative > target {
            return index;
        }
    }

    // Rounding can leave the target just past the final sum.
    weights.iter().rposition(|weight| *weight > 0.0).unwrap_or(weights.len() - 1)
}

/// Labels every sample with its nearest centroid and returns the inertia.
fn assign(data: &[Vec<f64>], centroids: &[Vec<f64>]) -> (Vec<usize>, f64) {
    let mut inertia = 0.0;

    let labels = data.iter()
        .map(|point| {
            let (label, distance) = nearest(point, centroids);
            inertia += distance;
            label
        })
        .collect();

    (labels, inertia)
}

fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    centroids.iter()
        .map(|centroid| squared_distance(point, centroid))
        .enumerate()
        .fold((0, f64::INFINITY), |best, (index, distance)| {
            if distance < best.1 { (index, distance) } else { best }
        })
}

/// Moves each centroid to the mean of its members. A cluster left empty is
/// reseeded on the sample farthest from its current centroid.
fn update_centroids(data: &[Vec<f64>], labels: &[usize], centroids: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let dimensions = data[0].len();
    let mut sums = vec![vec![0.0; dimensions]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (point, label) in data.iter().zip(labels) {
        counts[*label] += 1;

        for (sum, value) in sums[*label].iter_mut().zip(point) {
            *sum += value;
        }
    }

    let mut updated: Vec<Vec<f64>> = sums.into_iter()
        .zip(&counts)
        .map(|(sum, count)| sum.into_iter().map(|value| value / (*count).max(1) as f64).collect())
        .collect();

    let empty: Vec<usize> = (0..centroids.len()).filter(|cluster| counts[*cluster] == 0).collect();

    if !empty.is_empty() {
        let mut farthest: Vec<(usize, f64)> = data.iter()
            .zip(labels)
            .map(|(point, label)| squared_distance(point, &centroids[*label]))
            .enumerate()
            .collect();

        farthest.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        for (cluster, (index, _)) in empty.into_iter().zip(farthest) {
            updated[cluster] = data[index].clone();
        }
    }

    updated
}

fn mean_variance(data: &[Vec<f64>]) -> f64 {
    let dimensions = data[0].len();

    if dimensions == 0 {
        return 0.0;
    }

    let samples = data.len() as f64;

    let total: f64 = (0..dimensions)
        .map(|column| {
            let mean = data.iter().map(|row| row[column]).sum::<f64>() / samples;
            data.iter().map(|row| (row[column] - mean).powi(2)).sum::<f64>() / samples
        })
        .sum();

    total / dimensions as f64
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}
