use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::color::{Color, Pixel};
use crate::error::ExtractError;
use crate::pipeline::extract::ChannelSums;

pub const DEFAULT_CLUSTERS: usize = 16;
pub const DEFAULT_MAX_ITERATIONS: usize = 32;
pub const DEFAULT_SEED: u64 = 0;

const UNASSIGNED: usize = usize::MAX;

/// How the clustering loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An iteration left every sample in the cluster it was already in.
    Converged,
    MaxIterationsReached,
}

/// Final cluster state.
///
/// `centroids` is indexed by cluster and keeps seeding order. `assignments`
/// is indexed by sample position and holds the cluster of each sample as of
/// the last assignment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMeansOutcome {
    pub centroids: Vec<Pixel>,
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub termination: Termination,
}

impl KMeansOutcome {
    /// Number of samples assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &cluster in &self.assignments {
            sizes[cluster] += 1;
        }
        sizes
    }

    pub fn colors(&self) -> Vec<Color> {
        self.centroids.iter().copied().map(Color::from_pixel).collect()
    }
}

/// Lloyd's k-means over RGB samples with squared Euclidean distance.
///
/// Initial centroids are `k` distinct samples picked by a PRNG seeded from
/// `seed`, so equal inputs always give equal outputs. Clusters that end an
/// iteration empty are re-seeded to the sample farthest from every occupied
/// centroid, which keeps the result at exactly `k` centroids.
pub fn kmeans(
    samples: &[Pixel],
    k: usize,
    max_iterations: usize,
    seed: u64,
) -> Result<KMeansOutcome, ExtractError> {
    if k == 0 {
        return Err(ExtractError::InvalidClusterCount);
    }
    if samples.len() < k {
        return Err(ExtractError::InsufficientSamples {
            samples: samples.len(),
            clusters: k,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = seed_centroids(samples, k, &mut rng);
    let mut assignments = vec![UNASSIGNED; samples.len()];
    let mut iterations = 0;
    let mut termination = Termination::MaxIterationsReached;

    while iterations < max_iterations {
        iterations += 1;
        let changed = assign(samples, &centroids, &mut assignments);
        if changed == 0 {
            termination = Termination::Converged;
            break;
        }
        let reseeded = recompute(samples, &assignments, &mut centroids);
        trace!(iteration = iterations, changed, reseeded, "k-means iteration");
    }

    if iterations == 0 {
        assign(samples, &centroids, &mut assignments);
    }

    debug!(
        k,
        samples = samples.len(),
        iterations,
        ?termination,
        "k-means finished"
    );

    Ok(KMeansOutcome {
        centroids,
        assignments,
        iterations,
        termination,
    })
}

fn seed_centroids(samples: &[Pixel], k: usize, rng: &mut StdRng) -> Vec<Pixel> {
    rand::seq::index::sample(rng, samples.len(), k)
        .iter()
        .map(|i| samples[i])
        .collect()
}

/// Index of the closest centroid; ties go to the lowest index.
fn nearest_centroid(sample: Pixel, centroids: &[Pixel]) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = sample.distance_sq(*centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Reassign every sample; returns how many changed cluster.
fn assign(samples: &[Pixel], centroids: &[Pixel], assignments: &mut [usize]) -> usize {
    let mut changed = 0;
    for (sample, slot) in samples.iter().zip(assignments.iter_mut()) {
        let nearest = nearest_centroid(*sample, centroids);
        if *slot != nearest {
            *slot = nearest;
            changed += 1;
        }
    }
    changed
}

/// Move each centroid to the mean of its members and re-seed the empty ones.
/// Returns the number of re-seeded clusters.
fn recompute(samples: &[Pixel], assignments: &[usize], centroids: &mut [Pixel]) -> usize {
    let mut sums = vec![ChannelSums::default(); centroids.len()];
    for (sample, &cluster) in samples.iter().zip(assignments) {
        sums[cluster].add(*sample);
    }

    let mut occupied = vec![false; centroids.len()];
    let mut empty = Vec::new();
    for (i, sum) in sums.iter().enumerate() {
        match sum.mean() {
            Some(mean) => {
                centroids[i] = mean;
                occupied[i] = true;
            }
            None => empty.push(i),
        }
    }

    for &i in &empty {
        let farthest = farthest_sample(samples, centroids, &occupied);
        centroids[i] = samples[farthest];
        occupied[i] = true;
    }
    empty.len()
}

/// The sample whose nearest occupied centroid is farthest away; ties go to
/// the first such sample.
fn farthest_sample(samples: &[Pixel], centroids: &[Pixel], occupied: &[bool]) -> usize {
    let mut best = 0;
    let mut best_dist = 0;
    for (i, sample) in samples.iter().enumerate() {
        let dist = centroids
            .iter()
            .zip(occupied)
            .filter(|&(_, &occ)| occ)
            .map(|(c, _)| sample.distance_sq(*c))
            .min()
            .unwrap_or(u32::MAX);
        if dist > best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
