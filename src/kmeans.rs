//! K-means clustering of RGB colors with deterministic hue-wheel seeding.
//!
//! Seeds are spread evenly around the fully saturated hue wheel instead of
//! being drawn at random, so the same samples always produce the same
//! clusters and typical ink colors (black, blue, red) start in separate
//! clusters.

use crate::color::{Hsv, Rgbf, closest, hsv_to_rgb};

/// Final state of a k-means run.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    /// Cluster centers in seeding order.
    pub centers: Vec<Rgbf>,
    /// Cluster index of every data point.
    pub assignments: Vec<usize>,
    /// Number of update/reassign rounds performed.
    pub iterations: usize,
    /// Whether the last round left every assignment unchanged.
    pub converged: bool,
}

/// `k` initial centers at hues `i / (k - 1)`, full saturation and value.
///
/// The last hue is exactly `1.0`, which converts to white. A single cluster
/// is seeded at hue 0.
pub fn seed_centers(k: usize) -> Vec<Rgbf> {
    (0..k)
        .map(|i| {
            let hue = if k > 1 {
                i as f32 / (k - 1) as f32
            } else {
                0.0
            };
            hsv_to_rgb(Hsv {
                hue,
                saturation: 1.0,
                value: 1.0,
            })
        })
        .collect()
}

/// Nearest center for every point.
pub fn assign(data: &[Rgbf], centers: &[Rgbf]) -> Vec<usize> {
    data.iter().map(|&p| closest(p, centers)).collect()
}

/// Reassign every point in place, returning how many changed cluster.
pub fn reassign(data: &[Rgbf], centers: &[Rgbf], assignments: &mut [usize]) -> usize {
    let mut changes = 0;
    for (p, cluster) in data.iter().zip(assignments.iter_mut()) {
        let nearest = closest(*p, centers);
        if nearest != *cluster {
            *cluster = nearest;
            changes += 1;
        }
    }
    changes
}

/// Mean of the points assigned to each of `k` clusters.
///
/// An empty cluster divides its zero sum by one and so collapses to black.
pub fn update(data: &[Rgbf], assignments: &[usize], k: usize) -> Vec<Rgbf> {
    let mut sums = vec![Rgbf::BLACK; k];
    let mut counts = vec![0usize; k];
    for (&p, &cluster) in data.iter().zip(assignments) {
        sums[cluster] = sums[cluster] + p;
        counts[cluster] += 1;
    }
    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| sum * (1.0 / count.max(1) as f32))
        .collect()
}

/// Cluster `data` into `k` groups, running at most `max_iter` rounds.
pub fn kmeans(data: &[Rgbf], k: usize, max_iter: usize) -> Clustering {
    let mut centers = seed_centers(k);
    let mut assignments = assign(data, &centers);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iter {
        centers = update(data, &assignments, k);
        let changes = reassign(data, &centers, &mut assignments);
        iterations += 1;
        tracing::trace!(iteration = iterations, changes, "k-means round");
        if changes == 0 {
            converged = true;
            break;
        }
    }

    Clustering {
        centers,
        assignments,
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(center: Rgbf, n: usize) -> Vec<Rgbf> {
        (0..n)
            .map(|i| {
                let d = (i % 5) as f32 - 2.0;
                Rgbf::new(center.red + d, center.green - d, center.blue + d / 2.0)
            })
            .collect()
    }

    #[test]
    fn seeds_walk_the_hue_wheel() {
        let seeds = seed_centers(7);
        assert_eq!(seeds.len(), 7);
        assert_eq!(seeds[0], Rgbf::new(255.0, 0.0, 0.0));
        assert_eq!(seeds[3], Rgbf::new(0.0, 255.0, 255.0));
        assert_eq!(seeds[6], Rgbf::WHITE);
        assert_eq!(seed_centers(1), vec![Rgbf::new(255.0, 0.0, 0.0)]);
    }

    #[test]
    fn separates_ink_colors() {
        let black = Rgbf::new(20.0, 20.0, 25.0);
        let blue = Rgbf::new(30.0, 40.0, 180.0);
        let red = Rgbf::new(190.0, 30.0, 35.0);
        let mut data = blob(black, 40);
        data.extend(blob(blue, 30));
        data.extend(blob(red, 20));

        let result = kmeans(&data, 3, 40);
        assert!(result.converged);
        for target in [black, blue, red] {
            let nearest = result.centers[closest(target, &result.centers)];
            assert!(crate::color::squared_distance(nearest, target) < 4.0, "{target:?} -> {nearest:?}");
        }
    }

    #[test]
    fn converged_centers_are_a_fixed_point() {
        let mut data = blob(Rgbf::new(10.0, 10.0, 10.0), 25);
        data.extend(blob(Rgbf::new(200.0, 40.0, 40.0), 25));
        data.extend(blob(Rgbf::new(40.0, 60.0, 220.0), 25));
        let result = kmeans(&data, 4, 100);
        assert!(result.converged);

        let mut assignments = result.assignments.clone();
        assert_eq!(reassign(&data, &result.centers, &mut assignments), 0);
        assert_eq!(update(&data, &assignments, 4), result.centers);
    }

    #[test]
    fn empty_clusters_collapse_to_black() {
        let data = vec![Rgbf::new(250.0, 10.0, 10.0); 5];
        let centers = update(&data, &[0; 5], 3);
        assert_eq!(centers[0], Rgbf::new(250.0, 10.0, 10.0));
        assert_eq!(centers[1], Rgbf::BLACK);
        assert_eq!(centers[2], Rgbf::BLACK);
    }

    #[test]
    fn no_data_yields_black_centers() {
        let result = kmeans(&[], 3, 40);
        assert_eq!(result.centers, vec![Rgbf::BLACK; 3]);
        assert!(result.assignments.is_empty());
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn zero_iterations_keeps_seeds() {
        let data = vec![Rgbf::new(1.0, 2.0, 3.0)];
        let result = kmeans(&data, 2, 0);
        assert_eq!(result.centers, seed_centers(2));
        assert!(!result.converged);
    }

    #[test]
    fn stops_at_iteration_cap() {
        let mut data = blob(Rgbf::new(10.0, 10.0, 10.0), 20);
        data.extend(blob(Rgbf::new(240.0, 240.0, 10.0), 20));
        let result = kmeans(&data, 3, 1);
        assert_eq!(result.iterations, 1);
    }
}
