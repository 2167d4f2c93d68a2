use image::imageops::{self, FilterType};
use image::RgbImage;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::patterns::{FoodPattern, Rgb};

const SIMILARITY_THRESHOLD: f64 = 0.7;
const MATCH_WEIGHT: f64 = 0.3;
const MAX_ITERATIONS: usize = 20;
const ATTEMPTS: usize = 3;
const CONVERGENCE_EPS: f32 = 1.0;

/// 1 minus the Euclidean RGB distance scaled by the largest possible distance.
pub fn color_similarity(a: Rgb, b: Rgb) -> f64 {
    let dist = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (f64::from(x) - f64::from(y)).powi(2))
        .sum::<f64>()
        .sqrt();
    let max = (3.0 * 255.0f64.powi(2)).sqrt();
    1.0 - dist / max
}

/// Sum of `0.3 * similarity` over every dominant/reference pair above 0.7.
pub fn color_score(dominant: &[Rgb], pattern: &FoodPattern) -> f64 {
    let mut score = 0.0;
    for &dom in dominant {
        for &reference in pattern.colors {
            let sim = color_similarity(dom, reference);
            if sim > SIMILARITY_THRESHOLD {
                score += sim * MATCH_WEIGHT;
            }
        }
    }
    score.min(1.0)
}

/// The `k` cluster centres of the image's pixels, computed on a thumbnail
/// whose longest side is `sample_side`.
pub fn dominant_colors<R: Rng + ?Sized>(
    img: &RgbImage,
    k: usize,
    sample_side: u32,
    rng: &mut R,
) -> Vec<Rgb> {
    let (w, h) = img.dimensions();
    let sample = if w.max(h) > sample_side && sample_side > 0 {
        let scale = f64::from(sample_side) / f64::from(w.max(h));
        let tw = ((f64::from(w) * scale).round() as u32).max(1);
        let th = ((f64::from(h) * scale).round() as u32).max(1);
        imageops::resize(img, tw, th, FilterType::Triangle)
    } else {
        img.clone()
    };
    let data: Vec<[f32; 3]> = sample
        .pixels()
        .map(|p| [f32::from(p[0]), f32::from(p[1]), f32::from(p[2])])
        .collect();

    let best = (0..ATTEMPTS)
        .map(|_| KMeans::new(&data, k, MAX_ITERATIONS, &mut *rng))
        .min_by(|a, b| a.inertia.total_cmp(&b.inertia));
    let Some(best) = best else {
        return Vec::new();
    };
    // Truncate toward zero like an unsigned cast of the float centre.
    best.centroids
        .iter()
        .map(|c| [c[0] as u8, c[1] as u8, c[2] as u8])
        .collect()
}

/// Lloyd's k-means over RGB points with randomly chosen initial centres.
struct KMeans {
    centroids: Vec<[f32; 3]>,
    inertia: f32,
}

impl KMeans {
    fn new<R: Rng + ?Sized>(data: &[[f32; 3]], k: usize, max_iterations: usize, rng: &mut R) -> Self {
        if data.is_empty() || k == 0 {
            return Self {
                centroids: vec![],
                inertia: 0.0,
            };
        }
        let k = k.min(data.len());
        let mut centroids: Vec<[f32; 3]> = data.choose_multiple(&mut *rng, k).copied().collect();
        let mut assignments = vec![0usize; data.len()];

        for _ in 0..max_iterations {
            for (i, point) in data.iter().enumerate() {
                assignments[i] = nearest(point, &centroids).0;
            }

            let mut sums = vec![[0.0f32; 3]; k];
            let mut counts = vec![0usize; k];
            for (i, &cluster) in assignments.iter().enumerate() {
                for c in 0..3 {
                    sums[cluster][c] += data[i][c];
                }
                counts[cluster] += 1;
            }

            let mut shift = 0.0f32;
            for j in 0..k {
                let next = if counts[j] > 0 {
                    let n = counts[j] as f32;
                    [sums[j][0] / n, sums[j][1] / n, sums[j][2] / n]
                } else if let Some(p) = data.choose(&mut *rng) {
                    *p
                } else {
                    centroids[j]
                };
                shift = shift.max(distance_sq(&next, &centroids[j]).sqrt());
                centroids[j] = next;
            }
            if shift < CONVERGENCE_EPS {
                break;
            }
        }

        let inertia = data.iter().map(|p| nearest(p, &centroids).1).sum();
        Self { centroids, inertia }
    }
}

fn nearest(point: &[f32; 3], centroids: &[[f32; 3]]) -> (usize, f32) {
    let mut best = (0, f32::MAX);
    for (j, c) in centroids.iter().enumerate() {
        let d = distance_sq(point, c);
        if d < best.1 {
            best = (j, d);
        }
    }
    best
}

fn distance_sq(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}
