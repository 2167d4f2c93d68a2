//! Grayscale image statistics and filters shared by the shape and texture
//! signals. Everything here works on 8-bit luma images.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::edges::canny;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use imageproc::point::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub variance: f64,
}

impl Stats {
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Population mean and variance of `values`.
pub fn stats<I>(values: I) -> Stats
where
    I: IntoIterator<Item = f64>,
{
    let mut n = 0usize;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for v in values {
        n += 1;
        sum += v;
        sum_sq += v * v;
    }
    if n == 0 {
        return Stats {
            mean: 0.0,
            variance: 0.0,
        };
    }
    let mean = sum / n as f64;
    let variance = (sum_sq / n as f64 - mean * mean).max(0.0);
    Stats { mean, variance }
}

pub fn gray_stats(img: &GrayImage) -> Stats {
    stats(img.pixels().map(|p| f64::from(p[0])))
}

fn clamped(img: &GrayImage, x: i64, y: i64) -> f64 {
    let (w, h) = img.dimensions();
    let cx = x.clamp(0, i64::from(w) - 1) as u32;
    let cy = y.clamp(0, i64::from(h) - 1) as u32;
    f64::from(img.get_pixel(cx, cy)[0])
}

/// Variance of the 4-neighbour Laplacian response.
pub fn laplacian_variance(img: &GrayImage) -> f64 {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return 0.0;
    }
    let responses = (0..h).flat_map(move |y| {
        (0..w).map(move |x| {
            let (x, y) = (i64::from(x), i64::from(y));
            clamped(img, x, y - 1) + clamped(img, x - 1, y) + clamped(img, x + 1, y)
                + clamped(img, x, y + 1)
                - 4.0 * clamped(img, x, y)
        })
    });
    stats(responses).variance
}

/// Fraction of pixels marked by a Canny pass with the given hysteresis thresholds.
pub fn edge_density(img: &GrayImage, low: f32, high: f32) -> f64 {
    let edges = canny(img, low, high);
    nonzero_fraction(&edges)
}

pub fn nonzero_fraction(img: &GrayImage) -> f64 {
    let total = u64::from(img.width()) * u64::from(img.height());
    if total == 0 {
        return 0.0;
    }
    let set = img.pixels().filter(|p| p[0] > 0).count();
    set as f64 / total as f64
}

pub fn mean_abs_diff(a: &GrayImage, b: &GrayImage) -> f64 {
    stats(
        a.pixels()
            .zip(b.pixels())
            .map(|(p, q)| f64::from(p[0].abs_diff(q[0]))),
    )
    .mean
}

/// Outermost contours of an edge map (no holes, no nested borders).
pub fn external_contours(edges: &GrayImage) -> Vec<Contour<i32>> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .collect()
}

/// Shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y))
        .sum();
    (twice as f64 / 2.0).abs()
}

/// Width and height of the axis-aligned box around `points`, inclusive.
pub fn bounding_box(points: &[Point<i32>]) -> (u32, u32) {
    let Some(first) = points.first() else {
        return (0, 0);
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    ((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32)
}

#[derive(Debug, Clone, Copy)]
enum Extremum {
    Min,
    Max,
}

/// Min or max over a rectangular window spanning `lo..=hi` around each pixel;
/// out-of-image pixels are ignored.
fn rank_filter(img: &GrayImage, lo: i64, hi: i64, which: Extremum) -> GrayImage {
    let (w, h) = img.dimensions();
    GrayImage::from_fn(w, h, |x, y| {
        let mut acc = match which {
            Extremum::Min => u8::MAX,
            Extremum::Max => u8::MIN,
        };
        for dy in lo..=hi {
            for dx in lo..=hi {
                let nx = i64::from(x) + dx;
                let ny = i64::from(y) + dy;
                if nx < 0 || ny < 0 || nx >= i64::from(w) || ny >= i64::from(h) {
                    continue;
                }
                let v = img.get_pixel(nx as u32, ny as u32)[0];
                acc = match which {
                    Extremum::Min => acc.min(v),
                    Extremum::Max => acc.max(v),
                };
            }
        }
        Luma([acc])
    })
}

/// Square structuring element of side `size`, anchored at `size / 2`.
fn window(size: u32) -> (i64, i64) {
    let anchor = i64::from(size / 2);
    (-anchor, i64::from(size) - 1 - anchor)
}

pub fn erode(img: &GrayImage, size: u32) -> GrayImage {
    let (lo, hi) = window(size);
    rank_filter(img, lo, hi, Extremum::Min)
}

pub fn dilate(img: &GrayImage, size: u32) -> GrayImage {
    let (lo, hi) = window(size);
    rank_filter(img, lo, hi, Extremum::Max)
}

pub fn close(img: &GrayImage, size: u32) -> GrayImage {
    erode(&dilate(img, size), size)
}

pub fn open(img: &GrayImage, size: u32) -> GrayImage {
    dilate(&erode(img, size), size)
}

/// Dilation minus erosion.
pub fn morphological_gradient(img: &GrayImage, size: u32) -> GrayImage {
    let hi = dilate(img, size);
    let lo = erode(img, size);
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([hi.get_pixel(x, y)[0] - lo.get_pixel(x, y)[0]])
    })
}

/// Mean absolute horizontal and vertical Sobel responses.
pub fn mean_sobel(img: &GrayImage) -> (f64, f64) {
    let gx = horizontal_sobel(img);
    let gy = vertical_sobel(img);
    let mx = stats(gx.pixels().map(|p| f64::from(p[0]).abs())).mean;
    let my = stats(gy.pixels().map(|p| f64::from(p[0]).abs())).mean;
    (mx, my)
}

#[derive(Debug, Clone, Copy)]
pub struct CircleParams {
    /// Minimum distance between accepted centres.
    pub min_dist: f64,
    /// Upper Canny threshold; the lower one is half of it.
    pub edge_threshold: f32,
    /// Accumulator votes a centre needs to count.
    pub votes: u32,
    pub min_radius: u32,
    pub max_radius: u32,
    /// Votes are cast on the image shrunk by this factor; radii, distance
    /// and the vote threshold shrink with it.
    pub scale: u32,
}

/// Counts circle centres with a gradient-direction Hough vote.
///
/// Every edge pixel votes along its gradient (both ways) for centres between
/// `min_radius` and `max_radius`. Local accumulator peaks above `votes` are
/// taken strongest first, skipping any closer than `min_dist` to one already
/// accepted.
pub fn count_circles(img: &GrayImage, params: &CircleParams) -> usize {
    let scale = params.scale.max(1);
    let shrunk;
    let img = if scale > 1 {
        let (w, h) = ((img.width() / scale).max(1), (img.height() / scale).max(1));
        shrunk = imageops::resize(img, w, h, FilterType::Triangle);
        &shrunk
    } else {
        img
    };
    let min_dist = params.min_dist / f64::from(scale);
    let min_radius = params.min_radius / scale;
    let max_radius = params.max_radius.div_ceil(scale);
    let votes = params.votes.div_ceil(scale);

    let (w, h) = img.dimensions();
    if w < 3 || h < 3 {
        return 0;
    }
    let edges = canny(img, params.edge_threshold / 2.0, params.edge_threshold);
    let gx = horizontal_sobel(img);
    let gy = vertical_sobel(img);
    let mut acc = vec![0u32; (w * h) as usize];

    for (x, y, p) in edges.enumerate_pixels() {
        if p[0] == 0 {
            continue;
        }
        let dx = f64::from(gx.get_pixel(x, y)[0]);
        let dy = f64::from(gy.get_pixel(x, y)[0]);
        let mag = (dx * dx + dy * dy).sqrt();
        if mag < f64::EPSILON {
            continue;
        }
        let (ux, uy) = (dx / mag, dy / mag);
        for sign in [-1.0, 1.0] {
            for r in min_radius..=max_radius {
                let cx = f64::from(x) + sign * ux * f64::from(r);
                let cy = f64::from(y) + sign * uy * f64::from(r);
                if cx < 0.0 || cy < 0.0 {
                    break;
                }
                let (cx, cy) = (cx.round() as u32, cy.round() as u32);
                if cx >= w || cy >= h {
                    break;
                }
                acc[(cy * w + cx) as usize] += 1;
            }
        }
    }

    let at = |x: u32, y: u32| acc[(y * w + x) as usize];
    let mut peaks = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let v = at(x, y);
            if v <= votes {
                continue;
            }
            let is_peak = (y - 1..=y + 1)
                .flat_map(|ny| (x - 1..=x + 1).map(move |nx| (nx, ny)))
                .all(|(nx, ny)| at(nx, ny) <= v);
            if is_peak {
                peaks.push((v, x, y));
            }
        }
    }
    peaks.sort_by(|a, b| b.0.cmp(&a.0));

    let mut centres: Vec<(f64, f64)> = Vec::new();
    for (_, x, y) in peaks {
        let (x, y) = (f64::from(x), f64::from(y));
        let far_enough = centres
            .iter()
            .all(|(cx, cy)| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() >= min_dist);
        if far_enough {
            centres.push((x, y));
        }
    }
    centres.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(w: u32, h: u32, v: u8) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([v]))
    }

    fn checker(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([if (x + y) % 2 == 0 { 0 } else { 255 }]))
    }

    #[test]
    fn stats_of_constant_image() {
        let s = gray_stats(&flat(8, 8, 100));
        assert!((s.mean - 100.0).abs() < 1e-9);
        assert!(s.variance.abs() < 1e-9);
    }

    #[test]
    fn laplacian_variance_separates_flat_and_busy() {
        assert!(laplacian_variance(&flat(16, 16, 42)) < 1e-9);
        assert!(laplacian_variance(&checker(16, 16)) > 1000.0);
    }

    #[test]
    fn polygon_area_of_square() {
        let square = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert!((polygon_area(&square) - 100.0).abs() < 1e-9);
        assert_eq!(bounding_box(&square), (11, 11));
    }

    #[test]
    fn closing_removes_dark_speck() {
        let mut img = flat(9, 9, 200);
        img.put_pixel(4, 4, Luma([0]));
        let closed = close(&img, 5);
        assert_eq!(closed.get_pixel(4, 4)[0], 200);
        assert!(mean_abs_diff(&img, &closed) > 0.0);
    }

    #[test]
    fn gradient_is_zero_on_flat_image() {
        let g = morphological_gradient(&flat(6, 6, 77), 3);
        assert!(g.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn no_circles_in_flat_image() {
        let params = CircleParams {
            min_dist: 20.0,
            edge_threshold: 50.0,
            votes: 30,
            min_radius: 10,
            max_radius: 100,
            scale: 1,
        };
        assert_eq!(count_circles(&flat(64, 64, 128), &params), 0);
    }

    fn disc(side: u32, radius: f64) -> GrayImage {
        let c = f64::from(side) / 2.0;
        GrayImage::from_fn(side, side, |x, y| {
            let d = ((f64::from(x) - c).powi(2) + (f64::from(y) - c).powi(2)).sqrt();
            Luma([if d < radius { 230 } else { 20 }])
        })
    }

    #[test]
    fn finds_a_drawn_disc() {
        let params = CircleParams {
            min_dist: 20.0,
            edge_threshold: 50.0,
            votes: 30,
            min_radius: 10,
            max_radius: 100,
            scale: 1,
        };
        assert!(count_circles(&disc(128, 30.0), &params) >= 1);
    }

    #[test]
    fn finds_a_disc_on_the_shrunk_image() {
        let params = CircleParams {
            min_dist: 20.0,
            edge_threshold: 50.0,
            votes: 30,
            min_radius: 10,
            max_radius: 100,
            scale: 2,
        };
        assert!(count_circles(&disc(256, 60.0), &params) >= 1);
        assert_eq!(count_circles(&flat(256, 256, 90), &params), 0);
        assert_eq!(count_circles(&flat(3, 3, 90), &params), 0);
    }
}
