use std::collections::HashMap;

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::{gaussian_blur_f32, median_filter};

use super::patterns::Texture;
use super::vision::{
    close, count_circles, edge_density, external_contours, gray_stats, laplacian_variance,
    mean_abs_diff, mean_sobel, morphological_gradient, open, polygon_area, CircleParams,
};

/// Circle votes run at half the analysis resolution.
const CIRCLE_SCALE: u32 = 2;

/// Scores textures against one grayscale image, running each test at most once.
pub struct TextureScorer<'a> {
    gray: &'a GrayImage,
    cache: HashMap<Texture, f64>,
    laplacian: Option<f64>,
}

impl<'a> TextureScorer<'a> {
    pub fn new(gray: &'a GrayImage) -> Self {
        Self {
            gray,
            cache: HashMap::new(),
            laplacian: None,
        }
    }

    pub fn score(&mut self, texture: Texture) -> f64 {
        if let Some(s) = self.cache.get(&texture) {
            return *s;
        }
        let s = self.compute(texture).clamp(0.0, 1.0);
        self.cache.insert(texture, s);
        s
    }

    fn laplacian_variance(&mut self) -> f64 {
        let gray = self.gray;
        *self.laplacian.get_or_insert_with(|| laplacian_variance(gray))
    }

    fn compute(&mut self, texture: Texture) -> f64 {
        let gray = self.gray;
        match texture {
            Texture::Grainy => {
                let lv = self.laplacian_variance();
                if lv > 500.0 {
                    (lv / 2000.0).min(1.0)
                } else {
                    lv / 500.0
                }
            }
            Texture::Smooth => {
                let lv = self.laplacian_variance();
                if lv < 200.0 {
                    1.0 - lv / 200.0
                } else {
                    0.0
                }
            }
            Texture::SlightlyTextured => {
                let lv = self.laplacian_variance();
                if lv > 100.0 && lv < 400.0 {
                    (lv / 400.0).min(1.0)
                } else {
                    0.0
                }
            }
            Texture::Liquid => {
                let m = mean_abs_diff(gray, &gaussian_blur_f32(gray, 2.6));
                if m > 10.0 && m < 50.0 {
                    (m / 50.0).min(1.0)
                } else {
                    0.0
                }
            }
            Texture::Crispy => (edge_density(gray, 100.0, 200.0) * 5.0).min(1.0),
            Texture::Soft => 1.0 - (edge_density(gray, 30.0, 80.0) * 10.0).min(1.0),
            Texture::Mushy => 1.0 - (edge_density(gray, 10.0, 30.0) * 20.0).min(1.0),
            Texture::Flaky => {
                let d = edge_density(gray, 20.0, 60.0);
                if d > 0.05 && d < 0.15 {
                    (d * 10.0).min(1.0)
                } else {
                    0.0
                }
            }
            Texture::Spiral => {
                let params = CircleParams {
                    min_dist: 20.0,
                    edge_threshold: 50.0,
                    votes: 30,
                    min_radius: 10,
                    max_radius: 100,
                    scale: CIRCLE_SCALE,
                };
                (count_circles(gray, &params) as f64 / 5.0).min(1.0)
            }
            Texture::Puffy => {
                let params = CircleParams {
                    min_dist: 30.0,
                    edge_threshold: 40.0,
                    votes: 25,
                    min_radius: 20,
                    max_radius: 200,
                    scale: CIRCLE_SCALE,
                };
                (count_circles(gray, &params) as f64 / 3.0).min(1.0)
            }
            Texture::Creamy => {
                let s = gray_stats(&gaussian_blur_f32(gray, 1.7)).std_dev();
                if s > 15.0 && s < 40.0 {
                    (s / 40.0).min(1.0)
                } else {
                    0.0
                }
            }
            Texture::Spongy => {
                let s = gray_stats(&gaussian_blur_f32(gray, 1.4)).std_dev();
                ((1.0 - s / 128.0) * 0.8).max(0.0)
            }
            Texture::Dense => {
                let st = gray_stats(gray);
                (st.mean / 255.0 * (1.0 - st.std_dev() / 128.0)).max(0.0)
            }
            Texture::Thick => (1.0 - mean_abs_diff(gray, &close(gray, 5)) / 255.0).max(0.0),
            Texture::Crumbly => {
                let g = gray_stats(&morphological_gradient(gray, 3)).mean / 255.0;
                (g * 2.0).min(1.0)
            }
            Texture::Minced => (mean_abs_diff(gray, &open(gray, 2)) / 255.0 * 4.0).min(1.0),
            Texture::Mashed => {
                (mean_abs_diff(gray, &median_filter(gray, 2, 2)) / 255.0 * 3.0).min(1.0)
            }
            Texture::Chunky => {
                let edges = canny(gray, 50.0, 150.0);
                let chunks = external_contours(&edges)
                    .iter()
                    .filter(|c| polygon_area(&c.points) > 100.0)
                    .count();
                (chunks as f64 / 10.0).min(1.0)
            }
            Texture::Mixed => {
                let v = gray_stats(gray).variance;
                if v > 1000.0 {
                    (v / 3000.0).min(1.0)
                } else {
                    v / 1000.0
                }
            }
            Texture::Charred => {
                let total = (gray.width() as usize * gray.height() as usize).max(1);
                let dark = gray.pixels().filter(|p| p[0] < 80).count() as f64 / total as f64;
                let contrast = gray_stats(gray).std_dev() / 128.0;
                (dark * contrast * 2.0).min(1.0)
            }
            Texture::Layered => {
                let (vertical, horizontal) = mean_sobel(gray);
                (horizontal.max(vertical) / 255.0 * 2.0).min(1.0)
            }
            Texture::Gravy => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn flat(v: u8) -> GrayImage {
        GrayImage::from_pixel(64, 64, Luma([v]))
    }

    fn stripes() -> GrayImage {
        GrayImage::from_fn(64, 64, |x, _| Luma([if (x / 2) % 2 == 0 { 20 } else { 230 }]))
    }

    #[test]
    fn flat_image_is_smooth_not_grainy() {
        let img = flat(128);
        let mut scorer = TextureScorer::new(&img);
        assert!((scorer.score(Texture::Smooth) - 1.0).abs() < 1e-9);
        assert!(scorer.score(Texture::Grainy).abs() < 1e-9);
        assert!(scorer.score(Texture::Crispy).abs() < 1e-9);
        assert!((scorer.score(Texture::Mushy) - 1.0).abs() < 1e-9);
        assert!((scorer.score(Texture::Thick) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dense_tracks_brightness_of_flat_image() {
        let img = flat(255);
        let mut scorer = TextureScorer::new(&img);
        assert!((scorer.score(Texture::Dense) - 1.0).abs() < 1e-9);
        assert!((scorer.score(Texture::Spongy) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn striped_image_is_busy() {
        let img = stripes();
        let mut scorer = TextureScorer::new(&img);
        assert!(scorer.score(Texture::Grainy) > 0.9);
        assert_eq!(scorer.score(Texture::Smooth), 0.0);
        assert!(scorer.score(Texture::Mixed) > 0.9);
        assert!(scorer.score(Texture::Layered) > 0.5);
    }

    #[test]
    fn gravy_has_no_test() {
        let img = stripes();
        assert_eq!(TextureScorer::new(&img).score(Texture::Gravy), 0.0);
    }

    #[test]
    fn dark_contrasty_image_reads_as_charred() {
        let img = GrayImage::from_fn(64, 64, |x, _| Luma([if x < 40 { 10 } else { 250 }]));
        let mut scorer = TextureScorer::new(&img);
        assert!(scorer.score(Texture::Charred) > 0.5);
    }
}
