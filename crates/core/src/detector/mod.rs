//! Heuristic Indian-dish recogniser.
//!
//! Four independent signals score every entry of [`patterns::FOOD_PATTERNS`]:
//! dominant colours, the outline of the largest edge contour, a texture test
//! chosen by the dish's texture tag, and hints in the uploaded filename. The
//! weighted sum is boosted per dish and the best label wins. Decoding or
//! analysis failures never surface: a popular dish is picked at random with
//! a low fixed confidence instead.

pub mod color;
pub mod patterns;
pub mod shape;
pub mod texture;
pub mod vision;

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, RgbImage};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DetectorConfig;
use patterns::{FoodPattern, FOOD_PATTERNS, POPULAR};
use shape::ShapeFeatures;
use texture::TextureScorer;

pub const ANALYSIS_SIDE: u32 = 512;
pub const FALLBACK_CONFIDENCE: f64 = 0.3;
const DOMINANT_COLORS: usize = 5;

const COLOR_WEIGHT: f64 = 0.25;
const SHAPE_WEIGHT: f64 = 0.30;
const TEXTURE_WEIGHT: f64 = 0.25;
const FILENAME_WEIGHT: f64 = 0.20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    /// True when the label came from the random popular-dish fallback.
    pub fallback: bool,
}

/// Per-signal scores for one dish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SignalScores {
    pub color: f64,
    pub shape: f64,
    pub texture: f64,
    pub filename: f64,
}

impl SignalScores {
    /// Weighted sum boosted by `1 + boost`, clamped to 1.
    pub fn combine(&self, boost: f64) -> f64 {
        let base = self.color * COLOR_WEIGHT
            + self.shape * SHAPE_WEIGHT
            + self.texture * TEXTURE_WEIGHT
            + self.filename * FILENAME_WEIGHT;
        (base * (1.0 + boost)).min(1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Detector {
    patterns: &'static [FoodPattern],
    color_sample_side: u32,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            patterns: FOOD_PATTERNS,
            color_sample_side: 128,
        }
    }
}

impl Detector {
    pub fn new(cfg: &DetectorConfig) -> Self {
        Self {
            patterns: FOOD_PATTERNS,
            color_sample_side: cfg.color_sample_side,
        }
    }

    /// Labels this detector can return, in table order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.patterns.iter().map(|p| p.label)
    }

    pub fn detect<R: Rng + ?Sized>(&self, bytes: &[u8], filename: &str, rng: &mut R) -> Detection {
        match image::load_from_memory(bytes) {
            Ok(img) => self.detect_image(&img, filename, rng),
            Err(err) => {
                warn!(error = %err, filename, "image decode failed; using popular-dish fallback");
                fallback(rng)
            }
        }
    }

    pub fn detect_image<R: Rng + ?Sized>(
        &self,
        img: &DynamicImage,
        filename: &str,
        rng: &mut R,
    ) -> Detection {
        if img.width() == 0 || img.height() == 0 || self.patterns.is_empty() {
            warn!(filename, "empty image; using popular-dish fallback");
            return fallback(rng);
        }
        let resized = img.resize_exact(ANALYSIS_SIDE, ANALYSIS_SIDE, FilterType::Lanczos3);
        let rgb = resized.to_rgb8();
        let gray = resized.to_luma8();
        let scores = self.score_all(&rgb, &gray, filename, &mut *rng);

        // Strictly greater keeps the earliest entry on ties.
        let mut best: Option<(&FoodPattern, f64)> = None;
        for (pattern, signals) in self.patterns.iter().zip(scores.iter()) {
            let total = signals.combine(pattern.boost);
            if best.map_or(true, |(_, s)| total > s) {
                best = Some((pattern, total));
            }
        }
        match best {
            Some((pattern, confidence)) => {
                debug!(label = pattern.label, confidence, "dish detected");
                Detection {
                    label: pattern.label.to_string(),
                    confidence: confidence.clamp(0.0, 1.0),
                    fallback: false,
                }
            }
            None => fallback(rng),
        }
    }

    /// Signal scores for every pattern, in table order.
    pub fn score_all<R: Rng + ?Sized>(
        &self,
        rgb: &RgbImage,
        gray: &GrayImage,
        filename: &str,
        rng: &mut R,
    ) -> Vec<SignalScores> {
        let dominant = color::dominant_colors(rgb, DOMINANT_COLORS, self.color_sample_side, rng);
        let features = ShapeFeatures::extract(gray);
        debug!(?dominant, ?features, "image features");
        let mut textures = TextureScorer::new(gray);
        let lowered = filename.to_lowercase();

        self.patterns
            .iter()
            .map(|p| SignalScores {
                color: color::color_score(&dominant, p),
                shape: features.score(p.shape),
                texture: textures.score(p.texture),
                filename: filename_score(&lowered, p),
            })
            .collect()
    }
}

/// Filename hint for one dish; `filename` must already be lowercase.
pub fn filename_score(filename: &str, pattern: &FoodPattern) -> f64 {
    if filename.is_empty() {
        return 0.0;
    }
    if filename.contains(&pattern.label.replace('_', " ")) {
        return 1.0;
    }
    if filename.contains(pattern.label) {
        return 0.9;
    }
    let hits = pattern
        .keywords
        .iter()
        .filter(|k| filename.contains(*k))
        .count();
    (hits as f64 * 0.2).min(1.0)
}

fn fallback<R: Rng + ?Sized>(rng: &mut R) -> Detection {
    let label = POPULAR.choose(rng).copied().unwrap_or("dal_tadka");
    Detection {
        label: label.to_string(),
        confidence: FALLBACK_CONFIDENCE,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use image::{ImageFormat, Rgb};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn png(img: RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn noisy_gradient(w: u32, h: u32, seed: u64) -> RgbImage {
        let mut rng = StdRng::seed_from_u64(seed);
        RgbImage::from_fn(w, h, |x, y| {
            let base = (x * 200 / w + y * 55 / h) as i32;
            let jitter = |rng: &mut StdRng| (base + rng.random_range(-20..=20)).clamp(0, 255) as u8;
            Rgb([jitter(&mut rng), jitter(&mut rng) / 2, jitter(&mut rng) / 3])
        })
    }

    #[test]
    fn exact_filename_match_scores_one() {
        let biryani = patterns::find("biryani").unwrap();
        assert_eq!(filename_score("biryani.jpg", biryani), 1.0);
    }

    #[test]
    fn spaced_and_underscored_names_match() {
        let dal = patterns::find("dal_tadka").unwrap();
        assert_eq!(filename_score("my dal tadka.png", dal), 1.0);
        assert_eq!(filename_score("dal_tadka_2.png", dal), 0.9);
    }

    #[test]
    fn keywords_add_up_and_clamp() {
        let biryani = patterns::find("biryani").unwrap();
        assert!((filename_score("rice_grains.png", biryani) - 0.4).abs() < 1e-9);
        assert_eq!(filename_score("photo.png", biryani), 0.0);
    }

    #[test]
    fn combine_applies_weights_and_boost() {
        let s = SignalScores {
            color: 1.0,
            shape: 0.0,
            texture: 0.0,
            filename: 0.0,
        };
        assert!((s.combine(0.0) - 0.25).abs() < 1e-12);
        assert!((s.combine(0.4) - 0.35).abs() < 1e-12);
        let all = SignalScores {
            color: 1.0,
            shape: 1.0,
            texture: 1.0,
            filename: 1.0,
        };
        assert_eq!(all.combine(0.5), 1.0);
    }

    #[test]
    fn corrupt_bytes_fall_back_to_popular_dish() {
        let detector = Detector::default();
        let mut rng = StdRng::seed_from_u64(3);
        for bytes in [&b""[..], b"not an image", &[0xff, 0xd8, 0xff, 0x00]] {
            let d = detector.detect(bytes, "whatever.jpg", &mut rng);
            assert!(d.fallback);
            assert!(POPULAR.contains(&d.label.as_str()));
            assert_eq!(d.confidence, FALLBACK_CONFIDENCE);
            assert!(detector.vocabulary().any(|l| l == d.label));
        }
    }

    #[test]
    fn decodable_images_get_a_known_label() {
        let detector = Detector::default();
        let mut rng = StdRng::seed_from_u64(11);
        let images = [
            RgbImage::from_pixel(1, 1, Rgb([210, 160, 60])),
            RgbImage::from_fn(2000, 3, |x, _| Rgb([(x % 256) as u8, 120, 40])),
            noisy_gradient(300, 200, 5),
        ];
        for img in images {
            let d = detector.detect(&png(img), "upload.png", &mut rng);
            assert!(!d.fallback, "{d:?}");
            assert!(detector.vocabulary().any(|l| l == d.label), "{d:?}");
            assert!((0.0..=1.0).contains(&d.confidence), "{d:?}");
        }
    }

    #[test]
    fn same_seed_gives_same_detection() {
        let detector = Detector::default();
        let bytes = png(noisy_gradient(96, 64, 9));
        let first = detector.detect(&bytes, "lunch.jpg", &mut StdRng::seed_from_u64(42));
        let second = detector.detect(&bytes, "lunch.jpg", &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn filename_hint_changes_only_the_filename_signal() {
        let detector = Detector::default();
        let img = DynamicImage::ImageRgb8(noisy_gradient(64, 64, 3))
            .resize_exact(ANALYSIS_SIDE, ANALYSIS_SIDE, FilterType::Lanczos3);
        let (rgb, gray) = (img.to_rgb8(), img.to_luma8());
        let plain = detector.score_all(&rgb, &gray, "photo.png", &mut StdRng::seed_from_u64(1));
        let hinted = detector.score_all(&rgb, &gray, "Biryani.png", &mut StdRng::seed_from_u64(1));

        let idx = detector.vocabulary().position(|l| l == "biryani").unwrap();
        assert_eq!(plain[idx].filename, 0.0);
        assert_eq!(hinted[idx].filename, 1.0);
        for (a, b) in plain.iter().zip(&hinted) {
            assert_eq!((a.color, a.shape, a.texture), (b.color, b.shape, b.texture));
        }
    }
}
