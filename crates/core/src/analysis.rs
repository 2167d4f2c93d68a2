use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::detector::{Detection, Detector, FALLBACK_CONFIDENCE};
use crate::nutrition::{self, Nutrition};

/// Label used when the detected dish has no nutrition record.
pub const DEFAULT_DISH: &str = "dal_tadka";

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// What the food-photo endpoint reports back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodAnalysis {
    pub label: String,
    pub food_name: String,
    pub description: String,
    pub nutrition: Nutrition,
    pub health_tips: Vec<String>,
    #[serde(rename = "reference_image")]
    pub image_url: String,
    /// Percentage, one decimal.
    pub confidence: f64,
}

pub fn has_allowed_extension(filename: &str) -> bool {
    let lowered = filename.to_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .any(|ext| lowered.ends_with(&format!(".{ext}")))
}

pub struct FoodAnalyzer {
    detector: Detector,
    variation: bool,
}

impl FoodAnalyzer {
    pub fn new(detector: Detector, variation: bool) -> Self {
        Self {
            detector,
            variation,
        }
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn analyze<R: Rng + ?Sized>(&self, bytes: &[u8], filename: &str, rng: &mut R) -> FoodAnalysis {
        let detection = self.detector.detect(bytes, filename, &mut *rng);
        self.report(detection, rng)
    }

    /// Attaches nutrition, tips and display fields to a detection.
    pub fn report<R: Rng + ?Sized>(&self, detection: Detection, rng: &mut R) -> FoodAnalysis {
        let (label, confidence, record) = match nutrition::lookup(&detection.label) {
            Some(record) => (detection.label, detection.confidence, record),
            None => {
                warn!(label = %detection.label, "no nutrition record; reporting default dish");
                match nutrition::lookup(DEFAULT_DISH) {
                    Some(record) => (DEFAULT_DISH.to_string(), FALLBACK_CONFIDENCE, record),
                    None => return empty_report(detection),
                }
            }
        };

        let base = record.nutrition();
        let nutrition = if self.variation {
            base.vary(confidence, rng)
        } else {
            base.rounded()
        };
        let health_tips = nutrition::health_tips(&label, &nutrition, confidence);
        info!(%label, confidence, "food analysed");

        FoodAnalysis {
            food_name: nutrition::display_name(&label),
            description: record.description.to_string(),
            nutrition,
            health_tips,
            image_url: record.image_url.to_string(),
            confidence: (confidence * 1000.0).round() / 10.0,
            label,
        }
    }
}

fn empty_report(detection: Detection) -> FoodAnalysis {
    FoodAnalysis {
        food_name: nutrition::display_name(&detection.label),
        description: format!("Traditional Indian {}", detection.label.replace('_', " ")),
        nutrition: Nutrition {
            calories: 200.0,
            protein: 8.0,
            carbs: 30.0,
            fats: 5.0,
            fiber: 3.0,
            sugar: 5.0,
        },
        health_tips: vec!["Well-balanced traditional Indian dish".to_string()],
        image_url: String::new(),
        confidence: (detection.confidence * 1000.0).round() / 10.0,
        label: detection.label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn analyzer() -> FoodAnalyzer {
        FoodAnalyzer::new(Detector::default(), false)
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_allowed_extension("Biryani.JPG"));
        assert!(has_allowed_extension("x.bmp"));
        assert!(!has_allowed_extension("x.webp"));
        assert!(!has_allowed_extension("png"));
    }

    #[test]
    fn known_label_reports_table_values() {
        let mut rng = StdRng::seed_from_u64(1);
        let report = analyzer().report(
            Detection {
                label: "biryani".into(),
                confidence: 0.8567,
                fallback: false,
            },
            &mut rng,
        );
        assert_eq!(report.food_name, "Biryani");
        assert_eq!(report.nutrition.calories, 290.0);
        assert_eq!(report.confidence, 85.7);
        assert!(report.image_url.starts_with("https://"));
    }

    #[test]
    fn label_without_record_becomes_default_dish() {
        let mut rng = StdRng::seed_from_u64(1);
        let report = analyzer().report(
            Detection {
                label: "chicken_curry".into(),
                confidence: 0.9,
                fallback: false,
            },
            &mut rng,
        );
        assert_eq!(report.label, "dal_tadka");
        assert_eq!(report.food_name, "Dal Tadka");
        assert_eq!(report.confidence, 30.0);
    }

    #[test]
    fn garbage_upload_still_produces_a_report() {
        let mut rng = StdRng::seed_from_u64(2);
        let report = analyzer().analyze(b"definitely not a png", "lunch.png", &mut rng);
        assert_eq!(report.confidence, 30.0);
        assert!(!report.health_tips.is_empty());
        assert!(nutrition::lookup(&report.label).is_some());
    }
}
