use image::GrayImage;
use imageproc::edges::canny;
use imageproc::geometry::{approximate_polygon_dp, arc_length};

use super::patterns::ShapeKind;
use super::vision::{bounding_box, external_contours, polygon_area};

/// Geometry of the largest outer contour found in the edge map.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeFeatures {
    pub circularity: f64,
    pub rectangularity: f64,
    pub triangularity: f64,
    pub aspect_ratio: f64,
    pub area_ratio: f64,
    pub num_objects: usize,
}

impl ShapeFeatures {
    pub fn extract(gray: &GrayImage) -> Self {
        let edges = canny(gray, 50.0, 150.0);
        let contours = external_contours(&edges);
        let mut features = ShapeFeatures {
            num_objects: contours.len(),
            ..Default::default()
        };

        let Some((largest, area)) = contours
            .iter()
            .map(|c| (c, polygon_area(&c.points)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
        else {
            return features;
        };

        let perimeter = arc_length(&largest.points, true);
        if perimeter > 0.0 {
            features.circularity = 4.0 * std::f64::consts::PI * area / (perimeter * perimeter);
        }

        let (w, h) = bounding_box(&largest.points);
        features.aspect_ratio = if h > 0 { f64::from(w) / f64::from(h) } else { 0.0 };
        let image_area = f64::from(gray.width()) * f64::from(gray.height());
        if image_area > 0.0 {
            features.area_ratio = area / image_area;
        }

        let vertices = if largest.points.len() < 3 {
            largest.points.len()
        } else {
            approximate_polygon_dp(&largest.points, 0.02 * perimeter, true).len()
        };
        match vertices {
            3 => features.triangularity = 1.0,
            4 => features.rectangularity = 1.0,
            v if v > 8 => features.circularity = features.circularity.max(0.7),
            _ => {}
        }
        features
    }

    /// Rule score for `kind`, clamped into [0, 1].
    pub fn score(&self, kind: ShapeKind) -> f64 {
        let f = self;
        let b = |cond: bool| if cond { 1.0 } else { 0.0 };
        let squareness = 1.0 - (f.aspect_ratio - 1.0).abs();
        let raw = match kind {
            ShapeKind::Triangular => f.triangularity * 0.8 + squareness * 0.2,
            ShapeKind::CircularFlat | ShapeKind::SmallRound => {
                f.circularity * 0.7 + squareness * 0.3
            }
            ShapeKind::OvalFlat => {
                f.circularity * 0.5 + b((f.aspect_ratio - 1.5).abs() < 0.5) * 0.5
            }
            ShapeKind::LargeCircular => f.circularity * 0.6 + b(f.area_ratio > 0.3) * 0.4,
            ShapeKind::RoundBalls => f.circularity * 0.8 + b(f.num_objects > 1) * 0.2,
            ShapeKind::Spiral => {
                if f.circularity > 0.3 {
                    0.4
                } else {
                    0.1
                }
            }
            ShapeKind::ScatteredGrains | ShapeKind::UniformGrains => {
                b(f.num_objects > 5) * 0.6 + b(f.area_ratio < 0.8) * 0.4
            }
            ShapeKind::ChunkyGravy | ShapeKind::ThickGravy => {
                b(f.num_objects > 2) * 0.5 + b(f.area_ratio > 0.4) * 0.5
            }
            ShapeKind::Gravy | ShapeKind::Liquid => {
                b(f.area_ratio > 0.6) * 0.7 + b(f.circularity < 0.5) * 0.3
            }
            ShapeKind::ScatteredPieces | ShapeKind::MixedPieces => {
                b(f.num_objects > 3) * 0.6 + b(f.area_ratio < 0.9) * 0.4
            }
            ShapeKind::IrregularPieces => {
                b(f.num_objects > 2) * 0.5 + b(f.circularity < 0.6) * 0.5
            }
            ShapeKind::SquarePieces => {
                f.rectangularity * 0.8 + b((f.aspect_ratio - 1.0).abs() < 0.3) * 0.2
            }
            ShapeKind::OvalPieces => {
                f.circularity * 0.4 + b((f.aspect_ratio - 1.5).abs() < 0.5) * 0.6
            }
            ShapeKind::ElongatedPieces => {
                b(f.aspect_ratio > 2.0 || f.aspect_ratio < 0.5) * 0.8 + 0.2
            }
            ShapeKind::RoundPuffed | ShapeKind::LargeRound => {
                f.circularity * 0.8 + b(f.area_ratio > 0.2) * 0.2
            }
            ShapeKind::ComboDish => b(f.num_objects > 1) * 0.6 + b(f.area_ratio > 0.5) * 0.4,
            ShapeKind::DenseMass => b(f.area_ratio > 0.4) * 0.7 + b(f.circularity < 0.7) * 0.3,
            ShapeKind::BallsInGravy => b(f.num_objects > 1) * 0.5 + f.circularity * 0.5,
            ShapeKind::Granular => b(f.num_objects > 10) * 0.7 + b(f.area_ratio < 0.6) * 0.3,
            ShapeKind::ChunkyMash => b(f.num_objects > 2) * 0.4 + b(f.circularity < 0.6) * 0.6,
            ShapeKind::ColoredGrains | ShapeKind::WhiteGrains => {
                b(f.num_objects > 8) * 0.6 + b(f.area_ratio < 0.9) * 0.4
            }
            ShapeKind::ScatteredFlakes => {
                b(f.num_objects > 15) * 0.7 + b(f.area_ratio < 0.7) * 0.3
            }
            ShapeKind::MushyGrains => b(f.area_ratio > 0.5) * 0.6 + b(f.circularity < 0.5) * 0.4,
        };
        // Extreme aspect ratios push the squareness term negative.
        raw.clamp(0.0, 1.0)
    }
}
