//! Static visual signatures for every dish the detector can name.

pub type Rgb = [u8; 3];

/// Surface texture a dish is expected to show; selects the statistical test
/// run on the grayscale image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Texture {
    Grainy,
    Smooth,
    SlightlyTextured,
    Liquid,
    Crispy,
    Spiral,
    Creamy,
    Thick,
    Soft,
    Chunky,
    Mixed,
    Flaky,
    Spongy,
    Dense,
    Crumbly,
    Mashed,
    Minced,
    Charred,
    Puffy,
    Mushy,
    Layered,
    /// Tagged on a few curries but has no test of its own.
    Gravy,
}

/// Expected outline of the plated dish; selects a shape rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Triangular,
    CircularFlat,
    SmallRound,
    OvalFlat,
    LargeCircular,
    RoundBalls,
    Spiral,
    ScatteredGrains,
    UniformGrains,
    ChunkyGravy,
    ThickGravy,
    Gravy,
    Liquid,
    ScatteredPieces,
    MixedPieces,
    IrregularPieces,
    SquarePieces,
    OvalPieces,
    ElongatedPieces,
    RoundPuffed,
    LargeRound,
    ComboDish,
    DenseMass,
    BallsInGravy,
    Granular,
    ChunkyMash,
    ColoredGrains,
    WhiteGrains,
    ScatteredFlakes,
    MushyGrains,
}

#[derive(Debug, Clone, Copy)]
pub struct FoodPattern {
    pub label: &'static str,
    pub colors: &'static [Rgb],
    pub texture: Texture,
    pub shape: ShapeKind,
    pub keywords: &'static [&'static str],
    /// Multiplier bonus applied to the combined score: `score * (1 + boost)`.
    pub boost: f64,
}

/// Labels handed out when an image cannot be analysed at all.
pub const POPULAR: [&str; 6] = ["biryani", "dal_tadka", "butter_chicken", "roti", "samosa", "dosa"];

pub fn find(label: &str) -> Option<&'static FoodPattern> {
    FOOD_PATTERNS.iter().find(|p| p.label == label)
}

// `palak_paneer`, `dosa` and `idli` were each defined twice upstream; the later
// definition is kept at the position of the first.
pub static FOOD_PATTERNS: &[FoodPattern] = &[
    FoodPattern {
        label: "biryani",
        colors: &[[255, 215, 0], [255, 165, 0], [139, 69, 19]],
        texture: Texture::Grainy,
        shape: ShapeKind::ScatteredGrains,
        keywords: &["rice", "grains", "mixed", "colorful"],
        boost: 0.3,
    },
    FoodPattern {
        label: "pulao",
        colors: &[[255, 255, 224], [255, 215, 0], [144, 238, 144]],
        texture: Texture::Grainy,
        shape: ShapeKind::UniformGrains,
        keywords: &["rice", "light", "uniform"],
        boost: 0.25,
    },
    FoodPattern {
        label: "fried_rice",
        colors: &[[255, 215, 0], [255, 99, 71], [34, 139, 34]],
        texture: Texture::Mixed,
        shape: ShapeKind::ScatteredPieces,
        keywords: &["rice", "vegetables", "mixed"],
        boost: 0.2,
    },
    FoodPattern {
        label: "roti",
        colors: &[[222, 184, 135], [210, 180, 140], [205, 133, 63]],
        texture: Texture::Smooth,
        shape: ShapeKind::CircularFlat,
        keywords: &["bread", "flat", "round", "wheat"],
        boost: 0.4,
    },
    FoodPattern {
        label: "naan",
        colors: &[[255, 248, 220], [255, 228, 181], [222, 184, 135]],
        texture: Texture::SlightlyTextured,
        shape: ShapeKind::OvalFlat,
        keywords: &["bread", "oval", "light", "fluffy"],
        boost: 0.35,
    },
    FoodPattern {
        label: "paratha",
        colors: &[[205, 133, 63], [222, 184, 135], [160, 82, 45]],
        texture: Texture::Layered,
        shape: ShapeKind::CircularFlat,
        keywords: &["bread", "layered", "brown", "crispy"],
        boost: 0.3,
    },
    FoodPattern {
        label: "dal_tadka",
        colors: &[[255, 215, 0], [255, 165, 0], [218, 165, 32]],
        texture: Texture::Liquid,
        shape: ShapeKind::Gravy,
        keywords: &["dal", "yellow", "liquid", "lentils"],
        boost: 0.4,
    },
    FoodPattern {
        label: "butter_chicken",
        colors: &[[255, 99, 71], [255, 140, 0], [255, 165, 0]],
        texture: Texture::Creamy,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["chicken", "orange", "creamy", "chunks"],
        boost: 0.35,
    },
    FoodPattern {
        label: "palak_paneer",
        colors: &[[34, 139, 34], [0, 128, 0], [255, 255, 255]],
        texture: Texture::Thick,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["green", "spinach", "paneer", "white"],
        boost: 0.45,
    },
    FoodPattern {
        label: "samosa",
        colors: &[[205, 133, 63], [160, 82, 45], [139, 69, 19]],
        texture: Texture::Crispy,
        shape: ShapeKind::Triangular,
        keywords: &["triangular", "fried", "brown", "crispy"],
        boost: 0.5,
    },
    FoodPattern {
        label: "dosa",
        colors: &[[255, 228, 181], [222, 184, 135], [205, 133, 63]],
        texture: Texture::Smooth,
        shape: ShapeKind::LargeCircular,
        keywords: &["large", "thin", "circular", "crepe"],
        boost: 0.45,
    },
    FoodPattern {
        label: "idli",
        colors: &[[255, 255, 255], [255, 248, 220], [245, 245, 220]],
        texture: Texture::Soft,
        shape: ShapeKind::SmallRound,
        keywords: &["white", "round", "small", "soft"],
        boost: 0.4,
    },
    FoodPattern {
        label: "gulab_jamun",
        colors: &[[139, 69, 19], [160, 82, 45], [205, 133, 63]],
        texture: Texture::Smooth,
        shape: ShapeKind::RoundBalls,
        keywords: &["round", "brown", "balls", "sweet"],
        boost: 0.5,
    },
    FoodPattern {
        label: "jalebi",
        colors: &[[255, 165, 0], [255, 140, 0], [255, 215, 0]],
        texture: Texture::Spiral,
        shape: ShapeKind::Spiral,
        keywords: &["spiral", "orange", "coiled", "sweet"],
        boost: 0.6,
    },
    FoodPattern {
        label: "rajma",
        colors: &[[139, 69, 19], [160, 82, 45], [255, 99, 71]],
        texture: Texture::Thick,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["kidney", "beans", "red", "thick"],
        boost: 0.35,
    },
    FoodPattern {
        label: "chole",
        colors: &[[255, 215, 0], [255, 165, 0], [205, 133, 63]],
        texture: Texture::Thick,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["chickpeas", "yellow", "spicy"],
        boost: 0.35,
    },
    FoodPattern {
        label: "moong_dal",
        colors: &[[255, 255, 0], [255, 215, 0], [255, 228, 181]],
        texture: Texture::Liquid,
        shape: ShapeKind::Gravy,
        keywords: &["yellow", "dal", "moong", "liquid"],
        boost: 0.3,
    },
    FoodPattern {
        label: "masoor_dal",
        colors: &[[255, 140, 0], [255, 99, 71], [205, 92, 92]],
        texture: Texture::Liquid,
        shape: ShapeKind::Gravy,
        keywords: &["orange", "red", "dal", "masoor"],
        boost: 0.3,
    },
    FoodPattern {
        label: "paneer_makhani",
        colors: &[[255, 99, 71], [255, 140, 0], [255, 255, 255]],
        texture: Texture::Creamy,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["paneer", "orange", "creamy", "white"],
        boost: 0.4,
    },
    FoodPattern {
        label: "kadai_paneer",
        colors: &[[255, 99, 71], [255, 69, 0], [255, 255, 255]],
        texture: Texture::Thick,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["red", "paneer", "kadai", "spicy"],
        boost: 0.35,
    },
    FoodPattern {
        label: "uttapam",
        colors: &[[255, 228, 181], [255, 99, 71], [34, 139, 34]],
        texture: Texture::SlightlyTextured,
        shape: ShapeKind::CircularFlat,
        keywords: &["thick", "pancake", "vegetables", "round"],
        boost: 0.35,
    },
    FoodPattern {
        label: "vada",
        colors: &[[139, 69, 19], [160, 82, 45], [205, 133, 63]],
        texture: Texture::Crispy,
        shape: ShapeKind::RoundBalls,
        keywords: &["round", "fried", "brown", "crispy"],
        boost: 0.4,
    },
    FoodPattern {
        label: "sambhar",
        colors: &[[255, 140, 0], [255, 99, 71], [255, 215, 0]],
        texture: Texture::Liquid,
        shape: ShapeKind::Gravy,
        keywords: &["sambhar", "orange", "liquid", "vegetables"],
        boost: 0.3,
    },
    FoodPattern {
        label: "pani_puri",
        colors: &[[222, 184, 135], [255, 215, 0], [0, 128, 0]],
        texture: Texture::Crispy,
        shape: ShapeKind::SmallRound,
        keywords: &["small", "round", "crispy", "puri"],
        boost: 0.5,
    },
    FoodPattern {
        label: "bhel_puri",
        colors: &[[222, 184, 135], [255, 99, 71], [34, 139, 34]],
        texture: Texture::Mixed,
        shape: ShapeKind::ScatteredPieces,
        keywords: &["mixed", "puffed", "rice", "chutney"],
        boost: 0.3,
    },
    FoodPattern {
        label: "pakora",
        colors: &[[205, 133, 63], [160, 82, 45], [139, 69, 19]],
        texture: Texture::Crispy,
        shape: ShapeKind::IrregularPieces,
        keywords: &["fried", "crispy", "vegetables", "batter"],
        boost: 0.4,
    },
    FoodPattern {
        label: "aloo_tikki",
        colors: &[[205, 133, 63], [222, 184, 135], [255, 215, 0]],
        texture: Texture::Crispy,
        shape: ShapeKind::CircularFlat,
        keywords: &["potato", "fried", "round", "crispy"],
        boost: 0.4,
    },
    FoodPattern {
        label: "rasgulla",
        colors: &[[255, 255, 255], [255, 248, 220], [245, 245, 220]],
        texture: Texture::Soft,
        shape: ShapeKind::RoundBalls,
        keywords: &["white", "round", "spongy", "sweet"],
        boost: 0.5,
    },
    FoodPattern {
        label: "laddu",
        colors: &[[255, 215, 0], [255, 165, 0], [255, 140, 0]],
        texture: Texture::Grainy,
        shape: ShapeKind::RoundBalls,
        keywords: &["round", "yellow", "sweet", "balls"],
        boost: 0.45,
    },
    FoodPattern {
        label: "barfi",
        colors: &[[255, 255, 255], [255, 192, 203], [255, 215, 0]],
        texture: Texture::Smooth,
        shape: ShapeKind::SquarePieces,
        keywords: &["square", "sweet", "milk", "pieces"],
        boost: 0.4,
    },
    FoodPattern {
        label: "kheer",
        colors: &[[255, 255, 255], [255, 248, 220], [255, 215, 0]],
        texture: Texture::Liquid,
        shape: ShapeKind::Gravy,
        keywords: &["white", "creamy", "rice", "milk"],
        boost: 0.35,
    },
    FoodPattern {
        label: "aloo_gobi",
        colors: &[[255, 215, 0], [255, 255, 255], [255, 165, 0]],
        texture: Texture::Chunky,
        shape: ShapeKind::MixedPieces,
        keywords: &["potato", "cauliflower", "yellow", "vegetables"],
        boost: 0.3,
    },
    FoodPattern {
        label: "bhindi_masala",
        colors: &[[34, 139, 34], [255, 99, 71], [255, 140, 0]],
        texture: Texture::Mixed,
        shape: ShapeKind::ElongatedPieces,
        keywords: &["green", "okra", "vegetables", "spicy"],
        boost: 0.35,
    },
    FoodPattern {
        label: "baingan_bharta",
        colors: &[[128, 0, 128], [75, 0, 130], [255, 99, 71]],
        texture: Texture::Mashed,
        shape: ShapeKind::ChunkyMash,
        keywords: &["purple", "eggplant", "mashed", "roasted"],
        boost: 0.4,
    },
    FoodPattern {
        label: "chicken_curry",
        colors: &[[255, 99, 71], [255, 140, 0], [139, 69, 19]],
        texture: Texture::Gravy,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["chicken", "curry", "red", "spicy"],
        boost: 0.3,
    },
    FoodPattern {
        label: "tandoori_chicken",
        colors: &[[255, 69, 0], [255, 99, 71], [139, 69, 19]],
        texture: Texture::Charred,
        shape: ShapeKind::IrregularPieces,
        keywords: &["chicken", "red", "tandoori", "grilled"],
        boost: 0.4,
    },
    FoodPattern {
        label: "chicken_biryani",
        colors: &[[255, 215, 0], [255, 165, 0], [139, 69, 19], [255, 99, 71]],
        texture: Texture::Grainy,
        shape: ShapeKind::ScatteredGrains,
        keywords: &["biryani", "chicken", "rice", "mixed"],
        boost: 0.35,
    },
    FoodPattern {
        label: "chapati",
        colors: &[[222, 184, 135], [210, 180, 140], [205, 133, 63]],
        texture: Texture::Smooth,
        shape: ShapeKind::CircularFlat,
        keywords: &["bread", "flat", "round", "thin"],
        boost: 0.35,
    },
    FoodPattern {
        label: "kulcha",
        colors: &[[255, 248, 220], [255, 228, 181], [222, 184, 135]],
        texture: Texture::Soft,
        shape: ShapeKind::OvalFlat,
        keywords: &["bread", "soft", "white", "thick"],
        boost: 0.3,
    },
    FoodPattern {
        label: "puri",
        colors: &[[222, 184, 135], [205, 133, 63], [160, 82, 45]],
        texture: Texture::Crispy,
        shape: ShapeKind::SmallRound,
        keywords: &["small", "round", "puffed", "crispy"],
        boost: 0.4,
    },
    FoodPattern {
        label: "lassi",
        colors: &[[255, 255, 255], [255, 248, 220], [255, 192, 203]],
        texture: Texture::Liquid,
        shape: ShapeKind::Liquid,
        keywords: &["white", "drink", "yogurt", "thick"],
        boost: 0.4,
    },
    FoodPattern {
        label: "chai",
        colors: &[[160, 82, 45], [139, 69, 19], [222, 184, 135]],
        texture: Texture::Liquid,
        shape: ShapeKind::Liquid,
        keywords: &["tea", "brown", "milk", "drink"],
        boost: 0.5,
    },
    FoodPattern {
        label: "dhokla",
        colors: &[[255, 255, 0], [255, 215, 0], [173, 255, 47]],
        texture: Texture::Spongy,
        shape: ShapeKind::SquarePieces,
        keywords: &["yellow", "spongy", "steamed", "gujarati"],
        boost: 0.45,
    },
    FoodPattern {
        label: "poha",
        colors: &[[255, 255, 224], [255, 215, 0], [34, 139, 34]],
        texture: Texture::Flaky,
        shape: ShapeKind::ScatteredFlakes,
        keywords: &["flattened", "rice", "yellow", "light"],
        boost: 0.35,
    },
    FoodPattern {
        label: "upma",
        colors: &[[255, 228, 181], [255, 215, 0], [34, 139, 34]],
        texture: Texture::Grainy,
        shape: ShapeKind::Granular,
        keywords: &["semolina", "yellow", "grainy", "south"],
        boost: 0.3,
    },
    FoodPattern {
        label: "pongal",
        colors: &[[255, 255, 224], [255, 215, 0], [0, 0, 0]],
        texture: Texture::Mushy,
        shape: ShapeKind::MushyGrains,
        keywords: &["rice", "dal", "mushy", "south"],
        boost: 0.3,
    },
    FoodPattern {
        label: "kachori",
        colors: &[[205, 133, 63], [160, 82, 45], [139, 69, 19]],
        texture: Texture::Crispy,
        shape: ShapeKind::RoundPuffed,
        keywords: &["round", "fried", "stuffed", "crispy"],
        boost: 0.4,
    },
    FoodPattern {
        label: "bhatura",
        colors: &[[255, 248, 220], [255, 228, 181], [222, 184, 135]],
        texture: Texture::Puffy,
        shape: ShapeKind::LargeRound,
        keywords: &["large", "puffed", "bread", "fried"],
        boost: 0.4,
    },
    FoodPattern {
        label: "chole_bhature",
        colors: &[[255, 215, 0], [255, 248, 220], [255, 165, 0]],
        texture: Texture::Mixed,
        shape: ShapeKind::ComboDish,
        keywords: &["chole", "bhature", "combo", "punjabi"],
        boost: 0.35,
    },
    FoodPattern {
        label: "halwa",
        colors: &[[255, 140, 0], [255, 165, 0], [255, 215, 0]],
        texture: Texture::Dense,
        shape: ShapeKind::DenseMass,
        keywords: &["sweet", "dense", "orange", "semolina"],
        boost: 0.35,
    },
    FoodPattern {
        label: "mysore_pak",
        colors: &[[255, 215, 0], [255, 165, 0], [255, 140, 0]],
        texture: Texture::Crumbly,
        shape: ShapeKind::SquarePieces,
        keywords: &["yellow", "square", "sweet", "ghee"],
        boost: 0.4,
    },
    FoodPattern {
        label: "sandesh",
        colors: &[[255, 255, 255], [255, 248, 220], [255, 192, 203]],
        texture: Texture::Soft,
        shape: ShapeKind::OvalPieces,
        keywords: &["white", "soft", "bengali", "milk"],
        boost: 0.4,
    },
    FoodPattern {
        label: "dal_makhani",
        colors: &[[139, 69, 19], [160, 82, 45], [255, 140, 0]],
        texture: Texture::Thick,
        shape: ShapeKind::ThickGravy,
        keywords: &["black", "dal", "creamy", "thick"],
        boost: 0.4,
    },
    FoodPattern {
        label: "malai_kofta",
        colors: &[[255, 140, 0], [255, 99, 71], [255, 255, 255]],
        texture: Texture::Creamy,
        shape: ShapeKind::BallsInGravy,
        keywords: &["balls", "gravy", "creamy", "white"],
        boost: 0.4,
    },
    FoodPattern {
        label: "matar_paneer",
        colors: &[[34, 139, 34], [255, 99, 71], [255, 255, 255]],
        texture: Texture::Chunky,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["green", "peas", "paneer", "white"],
        boost: 0.35,
    },
    FoodPattern {
        label: "fish_curry",
        colors: &[[255, 99, 71], [255, 140, 0], [255, 69, 0]],
        texture: Texture::Gravy,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["fish", "curry", "red", "spicy"],
        boost: 0.3,
    },
    FoodPattern {
        label: "prawn_curry",
        colors: &[[255, 99, 71], [255, 140, 0], [255, 192, 203]],
        texture: Texture::Gravy,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["prawn", "shrimp", "red", "curry"],
        boost: 0.35,
    },
    FoodPattern {
        label: "mutton_curry",
        colors: &[[139, 69, 19], [160, 82, 45], [255, 99, 71]],
        texture: Texture::Thick,
        shape: ShapeKind::ChunkyGravy,
        keywords: &["mutton", "lamb", "brown", "meat"],
        boost: 0.3,
    },
    FoodPattern {
        label: "keema",
        colors: &[[139, 69, 19], [160, 82, 45], [255, 99, 71]],
        texture: Texture::Minced,
        shape: ShapeKind::Granular,
        keywords: &["minced", "meat", "brown", "ground"],
        boost: 0.35,
    },
    FoodPattern {
        label: "jeera_rice",
        colors: &[[255, 255, 224], [255, 215, 0], [0, 0, 0]],
        texture: Texture::Grainy,
        shape: ShapeKind::UniformGrains,
        keywords: &["rice", "cumin", "light", "aromatic"],
        boost: 0.3,
    },
    FoodPattern {
        label: "lemon_rice",
        colors: &[[255, 255, 0], [255, 215, 0], [255, 165, 0]],
        texture: Texture::Grainy,
        shape: ShapeKind::ColoredGrains,
        keywords: &["yellow", "rice", "lemon", "turmeric"],
        boost: 0.4,
    },
    FoodPattern {
        label: "coconut_rice",
        colors: &[[255, 255, 255], [255, 248, 220], [34, 139, 34]],
        texture: Texture::Grainy,
        shape: ShapeKind::WhiteGrains,
        keywords: &["white", "rice", "coconut", "south"],
        boost: 0.35,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels_are_unique() {
        let labels: HashSet<_> = FOOD_PATTERNS.iter().map(|p| p.label).collect();
        assert_eq!(labels.len(), FOOD_PATTERNS.len());
    }

    #[test]
    fn popular_labels_are_in_the_table() {
        for label in POPULAR {
            assert!(find(label).is_some(), "{label} missing");
        }
    }

    #[test]
    fn duplicate_definitions_resolve_to_the_later_entry() {
        let palak = find("palak_paneer").unwrap();
        assert_eq!(palak.keywords, &["green", "spinach", "paneer", "white"]);
        assert!((palak.boost - 0.45).abs() < 1e-9);
    }

    #[test]
    fn every_pattern_has_colors_and_keywords() {
        for p in FOOD_PATTERNS {
            assert!(!p.colors.is_empty(), "{}", p.label);
            assert!(!p.keywords.is_empty(), "{}", p.label);
            assert!(p.boost >= 0.0);
        }
    }
}
