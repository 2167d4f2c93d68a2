//! Static per-dish nutrition table and the health-tip rules built on it.

use rand::Rng;
use serde::Serialize;

/// Nutrition per serving for one dish.
#[derive(Debug, Clone, Copy)]
pub struct NutritionRecord {
    pub label: &'static str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    /// Empty for dishes without a reference photo.
    pub image_url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
    pub sugar: f64,
}

impl NutritionRecord {
    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            fiber: self.fiber,
            sugar: self.sugar,
        }
    }
}

impl Nutrition {
    /// Scales each field by its own factor drawn from `1 ± 0.15 * (1 - confidence)`.
    pub fn vary<R: Rng + ?Sized>(self, confidence: f64, rng: &mut R) -> Self {
        let spread = 0.15 * (1.0 - confidence.clamp(0.0, 1.0));
        let mut jitter = |v: f64| v * rng.random_range(1.0 - spread..=1.0 + spread);
        Nutrition {
            calories: jitter(self.calories),
            protein: jitter(self.protein),
            carbs: jitter(self.carbs),
            fats: jitter(self.fats),
            fiber: jitter(self.fiber),
            sugar: jitter(self.sugar),
        }
        .rounded()
    }

    /// Every field rounded to one decimal.
    pub fn rounded(self) -> Self {
        let r = |v: f64| (v * 10.0).round() / 10.0;
        Nutrition {
            calories: r(self.calories),
            protein: r(self.protein),
            carbs: r(self.carbs),
            fats: r(self.fats),
            fiber: r(self.fiber),
            sugar: r(self.sugar),
        }
    }
}

pub fn lookup(label: &str) -> Option<&'static NutritionRecord> {
    let key = label.trim().to_lowercase().replace(' ', "_");
    NUTRITION.iter().find(|r| r.label == key)
}

/// Records whose keywords contain any of `keywords` (case-insensitive substring).
pub fn search_by_keywords(keywords: &[&str]) -> Vec<&'static NutritionRecord> {
    let wanted: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    NUTRITION
        .iter()
        .filter(|r| {
            wanted
                .iter()
                .any(|w| r.keywords.iter().any(|kw| kw.to_lowercase().contains(w.as_str())))
        })
        .collect()
}

/// `"dal_tadka"` -> `"Dal Tadka"`.
pub fn display_name(label: &str) -> String {
    label
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

const RICE_DISHES: &[&str] = &["biryani", "pulao", "fried_rice"];
const LEGUME_DISHES: &[&str] = &["dal_tadka", "rajma", "chole", "moong_dal", "masoor_dal"];
const RICH_CURRIES: &[&str] = &["paneer_makhani", "butter_chicken", "dal_makhani"];
const FRIED_SNACKS: &[&str] = &["samosa", "pakora", "vada"];
const FERMENTED_FOODS: &[&str] = &["idli", "dosa", "uttapam"];

pub fn health_tips(label: &str, n: &Nutrition, confidence: f64) -> Vec<String> {
    let mut tips: Vec<&str> = Vec::new();

    if n.calories > 350.0 {
        tips.push("High calorie food - consider portion control");
    } else if n.calories < 100.0 {
        tips.push("Low calorie option - great for weight management");
    }

    if n.protein > 20.0 {
        tips.push("Excellent protein source for muscle building");
    } else if n.protein > 10.0 {
        tips.push("Good protein content");
    }

    if n.fiber > 5.0 {
        tips.push("High fiber content - excellent for digestive health");
    } else if n.fiber > 3.0 {
        tips.push("Good fiber content for digestive health");
    }

    if n.fats > 20.0 {
        tips.push("High in fats - ensure balanced intake");
    } else if n.fats < 3.0 {
        tips.push("Low fat option");
    }

    if n.sugar > 15.0 {
        tips.push("Contains sugars - monitor intake if diabetic");
    }

    if RICE_DISHES.contains(&label) {
        tips.push("Rich in carbohydrates - perfect post-workout meal");
    } else if LEGUME_DISHES.contains(&label) {
        tips.push("Plant-based protein powerhouse");
    } else if RICH_CURRIES.contains(&label) {
        tips.push("Rich and creamy - enjoy in moderation");
    } else if FRIED_SNACKS.contains(&label) {
        tips.push("Deep-fried item - balance with lighter meals");
    } else if FERMENTED_FOODS.contains(&label) {
        tips.push("Fermented food - great for gut health");
    }

    if confidence > 0.8 {
        tips.push("High detection confidence - analysis is very accurate");
    } else if confidence > 0.6 {
        tips.push("Good detection confidence - analysis is reliable");
    } else if confidence < 0.4 {
        tips.push("Lower detection confidence - consider uploading a clearer image");
    }

    if tips.is_empty() {
        tips.push("Well-balanced traditional Indian dish");
    }
    tips.into_iter().map(str::to_string).collect()
}

pub static NUTRITION: &[NutritionRecord] = &[
    NutritionRecord {
        label: "biryani",
        calories: 290.0,
        protein: 8.5,
        carbs: 45.0,
        fats: 8.2,
        fiber: 2.1,
        sugar: 3.2,
        description: "Aromatic basmati rice cooked with spices, meat or vegetables",
        keywords: &["biryani", "rice", "basmati", "aromatic"],
        image_url: "https://images.unsplash.com/photo-1563379091339-03246963d96c",
    },
    NutritionRecord {
        label: "pulao",
        calories: 220.0,
        protein: 6.2,
        carbs: 38.0,
        fats: 5.8,
        fiber: 1.8,
        sugar: 2.5,
        description: "Fragrant rice dish cooked with whole spices and vegetables",
        keywords: &["pulao", "pilaf", "rice", "spiced"],
        image_url: "https://images.unsplash.com/photo-1596797038530-2c107229654b",
    },
    NutritionRecord {
        label: "jeera_rice",
        calories: 180.0,
        protein: 4.1,
        carbs: 35.0,
        fats: 3.2,
        fiber: 1.2,
        sugar: 1.8,
        description: "Cumin flavored basmati rice",
        keywords: &["jeera", "cumin", "rice", "plain"],
        image_url: "https://images.unsplash.com/photo-1586190848861-99aa4a171e90",
    },
    NutritionRecord {
        label: "roti",
        calories: 120.0,
        protein: 3.8,
        carbs: 22.0,
        fats: 2.1,
        fiber: 2.8,
        sugar: 0.8,
        description: "Whole wheat flatbread",
        keywords: &["roti", "chapati", "bread", "wheat"],
        image_url: "https://images.unsplash.com/photo-1574653853027-5d2d2bd4ac0a",
    },
    NutritionRecord {
        label: "naan",
        calories: 262.0,
        protein: 8.7,
        carbs: 45.0,
        fats: 5.1,
        fiber: 2.3,
        sugar: 3.2,
        description: "Leavened flatbread baked in tandoor",
        keywords: &["naan", "bread", "tandoor", "leavened"],
        image_url: "https://images.unsplash.com/photo-1565557623262-b51c2513a641",
    },
    NutritionRecord {
        label: "paratha",
        calories: 320.0,
        protein: 7.2,
        carbs: 35.0,
        fats: 16.8,
        fiber: 3.1,
        sugar: 1.5,
        description: "Layered flatbread cooked with ghee or oil",
        keywords: &["paratha", "layered", "bread", "ghee"],
        image_url: "https://images.unsplash.com/photo-1601050690597-df0568f70950",
    },
    NutritionRecord {
        label: "dal_tadka",
        calories: 180.0,
        protein: 12.5,
        carbs: 28.0,
        fats: 3.2,
        fiber: 8.5,
        sugar: 2.1,
        description: "Tempered yellow lentils with spices",
        keywords: &["dal", "lentils", "tadka", "yellow"],
        image_url: "https://images.unsplash.com/photo-1546833999-b9f581a1996d",
    },
    NutritionRecord {
        label: "butter_chicken",
        calories: 438.0,
        protein: 28.5,
        carbs: 12.0,
        fats: 32.1,
        fiber: 2.8,
        sugar: 8.5,
        description: "Creamy tomato-based chicken curry",
        keywords: &["butter", "chicken", "creamy", "tomato"],
        image_url: "https://images.unsplash.com/photo-1565557623262-b51c2513a641",
    },
    NutritionRecord {
        label: "paneer_makhani",
        calories: 365.0,
        protein: 18.2,
        carbs: 15.0,
        fats: 28.5,
        fiber: 3.2,
        sugar: 9.8,
        description: "Rich cottage cheese curry in tomato gravy",
        keywords: &["paneer", "makhani", "cottage", "cheese"],
        image_url: "https://images.unsplash.com/photo-1567188040759-fb8a883dc6d8",
    },
    NutritionRecord {
        label: "samosa",
        calories: 308.0,
        protein: 5.6,
        carbs: 32.0,
        fats: 17.8,
        fiber: 3.5,
        sugar: 2.1,
        description: "Deep-fried pastry with spiced filling",
        keywords: &["samosa", "fried", "pastry", "triangular"],
        image_url: "https://images.unsplash.com/photo-1601050690597-df0568f70950",
    },
    NutritionRecord {
        label: "pakora",
        calories: 285.0,
        protein: 8.2,
        carbs: 25.0,
        fats: 18.5,
        fiber: 4.2,
        sugar: 3.8,
        description: "Deep-fried fritters made with gram flour",
        keywords: &["pakora", "fritters", "gram", "flour"],
        image_url: "https://images.unsplash.com/photo-1567188040759-fb8a883dc6d8",
    },
    NutritionRecord {
        label: "dosa",
        calories: 168.0,
        protein: 4.1,
        carbs: 28.0,
        fats: 4.8,
        fiber: 2.6,
        sugar: 1.2,
        description: "Fermented crepe made from rice and lentil batter",
        keywords: &["dosa", "crepe", "fermented", "south"],
        image_url: "https://images.unsplash.com/photo-1589301760014-d929f3979dbc",
    },
    NutritionRecord {
        label: "gulab_jamun",
        calories: 387.0,
        protein: 6.8,
        carbs: 52.0,
        fats: 16.2,
        fiber: 1.2,
        sugar: 45.8,
        description: "Deep-fried milk dumplings in sugar syrup",
        keywords: &["gulab", "jamun", "sweet", "syrup"],
        image_url: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b",
    },
    NutritionRecord {
        label: "rasgulla",
        calories: 186.0,
        protein: 4.2,
        carbs: 32.0,
        fats: 4.8,
        fiber: 0.5,
        sugar: 28.5,
        description: "Spongy cottage cheese balls in sugar syrup",
        keywords: &["rasgulla", "cottage", "cheese", "spongy"],
        image_url: "https://images.unsplash.com/photo-1578662996442-48f60103fc96",
    },
    NutritionRecord {
        label: "kheer",
        calories: 194.0,
        protein: 5.8,
        carbs: 28.0,
        fats: 6.8,
        fiber: 0.8,
        sugar: 22.5,
        description: "Rice pudding cooked in milk with sugar and nuts",
        keywords: &["kheer", "rice", "pudding", "milk"],
        image_url: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b",
    },
    NutritionRecord {
        label: "fried_rice",
        calories: 238.0,
        protein: 6.2,
        carbs: 42.0,
        fats: 5.8,
        fiber: 1.8,
        sugar: 2.1,
        description: "Indo-Chinese fried rice with vegetables",
        keywords: &["fried", "rice", "chinese"],
        image_url: "",
    },
    NutritionRecord {
        label: "lemon_rice",
        calories: 195.0,
        protein: 4.5,
        carbs: 38.0,
        fats: 3.2,
        fiber: 1.5,
        sugar: 1.8,
        description: "South Indian tangy lemon flavored rice",
        keywords: &["lemon", "rice", "south"],
        image_url: "",
    },
    NutritionRecord {
        label: "coconut_rice",
        calories: 285.0,
        protein: 5.8,
        carbs: 45.0,
        fats: 9.8,
        fiber: 2.2,
        sugar: 3.5,
        description: "Rice cooked with fresh coconut",
        keywords: &["coconut", "rice"],
        image_url: "",
    },
    NutritionRecord {
        label: "tamarind_rice",
        calories: 210.0,
        protein: 4.8,
        carbs: 40.0,
        fats: 4.2,
        fiber: 2.1,
        sugar: 5.8,
        description: "Tangy tamarind flavored rice",
        keywords: &["tamarind", "rice"],
        image_url: "",
    },
    NutritionRecord {
        label: "curd_rice",
        calories: 165.0,
        protein: 6.2,
        carbs: 28.0,
        fats: 3.8,
        fiber: 1.2,
        sugar: 8.5,
        description: "Rice mixed with yogurt and spices",
        keywords: &["curd", "rice", "yogurt"],
        image_url: "",
    },
    NutritionRecord {
        label: "tomato_rice",
        calories: 188.0,
        protein: 4.8,
        carbs: 35.0,
        fats: 4.2,
        fiber: 2.8,
        sugar: 6.2,
        description: "Rice cooked with tomato and spices",
        keywords: &["tomato", "rice"],
        image_url: "",
    },
    NutritionRecord {
        label: "mint_rice",
        calories: 205.0,
        protein: 5.2,
        carbs: 38.0,
        fats: 4.8,
        fiber: 2.5,
        sugar: 2.8,
        description: "Aromatic mint flavored rice",
        keywords: &["mint", "rice", "pudina"],
        image_url: "",
    },
    NutritionRecord {
        label: "vegetable_biryani",
        calories: 268.0,
        protein: 7.8,
        carbs: 48.0,
        fats: 6.2,
        fiber: 4.5,
        sugar: 5.8,
        description: "Mixed vegetable biryani with aromatic spices",
        keywords: &["vegetable", "biryani"],
        image_url: "",
    },
    NutritionRecord {
        label: "chicken_biryani",
        calories: 345.0,
        protein: 22.5,
        carbs: 42.0,
        fats: 12.8,
        fiber: 3.2,
        sugar: 4.5,
        description: "Traditional chicken biryani with basmati rice",
        keywords: &["chicken", "biryani"],
        image_url: "",
    },
    NutritionRecord {
        label: "mutton_biryani",
        calories: 385.0,
        protein: 28.2,
        carbs: 38.0,
        fats: 16.5,
        fiber: 2.8,
        sugar: 3.8,
        description: "Rich mutton biryani with tender meat",
        keywords: &["mutton", "biryani"],
        image_url: "",
    },
    NutritionRecord {
        label: "rajma",
        calories: 245.0,
        protein: 15.2,
        carbs: 35.0,
        fats: 6.8,
        fiber: 12.5,
        sugar: 3.2,
        description: "Kidney beans curry in tomato gravy",
        keywords: &["rajma", "kidney", "beans"],
        image_url: "",
    },
    NutritionRecord {
        label: "chole",
        calories: 269.0,
        protein: 14.8,
        carbs: 38.0,
        fats: 7.2,
        fiber: 11.8,
        sugar: 4.5,
        description: "Spicy chickpea curry",
        keywords: &["chole", "chickpeas"],
        image_url: "",
    },
    NutritionRecord {
        label: "dal_makhani",
        calories: 285.0,
        protein: 12.8,
        carbs: 28.0,
        fats: 14.2,
        fiber: 8.5,
        sugar: 5.8,
        description: "Creamy black lentil curry",
        keywords: &["dal", "makhani", "black"],
        image_url: "",
    },
    NutritionRecord {
        label: "moong_dal",
        calories: 165.0,
        protein: 11.2,
        carbs: 25.0,
        fats: 2.8,
        fiber: 7.8,
        sugar: 2.5,
        description: "Yellow moong lentil curry",
        keywords: &["moong", "dal", "yellow"],
        image_url: "",
    },
    NutritionRecord {
        label: "masoor_dal",
        calories: 158.0,
        protein: 10.8,
        carbs: 26.0,
        fats: 2.2,
        fiber: 8.2,
        sugar: 2.8,
        description: "Red lentil curry",
        keywords: &["masoor", "dal", "red"],
        image_url: "",
    },
    NutritionRecord {
        label: "toor_dal",
        calories: 172.0,
        protein: 11.8,
        carbs: 28.0,
        fats: 2.5,
        fiber: 9.2,
        sugar: 3.2,
        description: "Pigeon pea lentil curry",
        keywords: &["toor", "dal", "arhar"],
        image_url: "",
    },
    NutritionRecord {
        label: "chana_dal",
        calories: 185.0,
        protein: 12.5,
        carbs: 30.0,
        fats: 3.2,
        fiber: 10.5,
        sugar: 3.8,
        description: "Split chickpea lentil curry",
        keywords: &["chana", "dal", "split"],
        image_url: "",
    },
    NutritionRecord {
        label: "palak_paneer",
        calories: 285.0,
        protein: 16.5,
        carbs: 12.0,
        fats: 20.8,
        fiber: 4.2,
        sugar: 6.8,
        description: "Cottage cheese in spinach gravy",
        keywords: &["palak", "paneer", "spinach"],
        image_url: "",
    },
    NutritionRecord {
        label: "aloo_gobi",
        calories: 158.0,
        protein: 4.2,
        carbs: 25.0,
        fats: 5.8,
        fiber: 5.2,
        sugar: 8.5,
        description: "Potato and cauliflower curry",
        keywords: &["aloo", "gobi", "potato", "cauliflower"],
        image_url: "",
    },
    NutritionRecord {
        label: "bhindi_masala",
        calories: 125.0,
        protein: 3.8,
        carbs: 18.0,
        fats: 4.5,
        fiber: 6.8,
        sugar: 5.2,
        description: "Spiced okra curry",
        keywords: &["bhindi", "okra", "ladyfinger"],
        image_url: "",
    },
    NutritionRecord {
        label: "baingan_bharta",
        calories: 145.0,
        protein: 3.2,
        carbs: 22.0,
        fats: 5.8,
        fiber: 8.5,
        sugar: 12.8,
        description: "Roasted eggplant mash",
        keywords: &["baingan", "bharta", "eggplant"],
        image_url: "",
    },
    NutritionRecord {
        label: "kadai_paneer",
        calories: 295.0,
        protein: 18.2,
        carbs: 15.0,
        fats: 20.5,
        fiber: 3.8,
        sugar: 8.2,
        description: "Cottage cheese in spicy tomato gravy",
        keywords: &["kadai", "paneer"],
        image_url: "",
    },
    NutritionRecord {
        label: "matar_paneer",
        calories: 268.0,
        protein: 15.8,
        carbs: 18.0,
        fats: 16.2,
        fiber: 5.2,
        sugar: 9.8,
        description: "Cottage cheese with green peas",
        keywords: &["matar", "paneer", "peas"],
        image_url: "",
    },
    NutritionRecord {
        label: "aloo_matar",
        calories: 185.0,
        protein: 5.8,
        carbs: 32.0,
        fats: 4.2,
        fiber: 6.8,
        sugar: 12.5,
        description: "Potato and green peas curry",
        keywords: &["aloo", "matar", "potato", "peas"],
        image_url: "",
    },
    NutritionRecord {
        label: "pani_puri",
        calories: 36.0,
        protein: 1.2,
        carbs: 6.8,
        fats: 0.8,
        fiber: 0.5,
        sugar: 2.1,
        description: "Crispy shells with spiced water",
        keywords: &["pani", "puri", "golgappa"],
        image_url: "",
    },
    NutritionRecord {
        label: "bhel_puri",
        calories: 168.0,
        protein: 4.5,
        carbs: 28.0,
        fats: 4.8,
        fiber: 3.2,
        sugar: 8.5,
        description: "Mumbai street food with puffed rice",
        keywords: &["bhel", "puri", "mumbai"],
        image_url: "",
    },
    NutritionRecord {
        label: "vada_pav",
        calories: 286.0,
        protein: 8.2,
        carbs: 42.0,
        fats: 9.8,
        fiber: 3.8,
        sugar: 5.2,
        description: "Mumbai burger with potato fritter",
        keywords: &["vada", "pav", "mumbai"],
        image_url: "",
    },
    NutritionRecord {
        label: "pav_bhaji",
        calories: 325.0,
        protein: 9.5,
        carbs: 48.0,
        fats: 11.2,
        fiber: 6.8,
        sugar: 12.5,
        description: "Spiced vegetable mash with bread",
        keywords: &["pav", "bhaji", "mumbai"],
        image_url: "",
    },
    NutritionRecord {
        label: "dahi_puri",
        calories: 85.0,
        protein: 2.8,
        carbs: 12.0,
        fats: 2.8,
        fiber: 1.2,
        sugar: 6.8,
        description: "Crispy shells with yogurt and chutneys",
        keywords: &["dahi", "puri", "yogurt"],
        image_url: "",
    },
    NutritionRecord {
        label: "sev_puri",
        calories: 125.0,
        protein: 3.2,
        carbs: 18.0,
        fats: 4.5,
        fiber: 2.2,
        sugar: 5.8,
        description: "Crispy base with sev and chutneys",
        keywords: &["sev", "puri"],
        image_url: "",
    },
    NutritionRecord {
        label: "aloo_tikki",
        calories: 185.0,
        protein: 4.8,
        carbs: 28.0,
        fats: 6.8,
        fiber: 3.5,
        sugar: 3.2,
        description: "Spiced potato patties",
        keywords: &["aloo", "tikki", "potato"],
        image_url: "",
    },
    NutritionRecord {
        label: "chole_bhature",
        calories: 485.0,
        protein: 16.8,
        carbs: 68.0,
        fats: 18.2,
        fiber: 8.5,
        sugar: 8.8,
        description: "Chickpea curry with fried bread",
        keywords: &["chole", "bhature"],
        image_url: "",
    },
    NutritionRecord {
        label: "idli",
        calories: 58.0,
        protein: 2.1,
        carbs: 11.0,
        fats: 0.8,
        fiber: 1.2,
        sugar: 0.5,
        description: "Steamed rice and lentil cakes",
        keywords: &["idli", "steamed", "south"],
        image_url: "",
    },
    NutritionRecord {
        label: "vada",
        calories: 185.0,
        protein: 5.8,
        carbs: 18.0,
        fats: 10.2,
        fiber: 2.8,
        sugar: 1.5,
        description: "Deep-fried lentil donuts",
        keywords: &["vada", "medu", "south"],
        image_url: "",
    },
    NutritionRecord {
        label: "uttapam",
        calories: 145.0,
        protein: 4.2,
        carbs: 24.0,
        fats: 3.8,
        fiber: 2.1,
        sugar: 2.8,
        description: "Thick pancake with vegetables",
        keywords: &["uttapam", "south"],
        image_url: "",
    },
    NutritionRecord {
        label: "sambhar",
        calories: 95.0,
        protein: 6.8,
        carbs: 15.0,
        fats: 1.8,
        fiber: 4.5,
        sugar: 3.2,
        description: "South Indian lentil soup",
        keywords: &["sambhar", "south", "lentil"],
        image_url: "",
    },
    NutritionRecord {
        label: "rasam",
        calories: 65.0,
        protein: 2.8,
        carbs: 12.0,
        fats: 1.2,
        fiber: 2.8,
        sugar: 4.5,
        description: "Tangy South Indian soup",
        keywords: &["rasam", "south", "soup"],
        image_url: "",
    },
    NutritionRecord {
        label: "upma",
        calories: 158.0,
        protein: 4.2,
        carbs: 28.0,
        fats: 3.8,
        fiber: 2.5,
        sugar: 2.8,
        description: "Semolina breakfast dish",
        keywords: &["upma", "semolina"],
        image_url: "",
    },
    NutritionRecord {
        label: "poha",
        calories: 145.0,
        protein: 3.8,
        carbs: 28.0,
        fats: 2.8,
        fiber: 2.2,
        sugar: 3.5,
        description: "Flattened rice breakfast",
        keywords: &["poha", "flattened", "rice"],
        image_url: "",
    },
    NutritionRecord {
        label: "laddu",
        calories: 425.0,
        protein: 8.5,
        carbs: 58.0,
        fats: 18.2,
        fiber: 2.8,
        sugar: 48.5,
        description: "Round sweet balls made with flour and ghee",
        keywords: &["laddu", "sweet", "round"],
        image_url: "",
    },
    NutritionRecord {
        label: "jalebi",
        calories: 385.0,
        protein: 4.2,
        carbs: 68.0,
        fats: 12.8,
        fiber: 0.8,
        sugar: 58.5,
        description: "Spiral shaped sweet in sugar syrup",
        keywords: &["jalebi", "sweet", "spiral"],
        image_url: "",
    },
    NutritionRecord {
        label: "barfi",
        calories: 365.0,
        protein: 8.8,
        carbs: 48.0,
        fats: 15.2,
        fiber: 1.5,
        sugar: 42.8,
        description: "Milk-based sweet squares",
        keywords: &["barfi", "sweet", "milk"],
        image_url: "",
    },
    NutritionRecord {
        label: "halwa",
        calories: 285.0,
        protein: 6.2,
        carbs: 42.0,
        fats: 10.8,
        fiber: 2.8,
        sugar: 35.5,
        description: "Sweet pudding made with semolina or carrots",
        keywords: &["halwa", "sweet"],
        image_url: "",
    },
    NutritionRecord {
        label: "kulfi",
        calories: 195.0,
        protein: 5.8,
        carbs: 28.0,
        fats: 7.2,
        fiber: 0.5,
        sugar: 25.8,
        description: "Traditional Indian ice cream",
        keywords: &["kulfi", "ice", "cream"],
        image_url: "",
    },
    NutritionRecord {
        label: "payasam",
        calories: 225.0,
        protein: 6.8,
        carbs: 38.0,
        fats: 6.2,
        fiber: 1.8,
        sugar: 32.5,
        description: "South Indian sweet pudding",
        keywords: &["payasam", "kheer", "pudding"],
        image_url: "",
    },
    NutritionRecord {
        label: "bhatura",
        calories: 385.0,
        protein: 9.8,
        carbs: 52.0,
        fats: 15.8,
        fiber: 2.8,
        sugar: 3.5,
        description: "Deep-fried leavened bread",
        keywords: &["bhatura", "fried", "bread"],
        image_url: "",
    },
    NutritionRecord {
        label: "kulcha",
        calories: 285.0,
        protein: 8.2,
        carbs: 48.0,
        fats: 6.8,
        fiber: 2.5,
        sugar: 4.2,
        description: "Stuffed leavened bread",
        keywords: &["kulcha", "stuffed", "bread"],
        image_url: "",
    },
    NutritionRecord {
        label: "puri",
        calories: 168.0,
        protein: 4.2,
        carbs: 22.0,
        fats: 7.8,
        fiber: 1.8,
        sugar: 1.2,
        description: "Deep-fried unleavened bread",
        keywords: &["puri", "fried", "bread"],
        image_url: "",
    },
    NutritionRecord {
        label: "roomali_roti",
        calories: 95.0,
        protein: 3.2,
        carbs: 18.0,
        fats: 1.8,
        fiber: 2.2,
        sugar: 0.8,
        description: "Thin handkerchief bread",
        keywords: &["roomali", "roti", "thin"],
        image_url: "",
    },
    NutritionRecord {
        label: "missi_roti",
        calories: 185.0,
        protein: 6.8,
        carbs: 28.0,
        fats: 5.8,
        fiber: 4.2,
        sugar: 2.5,
        description: "Bread made with gram flour",
        keywords: &["missi", "roti", "gram"],
        image_url: "",
    },
    NutritionRecord {
        label: "dhokla",
        calories: 125.0,
        protein: 4.8,
        carbs: 22.0,
        fats: 2.2,
        fiber: 3.5,
        sugar: 8.5,
        description: "Gujarati steamed gram flour cake",
        keywords: &["dhokla", "gujarati", "steamed"],
        image_url: "",
    },
    NutritionRecord {
        label: "khandvi",
        calories: 95.0,
        protein: 3.8,
        carbs: 15.0,
        fats: 2.8,
        fiber: 2.2,
        sugar: 4.5,
        description: "Gujarati gram flour rolls",
        keywords: &["khandvi", "gujarati"],
        image_url: "",
    },
    NutritionRecord {
        label: "thepla",
        calories: 145.0,
        protein: 4.2,
        carbs: 22.0,
        fats: 5.2,
        fiber: 3.8,
        sugar: 2.8,
        description: "Gujarati spiced flatbread",
        keywords: &["thepla", "gujarati", "bread"],
        image_url: "",
    },
    NutritionRecord {
        label: "undhiyu",
        calories: 185.0,
        protein: 6.8,
        carbs: 28.0,
        fats: 6.2,
        fiber: 8.5,
        sugar: 12.8,
        description: "Gujarati mixed vegetable curry",
        keywords: &["undhiyu", "gujarati", "mixed"],
        image_url: "",
    },
    NutritionRecord {
        label: "misal_pav",
        calories: 285.0,
        protein: 12.8,
        carbs: 42.0,
        fats: 8.2,
        fiber: 8.8,
        sugar: 6.5,
        description: "Maharashtrian spicy sprouts curry",
        keywords: &["misal", "pav", "maharashtrian"],
        image_url: "",
    },
    NutritionRecord {
        label: "puran_poli",
        calories: 325.0,
        protein: 8.8,
        carbs: 58.0,
        fats: 8.2,
        fiber: 4.5,
        sugar: 28.5,
        description: "Maharashtrian sweet flatbread",
        keywords: &["puran", "poli", "maharashtrian"],
        image_url: "",
    },
    NutritionRecord {
        label: "dal_baati",
        calories: 385.0,
        protein: 14.8,
        carbs: 52.0,
        fats: 14.2,
        fiber: 6.8,
        sugar: 4.5,
        description: "Rajasthani baked wheat balls with lentils",
        keywords: &["dal", "baati", "rajasthani"],
        image_url: "",
    },
    NutritionRecord {
        label: "gatte_ki_sabzi",
        calories: 225.0,
        protein: 8.2,
        carbs: 32.0,
        fats: 7.8,
        fiber: 4.2,
        sugar: 6.8,
        description: "Rajasthani gram flour dumplings curry",
        keywords: &["gatte", "rajasthani"],
        image_url: "",
    },
    NutritionRecord {
        label: "litti_chokha",
        calories: 285.0,
        protein: 9.8,
        carbs: 48.0,
        fats: 7.2,
        fiber: 6.8,
        sugar: 5.2,
        description: "Bihari stuffed wheat balls with mashed vegetables",
        keywords: &["litti", "chokha", "bihari"],
        image_url: "",
    },
    NutritionRecord {
        label: "momo",
        calories: 185.0,
        protein: 8.2,
        carbs: 25.0,
        fats: 6.8,
        fiber: 2.8,
        sugar: 3.2,
        description: "Tibetan steamed dumplings",
        keywords: &["momo", "dumpling", "tibetan"],
        image_url: "",
    },
    NutritionRecord {
        label: "lassi",
        calories: 125.0,
        protein: 4.8,
        carbs: 18.0,
        fats: 3.8,
        fiber: 0.2,
        sugar: 16.5,
        description: "Yogurt-based refreshing drink",
        keywords: &["lassi", "yogurt", "drink"],
        image_url: "",
    },
    NutritionRecord {
        label: "chaas",
        calories: 65.0,
        protein: 3.2,
        carbs: 8.0,
        fats: 1.8,
        fiber: 0.1,
        sugar: 7.2,
        description: "Spiced buttermilk",
        keywords: &["chaas", "buttermilk"],
        image_url: "",
    },
    NutritionRecord {
        label: "masala_chai",
        calories: 85.0,
        protein: 2.8,
        carbs: 12.0,
        fats: 2.8,
        fiber: 0.2,
        sugar: 10.5,
        description: "Spiced Indian tea with milk",
        keywords: &["masala", "chai", "tea"],
        image_url: "",
    },
    NutritionRecord {
        label: "filter_coffee",
        calories: 45.0,
        protein: 1.8,
        carbs: 6.0,
        fats: 1.5,
        fiber: 0.1,
        sugar: 5.2,
        description: "South Indian filter coffee",
        keywords: &["filter", "coffee", "south"],
        image_url: "",
    },
    NutritionRecord {
        label: "thandai",
        calories: 185.0,
        protein: 5.8,
        carbs: 22.0,
        fats: 8.2,
        fiber: 2.2,
        sugar: 18.5,
        description: "Festival drink with nuts and spices",
        keywords: &["thandai", "holi", "drink"],
        image_url: "",
    },
    NutritionRecord {
        label: "aam_panna",
        calories: 95.0,
        protein: 0.8,
        carbs: 24.0,
        fats: 0.2,
        fiber: 1.8,
        sugar: 20.5,
        description: "Raw mango summer drink",
        keywords: &["aam", "panna", "mango"],
        image_url: "",
    },
    NutritionRecord {
        label: "nimbu_paani",
        calories: 45.0,
        protein: 0.2,
        carbs: 12.0,
        fats: 0.1,
        fiber: 0.2,
        sugar: 10.8,
        description: "Fresh lemon water",
        keywords: &["nimbu", "paani", "lemon"],
        image_url: "",
    },
    NutritionRecord {
        label: "jaljeera",
        calories: 35.0,
        protein: 0.8,
        carbs: 8.0,
        fats: 0.2,
        fiber: 1.2,
        sugar: 6.5,
        description: "Cumin flavored refreshing drink",
        keywords: &["jaljeera", "cumin", "drink"],
        image_url: "",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn lookup_normalizes_label() {
        assert_eq!(lookup("Dal Tadka").map(|r| r.label), Some("dal_tadka"));
        assert!(lookup("pizza").is_none());
    }

    #[test]
    fn display_name_title_cases() {
        assert_eq!(display_name("dal_tadka"), "Dal Tadka");
        assert_eq!(display_name("biryani"), "Biryani");
        assert_eq!(display_name("chole_bhature"), "Chole Bhature");
    }

    #[test]
    fn full_confidence_keeps_table_values() {
        let base = lookup("biryani").unwrap().nutrition();
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(base.vary(1.0, &mut rng), base.rounded());
    }

    #[test]
    fn variation_stays_within_spread() {
        let base = lookup("samosa").unwrap().nutrition();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let v = base.vary(0.0, &mut rng);
            assert!(v.calories >= base.calories * 0.85 - 0.05);
            assert!(v.calories <= base.calories * 1.15 + 0.05);
            assert_eq!(v.calories, (v.calories * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn tips_follow_thresholds() {
        let n = Nutrition {
            calories: 400.0,
            protein: 25.0,
            carbs: 40.0,
            fats: 2.0,
            fiber: 6.0,
            sugar: 20.0,
        };
        let tips = health_tips("biryani", &n, 0.9);
        assert_eq!(tips.len(), 7);
        assert!(tips[0].starts_with("High calorie"));
        assert!(tips.iter().any(|t| t.starts_with("Rich in carbohydrates")));
        assert!(tips.last().unwrap().starts_with("High detection confidence"));
    }

    #[test]
    fn quiet_nutrition_gets_balanced_tip() {
        let n = Nutrition {
            calories: 200.0,
            protein: 5.0,
            carbs: 30.0,
            fats: 5.0,
            fiber: 2.0,
            sugar: 3.0,
        };
        assert_eq!(
            health_tips("roti", &n, 0.5),
            vec!["Well-balanced traditional Indian dish".to_string()]
        );
    }

    #[test]
    fn keyword_search_matches_substrings() {
        let hits = search_by_keywords(&["gujarati"]);
        assert!(hits.iter().any(|r| r.label == "dhokla"));
        assert!(search_by_keywords(&[" "]).is_empty());
    }
}
